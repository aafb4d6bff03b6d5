//! Chunk-by-chunk stream reader

use super::decoder::Utf8StreamDecoder;
use super::framing::{Segment, SegmentFramer};

/// State of one response stream: decoder plus framing buffer.
///
/// Feed it raw chunks as they arrive; every call returns the segments that
/// chunk completed, in stream order. Chunk boundaries never change the
/// result: any split of the same bytes yields the same segments.
#[derive(Debug, Default)]
pub struct StreamReader {
    decoder: Utf8StreamDecoder,
    framer: SegmentFramer,
    segments_emitted: usize,
}

/// What was left when the stream ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSummary {
    /// Segments emitted over the whole stream.
    pub segments: usize,
    /// Undelimited trailing text, dropped without being rendered.
    pub discarded: String,
}

impl StreamReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and frame one chunk.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Segment> {
        let text = self.decoder.decode(chunk);
        let segments = self.framer.push(&text);
        self.segments_emitted += segments.len();
        segments
    }

    /// Decoded text not yet confirmed as a complete segment.
    pub fn pending(&self) -> &str {
        self.framer.pending()
    }

    /// End of stream. Trailing content is discarded, not flushed.
    pub fn finish(mut self) -> StreamSummary {
        let mut discarded = self.framer.finish();
        discarded.push_str(&self.decoder.finish());
        StreamSummary {
            segments: self.segments_emitted,
            discarded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(chunks: &[&[u8]]) -> (Vec<String>, StreamSummary) {
        let mut reader = StreamReader::new();
        let mut out = Vec::new();
        for chunk in chunks {
            out.extend(reader.feed(chunk).into_iter().map(Segment::into_text));
        }
        (out, reader.finish())
    }

    #[test]
    fn test_single_chunk_two_segments() {
        let (segments, summary) = render(&[b"data: Hel\n\ndata: lo\n\n".as_slice()]);
        assert_eq!(segments, vec!["Hel", "lo"]);
        assert_eq!(segments.concat(), "Hello");
        assert_eq!(summary.segments, 2);
        assert_eq!(summary.discarded, "");
    }

    #[test]
    fn test_nothing_emitted_until_delimiter_arrives() {
        let mut reader = StreamReader::new();
        assert!(reader.feed(b"data: Hel").is_empty());
        assert_eq!(reader.pending(), "data: Hel");

        let segments = reader.feed(b"lo\n\n");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text(), "Hello");
    }

    #[test]
    fn test_trailing_text_is_discarded() {
        let (segments, summary) = render(&[b"data: done\n\ndata: cut off".as_slice()]);
        assert_eq!(segments, vec!["done"]);
        assert_eq!(summary.discarded, "data: cut off");
    }

    #[test]
    fn test_multibyte_char_split_between_chunks() {
        // "ሰ" is E1 88 B0
        let (segments, _) = render(&[b"data: \xE1\x88".as_slice(), b"\xB0\n\n".as_slice()]);
        assert_eq!(segments, vec!["ሰ"]);
    }

    #[test]
    fn test_output_independent_of_chunk_boundaries() {
        let stream = "data: ሰላም \n\ndata: 🤖 hi\n\ndata: \n\ndata: é\nnext\n\ndata: tail"
            .as_bytes();
        let (expected, expected_summary) = render(&[stream]);
        assert_eq!(expected, vec!["ሰላም ", "🤖 hi", "", "é\nnext"]);

        for i in 0..=stream.len() {
            for j in i..=stream.len() {
                let (segments, summary) = render(&[&stream[..i], &stream[i..j], &stream[j..]]);
                assert_eq!(segments, expected, "split at {i}/{j}");
                assert_eq!(summary, expected_summary, "split at {i}/{j}");
            }
        }

        let bytewise: Vec<&[u8]> = stream.chunks(1).collect();
        assert_eq!(render(&bytewise).0, expected);
    }
}
