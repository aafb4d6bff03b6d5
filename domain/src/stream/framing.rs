//! Blank-line framing of `data: ` events

/// Separates events in the decoded stream.
pub const DELIMITER: &str = "\n\n";

/// A part must start with this marker to count as an event.
pub const DATA_MARKER: &str = "data:";

/// Removed (first occurrence only) to obtain the segment text.
pub const DATA_PREFIX: &str = "data: ";

/// Text carried by one complete event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    text: String,
}

impl Segment {
    /// Build a segment from one delimited part of the stream.
    ///
    /// Parts not starting with `data:` are not events and yield `None`.
    /// Prefix removal is a literal substring replace, so `data:x` (no
    /// space) is kept verbatim rather than rejected.
    pub fn from_part(part: &str) -> Option<Self> {
        if !part.starts_with(DATA_MARKER) {
            return None;
        }
        Some(Self {
            text: part.replacen(DATA_PREFIX, "", 1),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Splits decoded text into segments at every blank line.
///
/// After each [`push`](Self::push) the buffer holds no delimiter: at most
/// one incomplete trailing part survives between calls.
#[derive(Debug, Default)]
pub struct SegmentFramer {
    buffer: String,
}

impl SegmentFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add decoded text and return every segment it completes, in order.
    pub fn push(&mut self, text: &str) -> Vec<Segment> {
        self.buffer.push_str(text);

        let mut segments = Vec::new();
        let mut consumed = 0;
        while let Some(pos) = self.buffer[consumed..].find(DELIMITER) {
            let part = &self.buffer[consumed..consumed + pos];
            if let Some(segment) = Segment::from_part(part) {
                segments.push(segment);
            }
            consumed += pos + DELIMITER.len();
        }
        self.buffer.drain(..consumed);

        segments
    }

    /// Undelimited text waiting for its terminating blank line.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Take the undelimited remainder. It is never turned into a segment.
    pub fn finish(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}
