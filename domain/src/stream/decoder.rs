//! Streaming UTF-8 decoder

use std::char::REPLACEMENT_CHARACTER;

/// Decodes UTF-8 bytes that arrive in arbitrary chunks.
///
/// A multi-byte sequence cut off at the end of a chunk is held back and
/// completed with the next chunk. Invalid sequences decode to U+FFFD;
/// decoding never fails.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `chunk`, prefixed by any bytes held back from the last call.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest: &[u8] = &bytes;

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        // Truncated sequence at the end: wait for more bytes
                        None => {
                            self.pending = after.to_vec();
                            break;
                        }
                        Some(len) => {
                            out.push(REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                    }
                }
            }
        }

        out
    }

    /// Number of bytes held back waiting for the rest of a sequence.
    ///
    /// Diagnostic accessor; decoding never needs it.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Flush at end of input. A held-back partial sequence becomes U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            REPLACEMENT_CHARACTER.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(b"hello"), "hello");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        // "é" is 0xC3 0xA9
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(b"caf\xC3"), "caf");
        assert_eq!(decoder.pending_len(), 1);
        assert_eq!(decoder.decode(b"\xA9!"), "é!");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_four_byte_char_fed_one_byte_at_a_time() {
        let bytes = "🤖".as_bytes();
        let mut decoder = Utf8StreamDecoder::new();
        let mut out = String::new();
        for b in bytes {
            out.push_str(&decoder.decode(std::slice::from_ref(b)));
        }
        assert_eq!(out, "🤖");
    }

    #[test]
    fn test_invalid_byte_becomes_replacement() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(b"a\xFFb"), "a\u{FFFD}b");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_finish_flushes_truncated_sequence() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(b"x\xE1\x88"), "x");
        assert_eq!(decoder.finish(), "\u{FFFD}");
        assert_eq!(decoder.finish(), "");
    }
}
