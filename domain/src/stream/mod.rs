//! Incremental response-stream reading.
//!
//! - [`decoder::Utf8StreamDecoder`] — chunk-safe UTF-8 decoding
//! - [`framing::SegmentFramer`] — blank-line framing of `data: ` events
//! - [`reader::StreamReader`] — both of the above, fed one chunk at a time

pub mod decoder;
pub mod framing;
pub mod reader;

/// Text shown in place of a reply whose stream failed.
pub const ERROR_INDICATOR: &str = "⚠️ Error: failed to connect.";
