//! Domain layer for streamchat
//!
//! This crate contains the pure logic of the chat client: the query value
//! object, chat message records, the in-memory transcript, and the
//! incremental response-stream reader. It performs no I/O.
//!
//! # Stream reading
//!
//! The server answers a query with a body of UTF-8 events separated by a
//! blank line, each carrying a `data: ` prefixed payload:
//!
//! ```text
//! data: Hel\n\ndata: lo\n\n
//! ```
//!
//! Bytes arrive in arbitrary chunks. [`StreamReader`] combines a
//! [`Utf8StreamDecoder`] (multi-byte sequences may straddle chunks) with a
//! [`SegmentFramer`] (events may straddle chunks) and yields ordered
//! [`Segment`]s. Undelimited trailing text is never emitted.

pub mod core;
pub mod session;
pub mod stream;
pub mod util;

// Re-export commonly used types
pub use core::{error::DomainError, query::Query};
pub use session::{
    entities::{ChatMessage, Role},
    preview::SessionPreview,
    transcript::Transcript,
};
pub use stream::{
    ERROR_INDICATOR,
    decoder::Utf8StreamDecoder,
    framing::{Segment, SegmentFramer},
    reader::{StreamReader, StreamSummary},
};
