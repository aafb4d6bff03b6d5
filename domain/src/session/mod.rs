//! Chat session domain.
//!
//! - [`entities::ChatMessage`] — a single message record (`role` + `text`)
//! - [`transcript::Transcript`] — the ordered messages currently on display
//! - [`preview::SessionPreview`] — one-line summary of a stored session

pub mod entities;
pub mod preview;
pub mod transcript;
