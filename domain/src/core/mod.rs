//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`] — validated user input to send to the server
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod query;
