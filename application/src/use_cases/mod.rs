//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod manage_sessions;
pub mod send_query;

#[cfg(test)]
pub(crate) mod test_support;
