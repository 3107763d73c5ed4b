//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod compose_digest;
pub mod pick_quote;
pub mod user_locks;

#[cfg(test)]
pub(crate) mod test_support;
