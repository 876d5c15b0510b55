//! Shared building blocks for the counter workspace: wire types returned by
//! the HTTP layer and the tracing subscriber setup used by every binary.

pub mod types;
pub mod utils;
