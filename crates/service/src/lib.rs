//! Service layer for the counter.
//! - `counter::repository` abstracts persistence (SeaORM or in-memory).
//! - `counter::service` is the entry point used by the HTTP layer.

pub mod errors;
pub mod counter;
#[cfg(test)]
pub mod test_support;
