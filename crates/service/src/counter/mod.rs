//! Counter module: repository abstraction plus the service used by handlers.

pub mod repository;
pub mod service;

pub use repository::{CounterRepository, SeaOrmCounterRepository};
pub use service::CounterService;
