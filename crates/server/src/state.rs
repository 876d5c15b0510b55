use std::sync::Arc;

use service::counter::{CounterRepository, CounterService};

pub type DynCounterService = CounterService<dyn CounterRepository>;

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub counter: Arc<DynCounterService>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn CounterRepository>) -> Self {
        Self { counter: Arc::new(CounterService::new(repo)) }
    }
}
