use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, instrument};

use crate::counter::repository::CounterRepository;
use crate::errors::ServiceError;

/// Counter business service independent of web framework
pub struct CounterService<R: CounterRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CounterRepository + ?Sized> CounterService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Increment the global counter and return the committed value.
    ///
    /// Failures are logged and returned unchanged; nothing is retried.
    ///
    /// # Examples
    /// ```
    /// use service::counter::{repository::mock::MockCounterRepository, CounterService};
    /// use std::sync::Arc;
    /// let svc = CounterService::new(Arc::new(MockCounterRepository::default()));
    /// assert_eq!(tokio_test::block_on(svc.increment()).unwrap(), 1);
    /// assert_eq!(tokio_test::block_on(svc.increment()).unwrap(), 2);
    /// ```
    #[instrument(skip(self))]
    pub async fn increment(&self) -> Result<i32, ServiceError> {
        let start = Instant::now();
        match self.repo.increment().await {
            Ok(value) => {
                info!(value, elapsed_ms = start.elapsed().as_millis() as u64, "counter_incremented");
                Ok(value)
            }
            Err(e) => {
                error!(error = %e, code = e.code(), "counter_increment_failed");
                Err(e)
            }
        }
    }

    /// Read the current value without changing it.
    #[instrument(skip(self))]
    pub async fn current(&self) -> Result<i32, ServiceError> {
        self.repo.current().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::repository::mock::MockCounterRepository;
    use std::collections::HashSet;

    #[tokio::test]
    async fn sequential_calls_return_one_to_n() {
        let svc = CounterService::new(Arc::new(MockCounterRepository::default()));
        let mut got = Vec::new();
        for _ in 0..10 {
            got.push(svc.increment().await.unwrap());
        }
        assert_eq!(got, (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_calls_are_gap_free() {
        let repo: Arc<dyn CounterRepository> = Arc::new(MockCounterRepository::starting_at(100));
        let svc = Arc::new(CounterService::new(repo));
        let mut handles = Vec::new();
        for _ in 0..32 {
            let svc = Arc::clone(&svc);
            handles.push(tokio::spawn(async move { svc.increment().await }));
        }
        let mut seen = HashSet::new();
        for h in handles {
            assert!(seen.insert(h.await.unwrap().unwrap()));
        }
        assert_eq!(seen, (101..=132).collect::<HashSet<_>>());
    }

    #[tokio::test]
    async fn failure_propagates_and_value_unchanged() {
        let repo = Arc::new(MockCounterRepository::starting_at(7));
        let svc = CounterService::new(Arc::clone(&repo));
        repo.set_unavailable(true);
        let err = svc.increment().await.unwrap_err();
        assert!(err.is_unavailable());
        repo.set_unavailable(false);
        assert_eq!(svc.current().await.unwrap(), 7);
    }
}
