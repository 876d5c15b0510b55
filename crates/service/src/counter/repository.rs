use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

/// Persistence for the singleton counter.
#[async_trait]
pub trait CounterRepository: Send + Sync {
    /// Increment by one in its own transaction and return the committed value.
    async fn increment(&self) -> Result<i32, ServiceError>;
    /// Current value without modifying it (0 before the first increment).
    async fn current(&self) -> Result<i32, ServiceError>;
}

/// SeaORM-backed repository; one transaction per increment.
///
/// The pool is shared through an `Arc` because `DatabaseConnection` is not
/// `Clone` when sea-orm's mock backend is enabled anywhere in the build.
#[derive(Clone)]
pub struct SeaOrmCounterRepository {
    pub db: Arc<DatabaseConnection>,
}

impl SeaOrmCounterRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db: Arc::new(db) } }

    pub fn from_shared(db: Arc<DatabaseConnection>) -> Self { Self { db } }
}

#[async_trait]
impl CounterRepository for SeaOrmCounterRepository {
    async fn increment(&self) -> Result<i32, ServiceError> {
        Ok(models::global_counter::increment_in(&*self.db).await?)
    }

    async fn current(&self) -> Result<i32, ServiceError> {
        Ok(models::global_counter::current(&*self.db).await?)
    }
}

/// Simple in-memory mock repository for tests, benches and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCounterRepository {
        value: Mutex<i32>,
        unavailable: AtomicBool,
    }

    impl MockCounterRepository {
        pub fn starting_at(value: i32) -> Self {
            Self { value: Mutex::new(value), unavailable: AtomicBool::new(false) }
        }

        /// Make every call fail as if the database were unreachable.
        pub fn set_unavailable(&self, down: bool) {
            self.unavailable.store(down, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), ServiceError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ServiceError::Unavailable("mock store is down".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CounterRepository for MockCounterRepository {
        async fn increment(&self) -> Result<i32, ServiceError> {
            self.check()?;
            let mut v = self.value.lock().map_err(|e| ServiceError::Db(e.to_string()))?;
            *v = v.checked_add(1).ok_or_else(|| ServiceError::Db("counter overflow".into()))?;
            Ok(*v)
        }

        async fn current(&self) -> Result<i32, ServiceError> {
            self.check()?;
            let v = self.value.lock().map_err(|e| ServiceError::Db(e.to_string()))?;
            Ok(*v)
        }
    }
}
