//! Schema setup that does not block the HTTP listener.
//!
//! The liveness probe must answer even while the database is down, so
//! migrations run in the background and are retried with capped
//! exponential backoff until they succeed.

use std::sync::Arc;
use std::time::Duration;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::time::sleep;
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct MigrationRetry {
    pub backoff_base: Duration,
    pub backoff_max: Duration,
}

impl Default for MigrationRetry {
    fn default() -> Self {
        Self { backoff_base: Duration::from_millis(500), backoff_max: Duration::from_secs(30) }
    }
}

impl MigrationRetry {
    /// Delay before attempt `attempt` (1-based; attempt 1 runs immediately).
    pub fn backoff(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let exp = (attempt - 2).min(16);
        let ms = self.backoff_base.as_millis() as u64 * 2_u64.pow(exp);
        Duration::from_millis(ms.min(self.backoff_max.as_millis() as u64))
    }
}

/// Apply pending migrations, retrying until the database accepts them.
pub async fn migrate_with_retry(db: Arc<DatabaseConnection>, policy: MigrationRetry) {
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        sleep(policy.backoff(attempt)).await;
        match migration::Migrator::up(&*db, None).await {
            Ok(()) => {
                info!(attempt, "database migrations applied");
                return;
            }
            Err(e) => {
                warn!(attempt, error = %e, "database migrations failed; will retry");
            }
        }
    }
}
