use once_cell::sync::Lazy;
use sea_orm::{DatabaseConnection, EntityTrait};
use migration::MigratorTrait;
use tokio::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::db::{connect_with_config, DatabaseConfig};
use crate::global_counter;


/// Counter semantics against a real Postgres
pub mod counter_tests;


// All tests share the single counter row; run them one at a time.
static DB_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub(crate) struct TestDb {
    pub db: DatabaseConnection,
    _guard: MutexGuard<'static, ()>,
}

/// Connect, migrate and empty the counter table. `None` means the test
/// should be skipped (`SKIP_DB_TESTS` set or database unreachable).
pub(crate) async fn setup_empty() -> Option<TestDb> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let guard = DB_LOCK.lock().await;

    let mut cfg = DatabaseConfig::from_env();
    cfg.connect_timeout = Duration::from_secs(3);
    cfg.acquire_timeout = Duration::from_secs(3);
    cfg.max_connections = 20;
    let db = match connect_with_config(&cfg).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    if let Err(e) = global_counter::Entity::delete_many().exec(&db).await {
        eprintln!("skip: cannot reset counter table: {}", e);
        return None;
    }
    Some(TestDb { db, _guard: guard })
}
