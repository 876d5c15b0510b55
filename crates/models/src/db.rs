use std::env;
use std::time::Duration;

use once_cell::sync::Lazy;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::{debug, info};

pub static DATABASE_URL: Lazy<String> = Lazy::new(|| {
    // Load .env if present
    let _ = dotenvy::dotenv();
    env::var("DATABASE_URL").unwrap_or_else(|_| configs::DEFAULT_DATABASE_URL.to_string())
});

/// Pool settings used to build SeaORM `ConnectOptions`.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub sqlx_logging: bool,
    /// Defer opening connections until the first query.
    pub lazy: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from(&configs::DatabaseConfig::default())
    }
}

impl From<&configs::DatabaseConfig> for DatabaseConfig {
    fn from(c: &configs::DatabaseConfig) -> Self {
        Self {
            url: c.url.clone(),
            max_connections: c.max_connections,
            min_connections: c.min_connections,
            connect_timeout: Duration::from_secs(c.connect_timeout_secs),
            acquire_timeout: Duration::from_secs(c.acquire_timeout_secs),
            idle_timeout: Duration::from_secs(c.idle_timeout_secs),
            max_lifetime: Duration::from_secs(c.max_lifetime_secs),
            sqlx_logging: c.sqlx_logging,
            lazy: false,
        }
    }
}

impl DatabaseConfig {
    /// Defaults with the URL taken from `DATABASE_URL`.
    pub fn from_env() -> Self {
        Self { url: DATABASE_URL.clone(), ..Self::default() }
    }

    /// `[database]` section of `config.toml` (or `CONFIG_PATH`), validated.
    pub fn from_file() -> anyhow::Result<Self> {
        let mut cfg = configs::load_default()?;
        cfg.database.normalize_from_env();
        cfg.database.validate()?;
        Ok(Self::from(&cfg.database))
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url.clone());
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .test_before_acquire(true)
            .connect_lazy(self.lazy)
            .sqlx_logging(self.sqlx_logging);
        opt
    }
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    debug!(
        max_connections = cfg.max_connections,
        min_connections = cfg.min_connections,
        lazy = cfg.lazy,
        "opening database pool"
    );
    let db = Database::connect(cfg.connect_options()).await?;
    if !cfg.lazy {
        info!("database pool ready");
    }
    Ok(db)
}

/// Round-trip check against the pool.
pub async fn ping(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.ping().await
}
