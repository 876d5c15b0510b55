use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::http::HeaderValue;
use axum::Router;
use configs::AppConfig;
use models::db::{connect_with_config, DatabaseConfig};
use service::counter::{CounterRepository, SeaOrmCounterRepository};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::info;

use crate::bootstrap::{migrate_with_retry, MigrationRetry};
use crate::errors::StartupError;
use crate::observability;
use crate::routes;
use crate::state::ServerState;

/// CORS for the single configured frontend origin, with credentials.
/// Methods and headers mirror the preflight request. Requests from any other
/// origin get no `Access-Control-Allow-Origin` header.
pub fn build_cors(origin: &str) -> Result<CorsLayer, StartupError> {
    let origin = HeaderValue::from_str(origin.trim())
        .map_err(|_| StartupError::InvalidConfig(format!("invalid cors origin: {origin}")))?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Router backed by `repo`; used by `run` and by tests with a mock repository.
pub fn build_app(cfg: &AppConfig, repo: Arc<dyn CounterRepository>) -> Result<Router, StartupError> {
    let cors = build_cors(&cfg.cors.allowed_origin)?;
    Ok(routes::build_router(ServerState::new(repo), cors))
}

/// Public entry: connect, build the app and serve until `shutdown` resolves.
///
/// The pool connects lazily so the process starts (and `/healthz` answers)
/// while the database is still unavailable.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    observability::init_metrics();

    let mut db_cfg = DatabaseConfig::from(&cfg.database);
    db_cfg.lazy = true;
    let db = connect_with_config(&db_cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    let db = Arc::new(db);
    tokio::spawn(migrate_with_retry(Arc::clone(&db), MigrationRetry::default()));

    let repo: Arc<dyn CounterRepository> = Arc::new(SeaOrmCounterRepository::from_shared(db));
    let app = build_app(&cfg, repo)?;

    let addr: SocketAddr = cfg
        .server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("invalid bind address: {e}")))?;
    info!(%addr, cors_origin = %cfg.cors.allowed_origin, "starting counter api");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| StartupError::Any(e.into()))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| StartupError::Any(e.into()))?;
    info!("http server drained");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_accepts_valid_origin() {
        assert!(build_cors("http://localhost:5173").is_ok());
    }

    #[test]
    fn cors_rejects_invalid_origin() {
        assert!(matches!(build_cors("http://bad\norigin"), Err(StartupError::InvalidConfig(_))));
    }
}
