use axum::Json;
use common::types::Health;

/// Liveness probe for Docker / k8s. Never touches the database.
#[utoipa::path(get, path = "/healthz", tag = "health", responses((status = 200, description = "Process is alive", body = crate::openapi::HealthResponse)))]
pub async fn healthz() -> Json<Health> {
    Json(Health::ok())
}
