use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::observability;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod counter;
pub mod health;

/// Build the full application router: liveness, counter, metrics and docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/metrics", get(observability::metrics));

    let counter_routes = Router::new()
        .route("/counter", get(counter::current))
        .route("/counter/increment", post(counter::increment));

    let docs = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    public
        .merge(counter_routes)
        .merge(docs)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
