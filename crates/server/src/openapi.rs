use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CounterValueResponse { pub value: i32 }

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String, pub code: u16 }

#[derive(OpenApi)]
#[openapi(
    info(title = "Fullstack Bootstrap API"),
    paths(
        crate::routes::health::healthz,
        crate::routes::counter::increment,
        crate::routes::counter::current,
    ),
    components(
        schemas(
            HealthResponse,
            CounterValueResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "counter")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_counter_paths() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "Fullstack Bootstrap API");
        assert!(doc.paths.paths.contains_key("/healthz"));
        assert!(doc.paths.paths.contains_key("/counter/increment"));
        assert!(doc.paths.paths.contains_key("/counter"));
    }
}
