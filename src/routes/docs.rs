use crate::{error::AppError, server::Server};
use axum::{Router, http::header, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop Analytics API",
        version = "1.0.0",
        description = "Read-only analytic queries over customers, products, and orders"
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::customers::birthday_customers,
        crate::routes::customers::recent_customers,
        crate::routes::customers::demanded_categories,
    ),
    components(schemas(
        crate::routes::ApiErrorResponse,
        crate::routes::health::HealthCheckQuery,
        crate::health::HealthResponse,
        crate::health::HealthStatus,
        crate::health::HealthCheckResult,
        crate::health::HealthSummary,
        crate::analytics::BirthdayCustomer,
        crate::analytics::RecentPurchaser,
        crate::analytics::CategoryDemand,
    )),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Customers", description = "Customer analytics endpoints"),
    )
)]
pub struct ApiDoc;

/// Create documentation routes
pub fn create_docs_routes() -> Router<Server> {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/docs/openapi.json", ApiDoc::openapi()))
        .route("/docs/openapi.yaml", get(openapi_yaml))
}

/// Serve the OpenAPI specification as YAML
async fn openapi_yaml() -> Result<([(header::HeaderName, &'static str); 1], String), AppError> {
    let spec = ApiDoc::openapi();
    let yaml = serde_yaml_ng::to_string(&spec).map_err(|e| {
        AppError::Internal(format!("Failed to serialize OpenAPI spec to YAML: {e}"))
    })?;

    Ok(([(header::CONTENT_TYPE, "application/yaml")], yaml))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::TestServerBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_openapi_json() {
        let server = TestServerBuilder::new().build().await;
        let app = server.create_app();

        let request = Request::builder()
            .uri("/docs/openapi.json")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().contains("application/json"));
    }

    #[tokio::test]
    async fn test_openapi_yaml() {
        let server = TestServerBuilder::new().build().await;
        let app = server.create_app();

        let request = Request::builder()
            .uri("/docs/openapi.yaml")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().contains("application/yaml"));
    }
}
