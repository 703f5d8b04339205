use crate::{error::AppError, server::Server};
use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct HealthCheckQuery {
    /// Restrict the probe to a single component, or "all"
    #[serde(default)]
    pub check: Option<String>,
}

/// Create health check routes
pub fn create_health_routes() -> Router<Server> {
    Router::new().route("/health", get(health_check))
}

/// Component health probe
#[utoipa::path(
    get,
    path = "/health",
    summary = "Health check",
    description = "Run registered component health checks and report the aggregate status",
    params(HealthCheckQuery),
    responses(
        (status = 200, description = "Health report", body = crate::health::HealthResponse),
        (status = 500, description = "Internal server error", body = crate::routes::ApiErrorResponse)
    ),
    tag = "Health"
)]
pub async fn health_check(
    State(server): State<Server>,
    Query(params): Query<HealthCheckQuery>,
) -> Result<Json<Value>, AppError> {
    let filter = params.check.as_deref();
    let health_response = server.health_service.check_health(filter).await;

    let response_json = serde_json::to_value(&health_response)
        .map_err(|e| AppError::Internal(format!("Failed to serialize health response: {}", e)))?;

    Ok(Json(response_json))
}
