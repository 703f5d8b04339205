pub mod customers;
pub mod docs;
pub mod health;

pub use customers::create_customer_routes;
pub use docs::create_docs_routes;
pub use health::create_health_routes;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Stable error label
    pub error: String,
    /// Human-readable detail
    pub message: String,
}
