use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::str::FromStr;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

#[derive(Clone, Copy, Debug)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self(Uuid::nil())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Middleware that attaches a unique request ID to each incoming request.
/// An X-Request-ID header supplied by the caller (e.g. a load balancer) is
/// propagated; otherwise a fresh UUID v4 is generated. The ID lands in the
/// request extensions for logging and in the response headers for clients.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = if let Some(existing_id) = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::from_str(s).ok())
    {
        RequestId(existing_id)
    } else {
        RequestId::new()
    };

    request.extensions_mut().insert(request_id);

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id.as_str()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-request-id"), header_value);
    }

    response
}

/// Extension trait to easily extract the request ID from extensions
pub trait RequestIdExt {
    fn request_id(&self) -> RequestId;
}

impl RequestIdExt for axum::http::Extensions {
    fn request_id(&self) -> RequestId {
        self.get::<RequestId>().copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        extract::Extension,
        http::{Method, Request as HttpRequest, StatusCode},
        response::Json,
        routing::get,
    };
    use serde_json::json;
    use tower::ServiceExt;

    async fn test_handler(Extension(request_id): Extension<RequestId>) -> Json<serde_json::Value> {
        Json(json!({ "request_id": request_id.as_str() }))
    }

    #[tokio::test]
    async fn test_request_id_middleware_generates_id() {
        let app = Router::new()
            .route("/test", get(test_handler))
            .layer(axum::middleware::from_fn(request_id_middleware));

        let request = HttpRequest::builder()
            .method(Method::GET)
            .uri("/test")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let header = response.headers().get("x-request-id").unwrap();
        assert!(Uuid::from_str(header.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_request_id_middleware_propagates_existing_id() {
        let app = Router::new()
            .route("/test", get(test_handler))
            .layer(axum::middleware::from_fn(request_id_middleware));

        let existing = Uuid::new_v4();
        let request = HttpRequest::builder()
            .method(Method::GET)
            .uri("/test")
            .header(REQUEST_ID_HEADER, existing.to_string())
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let header = response.headers().get("x-request-id").unwrap();
        assert_eq!(header.to_str().unwrap(), existing.to_string());
    }
}
