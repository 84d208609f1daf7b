//! AJAX-only request guard.
//!
//! Wrap a handler or route with [`require_ajax`] to reject anything that is
//! not an in-page script request:
//!
//! ```ignore
//! Router::new().route("/api/items", get(items).layer(from_fn(require_ajax)))
//! ```

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::request::{is_ajax, RequestExt};

/// Raised when a request fails the AJAX precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("suspicious operation: request is not an AJAX request")]
pub struct SuspiciousOperation;

impl IntoResponse for SuspiciousOperation {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, "Bad Request").into_response()
    }
}

/// Check the AJAX precondition against request headers.
pub fn ensure_ajax(headers: &HeaderMap) -> Result<(), SuspiciousOperation> {
    if is_ajax(headers) {
        Ok(())
    } else {
        Err(SuspiciousOperation)
    }
}

/// Middleware that only lets AJAX requests through to the wrapped handler.
/// The handler's response is returned unchanged.
pub async fn require_ajax(req: Request<Body>, next: Next) -> Result<Response, SuspiciousOperation> {
    if !req.is_ajax() {
        tracing::warn!(path = %req.uri().path(), "Rejected non-AJAX request");
        return Err(SuspiciousOperation);
    }
    Ok(next.run(req).await)
}
