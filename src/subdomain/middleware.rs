//! Request-side middleware for subdomain rewriting.
//!
//! Must wrap the whole router (not be added with `Router::layer`), since
//! axum has already routed the request by the time route layers run.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::subdomain::rewriter::{RewriteError, SubdomainRewriter};

impl IntoResponse for RewriteError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "Server misconfigured").into_response()
    }
}

/// Rewrite the request path for mapped subdomains, then dispatch.
pub async fn rewrite_subdomain(
    State(rewriter): State<Arc<SubdomainRewriter>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match rewriter.apply(&mut req) {
        Ok(_) => next.run(req).await,
        Err(RewriteError::MissingHost) => {
            tracing::error!(
                path = %req.uri().path(),
                "Request has no Host header; check the proxy configuration"
            );
            RewriteError::MissingHost.into_response()
        }
        Err(e) => {
            tracing::warn!(path = %req.uri().path(), error = %e, "Subdomain rewrite skipped");
            next.run(req).await
        }
    }
}
