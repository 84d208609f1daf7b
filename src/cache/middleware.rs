//! Response-side middleware stamping Cache-Control headers.
//!
//! Register it outermost so it sees the final response. Patterns are
//! evaluated against the path as the client requested it (percent-decoded),
//! not against any path an inner stage rewrote it to.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::cache::policy::{CacheDecision, CachePolicy};
use crate::http::request::RequestExt;

pub async fn cache_control(
    State(policy): State<Arc<CachePolicy>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if policy.is_disabled() {
        return next.run(req).await;
    }

    let is_ajax = req.is_ajax();
    let path = req.path_info();

    let mut response = next.run(req).await;

    if let CacheDecision::Cache(directive) = policy.apply(&path, is_ajax, response.headers_mut()) {
        tracing::debug!(path = %path, cache_control = %directive, "Stamped cache policy");
    }
    response
}
