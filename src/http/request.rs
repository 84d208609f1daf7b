//! Request classification and identification.
//!
//! # Responsibilities
//! - Classify a request as AJAX (`X-Requested-With: XMLHttpRequest`)
//! - Extract the bare host name (port stripped)
//! - Expose the percent-decoded path for pattern matching
//! - Generate a unique request ID for tracing
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Host comes from the Host header, falling back to the URI authority
//!   (HTTP/2 carries it as `:authority`)

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Request};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

/// The header name for request correlation IDs.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// The header browsers' script clients set on in-page requests.
pub static X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");

const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// Returns true if the headers mark an AJAX request.
pub fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get(&X_REQUESTED_WITH)
        .map(|v| v.as_bytes() == XML_HTTP_REQUEST.as_bytes())
        .unwrap_or(false)
}

/// Request helpers used by the middleware.
pub trait RequestExt {
    /// Returns true for requests sent by in-page script.
    fn is_ajax(&self) -> bool;

    /// The host name without any `:port` suffix, if the request carries one.
    fn bare_host(&self) -> Option<String>;

    /// The percent-decoded request path. Falls back to the raw path when the
    /// escapes do not decode to UTF-8.
    fn path_info(&self) -> String;
}

impl<B> RequestExt for Request<B> {
    fn is_ajax(&self) -> bool {
        is_ajax(self.headers())
    }

    fn bare_host(&self) -> Option<String> {
        let host = self
            .headers()
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .or_else(|| self.uri().authority().map(|a| a.as_str()))?;
        let bare = strip_port(host);
        if bare.is_empty() {
            None
        } else {
            Some(bare.to_lowercase())
        }
    }

    fn path_info(&self) -> String {
        let raw = self.uri().path();
        urlencoding::decode(raw)
            .map(|p| p.into_owned())
            .unwrap_or_else(|_| raw.to_string())
    }
}

/// Strip a `:port` suffix, leaving bracketed IPv6 literals intact.
fn strip_port(host: &str) -> &str {
    let host = host.rsplit('@').next().unwrap_or(host);
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    host.split(':').next().unwrap_or(host)
}

/// A UUID v4 generator for request IDs.
#[derive(Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).ok()?))
    }
}

/// Layers that set `x-request-id` on requests missing one and copy it to
/// the response.
pub fn request_id_layers() -> (SetRequestIdLayer<UuidRequestId>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::new(X_REQUEST_ID.clone(), UuidRequestId),
        PropagateRequestIdLayer::new(X_REQUEST_ID.clone()),
    )
}
