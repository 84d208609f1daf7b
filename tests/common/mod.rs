//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use cas_middleware::config::parse_config;
use cas_middleware::HttpServer;
use serde_json::Value;
use tower::ServiceExt;

/// Application used by the pipeline tests.
pub const SITE: &str = r#"
[subdomains]
use_i18n = true
url_lang_regex = "^/(en|fr)/"

[subdomains.apps]
"blog.example.com" = "blog"
"shop.example.com" = "shop"

[cache]
ajax_url_regex = "^/"
private_regex = "^/(en/|fr/)?shop/cart/"
ultra_regex = "^/static/"
ultra_max_age = 604800
never_regex = "^/admin/"

[[routes]]
pattern = "/"

[[routes]]
pattern = "/{lang}/blog/{slug}/"

[[routes]]
pattern = "/blog/{slug}/"

[[routes]]
pattern = "/shop/cart/"

[[routes]]
pattern = "/admin/{*rest}"

[[routes]]
pattern = "/static/{*path}"

[[routes]]
pattern = "/api/items/"
ajax_only = true
"#;

/// Build the full service stack from TOML.
pub fn stack(toml: &str) -> Router {
    let config = parse_config(toml).expect("valid test config");
    HttpServer::new(config).expect("stack compiles").router()
}

/// A GET request with the given Host header.
pub fn get(host: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Host", host)
        .body(Body::empty())
        .unwrap()
}

/// A GET request marked as AJAX.
pub fn ajax_get(host: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Host", host)
        .header("X-Requested-With", "XMLHttpRequest")
        .body(Body::empty())
        .unwrap()
}

/// Dispatch a request in-process; the body is decoded as JSON when possible.
pub async fn send(router: Router, req: Request<Body>) -> (StatusCode, HeaderMap, Option<Value>) {
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, serde_json::from_slice(&bytes).ok())
}
