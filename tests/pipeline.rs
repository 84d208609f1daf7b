//! End-to-end tests of the middleware stack, dispatched in-process.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use cas_middleware::http::X_REQUEST_ID;

mod common;
use common::{ajax_get, get, send, stack, SITE};

#[tokio::test]
async fn test_subdomain_rewrite_keeps_language_prefix_first() {
    let (status, headers, body) =
        send(stack(SITE), get("blog.example.com", "/en/my-article")).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["path"], "/en/blog/my-article/");
    assert_eq!(body["route"], "/{lang}/blog/{slug}/");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=86400");
}

#[tokio::test]
async fn test_subdomain_rewrite_without_language() {
    let (status, _, body) = send(stack(SITE), get("blog.example.com", "/my-article")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["path"], "/blog/my-article/");
}

#[tokio::test]
async fn test_subdomain_rewrite_preserves_query_and_ignores_port() {
    let (status, _, body) =
        send(stack(SITE), get("blog.example.com:8443", "/my-article?page=2")).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["path"], "/blog/my-article/");
    assert_eq!(body["query"], "page=2");
}

#[tokio::test]
async fn test_unmapped_host_falls_through_to_not_found() {
    let (status, _, _) = send(stack(SITE), get("www.example.com", "/my-article")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_resolving_path_is_not_rewritten() {
    let (status, _, body) =
        send(stack(SITE), get("blog.example.com", "/blog/my-article/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["path"], "/blog/my-article/");
}

#[tokio::test]
async fn test_missing_host_is_a_server_error() {
    let req = Request::builder()
        .uri("/my-article")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(stack(SITE), req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // A resolving path never needs the host.
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, _, _) = send(stack(SITE), req).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_cache_policy_uses_requested_path() {
    // `/cart` is dispatched as `/shop/cart/`, but the private pattern only
    // sees the path the client asked for.
    let (status, headers, body) = send(stack(SITE), get("shop.example.com", "/cart")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["path"], "/shop/cart/");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=86400");
}

#[tokio::test]
async fn test_never_pattern_matches_path_before_rewrite() {
    let router = stack(
        r#"
        [subdomains.apps]
        "shop.example.com" = "shop"

        [cache]
        ajax_url_regex = "^/"
        never_regex = "^/cart"

        [[routes]]
        pattern = "/shop/cart/"
        "#,
    );

    let (status, headers, body) = send(router, get("shop.example.com", "/cart")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["path"], "/shop/cart/");
    assert!(headers.get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn test_cache_patterns_match_decoded_path() {
    let router = stack(
        r#"
        [cache]
        ajax_url_regex = "^/"
        never_regex = "^/menu/café$"

        [[routes]]
        pattern = "/menu/{item}"
        "#,
    );

    let (status, headers, _) =
        send(router.clone(), get("www.example.com", "/menu/caf%C3%A9")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.get(header::CACHE_CONTROL).is_none());

    let (status, headers, _) = send(router, get("www.example.com", "/menu/tea")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=86400");
}

#[tokio::test]
async fn test_never_cache_path_has_no_cache_control() {
    let (status, headers, _) =
        send(stack(SITE), ajax_get("www.example.com", "/admin/secret")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers.get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn test_ultra_max_age_beats_ajax_max_age() {
    let (_, headers, _) =
        send(stack(SITE), ajax_get("www.example.com", "/static/site.css")).await;
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=604800");
}

#[tokio::test]
async fn test_ajax_only_route() {
    let (status, headers, _) = send(stack(SITE), get("www.example.com", "/api/items/")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=86400");

    let (status, headers, body) =
        send(stack(SITE), ajax_get("www.example.com", "/api/items/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["ajax"], true);
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=900");
}

#[tokio::test]
async fn test_ajax_url_pattern_caches_regular_requests() {
    let router = stack(
        r#"
        [cache]
        ajax_url_regex = "^/api/"

        [[routes]]
        pattern = "/api/users"

        [[routes]]
        pattern = "/about/"
        "#,
    );

    let (_, headers, _) = send(router.clone(), get("www.example.com", "/api/users")).await;
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=86400");

    let (status, headers, _) = send(router, get("www.example.com", "/about/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn test_cache_disabled_never_touches_headers() {
    let router = stack(
        r#"
        [cache]
        disabled = true
        ajax_url_regex = "^/"

        [[routes]]
        pattern = "/"
        "#,
    );

    let (status, headers, _) = send(router, ajax_get("www.example.com", "/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let (_, headers, _) = send(stack(SITE), get("www.example.com", "/")).await;
    assert!(headers.get(&X_REQUEST_ID).is_some());

    let mut req = get("www.example.com", "/");
    req.headers_mut()
        .insert(&X_REQUEST_ID, "abc-123".parse().unwrap());
    let (_, headers, _) = send(stack(SITE), req).await;
    assert_eq!(headers[&X_REQUEST_ID], "abc-123");
}
