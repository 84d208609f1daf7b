//! Live server tests over a real listener.

use std::time::Duration;

use cas_middleware::config::parse_config;
use cas_middleware::{HttpServer, Shutdown};
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_live_server_stamps_headers_and_shuts_down() {
    let config = parse_config(common::SITE).unwrap();
    let server = HttpServer::new(config).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{addr}/static/app.js"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()["cache-control"],
        "public, max-age=604800"
    );
    assert!(res.headers().contains_key("x-request-id"));

    let res = client
        .get(format!("http://{addr}/api/items/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("http://{addr}/api/items/"))
        .header("X-Requested-With", "XMLHttpRequest")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["route"], "/api/items/");

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop");
    assert!(result.unwrap().is_ok());
}
