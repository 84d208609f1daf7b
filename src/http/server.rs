//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the application Router from configured routes
//! - Wrap it with the subdomain rewriter (before routing)
//! - Wire up middleware (cache policy, timeout, request ID, tracing)
//! - Bind server to listener and shut down gracefully
//!
//! # Layer Order (outermost first)
//! ```text
//! cache_control → TraceLayer → SetRequestId → PropagateRequestId
//!     → Timeout → rewrite_subdomain → Router
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::MatchedPath,
    http::{HeaderMap, Uri},
    middleware::{from_fn, from_fn_with_state},
    routing::any,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::Layer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::cache::{cache_control, CachePolicy};
use crate::config::{ConfigError, MiddlewareConfig};
use crate::http::ajax::require_ajax;
use crate::http::request::{is_ajax, request_id_layers};
use crate::routing::RouteTable;
use crate::subdomain::{rewrite_subdomain, SubdomainRewriter};

/// HTTP server hosting the middleware stack.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Compile the configuration and build the service stack.
    pub fn new(config: MiddlewareConfig) -> Result<Self, ConfigError> {
        let routes = Arc::new(RouteTable::from_config(&config.routes));
        let rewriter = Arc::new(SubdomainRewriter::new(&config.subdomains, routes)?);
        let policy = Arc::new(CachePolicy::from_config(&config.cache)?);

        tracing::info!(
            routes = config.routes.len(),
            subdomains = config.subdomains.apps.len(),
            i18n = config.subdomains.use_i18n,
            cache_disabled = config.cache.disabled,
            "Middleware stack compiled"
        );

        let app = Self::app_routes(&config);
        let router = Self::build_router(app, &config, rewriter, policy);
        Ok(Self { router })
    }

    /// Configured routes, each answered by the echo handler.
    fn app_routes(config: &MiddlewareConfig) -> Router {
        let mut app = Router::new();
        for route in &config.routes {
            let handler = if route.ajax_only {
                any(echo_handler).layer(from_fn(require_ajax))
            } else {
                any(echo_handler)
            };
            app = app.route(&route.pattern, handler);
        }
        app
    }

    /// Wrap the application router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(
        app: Router,
        config: &MiddlewareConfig,
        rewriter: Arc<SubdomainRewriter>,
        policy: Arc<CachePolicy>,
    ) -> Router {
        // Route layers run after routing, so the rewriter wraps the router
        // as a service instead.
        let rewritten = from_fn_with_state(rewriter, rewrite_subdomain).layer(app);
        let (set_request_id, propagate_request_id) = request_id_layers();

        Router::new()
            .fallback_service(rewritten)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id)
            .layer(set_request_id)
            .layer(TraceLayer::new_for_http())
            .layer(from_fn_with_state(policy, cache_control))
    }

    /// The composed service, for in-process dispatch.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until Ctrl+C or the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Reports how the request was routed.
async fn echo_handler(matched: MatchedPath, uri: Uri, headers: HeaderMap) -> Json<Value> {
    Json(json!({
        "route": matched.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "ajax": is_ajax(&headers),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_timeout_response_gets_cache_policy() {
        let mut config = MiddlewareConfig::default();
        config.cache.ajax_url_regex = Some("^/".into());
        config.timeouts.request_secs = 1;

        let routes = Arc::new(RouteTable::from_config(&config.routes));
        let rewriter = Arc::new(SubdomainRewriter::new(&config.subdomains, routes).unwrap());
        let policy = Arc::new(CachePolicy::from_config(&config.cache).unwrap());

        let app = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "done"
            }),
        );
        let router = HttpServer::build_router(app, &config, rewriter, policy);

        let req = Request::builder()
            .uri("/slow")
            .header("Host", "www.example.com")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=86400");
    }
}
