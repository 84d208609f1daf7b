//! Request-pipeline middleware for axum applications.
//!
//! - [`subdomain`]: maps a subdomain back to its application path segment
//! - [`cache`]: stamps Cache-Control headers from path patterns
//! - [`http::ajax`]: rejects non-AJAX requests on guarded routes
//! - [`validators`]: slug and regex field validators

pub mod cache;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod subdomain;
pub mod validators;

pub use cache::CachePolicy;
pub use config::MiddlewareConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Resolver, RouteTable};
pub use subdomain::SubdomainRewriter;
