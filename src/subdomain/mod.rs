//! Subdomain to application mapping.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path)
//!     → middleware.rs (axum middleware, wraps the router)
//!     → rewriter.rs (resolve check, host lookup, path rebuild)
//!     → Router dispatches on the rewritten path
//! ```

pub mod middleware;
pub mod rewriter;

pub use middleware::rewrite_subdomain;
pub use rewriter::{RewriteError, RewrittenPath, SubdomainRewriter};
