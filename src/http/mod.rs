//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layer stack)
//!     → request.rs (request ID, AJAX classification, host)
//!     → ajax.rs (guard on AJAX-only routes)
//!     → Router handler
//! ```

pub mod ajax;
pub mod request;
pub mod server;

pub use ajax::{ensure_ajax, require_ajax, SuspiciousOperation};
pub use request::{is_ajax, RequestExt, X_REQUESTED_WITH, X_REQUEST_ID};
pub use server::HttpServer;
