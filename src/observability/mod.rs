//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (rewrites, cache stamping, rejected requests)
//!     → TraceLayer spans per request, tagged with x-request-id
//!
//! Consumers:
//!     → logging.rs subscriber (stdout)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted messages
//! - Request ID flows through all stages

pub mod logging;

pub use logging::init_logging;
