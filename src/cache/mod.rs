//! Cache-Control policy subsystem.
//!
//! # Data Flow
//! ```text
//! Request (path as requested, decoded; AJAX flag captured)
//!     → inner stages produce the Response
//!     → middleware.rs
//!     → policy.rs (never → cacheable? → class → max-age)
//!     → Cache-Control stamped, Expires/Vary dropped
//! ```
//!
//! # Design Decisions
//! - Emits policy hints only; nothing is stored
//! - Patterns compiled once at startup
//! - No error paths: unset options fall back to defaults

pub mod middleware;
pub mod policy;

pub use middleware::cache_control;
pub use policy::{CacheClass, CacheDecision, CacheDirective, CachePolicy};
