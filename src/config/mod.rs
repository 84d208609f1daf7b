//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MiddlewareConfig (validated, immutable)
//!     → compiled into SubdomainRewriter / CachePolicy / RouteTable
//!     → shared via Arc with every request
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Optional patterns are `Option<String>`; unset means "never matches"
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::CacheConfig;
pub use schema::ListenerConfig;
pub use schema::MiddlewareConfig;
pub use schema::ObservabilityConfig;
pub use schema::RouteConfig;
pub use schema::SubdomainConfig;
