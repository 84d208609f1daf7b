//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! middleware stack. All types derive Serde traits for deserialization from
//! config files, and every field has a default so a minimal file works.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MiddlewareConfig {
    /// Listener configuration for the demo server.
    pub listener: ListenerConfig,

    /// Subdomain to application mapping.
    pub subdomains: SubdomainConfig,

    /// Cache-Control policy.
    pub cache: CacheConfig,

    /// Known routes of the hosted application.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request timeout configuration.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Subdomain rewriting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubdomainConfig {
    /// Host name to application path segment, e.g. `"blog.example.com" = "blog"`.
    pub apps: BTreeMap<String, String>,

    /// Enable language prefix handling.
    pub use_i18n: bool,

    /// Pattern locating the language prefix in a path, e.g. `^/(en|fr)/`.
    pub url_lang_regex: Option<String>,

    /// Keep a trailing slash on rewritten paths.
    pub append_slash: bool,
}

impl Default for SubdomainConfig {
    fn default() -> Self {
        Self {
            apps: BTreeMap::new(),
            use_i18n: false,
            url_lang_regex: None,
            append_slash: true,
        }
    }
}

/// Cache-Control policy configuration.
///
/// Pattern priority: never > private > ultra > ajax > normal.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Switch caching headers off entirely.
    pub disabled: bool,

    /// Enable AJAX caching. Accepted for compatibility, not consulted.
    pub ajax: bool,

    /// Max age in seconds for AJAX responses.
    pub ajax_max_age: u64,

    /// Max age in seconds for normal responses.
    pub normal_max_age: u64,

    /// Extended max age in seconds for ultra-cached responses.
    pub ultra_max_age: u64,

    /// Drop the Vary header on public responses.
    /// Only safe together with a `never_regex` covering protected pages.
    pub disable_vary: bool,

    /// Paths whose responses are cacheable.
    pub ajax_url_regex: Option<String>,

    /// Paths of normal requests. Accepted for compatibility, not consulted.
    pub url_regex: Option<String>,

    /// Paths cached for `ultra_max_age`.
    pub ultra_regex: Option<String>,

    /// Paths cached privately.
    pub private_regex: Option<String>,

    /// Paths never cached (highest priority).
    pub never_regex: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            ajax: false,
            ajax_max_age: 60 * 15,
            normal_max_age: 60 * 60 * 24,
            ultra_max_age: 60 * 60 * 24,
            disable_vary: false,
            ajax_url_regex: None,
            url_regex: None,
            ultra_regex: None,
            private_regex: None,
            never_regex: None,
        }
    }
}

/// A route served by the application.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, e.g. `/blog/{slug}/`.
    pub pattern: String,

    /// Reject requests that are not AJAX.
    #[serde(default)]
    pub ajax_only: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}
