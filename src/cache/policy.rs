//! Cache-Control policy selection.
//!
//! Patterns are checked in strict priority order, first match wins:
//!
//! | priority | pattern          | effect                          |
//! |----------|------------------|---------------------------------|
//! | 1        | `never_regex`    | no caching headers              |
//! | 2        | `private_regex`  | `private` instead of `public`   |
//! | 3        | `ultra_regex`    | `ultra_max_age`                 |
//! | 4        | AJAX request     | `ajax_max_age`                  |
//! | 5        | anything else    | `normal_max_age`                |
//!
//! Only paths matching `ajax_url_regex` are cacheable, whether the request
//! is AJAX or not. `url_regex` is accepted but never consulted.

use std::fmt;

use axum::http::{header, HeaderMap, HeaderValue};
use regex::Regex;

use crate::config::CacheConfig;

/// Cache visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheClass {
    Public,
    Private,
}

impl fmt::Display for CacheClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheClass::Public => f.write_str("public"),
            CacheClass::Private => f.write_str("private"),
        }
    }
}

/// The Cache-Control value to stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheDirective {
    pub class: CacheClass,
    pub max_age: u64,
}

impl fmt::Display for CacheDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, max-age={}", self.class, self.max_age)
    }
}

/// Outcome of evaluating a response against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDecision {
    /// Caching is switched off globally.
    Disabled,
    /// Path matched the never-cache pattern.
    Never,
    /// Path is outside the cacheable set.
    NotCacheable,
    Cache(CacheDirective),
}

/// Compiled cache policy, shared read-only across requests.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    disabled: bool,
    disable_vary: bool,
    ajax_max_age: u64,
    normal_max_age: u64,
    ultra_max_age: u64,
    ajax_url: Option<Regex>,
    ultra: Option<Regex>,
    private: Option<Regex>,
    never: Option<Regex>,
}

impl CachePolicy {
    pub fn from_config(config: &CacheConfig) -> Result<Self, regex::Error> {
        if config.url_regex.is_some() {
            tracing::warn!("cache.url_regex is set but not consulted; cacheability follows cache.ajax_url_regex");
        }
        if config.ajax {
            tracing::warn!("cache.ajax is set but not consulted");
        }

        Ok(Self {
            disabled: config.disabled,
            disable_vary: config.disable_vary,
            ajax_max_age: config.ajax_max_age,
            normal_max_age: config.normal_max_age,
            ultra_max_age: config.ultra_max_age,
            ajax_url: compile(&config.ajax_url_regex)?,
            ultra: compile(&config.ultra_regex)?,
            private: compile(&config.private_regex)?,
            never: compile(&config.never_regex)?,
        })
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Decide how a response for `path` should be cached.
    pub fn decide(&self, path: &str, is_ajax: bool) -> CacheDecision {
        if self.disabled {
            return CacheDecision::Disabled;
        }
        if matched(&self.never, path) {
            return CacheDecision::Never;
        }
        if !self.is_cacheable(path) {
            return CacheDecision::NotCacheable;
        }

        let class = if matched(&self.private, path) {
            CacheClass::Private
        } else {
            CacheClass::Public
        };

        CacheDecision::Cache(CacheDirective {
            class,
            max_age: self.max_age(path, is_ajax),
        })
    }

    /// AJAX and regular requests are both tested against `ajax_url_regex`.
    pub fn is_cacheable(&self, path: &str) -> bool {
        matched(&self.ajax_url, path)
    }

    pub fn max_age(&self, path: &str, is_ajax: bool) -> u64 {
        if matched(&self.ultra, path) {
            self.ultra_max_age
        } else if is_ajax {
            self.ajax_max_age
        } else {
            self.normal_max_age
        }
    }

    /// Evaluate the policy and stamp the result onto response headers.
    pub fn apply(&self, path: &str, is_ajax: bool, headers: &mut HeaderMap) -> CacheDecision {
        let decision = self.decide(path, is_ajax);
        let CacheDecision::Cache(directive) = decision else {
            return decision;
        };

        headers.remove(header::EXPIRES);
        if directive.class == CacheClass::Public && self.disable_vary {
            headers.remove(header::VARY);
        }
        if let Ok(value) = HeaderValue::from_str(&directive.to_string()) {
            headers.insert(header::CACHE_CONTROL, value);
        }
        decision
    }
}

fn compile(pattern: &Option<String>) -> Result<Option<Regex>, regex::Error> {
    pattern.as_deref().map(Regex::new).transpose()
}

/// Unconfigured patterns never match.
fn matched(pattern: &Option<Regex>, path: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(path))
}
