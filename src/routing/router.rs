//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled route patterns
//! - Answer whether a path resolves to a known route
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) pattern scan (acceptable for typical route counts)
//! - First match wins, in registration order

use crate::config::RouteConfig;
use crate::routing::matcher::PathPattern;

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The pattern that matched.
    pub pattern: String,
    /// Captured path parameters, in pattern order.
    pub params: Vec<(String, String)>,
}

/// Reports whether a path matches a known route.
pub trait Resolver: Send + Sync {
    /// Look up `path`; `None` means not found.
    fn resolve(&self, path: &str) -> Option<RouteMatch>;

    fn is_resolvable(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }
}

impl<F> Resolver for F
where
    F: Fn(&str) -> Option<RouteMatch> + Send + Sync,
{
    fn resolve(&self, path: &str) -> Option<RouteMatch> {
        self(path)
    }
}

/// The known routes of the hosted application.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    patterns: Vec<PathPattern>,
}

impl RouteTable {
    /// Build a table from raw patterns.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(PathPattern::new).collect(),
        }
    }

    /// Build a table from route configuration.
    pub fn from_config(routes: &[RouteConfig]) -> Self {
        Self::new(routes.iter().map(|r| r.pattern.clone()))
    }
}

impl Resolver for RouteTable {
    fn resolve(&self, path: &str) -> Option<RouteMatch> {
        self.patterns.iter().find_map(|pattern| {
            pattern.matches(path).map(|params| RouteMatch {
                pattern: pattern.as_str().to_string(),
                params,
            })
        })
    }
}
