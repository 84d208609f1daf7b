//! Route pattern matching.
//!
//! # Responsibilities
//! - Parse a route pattern into segments
//! - Match a request path segment by segment
//! - Report captured parameters
//!
//! # Design Decisions
//! - Same syntax as the axum router: `{name}` captures one non-empty
//!   segment, `{*name}` captures the rest of the path
//! - Path matching is case-sensitive
//! - Trailing slash is significant (`/blog/` and `/blog` differ)
//! - No regex, matching is O(segments)

/// One parsed piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    CatchAll(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern such as `/blog/{slug}/` or `/static/{*path}`.
    pub fn new(pattern: impl Into<String>) -> Self {
        let source = pattern.into();
        let segments = source
            .split('/')
            .skip(1)
            .map(|s| {
                if let Some(name) = s.strip_prefix("{*").and_then(|s| s.strip_suffix('}')) {
                    Segment::CatchAll(name.to_string())
                } else if let Some(name) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Segment::Param(name.to_string())
                } else {
                    Segment::Literal(s.to_string())
                }
            })
            .collect();

        Self { source, segments }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a path, returning captured parameters on success.
    pub fn matches(&self, path: &str) -> Option<Vec<(String, String)>> {
        let rest = path.strip_prefix('/')?;
        let mut parts = rest.split('/');
        let mut params = Vec::new();

        for segment in &self.segments {
            match segment {
                Segment::CatchAll(name) => {
                    let tail: Vec<&str> = parts.by_ref().collect();
                    params.push((name.clone(), tail.join("/")));
                    return Some(params);
                }
                Segment::Param(name) => {
                    let part = parts.next().filter(|p| !p.is_empty())?;
                    params.push((name.clone(), part.to_string()));
                }
                Segment::Literal(literal) => {
                    if parts.next()? != literal {
                        return None;
                    }
                }
            }
        }

        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }
}
