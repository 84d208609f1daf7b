//! Subdomain to application path rewriting.
//!
//! An application mounted under `/blog/` can be served from
//! `blog.example.com` instead:
//!
//! ```text
//! https://www.example.com/blog/my-article      → https://blog.example.com/my-article
//! https://www.example.com/en/blog/my-article   → https://blog.example.com/en/my-article
//! ```
//!
//! When the incoming path does not resolve, the mapped app segment is put
//! back into the path, after the language prefix when i18n is enabled.
//!
//! Resolution and rewriting work on the percent-encoded path, the same form
//! the router matches against, so the rewritten URI stays valid.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{Request, Uri};
use regex::Regex;

use crate::config::SubdomainConfig;
use crate::http::request::RequestExt;
use crate::routing::Resolver;

/// Errors raised while rewriting a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// The request carries no host at all. Points at a broken proxy setup.
    #[error("improperly configured: request has no Host header")]
    MissingHost,

    #[error("rewritten path is not a valid URI: {0:?}")]
    InvalidPath(String),
}

/// Path a request was rewritten to. Stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenPath(pub String);

/// Rewrites request paths for hosts listed in the subdomain map.
pub struct SubdomainRewriter {
    apps: HashMap<String, String>,
    lang: Option<Regex>,
    append_slash: bool,
    resolver: Arc<dyn Resolver>,
}

impl std::fmt::Debug for SubdomainRewriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubdomainRewriter")
            .field("apps", &self.apps)
            .field("lang", &self.lang)
            .field("append_slash", &self.append_slash)
            .finish_non_exhaustive()
    }
}

impl SubdomainRewriter {
    /// Build a rewriter. The language pattern is only compiled when i18n is
    /// enabled.
    pub fn new(config: &SubdomainConfig, resolver: Arc<dyn Resolver>) -> Result<Self, regex::Error> {
        let lang = match (&config.url_lang_regex, config.use_i18n) {
            (Some(pattern), true) => Some(Regex::new(pattern)?),
            _ => None,
        };

        let apps = config
            .apps
            .iter()
            .map(|(host, app)| (host.trim().to_lowercase(), app.clone()))
            .collect();

        Ok(Self {
            apps,
            lang,
            append_slash: config.append_slash,
            resolver,
        })
    }

    /// App segment mapped to a bare host.
    pub fn app_for(&self, host: &str) -> Option<&str> {
        self.apps.get(host).map(String::as_str)
    }

    /// Compute the rewritten path for a request, without touching it.
    ///
    /// Returns `Ok(None)` when the path already resolves or the host is not
    /// mapped.
    pub fn rewrite<B>(&self, req: &Request<B>) -> Result<Option<String>, RewriteError> {
        let path = req.uri().path();
        if self.resolver.is_resolvable(path) {
            return Ok(None);
        }

        let host = req.bare_host().ok_or(RewriteError::MissingHost)?;
        let Some(app) = self.app_for(&host) else {
            return Ok(None);
        };

        Ok(Some(self.rewrite_path(path, app)))
    }

    /// Rewrite the request URI in place, preserving the query string.
    pub fn apply<B>(&self, req: &mut Request<B>) -> Result<Option<String>, RewriteError> {
        let Some(new_path) = self.rewrite(req)? else {
            return Ok(None);
        };

        let uri = rewrite_uri(req.uri(), &new_path)
            .ok_or_else(|| RewriteError::InvalidPath(new_path.clone()))?;

        tracing::debug!(
            original = %req.uri(),
            new_uri = %uri,
            resolves = self.resolver.is_resolvable(&new_path),
            "Rewrote subdomain request"
        );

        *req.uri_mut() = uri;
        req.extensions_mut().insert(RewrittenPath(new_path.clone()));
        Ok(Some(new_path))
    }

    /// Insert `app` into `path` after the language prefix.
    pub fn rewrite_path(&self, path: &str, app: &str) -> String {
        let (lang, suffix) = self.split_language(path);
        self.glue(&[&lang, app, &suffix])
    }

    /// Split a path into its language segment and the remaining suffix.
    fn split_language(&self, path: &str) -> (String, String) {
        let Some(m) = self.lang.as_ref().and_then(|re| re.find(path)) else {
            return (String::new(), path.to_string());
        };

        let lang = m.as_str().trim_matches('/').to_string();
        let rest = format!("{}/{}", &path[..m.start()], &path[m.end()..]);
        (lang, collapse_slashes(&rest))
    }

    fn glue(&self, parts: &[&str]) -> String {
        let mut url = String::from("/");
        for part in parts {
            let part = collapse_slashes(part);
            if !part.is_empty() {
                url.push_str(&part);
                url.push('/');
            }
        }
        if !self.append_slash && url.len() > 1 {
            url.pop();
        }
        url
    }
}

/// Drop empty segments: `//a///b/` becomes `a/b`.
fn collapse_slashes(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Replace the path of a URI, keeping scheme, authority and query.
fn rewrite_uri(original: &Uri, new_path: &str) -> Option<Uri> {
    let path_and_query = match original.query() {
        Some(query) => format!("{new_path}?{query}"),
        None => new_path.to_string(),
    };
    let mut parts = original.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse().ok()?);
    Uri::from_parts(parts).ok()
}
