//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every configured pattern must compile
//! - Subdomain hosts must be non-empty, app segments must be slugs
//! - Route patterns must be absolute paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MiddlewareConfig → Result<(), Vec<FieldError>>
//! - Runs before config is accepted into the system

use crate::config::schema::MiddlewareConfig;
use crate::validators::{valid_regex, zeroslash_slug};

/// A single semantic problem with a configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Dotted path of the offending key, e.g. `cache.never_regex`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &MiddlewareConfig) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    let cache = &config.cache;
    let patterns = [
        ("subdomains.url_lang_regex", &config.subdomains.url_lang_regex),
        ("cache.ajax_url_regex", &cache.ajax_url_regex),
        ("cache.url_regex", &cache.url_regex),
        ("cache.ultra_regex", &cache.ultra_regex),
        ("cache.private_regex", &cache.private_regex),
        ("cache.never_regex", &cache.never_regex),
    ];
    for (field, pattern) in patterns {
        if let Some(pattern) = pattern {
            if let Err(e) = valid_regex(pattern) {
                errors.push(FieldError::new(field, format!("{e}: {pattern:?}")));
            }
        }
    }

    for (host, app) in &config.subdomains.apps {
        if host.trim().is_empty() {
            errors.push(FieldError::new("subdomains.apps", "empty host name"));
        }
        if let Err(e) = zeroslash_slug(app) {
            errors.push(FieldError::new(
                format!("subdomains.apps.{host}"),
                format!("{e}: {app:?}"),
            ));
        }
    }

    for (i, route) in config.routes.iter().enumerate() {
        if !route.pattern.starts_with('/') {
            errors.push(FieldError::new(
                format!("routes[{i}].pattern"),
                format!("must start with '/': {:?}", route.pattern),
            ));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(FieldError::new("timeouts.request_secs", "must be > 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&MiddlewareConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = MiddlewareConfig::default();
        config.cache.never_regex = Some("[a-z".into());
        config.cache.private_regex = Some("(".into());
        config
            .subdomains
            .apps
            .insert("blog.example.com".into(), "blog/posts".into());
        config.routes.push(RouteConfig {
            pattern: "blog".into(),
            ajax_only: false,
        });

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "cache.private_regex",
                "cache.never_regex",
                "subdomains.apps.blog.example.com",
                "routes[0].pattern",
            ]
        );
        assert!(errors[0].to_string().starts_with("cache.private_regex: Invalid regex"));
    }

    #[test]
    fn test_empty_host_rejected() {
        let mut config = MiddlewareConfig::default();
        config.subdomains.apps.insert(" ".into(), "blog".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "subdomains.apps");
    }
}
