//! Field validators.
//!
//! Pure functions over a single string. Each returns `Ok(())` or a
//! [`ValidationError`] carrying a human-readable message that callers can
//! aggregate for field-level reporting. Configuration validation uses them
//! for app segments and pattern settings.

use regex::Regex;
use std::sync::LazyLock;

/// Characters a slug must not contain: `! @ ~ # \ > < : ; [ ] { } % & * ( ) $ / ?`
/// and whitespace.
static SLUG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^!@~#\\><:;\[\]\{\}%&\*\(\)\$/\s\?]+$").expect("valid regex literal")
});

/// A value failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Validate a slug containing no slashes.
pub fn zeroslash_slug(value: &str) -> Result<(), ValidationError> {
    if SLUG.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("Invalid Slug Value"))
    }
}

/// Validate a slug meant to hold two slugs separated by one slash.
///
/// The check applies the same character set as [`zeroslash_slug`], so a
/// slash is rejected as well; the one-slash form is not enforced.
pub fn oneslash_slug(value: &str) -> Result<(), ValidationError> {
    if SLUG.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "Invalid Slug Value, value should contain one slash",
        ))
    }
}

/// Validate that a value compiles as a regular expression.
pub fn valid_regex(value: &str) -> Result<(), ValidationError> {
    Regex::new(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("Invalid regex"))
}
