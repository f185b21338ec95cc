//! Per-field validators for entity setters.
//!
//! Each validator takes the raw assignment and returns the sanitised value or
//! a [`FieldValidationError`] naming the field and the rejected input.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// A value was rejected by a field validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value {field_value:?} for field {field_name}")]
pub struct FieldValidationError {
    /// Name of the rejected field.
    pub field_name: &'static str,
    /// The raw value as supplied by the caller.
    pub field_value: String,
}

impl FieldValidationError {
    /// Build an error for `field_name` carrying the rejected value.
    pub fn new(field_name: &'static str, field_value: impl Into<String>) -> Self {
        Self {
            field_name,
            field_value: field_value.into(),
        }
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Trim a post title, rejecting values that are blank after trimming.
///
/// # Examples
/// ```
/// use blog_backend::domain::field_validation::validate_title;
///
/// let title = validate_title("  Hello  ".into()).expect("valid title");
/// assert_eq!(title, "Hello");
/// assert!(validate_title("   ".into()).is_err());
/// ```
pub fn validate_title(raw: String) -> Result<String, FieldValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldValidationError::new("title", raw));
    }
    if trimmed.len() == raw.len() {
        return Ok(raw);
    }
    Ok(trimmed.to_owned())
}

/// Accept an absent email or one that looks like `local@domain.tld`.
pub fn validate_email(raw: Option<String>) -> Result<Option<String>, FieldValidationError> {
    match raw {
        Some(email) if !email_regex().is_match(&email) => {
            Err(FieldValidationError::new("email", email))
        }
        other => Ok(other),
    }
}

/// Accept strictly positive identifiers for the named field.
pub fn validate_positive_id(field_name: &'static str, raw: i64) -> Result<i64, FieldValidationError> {
    if raw <= 0 {
        return Err(FieldValidationError::new(field_name, raw.to_string()));
    }
    Ok(raw)
}
