//! Field-level validation errors and shared field rules.

use std::fmt::{self, Display, Formatter};

use smallvec::SmallVec;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All rejected fields from one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: SmallVec<[FieldError; 2]>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for an error list holding exactly one field.
    #[must_use]
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();

        errors.add(field, message);

        errors
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Record `result` under `field` when it is an error.
    pub fn check(&mut self, field: &'static str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// `Ok(())` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field was rejected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }

            write!(f, "{}: {}", error.field, error.message)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub(crate) fn length_between(value: &str, min: usize, max: usize) -> Result<(), String> {
    let length = value.chars().count();

    if length < min {
        return Err(format!("must be at least {min} characters"));
    }

    if length > max {
        return Err(format!("must be at most {max} characters"));
    }

    Ok(())
}

pub(crate) fn at_least(value: i64, min: i64) -> Result<(), String> {
    if value < min {
        return Err(format!("must be greater than or equal to {min}"));
    }

    Ok(())
}

/// Lowercase alphanumeric segments joined by single hyphens.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('-').all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit())
        })
}

pub(crate) fn slug(value: &str) -> Result<(), String> {
    length_between(value, 1, 255)?;

    if !is_valid_slug(value) {
        return Err("must be lowercase letters and digits separated by single hyphens".to_string());
    }

    Ok(())
}

/// A deliberately loose address check: one `@`, something before it and a
/// dotted domain after it.
pub(crate) fn email(value: &str) -> Result<(), String> {
    let invalid = || Err("value is not a valid email address".to_string());

    let Some((local, domain)) = value.split_once('@') else {
        return invalid();
    };

    if local.is_empty()
        || domain.contains('@')
        || value.chars().any(char::is_whitespace)
        || domain.starts_with('.')
        || domain.ends_with('.')
        || !domain.contains('.')
    {
        return invalid();
    }

    Ok(())
}
