//! Declarative field rules for the login and registration forms.
//!
//! Every form field is checked against a fixed [`FieldRule`] before anything
//! touches the network. Rules are plain data: the tables below are the only
//! place the limits live, and the value types in [`crate::domain`] reuse them.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// A form field subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Email,
    Password,
    DisplayName,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::DisplayName => "displayName",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named patterns a field may be required to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPattern {
    /// `local@domain.tld` with no whitespace and exactly one `@`.
    Email,
}

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

impl FieldPattern {
    pub fn is_match(&self, value: &str) -> bool {
        match self {
            FieldPattern::Email => EMAIL_REGEX.is_match(value),
        }
    }
}

/// Constraints for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    pub required: bool,
    /// Minimum length in Unicode scalar values.
    pub min_length: Option<usize>,
    pub pattern: Option<FieldPattern>,
    /// Whether surrounding whitespace is stripped before checking.
    pub trim: bool,
}

pub const EMAIL_RULE: FieldRule = FieldRule {
    field: Field::Email,
    required: true,
    min_length: None,
    pattern: Some(FieldPattern::Email),
    trim: true,
};

pub const PASSWORD_RULE: FieldRule = FieldRule {
    field: Field::Password,
    required: true,
    min_length: Some(6),
    pattern: None,
    trim: false,
};

pub const DISPLAY_NAME_RULE: FieldRule = FieldRule {
    field: Field::DisplayName,
    required: true,
    min_length: Some(2),
    pattern: None,
    trim: true,
};

pub const LOGIN_RULES: &[FieldRule] = &[EMAIL_RULE, PASSWORD_RULE];

pub const REGISTRATION_RULES: &[FieldRule] = &[DISPLAY_NAME_RULE, EMAIL_RULE, PASSWORD_RULE];

/// Machine-readable reason a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationReason {
    Required,
    TooShort { min: usize },
    Malformed,
}

impl ValidationReason {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationReason::Required => "required",
            ValidationReason::TooShort { .. } => "too_short",
            ValidationReason::Malformed => "malformed",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::Required => f.write_str("is required"),
            ValidationReason::TooShort { min } => write!(f, "must be at least {min} characters"),
            ValidationReason::Malformed => f.write_str("is not valid"),
        }
    }
}

/// A single rejected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[error("{field} {reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: ValidationReason,
}

/// All violations found in one form, in rule table order.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(transparent)]
#[error("{}", join_errors(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The violation reported for `field`, if any.
    pub fn for_field(&self, field: Field) -> Option<ValidationReason> {
        self.0.iter().find(|e| e.field == field).map(|e| e.reason)
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors(vec![error])
    }
}

/// Raw form input that can be looked up by field.
pub trait FormInput {
    /// The raw value submitted for `field`, or `None` if the form has no such field.
    fn value(&self, field: Field) -> Option<&str>;
}

/// Check one raw value against one rule.
///
/// Checks run in a fixed order (required, minimum length, pattern) and the
/// first failure wins.
pub fn check(rule: &FieldRule, raw: &str) -> Result<(), ValidationError> {
    let value = if rule.trim { raw.trim() } else { raw };
    let fail = |reason| {
        Err(ValidationError {
            field: rule.field,
            reason,
        })
    };

    if value.is_empty() {
        if rule.required {
            return fail(ValidationReason::Required);
        }
        return Ok(());
    }

    if let Some(min) = rule.min_length {
        if value.chars().count() < min {
            return fail(ValidationReason::TooShort { min });
        }
    }

    if let Some(pattern) = rule.pattern {
        if !pattern.is_match(value) {
            return fail(ValidationReason::Malformed);
        }
    }

    Ok(())
}

/// Validate a whole form against a rule table, collecting every violation.
pub fn validate<F>(form: &F, rules: &[FieldRule]) -> Result<(), ValidationErrors>
where
    F: FormInput + ?Sized,
{
    let errors: Vec<ValidationError> = rules
        .iter()
        .filter_map(|rule| check(rule, form.value(rule.field).unwrap_or_default()).err())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
