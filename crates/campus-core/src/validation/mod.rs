//! Validated input boundary
//!
//! Every inbound payload type declares a [`Schema`]: an ordered list of
//! `(field, extractor, check, message)` rules. The schema is evaluated eagerly
//! and collects every failing rule, so a client can surface all problems at once.
//!
//! Rules come in two flavours:
//! - **required**: an absent or blank value produces a single `"<field> is required"`
//!   violation and the remaining rules for that field are skipped
//! - **optional**: an absent value skips the rule; a present value is still checked
//!
//! Type shape (string, boolean, number) is enforced by serde when the payload is
//! deserialized; schemas only see the already-typed values.

pub mod password;

use regex::Regex;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

pub use password::{is_strong_password, PASSWORD_MIN_LENGTH, PASSWORD_SYMBOLS};

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Validation failure listing every violated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Build an error carrying a single violation.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    /// Names of every violated field, in rule order, without duplicates.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for violation in &self.violations {
            if !fields.contains(&violation.field.as_str()) {
                fields.push(&violation.field);
            }
        }
        fields
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let parts: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Predicate applied to a present field value.
pub enum Check {
    /// Value must contain a non-whitespace character.
    NonEmpty,
    /// Length in characters, inclusive on both ends.
    Length { min: usize, max: usize },
    /// Value must parse as a UUID.
    Uuid,
    /// Value must be one of a fixed set.
    OneOf(&'static [&'static str]),
    /// Value must match the pattern.
    Matches(Regex),
    /// Value must not match the pattern.
    Rejects(Regex),
    Predicate(fn(&str) -> bool),
}

impl Check {
    /// Compile a pattern check.
    ///
    /// Schemas are built from literal patterns, so an invalid pattern is a
    /// programming error and panics at schema construction.
    pub fn matches(pattern: &str) -> Self {
        Check::Matches(Regex::new(pattern).expect("schema pattern must compile"))
    }

    pub fn rejects(pattern: &str) -> Self {
        Check::Rejects(Regex::new(pattern).expect("schema pattern must compile"))
    }

    fn passes(&self, value: &str) -> bool {
        match self {
            Check::NonEmpty => !value.trim().is_empty(),
            Check::Length { min, max } => {
                let len = value.chars().count();
                len >= *min && len <= *max
            }
            Check::Uuid => uuid::Uuid::parse_str(value).is_ok(),
            Check::OneOf(allowed) => allowed.contains(&value),
            Check::Matches(pattern) => pattern.is_match(value),
            Check::Rejects(pattern) => !pattern.is_match(value),
            Check::Predicate(predicate) => predicate(value),
        }
    }
}

struct Rule<T> {
    field: &'static str,
    required: bool,
    extract: fn(&T) -> Option<&str>,
    check: Check,
    message: &'static str,
}

/// Ordered validation rules for one input type.
pub struct Schema<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Schema<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule for a field that must be present and non-blank.
    pub fn required(
        mut self,
        field: &'static str,
        extract: fn(&T) -> Option<&str>,
        check: Check,
        message: &'static str,
    ) -> Self {
        self.rules.push(Rule {
            field,
            required: true,
            extract,
            check,
            message,
        });
        self
    }

    /// Add a rule for a field that is skipped when absent.
    pub fn optional(
        mut self,
        field: &'static str,
        extract: fn(&T) -> Option<&str>,
        check: Check,
        message: &'static str,
    ) -> Self {
        self.rules.push(Rule {
            field,
            required: false,
            extract,
            check,
            message,
        });
        self
    }

    /// Evaluate every rule against `input`.
    pub fn validate(&self, input: &T) -> Result<(), ValidationError> {
        let mut violations: Vec<FieldViolation> = Vec::new();
        let mut missing: Vec<&'static str> = Vec::new();

        for rule in &self.rules {
            if missing.contains(&rule.field) {
                continue;
            }

            let value = (rule.extract)(input);
            let value = match value {
                Some(v) if !(rule.required && v.trim().is_empty()) => v,
                _ if rule.required => {
                    missing.push(rule.field);
                    violations.push(FieldViolation {
                        field: rule.field.to_string(),
                        message: format!("{} is required", rule.field),
                    });
                    continue;
                }
                _ => continue,
            };

            if !rule.check.passes(value) {
                violations.push(FieldViolation {
                    field: rule.field.to_string(),
                    message: rule.message.to_string(),
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

/// Implemented by every inbound payload type.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}
