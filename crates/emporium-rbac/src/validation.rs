//! Field validation for role and permission forms.
//!
//! Names must match `^[a-z_]+$`. The check is a byte scan rather than a
//! regex; the alphabet is small and fixed.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    GuardName,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Name => f.write_str("name"),
            Field::GuardName => f.write_str("guard_name"),
        }
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FieldErrorKind {
    #[error("is required")]
    Required,

    #[error("may only contain lowercase letters and underscores")]
    InvalidCharacters,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field} {kind}")]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
}

/// All validation failures of a form. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("validation failed: {}", render(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the first error recorded against `field`.
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    fn push(&mut self, field: Field, kind: FieldErrorKind) {
        self.errors.push(FieldError { field, kind });
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn render(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Returns whether `name` is non-empty and matches `^[a-z_]+$`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase() || b == b'_')
}

/// Validates a role form before it is submitted.
pub fn validate_role(name: &str, guard_name: &str) -> Result<(), ValidationErrors> {
    validate_named(name, guard_name)
}

/// Validates a permission form before it is submitted.
///
/// Permissions follow the same naming rule as roles.
pub fn validate_permission(name: &str, guard_name: &str) -> Result<(), ValidationErrors> {
    validate_named(name, guard_name)
}

fn validate_named(name: &str, guard_name: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if name.is_empty() {
        errors.push(Field::Name, FieldErrorKind::Required);
    } else if !is_valid_name(name) {
        errors.push(Field::Name, FieldErrorKind::InvalidCharacters);
    }

    if guard_name.trim().is_empty() {
        errors.push(Field::GuardName, FieldErrorKind::Required);
    }

    errors.into_result()
}
