//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Per-field validation messages, keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors for a single field
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    /// Resource not found
    #[error("Resource not found")]
    NotFound,
    /// Field-level validation failures
    #[error("Validation error: {0}")]
    Validation(FieldErrors),
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
    /// Missing or rejected credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_accumulate_per_field() {
        let mut errors = FieldErrors::single("email", "Enter a valid email address.");
        errors.add("email", "Ensure this field has no more than 254 characters.");
        errors.add("name", "This field is required.");

        assert_eq!(errors.get("email").map(|m| m.len()), Some(2));
        assert_eq!(
            serde_json::to_value(&errors).unwrap()["name"][0],
            "This field is required."
        );
        assert!(matches!(
            errors.into_result(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn empty_field_errors_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
