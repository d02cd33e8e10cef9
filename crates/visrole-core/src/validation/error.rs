//! Validation error types for role mappings
//!
//! Copyright (c) 2025 Visrole Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The rule a [`ValidationError`] reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// The mapping value itself is malformed
    BaseStructural,
    /// The role is required but has no mapped fields
    RequiredMissing,
    /// Fewer fields are mapped than `countMin` allows
    CountBelowMinimum,
    /// More fields are mapped than `countMax` allows
    CountAboveMaximum,
    /// Fields are mapped but the model has no data to check them against
    MissingDataset,
    /// A mapped field names a column the dataset does not have
    FieldNotInDataset,
    /// A field is mapped more than once
    DuplicateField,
}

impl ValidationErrorKind {
    /// Stable rule identifier used in violations and machine output
    pub fn rule(&self) -> &'static str {
        match self {
            ValidationErrorKind::BaseStructural => "base_structural",
            ValidationErrorKind::RequiredMissing => "required",
            ValidationErrorKind::CountBelowMinimum => "count_min",
            ValidationErrorKind::CountAboveMaximum => "count_max",
            ValidationErrorKind::MissingDataset => "dataset_present",
            ValidationErrorKind::FieldNotInDataset => "field_in_dataset",
            ValidationErrorKind::DuplicateField => "unique_field",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rule())
    }
}

/// A validation violation with detailed context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The validation rule that was violated
    pub rule: String,
    /// What was expected
    pub expected: String,
    /// What was actually found
    pub actual: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rule '{}' violated: expected {}, but found {}",
            self.rule, self.expected, self.actual
        )
    }
}

/// A single mapping violation with path context
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// Which rule failed
    pub kind: ValidationErrorKind,
    /// Path of the offending value, e.g. `propRole.fields[2]`
    pub path: String,
    /// Human-readable error message
    pub message: String,
    /// Expected/actual detail, when the rule has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation: Option<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error at '{}': {}", self.path, self.message)?;

        if let Some(violation) = &self.violation {
            write!(f, "\n  - {}", violation)?;
        }

        Ok(())
    }
}

impl ValidationError {
    /// Create a new validation error
    pub fn new<P, M>(kind: ValidationErrorKind, path: P, message: M) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
            violation: None,
        }
    }

    /// Attach expected/actual detail, keyed by this error's rule
    pub fn with_violation<E, A>(mut self, expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        self.violation = Some(Violation {
            rule: self.kind.rule().to_string(),
            expected: expected.into(),
            actual: actual.into(),
        });
        self
    }
}

/// Result of validating a mapping: `Ok(())` when valid, otherwise at least one error
pub type ValidationResult = Result<(), ValidationErrors>;

/// An ordered collection of validation errors
///
/// A `ValidationErrors` handed out through [`ValidationResult`] is never
/// empty; [`ValidationErrors::into_result`] is the only way one is produced
/// from accumulated errors.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// List of validation errors
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s) occurred:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    /// Create a new validation errors collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Append every error of another collection, keeping order
    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors in order
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Kinds of the contained errors, in order
    pub fn kinds(&self) -> Vec<ValidationErrorKind> {
        self.errors.iter().map(|e| e.kind).collect()
    }

    /// Number of errors of the given kind
    pub fn count_of(&self, kind: ValidationErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }

    /// Convert to result - Ok if no errors, Err if any errors exist
    pub fn into_result(self) -> ValidationResult {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Default for ValidationErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.add(error);
        errors
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
