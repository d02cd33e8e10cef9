//! Base validation trait and path context
//!
//! Copyright (c) 2025 Visrole Team
//! Licensed under the Apache-2.0 license

use crate::model::MappingModel;
use crate::validation::error::{ValidationError, ValidationErrorKind, ValidationErrors, ValidationResult};

/// Validation context carrying the path of the value being checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    /// Current path, rooted at the role name
    pub path: String,
}

impl ValidationContext {
    /// Create a context rooted at a role
    pub fn new<P: Into<String>>(role: P) -> Self {
        Self { path: role.into() }
    }

    /// Create a child context with updated path
    pub fn child<P: AsRef<str>>(&self, path_segment: P) -> Self {
        Self {
            path: format!("{}.{}", self.path, path_segment.as_ref()),
        }
    }

    /// Create a child context for array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
        }
    }
}

/// Prerequisite structural check run before any role-specific rule
///
/// When it reports errors, mapping validation stops and returns exactly
/// those errors.
pub trait BaseValidator {
    fn validate_base(&self, model: &dyn MappingModel) -> ValidationResult;
}

impl<F> BaseValidator for F
where
    F: Fn(&dyn MappingModel) -> ValidationResult,
{
    fn validate_base(&self, model: &dyn MappingModel) -> ValidationResult {
        self(model)
    }
}

/// Checks that every mapped field reference names a field
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl BaseValidator for StructuralValidator {
    fn validate_base(&self, model: &dyn MappingModel) -> ValidationResult {
        let fields_ctx = ValidationContext::new(model.role()).child("fields");
        let mut errors = ValidationErrors::new();

        for (i, field) in model.mapped_fields().iter().enumerate() {
            let path = fields_ctx.child_index(i).path;
            if let Some(value) = &field.malformed {
                errors.add(
                    ValidationError::new(
                        ValidationErrorKind::BaseStructural,
                        path,
                        "Field reference must be a field name or an object",
                    )
                    .with_violation("a string or {name, label} object", value.to_string()),
                );
            } else if field.name.trim().is_empty() {
                errors.add(
                    ValidationError::new(
                        ValidationErrorKind::BaseStructural,
                        path,
                        "Field reference has no name",
                    )
                    .with_violation("a non-empty field name", format!("{:?}", field.name)),
                );
            }
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldRef, VisualModel};

    #[test]
    fn test_validation_context_child() {
        let context = ValidationContext::new("color");
        let child = context.child("fields");
        assert_eq!(child.path, "color.fields");
        assert_eq!(child.child_index(3).path, "color.fields[3]");
    }

    #[test]
    fn test_structural_accepts_named_fields() {
        let mut model = VisualModel::default();
        model.add_field("rows", "country");
        assert!(StructuralValidator.validate_base(&model.role("rows")).is_ok());
    }

    #[test]
    fn test_structural_reports_each_unnamed_field() {
        let mut model = VisualModel::default();
        model.add_field("rows", FieldRef::default());
        model.add_field("rows", "country");
        model.add_field("rows", FieldRef::new("  "));

        let errors = StructuralValidator
            .validate_base(&model.role("rows"))
            .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.errors[0].path, "rows.fields[0]");
        assert_eq!(errors.errors[1].path, "rows.fields[2]");
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::BaseStructural));
    }

    #[test]
    fn test_structural_reports_malformed_reference_once() {
        let model = VisualModel::from_spec(&serde_json::json!({
            "rows": {"fields": ["country", 42]}
        }))
        .unwrap();

        let errors = StructuralValidator
            .validate_base(&model.role("rows"))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "rows.fields[1]");
        assert_eq!(errors.errors[0].violation.as_ref().unwrap().actual, "42");
    }

    #[test]
    fn test_closure_is_a_base_validator() {
        let always_ok = |_: &dyn MappingModel| -> ValidationResult { Ok(()) };
        let model = VisualModel::default();
        assert!(always_ok.validate_base(&model.role("rows")).is_ok());
    }
}
