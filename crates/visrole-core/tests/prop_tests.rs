//! Property-based tests for role mapping validation
//!
//! These tests verify that the validation order and accumulation rules
//! hold across a wide range of mappings and constraints.

mod test_support;

use proptest::prelude::*;
use test_support::{model_with_fields, ROLE};
use visrole_core::{
    validate, FieldRef, FieldsConstraints, MappingModel, StructuralValidator, ValidationError,
    ValidationErrorKind, ValidationErrors, ValidationResult,
};

/// Strategy for field names, mostly columns of the sales table
fn field_name_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        4 => prop_oneof![Just("country"), Just("product"), Just("sales"), Just("date")],
        1 => prop_oneof![Just("mugambo"), Just("region")],
    ]
}

fn mapping_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::collection::vec(field_name_strategy(), 0..8)
}

/// Strategy for constraints with optional required-ness and bounds
fn constraints_strategy() -> impl Strategy<Value = (Option<bool>, Option<usize>, Option<usize>)> {
    (
        proptest::option::of(any::<bool>()),
        proptest::option::of(0usize..6),
        proptest::option::of(0usize..6),
    )
}

fn build_constraints(spec: (Option<bool>, Option<usize>, Option<usize>)) -> FieldsConstraints {
    let (is_required, count_min, count_max) = spec;
    let mut constraints = FieldsConstraints::new();
    if let Some(flag) = is_required {
        constraints = constraints.with_is_required(flag);
    }
    if let Some(min) = count_min {
        constraints = constraints.with_count_min(min);
    }
    if let Some(max) = count_max {
        constraints = constraints.with_count_max(max);
    }
    constraints
}

fn run(fields: &[&str], constraints: &FieldsConstraints) -> ValidationResult {
    let model = model_with_fields(fields);
    validate(&model.role(ROLE), constraints, &StructuralValidator)
}

fn count_of(result: &ValidationResult, kind: ValidationErrorKind) -> usize {
    result.as_ref().err().map_or(0, |errors| errors.count_of(kind))
}

proptest! {
    #[test]
    fn prop_base_errors_are_never_combined(
        fields in mapping_strategy(),
        spec in constraints_strategy(),
    ) {
        let model = model_with_fields(&fields);
        let base_error = ValidationError::new(ValidationErrorKind::BaseStructural, ROLE, "malformed");
        let expected = ValidationErrors::from(base_error.clone());
        let base = move |_: &dyn MappingModel| -> ValidationResult {
            Err(ValidationErrors::from(base_error.clone()))
        };

        let result = validate(&model.role(ROLE), &build_constraints(spec), &base);
        prop_assert_eq!(result, Err(expected));
    }

    #[test]
    fn prop_required_without_fields_reports_alone(spec in constraints_strategy()) {
        let (_, count_min, count_max) = spec;
        let constraints = build_constraints((Some(true), count_min, count_max));
        let errors = run(&[], &constraints).unwrap_err();
        prop_assert_eq!(errors.kinds(), vec![ValidationErrorKind::RequiredMissing]);
    }

    #[test]
    fn prop_required_with_fields_adds_nothing(
        fields in proptest::collection::vec(field_name_strategy(), 1..8),
        spec in constraints_strategy(),
    ) {
        let (_, count_min, count_max) = spec;
        let required = run(&fields, &build_constraints((Some(true), count_min, count_max)));
        let optional = run(&fields, &build_constraints((None, count_min, count_max)));
        prop_assert_eq!(count_of(&required, ValidationErrorKind::RequiredMissing), 0);
        prop_assert_eq!(required, optional);
    }

    #[test]
    fn prop_count_bounds(
        fields in mapping_strategy(),
        count_min in 0usize..6,
        count_max in 0usize..6,
    ) {
        let constraints = build_constraints((None, Some(count_min), Some(count_max)));
        let result = run(&fields, &constraints);
        let count = fields.len();

        let below = count_of(&result, ValidationErrorKind::CountBelowMinimum);
        let above = count_of(&result, ValidationErrorKind::CountAboveMaximum);
        prop_assert_eq!(below, usize::from(count < count_min));
        prop_assert_eq!(above, usize::from(count > count_max));
    }

    #[test]
    fn prop_clone_of_mapped_field_is_duplicate(
        fields in proptest::collection::vec(field_name_strategy(), 1..8),
        pick in any::<proptest::sample::Index>(),
    ) {
        let mut model = model_with_fields(&fields);
        let clone: FieldRef = fields[pick.index(fields.len())].into();
        model.add_field(ROLE, clone.with_label("Copy"));

        let result = validate(&model.role(ROLE), &FieldsConstraints::new(), &StructuralValidator);
        prop_assert!(count_of(&result, ValidationErrorKind::DuplicateField) >= 1);
    }

    #[test]
    fn prop_unknown_fields_reported_per_occurrence(fields in mapping_strategy()) {
        let result = run(&fields, &FieldsConstraints::new());
        let unknown = fields
            .iter()
            .filter(|name| !["country", "product", "sales", "date"].contains(*name))
            .count();
        prop_assert_eq!(count_of(&result, ValidationErrorKind::FieldNotInDataset), unknown);
    }

    #[test]
    fn prop_missing_data_is_invalid(fields in proptest::collection::vec(field_name_strategy(), 1..8)) {
        let mut model = model_with_fields(&fields);
        model.clear_data();
        let result = validate(&model.role(ROLE), &FieldsConstraints::new(), &StructuralValidator);
        prop_assert_eq!(count_of(&result, ValidationErrorKind::MissingDataset), 1);
        prop_assert_eq!(count_of(&result, ValidationErrorKind::FieldNotInDataset), 0);
    }

    #[test]
    fn prop_validation_is_idempotent(
        fields in mapping_strategy(),
        spec in constraints_strategy(),
    ) {
        let constraints = build_constraints(spec);
        prop_assert_eq!(run(&fields, &constraints), run(&fields, &constraints));
    }

    #[test]
    fn prop_errors_are_never_empty(
        fields in mapping_strategy(),
        spec in constraints_strategy(),
    ) {
        if let Err(errors) = run(&fields, &build_constraints(spec)) {
            prop_assert!(!errors.is_empty());
        }
    }
}
