//! Role mapping validation
//!
//! Validation runs as an ordered pipeline. The base validator goes first and
//! ends validation when it reports anything. The role phases then run in
//! order; a [`PhasePolicy::Terminal`] phase that finds errors returns them
//! on its own, while [`PhasePolicy::Accumulate`] phases add to a shared list.
//!
//! | Phase      | Policy     | Rule                                   |
//! |------------|------------|----------------------------------------|
//! | required   | Terminal   | required role with no fields           |
//! | count_min  | Accumulate | fewer fields than `countMin`           |
//! | count_max  | Accumulate | more fields than `countMax`            |
//! | content    | Accumulate | missing data, unknown and repeated fields |
//!
//! Copyright (c) 2025 Visrole Team
//! Licensed under the Apache-2.0 license

use crate::constraints::{FieldsConstraints, ResolvedConstraints};
use crate::model::{FieldRef, MappingModel};
use crate::validation::base::{BaseValidator, ValidationContext};
use crate::validation::error::{ValidationError, ValidationErrorKind, ValidationErrors, ValidationResult};
use std::collections::HashSet;
use tracing::{debug, trace};

/// What happens when a phase reports errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhasePolicy {
    /// Return this phase's errors immediately
    Terminal,
    /// Keep the errors and run the next phase
    Accumulate,
}

/// Everything a phase may look at, resolved once per validation call
struct PhaseInput<'a> {
    model: &'a dyn MappingModel,
    constraints: ResolvedConstraints,
    context: ValidationContext,
}

struct Phase {
    name: &'static str,
    policy: PhasePolicy,
    run: fn(&PhaseInput<'_>) -> Vec<ValidationError>,
}

const PHASES: [Phase; 4] = [
    Phase {
        name: "required",
        policy: PhasePolicy::Terminal,
        run: check_required,
    },
    Phase {
        name: "count_min",
        policy: PhasePolicy::Accumulate,
        run: check_count_min,
    },
    Phase {
        name: "count_max",
        policy: PhasePolicy::Accumulate,
        run: check_count_max,
    },
    Phase {
        name: "content",
        policy: PhasePolicy::Accumulate,
        run: check_content,
    },
];

/// Validate one role's mapping against its constraints
///
/// Returns `Ok(())` when the mapping is valid. Otherwise the errors are
/// ordered by phase, and within the content phase by field position.
///
/// ```rust
/// use visrole_core::{validate, FieldsConstraints, StructuralValidator, Table, VisualModel};
/// use visrole_core::ValidationErrorKind;
/// use serde_json::json;
///
/// let data = Table::from_spec(&json!({
///     "model": [
///         {"name": "country", "type": "string"},
///         {"name": "product", "type": "string"}
///     ]
/// })).unwrap();
/// let mut model = VisualModel::new(Some(data));
/// model.add_field("rows", "country");
/// model.add_field("rows", "product");
///
/// let constraints = FieldsConstraints::new().with_count_max(1);
/// let errors = validate(&model.role("rows"), &constraints, &StructuralValidator).unwrap_err();
/// assert_eq!(errors.kinds(), vec![ValidationErrorKind::CountAboveMaximum]);
/// ```
pub fn validate(
    model: &dyn MappingModel,
    constraints: &FieldsConstraints,
    base: &dyn BaseValidator,
) -> ValidationResult {
    debug!(
        role = model.role(),
        fields = model.mapped_fields().len(),
        "Validating role mapping"
    );

    if let Err(errors) = base.validate_base(model) {
        debug!(
            role = model.role(),
            errors = errors.len(),
            "Base validation failed, skipping role rules"
        );
        return Err(errors);
    }

    let input = PhaseInput {
        model,
        constraints: constraints.resolve(model),
        context: ValidationContext::new(model.role()),
    };
    trace!(constraints = ?input.constraints, "Resolved constraints");

    let mut errors = ValidationErrors::new();

    for phase in &PHASES {
        let found = (phase.run)(&input);
        trace!(phase = phase.name, errors = found.len(), "Phase completed");

        if found.is_empty() {
            continue;
        }

        errors.extend(found.into());
        if phase.policy == PhasePolicy::Terminal {
            break;
        }
    }

    debug!(role = model.role(), errors = errors.len(), "Role mapping validated");
    errors.into_result()
}

fn check_required(input: &PhaseInput<'_>) -> Vec<ValidationError> {
    let count = input.model.mapped_fields().len();
    if !input.constraints.is_required || count > 0 {
        return Vec::new();
    }

    vec![ValidationError::new(
        ValidationErrorKind::RequiredMissing,
        input.context.child("fields").path,
        format!("Role '{}' is required but has no mapped fields", input.model.role()),
    )
    .with_violation("at least 1 field", "0 fields")]
}

fn check_count_min(input: &PhaseInput<'_>) -> Vec<ValidationError> {
    let count = input.model.mapped_fields().len();
    let min = input.constraints.count_min;
    if count >= min {
        return Vec::new();
    }

    vec![ValidationError::new(
        ValidationErrorKind::CountBelowMinimum,
        input.context.child("fields").path,
        format!(
            "Role '{}' requires at least {} field(s) but has {}",
            input.model.role(),
            min,
            count
        ),
    )
    .with_violation(format!("at least {} field(s)", min), format!("{} field(s)", count))]
}

fn check_count_max(input: &PhaseInput<'_>) -> Vec<ValidationError> {
    let count = input.model.mapped_fields().len();
    let max = match input.constraints.count_max {
        Some(max) if count > max => max,
        _ => return Vec::new(),
    };

    vec![ValidationError::new(
        ValidationErrorKind::CountAboveMaximum,
        input.context.child("fields").path,
        format!(
            "Role '{}' allows at most {} field(s) but has {}",
            input.model.role(),
            max,
            count
        ),
    )
    .with_violation(format!("at most {} field(s)", max), format!("{} field(s)", count))]
}

fn check_content(input: &PhaseInput<'_>) -> Vec<ValidationError> {
    let fields = input.model.mapped_fields();
    let mut errors = Vec::new();

    if fields.is_empty() {
        return errors;
    }

    let fields_ctx = input.context.child("fields");

    match input.model.dataset() {
        None => errors.push(
            ValidationError::new(
                ValidationErrorKind::MissingDataset,
                input.context.path.clone(),
                format!(
                    "Role '{}' maps {} field(s) but the model has no data",
                    input.model.role(),
                    fields.len()
                ),
            )
            .with_violation("a dataset", "no dataset"),
        ),
        Some(dataset) => {
            for (i, field) in fields.iter().enumerate() {
                if !dataset.has_column(&field.name) {
                    errors.push(
                        ValidationError::new(
                            ValidationErrorKind::FieldNotInDataset,
                            fields_ctx.child_index(i).path,
                            format!("Field '{}' is not defined in the model data", field.name),
                        )
                        .with_violation("a column of the model data", field.name.clone()),
                    );
                }
            }
        }
    }

    let mut seen: HashSet<&FieldRef> = HashSet::with_capacity(fields.len());
    for (i, field) in fields.iter().enumerate() {
        if !seen.insert(field) {
            errors.push(
                ValidationError::new(
                    ValidationErrorKind::DuplicateField,
                    fields_ctx.child_index(i).path,
                    format!("Field '{}' is mapped more than once", field.name),
                )
                .with_violation("each field mapped once", format!("repeated '{}'", field.name)),
            );
        }
    }

    errors
}
