//! Field-count and required-ness constraints of a visual role
//!
//! A [`FieldsConstraints`] holds up to four settings. Each is either unset
//! (reads as its default) or set to a [`Dynamic`] value that is fixed or
//! computed from the model being validated.
//!
//! Copyright (c) 2025 Visrole Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::model::MappingModel;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A function computing a constraint value from the model being validated
pub type Resolver<T> = Arc<dyn Fn(&dyn MappingModel) -> T + Send + Sync>;

/// A constraint value that is either fixed or resolved per model
#[derive(Clone)]
pub enum Dynamic<T> {
    Fixed(T),
    Resolved(Resolver<T>),
}

impl<T> Dynamic<T> {
    /// Wrap a resolver function
    pub fn resolved<F>(f: F) -> Self
    where
        F: Fn(&dyn MappingModel) -> T + Send + Sync + 'static,
    {
        Dynamic::Resolved(Arc::new(f))
    }

    /// The value, when it does not depend on the model
    pub fn as_fixed(&self) -> Option<&T> {
        match self {
            Dynamic::Fixed(value) => Some(value),
            Dynamic::Resolved(_) => None,
        }
    }
}

impl<T: Clone> Dynamic<T> {
    /// Compute the concrete value for `model`
    pub fn resolve(&self, model: &dyn MappingModel) -> T {
        match self {
            Dynamic::Fixed(value) => value.clone(),
            Dynamic::Resolved(f) => f(model),
        }
    }
}

impl<T: PartialEq> Dynamic<T> {
    /// Fixed values compare by value, resolvers by identity
    pub fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Dynamic::Fixed(a), Dynamic::Fixed(b)) => a == b,
            (Dynamic::Resolved(a), Dynamic::Resolved(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T> From<T> for Dynamic<T> {
    fn from(value: T) -> Self {
        Dynamic::Fixed(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Dynamic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Dynamic::Resolved(_) => f.write_str("Resolved(<fn>)"),
        }
    }
}

/// Constraints on the fields mapped to a role
///
/// ```rust
/// use visrole_core::{Dynamic, FieldsConstraints};
///
/// let constraints = FieldsConstraints::new()
///     .with_is_required(true)
///     .with_count_max(Dynamic::resolved(|_| 3));
///
/// assert!(constraints.is_required().is_some());
/// assert!(constraints.count_min().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldsConstraints {
    is_required: Option<Dynamic<bool>>,
    count_min: Option<Dynamic<usize>>,
    count_max: Option<Dynamic<usize>>,
    count_range_on: Option<Value>,
}

impl FieldsConstraints {
    /// Specification keys, in serialization order
    pub const KEYS: [&'static str; 4] = ["isRequired", "countMin", "countMax", "countRangeOn"];

    /// Constraints with every setting unset
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_is_required(mut self, value: impl Into<Dynamic<bool>>) -> Self {
        self.is_required = Some(value.into());
        self
    }

    pub fn with_count_min(mut self, value: impl Into<Dynamic<usize>>) -> Self {
        self.count_min = Some(value.into());
        self
    }

    pub fn with_count_max(mut self, value: impl Into<Dynamic<usize>>) -> Self {
        self.count_max = Some(value.into());
        self
    }

    /// Reserved setting; carried through specifications but never evaluated
    pub fn with_count_range_on(mut self, value: Value) -> Self {
        self.count_range_on = Some(value);
        self
    }

    pub fn is_required(&self) -> Option<&Dynamic<bool>> {
        self.is_required.as_ref()
    }

    pub fn count_min(&self) -> Option<&Dynamic<usize>> {
        self.count_min.as_ref()
    }

    pub fn count_max(&self) -> Option<&Dynamic<usize>> {
        self.count_max.as_ref()
    }

    pub fn count_range_on(&self) -> Option<&Value> {
        self.count_range_on.as_ref()
    }

    /// Whether no setting has been given a value
    pub fn is_empty(&self) -> bool {
        self.is_required.is_none()
            && self.count_min.is_none()
            && self.count_max.is_none()
            && self.count_range_on.is_none()
    }

    /// Resolve every setting against `model`, applying defaults for unset ones
    pub fn resolve(&self, model: &dyn MappingModel) -> ResolvedConstraints {
        ResolvedConstraints {
            is_required: self
                .is_required
                .as_ref()
                .map(|v| v.resolve(model))
                .unwrap_or(false),
            count_min: self.count_min.as_ref().map(|v| v.resolve(model)).unwrap_or(0),
            count_max: self.count_max.as_ref().map(|v| v.resolve(model)),
        }
    }

    /// Parse a `{isRequired, countMin, countMax, countRangeOn}` specification
    ///
    /// Keys that are absent or `null` stay unset. Any other key, or a value
    /// of the wrong type, rejects the whole specification.
    pub fn from_spec(spec: &Value) -> Result<Self> {
        Self::from_spec_at(spec, "$.fields")
    }

    pub(crate) fn from_spec_at(spec: &Value, path: &str) -> Result<Self> {
        let object = spec.as_object().ok_or_else(|| {
            Error::invalid_configuration(
                path,
                format!("fields constraints must be an object, found {}", type_name(spec)),
            )
        })?;

        let mut constraints = Self::new();

        for (key, value) in object {
            let key_path = format!("{}.{}", path, key);
            if value.is_null() && Self::KEYS.contains(&key.as_str()) {
                continue;
            }

            match key.as_str() {
                "isRequired" => {
                    let flag = value.as_bool().ok_or_else(|| {
                        Error::invalid_configuration(
                            &key_path,
                            format!("expected a boolean, found {}", type_name(value)),
                        )
                    })?;
                    constraints.is_required = Some(Dynamic::Fixed(flag));
                }
                "countMin" => {
                    constraints.count_min = Some(Dynamic::Fixed(parse_count(value, &key_path)?));
                }
                "countMax" => {
                    constraints.count_max = Some(Dynamic::Fixed(parse_count(value, &key_path)?));
                }
                "countRangeOn" => {
                    constraints.count_range_on = Some(value.clone());
                }
                other => {
                    return Err(Error::invalid_configuration(
                        &key_path,
                        format!(
                            "unknown fields constraint '{}', expected one of: {}",
                            other,
                            Self::KEYS.join(", ")
                        ),
                    ));
                }
            }
        }

        Ok(constraints)
    }

    /// Serialize the set, fixed settings back to a specification
    ///
    /// Resolver functions have no data representation and are left out.
    pub fn to_spec(&self) -> Value {
        let mut spec = Map::new();

        if let Some(flag) = self.is_required.as_ref().and_then(Dynamic::as_fixed) {
            spec.insert("isRequired".to_string(), Value::Bool(*flag));
        }
        if let Some(min) = self.count_min.as_ref().and_then(Dynamic::as_fixed) {
            spec.insert("countMin".to_string(), Value::from(*min as u64));
        }
        if let Some(max) = self.count_max.as_ref().and_then(Dynamic::as_fixed) {
            spec.insert("countMax".to_string(), Value::from(*max as u64));
        }
        if let Some(range_on) = &self.count_range_on {
            spec.insert("countRangeOn".to_string(), range_on.clone());
        }

        Value::Object(spec)
    }
}

fn parse_count(value: &Value, path: &str) -> Result<usize> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            Error::invalid_configuration(
                path,
                format!("expected a non-negative integer, found {}", value),
            )
        })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Constraint values resolved for one validation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedConstraints {
    pub is_required: bool,
    pub count_min: usize,
    /// `None` means unbounded
    pub count_max: Option<usize>,
}

impl Default for ResolvedConstraints {
    fn default() -> Self {
        Self {
            is_required: false,
            count_min: 0,
            count_max: None,
        }
    }
}

impl ResolvedConstraints {
    /// Whether `count` lies within `[count_min, count_max]`
    pub fn admits(&self, count: usize) -> bool {
        count >= self.count_min && self.count_max.map_or(true, |max| count <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VisualModel;
    use serde_json::json;

    #[test]
    fn test_defaults_when_unset() {
        let model = VisualModel::default();
        let resolved = FieldsConstraints::new().resolve(&model.role("rows"));
        assert_eq!(resolved, ResolvedConstraints::default());
        assert!(resolved.admits(0));
        assert!(resolved.admits(usize::MAX));
    }

    #[test]
    fn test_resolver_sees_model() {
        let mut model = VisualModel::default();
        model.add_field("rows", "a");
        model.add_field("rows", "b");

        let constraints = FieldsConstraints::new()
            .with_count_max(Dynamic::resolved(|m| m.mapped_fields().len() - 1));
        let resolved = constraints.resolve(&model.role("rows"));
        assert_eq!(resolved.count_max, Some(1));
        assert!(!resolved.admits(2));
    }

    #[test]
    fn test_as_fixed_without_clone() {
        #[derive(Debug, PartialEq)]
        struct Label(&'static str);

        let fixed = Dynamic::Fixed(Label("sales"));
        assert_eq!(fixed.as_fixed(), Some(&Label("sales")));

        let resolved: Dynamic<Label> = Dynamic::resolved(|_| Label("sales"));
        assert!(resolved.as_fixed().is_none());
    }

    #[test]
    fn test_is_same() {
        let f: Dynamic<bool> = Dynamic::resolved(|_| true);
        let g: Dynamic<bool> = Dynamic::resolved(|_| true);
        assert!(f.is_same(&f.clone()));
        assert!(!f.is_same(&g));
        assert!(Dynamic::Fixed(2usize).is_same(&Dynamic::Fixed(2)));
        assert!(!Dynamic::Fixed(true).is_same(&f));
    }

    #[test]
    fn test_from_spec_sets_only_given_keys() {
        let constraints = FieldsConstraints::from_spec(&json!({"countMin": 2})).unwrap();
        assert!(constraints.is_required().is_none());
        assert!(constraints.count_max().is_none());
        assert_eq!(constraints.count_min().and_then(Dynamic::as_fixed), Some(&2));
    }

    #[test]
    fn test_from_spec_null_is_unset() {
        let constraints =
            FieldsConstraints::from_spec(&json!({"countMax": null, "isRequired": true})).unwrap();
        assert!(constraints.count_max().is_none());
        assert_eq!(constraints.is_required().and_then(Dynamic::as_fixed), Some(&true));
    }

    #[test]
    fn test_from_spec_rejects_malformed() {
        for spec in [
            json!(true),
            json!(["isRequired"]),
            json!({"isRequired": "yes"}),
            json!({"countMin": -1}),
            json!({"countMax": 1.5}),
            json!({"levels": 2}),
        ] {
            let err = FieldsConstraints::from_spec(&spec).unwrap_err();
            assert!(err.is_configuration(), "{} should be rejected", spec);
        }
    }

    #[test]
    fn test_to_spec_skips_resolvers() {
        let constraints = FieldsConstraints::new()
            .with_is_required(Dynamic::resolved(|_| true))
            .with_count_min(1)
            .with_count_range_on(json!(true));
        assert_eq!(
            constraints.to_spec(),
            json!({"countMin": 1, "countRangeOn": true})
        );
    }

    #[test]
    fn test_spec_round_trip() {
        let spec = json!({"isRequired": true, "countMin": 1, "countMax": 2});
        let constraints = FieldsConstraints::from_spec(&spec).unwrap();
        assert_eq!(constraints.to_spec(), spec);
    }
}
