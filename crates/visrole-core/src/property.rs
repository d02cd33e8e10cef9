//! Role properties and the model types that declare them
//!
//! Copyright (c) 2025 Visrole Team
//! Licensed under the Apache-2.0 license

use crate::constraints::FieldsConstraints;
use crate::error::{Error, Result};
use crate::model::VisualModel;
use crate::validation::{validate, BaseValidator, StructuralValidator, ValidationErrors, ValidationResult};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// A visual role declared on a model type
///
/// The role's [`FieldsConstraints`] are created on first read and the same
/// instance is returned until they are replaced as a whole.
#[derive(Clone)]
pub struct RoleProperty {
    name: String,
    fields: OnceLock<FieldsConstraints>,
    base: Arc<dyn BaseValidator + Send + Sync>,
}

impl RoleProperty {
    /// Declare a role checked by the [`StructuralValidator`]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: OnceLock::new(),
            base: Arc::new(StructuralValidator),
        }
    }

    /// Replace the base validator run ahead of the role rules
    pub fn with_base<B>(mut self, base: B) -> Self
    where
        B: BaseValidator + Send + Sync + 'static,
    {
        self.base = Arc::new(base);
        self
    }

    pub fn with_fields(mut self, fields: FieldsConstraints) -> Self {
        self.set_fields(fields);
        self
    }

    /// Parse a `{fields: {...}}` property specification
    pub fn from_spec(name: impl Into<String>, spec: &Value) -> Result<Self> {
        let name = name.into();
        let path = format!("$.props.{}", name);
        let object = spec.as_object().ok_or_else(|| {
            Error::invalid_configuration(&path, "role property specification must be an object")
        })?;

        let mut property = Self::new(name);
        for (key, value) in object {
            match key.as_str() {
                "fields" => {
                    let fields = FieldsConstraints::from_spec_at(value, &format!("{}.fields", path))?;
                    property.set_fields(fields);
                }
                other => {
                    return Err(Error::invalid_configuration(
                        format!("{}.{}", path, other),
                        format!("unknown role property attribute '{}'", other),
                    ));
                }
            }
        }

        Ok(property)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The role's constraints
    pub fn fields(&self) -> &FieldsConstraints {
        self.fields.get_or_init(FieldsConstraints::default)
    }

    /// Replace the constraints; settings not given in `fields` revert to unset
    pub fn set_fields(&mut self, fields: FieldsConstraints) {
        self.fields = OnceLock::from(fields);
    }

    /// Replace the constraints from a specification
    ///
    /// On error the current constraints are left untouched.
    pub fn set_fields_spec(&mut self, spec: &Value) -> Result<()> {
        let fields = FieldsConstraints::from_spec_at(spec, &format!("$.props.{}.fields", self.name))?;
        self.set_fields(fields);
        Ok(())
    }

    /// Validate this role's mapping in `model`
    pub fn validate_on(&self, model: &VisualModel) -> ValidationResult {
        validate(&model.role(&self.name), self.fields(), self.base.as_ref())
    }

    /// Serialize to a property specification; `fields` is omitted when empty
    pub fn to_spec(&self) -> Value {
        let mut spec = Map::new();
        let fields = self.fields();
        if !fields.is_empty() {
            spec.insert("fields".to_string(), fields.to_spec());
        }
        Value::Object(spec)
    }
}

impl fmt::Debug for RoleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleProperty")
            .field("name", &self.name)
            .field("fields", &self.fields.get())
            .finish_non_exhaustive()
    }
}

/// A visual model type: the roles it declares, in declaration order
///
/// ```rust
/// use visrole_core::{ModelType, VisualModel};
/// use serde_json::json;
///
/// let model_type = ModelType::from_spec(&json!({
///     "props": {"rows": {"fields": {"isRequired": true}}}
/// })).unwrap();
///
/// let errors = model_type.validate(&VisualModel::default()).unwrap_err();
/// assert_eq!(errors.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelType {
    props: Vec<RoleProperty>,
}

impl ModelType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a role, replacing any role of the same name in place
    pub fn with_role(mut self, property: RoleProperty) -> Self {
        match self.props.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.props.push(property),
        }
        self
    }

    /// Parse a `{props: {role: {...}}}` model type specification
    pub fn from_spec(spec: &Value) -> Result<Self> {
        let object = spec
            .as_object()
            .ok_or_else(|| Error::invalid_configuration("$", "model type specification must be an object"))?;

        let mut model_type = Self::new();
        for (key, value) in object {
            match key.as_str() {
                "props" => {
                    let props = value.as_object().ok_or_else(|| {
                        Error::invalid_configuration("$.props", "props must be an object of role properties")
                    })?;
                    for (name, prop_spec) in props {
                        model_type = model_type.with_role(RoleProperty::from_spec(name.as_str(), prop_spec)?);
                    }
                }
                other => {
                    return Err(Error::invalid_configuration(
                        format!("$.{}", other),
                        format!("unknown model type attribute '{}'", other),
                    ));
                }
            }
        }

        debug!(roles = model_type.props.len(), "Model type loaded");
        Ok(model_type)
    }

    pub fn get(&self, name: &str) -> Option<&RoleProperty> {
        self.props.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut RoleProperty> {
        self.props.iter_mut().find(|p| p.name == name)
    }

    /// Like [`ModelType::get`], failing with [`Error::UnknownRole`]
    pub fn role(&self, name: &str) -> Result<&RoleProperty> {
        self.get(name).ok_or_else(|| Error::UnknownRole {
            name: name.to_string(),
        })
    }

    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.props.iter().map(|p| p.name())
    }

    pub fn roles(&self) -> &[RoleProperty] {
        &self.props
    }

    /// Validate every declared role, concatenating errors in declaration order
    pub fn validate(&self, model: &VisualModel) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        for property in &self.props {
            if let Err(role_errors) = property.validate_on(model) {
                errors.extend(role_errors);
            }
        }
        errors.into_result()
    }

    pub fn to_spec(&self) -> Value {
        let props: Map<String, Value> = self
            .props
            .iter()
            .map(|p| (p.name.clone(), p.to_spec()))
            .collect();
        serde_json::json!({ "props": props })
    }
}
