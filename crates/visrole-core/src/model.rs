//! Visual models: role mappings plus the data they are mapped onto
//!
//! Copyright (c) 2025 Visrole Team
//! Licensed under the Apache-2.0 license

use crate::data::{Dataset, Table};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// A reference from a role to one data field
///
/// Equality and hashing only consider `name`, so a clone with a different
/// label is still the same field.
///
/// A mapping element that is neither a string nor an object still loads,
/// as a nameless reference keeping the original value in `malformed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "FieldRefSpec")]
pub struct FieldRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip)]
    pub malformed: Option<Value>,
}

impl FieldRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            malformed: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether this reference was loaded from an unrecognized value
    pub fn is_malformed(&self) -> bool {
        self.malformed.is_some()
    }
}

impl PartialEq for FieldRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for FieldRef {}

impl Hash for FieldRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl From<&str> for FieldRef {
    fn from(name: &str) -> Self {
        FieldRef::new(name)
    }
}

/// Accepted spellings of a field reference: `"name"` or `{"name": ..., "label": ...}`
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldRefSpec {
    Name(String),
    Object {
        #[serde(default)]
        name: String,
        #[serde(default)]
        label: Option<String>,
    },
    Invalid(Value),
}

impl From<FieldRefSpec> for FieldRef {
    fn from(spec: FieldRefSpec) -> Self {
        match spec {
            FieldRefSpec::Name(name) => FieldRef::new(name),
            FieldRefSpec::Object { name, label } => FieldRef {
                name,
                label,
                malformed: None,
            },
            FieldRefSpec::Invalid(value) => FieldRef {
                malformed: Some(value),
                ..FieldRef::default()
            },
        }
    }
}

/// The fields mapped to one visual role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleMapping {
    #[serde(default)]
    pub fields: Vec<FieldRef>,
}

impl RoleMapping {
    pub fn new<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldRef>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.fields.len()
    }
}

/// What the mapping validator reads from a model for one role
pub trait MappingModel {
    /// Name of the role being validated, used in error paths
    fn role(&self) -> &str;

    /// The fields currently mapped to the role
    fn mapped_fields(&self) -> &[FieldRef];

    /// The data the fields must exist in, if the model has any
    fn dataset(&self) -> Option<&dyn Dataset>;
}

/// A visualization model: optional data plus one mapping per role
///
/// Roles are spelled as top-level keys next to `data`:
///
/// ```rust
/// use visrole_core::VisualModel;
/// use serde_json::json;
///
/// let model = VisualModel::from_spec(&json!({
///     "data": {"model": [{"name": "country", "type": "string"}], "rows": []},
///     "rows": {"fields": ["country"]}
/// })).unwrap();
///
/// assert_eq!(model.mapping("rows").unwrap().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualModel {
    #[serde(default)]
    pub data: Option<Table>,
    #[serde(flatten)]
    pub roles: BTreeMap<String, RoleMapping>,
}

impl VisualModel {
    /// Create an empty model over the given data
    pub fn new(data: Option<Table>) -> Self {
        Self {
            data,
            roles: BTreeMap::new(),
        }
    }

    /// Build a model from its JSON specification
    pub fn from_spec(spec: &Value) -> Result<Self> {
        if !spec.is_object() {
            return Err(Error::invalid_configuration(
                "$",
                "model specification must be an object",
            ));
        }

        let model: VisualModel = serde_json::from_value(spec.clone()).map_err(|e| {
            Error::invalid_configuration_with_source("$", "invalid model specification", e)
        })?;

        if let Some(data) = &model.data {
            data.check_rows()?;
        }

        Ok(model)
    }

    /// Set a role's mapping, replacing any previous one
    pub fn with_mapping(mut self, role: impl Into<String>, mapping: RoleMapping) -> Self {
        self.roles.insert(role.into(), mapping);
        self
    }

    pub fn set_data(&mut self, data: Table) {
        self.data = Some(data);
    }

    pub fn clear_data(&mut self) {
        self.data = None;
    }

    pub fn mapping(&self, role: &str) -> Option<&RoleMapping> {
        self.roles.get(role)
    }

    /// Mutable access to a role's mapping, creating an empty one if needed
    pub fn mapping_mut(&mut self, role: &str) -> &mut RoleMapping {
        self.roles.entry(role.to_string()).or_default()
    }

    /// Append a field to a role's mapping
    pub fn add_field(&mut self, role: &str, field: impl Into<FieldRef>) {
        self.mapping_mut(role).fields.push(field.into());
    }

    /// View this model through a single role
    pub fn role<'a>(&'a self, role: &'a str) -> RoleBinding<'a> {
        RoleBinding { model: self, role }
    }
}

/// A [`VisualModel`] seen through one of its roles
#[derive(Debug, Clone, Copy)]
pub struct RoleBinding<'a> {
    model: &'a VisualModel,
    role: &'a str,
}

impl MappingModel for RoleBinding<'_> {
    fn role(&self) -> &str {
        self.role
    }

    fn mapped_fields(&self) -> &[FieldRef] {
        self.model
            .mapping(self.role)
            .map(|m| m.fields.as_slice())
            .unwrap_or(&[])
    }

    fn dataset(&self) -> Option<&dyn Dataset> {
        self.model.data.as_ref().map(|t| t as &dyn Dataset)
    }
}
