//! Shared test support utilities for integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use visrole_core::{FieldsConstraints, ModelType, RoleMapping, RoleProperty, Table, VisualModel};

/// Name of the role most tests map fields to
pub const ROLE: &str = "propRole";

/// Table spec with `country`, `product`, `sales` and `date` columns
pub fn sales_data_spec() -> Value {
    json!({
        "model": [
            {"name": "country", "type": "string", "label": "Country"},
            {"name": "product", "type": "string", "label": "Product"},
            {"name": "sales", "type": "number", "label": "Sales"},
            {"name": "date", "type": "date", "label": "Date"}
        ],
        "rows": [
            {"c": ["Portugal", "fish", 100, "2016-01-01"]},
            {"c": ["Ireland", "beer", 200, "2016-01-02"]}
        ]
    })
}

pub fn sales_table() -> Table {
    Table::from_spec(&sales_data_spec()).expect("sales table spec is valid")
}

/// A model over the sales table with `fields` mapped to [`ROLE`]
pub fn model_with_fields(fields: &[&str]) -> VisualModel {
    let mut model = VisualModel::new(Some(sales_table()));
    if !fields.is_empty() {
        model = model.with_mapping(ROLE, RoleMapping::new(fields.iter().copied()));
    }
    model
}

/// A model type declaring [`ROLE`] with the given constraints
pub fn role_type(fields: FieldsConstraints) -> ModelType {
    ModelType::new().with_role(RoleProperty::new(ROLE).with_fields(fields))
}

/// The `country, product` mapping over the sales table, asserted valid
pub fn full_valid_qualitative_mapping() -> (ModelType, VisualModel) {
    let model_type = role_type(FieldsConstraints::new());
    let model = model_with_fields(&["country", "product"]);
    assert_eq!(model_type.validate(&model), Ok(()));
    (model_type, model)
}
