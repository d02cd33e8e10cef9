//! Visrole Core - Field-mapping constraint validation for visual roles
//!
//! A visual role (rows, columns, color, size, ...) is mapped to zero or more
//! fields of a dataset. This crate checks such a mapping against the role's
//! constraints and reports every violation it finds.
//!
//! ## Features
//!
//! - **Constraint descriptors**: `isRequired`, `countMin`, `countMax` as fixed
//!   values or per-model resolver functions
//! - **Ordered validation**: base structural check, then required-ness, then
//!   count bounds, then dataset and duplicate checks
//! - **Accumulated reporting**: count and content violations are collected
//!   together rather than one at a time
//! - **Specifications**: model types, models and tables load from JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use visrole_core::{ModelType, VisualModel};
//! use serde_json::json;
//!
//! let model_type = ModelType::from_spec(&json!({
//!     "props": {"rows": {"fields": {"countMin": 2}}}
//! })).unwrap();
//!
//! let model = VisualModel::from_spec(&json!({
//!     "data": {
//!         "model": [
//!             {"name": "country", "type": "string"},
//!             {"name": "product", "type": "string"}
//!         ],
//!         "rows": [{"c": ["Portugal", "fish"]}]
//!     },
//!     "rows": {"fields": ["country", "product"]}
//! })).unwrap();
//!
//! assert!(model_type.validate(&model).is_ok());
//! ```
//!
//! ## Validation Order
//!
//! 1. Base validation; its errors are returned alone
//! 2. Required-ness; a required role without fields reports alone
//! 3. `countMin`, 4. `countMax`, 5. dataset presence, field existence and
//!    duplicates, all accumulated
//!
//! Copyright (c) 2025 Visrole Team
//! Licensed under the Apache-2.0 license

pub mod constraints;
pub mod data;
pub mod error;
pub mod model;
pub mod property;
pub mod validation;

// Re-export commonly used types for convenience
pub use constraints::{Dynamic, FieldsConstraints, ResolvedConstraints, Resolver};
pub use data::{Column, ColumnType, Dataset, Row, Table};
pub use error::{Error, Result};
pub use model::{FieldRef, MappingModel, RoleBinding, RoleMapping, VisualModel};
pub use property::{ModelType, RoleProperty};
pub use validation::{
    validate, BaseValidator, PhasePolicy, StructuralValidator, ValidationContext, ValidationError,
    ValidationErrorKind, ValidationErrors, ValidationResult, Violation,
};
