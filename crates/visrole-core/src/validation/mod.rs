//! Validation of role mappings against their field constraints
//!
//! - [`base`]: the prerequisite structural check and path context
//! - [`mapping`]: the ordered required/count/content pipeline
//! - [`error`]: violation data returned by both
//!
//! Copyright (c) 2025 Visrole Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod error;
pub mod mapping;

// Re-export commonly used types
pub use base::{BaseValidator, StructuralValidator, ValidationContext};
pub use error::{ValidationError, ValidationErrorKind, ValidationErrors, ValidationResult, Violation};
pub use mapping::{validate, PhasePolicy};
