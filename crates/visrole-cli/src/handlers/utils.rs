//! Shared utilities for command handlers

use crate::config::{is_yaml, Config};
use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use visrole_core::{ModelType, VisualModel};

/// Read a JSON or YAML document, chosen by file extension
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "YAML parse failed");
            Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "YAML".to_string(),
            }
        })
    } else {
        serde_json::from_str(&content).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "JSON parse failed");
            Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "JSON".to_string(),
            }
        })
    }
}

/// Pick the model type file from `--type`, falling back to the configured default
pub fn resolve_type_path(arg: Option<&Path>, config: &Config) -> Result<PathBuf> {
    arg.map(Path::to_path_buf)
        .or_else(|| config.default_type.clone())
        .ok_or_else(|| {
            Error::invalid_args("no model type given; pass --type or set default_type in the configuration")
        })
}

/// Load a model type declaring the roles and their constraints
pub fn load_model_type(path: &Path) -> Result<ModelType> {
    let spec = load_document(path)?;
    let model_type = ModelType::from_spec(&spec)?;
    tracing::debug!(
        path = %path.display(),
        roles = model_type.roles().len(),
        "Loaded model type"
    );
    Ok(model_type)
}

/// Load a visual model with its data and role mappings
pub fn load_model(path: &Path) -> Result<VisualModel> {
    let spec = load_document(path)?;
    Ok(VisualModel::from_spec(&spec)?)
}
