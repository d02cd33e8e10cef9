//! Describe command handler

use super::utils;
use crate::cli::DescribeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use std::fmt::Display;
use visrole_core::{Dynamic, RoleProperty};

const TABLE_HEADERS: [&str; 5] = ["Role", "Required", "Min", "Max", "Range on"];

/// Handle the describe command
///
/// Human output is a table of the effective constraints; the machine
/// formats write the model type back as its specification.
pub fn handle_describe(args: DescribeArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let type_path = utils::resolve_type_path(args.model_type.as_deref(), config)?;
    let model_type = utils::load_model_type(&type_path)?;

    if !output.is_human() {
        return output.data(&model_type.to_spec());
    }

    output.section(&format!("Roles of {}", type_path.display()))?;
    if model_type.roles().is_empty() {
        return output.warning("The model type declares no roles");
    }

    let rows = model_type.roles().iter().map(describe_role).collect();
    output.table(&TABLE_HEADERS, rows)
}

/// One table row; unset settings show their default in parentheses
fn describe_role(property: &RoleProperty) -> Vec<String> {
    let fields = property.fields();
    vec![
        property.name().to_string(),
        describe_setting(fields.is_required(), "(false)"),
        describe_setting(fields.count_min(), "(0)"),
        describe_setting(fields.count_max(), "(none)"),
        fields
            .count_range_on()
            .map_or_else(|| "-".to_string(), |v| v.to_string()),
    ]
}

fn describe_setting<T: Display>(value: Option<&Dynamic<T>>, default: &str) -> String {
    match value {
        None => default.to_string(),
        Some(dynamic) => dynamic
            .as_fixed()
            .map_or_else(|| "resolved".to_string(), ToString::to_string),
    }
}
