//! Validate command handler

use super::utils;
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde::Serialize;
use visrole_core::ValidationError;

/// Machine-readable outcome of a validate run
#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    model: String,
    model_type: String,
    valid: bool,
    roles: Vec<&'a str>,
    errors: &'a [ValidationError],
}

/// Handle the validate command
///
/// Any violation makes the command fail with [`Error::InvalidModel`], after
/// the violations have been written in the selected format.
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("validate", &args.model.display().to_string());
    let type_path = utils::resolve_type_path(args.model_type.as_deref(), config)?;

    output.info(&format!(
        "Validating {} against {}",
        args.model.display(),
        type_path.display()
    ))?;

    let model_type = utils::load_model_type(&type_path)?;
    let model = utils::load_model(&args.model)?;
    output.debug(&format!(
        "Model type declares {} role(s)",
        model_type.roles().len()
    ))?;

    let result = model_type.validate(&model);
    let errors = result.as_ref().err().map_or(&[][..], |e| e.errors.as_slice());

    tracing::info!(
        valid = errors.is_empty(),
        errors = errors.len(),
        duration_ms = timer.elapsed().as_millis() as u64,
        "Validation finished"
    );

    if output.is_human() {
        match &result {
            Ok(()) => output.success(&format!(
                "✓ {} is valid ({} role(s) checked)",
                args.model.display(),
                model_type.roles().len()
            ))?,
            Err(violations) => {
                output.validation_errors(violations, args.detailed || config.output.show_violations)?
            }
        }
    } else {
        let report = ValidationReport {
            model: args.model.display().to_string(),
            model_type: type_path.display().to_string(),
            valid: errors.is_empty(),
            roles: model_type.role_names().collect(),
            errors,
        };
        output.data(&report)?;
    }

    match result {
        Ok(()) => Ok(()),
        Err(violations) => Err(Error::InvalidModel {
            count: violations.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::{tempdir, TempDir};

    const TYPE: &str = r#"{
        "props": {
            "rows": {"fields": {"isRequired": true}},
            "measures": {"fields": {"countMin": 1, "countMax": 1}}
        }
    }"#;

    const DATA: &str = r#"{
        "model": [
            {"name": "country", "type": "string"},
            {"name": "sales", "type": "number"}
        ],
        "rows": [{"c": ["Portugal", 100]}]
    }"#;

    fn write_files(mapping: &str) -> (TempDir, PathBuf, PathBuf) {
        let dir = tempdir().unwrap();
        let type_path = dir.path().join("type.json");
        fs::write(&type_path, TYPE).unwrap();

        let model_path = dir.path().join("model.json");
        fs::write(&model_path, format!(r#"{{"data": {}, {}}}"#, DATA, mapping)).unwrap();
        (dir, type_path, model_path)
    }

    fn run(model: &Path, model_type: Option<&Path>, format: OutputFormat) -> Result<()> {
        let args = ValidateArgs {
            model: model.to_path_buf(),
            model_type: model_type.map(Path::to_path_buf),
            detailed: true,
        };
        let mut output = OutputWriter::with_writer(format, false, false, 0, Box::new(Vec::new()));
        handle_validate(args, &Config::default(), &mut output)
    }

    #[test]
    fn test_valid_model() {
        let (_dir, type_path, model_path) = write_files(
            r#""rows": {"fields": ["country"]}, "measures": {"fields": ["sales"]}"#,
        );
        assert!(run(&model_path, Some(&type_path), OutputFormat::Human).is_ok());
    }

    #[test]
    fn test_invalid_model_counts_violations() {
        let (_dir, type_path, model_path) = write_files(
            r#""measures": {"fields": ["sales", "sales", "region"]}"#,
        );

        // rows is required; measures has too many fields, an unknown one and a duplicate
        let err = run(&model_path, Some(&type_path), OutputFormat::Json).unwrap_err();
        assert!(matches!(err, Error::InvalidModel { count: 4 }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_type_comes_from_config() {
        let (_dir, type_path, model_path) = write_files(
            r#""rows": {"fields": ["country"]}, "measures": {"fields": ["sales"]}"#,
        );
        let config = Config {
            default_type: Some(type_path),
            ..Config::default()
        };
        let args = ValidateArgs {
            model: model_path,
            model_type: None,
            detailed: false,
        };
        let mut output =
            OutputWriter::with_writer(OutputFormat::Yaml, false, false, 0, Box::new(Vec::new()));
        assert!(handle_validate(args, &config, &mut output).is_ok());
    }

    #[test]
    fn test_missing_type_is_an_argument_error() {
        let (_dir, _type_path, model_path) = write_files(r#""rows": {"fields": []}"#);
        let err = run(&model_path, None, OutputFormat::Human).unwrap_err();
        assert!(matches!(err, Error::InvalidArgs(_)));
    }
}
