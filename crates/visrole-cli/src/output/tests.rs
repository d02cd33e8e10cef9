// Tests for output formatting
//
// These tests cover the human rendering of validation errors, the
// machine formats, and the table writer.

use super::*;
use std::cell::RefCell;
use std::rc::Rc;
use visrole_core::ValidationErrorKind;

/// Writer that keeps what was written so tests can read it back
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, quiet, 0, Box::new(buffer.clone()));
    (writer, buffer)
}

fn sample_errors() -> ValidationErrors {
    ValidationErrors::from(vec![
        ValidationError::new(
            ValidationErrorKind::CountAboveMaximum,
            "measures.fields",
            "Role 'measures' has 2 mapped fields but at most 1 is allowed",
        )
        .with_violation("at most 1 field(s)", "2 field(s)"),
        ValidationError::new(
            ValidationErrorKind::DuplicateField,
            "measures.fields[1]",
            "Field 'sales' is mapped more than once",
        ),
    ])
}

#[test]
fn test_validation_errors_formatting_human() {
    let formatted = format_validation_errors_human(&sample_errors(), true);
    assert!(formatted.contains("❌ Validation Failed - 2 Error(s)"));
    assert!(formatted.contains("1. 📍 Path: measures.fields\n"));
    assert!(formatted.contains("💬 Message: Field 'sales' is mapped more than once"));
    assert!(formatted.contains("• Rule: count_max"));
    assert!(formatted.contains("Expected: at most 1 field(s)"));
    assert!(formatted.contains("Actual: 2 field(s)"));
    assert!(formatted.contains("• Rule: unique_field"));
}

#[test]
fn test_validation_errors_without_details() {
    let formatted = format_validation_errors_human(&sample_errors(), false);
    assert!(formatted.contains("📍 Path: measures.fields[1]"));
    assert!(!formatted.contains("• Rule:"));
}

#[test]
fn test_validation_errors_machine_formats() {
    let errors = sample_errors();

    let json = OutputFormat::Json.format_validation_errors(&errors, false).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["errors"][0]["kind"], "count_above_maximum");
    assert_eq!(parsed["errors"][0]["violation"]["rule"], "count_max");
    assert!(parsed["errors"][1].get("violation").is_none());

    let yaml = OutputFormat::Yaml.format_validation_errors(&errors, true).unwrap();
    assert!(yaml.contains("kind: duplicate_field"));
}

#[test]
fn test_output_writer_creation() {
    let writer = OutputWriter::new(OutputFormat::Human, true, false, 1);
    assert!(writer.is_verbose());
    assert!(writer.is_human());
}

#[test]
fn test_quiet_suppresses_messages() {
    let (mut output, buffer) = writer(OutputFormat::Human, true);
    output.info("loading").unwrap();
    output.success("valid").unwrap();
    output.section("Roles").unwrap();
    assert_eq!(buffer.contents(), "");

    output.warning("no roles").unwrap();
    assert_eq!(buffer.contents(), "WARNING: no roles\n");
}

#[test]
fn test_machine_formats_skip_messages() {
    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output.info("loading").unwrap();
    output.warning("careful").unwrap();
    output.data(&serde_json::json!({"valid": true})).unwrap();
    assert_eq!(buffer.contents(), "{\"valid\":true}\n");
}

#[test]
fn test_table_alignment() {
    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output
        .table(
            &["Role", "Min"],
            vec![
                vec!["rows".to_string(), "0".to_string()],
                vec!["measures".to_string(), "1".to_string()],
            ],
        )
        .unwrap();

    let lines: Vec<String> = buffer.contents().lines().map(str::to_string).collect();
    assert_eq!(lines[0], "Role     │ Min");
    assert_eq!(lines[1], "─────────┼────");
    assert_eq!(lines[2], "rows     │ 0");
    assert_eq!(lines[3], "measures │ 1");
}
