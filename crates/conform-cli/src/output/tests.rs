// Tests for output formatting
//
// These tests cover the human and machine renderings of validation
// reports and coerced values, plus the writer's quiet and format gating.

use super::*;
use std::sync::{Arc, Mutex};

/// Writer that keeps everything written to it for inspection
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, Captured) {
    let captured = Captured::default();
    let writer = OutputWriter::with_writer(format, false, quiet, 0, Box::new(captured.clone()));
    (writer, captured)
}

fn sample_report() -> ValidationReport {
    ValidationReport::new(
        "optimized",
        vec![
            InputReport {
                input: "good.json".to_string(),
                result: ValidationResult::success(),
            },
            InputReport {
                input: "bad.json".to_string(),
                result: ValidationResult::from_errors(vec![
                    "address.city is required".to_string(),
                    "age must be at least 18".to_string(),
                ]),
            },
        ],
    )
}

#[test]
fn test_report_validity_and_counts() {
    let report = sample_report();
    assert!(!report.valid);
    assert_eq!(report.invalid_count(), 1);

    let all_good = ValidationReport::new(
        "reference",
        vec![InputReport {
            input: "a.json".to_string(),
            result: ValidationResult::success(),
        }],
    );
    assert!(all_good.valid);
}

#[test]
fn test_validation_report_formatting_human() {
    let formatted = format_validation_report_human(&sample_report());

    assert!(formatted.contains("✓ good.json"));
    assert!(formatted.contains("✗ bad.json (2 error(s))"));
    assert!(formatted.contains("  • address.city is required"));
    assert!(formatted.contains("  • age must be at least 18"));
    assert!(formatted.ends_with("1 of 2 input(s) valid (optimized engine)"));
}

#[test]
fn test_validation_report_formatting_json() {
    let formatted = OutputFormat::Json
        .format_validation_report(&sample_report())
        .unwrap();
    let value: Value = serde_json::from_str(&formatted).unwrap();

    assert_eq!(value["engine"], "optimized");
    assert_eq!(value["valid"], false);
    assert_eq!(value["inputs"][0]["input"], "good.json");
    assert_eq!(value["inputs"][0]["valid"], true);
    assert_eq!(value["inputs"][1]["errors"][0], "address.city is required");
}

#[test]
fn test_validation_report_formatting_yaml() {
    let formatted = OutputFormat::Yaml
        .format_validation_report(&sample_report())
        .unwrap();
    assert!(formatted.contains("engine: optimized"));
    assert!(formatted.contains("- address.city is required"));
}

#[test]
fn test_coercion_formatting() {
    let report = CoercionReport {
        input: serde_json::json!("550E8400E29B41D4A716446655440000"),
        target: "string".to_string(),
        format: Some("uuid".to_string()),
        value: serde_json::json!("550e8400-e29b-41d4-a716-446655440000"),
    };

    assert_eq!(
        OutputFormat::Human.format_coercion(&report).unwrap(),
        "550e8400-e29b-41d4-a716-446655440000"
    );

    let json: Value =
        serde_json::from_str(&OutputFormat::Json.format_coercion(&report).unwrap()).unwrap();
    assert_eq!(json["type"], "string");
    assert_eq!(json["format"], "uuid");

    let without_format = CoercionReport {
        format: None,
        ..report
    };
    let json: Value =
        serde_json::from_str(&OutputFormat::Json.format_coercion(&without_format).unwrap())
            .unwrap();
    assert!(json.get("format").is_none());
}

#[test]
fn test_format_value_human() {
    assert_eq!(format_value_human(&serde_json::json!("text")), "text");
    assert_eq!(format_value_human(&serde_json::json!(42)), "42");
    assert_eq!(format_value_human(&serde_json::json!(null)), "null");
    assert_eq!(format_value_human(&serde_json::json!([1])), "[\n  1\n]");
}

#[test]
fn test_quiet_suppresses_messages_but_not_data() {
    let (mut output, captured) = writer(OutputFormat::Human, true);

    output.info("hidden").unwrap();
    output.success("hidden").unwrap();
    output.section("Hidden").unwrap();
    output.data(&serde_json::json!({"shown": true})).unwrap();

    let text = captured.text();
    assert!(!text.contains("hidden"));
    assert!(!text.contains("Hidden"));
    assert!(text.contains("\"shown\": true"));
}

#[test]
fn test_machine_formats_skip_messages() {
    let (mut output, captured) = writer(OutputFormat::Json, false);

    output.info("note").unwrap();
    output.warning("careful").unwrap();
    output.validation_report(&sample_report()).unwrap();

    let text = captured.text();
    assert!(!text.contains("note"));
    assert!(!text.contains("careful"));
    assert!(text.ends_with("}\n"));
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn test_plain_messages_are_prefixed() {
    let (mut output, captured) = writer(OutputFormat::Human, false);

    output.info("loading").unwrap();
    output.warning("slow").unwrap();

    assert_eq!(captured.text(), "INFO: loading\nWARNING: slow\n");
}

#[test]
fn test_table_layout() {
    let (mut output, captured) = writer(OutputFormat::Human, false);

    output
        .table(
            &["Name", "Kind"],
            vec![
                vec!["nonEmpty".to_string(), "standard".to_string()],
                vec!["sku".to_string(), "custom".to_string()],
            ],
        )
        .unwrap();

    let text = captured.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Name     │ Kind");
    assert_eq!(lines[1], "─────────┼─────────");
    assert_eq!(lines[2], "nonEmpty │ standard");
    assert_eq!(lines[3], "sku      │ custom");
}

#[test]
fn test_output_writer_creation() {
    let (output, _) = writer(OutputFormat::Yaml, false);
    assert_eq!(output.format(), OutputFormat::Yaml);
    assert_eq!(output.verbosity(), 0);
    assert!(output.progress_bar(3, "inputs").is_none());
}
