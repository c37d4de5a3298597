//! Coerce command handler

use crate::cli::CoerceArgs;
use crate::error::{Error, Result};
use crate::output::{CoercionReport, OutputWriter};
use conform_core::{coerce, SchemaType, SemanticFormat};
use serde_json::Value;
use tracing::{debug, instrument};

/// Handle the coerce command
#[instrument(skip(output), fields(target = ?args.target, format = ?args.format))]
pub fn handle_coerce(args: CoerceArgs, output: &mut OutputWriter) -> Result<()> {
    let report = coerce_value(&args)?;
    output.coercion(&report)
}

/// Parse the raw argument as JSON, falling back to the literal string
pub fn parse_input(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Coerce the argument value and describe the outcome
pub fn coerce_value(args: &CoerceArgs) -> Result<CoercionReport> {
    if let Some(format) = &args.format {
        if SemanticFormat::parse(format).is_none() {
            return Err(Error::invalid_args(format!("unknown format '{}'", format)));
        }
    }

    let target = SchemaType::from(args.target);
    let input = parse_input(&args.value);
    debug!(input = %input, "Coercing value");

    let coerced = coerce(target, &input, args.format.as_deref()).ok_or_else(|| {
        Error::CoercionFailed {
            value: input.to_string(),
            target: match &args.format {
                Some(format) => format!("{} ({})", target, format),
                None => target.to_string(),
            },
        }
    })?;

    Ok(CoercionReport {
        input,
        target: target.to_string(),
        format: args.format.clone(),
        value: coerced.into_value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::TypeArg;
    use serde_json::json;

    fn args(target: TypeArg, format: Option<&str>, value: &str) -> CoerceArgs {
        CoerceArgs {
            target,
            format: format.map(str::to_string),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("42"), json!(42));
        assert_eq!(parse_input("\"42\""), json!("42"));
        assert_eq!(parse_input("[1, 2]"), json!([1, 2]));
        assert_eq!(parse_input("yes"), json!("yes"));
        assert_eq!(parse_input("a, b"), json!("a, b"));
    }

    #[test]
    fn test_primitive_targets() {
        let report = coerce_value(&args(TypeArg::Integer, None, "\"12\"")).unwrap();
        assert_eq!(report.value, json!(12));
        assert_eq!(report.target, "integer");

        let report = coerce_value(&args(TypeArg::Boolean, None, "yes")).unwrap();
        assert_eq!(report.value, json!(true));

        let report = coerce_value(&args(TypeArg::Array, None, "a, b")).unwrap();
        assert_eq!(report.value, json!(["a", "b"]));

        let report = coerce_value(&args(TypeArg::String, None, "2.50")).unwrap();
        assert_eq!(report.value, json!("2.5"));
    }

    #[test]
    fn test_semantic_formats() {
        let report = coerce_value(&args(
            TypeArg::String,
            Some("uuid"),
            "550E8400E29B41D4A716446655440000",
        ))
        .unwrap();
        assert_eq!(report.value, json!("550e8400-e29b-41d4-a716-446655440000"));

        let report = coerce_value(&args(TypeArg::String, Some("duration"), "90 minutes")).unwrap();
        assert_eq!(report.value, json!("1h 30m"));
        assert_eq!(report.format.as_deref(), Some("duration"));
    }

    #[test]
    fn test_failures() {
        let error = coerce_value(&args(TypeArg::Integer, None, "ten")).unwrap_err();
        assert!(matches!(error, Error::CoercionFailed { .. }));
        assert_eq!(error.to_string(), "Cannot coerce \"ten\" to integer");

        let error = coerce_value(&args(TypeArg::String, Some("uuid"), "nope")).unwrap_err();
        assert_eq!(error.to_string(), "Cannot coerce \"nope\" to string (uuid)");

        let error = coerce_value(&args(TypeArg::String, Some("color"), "red")).unwrap_err();
        assert!(error.should_show_help());
    }
}
