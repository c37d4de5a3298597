//! Validation command handler

use super::utils::{load_document, load_schema};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{InputReport, OutputWriter, ValidationReport};
use conform_core::{create_validator, Engine, ValidationConfig};
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip(config, output), fields(schema = %args.schema.display(), inputs = args.inputs.len()))]
pub fn handle_validate(
    args: ValidateArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let timer = Timer::with_details(
        "validate_command",
        &format!("schema: {}", args.schema.display()),
    );
    info!("Starting validation");

    if output.verbosity() > 0 {
        let (engine, validation) = effective_settings(&args, config);
        output.info(&format!(
            "Validating {} input(s) against {} with the {} engine{}",
            args.inputs.len(),
            args.schema.display(),
            engine,
            if validation.coerce { " (coercing)" } else { "" }
        ))?;
    }

    let report = run_validation(&args, config, output)?;
    debug!(elapsed_ms = timer.elapsed().as_millis() as u64, "Inputs validated");
    output.validation_report(&report)?;

    if report.valid {
        info!("All inputs valid");
        Ok(())
    } else {
        warn!(
            invalid = report.invalid_count(),
            total = report.inputs.len(),
            "Validation failed"
        );
        Err(Error::ValidationFailed {
            invalid: report.invalid_count(),
            total: report.inputs.len(),
        })
    }
}

/// Resolve the engine and library configuration from flags over the config file
pub fn effective_settings(args: &ValidateArgs, config: &Config) -> (Engine, ValidationConfig) {
    let engine = args
        .engine
        .map(Engine::from)
        .unwrap_or(config.validation.engine);

    let mut validation = config.validation.to_validation_config();
    if args.coerce {
        validation = validation.with_coercion(true);
    }
    if let Some(max_depth) = args.max_depth {
        validation = validation.with_max_depth(max_depth);
    }

    (engine, validation)
}

/// Validate every input and collect the per-input results
pub fn run_validation(
    args: &ValidateArgs,
    config: &Config,
    output: &OutputWriter,
) -> Result<ValidationReport> {
    let schema = {
        let _schema_timer = Timer::new("schema_loading");
        load_schema(&args.schema)?
    };
    if schema.has_conditionals() {
        warn!(
            schema = %args.schema.display(),
            "Schema declares conditional keywords, which are not evaluated"
        );
    }

    let (engine, validation) = effective_settings(args, config);
    debug!(engine = %engine, config = ?validation, "Creating validator");
    let validator = create_validator(engine, validation);

    let progress = if args.inputs.len() > 1 {
        output.progress_bar(args.inputs.len() as u64, "Validating")
    } else {
        None
    };

    let mut inputs = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let document = load_document(path)?;
        let result = validator.validate_value(&schema, &document);
        debug!(
            input = %path.display(),
            valid = result.valid,
            errors = result.error_count(),
            "Input validated"
        );
        inputs.push(InputReport {
            input: path.display().to_string(),
            result,
        });

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(ValidationReport::new(validator.name(), inputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{EngineArg, OutputFormat};
    use crate::config::ConfigBuilder;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const SCHEMA: &str = r#"
type: object
properties:
  age:
    type: integer
    minimum: 18
  address:
    type: object
    properties:
      city:
        type: string
    required: [city]
required: [age]
"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn args(schema: PathBuf, inputs: Vec<PathBuf>) -> ValidateArgs {
        ValidateArgs {
            schema,
            inputs,
            engine: None,
            coerce: false,
            max_depth: None,
        }
    }

    fn quiet_output() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Json, false, true, 0, Box::new(std::io::sink()))
    }

    #[test]
    fn test_mixed_inputs() {
        let dir = TempDir::new().unwrap();
        let schema = write(dir.path(), "schema.yaml", SCHEMA);
        let good = write(dir.path(), "good.json", r#"{"age": 30}"#);
        let bad = write(dir.path(), "bad.yaml", "age: 16\naddress:\n  street: Main\n");

        let report = run_validation(
            &args(schema, vec![good, bad]),
            &Config::default(),
            &quiet_output(),
        )
        .unwrap();

        assert!(!report.valid);
        assert_eq!(report.engine, "optimized");
        assert!(report.inputs[0].result.valid);
        assert_eq!(
            report.inputs[1].result.errors,
            vec!["address.city is required", "age must be at least 18"]
        );
    }

    #[test]
    fn test_handle_validate_exit_status() {
        let dir = TempDir::new().unwrap();
        let schema = write(dir.path(), "schema.yaml", SCHEMA);
        let good = write(dir.path(), "good.json", r#"{"age": 30}"#);
        let bad = write(dir.path(), "bad.json", r#"{}"#);

        let mut output = quiet_output();
        handle_validate(
            args(schema.clone(), vec![good.clone()]),
            &Config::default(),
            &mut output,
        )
        .unwrap();

        let error = handle_validate(args(schema, vec![good, bad]), &Config::default(), &mut output)
            .unwrap_err();
        assert!(matches!(error, Error::ValidationFailed { invalid: 1, total: 2 }));
        assert_ne!(error.exit_code(), 0);
    }

    #[test]
    fn test_flags_override_config() {
        let config = ConfigBuilder::new()
            .engine(Engine::Optimized)
            .max_depth(64)
            .build();

        let mut validate_args = args(PathBuf::from("s.json"), vec![PathBuf::from("a.json")]);
        let (engine, validation) = effective_settings(&validate_args, &config);
        assert_eq!(engine, Engine::Optimized);
        assert_eq!(validation.max_depth, 64);
        assert!(!validation.coerce);

        validate_args.engine = Some(EngineArg::Reference);
        validate_args.coerce = true;
        validate_args.max_depth = Some(3);
        let (engine, validation) = effective_settings(&validate_args, &config);
        assert_eq!(engine, Engine::Reference);
        assert_eq!(validation.max_depth, 3);
        assert!(validation.coerce);
    }

    #[test]
    fn test_coercion_from_config() {
        let dir = TempDir::new().unwrap();
        let schema = write(dir.path(), "schema.yaml", SCHEMA);
        let input = write(dir.path(), "input.json", r#"{"age": "42"}"#);

        let strict = run_validation(
            &args(schema.clone(), vec![input.clone()]),
            &Config::default(),
            &quiet_output(),
        )
        .unwrap();
        assert_eq!(strict.inputs[0].result.errors, vec!["age must be an integer"]);

        let coercing = run_validation(
            &args(schema, vec![input]),
            &ConfigBuilder::new().coerce(true).build(),
            &quiet_output(),
        )
        .unwrap();
        assert!(coercing.valid);
    }

    #[test]
    fn test_unreadable_input_aborts() {
        let dir = TempDir::new().unwrap();
        let schema = write(dir.path(), "schema.yaml", SCHEMA);
        let broken = write(dir.path(), "broken.json", "{");

        let error = run_validation(
            &args(schema, vec![broken]),
            &Config::default(),
            &quiet_output(),
        )
        .unwrap_err();
        assert!(matches!(error, Error::InvalidFormat { .. }));

        let error = run_validation(
            &args(dir.path().join("nope.yaml"), vec![]),
            &Config::default(),
            &quiet_output(),
        )
        .unwrap_err();
        assert!(matches!(error, Error::FileNotFound { .. }));
    }
}
