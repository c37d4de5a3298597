//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with specialized
//! rendering for validation reports and coerced values.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use conform_core::ValidationResult;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value;
use is_terminal::IsTerminal;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Validation outcome for one input document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputReport {
    /// Display name of the input (usually its path)
    pub input: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Validation outcome for a whole `validate` invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub engine: String,
    pub valid: bool,
    pub inputs: Vec<InputReport>,
}

impl ValidationReport {
    /// Build a report; it is valid only when every input is
    pub fn new(engine: impl Into<String>, inputs: Vec<InputReport>) -> Self {
        Self {
            engine: engine.into(),
            valid: inputs.iter().all(|report| report.result.valid),
            inputs,
        }
    }

    /// Number of inputs that failed validation
    pub fn invalid_count(&self) -> usize {
        self.inputs.iter().filter(|report| !report.result.valid).count()
    }
}

/// Result of a `coerce` invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoercionReport {
    pub input: Value,
    #[serde(rename = "type")]
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub value: Value,
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation report with per-input violations
    fn format_validation_report(&self, report: &ValidationReport) -> Result<String>;

    /// Format a coerced value
    fn format_coercion(&self, report: &CoercionReport) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_validation_report(&self, report: &ValidationReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_validation_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_coercion(&self, report: &CoercionReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_value_human(&report.value)),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && io::stdout().is_terminal(),
            quiet,
            verbose,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[cfg(test)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            verbose,
            writer,
        }
    }

    /// Disable progress indicators regardless of terminal detection
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Get verbosity level
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!("Outputting {} bytes of data", formatted.len());
        self.emit(&formatted)
    }

    /// Write a validation report
    ///
    /// Human output colors each input line by outcome; machine formats
    /// serialize the report as a single document.
    pub fn validation_report(&mut self, report: &ValidationReport) -> Result<()> {
        if self.format != OutputFormat::Human || !self.use_color {
            let formatted = self.format.format_validation_report(report)?;
            return self.emit(&formatted);
        }

        for input in &report.inputs {
            if input.result.valid {
                self.writeln(&format!("{} {}", "✓".green(), input.input))?;
            } else {
                self.writeln(&format!(
                    "{} {} {}",
                    "✗".red(),
                    input.input,
                    format!("({} error(s))", input.result.error_count()).dimmed()
                ))?;
                for error in &input.result.errors {
                    self.writeln(&format!("  {} {}", "•".red(), error))?;
                }
            }
        }
        let summary = summary_line(report);
        if report.valid {
            self.writeln(&summary.green().bold().to_string())
        } else {
            self.writeln(&summary.red().bold().to_string())
        }
    }

    /// Write a coerced value
    pub fn coercion(&mut self, report: &CoercionReport) -> Result<()> {
        let formatted = self.format.format_coercion(report)?;
        self.emit(&formatted)
    }

    /// Create a progress bar for long operations
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = join_cells(headers.iter().copied(), &widths);
        if self.use_color {
            self.writeln(&header_row.bold().to_string())?;
        } else {
            self.writeln(&header_row)?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in &rows {
            self.writeln(&join_cells(row.iter().map(String::as_str), &widths))?;
        }

        Ok(())
    }

    /// Every document ends with exactly one newline
    fn emit(&mut self, formatted: &str) -> Result<()> {
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }
}

fn join_cells<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .enumerate()
        .map(|(i, cell)| match widths.get(i) {
            Some(width) => format!("{:width$}", cell, width = *width),
            None => cell.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" │ ")
        .trim_end()
        .to_string()
}

/// Helper function to create a progress bar style
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

fn summary_line(report: &ValidationReport) -> String {
    let total = report.inputs.len();
    let valid = total - report.invalid_count();
    format!("{} of {} input(s) valid ({} engine)", valid, total, report.engine)
}

/// Format a validation report for human reading
fn format_validation_report_human(report: &ValidationReport) -> String {
    let mut output = String::new();

    for input in &report.inputs {
        if input.result.valid {
            output.push_str(&format!("✓ {}\n", input.input));
            continue;
        }
        output.push_str(&format!(
            "✗ {} ({} error(s))\n",
            input.input,
            input.result.error_count()
        ));
        for error in &input.result.errors {
            output.push_str(&format!("  • {}\n", error));
        }
    }
    output.push_str(&summary_line(report));

    output
}

/// Render a coerced value the way a shell user would type it back
fn format_value_human(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}
