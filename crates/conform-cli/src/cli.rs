//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use conform_core::{Engine, SchemaType};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Conform - validate documents and coerce values against declarative schemas
///
/// Checks JSON and YAML documents against a schema, reporting every
/// violation with the path of the offending field.
#[derive(Parser, Debug)]
#[command(
    name = "conform",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CONFORM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format, then human)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate one or more documents against a schema
    Validate(ValidateArgs),

    /// Coerce a single value to a type or semantic format
    Coerce(CoerceArgs),

    /// List the registered custom validators
    Validators,

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the schema file (JSON or YAML)
    #[arg(short, long, value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Documents to validate (JSON, or YAML by extension)
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Validation engine
    #[arg(short, long, value_enum)]
    pub engine: Option<EngineArg>,

    /// Coerce mismatched primitives before checking them
    #[arg(long)]
    pub coerce: bool,

    /// Maximum schema nesting depth to validate
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

/// Arguments for the coerce command
#[derive(Parser, Debug)]
pub struct CoerceArgs {
    /// Target type
    #[arg(short, long = "type", value_enum, default_value = "string")]
    pub target: TypeArg,

    /// Semantic format (date-time, date, uuid, email, uri, duration, ip, ipv4, ipv6, base64, hostname, json)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Value to coerce; parsed as JSON, falling back to a raw string
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Write a default configuration file
    Init(ConfigInitArgs),
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Destination file (.yaml/.yml or .json)
    #[arg(long, default_value = ".conform.yaml")]
    pub path: PathBuf,

    /// Force overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Validation engine selection
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum EngineArg {
    /// Straightforward recursive validator
    Reference,
    /// Pooled validator with a shared pattern cache
    Optimized,
}

/// Coercion target types
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl OutputFormat {
    /// Parse a format name as written in a configuration file
    pub fn from_config(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

impl From<EngineArg> for Engine {
    fn from(engine: EngineArg) -> Self {
        match engine {
            EngineArg::Reference => Engine::Reference,
            EngineArg::Optimized => Engine::Optimized,
        }
    }
}

impl From<TypeArg> for SchemaType {
    fn from(target: TypeArg) -> Self {
        match target {
            TypeArg::String => SchemaType::String,
            TypeArg::Integer => SchemaType::Integer,
            TypeArg::Number => SchemaType::Number,
            TypeArg::Boolean => SchemaType::Boolean,
            TypeArg::Object => SchemaType::Object,
            TypeArg::Array => SchemaType::Array,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify that the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: None,
            no_color: false,
            command: Commands::Validators,
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli {
            verbose: 2,
            quiet: true,
            ..cli
        };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_validate_arguments() {
        let cli = Cli::parse_from([
            "conform",
            "validate",
            "--schema",
            "user.schema.yaml",
            "a.json",
            "b.yaml",
            "--engine",
            "reference",
            "--coerce",
            "--max-depth",
            "8",
        ]);

        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.schema, PathBuf::from("user.schema.yaml"));
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.engine, Some(EngineArg::Reference));
        assert!(args.coerce);
        assert_eq!(args.max_depth, Some(8));
    }

    #[test]
    fn test_validate_requires_inputs() {
        let result = Cli::try_parse_from(["conform", "validate", "--schema", "s.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_coerce_arguments() {
        let cli = Cli::parse_from(["conform", "coerce", "--type", "integer", "-12"]);
        let Commands::Coerce(args) = cli.command else {
            panic!("expected coerce");
        };
        assert_eq!(args.target, TypeArg::Integer);
        assert_eq!(args.value, "-12");
        assert!(args.format.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["conform", "validators", "-o", "json-pretty", "--no-color"]);
        assert_eq!(cli.output, Some(OutputFormat::JsonPretty));
        assert!(cli.no_color);
        assert!(!cli.use_color());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["conform", "-q", "-v", "validators"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_from_config() {
        assert_eq!(OutputFormat::from_config("yaml"), Some(OutputFormat::Yaml));
        assert_eq!(
            OutputFormat::from_config("json-pretty"),
            Some(OutputFormat::JsonPretty)
        );
        assert_eq!(OutputFormat::from_config("Human"), Some(OutputFormat::Human));
        assert_eq!(OutputFormat::from_config("xml"), None);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Engine::from(EngineArg::Reference), Engine::Reference);
        assert_eq!(SchemaType::from(TypeArg::Boolean), SchemaType::Boolean);
        assert_eq!(Shell::Zsh.to_clap_shell(), clap_complete::Shell::Zsh);
    }
}
