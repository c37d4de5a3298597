//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigInitArgs, OutputFormat};
use crate::config::Config;
use crate::error::{ErrorContext, Result};
use crate::output::OutputWriter;
use tracing::info;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Show => handle_config_show(config, output),
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
    }
}

/// Handle config show subcommand
fn handle_config_show(config: &Config, output: &mut OutputWriter) -> Result<()> {
    if output.format() == OutputFormat::Human {
        output.section("Effective Configuration")?;
        let rendered = serde_yaml::to_string(config)?;
        return output.write(&rendered);
    }

    output.data(config)
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    if args.path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            args.path.display()
        ))?;
        return Ok(());
    }

    Config::default()
        .save(&args.path)
        .with_context(|| format!("Writing {}", args.path.display()))?;
    info!("Wrote default configuration to {}", args.path.display());
    output.success(&format!("✓ Created config at {}", args.path.display()))?;
    output.info("Edit it to customize validation, output and logging defaults.")?;

    Ok(())
}
