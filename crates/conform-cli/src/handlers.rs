//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod coerce;
mod completions;
mod config;
mod utils;
mod validate;
mod validators;

pub use coerce::handle_coerce;
pub use completions::handle_completions;
pub use config::handle_config;
pub use validate::handle_validate;
pub use validators::handle_validators;
