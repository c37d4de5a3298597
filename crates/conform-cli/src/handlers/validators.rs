//! Custom validator listing handler

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::OutputWriter;
use conform_core::registry::STANDARD_VALIDATORS;
use conform_core::CustomValidatorRegistry;
use serde::Serialize;

/// One registered custom validator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatorEntry {
    pub name: String,
    pub standard: bool,
}

/// Handle the validators command
pub fn handle_validators(output: &mut OutputWriter) -> Result<()> {
    let entries = list_validators(&CustomValidatorRegistry::global());

    if output.format() != OutputFormat::Human {
        return output.data(&entries);
    }

    output.section("Custom Validators")?;
    let rows = entries
        .into_iter()
        .map(|entry| {
            let kind = if entry.standard { "standard" } else { "registered" };
            vec![entry.name, kind.to_string()]
        })
        .collect();
    output.table(&["Name", "Kind"], rows)
}

/// Registered validator names in sorted order
pub fn list_validators(registry: &CustomValidatorRegistry) -> Vec<ValidatorEntry> {
    registry
        .names()
        .into_iter()
        .map(|name| ValidatorEntry {
            standard: STANDARD_VALIDATORS.contains(&name.as_str()),
            name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_and_registered_entries() {
        let registry = CustomValidatorRegistry::with_defaults();
        registry.register("sku", |_value, _path| Vec::new());

        let entries = list_validators(&registry);
        assert_eq!(entries.len(), STANDARD_VALIDATORS.len() + 1);

        let sku = entries.iter().find(|entry| entry.name == "sku").unwrap();
        assert!(!sku.standard);
        assert!(entries
            .iter()
            .filter(|entry| entry.name != "sku")
            .all(|entry| entry.standard));

        let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_empty_registry() {
        assert!(list_validators(&CustomValidatorRegistry::new()).is_empty());
    }
}
