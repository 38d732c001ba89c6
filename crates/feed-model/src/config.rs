use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::row::RowSchema;

/// Run configuration for one feed generation pass.
///
/// Loaded from a JSON file next to the exported sheets. Sheet names are the
/// bare names used by the source; the CSV provider appends its own file
/// extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// Product sheets, processed in listed order.
    pub sheets: Vec<String>,
    /// Sheet holding category id / name bindings.
    pub category_sheet: String,
    /// Drop offers that are not marked available.
    #[serde(default)]
    pub only_available: bool,
    /// Column layout of the product sheets.
    #[serde(default)]
    pub schema: RowSchema,
}

impl FeedConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: FeedConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sheets.is_empty() {
            return Err(ConfigError::Invalid(
                "config lists no product sheets".to_string(),
            ));
        }
        for (position, name) in self.sheets.iter().enumerate() {
            if name.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "product sheet at position {position} has an empty name"
                )));
            }
            if self.sheets[position + 1..].contains(name) {
                return Err(ConfigError::Invalid(format!(
                    "product sheet '{name}' is listed twice"
                )));
            }
        }
        if self.category_sheet.is_empty() {
            return Err(ConfigError::Invalid(
                "category sheet name is empty".to_string(),
            ));
        }
        if self.sheets.contains(&self.category_sheet) {
            return Err(ConfigError::Invalid(format!(
                "category sheet '{}' is also listed as a product sheet",
                self.category_sheet
            )));
        }
        self.schema.validate()
    }
}
