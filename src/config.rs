use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::DocsError;

const DEFAULT_OUTPUT_SUBDIR: &str = "data_models";

/// How the declared fields of a model are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FieldLayout {
    /// One object description per field: signature, units, help text.
    #[default]
    Descriptions,
    /// A two-column `field | description` table.
    Table,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Apps whose models are documented. Registered with the host but not
    /// consulted; the registry decides what gets listed.
    pub model_apps: Vec<String>,
    pub field_layout: FieldLayout,
    /// Directory under the documentation source root receiving the listings.
    pub output_subdir: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            model_apps: Vec::new(),
            field_layout: FieldLayout::default(),
            output_subdir: DEFAULT_OUTPUT_SUBDIR.to_string(),
        }
    }
}

impl DocsConfig {
    /// Load configuration from a JSON file.
    /// Returns the default config if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, DocsError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| DocsError::io(path, e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| DocsError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), DocsError> {
        let subdir = Path::new(&self.output_subdir);
        if self.output_subdir.is_empty() || subdir.is_absolute() {
            return Err(DocsError::Config(format!(
                "output_subdir must be a relative path, got '{}'",
                self.output_subdir
            )));
        }
        Ok(())
    }
}
