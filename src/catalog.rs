//! File-backed registry and model definitions.
//!
//! A catalog is a JSON document describing the registered models and their
//! declared fields, standing in for a live application framework:
//!
//! ```json
//! {
//!   "registry": {
//!     "samples": [{ "full_name": "geo.RockSample", "verbose_name": "Rock Sample" }],
//!     "measurements": []
//!   },
//!   "models": [{
//!     "app_label": "geo",
//!     "model_name": "RockSample",
//!     "fields": [
//!       { "name": "depth", "type": "FloatField", "verbose_name": "depth",
//!         "help_text": "Depth below surface", "base_units": "m" },
//!       { "name": "site", "type": "ForeignKey" }
//!     ]
//!   }]
//! }
//! ```
//!
//! A field without `verbose_name` has no display metadata and is never documented.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::DocsError;
use crate::models::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    #[serde(default)]
    pub registry: Registry,
    #[serde(default)]
    pub models: Vec<CatalogModel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CatalogModel {
    pub app_label: String,
    pub model_name: String,
    #[serde(default)]
    pub fields: Vec<CatalogField>,
    /// Overrides the config of the model's registry record.
    #[serde(default)]
    pub config: Option<ModelConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CatalogField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub verbose_name: Option<String>,
    #[serde(default)]
    pub help_text: String,
    #[serde(default)]
    pub base_units: Option<String>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, DocsError> {
        let content = std::fs::read_to_string(path).map_err(|e| DocsError::io(path, e))?;
        let catalog: Catalog =
            serde_json::from_str(&content).map_err(|source| DocsError::Catalog {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(
            "Loaded catalog {}: {} samples, {} measurements, {} models",
            path.display(),
            catalog.registry.samples.len(),
            catalog.registry.measurements.len(),
            catalog.models.len()
        );
        Ok(catalog.resolve_configs())
    }

    pub fn from_parts(registry: Registry, models: Vec<CatalogModel>) -> Self {
        Self { registry, models }.resolve_configs()
    }

    /// Give every registered model without its own config the config of its
    /// registry record, or an empty one.
    fn resolve_configs(mut self) -> Self {
        for model in &mut self.models {
            if model.config.is_some() {
                continue;
            }
            if let Some(record) = self.registry.find(&model.full_name()) {
                model.config = Some(record.config.clone().unwrap_or_default());
            }
        }
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// JSON Schema of the catalog file format.
    pub fn json_schema() -> serde_json::Value {
        schemars::schema_for!(Catalog).to_value()
    }
}

impl ModelLookup for Catalog {
    fn get_model(&self, app_label: &str, model_name: &str) -> Option<&dyn ModelDefinition> {
        self.models
            .iter()
            .find(|m| m.app_label == app_label && m.model_name.eq_ignore_ascii_case(model_name))
            .map(|m| m as &dyn ModelDefinition)
    }
}

impl ModelDefinition for CatalogModel {
    fn app_label(&self) -> &str {
        &self.app_label
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn fields(&self) -> Vec<&dyn FieldDescriptor> {
        self.fields.iter().map(|f| f as &dyn FieldDescriptor).collect()
    }

    fn config(&self) -> Option<&ModelConfig> {
        self.config.as_ref()
    }
}

impl CatalogField {
    /// A field with display metadata.
    pub fn new(name: &str, type_name: &str, verbose_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            verbose_name: Some(verbose_name.to_string()),
            ..Default::default()
        }
    }

    /// A relation-only field without display metadata.
    pub fn relation(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_help_text(mut self, help_text: &str) -> Self {
        self.help_text = help_text.to_string();
        self
    }

    pub fn with_units(mut self, units: &str) -> Self {
        self.base_units = Some(units.to_string());
        self
    }
}

impl FieldDescriptor for CatalogField {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn display(&self) -> Option<&dyn DisplayField> {
        self.verbose_name.as_ref().map(|_| self as &dyn DisplayField)
    }
}

impl HasVerboseName for CatalogField {
    fn verbose_name(&self) -> &str {
        self.verbose_name.as_deref().unwrap_or_default()
    }
}

impl HasHelpText for CatalogField {
    fn help_text(&self) -> &str {
        &self.help_text
    }
}

impl HasUnits for CatalogField {
    fn base_units(&self) -> Option<&str> {
        self.base_units.as_deref()
    }
}
