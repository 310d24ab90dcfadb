use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Descriptive data attached to a registered model.
///
/// Kept separate from the model's own field definitions: a record says how a
/// model is presented (display name, description, keywords) and which fields
/// to document, while the [`ModelDefinition`](super::ModelDefinition) owns the
/// fields themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetadataRecord {
    /// Fully-qualified model identifier, `"<app_label>.<model_name>"`.
    pub full_name: String,
    pub verbose_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub config: Option<ModelConfig>,
}

impl MetadataRecord {
    /// Description to show under the model heading. The config wins over the
    /// record; empty strings count as absent.
    pub fn display_description(&self) -> Option<&str> {
        self.config
            .as_ref()
            .and_then(|c| c.description.as_deref())
            .filter(|d| !d.is_empty())
            .or_else(|| self.description.as_deref().filter(|d| !d.is_empty()))
    }

    /// Keywords to show under the model heading, config first.
    pub fn display_keywords(&self) -> &[String] {
        match self.config.as_ref() {
            Some(config) if !config.keywords.is_empty() => &config.keywords,
            _ => &self.keywords,
        }
    }
}

/// Per-model presentation config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ModelConfig {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Explicit fields to document, optionally grouped into fieldsets.
    /// Empty means "document every field".
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

impl ModelConfig {
    /// Flatten `fields` into a single ordered list of names.
    ///
    /// Groups are expanded depth-first in declared order, so
    /// `["a", ["b", ["c"]], "d"]` flattens to `["a", "b", "c", "d"]`.
    pub fn flat_fields(&self) -> Vec<String> {
        let mut names = Vec::new();
        for entry in &self.fields {
            entry.flatten_into(&mut names);
        }
        names
    }
}

/// A field name or a nested fieldset in [`ModelConfig::fields`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FieldEntry {
    Name(String),
    Group(Vec<FieldEntry>),
}

impl FieldEntry {
    fn flatten_into(&self, out: &mut Vec<String>) {
        match self {
            Self::Name(name) => out.push(name.clone()),
            Self::Group(entries) => {
                for entry in entries {
                    entry.flatten_into(out);
                }
            }
        }
    }
}

impl From<&str> for FieldEntry {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}
