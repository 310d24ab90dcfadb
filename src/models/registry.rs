use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{MetadataRecord, ModelDefinition};

/// The two registered model categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Samples,
    Measurements,
}

impl Category {
    /// Fixed listing order used by the index page.
    pub const ALL: [Category; 2] = [Category::Samples, Category::Measurements];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Samples => "samples",
            Self::Measurements => "measurements",
        }
    }

    /// Heading of the category's listing page.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Samples => "Sample types",
            Self::Measurements => "Measurement types",
        }
    }
}

/// Catalog of registered models, keyed by category.
///
/// Populated once before documentation is generated and read-only afterwards.
/// Records keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Registry {
    #[serde(default)]
    pub samples: Vec<MetadataRecord>,
    #[serde(default)]
    pub measurements: Vec<MetadataRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, category: Category, record: MetadataRecord) {
        match category {
            Category::Samples => self.samples.push(record),
            Category::Measurements => self.measurements.push(record),
        }
    }

    pub fn records(&self, category: Category) -> &[MetadataRecord] {
        match category {
            Category::Samples => &self.samples,
            Category::Measurements => &self.measurements,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &MetadataRecord)> {
        Category::ALL
            .into_iter()
            .flat_map(move |c| self.records(c).iter().map(move |r| (c, r)))
    }

    /// Find a record by its fully-qualified name.
    ///
    /// App labels compare exactly; model names compare ASCII
    /// case-insensitively, matching how model lookups resolve names.
    pub fn find(&self, full_name: &str) -> Option<&MetadataRecord> {
        let (app_label, model_name) = full_name.split_once('.')?;
        self.iter().map(|(_, r)| r).find(|r| {
            r.full_name
                .split_once('.')
                .is_some_and(|(a, m)| a == app_label && m.eq_ignore_ascii_case(model_name))
        })
    }

    pub fn get_model(&self, model: &dyn ModelDefinition) -> Option<&MetadataRecord> {
        self.find(&model.full_name())
    }
}
