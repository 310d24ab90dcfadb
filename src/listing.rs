//! Index and per-category listing pages for registered models.
//!
//! Written once when the documentation build starts. Each category page holds
//! one [`DIRECTIVE_NAME`] block per registered model, in registry order:
//!
//! ````text
//! # Sample types
//!
//! ```{autodatamodel} geo.RockSample
//! ```
//! ````

use std::fs;
use std::path::{Path, PathBuf};

use crate::directive::DIRECTIVE_NAME;
use crate::error::DocsError;
use crate::models::{Category, Registry};

const INDEX_NAME: &str = "index";
const INDEX_TITLE: &str = "Data Models";
const TOCTREE_MAXDEPTH: u32 = 2;

/// Paths of the written listing documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPaths {
    pub index: PathBuf,
    pub samples: PathBuf,
    pub measurements: PathBuf,
}

impl ListingPaths {
    pub fn all(&self) -> [&Path; 3] {
        [&self.index, &self.samples, &self.measurements]
    }
}

/// Write `index.md`, `samples.md` and `measurements.md` into `out_dir`,
/// creating it if needed. Existing files are overwritten.
pub fn write_listings(out_dir: &Path, registry: &Registry) -> Result<ListingPaths, DocsError> {
    fs::create_dir_all(out_dir).map_err(|e| DocsError::io(out_dir, e))?;

    let index = write_document(out_dir, INDEX_NAME, &render_index())?;
    let samples = write_document(
        out_dir,
        Category::Samples.as_str(),
        &render_category(registry, Category::Samples),
    )?;
    let measurements = write_document(
        out_dir,
        Category::Measurements.as_str(),
        &render_category(registry, Category::Measurements),
    )?;

    tracing::info!(
        "Wrote model listings to {} ({} samples, {} measurements)",
        out_dir.display(),
        registry.samples.len(),
        registry.measurements.len()
    );

    Ok(ListingPaths {
        index,
        samples,
        measurements,
    })
}

/// The index page: a title and a toctree over the category pages.
pub fn render_index() -> String {
    let mut out = format!("# {}\n\n", INDEX_TITLE);
    out.push_str("```{toctree}\n");
    out.push_str(&format!(":maxdepth: {}\n\n", TOCTREE_MAXDEPTH));
    for category in Category::ALL {
        out.push_str(category.as_str());
        out.push('\n');
    }
    out.push_str("```\n");
    out
}

/// A category page: a heading and one directive block per record.
pub fn render_category(registry: &Registry, category: Category) -> String {
    let mut out = format!("# {}\n\n", category.heading());
    for record in registry.records(category) {
        out.push_str(&directive_block(&record.full_name));
    }
    out
}

fn directive_block(full_name: &str) -> String {
    format!("```{{{}}} {}\n```\n\n", DIRECTIVE_NAME, full_name)
}

fn write_document(out_dir: &Path, name: &str, content: &str) -> Result<PathBuf, DocsError> {
    let path = out_dir.join(format!("{}.md", name));
    fs::write(&path, content).map_err(|e| DocsError::io(&path, e))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(path)
}
