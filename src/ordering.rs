//! Which fields a model documents, and in what order.

use std::collections::BTreeMap;

use crate::error::DocsError;
use crate::models::{FieldDescriptor, ModelDefinition};

/// Order a model's documented fields.
///
/// Only fields with display metadata are candidates; a repeated name keeps
/// its last declaration. When the model config lists fields explicitly, that
/// order is used and names matching no candidate are skipped. Otherwise every
/// candidate is returned sorted by name.
pub fn ordered_fields(model: &dyn ModelDefinition) -> Result<Vec<&dyn FieldDescriptor>, DocsError> {
    let mut by_name: BTreeMap<&str, &dyn FieldDescriptor> = BTreeMap::new();
    for field in model.fields() {
        if field.display().is_some() {
            by_name.insert(field.name(), field);
        }
    }

    let include = model
        .config()
        .ok_or_else(|| DocsError::MissingConfig(model.full_name()))?
        .flat_fields();

    if include.is_empty() {
        return Ok(by_name.into_values().collect());
    }

    let ordered = include
        .iter()
        .filter_map(|name| {
            let field = by_name.get(name.as_str()).copied();
            if field.is_none() {
                tracing::debug!("{}: skipping unknown field '{}'", model.full_name(), name);
            }
            field
        })
        .collect();
    Ok(ordered)
}
