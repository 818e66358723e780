use std::path::Path;

use crate::domain::AppError;
use crate::services::load_layout_catalog;

/// A layout as offered to the model, with its placeholder names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSummary {
    pub name: String,
    pub placeholders: Vec<String>,
}

/// Execute the layouts command.
pub fn execute(template: &Path) -> Result<Vec<LayoutSummary>, AppError> {
    let catalog = load_layout_catalog(template)?;
    Ok(catalog
        .iter()
        .map(|(name, handle)| LayoutSummary {
            name: name.to_string(),
            placeholders: handle.placeholder_names().into_iter().map(str::to_string).collect(),
        })
        .collect())
}
