//! Validation of a model's layout choice against the layout catalog.

use crate::domain::{AppError, LayoutCatalog, OutlineItem};

/// Layout names tried, in order, when the model's answer is unusable.
pub const DEFAULT_LAYOUT_NAMES: [&str; 3] = ["Title and Content", "标题和内容", "内容与标题"];

/// Number of points quoted in the layout selection prompt.
const SUMMARY_POINTS: usize = 3;

/// How a layout name was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSource {
    /// The model named a layout from the catalog.
    Model,
    /// A well-known default layout name present in the catalog.
    DefaultName,
    /// The first layout of the catalog.
    FirstLayout,
}

impl LayoutSource {
    pub fn label(&self) -> &'static str {
        match self {
            LayoutSource::Model => "chosen by model",
            LayoutSource::DefaultName => "default layout",
            LayoutSource::FirstLayout => "first available layout",
        }
    }
}

/// A layout name that is guaranteed to be a key of the catalog it was resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutChoice {
    pub name: String,
    pub source: LayoutSource,
}

/// Describe an outline item for the layout selection prompt.
pub fn content_summary(item: &OutlineItem) -> String {
    let mut summary = format!("Slide title: '{}'.", item.title);
    if item.points.is_empty() {
        summary.push_str(
            " (This slide may have no detailed text points, or is mainly a title, picture or chart.)",
        );
    } else {
        let quoted: Vec<&str> =
            item.points.iter().take(SUMMARY_POINTS).map(String::as_str).collect();
        summary.push_str(" Main points: ");
        summary.push_str(&quoted.join(", "));
        if item.points.len() > SUMMARY_POINTS {
            summary.push_str(" etc.");
        }
    }
    summary
}

/// Trim the reply and drop quote and period characters.
pub fn clean_layout_reply(reply: &str) -> String {
    reply.trim().chars().filter(|c| !matches!(c, '"' | '\'' | '.')).collect()
}

/// Resolve a raw model reply to a catalog layout name.
///
/// `reply` is `None` when the model call failed; that takes the same fallback
/// path as an unusable answer.
pub fn resolve_layout_choice(
    reply: Option<&str>,
    catalog: &LayoutCatalog,
) -> Result<LayoutChoice, AppError> {
    if let Some(reply) = reply {
        let cleaned = clean_layout_reply(reply);
        if catalog.contains(&cleaned) {
            return Ok(LayoutChoice { name: cleaned, source: LayoutSource::Model });
        }
    }
    fallback_layout_choice(catalog)
}

/// Default names first, then the first layout in catalog order.
pub fn fallback_layout_choice(catalog: &LayoutCatalog) -> Result<LayoutChoice, AppError> {
    if let Some(name) = DEFAULT_LAYOUT_NAMES.iter().copied().find(|name| catalog.contains(name)) {
        return Ok(LayoutChoice { name: name.to_string(), source: LayoutSource::DefaultName });
    }

    catalog
        .first_name()
        .map(|name| LayoutChoice { name: name.to_string(), source: LayoutSource::FirstLayout })
        .ok_or(AppError::EmptyLayoutCatalog)
}
