//! Writing one outline item onto a new slide.

use log::{debug, warn};

use crate::domain::placeholder_matching::{BODY_RULES, TITLE_RULES, pick_placeholder};
use crate::domain::{LayoutHandle, OutlineItem};
use crate::services::pptx::{Deck, SlideDraft};

/// Result of placing an item on the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledSlide {
    /// Declared name of the layout the slide was actually built from.
    pub layout: String,
    /// Whether the deck's default layout replaced the requested one.
    pub used_default_layout: bool,
    pub body_written: bool,
}

/// Append a slide for `item` using `layout`.
///
/// If the layout cannot be added, the deck's default layout is tried once.
/// Returns `None` when both fail and the item is skipped.
pub fn assemble_slide(
    deck: &mut Deck,
    item: &OutlineItem,
    layout: &LayoutHandle,
    body_font_size: u32,
) -> Option<AssembledSlide> {
    let (index, used_default_layout) = match deck.add_slide(layout) {
        Ok(index) => (index, false),
        Err(err) => {
            warn!("Could not add slide with layout '{}': {}", layout.declared_name, err);
            let default = deck.default_layout()?.clone();
            match deck.add_slide(&default) {
                Ok(index) => (index, true),
                Err(err) => {
                    warn!("Default layout '{}' failed as well: {}", default.declared_name, err);
                    return None;
                }
            }
        }
    };

    let slide = deck.slide_mut(index)?;
    let body_written = fill_slide(slide, item, body_font_size);
    Some(AssembledSlide {
        layout: slide.layout().declared_name.clone(),
        used_default_layout,
        body_written,
    })
}

/// Write the title and points into the slide's placeholders.
///
/// Returns whether the points were written.
pub fn fill_slide(slide: &mut SlideDraft, item: &OutlineItem, body_font_size: u32) -> bool {
    let title_index = pick_placeholder(TITLE_RULES, slide.placeholders(), None);
    match title_index {
        Some(index) => {
            let title = if item.title.is_empty() { " " } else { item.title.as_str() };
            slide.set_text(index, title, None);
        }
        None => warn!("Layout '{}' has no placeholder for the title", slide.layout().declared_name),
    }

    if item.points.is_empty() {
        return false;
    }

    match pick_placeholder(BODY_RULES, slide.placeholders(), title_index) {
        Some(index) => {
            debug!(
                "Writing {} points into '{}'",
                item.points.len(),
                slide.placeholders()[index].name
            );
            slide.set_text(index, &item.points.join("\n"), Some(body_font_size))
        }
        None => {
            warn!(
                "Layout '{}' has no body placeholder; dropping {} points of '{}'",
                slide.layout().declared_name,
                item.points.len(),
                item.title
            );
            false
        }
    }
}
