//! Rules for deciding which placeholder receives the title and which the body text.
//!
//! Rules are evaluated in order and the first placeholder matching a rule wins.

use crate::domain::{Placeholder, PlaceholderKind};

/// Lower-cased name prefixes that mark a title placeholder.
const TITLE_NAME_MARKERS: [&str; 2] = ["title", "标题"];

/// Lower-cased name fragments that mark a body placeholder.
const BODY_NAME_KEYWORDS: [&str; 3] = ["body", "content", "内容"];

/// Placeholder type codes that accept body text (body, object).
const BODY_TYPE_CODES: [u32; 2] = [2, 7];

/// One step of a placement policy.
#[derive(Debug, Clone, Copy)]
pub enum PlaceholderRule {
    /// First placeholder satisfying the predicate.
    Matches(fn(&Placeholder) -> bool),
    /// First placeholder, whatever it is.
    FirstAvailable,
    /// First placeholder, but only when the slide has more than one.
    FirstWhenSeveral,
}

/// Title: designated title region, then a title-like name, then the first placeholder.
pub const TITLE_RULES: &[PlaceholderRule] = &[
    PlaceholderRule::Matches(is_title_region),
    PlaceholderRule::Matches(has_title_marker),
    PlaceholderRule::FirstAvailable,
];

/// Body: body-like name or type, then the first remaining placeholder of a multi-placeholder slide.
pub const BODY_RULES: &[PlaceholderRule] =
    &[PlaceholderRule::Matches(is_body_candidate), PlaceholderRule::FirstWhenSeveral];

pub fn is_title_region(placeholder: &Placeholder) -> bool {
    matches!(placeholder.kind, PlaceholderKind::Title | PlaceholderKind::CenterTitle)
}

pub fn has_title_marker(placeholder: &Placeholder) -> bool {
    let name = placeholder.name.to_lowercase();
    TITLE_NAME_MARKERS.iter().any(|marker| name.starts_with(marker))
}

pub fn is_body_candidate(placeholder: &Placeholder) -> bool {
    let name = placeholder.name.to_lowercase();
    BODY_NAME_KEYWORDS.iter().any(|keyword| name.contains(keyword))
        || BODY_TYPE_CODES.contains(&placeholder.kind.type_code())
}

/// Index of the placeholder chosen by `rules`, never `exclude`.
pub fn pick_placeholder(
    rules: &[PlaceholderRule],
    placeholders: &[Placeholder],
    exclude: Option<usize>,
) -> Option<usize> {
    let candidates =
        || placeholders.iter().enumerate().filter(move |(index, _)| Some(*index) != exclude);

    rules.iter().find_map(|rule| match rule {
        PlaceholderRule::Matches(predicate) => {
            candidates().find(|(_, placeholder)| predicate(placeholder)).map(|(index, _)| index)
        }
        PlaceholderRule::FirstAvailable => candidates().next().map(|(index, _)| index),
        PlaceholderRule::FirstWhenSeveral if placeholders.len() > 1 => {
            candidates().next().map(|(index, _)| index)
        }
        PlaceholderRule::FirstWhenSeveral => None,
    })
}
