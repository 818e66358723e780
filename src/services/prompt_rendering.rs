//! Prompt rendering service.
//!
//! Prompts are embedded templates rendered with strict Jinja-compatible
//! semantics. Only `{{ ... }}` interpolation is allowed; anything computed
//! (summaries, name lists) is prepared before rendering.

use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior, Value, context};

use crate::domain::layout_selection::content_summary;
use crate::domain::{AppError, LayoutCatalog, OutlineItem};

const OUTLINE_TEMPLATE: &str = include_str!("../prompts/outline.j2");
const LAYOUT_SELECTION_TEMPLATE: &str = include_str!("../prompts/layout_selection.j2");

/// Prompt asking for a JSON outline of about `slide_count` slides.
pub fn outline_prompt(topic: &str, slide_count: u32) -> Result<String, AppError> {
    render_template(OUTLINE_TEMPLATE, context! { topic, slide_count }, "outline")
}

/// Prompt asking for exactly one layout name for `item`.
pub fn layout_selection_prompt(
    item: &OutlineItem,
    catalog: &LayoutCatalog,
) -> Result<String, AppError> {
    let layout_names = catalog.names().collect::<Vec<_>>().join(", ");
    render_template(
        LAYOUT_SELECTION_TEMPLATE,
        context! { content_summary => content_summary(item), layout_names },
        "layout_selection",
    )
}

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn render_template(template: &str, ctx: Value, template_name: &str) -> Result<String, AppError> {
    if let Some(token) = disallowed_template_token(template) {
        return Err(AppError::PromptRender {
            template: template_name.to_string(),
            reason: format!("template syntax '{}' is not allowed", token),
        });
    }

    let env = ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env
    });

    env.render_str(template, ctx).map_err(|err| AppError::PromptRender {
        template: template_name.to_string(),
        reason: err.to_string(),
    })
}

fn disallowed_template_token(template: &str) -> Option<&'static str> {
    if template.contains("{%") {
        return Some("{%");
    }
    if template.contains("{#") {
        return Some("{#");
    }
    None
}
