use log::{debug, warn};

use crate::domain::{
    AppError, LayoutCatalog, LayoutChoice, LayoutSource, OutlineItem, resolve_layout_choice,
};
use crate::ports::LanguageModel;
use crate::services::prompt_rendering::layout_selection_prompt;

/// Ask the model which layout suits `item`.
///
/// Model failures and unknown answers fall back to a default layout; only an
/// empty catalog is an error.
pub fn select_layout<M: LanguageModel>(
    model: &M,
    item: &OutlineItem,
    catalog: &LayoutCatalog,
) -> Result<LayoutChoice, AppError> {
    if catalog.is_empty() {
        return Err(AppError::EmptyLayoutCatalog);
    }

    let reply = match layout_selection_prompt(item, catalog).and_then(|p| model.invoke(&p)) {
        Ok(reply) => {
            debug!("Layout reply for '{}': {:?}", item.title, reply);
            Some(reply)
        }
        Err(err) => {
            warn!("Layout selection for '{}' failed: {}", item.title, err);
            None
        }
    };

    let choice = resolve_layout_choice(reply.as_deref(), catalog)?;
    if choice.source != LayoutSource::Model
        && let Some(reply) = &reply
    {
        warn!("Model answered {:?}, which is not a layout; using '{}'", reply.trim(), choice.name);
    }
    Ok(choice)
}
