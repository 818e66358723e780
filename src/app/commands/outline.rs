//! Outline generation: one prompt, one reply, strict extraction.

use log::debug;

use crate::domain::{AppError, Outline, parse_outline_response};
use crate::ports::LanguageModel;
use crate::services::prompt_rendering::outline_prompt;

/// Ask the model for an outline of about `slide_count` slides.
///
/// Model and parse failures are returned as-is; there is no second attempt.
pub fn generate_outline<M: LanguageModel>(
    model: &M,
    topic: &str,
    slide_count: u32,
) -> Result<Outline, AppError> {
    let prompt = outline_prompt(topic, slide_count)?;
    let reply = model.invoke(&prompt)?;
    debug!("Outline reply: {}", reply);

    let outline = parse_outline_response(&reply)?;
    if outline.is_empty() {
        return Err(AppError::OutlineParse("model returned an empty outline".to_string()));
    }
    Ok(outline)
}
