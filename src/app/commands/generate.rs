//! The full generation pipeline: template, outline, per-slide layout, save.

use std::path::PathBuf;

use log::info;

use super::assemble::{AssembledSlide, assemble_slide};
use super::outline::generate_outline;
use super::select_layout::select_layout;
use crate::app::AppContext;
use crate::domain::{AppError, LayoutChoice, LayoutSource};
use crate::ports::LanguageModel;
use crate::services::pptx::Deck;

/// A slide that made it into the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideReport {
    pub title: String,
    /// Layout the slide was built from.
    pub layout: String,
    pub source: LayoutSource,
    pub used_default_layout: bool,
}

/// Summary of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub output: PathBuf,
    pub slides: Vec<SlideReport>,
    /// Titles of outline items that could not be placed.
    pub skipped: Vec<String>,
}

/// Execute the generate command for `topic`.
pub fn execute<M: LanguageModel>(
    ctx: &AppContext<M>,
    topic: &str,
) -> Result<GenerateOutcome, AppError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(AppError::Input("Topic must not be empty".to_string()));
    }

    let deck_config = &ctx.config().deck;
    println!("📄 Using template: {}", deck_config.template.display());
    let mut deck = Deck::open(&deck_config.template)?;
    if deck.catalog().is_empty() {
        return Err(AppError::TemplateLoad {
            path: deck_config.template.display().to_string(),
            reason: "template defines no slide layouts".to_string(),
        });
    }
    let names: Vec<&str> = deck.catalog().names().collect();
    println!("✅ Loaded {} layouts: {}", names.len(), names.join(", "));

    println!("🧠 Generating outline for \"{}\" (about {} slides)...", topic, deck_config.slide_count);
    let outline = generate_outline(ctx.model(), topic, deck_config.slide_count)?;
    println!("✅ Outline with {} slides:", outline.len());
    for (i, item) in outline.iter().enumerate() {
        println!("  {}. {} ({} points)", i + 1, item.title, item.points.len());
    }

    let catalog = deck.catalog().clone();
    let body_font_size = deck_config.body_font_size();
    let mut slides = Vec::with_capacity(outline.len());
    let mut skipped = Vec::new();

    for (i, item) in outline.iter().enumerate() {
        let choice = select_layout(ctx.model(), item, &catalog)?;
        let Some(layout) = catalog.get(&choice.name) else {
            return Err(AppError::EmptyLayoutCatalog);
        };

        match assemble_slide(&mut deck, item, layout, body_font_size) {
            Some(assembled) => {
                let (marker, how) = slide_status(&choice, &assembled);
                println!(
                    "{} Slide {}/{}: '{}' -> {} ({})",
                    marker,
                    i + 1,
                    outline.len(),
                    item.title,
                    assembled.layout,
                    how
                );
                slides.push(SlideReport {
                    title: item.title.clone(),
                    layout: assembled.layout,
                    source: choice.source,
                    used_default_layout: assembled.used_default_layout,
                });
            }
            None => {
                println!("⚠️ Slide {}/{}: '{}' skipped", i + 1, outline.len(), item.title);
                skipped.push(item.title.clone());
            }
        }
    }

    deck.save(&deck_config.output)?;
    info!("Wrote {} slides, skipped {}", slides.len(), skipped.len());
    println!("✅ Presentation saved to {}", deck_config.output.display());

    Ok(GenerateOutcome { output: deck_config.output.clone(), slides, skipped })
}

/// Progress marker and note for a placed slide.
fn slide_status(choice: &LayoutChoice, assembled: &AssembledSlide) -> (&'static str, String) {
    if assembled.used_default_layout {
        return ("⚠️", format!("default layout in place of '{}'", choice.name));
    }
    let marker = if choice.source == LayoutSource::Model { "✅" } else { "⚠️" };
    (marker, choice.source.label().to_string())
}
