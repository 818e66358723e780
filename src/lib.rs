//! deckgen: turn a topic into a PowerPoint presentation.
//!
//! A language model drafts the outline and picks a template layout for each
//! slide; the slides are written into a copy of the template.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use std::path::{Path, PathBuf};

use app::AppContext;
use app::commands::{generate as generate_cmd, layouts as layouts_cmd};
use services::HttpChatClient;

pub use app::commands::generate::{GenerateOutcome, SlideReport};
pub use app::commands::layouts::LayoutSummary;
pub use domain::{AppError, ConfigOverrides, GeneratorConfig, LayoutSource, Outline, OutlineItem};
pub use ports::LanguageModel;

/// Inputs of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub topic: String,
    /// Explicit configuration file; `deckgen.toml` is used when present otherwise.
    pub config_path: Option<PathBuf>,
    pub overrides: ConfigOverrides,
}

/// Generate a presentation using the configured chat completions endpoint.
pub fn generate(options: GenerateOptions) -> Result<GenerateOutcome, AppError> {
    let config = resolve_config(options.config_path.as_deref(), options.overrides)?;
    let model = HttpChatClient::from_env_with_config(&config.model)?;
    generate_with(model, config, &options.topic)
}

/// Generate a presentation with a caller-supplied language model.
pub fn generate_with<M: LanguageModel>(
    model: M,
    config: GeneratorConfig,
    topic: &str,
) -> Result<GenerateOutcome, AppError> {
    let ctx = AppContext::new(model, config);
    generate_cmd::execute(&ctx, topic)
}

/// Inputs of a layout listing.
#[derive(Debug, Clone, Default)]
pub struct LayoutsOptions {
    pub config_path: Option<PathBuf>,
    pub template: Option<PathBuf>,
}

/// List the layouts of the configured template under the names offered to the model.
pub fn layouts(options: LayoutsOptions) -> Result<Vec<LayoutSummary>, AppError> {
    let overrides = ConfigOverrides { template: options.template, ..Default::default() };
    let config = resolve_config(options.config_path.as_deref(), overrides)?;
    layouts_cmd::execute(&config.deck.template)
}

fn resolve_config(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<GeneratorConfig, AppError> {
    let config = domain::load_config(config_path)?;
    overrides.apply(config)
}
