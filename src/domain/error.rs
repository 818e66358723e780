use std::io;

use thiserror::Error;

/// Library-wide error type for deckgen operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration values failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Template file is missing, unreadable, or not a usable presentation.
    #[error("Failed to load template '{path}': {reason}")]
    TemplateLoad { path: String, reason: String },

    /// The template did not yield any slide layouts.
    #[error("No slide layouts available in the template")]
    EmptyLayoutCatalog,

    /// Language model request failed (network, timeout, service error, bad payload).
    #[error("Language model request failed: {0}")]
    ModelInvocation(String),

    /// The model reply could not be turned into an outline.
    #[error("Failed to parse outline from model response: {0}")]
    OutlineParse(String),

    /// Prompt template rendering failed.
    #[error("Failed to render prompt '{template}': {reason}")]
    PromptRender { template: String, reason: String },

    /// Layout handle does not belong to the presentation being assembled.
    #[error("Layout '{0}' does not belong to this presentation")]
    ForeignLayout(String),

    /// Presentation could not be written.
    #[error("Failed to write presentation '{path}': {reason}")]
    PresentationWrite { path: String, reason: String },

    /// Interactive input was aborted or failed.
    #[error("Input error: {0}")]
    Input(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}
