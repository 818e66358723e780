//! Generator configuration domain models.

use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::domain::AppError;

/// Largest font size DrawingML accepts, in points.
pub const MAX_FONT_SIZE_PT: u32 = 4000;

/// Configuration for a generation run, loaded from `deckgen.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Language model endpoint configuration.
    #[serde(default)]
    pub model: ModelConfig,
    /// Template, output, and slide settings.
    #[serde(default)]
    pub deck: DeckConfig,
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.model.validate()?;
        self.deck.validate()?;
        Ok(())
    }
}

/// OpenAI-compatible chat completions endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Chat completions endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.model.trim().is_empty() {
            return Err(AppError::InvalidConfig("model must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::InvalidConfig(
                "temperature must be between 0.0 and 2.0".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        Ok(())
    }
}

fn default_api_url() -> Url {
    Url::parse("http://localhost:11434/v1/chat/completions")
        .expect("Default API URL must be valid")
}

fn default_model() -> String {
    "Qwen/Qwen2.5-72B-Instruct-GPTQ-Int4".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_timeout() -> u64 {
    120
}

/// Deck settings: where the template lives, where the result goes, and how it looks.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckConfig {
    /// Template presentation providing the layouts.
    #[serde(default = "default_template")]
    pub template: PathBuf,
    /// Output presentation path.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Advisory slide count passed to the outline prompt.
    #[serde(default = "default_slide_count")]
    pub slide_count: u32,
    /// Font size applied to every body paragraph, in points.
    #[serde(default = "default_body_font_size_pt")]
    pub body_font_size_pt: u32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            output: default_output(),
            slide_count: default_slide_count(),
            body_font_size_pt: default_body_font_size_pt(),
        }
    }
}

impl DeckConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.template.as_os_str().is_empty() {
            return Err(AppError::InvalidConfig("template must not be empty".to_string()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(AppError::InvalidConfig("output must not be empty".to_string()));
        }
        if self.slide_count == 0 {
            return Err(AppError::InvalidConfig("slide_count must be greater than 0".to_string()));
        }
        if !(1..=MAX_FONT_SIZE_PT).contains(&self.body_font_size_pt) {
            return Err(AppError::InvalidConfig(format!(
                "body_font_size_pt must be between 1 and {}",
                MAX_FONT_SIZE_PT
            )));
        }
        Ok(())
    }

    /// Body font size in hundredths of a point, as DrawingML expects it.
    pub fn body_font_size(&self) -> u32 {
        self.body_font_size_pt.min(MAX_FONT_SIZE_PT) * 100
    }
}

fn default_template() -> PathBuf {
    PathBuf::from("template.pptx")
}

fn default_output() -> PathBuf {
    PathBuf::from("generated_presentation.pptx")
}

fn default_slide_count() -> u32 {
    7
}

fn default_body_font_size_pt() -> u32 {
    18
}
