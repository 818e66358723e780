//! Generator configuration loading and command-line overrides.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use url::Url;

use crate::domain::{AppError, GeneratorConfig};

/// Configuration file looked up in the current directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "deckgen.toml";

/// Load the generator configuration.
///
/// With an explicit path the file must exist. Without one, `deckgen.toml` in the
/// current directory is used when present and defaults apply otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<GeneratorConfig, AppError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    match fs::read_to_string(&path) {
        Ok(content) => parse_config_content(&content),
        Err(err) if err.kind() == ErrorKind::NotFound && !required => {
            let config = GeneratorConfig::default();
            config.validate()?;
            Ok(config)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Err(AppError::config_error(format!(
            "Config file not found: {}",
            path.display()
        ))),
        Err(err) => Err(AppError::Io(err)),
    }
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<GeneratorConfig, AppError> {
    let config: GeneratorConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Values supplied on the command line that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub slide_count: Option<u32>,
    pub model: Option<String>,
    pub api_url: Option<String>,
}

impl ConfigOverrides {
    /// Apply the overrides and re-validate the result.
    pub fn apply(self, mut config: GeneratorConfig) -> Result<GeneratorConfig, AppError> {
        if let Some(template) = self.template {
            config.deck.template = template;
        }
        if let Some(output) = self.output {
            config.deck.output = output;
        }
        if let Some(slide_count) = self.slide_count {
            config.deck.slide_count = slide_count;
        }
        if let Some(model) = self.model {
            config.model.model = model;
        }
        if let Some(api_url) = self.api_url {
            config.model.api_url = Url::parse(&api_url).map_err(|e| {
                AppError::InvalidConfig(format!("api_url '{}' is not a valid URL: {}", api_url, e))
            })?;
        }
        config.validate()?;
        Ok(config)
    }
}
