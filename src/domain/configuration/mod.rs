pub mod generator_config;
pub mod loader;

pub use generator_config::{DeckConfig, GeneratorConfig, ModelConfig};
pub use loader::{ConfigOverrides, DEFAULT_CONFIG_FILE, load_config, parse_config_content};
