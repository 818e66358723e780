use crate::domain::GeneratorConfig;
use crate::ports::LanguageModel;

/// Application context holding dependencies for command execution.
pub struct AppContext<M: LanguageModel> {
    model: M,
    config: GeneratorConfig,
}

impl<M: LanguageModel> AppContext<M> {
    /// Create a new application context.
    pub fn new(model: M, config: GeneratorConfig) -> Self {
        Self { model, config }
    }

    /// Get a reference to the language model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a reference to the effective configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}
