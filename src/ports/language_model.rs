//! Language model port definition.

use crate::domain::AppError;

/// Port for prompt-in, text-out language model calls.
///
/// Replies are untrusted free text; callers extract and validate what they need.
pub trait LanguageModel {
    /// Send one prompt and block until the reply text or an error arrives.
    fn invoke(&self, prompt: &str) -> Result<String, AppError>;
}

impl<M: LanguageModel + ?Sized> LanguageModel for &M {
    fn invoke(&self, prompt: &str) -> Result<String, AppError> {
        (**self).invoke(prompt)
    }
}
