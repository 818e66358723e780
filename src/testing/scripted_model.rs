use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::LanguageModel;

/// Language model that answers from a queue and records every prompt.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, AppError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn fail(self, message: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Err(AppError::ModelInvocation(message.into())));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl LanguageModel for ScriptedModel {
    fn invoke(&self, prompt: &str) -> Result<String, AppError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::ModelInvocation("no scripted reply left".into())))
    }
}
