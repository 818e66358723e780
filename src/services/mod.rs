mod chat_completions_http;
pub mod pptx;
pub mod prompt_rendering;

pub use chat_completions_http::{API_KEY_ENV_VARS, HttpChatClient};
pub use pptx::{Deck, load_layout_catalog};
