pub mod configuration;
pub mod error;
pub mod layout;
pub mod layout_selection;
pub mod outline;
pub mod placeholder_matching;

pub use configuration::{
    ConfigOverrides, DeckConfig, GeneratorConfig, ModelConfig, load_config, parse_config_content,
};
pub use error::AppError;
pub use layout::{LayoutCatalog, LayoutHandle, Placeholder, PlaceholderKind};
pub use layout_selection::{LayoutChoice, LayoutSource, resolve_layout_choice};
pub use outline::{Outline, OutlineItem, parse_outline_response};
