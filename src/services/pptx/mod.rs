//! Reading templates and writing presentations in the Office Open XML format.

mod deck;
mod error;
mod layouts;
mod package;
mod slide_xml;

pub use deck::{Deck, Paragraph, SlideDraft};
pub use error::PackageError;
pub use layouts::{catalog_from_package, load_layout_catalog};
pub use package::PptxPackage;
