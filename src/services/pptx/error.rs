use thiserror::Error;

/// Failures while reading or writing a presentation package.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed XML in '{part}': {reason}")]
    Xml { part: String, reason: String },

    #[error("missing package part '{0}'")]
    MissingPart(String),
}

impl PackageError {
    pub(crate) fn xml(part: &str, reason: impl std::fmt::Display) -> Self {
        PackageError::Xml { part: part.to_string(), reason: reason.to_string() }
    }
}
