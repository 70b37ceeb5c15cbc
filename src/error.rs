use thiserror::Error;

/// Errors that can occur while building, parsing or writing fermentables
#[derive(Error, Debug)]
pub enum FermentableError {
    /// Input document is malformed or has the wrong shape
    #[error("Format error: {0}")]
    Format(String),

    /// Type token is not one of the known fermentable types
    #[error("Invalid fermentable type: {0:?}")]
    InvalidClassification(String),

    /// Failure reported by the XML reader or writer
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O failure while writing a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl FermentableError {
    /// True for errors caused by the shape or content of an input document.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_) | Self::Xml(_))
    }
}
