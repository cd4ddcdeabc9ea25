//! Encoding and write error definitions.

use thiserror::Error;

/// Errors raised while rendering an envelope to JSON or XML.
///
/// Any of these aborts the whole document; there is no partial output.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// A payload value could not be converted into the envelope model.
    #[error("unsupported payload value: {0}")]
    Unsupported(String),

    /// An object key cannot be used as an XML element name.
    #[error("invalid XML element name: {0:?}")]
    InvalidElementName(String),

    /// The JSON serializer failed.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The XML writer failed.
    #[error("XML encoding failed: {0}")]
    Xml(String),
}

impl serde::ser::Error for EncodingError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        EncodingError::Unsupported(msg.to_string())
    }
}

/// Errors raised by a response destination.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The underlying transport failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The destination no longer accepts bytes.
    #[error("response destination closed")]
    Closed,
}
