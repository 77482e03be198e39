use thiserror::Error;

use crate::color::FormatError;

/// Errors that can occur during Hearth initialization and runtime.
#[derive(Debug, Error)]
pub enum HearthError {
    #[error("Element '{0}' not found")]
    ElementNotFound(String),

    #[error("Element '{0}' is not a canvas")]
    NotACanvas(String),

    #[error("2D context unavailable for canvas '{0}'")]
    ContextUnavailable(String),

    #[error("Canvas operation failed: {0}")]
    CanvasOperation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Color(#[from] FormatError),
}
