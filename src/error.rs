//! Error types for palette extraction

use thiserror::Error;

/// Errors returned by the extraction engine and its image helpers
#[derive(Debug, Error)]
pub enum PaletteError {
    /// Non-positive sizes, empty pixel data or an unknown model name
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The clustering model could not be fitted to the sample
    #[error("model fit failed: {0}")]
    ModelFit(String),

    /// Encoded image bytes could not be decoded
    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Result type for palette operations
pub type PaletteResult<T> = Result<T, PaletteError>;
