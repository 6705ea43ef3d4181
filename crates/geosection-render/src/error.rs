//! Rendering error types.

use geosection_core::SectionError;
use thiserror::Error;

/// Errors that can occur while drawing or exporting figures.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The plotting backend reported a failure.
    #[error("drawing backend error: {0}")]
    Backend(String),

    /// A named color map is not registered.
    #[error("unknown color map '{0}'")]
    UnknownColorMap(String),

    /// The output file extension has no encoder.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Pixel data did not match the figure size.
    #[error("invalid image data")]
    InvalidImageData,

    /// Image encoding error.
    #[error("image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Section extraction failed.
    #[error(transparent)]
    Section(#[from] SectionError),
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
