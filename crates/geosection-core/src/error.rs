//! Error types for geosection.

use thiserror::Error;

use crate::slice::Direction;

/// The main error type for model access and section extraction.
#[derive(Error, Debug)]
pub enum SectionError {
    /// A direction string was not one of `x`, `y` or `z`.
    #[error("'{0}' must be a cartesian direction, i.e. xyz")]
    InvalidDirection(String),

    /// The requested cell lies outside the grid along the fixed axis.
    #[error("cell {cell} is out of range for direction {direction} (resolution {len})")]
    CellOutOfRange {
        direction: Direction,
        cell: usize,
        len: usize,
    },

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A stride of zero was requested for subsampling.
    #[error("stride must be at least 1")]
    ZeroStride,

    /// A series name was not found in the series table.
    #[error("series '{0}' not found")]
    UnknownSeries(String),

    /// A series index has no scalar field in the solution.
    #[error("series index {index} out of range ({len} scalar fields)")]
    SeriesIndexOutOfRange { index: usize, len: usize },

    /// A fault block index has no array in the solution.
    #[error("fault block {index} out of range ({len} fault blocks)")]
    FaultIndexOutOfRange { index: usize, len: usize },

    /// A surface property column is missing from the surface table.
    #[error("the value to be plotted has to be a surface property, '{0}' is not")]
    UnknownProperty(String),

    /// The model has no solution attached.
    #[error("model has no computed solution")]
    MissingSolution,

    /// The solution has no gradient arrays.
    #[error("solution has no gradient field")]
    MissingGradients,

    /// A topography height map has no nodes along an axis.
    #[error("topography height map has no nodes")]
    EmptyTopography,

    /// A color string could not be parsed.
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    /// A graph edge references a node without a centroid.
    #[error("node {0} has no centroid")]
    MissingCentroid(u32),

    /// Centroids must have 2 or 3 components.
    #[error("centroid of node {node} has {len} components, expected 2 or 3")]
    InvalidCentroid { node: u32, len: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for geosection-core operations.
pub type Result<T> = std::result::Result<T, SectionError>;
