//! Drawing backend for geosection.
//!
//! This crate turns section figures into images:
//! - [`Figure`] layers, legend and colorbar in world coordinates
//! - Named color maps for continuous fields
//! - plotters drawing onto SVG and bitmap backends
//! - File export with the `image` encoders

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod color_maps;
pub mod draw;
pub mod error;
pub mod export;
pub mod figure;

pub use color_maps::{ColorMap, ColorMapRegistry};
pub use draw::draw_figure;
pub use error::{RenderError, RenderResult};
pub use export::{save_figure, to_png_bytes, to_rgb_image, to_svg_string, OutputFormat};
pub use figure::{
    Arrow, Colorbar, Figure, Layer, LegendEntry, LegendKind, Marker, MarkerShape, Paint,
    RasterCell,
};
