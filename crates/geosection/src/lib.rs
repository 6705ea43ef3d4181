//! geosection: 2D sections of 3D geological models.
//!
//! Slices precomputed lithology blocks, scalar fields, fault blocks and
//! gradients of a [`GeoModel`] along a cartesian direction and renders them
//! as figures, using the model's surface names and colors for styling.
//!
//! # Quick Start
//!
//! ```no_run
//! use geosection::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let model = GeoModel::from_json_file("model.json")?;
//!     let section = Section2D::new(&model);
//!
//!     let figure = section.plot_block_section(
//!         13,
//!         Direction::Y,
//!         &BlockSource::Lithology,
//!         &BlockOptions::default(),
//!     )?;
//!     section.save(&figure, "section.svg")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Plots
//!
//! - [`Section2D::plot_data`] - surface points and orientations
//! - [`Section2D::plot_block_section`] - lithology, fault or property blocks
//! - [`Section2D::plot_scalar_field`] - filled and line contours
//! - [`Section2D::plot_gradient`] - gradient arrows over contours
//! - [`Section2D::plot_topology`] - topology graphs

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod block;
pub mod cli;
pub mod error;
pub mod gradient;
pub mod plot_data;
pub mod scalar_field;
pub mod section;
pub mod topology;

pub use block::{BlockOptions, BlockSource};
pub use error::{GeosectionError, Result};
pub use gradient::GradientOptions;
pub use plot_data::{DataOptions, DataType, SeriesFilter};
pub use scalar_field::ScalarFieldOptions;
pub use section::Section2D;

// Re-export core types
pub use geosection_core::{
    Axis, Color, Direction, Extent, GeoModel, GradientField, GraphStyle, RegularGrid,
    SectionError, SectionStyle, SliceDescriptor, Solution, TopologyGraph,
};

// Re-export render types
pub use geosection_render::{Figure, Layer, OutputFormat, RenderError};

/// Initializes logging from `RUST_LOG`.
///
/// Does nothing if a logger is already installed.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Initializes logging at a verbosity level, unless `RUST_LOG` overrides it.
///
/// 0 logs warnings, 1 adds info and 2 or more adds debug output.
pub fn init_logging_with_verbosity(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}
