//! Core abstractions for geosection.
//!
//! This crate provides the model-side building blocks of section rendering:
//! - [`GeoModel`] and its tables, solution arrays and topography
//! - [`SliceDescriptor`] selection of a section across a [`Direction`]
//! - [`Volume`] reshaping and [`Section2`] extraction
//! - Marching-squares [`isolines`] and contour level helpers
//! - The surface [`ColorLookup`] and categorical [`Palette`]
//! - Styling options

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Coordinates are compared exactly in a few lookups
#![allow(clippy::float_cmp)]

pub mod color;
pub mod contour;
pub mod error;
pub mod grid;
pub mod model;
pub mod options;
pub mod slice;
pub mod solution;
pub mod topography;
pub mod topology;
pub mod volume;

pub use color::{Color, ColorLookup, Palette};
pub use contour::{band_index, contour_levels, isolines, Isoline};
pub use error::{Result, SectionError};
pub use grid::{Axis, Extent, RegularGrid};
pub use model::{GeoModel, Orientation, Series, Surface, SurfacePoint};
pub use options::{GraphStyle, SectionStyle};
pub use slice::{Direction, SliceDescriptor};
pub use solution::{GradientField, Solution};
pub use topography::Topography;
pub use topology::{CentroidProjection, TopologyGraph};
pub use volume::{Section2, Volume};

// Re-export glam types for convenience
pub use glam::{DVec2, DVec3, Vec3};
