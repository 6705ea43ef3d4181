//! Section selection along a cartesian direction.
//!
//! A section is the plane of cells sharing one index along the fixed axis.
//! The two remaining axes become the horizontal and vertical plot axes.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SectionError};
use crate::grid::{Axis, RegularGrid};

/// The cartesian direction a section is taken across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Section normal to X, showing the Y-Z plane.
    X,
    /// Section normal to Y, showing the X-Z plane.
    #[default]
    Y,
    /// Section normal to Z, showing the X-Y plane.
    Z,
}

impl Direction {
    /// The axis held constant by this section.
    #[must_use]
    pub const fn fixed_axis(self) -> Axis {
        match self {
            Self::X => Axis::X,
            Self::Y => Axis::Y,
            Self::Z => Axis::Z,
        }
    }

    /// The horizontal and vertical plot axes, in that order.
    #[must_use]
    pub const fn free_axes(self) -> (Axis, Axis) {
        match self {
            Self::X => (Axis::Y, Axis::Z),
            Self::Y => (Axis::X, Axis::Z),
            Self::Z => (Axis::X, Axis::Y),
        }
    }

    /// Whether the vertical plot axis is depth, so vertical exaggeration applies.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::X | Self::Y)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        })
    }
}

impl FromStr for Direction {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(SectionError::InvalidDirection(s.to_string())),
        }
    }
}

/// Everything a renderer needs to know about one section.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceDescriptor {
    /// Direction the section is taken across.
    pub direction: Direction,
    /// Index of the section along the fixed axis.
    pub cell_number: usize,
    /// Horizontal plot axis.
    pub horizontal: Axis,
    /// Vertical plot axis.
    pub vertical: Axis,
    /// `[hmin, hmax, vmin, vmax]` of the section in world coordinates.
    pub extent: [f64; 4],
    /// Number of grid cells along the horizontal and vertical axes.
    pub cells: (usize, usize),
}

impl SliceDescriptor {
    /// Selects the section `cell_number` across `direction`.
    ///
    /// # Errors
    /// Returns [`SectionError::CellOutOfRange`] when the grid has no such cell.
    pub fn new(grid: &RegularGrid, direction: Direction, cell_number: usize) -> Result<Self> {
        let len = grid.len(direction.fixed_axis());
        if cell_number >= len {
            return Err(SectionError::CellOutOfRange {
                direction,
                cell: cell_number,
                len,
            });
        }
        let (horizontal, vertical) = direction.free_axes();
        let extent = grid.extent.subset(horizontal, vertical);
        log::debug!("section {direction}={cell_number}: extent {extent:?}");
        Ok(Self {
            direction,
            cell_number,
            horizontal,
            vertical,
            extent,
            cells: (grid.len(horizontal), grid.len(vertical)),
        })
    }

    /// Parses `direction` and selects the section.
    ///
    /// # Errors
    /// Returns [`SectionError::InvalidDirection`] for anything but `x`, `y`, `z`.
    pub fn parse(grid: &RegularGrid, direction: &str, cell_number: usize) -> Result<Self> {
        Self::new(grid, direction.parse()?, cell_number)
    }

    /// Axis labels `(horizontal, vertical)`.
    #[must_use]
    pub fn labels(&self) -> (&'static str, &'static str) {
        (self.horizontal.label(), self.vertical.label())
    }

    /// Gradient component labels `(horizontal, vertical)`.
    #[must_use]
    pub fn gradient_labels(&self) -> (&'static str, &'static str) {
        (
            self.horizontal.gradient_label(),
            self.vertical.gradient_label(),
        )
    }

    /// Width over height of the section in world units.
    #[must_use]
    pub fn data_aspect(&self) -> f64 {
        let [h0, h1, v0, v1] = self.extent;
        (h1 - h0) / (v1 - v0)
    }

    /// Data aspect with vertical exaggeration applied to depth sections.
    #[must_use]
    pub fn exaggerated_aspect(&self, ve: f64) -> f64 {
        if self.direction.is_vertical() {
            self.data_aspect() / ve
        } else {
            self.data_aspect()
        }
    }

    /// World position of a point given in cell-index space.
    ///
    /// Integer coordinates land on cell centers, so `(0.0, 0.0)` is the
    /// center of the lower-left cell of the section.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_to_world(&self, col: f64, row: f64) -> DVec2 {
        let [h0, h1, v0, v1] = self.extent;
        let dh = (h1 - h0) / self.cells.0.max(1) as f64;
        let dv = (v1 - v0) / self.cells.1.max(1) as f64;
        DVec2::new(h0 + (col + 0.5) * dh, v0 + (row + 0.5) * dv)
    }

    /// World rectangle `[h0, v0, h1, v1]` covered by cell `(col, row)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_bounds(&self, col: usize, row: usize) -> [f64; 4] {
        let [h0, h1, v0, v1] = self.extent;
        let dh = (h1 - h0) / self.cells.0.max(1) as f64;
        let dv = (v1 - v0) / self.cells.1.max(1) as f64;
        [
            h0 + col as f64 * dh,
            v0 + row as f64 * dv,
            h0 + (col + 1) as f64 * dh,
            v0 + (row + 1) as f64 * dv,
        ]
    }

    /// Stretch factor applied to the vertical axis when displaying a raster.
    #[must_use]
    pub fn image_aspect(&self, ve: f64) -> f64 {
        if self.direction.is_vertical() {
            ve
        } else {
            1.0
        }
    }
}
