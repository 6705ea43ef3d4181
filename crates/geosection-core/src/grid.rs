//! Regular grid geometry of the modelled volume.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// One of the three cartesian grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Position of the axis in resolution and coordinate triples.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Column label used for coordinates along this axis.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }

    /// Column label used for the gradient component along this axis.
    #[must_use]
    pub const fn gradient_label(self) -> &'static str {
        match self {
            Self::X => "G_x",
            Self::Y => "G_y",
            Self::Z => "G_z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bounds of the modelled volume: `[xmin, xmax, ymin, ymax, zmin, zmax]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extent(pub [f64; 6]);

impl Extent {
    /// Creates an extent from its six bounds.
    #[must_use]
    pub const fn new(bounds: [f64; 6]) -> Self {
        Self(bounds)
    }

    /// Lower bound along an axis.
    #[must_use]
    pub fn min(&self, axis: Axis) -> f64 {
        self.0[2 * axis.index()]
    }

    /// Upper bound along an axis.
    #[must_use]
    pub fn max(&self, axis: Axis) -> f64 {
        self.0[2 * axis.index() + 1]
    }

    /// Length of the volume along an axis.
    #[must_use]
    pub fn span(&self, axis: Axis) -> f64 {
        self.max(axis) - self.min(axis)
    }

    /// The `(min, max)` pairs of two axes, in order.
    #[must_use]
    pub fn subset(&self, a: Axis, b: Axis) -> [f64; 4] {
        [self.min(a), self.max(a), self.min(b), self.max(b)]
    }
}

/// A regular axis-aligned grid of cells.
///
/// Values living on the grid are stored in C order: the value for cell
/// `(i, j, k)` sits at `(i * ny + j) * nz + k`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularGrid {
    /// Number of cells along X, Y and Z.
    pub resolution: [usize; 3],
    /// Bounds of the grid.
    pub extent: Extent,
}

impl RegularGrid {
    /// Creates a new grid.
    #[must_use]
    pub fn new(resolution: [usize; 3], extent: Extent) -> Self {
        Self { resolution, extent }
    }

    /// Number of cells along an axis.
    #[must_use]
    pub fn len(&self, axis: Axis) -> usize {
        self.resolution[axis.index()]
    }

    /// Total number of cells.
    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.resolution.iter().product()
    }

    /// Returns true if any axis has zero cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_cells() == 0
    }

    /// Size of one cell along an axis.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_size(&self, axis: Axis) -> f64 {
        self.extent.span(axis) / self.len(axis).max(1) as f64
    }

    /// Coordinate of the center of cell `index` along an axis.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn center_along(&self, axis: Axis, index: usize) -> f64 {
        self.extent.min(axis) + (index as f64 + 0.5) * self.cell_size(axis)
    }

    /// World position of the center of cell `(i, j, k)`.
    #[must_use]
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> DVec3 {
        DVec3::new(
            self.center_along(Axis::X, i),
            self.center_along(Axis::Y, j),
            self.center_along(Axis::Z, k),
        )
    }

    /// Flattens a 3D cell index to a linear index.
    #[must_use]
    pub fn flatten_index(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.resolution[1] + j) * self.resolution[2] + k
    }
}
