//! Reshaping flat solution arrays into the grid and cutting sections.

use crate::error::{Result, SectionError};
use crate::grid::Axis;
use crate::slice::Direction;

/// A flat C-order array viewed with the grid's 3D shape.
#[derive(Debug, Clone, Copy)]
pub struct Volume<'a, T> {
    data: &'a [T],
    shape: [usize; 3],
}

impl<'a, T: Copy> Volume<'a, T> {
    /// Reshapes `data` to `shape`.
    ///
    /// # Errors
    /// Returns [`SectionError::SizeMismatch`] when `data` does not hold exactly
    /// `shape[0] * shape[1] * shape[2]` values.
    pub fn new(data: &'a [T], shape: [usize; 3]) -> Result<Self> {
        let expected = shape.iter().product();
        if data.len() != expected {
            return Err(SectionError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    /// Shape of the volume.
    #[must_use]
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Value at cell `(i, j, k)`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize, k: usize) -> T {
        self.data[(i * self.shape[1] + j) * self.shape[2] + k]
    }

    fn get_along(&self, fixed: Axis, cell: usize, h: (Axis, usize), v: (Axis, usize)) -> T {
        let mut idx = [0; 3];
        idx[fixed.index()] = cell;
        idx[h.0.index()] = h.1;
        idx[v.0.index()] = v.1;
        self.get(idx[0], idx[1], idx[2])
    }

    /// Extracts the full section at `cell` across `direction`.
    ///
    /// # Errors
    /// Returns [`SectionError::CellOutOfRange`] if `cell` is outside the volume.
    pub fn section(&self, direction: Direction, cell: usize) -> Result<Section2<T>> {
        self.section_strided(direction, cell, 1)
    }

    /// Extracts every `stride`-th cell of the section on both free axes.
    ///
    /// # Errors
    /// Returns [`SectionError::ZeroStride`] for a zero stride and
    /// [`SectionError::CellOutOfRange`] if `cell` is outside the volume.
    pub fn section_strided(
        &self,
        direction: Direction,
        cell: usize,
        stride: usize,
    ) -> Result<Section2<T>> {
        if stride == 0 {
            return Err(SectionError::ZeroStride);
        }
        let fixed = direction.fixed_axis();
        let len = self.shape[fixed.index()];
        if cell >= len {
            return Err(SectionError::CellOutOfRange {
                direction,
                cell,
                len,
            });
        }
        let (h, v) = direction.free_axes();
        let cols = self.shape[h.index()].div_ceil(stride);
        let rows = self.shape[v.index()].div_ceil(stride);

        let mut data = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                data.push(self.get_along(fixed, cell, (h, col * stride), (v, row * stride)));
            }
        }
        Ok(Section2 {
            cols,
            rows,
            stride,
            data,
        })
    }
}

/// A 2D section in display orientation.
///
/// Columns run along the horizontal plot axis and rows along the vertical
/// one; row 0 is the lowest coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Section2<T> {
    cols: usize,
    rows: usize,
    stride: usize,
    data: Vec<T>,
}

impl<T: Copy> Section2<T> {
    /// Builds a section from row-major values.
    ///
    /// # Errors
    /// Returns [`SectionError::SizeMismatch`] if `data.len() != cols * rows`.
    pub fn from_rows(cols: usize, rows: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != cols * rows {
            return Err(SectionError::SizeMismatch {
                expected: cols * rows,
                actual: data.len(),
            });
        }
        Ok(Self {
            cols,
            rows,
            stride: 1,
            data,
        })
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Sampling stride relative to the grid.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the section holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(col, row)`.
    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Row-major values.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.data
    }

    /// Grid cell index along the horizontal axis of column `col`.
    #[must_use]
    pub fn grid_col(&self, col: usize) -> usize {
        col * self.stride
    }

    /// Grid cell index along the vertical axis of row `row`.
    #[must_use]
    pub fn grid_row(&self, row: usize) -> usize {
        row * self.stride
    }

    /// Iterates `(col, row, value)` over the section.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, &v)| (idx % cols, idx / cols, v))
    }
}

impl Section2<f64> {
    /// Minimum and maximum of the finite values, if any.
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
