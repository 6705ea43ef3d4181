//! Precomputed solution arrays of a model.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SectionError};
use crate::grid::Axis;

/// The three components of the scalar-field gradient, one value per cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientField {
    pub gx: Vec<f64>,
    pub gy: Vec<f64>,
    pub gz: Vec<f64>,
}

impl GradientField {
    /// The gradient component along `axis`.
    #[must_use]
    pub fn component(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => &self.gx,
            Axis::Y => &self.gy,
            Axis::Z => &self.gz,
        }
    }
}

/// Flat solution arrays on the model grid, all in C order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Solution {
    /// Lithology id per cell.
    pub lith_block: Vec<f64>,
    /// Fault block id per cell, one array per fault series.
    #[serde(default)]
    pub fault_blocks: Vec<Vec<f64>>,
    /// Scalar field per cell, one array per series.
    #[serde(default)]
    pub scalar_field_matrix: Vec<Vec<f64>>,
    /// Scalar field value at each surface of a series; zeros are padding.
    #[serde(default)]
    pub scalar_field_at_surface_points: Vec<Vec<f64>>,
    /// Gradient of a scalar field, when computed.
    #[serde(default)]
    pub gradients: Option<GradientField>,
}

impl Solution {
    /// Every per-cell array of the solution.
    pub fn arrays(&self) -> impl Iterator<Item = &[f64]> {
        let gradients = self
            .gradients
            .iter()
            .flat_map(|g| [g.gx.as_slice(), g.gy.as_slice(), g.gz.as_slice()]);
        std::iter::once(self.lith_block.as_slice())
            .filter(|a| !a.is_empty())
            .chain(self.fault_blocks.iter().map(Vec::as_slice))
            .chain(self.scalar_field_matrix.iter().map(Vec::as_slice))
            .chain(gradients)
    }

    /// Scalar field of series `index`.
    pub fn scalar_field(&self, index: usize) -> Result<&[f64]> {
        self.scalar_field_matrix
            .get(index)
            .map(Vec::as_slice)
            .ok_or(SectionError::SeriesIndexOutOfRange {
                index,
                len: self.scalar_field_matrix.len(),
            })
    }

    /// Fault block `index`.
    pub fn fault_block(&self, index: usize) -> Result<&[f64]> {
        self.fault_blocks
            .get(index)
            .map(Vec::as_slice)
            .ok_or(SectionError::FaultIndexOutOfRange {
                index,
                len: self.fault_blocks.len(),
            })
    }

    /// Non-zero surface levels of series `index`.
    #[must_use]
    pub fn surface_levels(&self, index: usize) -> Vec<f64> {
        self.scalar_field_at_surface_points
            .get(index)
            .map(|levels| levels.iter().copied().filter(|&v| v != 0.0).collect())
            .unwrap_or_default()
    }

    /// The gradient arrays.
    pub fn gradients(&self) -> Result<&GradientField> {
        self.gradients.as_ref().ok_or(SectionError::MissingGradients)
    }
}
