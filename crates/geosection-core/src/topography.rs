//! Topography height maps and their trace along a section.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SectionError};
use crate::grid::RegularGrid;
use crate::slice::Direction;

/// A regular height map over the horizontal plane.
///
/// `heights[i * ny + j]` is the elevation at node `(i, j)`; nodes span the
/// extent inclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topography {
    /// Number of nodes along X and Y.
    pub resolution: [usize; 2],
    /// `[xmin, xmax, ymin, ymax]`.
    pub extent: [f64; 4],
    /// Elevations in C order.
    pub heights: Vec<f64>,
}

impl Topography {
    /// Checks that the map has nodes and the heights match the resolution.
    pub fn validate(&self) -> Result<()> {
        let expected = self.resolution[0] * self.resolution[1];
        if expected == 0 {
            return Err(SectionError::EmptyTopography);
        }
        if self.heights.len() == expected {
            Ok(())
        } else {
            Err(SectionError::SizeMismatch {
                expected,
                actual: self.heights.len(),
            })
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn node_coord(&self, axis: usize, index: usize) -> f64 {
        let (lo, hi) = (self.extent[2 * axis], self.extent[2 * axis + 1]);
        let n = self.resolution[axis];
        if n < 2 {
            return lo;
        }
        lo + (hi - lo) * index as f64 / (n - 1) as f64
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn nearest_node(&self, axis: usize, coord: f64) -> usize {
        let (lo, hi) = (self.extent[2 * axis], self.extent[2 * axis + 1]);
        let n = self.resolution[axis];
        if n < 2 || hi <= lo {
            return 0;
        }
        let t = ((coord - lo) / (hi - lo)).clamp(0.0, 1.0);
        ((t * (n - 1) as f64).round() as usize).min(n - 1)
    }

    /// Trace of the surface along a vertical section, as `(horizontal, z)` points.
    ///
    /// Returns `None` for horizontal (Z) sections, which have no trace.
    ///
    /// # Errors
    /// Returns [`SectionError::CellOutOfRange`] if the grid has no such cell,
    /// or a validation error if the height map is malformed.
    pub fn line_in_section(
        &self,
        grid: &RegularGrid,
        direction: Direction,
        cell_number: usize,
    ) -> Result<Option<Vec<DVec2>>> {
        self.validate()?;
        let fixed = direction.fixed_axis();
        let len = grid.len(fixed);
        if cell_number >= len {
            return Err(SectionError::CellOutOfRange {
                direction,
                cell: cell_number,
                len,
            });
        }
        let coord = grid.center_along(fixed, cell_number);
        let line = match direction {
            Direction::X => {
                let i = self.nearest_node(0, coord);
                (0..self.resolution[1])
                    .map(|j| {
                        let z = self.heights[i * self.resolution[1] + j];
                        DVec2::new(self.node_coord(1, j), z)
                    })
                    .collect()
            }
            Direction::Y => {
                let j = self.nearest_node(1, coord);
                (0..self.resolution[0])
                    .map(|i| {
                        let z = self.heights[i * self.resolution[1] + j];
                        DVec2::new(self.node_coord(0, i), z)
                    })
                    .collect()
            }
            Direction::Z => return Ok(None),
        };
        Ok(Some(line))
    }

    /// Closed polygon covering everything above the trace up to the top of `extent`.
    ///
    /// `extent` is the section's `[hmin, hmax, vmin, vmax]`.
    #[must_use]
    pub fn mask_polygon(line: &[DVec2], extent: [f64; 4]) -> Vec<DVec2> {
        let (Some(first), Some(last)) = (line.first(), line.last()) else {
            return Vec::new();
        };
        let [h0, h1, _, v1] = extent;
        let mut polygon = line.to_vec();
        polygon.push(DVec2::new(h1, last.y));
        polygon.push(DVec2::new(h1, v1));
        polygon.push(DVec2::new(h0, v1));
        polygon.push(DVec2::new(h0, first.y));
        polygon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Extent;

    fn topo() -> Topography {
        // z = 10 * i - j on a 3 x 2 node map.
        let mut heights = Vec::new();
        for i in 0..3 {
            for j in 0..2 {
                heights.push(10.0 * f64::from(i) - f64::from(j));
            }
        }
        Topography {
            resolution: [3, 2],
            extent: [0.0, 100.0, 0.0, 50.0],
            heights,
        }
    }

    fn grid() -> RegularGrid {
        RegularGrid::new([4, 2, 4], Extent::new([0.0, 100.0, 0.0, 50.0, -50.0, 50.0]))
    }

    #[test]
    fn test_line_along_y_section() {
        let line = topo()
            .line_in_section(&grid(), Direction::Y, 1)
            .unwrap()
            .unwrap();
        // cell 1 center is y = 37.5, nearest node j = 1
        assert_eq!(line.len(), 3);
        assert_eq!(line[0], DVec2::new(0.0, -1.0));
        assert_eq!(line[2], DVec2::new(100.0, 19.0));
    }

    #[test]
    fn test_line_along_x_section() {
        let line = topo()
            .line_in_section(&grid(), Direction::X, 3)
            .unwrap()
            .unwrap();
        // cell 3 center is x = 87.5, nearest node i = 2
        assert_eq!(line, vec![DVec2::new(0.0, 20.0), DVec2::new(50.0, 19.0)]);
    }

    #[test]
    fn test_horizontal_section_has_no_line() {
        assert!(topo()
            .line_in_section(&grid(), Direction::Z, 0)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_mask_polygon_closes_at_top() {
        let line = vec![DVec2::new(0.0, 1.0), DVec2::new(10.0, 2.0)];
        let poly = Topography::mask_polygon(&line, [0.0, 10.0, -5.0, 5.0]);
        assert_eq!(poly.len(), 6);
        assert_eq!(poly[3], DVec2::new(10.0, 5.0));
        assert_eq!(poly[5], DVec2::new(0.0, 1.0));
        assert!(Topography::mask_polygon(&[], [0.0, 1.0, 0.0, 1.0]).is_empty());
    }

    #[test]
    fn test_validate() {
        let mut t = topo();
        assert!(t.validate().is_ok());
        t.heights.pop();
        assert!(t.validate().is_err());

        let empty = Topography {
            resolution: [2, 0],
            extent: [0.0, 100.0, 0.0, 50.0],
            heights: Vec::new(),
        };
        assert!(matches!(empty.validate(), Err(SectionError::EmptyTopography)));
    }

    #[test]
    fn test_malformed_map_is_an_error_not_a_panic() {
        let mut short = topo();
        short.heights.truncate(2);
        assert!(matches!(
            short.line_in_section(&grid(), Direction::Y, 1),
            Err(SectionError::SizeMismatch {
                expected: 6,
                actual: 2
            })
        ));

        let empty = Topography {
            resolution: [2, 0],
            extent: [0.0, 100.0, 0.0, 50.0],
            heights: Vec::new(),
        };
        assert!(matches!(
            empty.line_in_section(&grid(), Direction::X, 0),
            Err(SectionError::EmptyTopography)
        ));
    }
}
