//! The geological model consumed by the section renderers.
//!
//! Everything here is computed elsewhere and read as-is; renderers never
//! mutate a [`GeoModel`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Result, SectionError};
use crate::grid::{Axis, RegularGrid};
use crate::solution::Solution;
use crate::topography::Topography;

/// One row of the surface table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Surface name.
    pub name: String,
    /// Series the surface belongs to.
    pub series: String,
    /// Category id used in lithology blocks (1-based).
    pub id: u32,
    /// Display color.
    pub color: Color,
    /// Extra numeric columns, e.g. density.
    #[serde(default)]
    pub properties: BTreeMap<String, f64>,
}

/// One row of the series table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Series name.
    pub name: String,
    /// Position in the stratigraphic pile (1-based).
    pub order: usize,
    /// Whether the series is a fault.
    #[serde(default)]
    pub is_fault: bool,
}

/// An interface point on a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub surface: String,
    pub series: String,
}

impl SurfacePoint {
    /// Coordinate along an axis.
    #[must_use]
    pub fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// An orientation measurement: a position and the gradient of the potential field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(rename = "G_x")]
    pub g_x: f64,
    #[serde(rename = "G_y")]
    pub g_y: f64,
    #[serde(rename = "G_z")]
    pub g_z: f64,
    pub surface: String,
    pub series: String,
}

impl Orientation {
    /// Coordinate along an axis.
    #[must_use]
    pub fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Gradient component along an axis.
    #[must_use]
    pub fn gradient(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.g_x,
            Axis::Y => self.g_y,
            Axis::Z => self.g_z,
        }
    }
}

/// A computed geological model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoModel {
    /// Regular grid the solution arrays live on.
    pub grid: RegularGrid,
    /// Surface table, in palette order.
    pub surfaces: Vec<Surface>,
    /// Series table.
    pub series: Vec<Series>,
    /// Interface points.
    #[serde(default)]
    pub surface_points: Vec<SurfacePoint>,
    /// Orientation measurements.
    #[serde(default)]
    pub orientations: Vec<Orientation>,
    /// Optional topography height map.
    #[serde(default)]
    pub topography: Option<Topography>,
    /// Optional computed solution.
    #[serde(default)]
    pub solution: Option<Solution>,
}

impl GeoModel {
    /// Loads a model from a JSON file and validates its arrays.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let model = Self::from_json_str(&text)?;
        log::info!(
            "loaded model {}: resolution {:?}, {} surfaces",
            path.display(),
            model.grid.resolution,
            model.surfaces.len()
        );
        Ok(model)
    }

    /// Parses a model from JSON and validates its arrays.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(text)?;
        model.validate()?;
        Ok(model)
    }

    /// Checks that every solution array matches the grid resolution.
    pub fn validate(&self) -> Result<()> {
        let expected = self.grid.num_cells();
        let check = |len: usize| {
            if len == expected {
                Ok(())
            } else {
                Err(SectionError::SizeMismatch {
                    expected,
                    actual: len,
                })
            }
        };
        if let Some(solution) = &self.solution {
            for array in solution.arrays() {
                check(array.len())?;
            }
        }
        if let Some(topo) = &self.topography {
            topo.validate()?;
        }
        Ok(())
    }

    /// The computed solution.
    pub fn solution(&self) -> Result<&Solution> {
        self.solution.as_ref().ok_or(SectionError::MissingSolution)
    }

    /// Looks up a series by name.
    #[must_use]
    pub fn series_by_name(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Whether a series name appears in the series table.
    #[must_use]
    pub fn has_series(&self, name: &str) -> bool {
        self.series_by_name(name).is_some()
    }

    /// Fault series, in table order.
    pub fn fault_series(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(|s| s.is_fault)
    }

    /// The surface carrying block id `id`.
    #[must_use]
    pub fn surface_by_id(&self, id: u32) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.id == id)
    }

    /// Whether any surface defines the property `name`.
    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.surfaces.iter().any(|s| s.properties.contains_key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r##"{
        "grid": { "resolution": [2, 2, 2], "extent": [0, 10, 0, 10, -10, 0] },
        "surfaces": [
            { "name": "rock2", "series": "Strat", "id": 1, "color": "#9f0052", "properties": { "density": 2.4 } },
            { "name": "rock1", "series": "Strat", "id": 2, "color": "#015482" }
        ],
        "series": [
            { "name": "Fault", "order": 1, "is_fault": true },
            { "name": "Strat", "order": 2 }
        ],
        "surface_points": [
            { "x": 1, "y": 5, "z": -3, "surface": "rock1", "series": "Strat" }
        ],
        "orientations": [
            { "x": 2, "y": 5, "z": -3, "G_x": 0.1, "G_y": 0.0, "G_z": 0.99, "surface": "rock1", "series": "Strat" }
        ],
        "solution": {
            "lith_block": [1, 1, 2, 2, 1, 1, 2, 2]
        }
    }"##;

    #[test]
    fn test_parse_model() {
        let model = GeoModel::from_json_str(MODEL).unwrap();
        assert_eq!(model.grid.resolution, [2, 2, 2]);
        assert_eq!(model.surfaces.len(), 2);
        assert!(model.has_series("Strat"));
        assert!(!model.has_series("Nope"));
        assert_eq!(model.fault_series().count(), 1);
        assert_eq!(model.surface_by_id(2).unwrap().name, "rock1");
        assert!(model.has_property("density"));
        assert!((model.orientations[0].gradient(Axis::Z) - 0.99).abs() < 1e-12);
        assert!((model.surface_points[0].coord(Axis::Z) + 3.0).abs() < 1e-12);
        assert_eq!(model.solution().unwrap().lith_block.len(), 8);
    }

    #[test]
    fn test_validate_rejects_short_arrays() {
        let bad = MODEL.replace("[1, 1, 2, 2, 1, 1, 2, 2]", "[1, 1, 2]");
        let err = GeoModel::from_json_str(&bad).unwrap_err();
        assert!(matches!(
            err,
            SectionError::SizeMismatch {
                expected: 8,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_missing_solution() {
        let mut model = GeoModel::from_json_str(MODEL).unwrap();
        model.solution = None;
        assert!(matches!(model.solution(), Err(SectionError::MissingSolution)));
    }
}
