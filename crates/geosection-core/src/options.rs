//! Styling options for section figures.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::Result;

/// Global styling applied by every renderer.
///
/// Missing fields in a JSON style file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionStyle {
    /// Figure width in pixels; height follows the section aspect.
    pub width: u32,

    /// Smallest figure height in pixels.
    pub min_height: u32,

    /// Largest figure height in pixels.
    pub max_height: u32,

    /// Caption font size.
    pub title_font_size: u32,

    /// Axis label font size.
    pub label_font_size: u32,

    /// Data point marker half-size in pixels.
    pub marker_size: u32,

    /// Edge color of data point markers.
    pub marker_edge_color: Color,

    /// Orientation arrow color.
    pub orientation_color: Color,

    /// Arrow length divisor when orientations are drawn with points.
    pub quiver_scale: f64,

    /// Arrow length divisor when orientations are drawn alone.
    pub quiver_scale_alone: f64,

    /// Gradient arrow color.
    pub gradient_color: Color,

    /// Gradient arrow opacity.
    pub gradient_alpha: f64,

    /// Color map for scalar fields.
    pub scalar_cmap: String,

    /// Color map for continuous block properties.
    pub property_cmap: String,

    /// Default number of contour levels.
    pub n_levels: usize,

    /// Opacity of filled contour bands.
    pub fill_alpha: f64,

    /// Topography mask color.
    pub topography_color: Color,

    /// Topography mask opacity.
    pub topography_alpha: f64,

    /// Fault line width in pixels.
    pub fault_line_width: u32,
}

impl Default for SectionStyle {
    fn default() -> Self {
        Self {
            width: 900,
            min_height: 240,
            max_height: 2400,
            title_font_size: 20,
            label_font_size: 16,
            marker_size: 6,
            marker_edge_color: Color::BLACK,
            orientation_color: Color::BLACK,
            quiver_scale: 10.0,
            quiver_scale_alone: 15.0,
            gradient_color: Color::BLUE,
            gradient_alpha: 0.6,
            scalar_cmap: "magma".to_string(),
            property_cmap: "viridis".to_string(),
            n_levels: 20,
            fill_alpha: 0.6,
            topography_color: Color::BLACK,
            topography_alpha: 0.5,
            fault_line_width: 2,
        }
    }
}

impl SectionStyle {
    /// Loads a style from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Styling of topology graph drawings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphStyle {
    /// Node marker radius in pixels.
    pub node_size: u32,
    /// Node marker color.
    pub node_color: Color,
    /// Node marker opacity.
    pub node_alpha: f64,
    /// Node label color.
    pub label_color: Color,
    /// Node label font size.
    pub label_size: u32,
    /// Edge color.
    pub edge_color: Color,
    /// Edge width in pixels.
    pub edge_width: u32,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            node_size: 10,
            node_color: Color::BLACK,
            node_alpha: 0.75,
            label_color: Color::WHITE,
            label_size: 10,
            edge_color: Color::BLACK,
            edge_width: 1,
        }
    }
}

impl GraphStyle {
    /// Loads a graph style from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
