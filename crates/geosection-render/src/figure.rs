//! Backend-independent description of a 2D figure.
//!
//! Renderers assemble a [`Figure`] from layers in world coordinates; the
//! drawing pass in [`crate::draw`] hands it to plotters.

use geosection_core::{Color, DVec2, SectionStyle};

/// A color with opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub alpha: f64,
}

impl Paint {
    /// Fully opaque paint.
    #[must_use]
    pub const fn solid(color: Color) -> Self {
        Self { color, alpha: 1.0 }
    }

    /// Paint with the given opacity.
    #[must_use]
    pub fn with_alpha(color: Color, alpha: f64) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

/// One filled rectangle of a raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterCell {
    /// `[x0, y0, x1, y1]` in world coordinates.
    pub bounds: [f64; 4],
    pub paint: Paint,
}

/// Marker shapes for point layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Diamond,
    Circle,
}

/// A single marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: DVec2,
    pub fill: Paint,
}

/// An arrow starting at `tail` and spanning `vector` in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub tail: DVec2,
    pub vector: DVec2,
}

impl Arrow {
    /// End point of the arrow.
    #[must_use]
    pub fn head(&self) -> DVec2 {
        self.tail + self.vector
    }
}

/// A drawable layer. Layers are painted in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// Axis-aligned colored cells.
    Raster { cells: Vec<RasterCell> },
    /// An open or closed line.
    Polyline {
        points: Vec<DVec2>,
        paint: Paint,
        width: u32,
        closed: bool,
    },
    /// A filled polygon.
    Polygon { points: Vec<DVec2>, paint: Paint },
    /// Point markers with an optional edge.
    Markers {
        markers: Vec<Marker>,
        shape: MarkerShape,
        size: u32,
        edge: Option<Paint>,
    },
    /// A vector field.
    Arrows {
        arrows: Vec<Arrow>,
        paint: Paint,
        width: u32,
    },
    /// A text label centered on `position`.
    Text {
        position: DVec2,
        text: String,
        paint: Paint,
        size: u32,
    },
}

/// How a legend entry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendKind {
    Patch,
    Marker,
    Line,
}

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub paint: Paint,
    pub kind: LegendKind,
}

/// A color scale drawn beside the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    /// Lower end of the scale.
    pub min: f64,
    /// Upper end of the scale.
    pub max: f64,
    /// Colors from `min` to `max`, evenly spaced.
    pub colors: Vec<Color>,
    /// Scale caption.
    pub label: String,
}

/// A complete 2D figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Optional caption.
    pub title: Option<String>,
    /// Horizontal axis label.
    pub x_label: String,
    /// Vertical axis label.
    pub y_label: String,
    /// Horizontal axis range.
    pub x_range: (f64, f64),
    /// Vertical axis range.
    pub y_range: (f64, f64),
    /// Vertical stretch relative to equal world units.
    pub aspect: f64,
    /// Layers, bottom first.
    pub layers: Vec<Layer>,
    /// Legend rows, in order.
    pub legend: Vec<LegendEntry>,
    /// Optional color scale.
    pub colorbar: Option<Colorbar>,
}

/// Width reserved for a colorbar.
pub const COLORBAR_WIDTH: u32 = 110;

/// Pixels taken by axes, labels and margins around the plot area.
const DECORATION: (u32, u32) = (110, 90);

impl Figure {
    /// Creates an empty figure over `[x0, x1] x [y0, y1]`.
    #[must_use]
    pub fn new(extent: [f64; 4]) -> Self {
        let [x0, x1, y0, y1] = extent;
        Self {
            title: None,
            x_label: String::new(),
            y_label: String::new(),
            x_range: (x0, x1),
            y_range: (y0, y1),
            aspect: 1.0,
            layers: Vec::new(),
            legend: Vec::new(),
            colorbar: None,
        }
    }

    /// Sets the axis labels.
    #[must_use]
    pub fn with_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    /// Sets the caption.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the vertical stretch.
    #[must_use]
    pub fn with_aspect(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self
    }

    /// Appends a layer on top of the existing ones.
    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Adds a legend row unless one with the same label exists.
    pub fn add_legend(&mut self, label: impl Into<String>, paint: Paint, kind: LegendKind) {
        let label = label.into();
        if self.legend.iter().any(|e| e.label == label) {
            return;
        }
        self.legend.push(LegendEntry { label, paint, kind });
    }

    /// Merges another figure's layers and legend into this one.
    pub fn overlay(&mut self, other: Figure) {
        self.layers.extend(other.layers);
        for entry in other.legend {
            self.add_legend(entry.label, entry.paint, entry.kind);
        }
        if self.colorbar.is_none() {
            self.colorbar = other.colorbar;
        }
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if the figure has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Pixel size of the rendered figure for a style.
    ///
    /// The plot area keeps the world aspect of the axes, stretched
    /// vertically by [`Figure::aspect`].
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn pixel_size(&self, style: &SectionStyle) -> (u32, u32) {
        let width = style.width.max(DECORATION.0 + 50);
        let plot_w = f64::from(width - DECORATION.0);
        let x_span = (self.x_range.1 - self.x_range.0).abs();
        let y_span = (self.y_range.1 - self.y_range.0).abs() * self.aspect.abs();
        let plot_h = if x_span > 0.0 && y_span.is_finite() {
            plot_w * y_span / x_span
        } else {
            plot_w
        };
        let height = (plot_h.round() as u32)
            .saturating_add(DECORATION.1)
            .clamp(style.min_height, style.max_height.max(style.min_height));
        let width = if self.colorbar.is_some() {
            width + COLORBAR_WIDTH
        } else {
            width
        };
        (width, height)
    }
}
