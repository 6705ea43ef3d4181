//! Projection of surface points and orientations onto a section plane.

use geosection_core::{DVec2, Direction, SectionError, SliceDescriptor};
use geosection_render::{
    Arrow, Figure, Layer, LegendKind, Marker, MarkerShape, Paint,
};

use crate::error::Result;
use crate::section::Section2D;

/// Which input data to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    /// Surface points and orientations.
    #[default]
    All,
    /// Surface points only.
    SurfacePoints,
    /// Orientations only.
    Orientations,
}

/// Which series to draw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeriesFilter {
    /// Every row whose series is in the series table.
    #[default]
    All,
    /// Rows of one series.
    Named(String),
}

impl SeriesFilter {
    /// `"all"` selects every series; anything else names one.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(s.to_string())
        }
    }
}

/// Options of [`Section2D::plot_data`].
#[derive(Debug, Clone, PartialEq)]
pub struct DataOptions {
    pub data_type: DataType,
    pub series: SeriesFilter,
    /// Vertical exaggeration of depth sections.
    pub ve: f64,
    /// Label each surface point with its surface name.
    pub annotate: bool,
}

impl Default for DataOptions {
    fn default() -> Self {
        Self {
            data_type: DataType::All,
            series: SeriesFilter::All,
            ve: 1.0,
            annotate: false,
        }
    }
}

/// World vector of an orientation arrow.
///
/// The arrow is `g / scale` times the shorter side of the plot area, with
/// each component converted to world units of its own axis. `aspect` is the
/// displayed width over height.
pub(crate) fn quiver_vector(g: DVec2, aspect: f64, spans: DVec2, scale: f64) -> DVec2 {
    let v = g / scale;
    if aspect < 1.0 {
        DVec2::new(v.x * spans.x, v.y * spans.y * aspect)
    } else {
        DVec2::new(v.x * spans.x / aspect, v.y * spans.y)
    }
}

impl Section2D<'_> {
    /// Plots the projection of the input data on the plane of `direction`.
    ///
    /// # Errors
    /// Returns [`SectionError::UnknownSeries`] when a named series is not in
    /// the series table.
    pub fn plot_data(&self, direction: Direction, options: &DataOptions) -> Result<Figure> {
        let slice = self.plane(direction)?;
        let mut figure = self.base_figure(&slice, slice.image_aspect(options.ve));
        self.add_data_layers(&slice, options, &mut figure)?;
        Ok(figure)
    }

    /// Appends the data layers and their legend to `figure`.
    pub(crate) fn add_data_layers(
        &self,
        slice: &SliceDescriptor,
        options: &DataOptions,
        figure: &mut Figure,
    ) -> Result<()> {
        let model = self.model();
        let keep: Box<dyn Fn(&str) -> bool + '_> = match &options.series {
            SeriesFilter::All => Box::new(|s: &str| model.has_series(s)),
            SeriesFilter::Named(name) => {
                if !model.has_series(name) {
                    return Err(SectionError::UnknownSeries(name.clone()).into());
                }
                Box::new(move |s: &str| s == name)
            }
        };
        let (h, v) = (slice.horizontal, slice.vertical);
        let style = self.style();

        let with_points = options.data_type != DataType::Orientations;
        let with_arrows = options.data_type != DataType::SurfacePoints;

        if with_points {
            let points: Vec<_> = model
                .surface_points
                .iter()
                .filter(|p| keep(p.series.as_str()))
                .collect();
            log::debug!("plotting {} surface points across {}", points.len(), slice.direction);

            let markers = points
                .iter()
                .map(|p| Marker {
                    position: DVec2::new(p.coord(h), p.coord(v)),
                    fill: Paint::solid(self.color_lookup().get_or_black(&p.surface)),
                })
                .collect();
            figure.push(Layer::Markers {
                markers,
                shape: MarkerShape::Diamond,
                size: style.marker_size,
                edge: Some(Paint::solid(style.marker_edge_color)),
            });

            if options.annotate {
                let [h0, h1, v0, v1] = slice.extent;
                let offset = DVec2::new((h1 - h0) * 0.01, (v1 - v0) * 0.01);
                for p in &points {
                    figure.push(Layer::Text {
                        position: DVec2::new(p.coord(h), p.coord(v)) + offset,
                        text: p.surface.clone(),
                        paint: Paint::solid(style.marker_edge_color),
                        size: style.label_font_size,
                    });
                }
            }

            for (name, color) in self.color_lookup().iter() {
                if points.iter().any(|p| p.surface == name) {
                    figure.add_legend(name, Paint::solid(color), LegendKind::Marker);
                }
            }
        }

        if with_arrows {
            let scale = if with_points {
                style.quiver_scale
            } else {
                style.quiver_scale_alone
            };
            let aspect = slice.exaggerated_aspect(options.ve);
            let [h0, h1, v0, v1] = slice.extent;
            let spans = DVec2::new(h1 - h0, v1 - v0);
            let arrows: Vec<Arrow> = model
                .orientations
                .iter()
                .filter(|o| keep(o.series.as_str()))
                .map(|o| Arrow {
                    tail: DVec2::new(o.coord(h), o.coord(v)),
                    vector: quiver_vector(
                        DVec2::new(o.gradient(h), o.gradient(v)),
                        aspect,
                        spans,
                        scale,
                    ),
                })
                .collect();
            log::debug!("plotting {} orientations across {}", arrows.len(), slice.direction);
            figure.push(Layer::Arrows {
                arrows,
                paint: Paint::solid(style.orientation_color),
                width: 1,
            });
        }
        Ok(())
    }
}
