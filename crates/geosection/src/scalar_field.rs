//! Filled and line contours of a series' scalar field.

use geosection_core::{
    band_index, contour_levels, isolines, Direction, Section2, SliceDescriptor, Volume,
};
use geosection_render::{Colorbar, Figure, Layer, Paint, RasterCell};

use crate::error::Result;
use crate::plot_data::DataOptions;
use crate::section::Section2D;

/// Options of [`Section2D::plot_scalar_field`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarFieldOptions {
    /// Number of contour levels; the style default when `None`.
    pub n_levels: Option<usize>,
    /// Overlay surface points and orientations.
    pub plot_data: bool,
    /// Attach a colorbar.
    pub colorbar: bool,
    /// Color map name; the style default when `None`.
    pub cmap: Option<String>,
}

impl Default for ScalarFieldOptions {
    fn default() -> Self {
        Self {
            n_levels: None,
            plot_data: true,
            colorbar: false,
            cmap: None,
        }
    }
}

impl Section2D<'_> {
    /// Plots the scalar field of `series` in section `cell_number`.
    ///
    /// # Errors
    /// Fails if the cell is out of range, the model has no solution, the
    /// series index has no scalar field or the color map is unknown.
    pub fn plot_scalar_field(
        &self,
        cell_number: usize,
        series: usize,
        direction: Direction,
        options: &ScalarFieldOptions,
    ) -> Result<Figure> {
        let slice = self.slice(direction, cell_number)?;
        let mut figure = self.base_figure(&slice, 1.0);
        self.add_scalar_layers(&slice, series, options, &mut figure)?;
        if options.plot_data {
            self.add_data_layers(&slice, &DataOptions::default(), &mut figure)?;
        }
        Ok(figure)
    }

    /// Appends contour bands, contour lines and the optional colorbar.
    pub(crate) fn add_scalar_layers(
        &self,
        slice: &SliceDescriptor,
        series: usize,
        options: &ScalarFieldOptions,
        figure: &mut Figure,
    ) -> Result<()> {
        let model = self.model();
        let field = model.solution()?.scalar_field(series)?;
        let section = Volume::new(field, model.grid.resolution)?
            .section(slice.direction, slice.cell_number)?;
        let Some((min, max)) = section.range() else {
            log::warn!("scalar field {series} has no finite values in this section");
            return Ok(());
        };

        let style = self.style();
        let cmap_name = options.cmap.as_deref().unwrap_or(&style.scalar_cmap);
        let cmap = self.color_maps().resolve(cmap_name)?;
        let levels = contour_levels(min, max, options.n_levels.unwrap_or(style.n_levels));
        log::debug!(
            "scalar field {series}: range [{min}, {max}], {} levels",
            levels.len()
        );

        let band_colors = band_values(&levels, min, max)
            .into_iter()
            .map(|v| cmap.color_at(v, min, max))
            .collect::<Vec<_>>();
        figure.push(Layer::Raster {
            cells: band_cells(slice, &section, &levels, &band_colors, style.fill_alpha),
        });

        for &level in &levels {
            let paint = Paint::solid(cmap.color_at(level, min, max));
            for line in isolines(&section, level) {
                figure.push(Layer::Polyline {
                    points: line
                        .points
                        .iter()
                        .map(|p| slice.cell_to_world(p.x, p.y))
                        .collect(),
                    paint,
                    width: 1,
                    closed: line.closed,
                });
            }
        }

        if options.colorbar {
            figure.colorbar = Some(Colorbar {
                min,
                max,
                colors: band_colors,
                label: format!("scalar field {series}"),
            });
        }
        Ok(())
    }
}

/// Representative value of each of the `levels.len() + 1` bands.
fn band_values(levels: &[f64], min: f64, max: f64) -> Vec<f64> {
    let mut edges = Vec::with_capacity(levels.len() + 2);
    edges.push(min);
    edges.extend_from_slice(levels);
    edges.push(max);
    edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
}

fn band_cells(
    slice: &SliceDescriptor,
    section: &Section2<f64>,
    levels: &[f64],
    colors: &[geosection_core::Color],
    alpha: f64,
) -> Vec<RasterCell> {
    section
        .iter()
        .filter(|(_, _, v)| v.is_finite())
        .filter_map(|(col, row, v)| {
            let color = *colors.get(band_index(levels, v))?;
            Some(RasterCell {
                bounds: slice.cell_bounds(col, row),
                paint: Paint::with_alpha(color, alpha),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::tests::model;
    use crate::GeosectionError;
    use geosection_core::SectionError;

    #[test]
    fn test_band_values() {
        assert_eq!(band_values(&[1.0, 2.0], 0.0, 3.0), vec![0.5, 1.5, 2.5]);
        assert_eq!(band_values(&[], 0.0, 2.0), vec![1.0]);
    }

    #[test]
    fn test_scalar_field_layers() {
        let model = model();
        let section = Section2D::new(&model);
        let opts = ScalarFieldOptions {
            n_levels: Some(3),
            plot_data: false,
            colorbar: true,
            cmap: None,
        };
        let fig = section.plot_scalar_field(1, 1, Direction::Y, &opts).unwrap();
        match &fig.layers[0] {
            Layer::Raster { cells } => {
                assert_eq!(cells.len(), 16);
                assert!(cells.iter().all(|c| (c.paint.alpha - 0.6).abs() < 1e-12));
            }
            other => panic!("unexpected layer {other:?}"),
        }
        // The field is z, so every level is one horizontal line.
        let lines = fig
            .layers
            .iter()
            .filter(|l| matches!(l, Layer::Polyline { .. }))
            .count();
        assert_eq!(lines, 3);
        let bar = fig.colorbar.as_ref().unwrap();
        assert_eq!(bar.colors.len(), 4);
        assert!((bar.min + 350.0).abs() < 1e-9 && (bar.max + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_data_overlay_default_on() {
        let model = model();
        let section = Section2D::new(&model);
        let fig = section
            .plot_scalar_field(1, 1, Direction::Y, &ScalarFieldOptions::default())
            .unwrap();
        assert!(fig.layers.iter().any(|l| matches!(l, Layer::Markers { .. })));
        assert!(fig.colorbar.is_none());
    }

    #[test]
    fn test_errors() {
        let model = model();
        let section = Section2D::new(&model);
        let err = section
            .plot_scalar_field(0, 5, Direction::Y, &ScalarFieldOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            GeosectionError::Section(SectionError::SeriesIndexOutOfRange { index: 5, len: 2 })
        ));
        let opts = ScalarFieldOptions {
            cmap: Some("rainbow".into()),
            ..ScalarFieldOptions::default()
        };
        assert!(matches!(
            section.plot_scalar_field(0, 0, Direction::Y, &opts),
            Err(GeosectionError::Render(_))
        ));
    }
}
