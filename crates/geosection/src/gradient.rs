//! Gradient arrows of a scalar field over its contours.

use geosection_core::{DVec2, Direction, GradientField, Volume};
use geosection_render::{Arrow, Figure, Layer, Paint};

use crate::error::Result;
use crate::scalar_field::ScalarFieldOptions;
use crate::section::Section2D;

/// Options of [`Section2D::plot_gradient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientOptions {
    /// Draw one arrow every `stride` cells along both section axes.
    pub stride: usize,
    /// Underlay the scalar-field contours.
    pub plot_scalar: bool,
}

impl Default for GradientOptions {
    fn default() -> Self {
        Self {
            stride: 5,
            plot_scalar: true,
        }
    }
}

impl Section2D<'_> {
    /// Plots the in-plane gradient of series `scalar_series` in section
    /// `cell_number`.
    ///
    /// Arrows start at the centers of every `stride`-th cell. They are
    /// scaled so that the longest spans `stride` cells.
    ///
    /// # Errors
    /// Fails if the cell is out of range, the stride is zero, or an array
    /// does not match the grid.
    pub fn plot_gradient(
        &self,
        scalar_series: usize,
        gradients: &GradientField,
        cell_number: usize,
        direction: Direction,
        options: &GradientOptions,
    ) -> Result<Figure> {
        let slice = self.slice(direction, cell_number)?;
        let mut figure = self.base_figure(&slice, 1.0);

        if options.plot_scalar {
            let scalar = ScalarFieldOptions {
                plot_data: false,
                ..ScalarFieldOptions::default()
            };
            self.add_scalar_layers(&slice, scalar_series, &scalar, &mut figure)?;
        }

        let grid = &self.model().grid;
        let u = Volume::new(gradients.component(slice.horizontal), grid.resolution)?
            .section_strided(direction, cell_number, options.stride)?;
        let v = Volume::new(gradients.component(slice.vertical), grid.resolution)?
            .section_strided(direction, cell_number, options.stride)?;

        let samples: Vec<(DVec2, DVec2)> = u
            .iter()
            .filter_map(|(col, row, gu)| {
                let g = DVec2::new(gu, v.get(col, row));
                g.is_finite().then(|| {
                    #[allow(clippy::cast_precision_loss)]
                    let tail = slice.cell_to_world(u.grid_col(col) as f64, u.grid_row(row) as f64);
                    (tail, g)
                })
            })
            .collect();

        let longest = samples.iter().map(|(_, g)| g.length()).fold(0.0, f64::max);
        #[allow(clippy::cast_precision_loss)]
        let reach = options.stride as f64
            * grid
                .cell_size(slice.horizontal)
                .min(grid.cell_size(slice.vertical));
        let factor = if longest > 0.0 { reach / longest } else { 0.0 };
        log::debug!(
            "gradient: {} arrows, stride {}, longest {longest}",
            samples.len(),
            options.stride
        );

        let style = self.style();
        figure.push(Layer::Arrows {
            arrows: samples
                .into_iter()
                .map(|(tail, g)| Arrow {
                    tail,
                    vector: g * factor,
                })
                .collect(),
            paint: Paint::with_alpha(style.gradient_color, style.gradient_alpha),
            width: 1,
        });
        Ok(figure)
    }
}
