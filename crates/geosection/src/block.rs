//! Block sections: categorical or continuous rasters of a model slice.

use geosection_core::{
    isolines, Direction, SectionError, SliceDescriptor, Topography, Volume,
};
use geosection_render::{Colorbar, Figure, Layer, Paint, RasterCell};

use crate::error::Result;
use crate::plot_data::DataOptions;
use crate::section::Section2D;

/// Number of colorbar steps for continuous block values.
const COLORBAR_STEPS: usize = 64;

/// The per-cell values shown by a block section.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockSource<'v> {
    /// Lithology ids of the solution.
    Lithology,
    /// Fault block `index` of the solution.
    Fault(usize),
    /// A numeric surface property looked up through the lithology ids.
    Property(String),
    /// Caller-supplied category ids on the model grid.
    Values(&'v [f64]),
}

/// Options of [`Section2D::plot_block_section`].
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct BlockOptions {
    /// Overlay surface points and orientations.
    pub plot_data: bool,
    /// Vertical exaggeration of depth sections.
    pub ve: f64,
    /// Draw fault traces.
    pub show_faults: bool,
    /// Mask everything above the topography.
    pub show_topography: bool,
    /// Attach a surface legend when data is not overlaid.
    pub legend: bool,
}

impl Default for BlockOptions {
    fn default() -> Self {
        Self {
            plot_data: false,
            ve: 1.0,
            show_faults: false,
            show_topography: true,
            legend: true,
        }
    }
}

/// How block values are colored.
enum Values<'s> {
    Categorical(&'s [f64]),
    Continuous { values: Vec<f64>, label: String },
}

impl Section2D<'_> {
    /// Plots section `cell_number` across `direction` of a block.
    ///
    /// # Errors
    /// Fails if the cell is out of range, the model has no solution, the
    /// fault index or property is unknown, or the values do not match the
    /// grid.
    pub fn plot_block_section(
        &self,
        cell_number: usize,
        direction: Direction,
        source: &BlockSource<'_>,
        options: &BlockOptions,
    ) -> Result<Figure> {
        let slice = self.slice(direction, cell_number)?;
        let mut figure = self.base_figure(&slice, slice.image_aspect(options.ve));

        match self.block_values(source)? {
            Values::Categorical(values) => {
                let cells = self.categorical_raster(&slice, values)?;
                figure.push(Layer::Raster { cells });
            }
            Values::Continuous { values, label } => {
                let (cells, colorbar) = self.continuous_raster(&slice, &values, label)?;
                figure.push(Layer::Raster { cells });
                figure.colorbar = colorbar;
            }
        }

        if options.show_faults {
            self.add_fault_lines(&slice, &mut figure)?;
        }

        if options.show_topography {
            self.add_topography_mask(&slice, &mut figure)?;
        }

        if options.plot_data {
            let data = DataOptions {
                ve: options.ve,
                ..DataOptions::default()
            };
            self.add_data_layers(&slice, &data, &mut figure)?;
        } else if options.legend {
            self.surface_legend(&mut figure);
        }
        Ok(figure)
    }

    fn block_values<'s>(&'s self, source: &'s BlockSource<'_>) -> Result<Values<'s>> {
        let model = self.model();
        Ok(match source {
            BlockSource::Values(values) => Values::Categorical(*values),
            BlockSource::Lithology => Values::Categorical(&model.solution()?.lith_block),
            BlockSource::Fault(index) => {
                Values::Categorical(model.solution()?.fault_block(*index)?)
            }
            BlockSource::Property(name) => {
                if !model.has_property(name) {
                    return Err(SectionError::UnknownProperty(name.clone()).into());
                }
                let values = model
                    .solution()?
                    .lith_block
                    .iter()
                    .map(|&id| self.property_of_id(id, name))
                    .collect();
                Values::Continuous {
                    values,
                    label: name.clone(),
                }
            }
        })
    }

    /// Property of the surface with block id `id`, NaN when undefined.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn property_of_id(&self, id: f64, name: &str) -> f64 {
        if !id.is_finite() || id < 0.0 {
            return f64::NAN;
        }
        self.model()
            .surface_by_id(id.round() as u32)
            .and_then(|s| s.properties.get(name).copied())
            .unwrap_or(f64::NAN)
    }

    fn categorical_raster(&self, slice: &SliceDescriptor, values: &[f64]) -> Result<Vec<RasterCell>> {
        let section = Volume::new(values, self.model().grid.resolution)?
            .section(slice.direction, slice.cell_number)?;
        Ok(section
            .iter()
            .filter_map(|(col, row, v)| {
                let color = self.palette().color_for_id(v)?;
                Some(RasterCell {
                    bounds: slice.cell_bounds(col, row),
                    paint: Paint::solid(color),
                })
            })
            .collect())
    }

    fn continuous_raster(
        &self,
        slice: &SliceDescriptor,
        values: &[f64],
        label: String,
    ) -> Result<(Vec<RasterCell>, Option<Colorbar>)> {
        let section = Volume::new(values, self.model().grid.resolution)?
            .section(slice.direction, slice.cell_number)?;
        let Some((min, max)) = section.range() else {
            log::warn!("block section {} = {} has no finite values", slice.direction, slice.cell_number);
            return Ok((Vec::new(), None));
        };
        let cmap = self.color_maps().resolve(&self.style().property_cmap)?;
        let cells = section
            .iter()
            .filter(|(_, _, v)| v.is_finite())
            .map(|(col, row, v)| RasterCell {
                bounds: slice.cell_bounds(col, row),
                paint: Paint::solid(cmap.color_at(v, min, max)),
            })
            .collect();
        let colorbar = Colorbar {
            min,
            max,
            colors: colorbar_colors(cmap, min, max),
            label,
        };
        Ok((cells, Some(colorbar)))
    }

    /// Draws the traces of every fault series at its surface levels.
    fn add_fault_lines(&self, slice: &SliceDescriptor, figure: &mut Figure) -> Result<()> {
        let model = self.model();
        let solution = model.solution()?;
        for fault in model.fault_series() {
            let f_id = fault.order.saturating_sub(1);
            let field = solution.scalar_field(f_id)?;
            let section = Volume::new(field, model.grid.resolution)?
                .section(slice.direction, slice.cell_number)?;
            let paint = Paint::solid(self.palette_color(f_id));
            for level in solution.surface_levels(f_id) {
                for line in isolines(&section, level) {
                    let points = line
                        .points
                        .iter()
                        .map(|p| slice.cell_to_world(p.x, p.y))
                        .collect();
                    figure.push(Layer::Polyline {
                        points,
                        paint,
                        width: self.style().fault_line_width,
                        closed: line.closed,
                    });
                }
            }
            log::debug!("fault '{}' traced in section {}", fault.name, slice.direction);
        }
        Ok(())
    }

    /// Shades everything above the topography trace.
    pub(crate) fn add_topography_mask(
        &self,
        slice: &SliceDescriptor,
        figure: &mut Figure,
    ) -> Result<()> {
        let Some(topography) = &self.model().topography else {
            return Ok(());
        };
        match topography.line_in_section(&self.model().grid, slice.direction, slice.cell_number)? {
            Some(line) => {
                let style = self.style();
                figure.push(Layer::Polygon {
                    points: Topography::mask_polygon(&line, slice.extent),
                    paint: Paint::with_alpha(style.topography_color, style.topography_alpha),
                });
            }
            None => log::warn!(
                "topography has no trace in {} sections, mask skipped",
                slice.direction
            ),
        }
        Ok(())
    }
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn colorbar_colors(
    cmap: &geosection_render::ColorMap,
    min: f64,
    max: f64,
) -> Vec<geosection_core::Color> {
    (0..COLORBAR_STEPS)
        .map(|i| {
            let t = (i as f64 + 0.5) / COLORBAR_STEPS as f64;
            cmap.color_at(min + t * (max - min), min, max)
        })
        .collect()
}
