//! The section renderer object shared by every plot operation.

use std::path::Path;

use geosection_core::{
    Color, ColorLookup, Direction, GeoModel, Palette, SectionStyle, SliceDescriptor,
};
use geosection_render::{save_figure, ColorMapRegistry, Figure, LegendKind, Paint};

use crate::error::Result;

/// Renders 2D sections of a [`GeoModel`].
///
/// The model is borrowed read-only. The surface color lookup and the
/// categorical palette are derived once at construction.
pub struct Section2D<'a> {
    model: &'a GeoModel,
    style: SectionStyle,
    lookup: ColorLookup,
    palette: Palette,
    color_maps: ColorMapRegistry,
}

impl<'a> Section2D<'a> {
    /// Creates a renderer with the default style.
    pub fn new(model: &'a GeoModel) -> Self {
        Self::with_style(model, SectionStyle::default())
    }

    /// Creates a renderer with a custom style.
    pub fn with_style(model: &'a GeoModel, style: SectionStyle) -> Self {
        let lookup = ColorLookup::from_surfaces(&model.surfaces);
        let palette = Palette::from_surfaces(&model.surfaces);
        log::debug!(
            "section renderer: {} surface colors, palette of {}",
            lookup.len(),
            palette.len()
        );
        Self {
            model,
            style,
            lookup,
            palette,
            color_maps: ColorMapRegistry::new(),
        }
    }

    /// The model being rendered.
    pub fn model(&self) -> &'a GeoModel {
        self.model
    }

    /// The active style.
    pub fn style(&self) -> &SectionStyle {
        &self.style
    }

    /// Surface name to color lookup.
    pub fn color_lookup(&self) -> &ColorLookup {
        &self.lookup
    }

    /// Categorical palette for block ids.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Registered color maps.
    pub fn color_maps(&self) -> &ColorMapRegistry {
        &self.color_maps
    }

    /// Registered color maps, for adding custom ones.
    pub fn color_maps_mut(&mut self) -> &mut ColorMapRegistry {
        &mut self.color_maps
    }

    /// Selects section `cell_number` across `direction`.
    pub fn slice(&self, direction: Direction, cell_number: usize) -> Result<SliceDescriptor> {
        Ok(SliceDescriptor::new(&self.model.grid, direction, cell_number)?)
    }

    /// The plane of `direction` sections, for plots that project rather than cut.
    pub(crate) fn plane(&self, direction: Direction) -> Result<SliceDescriptor> {
        self.slice(direction, 0)
    }

    /// An empty figure spanning the section, with axis labels.
    pub(crate) fn base_figure(&self, slice: &SliceDescriptor, stretch: f64) -> Figure {
        let (h, v) = slice.labels();
        Figure::new(slice.extent)
            .with_labels(h, v)
            .with_aspect(stretch)
    }

    /// Adds one legend patch per surface, in surface order.
    pub(crate) fn surface_legend(&self, figure: &mut Figure) {
        for (name, color) in self.lookup.iter() {
            figure.add_legend(name, Paint::solid(color), LegendKind::Patch);
        }
    }

    /// Color of palette entry `index`, black when the palette is too short.
    pub(crate) fn palette_color(&self, index: usize) -> Color {
        self.palette.color(index).unwrap_or(Color::BLACK)
    }

    /// Writes a figure, choosing the encoding from the file extension.
    pub fn save(&self, figure: &Figure, path: impl AsRef<Path>) -> Result<()> {
        save_figure(figure, &self.style, path)?;
        Ok(())
    }

    /// Renders a figure to an SVG document.
    pub fn to_svg(&self, figure: &Figure) -> Result<String> {
        Ok(geosection_render::to_svg_string(figure, &self.style)?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use geosection_core::SectionError;

    /// A 4 x 3 x 4 model with two strata over a fault.
    pub(crate) const MODEL: &str = r##"{
        "grid": { "resolution": [4, 3, 4], "extent": [0, 400, 0, 300, -400, 0] },
        "surfaces": [
            { "name": "fault1", "series": "Fault", "id": 1, "color": "#527682", "properties": { "density": 2.0 } },
            { "name": "rock2", "series": "Strat", "id": 2, "color": "#9f0052", "properties": { "density": 2.4 } },
            { "name": "rock1", "series": "Strat", "id": 3, "color": "#015482", "properties": { "density": 2.7 } }
        ],
        "series": [
            { "name": "Fault", "order": 1, "is_fault": true },
            { "name": "Strat", "order": 2 }
        ],
        "surface_points": [
            { "x": 50, "y": 150, "z": -150, "surface": "rock1", "series": "Strat" },
            { "x": 350, "y": 150, "z": -250, "surface": "rock2", "series": "Strat" },
            { "x": 200, "y": 100, "z": -200, "surface": "fault1", "series": "Fault" }
        ],
        "orientations": [
            { "x": 100, "y": 150, "z": -150, "G_x": 0.0, "G_y": 0.0, "G_z": 1.0, "surface": "rock1", "series": "Strat" },
            { "x": 200, "y": 150, "z": -200, "G_x": 1.0, "G_y": 0.0, "G_z": 0.0, "surface": "fault1", "series": "Fault" }
        ]
    }"##;

    pub(crate) fn model() -> GeoModel {
        let mut model = GeoModel::from_json_str(MODEL).unwrap();
        let grid = model.grid.clone();
        let n = grid.num_cells();
        let mut lith = vec![0.0; n];
        let mut fault = vec![0.0; n];
        let mut strat = vec![0.0; n];
        let mut fault_field = vec![0.0; n];
        let mut gx = vec![0.0; n];
        let mut gz = vec![0.0; n];
        for i in 0..4 {
            for j in 0..3 {
                for k in 0..4 {
                    let idx = grid.flatten_index(i, j, k);
                    let c = grid.cell_center(i, j, k);
                    lith[idx] = if k >= 2 { 2.0 } else { 3.0 };
                    fault[idx] = if i >= 2 { 2.0 } else { 1.0 };
                    strat[idx] = c.z;
                    fault_field[idx] = c.x;
                    gx[idx] = 0.0;
                    gz[idx] = 1.0;
                }
            }
        }
        model.solution = Some(geosection_core::Solution {
            lith_block: lith,
            fault_blocks: vec![fault],
            scalar_field_matrix: vec![fault_field, strat],
            scalar_field_at_surface_points: vec![vec![200.0, 0.0], vec![-150.0, -250.0]],
            gradients: Some(geosection_core::GradientField {
                gx,
                gy: vec![0.0; n],
                gz,
            }),
        });
        model.validate().unwrap();
        model
    }

    #[test]
    fn test_lookup_and_palette_built_once() {
        let model = model();
        let section = Section2D::new(&model);
        assert_eq!(section.color_lookup().len(), 3);
        assert_eq!(section.palette().len(), 3);
        assert_eq!(section.palette_color(2), Color::rgb(0x01, 0x54, 0x82));
        assert_eq!(section.palette_color(9), Color::BLACK);
    }

    #[test]
    fn test_slice_errors() {
        let model = model();
        let section = Section2D::new(&model);
        assert!(section.slice(Direction::Y, 2).is_ok());
        let err = section.slice(Direction::Y, 3).unwrap_err();
        assert!(matches!(
            err,
            crate::GeosectionError::Section(SectionError::CellOutOfRange { .. })
        ));
    }

    #[test]
    fn test_surface_legend_in_table_order() {
        let model = model();
        let section = Section2D::new(&model);
        let slice = section.slice(Direction::Y, 1).unwrap();
        let mut fig = section.base_figure(&slice, 1.0);
        section.surface_legend(&mut fig);
        let names: Vec<&str> = fig.legend.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(names, vec!["fault1", "rock2", "rock1"]);
        assert_eq!(fig.x_label, "X");
        assert_eq!(fig.y_label, "Z");
    }
}
