use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use geosection_core::{Direction, GeoModel, GraphStyle, SectionStyle, TopologyGraph};
use geosection_render::Figure;

use crate::block::{BlockOptions, BlockSource};
use crate::error::Result;
use crate::gradient::GradientOptions;
use crate::plot_data::{DataOptions, DataType, SeriesFilter};
use crate::scalar_field::ScalarFieldOptions;
use crate::section::Section2D;

/// Input data selection for the data command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DataTypeArg {
    /// Surface points and orientations
    #[default]
    All,
    /// Surface points only
    SurfacePoints,
    /// Orientations only
    Orientations,
}

impl From<DataTypeArg> for DataType {
    fn from(arg: DataTypeArg) -> Self {
        match arg {
            DataTypeArg::All => Self::All,
            DataTypeArg::SurfacePoints => Self::SurfacePoints,
            DataTypeArg::Orientations => Self::Orientations,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "geosection")]
#[command(author, version, about = "Render 2D sections of 3D geological models")]
#[command(long_about = "Render cross-sections, scalar-field contours, gradient fields and \
    topology graphs of a computed geological model.\n\n\
    Figures are written as SVG, PNG or JPEG depending on the output extension. \
    Raster output carries no text.")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plot surface points and orientations projected on a section plane
    Data(DataArgs),

    /// Plot a lithology, fault or property block section
    Block(BlockArgs),

    /// Plot the contours of a series' scalar field
    Scalar(ScalarArgs),

    /// Plot gradient arrows over a scalar field
    Gradient(GradientArgs),

    /// Plot a topology graph over a section plane
    Topology(TopologyArgs),
}

/// Arguments shared by every command
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Model JSON file
    #[arg(short, long)]
    pub model: PathBuf,

    /// Cartesian direction of the section (x, y or z)
    #[arg(short, long, default_value = "y")]
    pub direction: Direction,

    /// Output file (.svg, .png, .jpg or .jpeg)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Style JSON file
    #[arg(long)]
    pub style: Option<PathBuf>,

    /// Figure caption
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Parser, Debug)]
pub struct DataArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Data to plot
    #[arg(long, value_enum, default_value = "all")]
    pub data_type: DataTypeArg,

    /// Series to plot, or "all"
    #[arg(long, default_value = "all")]
    pub series: String,

    /// Vertical exaggeration
    #[arg(long, default_value_t = 1.0)]
    pub ve: f64,

    /// Label points with their surface name
    #[arg(long)]
    pub annotate: bool,
}

#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct BlockArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Cell index along the section direction
    #[arg(short, long)]
    pub cell: usize,

    /// Plot fault block N instead of the lithology
    #[arg(long, conflicts_with = "property")]
    pub fault: Option<usize>,

    /// Plot a surface property (e.g. density) instead of the lithology
    #[arg(long)]
    pub property: Option<String>,

    /// Overlay surface points and orientations
    #[arg(long)]
    pub plot_data: bool,

    /// Vertical exaggeration
    #[arg(long, default_value_t = 1.0)]
    pub ve: f64,

    /// Draw fault traces
    #[arg(long)]
    pub show_faults: bool,

    /// Do not mask above the topography
    #[arg(long)]
    pub no_topography: bool,

    /// Do not attach the surface legend
    #[arg(long)]
    pub no_legend: bool,
}

#[derive(Parser, Debug)]
pub struct ScalarArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Cell index along the section direction
    #[arg(short, long)]
    pub cell: usize,

    /// Series index of the scalar field
    #[arg(short, long, default_value_t = 0)]
    pub series: usize,

    /// Number of contour levels (overrides style)
    #[arg(short = 'n', long)]
    pub levels: Option<usize>,

    /// Color map name (overrides style)
    #[arg(long)]
    pub cmap: Option<String>,

    /// Attach a colorbar
    #[arg(long)]
    pub colorbar: bool,

    /// Do not overlay surface points and orientations
    #[arg(long)]
    pub no_data: bool,
}

#[derive(Parser, Debug)]
pub struct GradientArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Cell index along the section direction
    #[arg(short, long)]
    pub cell: usize,

    /// Series index of the scalar field underlay
    #[arg(short, long, default_value_t = 0)]
    pub series: usize,

    /// Draw one arrow every N cells
    #[arg(long, default_value_t = 5)]
    pub stride: usize,

    /// Do not underlay the scalar field
    #[arg(long)]
    pub no_scalar: bool,
}

#[derive(Parser, Debug)]
pub struct TopologyArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Topology graph JSON file
    #[arg(short, long)]
    pub graph: PathBuf,

    /// Graph style JSON file
    #[arg(long)]
    pub graph_style: Option<PathBuf>,
}

impl Commands {
    /// Arguments shared by every command.
    pub fn common(&self) -> &CommonArgs {
        match self {
            Self::Data(args) => &args.common,
            Self::Block(args) => &args.common,
            Self::Scalar(args) => &args.common,
            Self::Gradient(args) => &args.common,
            Self::Topology(args) => &args.common,
        }
    }
}

impl Cli {
    /// Loads the model, renders the requested figure and writes it.
    ///
    /// Returns the path written.
    pub fn run(&self) -> Result<PathBuf> {
        let common = self.command.common();
        let model = GeoModel::from_json_file(&common.model)?;
        let style = match &common.style {
            Some(path) => SectionStyle::from_json_file(path)?,
            None => SectionStyle::default(),
        };
        let section = Section2D::with_style(&model, style);

        let mut figure = self.build_figure(&section, &model)?;
        if let Some(title) = &common.title {
            figure = figure.with_title(title.clone());
        }
        section.save(&figure, &common.output)?;
        Ok(common.output.clone())
    }

    fn build_figure(&self, section: &Section2D<'_>, model: &GeoModel) -> Result<Figure> {
        match &self.command {
            Commands::Data(args) => {
                let options = DataOptions {
                    data_type: args.data_type.into(),
                    series: SeriesFilter::parse(&args.series),
                    ve: args.ve,
                    annotate: args.annotate,
                };
                section.plot_data(args.common.direction, &options)
            }
            Commands::Block(args) => {
                let source = match (&args.fault, &args.property) {
                    (Some(index), _) => BlockSource::Fault(*index),
                    (None, Some(name)) => BlockSource::Property(name.clone()),
                    (None, None) => BlockSource::Lithology,
                };
                let options = BlockOptions {
                    plot_data: args.plot_data,
                    ve: args.ve,
                    show_faults: args.show_faults,
                    show_topography: !args.no_topography,
                    legend: !args.no_legend,
                };
                section.plot_block_section(args.cell, args.common.direction, &source, &options)
            }
            Commands::Scalar(args) => {
                let options = ScalarFieldOptions {
                    n_levels: args.levels,
                    plot_data: !args.no_data,
                    colorbar: args.colorbar,
                    cmap: args.cmap.clone(),
                };
                section.plot_scalar_field(args.cell, args.series, args.common.direction, &options)
            }
            Commands::Gradient(args) => {
                let gradients = model.solution()?.gradients()?;
                let options = GradientOptions {
                    stride: args.stride,
                    plot_scalar: !args.no_scalar,
                };
                section.plot_gradient(
                    args.series,
                    gradients,
                    args.cell,
                    args.common.direction,
                    &options,
                )
            }
            Commands::Topology(args) => {
                let graph = TopologyGraph::from_json_file(&args.graph)?;
                let style = match &args.graph_style {
                    Some(path) => GraphStyle::from_json_file(path)?,
                    None => GraphStyle::default(),
                };
                section.plot_topology(&graph, args.common.direction, &style)
            }
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
