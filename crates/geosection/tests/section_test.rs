//! Integration tests for geosection.
//!
//! Models are built from JSON tables with solution arrays filled in Rust,
//! then rendered through the public API only.

use geosection::*;
use proptest::prelude::*;

const TABLES: &str = r##"{
    "grid": { "resolution": [1, 1, 1], "extent": [0, 1000, 0, 500, -600, 0] },
    "surfaces": [
        { "name": "sandstone", "series": "Default", "id": 1, "color": "#ffbe00" },
        { "name": "basement", "series": "Basement", "id": 2, "color": "#728f02" }
    ],
    "series": [
        { "name": "Default", "order": 1 },
        { "name": "Basement", "order": 2 }
    ],
    "surface_points": [
        { "x": 250, "y": 250, "z": -300, "surface": "sandstone", "series": "Default" },
        { "x": 750, "y": 250, "z": -300, "surface": "sandstone", "series": "Default" }
    ],
    "orientations": [
        { "x": 500, "y": 250, "z": -300, "G_x": 0.0, "G_y": 0.0, "G_z": 1.0, "surface": "sandstone", "series": "Default" }
    ]
}"##;

/// A horizontally layered model: sandstone above z = -300, basement below.
fn layered_model(resolution: [usize; 3]) -> GeoModel {
    let mut model = GeoModel::from_json_str(TABLES).expect("tables parse");
    model.grid = RegularGrid::new(resolution, model.grid.extent);
    let grid = &model.grid;
    let n = grid.num_cells();

    let mut lith = vec![0.0; n];
    let mut field = vec![0.0; n];
    for i in 0..resolution[0] {
        for j in 0..resolution[1] {
            for k in 0..resolution[2] {
                let idx = grid.flatten_index(i, j, k);
                let z = grid.cell_center(i, j, k).z;
                lith[idx] = if z > -300.0 { 1.0 } else { 2.0 };
                field[idx] = z;
            }
        }
    }
    model.solution = Some(Solution {
        lith_block: lith,
        fault_blocks: Vec::new(),
        scalar_field_matrix: vec![field],
        scalar_field_at_surface_points: vec![vec![-300.0]],
        gradients: Some(GradientField {
            gx: vec![0.0; n],
            gy: vec![0.0; n],
            gz: vec![1.0; n],
        }),
    });
    model.validate().expect("arrays match the grid");
    model
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("geosection-{}-{name}", std::process::id()))
}

#[test]
fn test_block_section_svg() {
    init_logging();
    let model = layered_model([10, 5, 6]);
    let section = Section2D::new(&model);

    let figure = section
        .plot_block_section(2, Direction::Y, &BlockSource::Lithology, &BlockOptions::default())
        .expect("block section");
    let svg = section.to_svg(&figure).expect("svg");

    assert!(svg.contains("<svg"));
    assert!(svg.lines().any(|l| l.trim() == "X"));
    assert!(svg.lines().any(|l| l.trim() == "Z"));
    assert!(svg.contains("sandstone"));
    assert!(svg.contains("basement"));
}

#[test]
fn test_every_plot_renders() {
    let model = layered_model([6, 4, 6]);
    let section = Section2D::new(&model);
    let gradients = model.solution().unwrap().gradients().unwrap();

    let figures = vec![
        section.plot_data(Direction::X, &DataOptions::default()).unwrap(),
        section
            .plot_scalar_field(1, 0, Direction::Y, &ScalarFieldOptions::default())
            .unwrap(),
        section
            .plot_gradient(0, gradients, 1, Direction::Y, &GradientOptions::default())
            .unwrap(),
        section
            .plot_topology(&TopologyGraph::default(), Direction::Z, &GraphStyle::default())
            .unwrap(),
    ];
    for figure in &figures {
        assert!(section.to_svg(figure).unwrap().contains("</svg>"));
    }
}

#[test]
fn test_save_png_and_svg() {
    let model = layered_model([4, 4, 4]);
    let section = Section2D::new(&model);
    let figure = section
        .plot_block_section(0, Direction::X, &BlockSource::Lithology, &BlockOptions::default())
        .unwrap();

    let png = temp_path("block.png");
    section.save(&figure, &png).unwrap();
    let bytes = std::fs::read(&png).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    std::fs::remove_file(&png).ok();

    let svg = temp_path("block.svg");
    section.save(&figure, &svg).unwrap();
    assert!(std::fs::read_to_string(&svg).unwrap().contains("<svg"));
    std::fs::remove_file(&svg).ok();
}

#[test]
fn test_unsupported_extension() {
    let model = layered_model([2, 2, 2]);
    let section = Section2D::new(&model);
    let figure = section.plot_data(Direction::Y, &DataOptions::default()).unwrap();
    let result = section.save(&figure, temp_path("figure.txt"));
    assert!(matches!(
        result,
        Err(GeosectionError::Render(RenderError::UnsupportedFormat(_)))
    ));
}

#[test]
fn test_invalid_direction_and_cell() {
    assert!(matches!(
        "w".parse::<Direction>(),
        Err(SectionError::InvalidDirection(_))
    ));

    let model = layered_model([3, 3, 3]);
    let section = Section2D::new(&model);
    assert!(matches!(
        section.slice(Direction::Z, 3),
        Err(GeosectionError::Section(SectionError::CellOutOfRange { .. }))
    ));
}

#[test]
fn test_missing_solution() {
    let model = GeoModel::from_json_str(TABLES).unwrap();
    let section = Section2D::new(&model);
    let result =
        section.plot_block_section(0, Direction::Y, &BlockSource::Lithology, &BlockOptions::default());
    assert!(matches!(
        result,
        Err(GeosectionError::Section(SectionError::MissingSolution))
    ));
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::X), Just(Direction::Y), Just(Direction::Z)]
}

proptest! {
    #[test]
    fn block_section_covers_every_cell(
        nx in 1usize..6,
        ny in 1usize..6,
        nz in 1usize..6,
        direction in direction(),
        cell in 0usize..6,
    ) {
        let resolution = [nx, ny, nz];
        let model = layered_model(resolution);
        let section = Section2D::new(&model);
        let (h, v) = direction.free_axes();
        let fixed = resolution[direction.fixed_axis().index()];

        let result = section.plot_block_section(
            cell,
            direction,
            &BlockSource::Lithology,
            &BlockOptions::default(),
        );
        if cell >= fixed {
            prop_assert!(result.is_err());
        } else {
            let figure = result.unwrap();
            match &figure.layers[0] {
                Layer::Raster { cells } => {
                    prop_assert_eq!(cells.len(), resolution[h.index()] * resolution[v.index()]);
                }
                _ => prop_assert!(false, "first layer is not a raster"),
            }
        }
    }
}
