use std::path::PathBuf;

use super::*;
use crate::section::tests::model;

#[test]
fn cli_block_defaults() {
    let cli = Cli::parse_from([
        "geosection", "block", "-m", "model.json", "-c", "2", "-o", "out.svg",
    ]);
    match cli.command {
        Commands::Block(args) => {
            assert_eq!(args.common.model, PathBuf::from("model.json"));
            assert_eq!(args.common.direction, Direction::Y);
            assert_eq!(args.cell, 2);
            assert_eq!(args.fault, None);
            assert!((args.ve - 1.0).abs() < f64::EPSILON);
            assert!(!args.no_topography);
        }
        _ => panic!("Expected Block command"),
    }
    assert_eq!(cli.verbose, 0);
}

#[test]
fn cli_block_fault_conflicts_with_property() {
    let result = Cli::try_parse_from([
        "geosection", "block", "-m", "m.json", "-c", "0", "-o", "o.svg", "--fault", "0",
        "--property", "density",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_direction_parsing() {
    let cli = Cli::parse_from([
        "geosection", "scalar", "-m", "m.json", "-d", "X", "-c", "1", "-o", "o.svg", "-n", "8",
    ]);
    match cli.command {
        Commands::Scalar(args) => {
            assert_eq!(args.common.direction, Direction::X);
            assert_eq!(args.levels, Some(8));
            assert_eq!(args.series, 0);
        }
        _ => panic!("Expected Scalar command"),
    }

    let bad = Cli::try_parse_from([
        "geosection", "scalar", "-m", "m.json", "-d", "w", "-c", "1", "-o", "o.svg",
    ]);
    assert!(bad.is_err());
}

#[test]
fn cli_data_type_and_verbosity() {
    let cli = Cli::parse_from([
        "geosection", "data", "-vv", "-m", "m.json", "-o", "o.svg", "--data-type",
        "surface-points", "--series", "Strat",
    ]);
    assert_eq!(cli.verbose, 2);
    match cli.command {
        Commands::Data(args) => {
            assert_eq!(args.data_type, DataTypeArg::SurfacePoints);
            assert_eq!(DataType::from(args.data_type), DataType::SurfacePoints);
            assert_eq!(args.series, "Strat");
        }
        _ => panic!("Expected Data command"),
    }
}

#[test]
fn cli_gradient_defaults() {
    let cli = Cli::parse_from([
        "geosection", "gradient", "-m", "m.json", "-c", "0", "-o", "o.png",
    ]);
    match &cli.command {
        Commands::Gradient(args) => {
            assert_eq!(args.stride, 5);
            assert!(!args.no_scalar);
        }
        _ => panic!("Expected Gradient command"),
    }
    assert_eq!(cli.command.common().output, PathBuf::from("o.png"));
}

#[test]
fn cli_run_writes_block_section() {
    let dir = std::env::temp_dir().join(format!("geosection-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let model_path = dir.join("model.json");
    std::fs::write(&model_path, serde_json::to_string(&model()).unwrap()).unwrap();
    let output = dir.join("block.svg");

    let args: Vec<std::ffi::OsString> = vec![
        "geosection".into(),
        "block".into(),
        "-m".into(),
        model_path.into(),
        "-c".into(),
        "1".into(),
        "-o".into(),
        output.clone().into(),
        "--title".into(),
        "Cell 1".into(),
    ];
    let cli = Cli::parse_from(args);
    let written = cli.run().unwrap();
    assert_eq!(written, output);

    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.contains("Cell 1"));
    assert!(svg.contains("rock1"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn cli_run_missing_model() {
    let cli = Cli::parse_from([
        "geosection", "data", "-m", "/nonexistent/model.json", "-o", "o.svg",
    ]);
    assert!(cli.run().is_err());
}
