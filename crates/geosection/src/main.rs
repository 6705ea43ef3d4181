use clap::Parser;

use geosection::cli::Cli;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;

fn main() {
    let cli = Cli::parse();
    geosection::init_logging_with_verbosity(cli.verbose);

    let exit_code = match cli.run() {
        Ok(path) => {
            log::info!("done: {}", path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_FAILURE
        }
    };

    std::process::exit(exit_code);
}
