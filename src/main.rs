//! ungz - decompresses gzip stream from stdin into stdout
//!
//! Usage: `ungz < input.gz > output`

use std::io;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info};

#[derive(Parser)]
#[command(name = "ungz")]
#[command(author, version, about = "Decompresses gzip stream from stdin into stdout")]
#[command(override_usage = "ungz < input.gz > output")]
struct Cli {}

//Info level keeps the final status line visible on stderr
const VERBOSITY: usize = 2;

fn main() -> ExitCode {
    Cli::parse();

    if let Err(error) = stderrlog::new().module(module_path!()).verbosity(VERBOSITY).init() {
        eprintln!("Unable to initialize logging: {error}");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();

    match ungz::decompress(stdin.lock(), stdout.lock()) {
        Ok(summary) => {
            info!("Decompression successful");
            debug!("{summary:?}");
            ExitCode::SUCCESS
        },
        Err(err) => {
            error!("An error occurred while decompressing: {err}");
            ExitCode::FAILURE
        }
    }
}
