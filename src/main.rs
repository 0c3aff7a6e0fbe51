//! Drillboard - Command-line tool for validating drills and rendering them as SVG diagrams

use std::process::ExitCode;

use drillboard::cli;

fn main() -> ExitCode {
    cli::run()
}
