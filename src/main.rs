//! sprite2c - Command-line tool for compiling Aseprite sprite sheets into C sources

use std::process::ExitCode;

use sprite2c::cli;

fn main() -> ExitCode {
    cli::run()
}
