//! Command-line interface implementation
//!
//! This module provides the CLI entry point, logger setup and exit codes.
//! The compile command itself lives in [`compile`].

mod compile;

use clap::{ArgAction, Parser};
use log::{info, Level};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Check if a path is a pre-exported sheet (`.json`) rather than an Aseprite file.
pub fn is_json_export(path: &std::path::Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// sprite2c - Compile Aseprite sprite sheets into embeddable C sources
#[derive(Parser, Debug)]
#[command(name = "sprite2c")]
#[command(about = "sprite2c - Compile Aseprite sprite sheets into embeddable C sources")]
#[command(version)]
pub struct Cli {
    /// Sprite to compile: an .aseprite/.ase file, or a .json exported with
    /// `--format json-array --list-tags`
    pub input: PathBuf,

    /// Output base path; writes <OUTPUT>.h and <OUTPUT>.c.
    /// If omitted: the input path without its extension
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Header declaring the sprite type
    #[arg(long)]
    pub sprite_header: Option<PathBuf>,

    /// Header declaring the animation type
    #[arg(long)]
    pub animation_header: Option<PathBuf>,

    /// Target refresh rate in Hz (default: 60)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub refresh_rate: Option<u32>,

    /// C type of the sprite symbol (default: Sprite)
    #[arg(long)]
    pub sprite_type: Option<String>,

    /// C type of the animation symbols (default: SpriteAnimation)
    #[arg(long)]
    pub animation_type: Option<String>,

    /// Sheet image for a .json input (default: meta.image next to the json)
    #[arg(long)]
    pub sheet: Option<PathBuf>,

    /// Aseprite executable
    #[arg(long)]
    pub aseprite: Option<PathBuf>,

    /// Configuration file (default: nearest sprite2c.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Log level selected by the verbosity flags.
pub fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::Error;
    }
    match verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    }
}

/// Set up logging options
fn setup_logger(cli: &Cli) {
    let level = log_level(cli.verbose, cli.quiet);
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("Warning: could not initialize logger: {}", e);
        return;
    }
    info!("Log level: {}", level);
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    setup_logger(&cli);
    compile::run_compile(&cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_arguments() {
        let cli = Cli::try_parse_from([
            "sprite2c",
            "art/hero.aseprite",
            "-o",
            "gen/hero",
            "--sprite-header",
            "include/sprite.h",
            "--animation-header",
            "include/animation.h",
            "-r",
            "50",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.input, PathBuf::from("art/hero.aseprite"));
        assert_eq!(cli.output, Some(PathBuf::from("gen/hero")));
        assert_eq!(cli.refresh_rate, Some(50));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_zero_refresh_rate_rejected() {
        assert!(Cli::try_parse_from(["sprite2c", "a.json", "-r", "0"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["sprite2c", "a.json", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0, false), Level::Warn);
        assert_eq!(log_level(1, false), Level::Info);
        assert_eq!(log_level(2, false), Level::Debug);
        assert_eq!(log_level(7, false), Level::Trace);
        assert_eq!(log_level(0, true), Level::Error);
    }

    #[test]
    fn test_is_json_export() {
        assert!(is_json_export(Path::new("hero.json")));
        assert!(is_json_export(Path::new("hero.JSON")));
        assert!(!is_json_export(Path::new("hero.aseprite")));
        assert!(!is_json_export(Path::new("json")));
    }
}
