//! Compile command implementation

use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{is_json_export, Cli, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::aseprite::{export_sheet, find_aseprite, load_json_export, SheetExport};
use crate::codegen::EmitOptions;
use crate::config::{load_config, merge_cli_overrides, CliOverrides, Sprite2cConfig};
use crate::error::Result;
use crate::identifier::identifier_from_path;
use crate::output::{
    default_output_base, include_base_dir, relative_include_path, write_output, OutputPaths,
};
use crate::pipeline::{compile, CompileOptions};

fn overrides_from(cli: &Cli) -> CliOverrides {
    CliOverrides {
        refresh_rate: cli.refresh_rate,
        sprite_header: cli.sprite_header.clone(),
        animation_header: cli.animation_header.clone(),
        sprite_type: cli.sprite_type.clone(),
        animation_type: cli.animation_type.clone(),
        aseprite: cli.aseprite.clone(),
    }
}

/// Load and merge configuration, or report why it is unusable.
fn resolve_config(cli: &Cli) -> std::result::Result<(Sprite2cConfig, PathBuf, PathBuf), String> {
    let config = load_config(cli.config.as_deref()).map_err(|e| e.to_string())?;
    let config = merge_cli_overrides(config, &overrides_from(cli)).map_err(|e| e.to_string())?;

    let sprite_header = config.compile.sprite_header.clone().ok_or_else(|| {
        "No sprite header given (use --sprite-header or [compile] sprite_header)".to_string()
    })?;
    let animation_header = config.compile.animation_header.clone().ok_or_else(|| {
        "No animation header given (use --animation-header or [compile] animation_header)"
            .to_string()
    })?;
    Ok((config, sprite_header, animation_header))
}

/// Get the sheet into memory, exporting it with Aseprite if needed.
fn load_sheet(cli: &Cli, config: &Sprite2cConfig) -> Result<SheetExport> {
    if is_json_export(&cli.input) {
        return load_json_export(&cli.input, cli.sheet.as_deref());
    }
    let aseprite = find_aseprite(config.aseprite.path.as_deref())?;
    export_sheet(&aseprite, &cli.input)
}

fn compile_sprite(
    cli: &Cli,
    config: &Sprite2cConfig,
    sprite_header: &Path,
    animation_header: &Path,
) -> Result<OutputPaths> {
    let export = load_sheet(cli, config)?;

    let base = cli.output.clone().unwrap_or_else(|| default_output_base(&cli.input));
    let paths = OutputPaths::from_base(&base);
    let include_dir = include_base_dir(&cli.input);

    let emit = EmitOptions::new(
        identifier_from_path(&cli.input),
        relative_include_path(&include_dir, sprite_header)?,
        relative_include_path(&include_dir, animation_header)?,
        paths.header_name(),
    )
    .with_sprite_type(config.codegen.sprite_type.clone())
    .with_animation_type(config.codegen.animation_type.clone());
    let options = CompileOptions { emit, refresh_rate: config.compile.refresh_rate };

    let compiled = compile(&export.metadata, &export.sheet, &options)?;
    write_output(&paths, &compiled.code)?;
    Ok(paths)
}

/// Execute the compile command
pub fn run_compile(cli: &Cli) -> ExitCode {
    let (config, sprite_header, animation_header) = match resolve_config(cli) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if !cli.input.exists() {
        eprintln!("Error: Cannot open input file '{}'", cli.input.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    info!("compiling {}", cli.input.display());
    match compile_sprite(cli, &config, &sprite_header, &animation_header) {
        Ok(paths) => {
            println!("Saved: {} + {}", paths.header.display(), paths.source.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
