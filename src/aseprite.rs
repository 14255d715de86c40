//! Aseprite subprocess export
//!
//! Runs Aseprite in batch mode to export a `.aseprite` file as a packed PNG
//! sheet plus `json-array` metadata, then loads both into memory. The export
//! lives in a temporary directory that is removed when the [`SheetExport`]
//! is dropped.
//!
//! Sheets that were already exported (a `.json` next to its `.png`) are
//! loaded directly with [`load_json_export`].

use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

use crate::error::{CompileError, Result};
use crate::metadata::SheetMetadata;
use crate::sheet::{read_to_string, SheetContext};

/// Environment variable naming the Aseprite executable.
pub const ASEPRITE_PATH_ENV: &str = "ASEPRITE_PATH";

const SHEET_FILE: &str = "sheet.png";
const DATA_FILE: &str = "sheet.json";

/// Locate the Aseprite executable.
///
/// Search order: `explicit` path, `ASEPRITE_PATH`, `PATH`, then common
/// install locations.
pub fn find_aseprite(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        debug!("configured aseprite path {} does not exist", path.display());
    }

    if let Ok(path) = std::env::var(ASEPRITE_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(path);
        }
    }

    let names: &[&str] = if cfg!(windows) { &["aseprite.exe", "aseprite"] } else { &["aseprite"] };
    for name in names {
        if let Ok(path) = which::which(name) {
            return Ok(path);
        }
    }

    let common_paths: &[&str] = if cfg!(windows) {
        &[
            "C:\\Program Files\\Aseprite\\Aseprite.exe",
            "C:\\Program Files (x86)\\Steam\\steamapps\\common\\Aseprite\\Aseprite.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &["/Applications/Aseprite.app/Contents/MacOS/aseprite"]
    } else {
        &["/usr/bin/aseprite", "/usr/local/bin/aseprite", "/snap/bin/aseprite"]
    };
    for path_str in common_paths {
        let path = PathBuf::from(path_str);
        if path.exists() {
            return Ok(path);
        }
    }

    Err(CompileError::AsepriteNotFound)
}

/// Build the batch-mode export command.
pub fn export_command(aseprite: &Path, input: &Path, sheet: &Path, data: &Path) -> Command {
    let mut cmd = Command::new(aseprite);
    cmd.arg("--batch")
        .arg(input)
        .arg("--format")
        .arg("json-array")
        .arg("--list-tags")
        .arg("--sheet")
        .arg(sheet)
        .arg("--data")
        .arg(data);
    cmd
}

/// A sheet exported by Aseprite and loaded into memory.
#[derive(Debug)]
pub struct SheetExport {
    pub metadata: SheetMetadata,
    pub sheet: SheetContext,
    /// Export directory, removed on drop
    _dir: Option<TempDir>,
}

/// Export `input` with Aseprite and load the result.
pub fn export_sheet(aseprite: &Path, input: &Path) -> Result<SheetExport> {
    let dir = tempfile::Builder::new()
        .prefix("sprite2c_")
        .tempdir()
        .map_err(|e| CompileError::io(std::env::temp_dir(), e))?;
    let sheet_path = dir.path().join(SHEET_FILE);
    let data_path = dir.path().join(DATA_FILE);

    info!("exporting {} with {}", input.display(), aseprite.display());
    let output = export_command(aseprite, input, &sheet_path, &data_path)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| CompileError::io(aseprite, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CompileError::Aseprite {
            status: output.status,
            stderr: stderr.split_whitespace().collect::<Vec<_>>().join(" "),
        });
    }
    debug!("aseprite stdout: {}", String::from_utf8_lossy(&output.stdout).trim());

    let metadata = SheetMetadata::from_json(&read_to_string(&data_path)?)?;
    let sheet = SheetContext::load_png(&sheet_path)?;
    Ok(SheetExport { metadata, sheet, _dir: Some(dir) })
}

/// Load a sheet exported earlier.
///
/// The image is `sheet` when given, otherwise `meta.image` resolved next to
/// the JSON file.
pub fn load_json_export(data: &Path, sheet: Option<&Path>) -> Result<SheetExport> {
    let metadata = SheetMetadata::from_json(&read_to_string(data)?)?;
    let sheet_path = match (sheet, &metadata.meta.image) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(image)) => data.parent().unwrap_or(Path::new("")).join(image),
        (None, None) => {
            return Err(CompileError::Protocol(format!(
                "{} has no meta.image and no sheet image was given",
                data.display()
            )))
        }
    };
    debug!("loading sheet image {}", sheet_path.display());
    let sheet = SheetContext::load_png(&sheet_path)?;
    Ok(SheetExport { metadata, sheet, _dir: None })
}
