//! Configuration loading and discovery for `sprite2c.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::Sprite2cConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "sprite2c.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse sprite2c.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub refresh_rate: Option<u32>,
    pub sprite_header: Option<PathBuf>,
    pub animation_header: Option<PathBuf>,
    pub sprite_type: Option<String>,
    pub animation_type: Option<String>,
    pub aseprite: Option<PathBuf>,
}

/// Find sprite2c.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for sprite2c.toml
/// 2. Check XDG_CONFIG_HOME/sprite2c/sprite2c.toml (or ~/.config/sprite2c/sprite2c.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find sprite2c.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("sprite2c").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find sprite2c.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// [`find_config`] to locate one, falling back to defaults when there is
/// none.
pub fn load_config(path: Option<&Path>) -> Result<Sprite2cConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(Sprite2cConfig::default()),
    }
}

/// Load configuration from a specific file path.
///
/// Relative paths in the file are resolved against the file's directory.
fn load_config_file(path: &Path) -> Result<Sprite2cConfig, ConfigError> {
    log::debug!("loading config from {}", path.display());
    let contents = fs::read_to_string(path)?;
    let mut config: Sprite2cConfig = toml::from_str(&contents)?;
    check(&config)?;

    if let Some(root) = project_root(path) {
        resolve_config_paths(&mut config, root);
    }
    Ok(config)
}

fn resolve_config_paths(config: &mut Sprite2cConfig, root: &Path) {
    for path in [
        &mut config.compile.sprite_header,
        &mut config.compile.animation_header,
        &mut config.aseprite.path,
    ]
    .into_iter()
    .flatten()
    {
        *path = resolve_path(root, path);
    }
}

/// Get the project root directory from a config file path.
///
/// Returns the parent directory of the sprite2c.toml file.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

fn check(config: &Sprite2cConfig) -> Result<(), ConfigError> {
    let issues = config.validate();
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(issues.into_iter().map(|e| e.to_string()).collect()))
    }
}

/// Apply CLI overrides on top of a loaded configuration.
///
/// The merged result is validated again, since overrides can introduce
/// problems of their own.
pub fn merge_cli_overrides(
    mut config: Sprite2cConfig,
    overrides: &CliOverrides,
) -> Result<Sprite2cConfig, ConfigError> {
    if let Some(rate) = overrides.refresh_rate {
        config.compile.refresh_rate = rate;
    }
    if let Some(path) = &overrides.sprite_header {
        config.compile.sprite_header = Some(path.clone());
    }
    if let Some(path) = &overrides.animation_header {
        config.compile.animation_header = Some(path.clone());
    }
    if let Some(name) = &overrides.sprite_type {
        config.codegen.sprite_type = name.clone();
    }
    if let Some(name) = &overrides.animation_type {
        config.codegen.animation_type = name.clone();
    }
    if let Some(path) = &overrides.aseprite {
        config.aseprite.path = Some(path.clone());
    }

    check(&config)?;
    Ok(config)
}
