//! Configuration schema types for `sprite2c.toml`
//!
//! Defines the structure and validation rules for sprite2c configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::codegen::{DEFAULT_ANIMATION_TYPE, DEFAULT_SPRITE_TYPE};

/// Default target refresh rate in Hz.
pub const DEFAULT_REFRESH_RATE: u32 = 60;

/// Compilation inputs shared by every sprite
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompileConfig {
    /// Target refresh rate in Hz
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate: u32,
    /// Header that declares the sprite type
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sprite_header: Option<PathBuf>,
    /// Header that declares the animation type
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub animation_header: Option<PathBuf>,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self { refresh_rate: default_refresh_rate(), sprite_header: None, animation_header: None }
    }
}

fn default_refresh_rate() -> u32 {
    DEFAULT_REFRESH_RATE
}

/// Names used in the generated C code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodegenConfig {
    /// C type of the sprite symbol
    #[serde(default = "default_sprite_type")]
    pub sprite_type: String,
    /// C type of each animation symbol
    #[serde(default = "default_animation_type")]
    pub animation_type: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self { sprite_type: default_sprite_type(), animation_type: default_animation_type() }
    }
}

fn default_sprite_type() -> String {
    DEFAULT_SPRITE_TYPE.to_string()
}

fn default_animation_type() -> String {
    DEFAULT_ANIMATION_TYPE.to_string()
}

/// Aseprite executable settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AsepriteConfig {
    /// Explicit path to the Aseprite executable
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path: Option<PathBuf>,
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sprite2cConfig {
    #[serde(default)]
    pub compile: CompileConfig,
    #[serde(default)]
    pub codegen: CodegenConfig,
    #[serde(default)]
    pub aseprite: AsepriteConfig,
}

/// A single configuration problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Dotted path of the offending field
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Returns true if `name` is a plain C identifier.
fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Sprite2cConfig {
    /// Check the configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.compile.refresh_rate == 0 {
            issues.push(ConfigIssue {
                field: "compile.refresh_rate".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        for (field, value) in [
            ("codegen.sprite_type", &self.codegen.sprite_type),
            ("codegen.animation_type", &self.codegen.animation_type),
        ] {
            if !is_c_identifier(value) {
                issues.push(ConfigIssue {
                    field: field.to_string(),
                    message: format!("'{}' is not a C identifier", value),
                });
            }
        }

        issues
    }
}
