//! sprite2c - Library for compiling Aseprite sprite sheets into C sources
//!
//! This library provides functionality to:
//! - Read Aseprite's json-array sheet metadata and the sheet PNG
//! - Derive per-frame geometry, premultiplied pixels and tick durations
//! - Expand animation tags into frame index sequences
//! - Emit a C header and source defining one sprite and its animations
//!
//! ```
//! use sprite2c::identifier::to_identifier;
//!
//! assert_eq!(to_identifier("Walk Cycle"), "walk_cycle");
//! ```

pub mod aseprite;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod frames;
pub mod identifier;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod sheet;
pub mod tags;

pub use error::{CompileError, Result};
pub use pipeline::{compile, CompileOptions, CompiledSprite};
