//! C code generation for compiled sprites.
//!
//! A sprite compiles to a header/source pair. The header declares one sprite
//! symbol and one animation symbol per tag; the source embeds the frame
//! tables, per-frame pixel arrays and tag index tables.
//!
//! # Output Format
//!
//! ```text
//! // hero.h
//! #pragma once
//!
//! #include "../engine/sprite.h"
//! #include "../engine/animation.h"
//!
//! extern const Sprite hero;
//! extern const SpriteAnimation hero_walk;
//! ```
//!
//! See [`source`] for the layout of the `.c` file.

pub mod header;
pub mod source;

pub use header::generate_header;
pub use source::generate_source;

use crate::frames::DerivedFrame;
use crate::identifier::to_identifier;
use crate::tags::ResolvedTag;

/// Default C type of the sprite symbol.
pub const DEFAULT_SPRITE_TYPE: &str = "Sprite";
/// Default C type of each animation symbol.
pub const DEFAULT_ANIMATION_TYPE: &str = "SpriteAnimation";

/// Per-sprite tables the source defines, as `<identifier>_<table>`.
pub const SPRITE_TABLES: [&str; 6] =
    ["widths", "heights", "x_offsets", "y_offsets", "durations", "frames"];

/// Settings for rendering one sprite.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Normalized sprite identifier, also the root of every generated symbol
    pub identifier: String,
    /// Include path of the header that declares the sprite type
    pub sprite_include: String,
    /// Include path of the header that declares the animation type
    pub animation_include: String,
    /// File name of the generated header, included by the source
    pub header_name: String,
    pub sprite_type: String,
    pub animation_type: String,
}

impl EmitOptions {
    /// Options with the default C type names.
    pub fn new(
        identifier: impl Into<String>,
        sprite_include: impl Into<String>,
        animation_include: impl Into<String>,
        header_name: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            sprite_include: sprite_include.into(),
            animation_include: animation_include.into(),
            header_name: header_name.into(),
            sprite_type: DEFAULT_SPRITE_TYPE.to_string(),
            animation_type: DEFAULT_ANIMATION_TYPE.to_string(),
        }
    }

    /// Set the sprite type name.
    pub fn with_sprite_type(mut self, sprite_type: impl Into<String>) -> Self {
        self.sprite_type = sprite_type.into();
        self
    }

    /// Set the animation type name.
    pub fn with_animation_type(mut self, animation_type: impl Into<String>) -> Self {
        self.animation_type = animation_type.into();
        self
    }

    /// Symbol of the animation generated for `tag_name`.
    pub fn tag_symbol(&self, tag_name: &str) -> String {
        format!("{}_{}", self.identifier, to_identifier(tag_name))
    }

    /// Symbol of the index table backing the animation for `tag_name`.
    pub fn indices_symbol(&self, tag_name: &str) -> String {
        format!("{}_indices", self.tag_symbol(tag_name))
    }

    /// Symbol of one of the [`SPRITE_TABLES`].
    pub fn table_symbol(&self, table: &str) -> String {
        format!("{}_{}", self.identifier, table)
    }

    /// Symbol of the pixel array of frame `index` (0-based).
    pub fn pixels_symbol(&self, index: usize) -> String {
        format!("{}_frame_{}_pixels", self.identifier, index)
    }
}

/// Rendered header and source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub header: String,
    pub source: String,
}

/// Render both files for a sprite.
pub fn generate(
    options: &EmitOptions,
    frames: &[DerivedFrame],
    tags: &[ResolvedTag],
) -> GeneratedCode {
    GeneratedCode {
        header: generate_header(options, tags),
        source: generate_source(options, frames, tags),
    }
}
