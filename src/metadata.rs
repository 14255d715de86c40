//! Aseprite sheet metadata
//!
//! Models the JSON document Aseprite writes with `--format json-array
//! --list-tags`. Only the fields the compiler needs are declared; anything
//! else in the document (`filename`, `rotated`, `layers`, ...) is ignored.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{CompileError, Result};

/// A rectangle in sheet pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Position of the trimmed frame inside its untrimmed canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrimOffset {
    pub x: i64,
    pub y: i64,
}

/// Dimensions of the untrimmed canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

/// One frame entry of the `frames` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFrame {
    /// Location of the frame in the sheet image
    pub frame: Rect,
    /// Trim offset within the original canvas
    pub sprite_source_size: TrimOffset,
    /// Untrimmed canvas size
    pub source_size: Size,
    /// Display time in milliseconds
    pub duration: u32,
}

/// Animation playback direction of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Direction {
    Forward,
    Reverse,
    PingPong,
}

impl Direction {
    /// The spelling Aseprite uses in `frameTags[].direction`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
            Direction::PingPong => "pingpong",
        }
    }
}

impl FromStr for Direction {
    type Err = CompileError;

    /// Aseprite only ever writes these three values, so anything else means
    /// the metadata did not come from a compatible exporter.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "forward" => Ok(Direction::Forward),
            "reverse" => Ok(Direction::Reverse),
            "pingpong" => Ok(Direction::PingPong),
            other => Err(CompileError::Protocol(format!(
                "unknown animation direction '{}' (expected forward, reverse or pingpong)",
                other
            ))),
        }
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        direction.as_str().to_string()
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of `meta.frameTags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawTag {
    pub name: String,
    /// First frame index (0-based, inclusive)
    pub from: u32,
    /// Last frame index (0-based, inclusive)
    pub to: u32,
    pub direction: Direction,
}

/// The `meta` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Sheet image file name, relative to the metadata file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub frame_tags: Vec<RawTag>,
}

/// A complete sheet metadata document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SheetMetadata {
    pub frames: Vec<RawFrame>,
    pub meta: Meta,
}

// Wire shapes. Tag directions stay strings here and are checked while
// converting, so a bad value surfaces as a protocol error.

#[derive(Deserialize)]
struct TagDocument {
    name: String,
    from: u32,
    to: u32,
    direction: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaDocument {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    frame_tags: Vec<TagDocument>,
}

#[derive(Deserialize)]
struct SheetDocument {
    frames: Vec<RawFrame>,
    #[serde(default)]
    meta: MetaDocument,
}

impl TagDocument {
    fn into_tag(self) -> Result<RawTag> {
        let direction = self
            .direction
            .ok_or_else(|| CompileError::Protocol(format!("tag '{}' has no direction", self.name)))?
            .parse()?;
        Ok(RawTag { name: self.name, from: self.from, to: self.to, direction })
    }
}

impl SheetMetadata {
    /// Parse a metadata document.
    ///
    /// Malformed JSON is a [`CompileError::Json`]; a tag with a missing or
    /// unknown direction is a [`CompileError::Protocol`].
    pub fn from_json(text: &str) -> Result<Self> {
        let doc: SheetDocument = serde_json::from_str(text)?;
        let frame_tags =
            doc.meta.frame_tags.into_iter().map(TagDocument::into_tag).collect::<Result<Vec<_>>>()?;
        Ok(SheetMetadata { frames: doc.frames, meta: Meta { image: doc.meta.image, frame_tags } })
    }
}
