//! Error types for sprite compilation
//!
//! Every failure carries the context needed to locate the problem in the
//! source sheet: 1-based frame numbers, tag names, offending values and the
//! limit they violated.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Which frame field a geometry check rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryField {
    Width,
    Height,
    XOffset,
    YOffset,
}

impl std::fmt::Display for GeometryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GeometryField::Width => "width",
            GeometryField::Height => "height",
            GeometryField::XOffset => "x offset",
            GeometryField::YOffset => "y offset",
        };
        f.write_str(name)
    }
}

/// Error type for a compilation run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A frame dimension or offset does not fit its 16-bit encoding
    #[error("frame {frame}: {field} {value} is outside the range [{min}, {max}]")]
    GeometryLimitExceeded {
        /// 1-based frame number
        frame: usize,
        field: GeometryField,
        /// Offending value; offsets may be half pixels
        value: f64,
        min: i64,
        max: i64,
    },

    /// A frame duration is not a whole number of ticks at the refresh rate
    #[error(
        "frame {frame}: duration {duration_ms}ms is not a whole number of ticks at {refresh_rate}Hz"
    )]
    DurationIncompatible { frame: usize, duration_ms: u32, refresh_rate: u32 },

    /// A single frame lasts longer than a 16-bit tick count allows
    #[error("frame {frame}: duration of {ticks} ticks exceeds the limit of {max}", max = u16::MAX)]
    FrameDurationLimitExceeded { frame: usize, ticks: u64 },

    /// More frames than a 16-bit index can address
    #[error("sheet has {count} frames, the limit is {max}", max = u16::MAX)]
    FrameCountLimitExceeded { count: usize },

    /// The sheet has no frames at all
    #[error("sheet has no frames")]
    NoFrames,

    /// A frame rectangle reaches outside the sheet image
    #[error(
        "frame {frame}: rectangle {}x{} at ({}, {}) lies outside the {}x{} sheet",
        .rect[2], .rect[3], .rect[0], .rect[1], .sheet[0], .sheet[1]
    )]
    FrameOutOfBounds {
        frame: usize,
        /// `[x, y, w, h]`
        rect: [u32; 4],
        /// `[width, height]`
        sheet: [u32; 2],
    },

    /// A tag references frames that do not exist
    #[error("tag '{tag}': frame range {from}..={to} is invalid for {frame_count} frames")]
    TagRangeInvalid { tag: String, from: u32, to: u32, frame_count: usize },

    /// A tag's summed duration does not fit in 16 bits
    #[error("tag '{tag}': total duration of {total} ticks exceeds the limit of {max}", max = u16::MAX)]
    TagDurationLimitExceeded { tag: String, total: u64 },

    /// The refresh rate cannot quantize anything
    #[error("refresh rate must be at least 1Hz, got {0}")]
    InvalidRefreshRate(u32),

    /// A name produced an unusable C symbol
    #[error("'{name}' does not produce a usable identifier: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    /// The metadata source violated its contract
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Aseprite ran but reported failure
    #[error("aseprite exited with {status}: {stderr}")]
    Aseprite { status: ExitStatus, stderr: String },

    /// No Aseprite executable could be located
    #[error("aseprite executable not found (set --aseprite, [aseprite] path, or ASEPRITE_PATH)")]
    AsepriteNotFound,

    /// PNG decoding failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Metadata JSON could not be parsed
    #[error("invalid sheet metadata: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O failed
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompileError::Io { path: path.into(), source }
    }
}

/// Result alias for compilation operations.
pub type Result<T> = std::result::Result<T, CompileError>;
