//! Frame derivation
//!
//! Turns raw sheet metadata into validated frames: 16-bit geometry, offsets
//! from the canvas center, durations in refresh-rate ticks, and the frame's
//! pixels with premultiplied alpha.

use log::debug;

use crate::error::{CompileError, GeometryField, Result};
use crate::metadata::RawFrame;
use crate::sheet::SheetContext;

/// A validated frame ready for code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedFrame {
    pub width: u16,
    pub height: u16,
    /// Horizontal offset of the frame's left edge from the canvas center
    pub x_offset: i16,
    /// Vertical offset of the frame's top edge from the canvas center
    pub y_offset: i16,
    /// Display time in refresh-rate ticks
    pub duration_ticks: u16,
    /// Premultiplied RGBA bytes, `width * height * 4` long
    pub pixels: Vec<u8>,
}

/// Convert a millisecond duration into whole ticks at `refresh_rate` Hz.
///
/// Returns `None` when the duration is not a whole number of ticks.
pub fn duration_to_ticks(duration_ms: u32, refresh_rate: u32) -> Option<u64> {
    let scaled = duration_ms as u64 * refresh_rate as u64;
    if scaled % 1000 == 0 {
        Some(scaled / 1000)
    } else {
        None
    }
}

/// Premultiply one RGBA pixel.
///
/// Color channels become `floor(channel * alpha / 255)`; the fourth byte
/// stores `255 - alpha`, the transparency the sprite runtime blends with.
pub fn premultiply([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    let scale = |c: u8| (c as u16 * a as u16 / 255) as u8;
    [scale(r), scale(g), scale(b), 255 - a]
}

/// Validate a dimension against the `u16` range.
fn check_dimension(frame: usize, field: GeometryField, value: u32) -> Result<u16> {
    u16::try_from(value).map_err(|_| CompileError::GeometryLimitExceeded {
        frame,
        field,
        value: value as f64,
        min: 0,
        max: u16::MAX as i64,
    })
}

/// Offset of a trimmed edge from the center of its canvas.
///
/// The center may fall on a half pixel, so the work is done in half-pixel
/// units. The range check applies to the exact value; the stored offset is
/// rounded down so every frame of a canvas shifts the same way.
fn center_offset(frame: usize, field: GeometryField, trim: i64, canvas: u32) -> Result<i16> {
    let min = i16::MIN as i64;
    let max = i16::MAX as i64;
    let halves = trim.checked_mul(2).and_then(|t| t.checked_sub(canvas as i64));
    match halves {
        Some(halves) if halves >= 2 * min && halves <= 2 * max => {
            // In range, so the floored value fits
            Ok(halves.div_euclid(2) as i16)
        }
        _ => Err(CompileError::GeometryLimitExceeded {
            frame,
            field,
            value: trim as f64 - canvas as f64 / 2.0,
            min,
            max,
        }),
    }
}

/// Copy a frame's rectangle out of the sheet, premultiplying each pixel.
fn extract_pixels(sheet: &SheetContext, raw: &RawFrame) -> Vec<u8> {
    let rect = raw.frame;
    let mut pixels = Vec::with_capacity(rect.w as usize * rect.h as usize * 4);
    for y in rect.y..rect.y + rect.h {
        for x in rect.x..rect.x + rect.w {
            pixels.extend_from_slice(&premultiply(sheet.pixel(x, y)));
        }
    }
    pixels
}

/// Validate and convert a single frame. `frame` is the 1-based frame number.
fn derive_frame(
    frame: usize,
    raw: &RawFrame,
    sheet: &SheetContext,
    refresh_rate: u32,
) -> Result<DerivedFrame> {
    let rect = raw.frame;
    let width = check_dimension(frame, GeometryField::Width, rect.w)?;
    let height = check_dimension(frame, GeometryField::Height, rect.h)?;

    let x_offset =
        center_offset(frame, GeometryField::XOffset, raw.sprite_source_size.x, raw.source_size.w)?;
    let y_offset =
        center_offset(frame, GeometryField::YOffset, raw.sprite_source_size.y, raw.source_size.h)?;

    let ticks = duration_to_ticks(raw.duration, refresh_rate).ok_or(
        CompileError::DurationIncompatible {
            frame,
            duration_ms: raw.duration,
            refresh_rate,
        },
    )?;
    let duration_ticks = u16::try_from(ticks)
        .map_err(|_| CompileError::FrameDurationLimitExceeded { frame, ticks })?;

    if !sheet.contains(rect.x, rect.y, rect.w, rect.h) {
        return Err(CompileError::FrameOutOfBounds {
            frame,
            rect: [rect.x, rect.y, rect.w, rect.h],
            sheet: [sheet.width, sheet.height],
        });
    }

    debug!(
        "frame {}: {}x{} offset ({}, {}) {} ticks",
        frame, width, height, x_offset, y_offset, duration_ticks
    );

    Ok(DerivedFrame {
        width,
        height,
        x_offset,
        y_offset,
        duration_ticks,
        pixels: extract_pixels(sheet, raw),
    })
}

/// Derive every frame of a sheet, in input order.
///
/// Fails on the first frame that violates a limit.
pub fn derive_frames(
    raw_frames: &[RawFrame],
    sheet: &SheetContext,
    refresh_rate: u32,
) -> Result<Vec<DerivedFrame>> {
    if raw_frames.len() > u16::MAX as usize {
        return Err(CompileError::FrameCountLimitExceeded { count: raw_frames.len() });
    }
    if raw_frames.is_empty() {
        return Err(CompileError::NoFrames);
    }

    raw_frames
        .iter()
        .enumerate()
        .map(|(i, raw)| derive_frame(i + 1, raw, sheet, refresh_rate))
        .collect()
}
