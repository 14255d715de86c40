//! Animation tag expansion
//!
//! Each Aseprite tag names an inclusive frame range and a playback
//! direction. Expansion turns that into the exact sequence of frame indices
//! the runtime steps through, and sums its duration.

use log::debug;

use crate::error::{CompileError, Result};
use crate::frames::DerivedFrame;
use crate::metadata::{Direction, RawTag};

/// A tag expanded into concrete frame indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTag {
    /// Tag name as written in the sheet
    pub name: String,
    /// Frame indices in playback order, never empty
    pub indices: Vec<u16>,
    /// Sum of the duration of every entry in `indices`
    pub total_duration_ticks: u16,
}

/// Expand an inclusive range into playback order.
///
/// Ping-pong visits both end frames once and interior frames twice:
/// `2..=5` plays `[2, 3, 4, 5, 4, 3]`.
pub fn expand_indices(from: u16, to: u16, direction: Direction) -> Vec<u16> {
    match direction {
        Direction::Forward => (from..=to).collect(),
        Direction::Reverse => (from..=to).rev().collect(),
        Direction::PingPong if from == to => vec![from],
        Direction::PingPong => (from..to).chain((from + 1..=to).rev()).collect(),
    }
}

fn resolve_tag(tag: &RawTag, frames: &[DerivedFrame]) -> Result<ResolvedTag> {
    let invalid_range = || CompileError::TagRangeInvalid {
        tag: tag.name.clone(),
        from: tag.from,
        to: tag.to,
        frame_count: frames.len(),
    };
    if tag.from > tag.to || tag.to as usize >= frames.len() {
        return Err(invalid_range());
    }
    // frames.len() <= u16::MAX, so both ends fit
    let from = u16::try_from(tag.from).map_err(|_| invalid_range())?;
    let to = u16::try_from(tag.to).map_err(|_| invalid_range())?;

    let indices = expand_indices(from, to, tag.direction);
    let total: u64 = indices.iter().map(|&i| frames[i as usize].duration_ticks as u64).sum();
    let total_duration_ticks = u16::try_from(total)
        .map_err(|_| CompileError::TagDurationLimitExceeded { tag: tag.name.clone(), total })?;

    debug!(
        "tag '{}': {} {}..={} -> {} steps, {} ticks",
        tag.name,
        tag.direction,
        from,
        to,
        indices.len(),
        total_duration_ticks
    );

    Ok(ResolvedTag { name: tag.name.clone(), indices, total_duration_ticks })
}

/// Resolve every tag against the derived frame table, in input order.
pub fn resolve_tags(tags: &[RawTag], frames: &[DerivedFrame]) -> Result<Vec<ResolvedTag>> {
    tags.iter().map(|tag| resolve_tag(tag, frames)).collect()
}
