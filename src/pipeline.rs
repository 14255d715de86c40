//! The sprite compilation pipeline
//!
//! Takes sheet metadata and a decoded raster that are already in memory and
//! produces header and source text. Nothing here touches the filesystem;
//! writing the result is up to the caller, and only happens once the whole
//! pipeline has succeeded.

use log::info;
use std::collections::HashSet;

use crate::codegen::{self, EmitOptions, GeneratedCode, SPRITE_TABLES};
use crate::error::{CompileError, Result};
use crate::frames::{derive_frames, DerivedFrame};
use crate::identifier::{is_c_keyword, to_identifier};
use crate::metadata::{RawTag, SheetMetadata};
use crate::sheet::SheetContext;
use crate::tags::{resolve_tags, ResolvedTag};

/// Everything the core transform needs besides the sheet itself.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Code generation settings, including the sprite identifier
    pub emit: EmitOptions,
    /// Target refresh rate in Hz, at least 1
    pub refresh_rate: u32,
}

/// Intermediate and final results of a successful compilation.
#[derive(Debug, Clone)]
pub struct CompiledSprite {
    pub frames: Vec<DerivedFrame>,
    pub tags: Vec<ResolvedTag>,
    pub code: GeneratedCode,
}

/// Check that the sprite identifier and every tag name can name C symbols.
fn check_names(emit: &EmitOptions, metadata: &SheetMetadata) -> Result<()> {
    if emit.identifier.is_empty() || to_identifier(&emit.identifier) != emit.identifier {
        return Err(CompileError::InvalidIdentifier {
            name: emit.identifier.clone(),
            reason: "sprite identifier must be a non-empty lowercase identifier",
        });
    }
    if emit.identifier.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(CompileError::InvalidIdentifier {
            name: emit.identifier.clone(),
            reason: "C identifiers cannot start with a digit",
        });
    }
    if is_c_keyword(&emit.identifier) {
        return Err(CompileError::InvalidIdentifier {
            name: emit.identifier.clone(),
            reason: "sprite identifier is a C keyword",
        });
    }

    for tag in &metadata.meta.frame_tags {
        if to_identifier(&tag.name).is_empty() {
            return Err(CompileError::InvalidIdentifier {
                name: tag.name.clone(),
                reason: "tag name has no letters or digits",
            });
        }
    }
    Ok(())
}

/// Check that no two definitions in the generated source share a symbol.
///
/// Sprite tables are claimed first, then each tag's animation and index
/// table in input order, so the tag reported is the first one to clash.
fn check_symbols(emit: &EmitOptions, frames: &[DerivedFrame], tags: &[RawTag]) -> Result<()> {
    let mut seen = HashSet::new();
    seen.insert(emit.identifier.clone());
    seen.extend(SPRITE_TABLES.iter().map(|table| emit.table_symbol(table)));
    seen.extend(
        frames
            .iter()
            .enumerate()
            .filter(|(_, frame)| !frame.pixels.is_empty())
            .map(|(i, _)| emit.pixels_symbol(i)),
    );

    for tag in tags {
        for symbol in [emit.tag_symbol(&tag.name), emit.indices_symbol(&tag.name)] {
            if !seen.insert(symbol) {
                return Err(CompileError::InvalidIdentifier {
                    name: tag.name.clone(),
                    reason: "its symbols clash with another tag or a sprite table",
                });
            }
        }
    }
    Ok(())
}

/// Compile one sprite sheet into C header and source text.
pub fn compile(
    metadata: &SheetMetadata,
    sheet: &SheetContext,
    options: &CompileOptions,
) -> Result<CompiledSprite> {
    if options.refresh_rate == 0 {
        return Err(CompileError::InvalidRefreshRate(options.refresh_rate));
    }
    check_names(&options.emit, metadata)?;

    let frames = derive_frames(&metadata.frames, sheet, options.refresh_rate)?;
    check_symbols(&options.emit, &frames, &metadata.meta.frame_tags)?;
    let tags = resolve_tags(&metadata.meta.frame_tags, &frames)?;
    let code = codegen::generate(&options.emit, &frames, &tags);

    info!(
        "compiled '{}': {} frames, {} tags at {}Hz",
        options.emit.identifier,
        frames.len(),
        tags.len(),
        options.refresh_rate
    );

    Ok(CompiledSprite { frames, tags, code })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Direction, Meta, RawFrame, RawTag, Rect, Size, TrimOffset};

    fn one_frame_sheet(duration: u32, tags: Vec<RawTag>) -> (SheetMetadata, SheetContext) {
        let metadata = SheetMetadata {
            frames: vec![RawFrame {
                frame: Rect { x: 0, y: 0, w: 2, h: 2 },
                sprite_source_size: TrimOffset { x: 0, y: 0 },
                source_size: Size { w: 2, h: 2 },
                duration,
            }],
            meta: Meta { image: None, frame_tags: tags },
        };
        let sheet = SheetContext::new(2, 2, vec![255; 16]).unwrap();
        (metadata, sheet)
    }

    fn tag(name: &str) -> RawTag {
        RawTag { name: name.to_string(), from: 0, to: 0, direction: Direction::Forward }
    }

    fn options(refresh_rate: u32) -> CompileOptions {
        CompileOptions {
            emit: EmitOptions::new("hero", "sprite.h", "animation.h", "hero.h"),
            refresh_rate,
        }
    }

    #[test]
    fn test_compile_single_frame() {
        let (metadata, sheet) = one_frame_sheet(1000, vec![tag("idle")]);
        let compiled = compile(&metadata, &sheet, &options(1)).unwrap();
        assert_eq!(compiled.frames.len(), 1);
        assert_eq!(compiled.frames[0].duration_ticks, 1);
        assert_eq!(compiled.tags[0].indices, vec![0]);
        assert!(compiled.code.header.contains("extern const SpriteAnimation hero_idle;"));
    }

    #[test]
    fn test_compile_rejects_bad_duration() {
        let (metadata, sheet) = one_frame_sheet(16, vec![tag("idle")]);
        let err = compile(&metadata, &sheet, &options(60)).unwrap_err();
        assert!(matches!(err, CompileError::DurationIncompatible { frame: 1, .. }));
    }

    #[test]
    fn test_zero_refresh_rate() {
        let (metadata, sheet) = one_frame_sheet(1000, vec![]);
        assert!(matches!(
            compile(&metadata, &sheet, &options(0)),
            Err(CompileError::InvalidRefreshRate(0))
        ));
    }

    #[test]
    fn test_empty_tag_identifier() {
        let (metadata, sheet) = one_frame_sheet(1000, vec![tag("---")]);
        let err = compile(&metadata, &sheet, &options(1)).unwrap_err();
        assert!(matches!(err, CompileError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_colliding_tag_symbols() {
        let (metadata, sheet) = one_frame_sheet(1000, vec![tag("Walk Left"), tag("walkLeft")]);
        let err = compile(&metadata, &sheet, &options(1)).unwrap_err();
        assert!(err.to_string().contains("walkLeft"));
    }

    #[test]
    fn test_unnormalized_sprite_identifier() {
        let (metadata, sheet) = one_frame_sheet(1000, vec![]);
        let mut opts = options(1);
        opts.emit.identifier = "Hero".to_string();
        assert!(compile(&metadata, &sheet, &opts).is_err());
        opts.emit.identifier = String::new();
        assert!(compile(&metadata, &sheet, &opts).is_err());
        opts.emit.identifier = "2_hero".to_string();
        assert!(compile(&metadata, &sheet, &opts).is_err());
    }

    #[test]
    fn test_keyword_sprite_identifier() {
        let (metadata, sheet) = one_frame_sheet(1000, vec![]);
        for keyword in ["int", "static", "struct"] {
            let mut opts = options(1);
            opts.emit.identifier = keyword.to_string();
            let err = compile(&metadata, &sheet, &opts).unwrap_err();
            assert!(
                matches!(err, CompileError::InvalidIdentifier { ref name, .. } if name == keyword),
                "got {:?}",
                err
            );
        }
    }

    #[test]
    fn test_tag_clashing_with_sprite_table() {
        for name in ["widths", "x offsets", "Durations", "frames", "frame 0 pixels"] {
            let (metadata, sheet) = one_frame_sheet(1000, vec![tag(name)]);
            let err = compile(&metadata, &sheet, &options(1)).unwrap_err();
            assert!(
                matches!(err, CompileError::InvalidIdentifier { name: ref n, .. } if n == name),
                "tag {} got {:?}",
                name,
                err
            );
        }
    }

    #[test]
    fn test_tag_clashing_with_index_table() {
        let (metadata, sheet) = one_frame_sheet(1000, vec![tag("walk"), tag("walk indices")]);
        let err = compile(&metadata, &sheet, &options(1)).unwrap_err();
        assert!(err.to_string().contains("walk indices"));
    }

    #[test]
    fn test_generated_symbols_are_unique() {
        let tags = vec![tag("idle"), tag("run"), tag("frame 1 pixels"), tag("heights left")];
        let (metadata, sheet) = one_frame_sheet(1000, tags);
        let compiled = compile(&metadata, &sheet, &options(1)).unwrap();

        let mut defined = HashSet::new();
        // top-level definitions only, not designated initializers
        let definitions = compiled.code.source.lines().filter(|l| !l.starts_with(' '));
        for line in definitions.filter(|l| l.contains(" = ")) {
            let lhs = line.split(" = ").next().unwrap();
            let symbol = lhs.split_whitespace().last().unwrap();
            let symbol = symbol.split('[').next().unwrap();
            assert!(defined.insert(symbol.to_string()), "{} defined twice", symbol);
        }
        assert!(defined.contains("hero_frame_1_pixels_indices"));
    }
}
