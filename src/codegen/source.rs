//! Source file generation.
//!
//! # Output Format
//!
//! ```text
//! #include "hero.h"
//!
//! static const uint16_t hero_widths[2] = {16, 16};
//! static const uint16_t hero_heights[2] = {24, 24};
//! static const int16_t hero_x_offsets[2] = {-8, -8};
//! static const int16_t hero_y_offsets[2] = {-12, -12};
//! static const uint16_t hero_durations[2] = {6, 6};
//!
//! static const uint8_t hero_frame_0_pixels[1536] = {
//!     0x00, 0x00, 0x00, 0xff, ...
//! };
//!
//! static const uint8_t *const hero_frames[2] = {
//!     hero_frame_0_pixels,
//!     hero_frame_1_pixels,
//! };
//!
//! const Sprite hero = {
//!     .frame_count = 2,
//!     ...
//! };
//!
//! static const uint16_t hero_walk_indices[2] = {0, 1};
//!
//! const SpriteAnimation hero_walk = {
//!     .sprite = &hero,
//!     .indices = hero_walk_indices,
//!     .length = 2,
//!     .duration = 12,
//! };
//! ```
//!
//! Each frame's pixels get their own array so a frame is reachable through
//! one pointer. Frames with no pixels have no array and a `NULL` entry.

use std::fmt::Display;

use super::{EmitOptions, SPRITE_TABLES};
use crate::frames::DerivedFrame;
use crate::tags::ResolvedTag;

/// Values per line in wrapped array initializers.
const VALUES_PER_LINE: usize = 16;

/// Format an initializer list, wrapping long lists one row per line.
fn initializer<T: Display>(values: impl IntoIterator<Item = T>) -> String {
    let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
    if values.len() <= VALUES_PER_LINE {
        return format!("{{{}}}", values.join(", "));
    }

    let mut body = String::from("{\n");
    for row in values.chunks(VALUES_PER_LINE) {
        body.push_str("    ");
        body.push_str(&row.join(", "));
        body.push_str(",\n");
    }
    body.push('}');
    body
}

/// Emit `static const <ty> <name>[<len>] = {...};`.
fn push_table<T: Display>(
    content: &mut String,
    ty: &str,
    name: &str,
    values: impl ExactSizeIterator<Item = T>,
) {
    let len = values.len();
    content.push_str(&format!("static const {} {}[{}] = {};\n", ty, name, len, initializer(values)));
}

fn push_frame_pixels(content: &mut String, symbol: &str, pixels: &[u8]) {
    content.push_str(&format!("static const uint8_t {}[{}] = {{\n", symbol, pixels.len()));
    for row in pixels.chunks(VALUES_PER_LINE) {
        let bytes: Vec<String> = row.iter().map(|b| format!("0x{:02x}", b)).collect();
        content.push_str("    ");
        content.push_str(&bytes.join(", "));
        content.push_str(",\n");
    }
    content.push_str("};\n");
}

fn push_sprite(content: &mut String, options: &EmitOptions, frames: &[DerivedFrame]) {
    let id = &options.identifier;
    let table = |name: &str| options.table_symbol(name);

    push_table(content, "uint16_t", &table("widths"), frames.iter().map(|f| f.width));
    push_table(content, "uint16_t", &table("heights"), frames.iter().map(|f| f.height));
    push_table(content, "int16_t", &table("x_offsets"), frames.iter().map(|f| f.x_offset));
    push_table(content, "int16_t", &table("y_offsets"), frames.iter().map(|f| f.y_offset));
    push_table(content, "uint16_t", &table("durations"), frames.iter().map(|f| f.duration_ticks));
    content.push('\n');

    let mut frame_refs = Vec::with_capacity(frames.len());
    for (i, frame) in frames.iter().enumerate() {
        if frame.pixels.is_empty() {
            frame_refs.push("NULL".to_string());
            continue;
        }
        let symbol = options.pixels_symbol(i);
        push_frame_pixels(content, &symbol, &frame.pixels);
        content.push('\n');
        frame_refs.push(symbol);
    }

    content.push_str(&format!(
        "static const uint8_t *const {}[{}] = {{\n",
        table("frames"),
        frames.len()
    ));
    for frame_ref in &frame_refs {
        content.push_str(&format!("    {},\n", frame_ref));
    }
    content.push_str("};\n\n");

    content.push_str(&format!("const {} {} = {{\n", options.sprite_type, id));
    content.push_str(&format!("    .frame_count = {},\n", frames.len()));
    for field in SPRITE_TABLES {
        content.push_str(&format!("    .{} = {},\n", field, table(field)));
    }
    content.push_str("};\n");
}

fn push_animation(content: &mut String, options: &EmitOptions, tag: &ResolvedTag) {
    let symbol = options.tag_symbol(&tag.name);
    let indices = options.indices_symbol(&tag.name);

    content.push('\n');
    push_table(content, "uint16_t", &indices, tag.indices.iter());
    content.push('\n');
    content.push_str(&format!("const {} {} = {{\n", options.animation_type, symbol));
    content.push_str(&format!("    .sprite = &{},\n", options.identifier));
    content.push_str(&format!("    .indices = {},\n", indices));
    content.push_str(&format!("    .length = {},\n", tag.indices.len()));
    content.push_str(&format!("    .duration = {},\n", tag.total_duration_ticks));
    content.push_str("};\n");
}

/// Generate the source embedding frame data and animation tables.
pub fn generate_source(
    options: &EmitOptions,
    frames: &[DerivedFrame],
    tags: &[ResolvedTag],
) -> String {
    let mut content = String::new();

    content.push_str(&format!("#include \"{}\"\n\n", options.header_name));
    push_sprite(&mut content, options, frames);
    for tag in tags {
        push_animation(&mut content, options, tag);
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u16, height: u16, x_offset: i16, duration_ticks: u16) -> DerivedFrame {
        DerivedFrame {
            width,
            height,
            x_offset,
            y_offset: -1,
            duration_ticks,
            pixels: vec![0xab; width as usize * height as usize * 4],
        }
    }

    fn options() -> EmitOptions {
        EmitOptions::new("hero", "sprite.h", "animation.h", "hero.h")
    }

    #[test]
    fn test_initializer_short_and_wrapped() {
        assert_eq!(initializer([1, 2, 3]), "{1, 2, 3}");
        assert_eq!(initializer(Vec::<u16>::new()), "{}");

        let wrapped = initializer(0..20);
        assert!(wrapped.starts_with("{\n    0, 1, 2"));
        assert!(wrapped.contains("15,\n    16, 17, 18, 19,\n}"));
    }

    #[test]
    fn test_frame_tables() {
        let frames = vec![frame(2, 1, -3, 6), frame(1, 1, 4, 12)];
        let source = generate_source(&options(), &frames, &[]);

        assert!(source.starts_with("#include \"hero.h\"\n\n"));
        assert!(source.contains("static const uint16_t hero_widths[2] = {2, 1};\n"));
        assert!(source.contains("static const uint16_t hero_heights[2] = {1, 1};\n"));
        assert!(source.contains("static const int16_t hero_x_offsets[2] = {-3, 4};\n"));
        assert!(source.contains("static const int16_t hero_y_offsets[2] = {-1, -1};\n"));
        assert!(source.contains("static const uint16_t hero_durations[2] = {6, 12};\n"));
    }

    #[test]
    fn test_pixel_arrays_and_indirection() {
        let frames = vec![frame(2, 1, 0, 1), frame(1, 1, 0, 1)];
        let source = generate_source(&options(), &frames, &[]);

        assert!(source.contains(
            "static const uint8_t hero_frame_0_pixels[8] = {\n    \
             0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab,\n};\n"
        ));
        assert!(source.contains("static const uint8_t hero_frame_1_pixels[4] = {\n"));
        assert!(source.contains(
            "static const uint8_t *const hero_frames[2] = {\n    \
             hero_frame_0_pixels,\n    hero_frame_1_pixels,\n};\n"
        ));
    }

    #[test]
    fn test_pixel_rows_wrap_at_sixteen_bytes() {
        let source = generate_source(&options(), &[frame(5, 1, 0, 1)], &[]);
        let body: Vec<&str> = source
            .lines()
            .skip_while(|l| !l.starts_with("static const uint8_t hero_frame_0_pixels"))
            .skip(1)
            .take_while(|l| *l != "};")
            .collect();
        assert_eq!(body.len(), 2);
        assert_eq!(body[0].matches("0xab").count(), 16);
        assert_eq!(body[1].matches("0xab").count(), 4);
    }

    #[test]
    fn test_sprite_struct() {
        let source = generate_source(&options(), &[frame(1, 1, 0, 1)], &[]);
        assert!(source.contains(
            "const Sprite hero = {\n\
             \x20   .frame_count = 1,\n\
             \x20   .widths = hero_widths,\n\
             \x20   .heights = hero_heights,\n\
             \x20   .x_offsets = hero_x_offsets,\n\
             \x20   .y_offsets = hero_y_offsets,\n\
             \x20   .durations = hero_durations,\n\
             \x20   .frames = hero_frames,\n\
             };\n"
        ));
    }

    #[test]
    fn test_animation_struct() {
        let tags = vec![ResolvedTag {
            name: "Walk Cycle".to_string(),
            indices: vec![0, 1, 0],
            total_duration_ticks: 18,
        }];
        let frames = vec![frame(1, 1, 0, 6), frame(1, 1, 0, 6)];
        let source = generate_source(&options(), &frames, &tags);

        assert!(source.contains("static const uint16_t hero_walk_cycle_indices[3] = {0, 1, 0};\n"));
        assert!(source.contains(
            "const SpriteAnimation hero_walk_cycle = {\n\
             \x20   .sprite = &hero,\n\
             \x20   .indices = hero_walk_cycle_indices,\n\
             \x20   .length = 3,\n\
             \x20   .duration = 18,\n\
             };\n"
        ));
    }

    #[test]
    fn test_empty_frame_has_null_pointer() {
        let frames = vec![frame(0, 0, 0, 1), frame(1, 1, 0, 1)];
        let source = generate_source(&options(), &frames, &[]);
        assert!(!source.contains("hero_frame_0_pixels"));
        assert!(source.contains("    NULL,\n    hero_frame_1_pixels,\n"));
    }
}
