//! Header file generation.

use super::EmitOptions;
use crate::tags::ResolvedTag;

/// Generate the header declaring the sprite and its animations.
pub fn generate_header(options: &EmitOptions, tags: &[ResolvedTag]) -> String {
    let mut content = String::new();

    content.push_str("#pragma once\n\n");
    content.push_str(&format!("#include \"{}\"\n", options.sprite_include));
    content.push_str(&format!("#include \"{}\"\n", options.animation_include));
    content.push('\n');

    content.push_str(&format!("extern const {} {};\n", options.sprite_type, options.identifier));
    for tag in tags {
        content.push_str(&format!(
            "extern const {} {};\n",
            options.animation_type,
            options.tag_symbol(&tag.name)
        ));
    }

    content
}
