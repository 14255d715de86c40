//! Conversion of human-readable names into C identifiers
//!
//! Names come from sprite file names and Aseprite tag names, which mix
//! spaces, kebab-case, snake_case, camelCase and PascalCase freely. They are
//! all normalized to lowercase snake_case:
//!
//! ```
//! use sprite2c::identifier::to_identifier;
//!
//! assert_eq!(to_identifier("TestPascalCasedTXTString"), "test_pascal_cased_txt_string");
//! assert_eq!(to_identifier("_test-kebab_Mixed"), "test_kebab_mixed");
//! assert_eq!(to_identifier("Walk Cycle 2"), "walk_cycle_2");
//! ```

use std::path::Path;

/// Scanner state while splitting a chunk at casing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseState {
    /// No character of the current word seen yet
    StartOfWord,
    /// Last character was lowercase or a digit
    LowerRun,
    /// Last character was uppercase
    UpperRun,
}

/// Returns true for characters that separate words outright.
///
/// Whitespace, `_` and `-` are the documented separators; anything else that
/// is not an ASCII letter or digit can't appear in a C identifier and is
/// treated the same way.
fn is_separator(c: char) -> bool {
    !c.is_ascii_alphanumeric()
}

/// Split one separator-free chunk into words at casing transitions.
///
/// A boundary is inserted before an uppercase letter that follows a lowercase
/// letter or digit (`camelCase`), and before the last capital of an acronym
/// run when a lowercase letter follows it (`TXTString` -> `TXT`, `String`).
fn split_case_words(chunk: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = chunk.char_indices().collect();
    let mut words = Vec::new();
    let mut start = 0;
    let mut state = CaseState::StartOfWord;

    for (i, &(offset, c)) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let next_is_lower = chars.get(i + 1).is_some_and(|&(_, n)| n.is_ascii_lowercase());
            let boundary = match state {
                CaseState::StartOfWord => false,
                CaseState::LowerRun => true,
                CaseState::UpperRun => next_is_lower,
            };
            if boundary {
                words.push(&chunk[start..offset]);
                start = offset;
            }
            state = CaseState::UpperRun;
        } else {
            state = CaseState::LowerRun;
        }
    }

    if start < chunk.len() {
        words.push(&chunk[start..]);
    }
    words
}

/// Normalize arbitrary text into a lowercase, underscore-separated identifier.
///
/// The result only contains `[a-z0-9_]`, never starts or ends with `_` and
/// never contains `__`. Text made only of separators yields an empty string.
/// Normalizing an already-normalized identifier returns it unchanged.
pub fn to_identifier(name: &str) -> String {
    name.split(is_separator)
        .filter(|chunk| !chunk.is_empty())
        .flat_map(split_case_words)
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Derive an identifier from a file name, ignoring directory and extension.
///
/// `sprites/PlayerShip.aseprite` becomes `player_ship`.
pub fn identifier_from_path(path: &Path) -> String {
    path.file_stem().map(|stem| to_identifier(&stem.to_string_lossy())).unwrap_or_default()
}

/// Lowercase C keywords, C23 included. Normalized names never contain
/// uppercase, so the `_Bool` family can't occur.
const C_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "auto", "bool", "break", "case", "char", "const", "constexpr",
    "continue", "default", "do", "double", "else", "enum", "extern", "false", "float", "for",
    "goto", "if", "inline", "int", "long", "nullptr", "register", "restrict", "return", "short",
    "signed", "sizeof", "static", "static_assert", "struct", "switch", "thread_local", "true",
    "typedef", "typeof", "typeof_unqual", "union", "unsigned", "void", "volatile", "while",
];

/// Returns true if `name` is reserved as a C keyword.
pub fn is_c_keyword(name: &str) -> bool {
    C_KEYWORDS.contains(&name)
}
