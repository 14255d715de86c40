//! Output paths and file writing

use log::info;
use std::path::{Component, Path, PathBuf};

use crate::codegen::GeneratedCode;
use crate::error::{CompileError, Result};

/// Paths of a generated header/source pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub header: PathBuf,
    pub source: PathBuf,
}

impl OutputPaths {
    /// `<base>.h` and `<base>.c`.
    ///
    /// The suffixes are appended, so a base of `out/hero.v2` gives
    /// `out/hero.v2.h` rather than replacing `.v2`.
    pub fn from_base(base: &Path) -> Self {
        let with_suffix = |suffix: &str| {
            let mut path = base.as_os_str().to_owned();
            path.push(suffix);
            PathBuf::from(path)
        };
        Self { header: with_suffix(".h"), source: with_suffix(".c") }
    }

    /// File name of the header, as the source includes it.
    pub fn header_name(&self) -> String {
        self.header.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
    }
}

/// Default output base: the input path without its extension.
///
/// `art/hero.aseprite` -> `art/hero`
pub fn default_output_base(input: &Path) -> PathBuf {
    input.with_extension("")
}

/// Make a path absolute and drop `.` and `..` components lexically.
fn normalize(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| CompileError::io(path, e))?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Express `target` relative to the directory `base`, with `/` separators.
///
/// Both paths are resolved lexically, so neither has to exist. When they
/// share no common root (different drives on Windows) the absolute target is
/// returned.
pub fn relative_include_path(base: &Path, target: &Path) -> Result<String> {
    let base = normalize(base)?;
    let target = normalize(target)?;

    let base_parts: Vec<Component> = base.components().collect();
    let target_parts: Vec<Component> = target.components().collect();
    let common = base_parts.iter().zip(&target_parts).take_while(|(a, b)| a == b).count();

    if common == 0 {
        return Ok(target.to_string_lossy().replace('\\', "/"));
    }

    let mut parts: Vec<String> = vec!["..".to_string(); base_parts.len() - common];
    parts.extend(target_parts[common..].iter().map(|c| c.as_os_str().to_string_lossy().into_owned()));
    Ok(parts.join("/"))
}

/// The directory includes are written relative to: the input sheet's folder.
pub fn include_base_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| CompileError::io(parent, e))?;
        }
    }
    std::fs::write(path, content).map_err(|e| CompileError::io(path, e))
}

/// Write the header and source, creating parent directories as needed.
pub fn write_output(paths: &OutputPaths, code: &GeneratedCode) -> Result<()> {
    write_file(&paths.header, &code.header)?;
    write_file(&paths.source, &code.source)?;
    info!("wrote {} and {}", paths.header.display(), paths.source.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_paths_append_suffix() {
        let paths = OutputPaths::from_base(Path::new("build/sprites/hero"));
        assert_eq!(paths.header, PathBuf::from("build/sprites/hero.h"));
        assert_eq!(paths.source, PathBuf::from("build/sprites/hero.c"));
        assert_eq!(paths.header_name(), "hero.h");

        let dotted = OutputPaths::from_base(Path::new("out/hero.v2"));
        assert_eq!(dotted.header, PathBuf::from("out/hero.v2.h"));
    }

    #[test]
    fn test_default_output_base() {
        assert_eq!(default_output_base(Path::new("art/hero.aseprite")), PathBuf::from("art/hero"));
        assert_eq!(default_output_base(Path::new("hero.json")), PathBuf::from("hero"));
    }

    #[test]
    fn test_relative_include_sibling_dirs() {
        let rel = relative_include_path(
            Path::new("/project/assets/sprites"),
            Path::new("/project/engine/include/sprite.h"),
        )
        .unwrap();
        assert_eq!(rel, "../../engine/include/sprite.h");
    }

    #[test]
    fn test_relative_include_same_dir() {
        let rel =
            relative_include_path(Path::new("/project/art"), Path::new("/project/art/anim.h"))
                .unwrap();
        assert_eq!(rel, "anim.h");
    }

    #[test]
    fn test_relative_include_resolves_dots() {
        let rel = relative_include_path(
            Path::new("/project/./art/../art"),
            Path::new("/project/include/../include/sprite.h"),
        )
        .unwrap();
        assert_eq!(rel, "../include/sprite.h");
    }

    #[test]
    fn test_relative_include_from_relative_paths() {
        let rel = relative_include_path(Path::new("art"), Path::new("include/sprite.h")).unwrap();
        assert_eq!(rel, "../include/sprite.h");
    }

    #[test]
    fn test_include_base_dir() {
        assert_eq!(include_base_dir(Path::new("art/hero.aseprite")), PathBuf::from("art"));
        assert_eq!(include_base_dir(Path::new("hero.aseprite")), PathBuf::from("."));
    }

    #[test]
    fn test_write_output_creates_directories() {
        let dir = TempDir::new().unwrap();
        let paths = OutputPaths::from_base(&dir.path().join("gen/sprites/hero"));
        let code = GeneratedCode { header: "h\n".to_string(), source: "c\n".to_string() };

        write_output(&paths, &code).unwrap();

        assert_eq!(std::fs::read_to_string(&paths.header).unwrap(), "h\n");
        assert_eq!(std::fs::read_to_string(&paths.source).unwrap(), "c\n");
    }
}
