//! Artifact file writing and output path generation

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write a text artifact (SVG or JSON), creating parent directories.
pub fn write_text(path: &Path, contents: &str) -> Result<(), OutputError> {
    let wrap = |source| OutputError::Io { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(wrap)?;
        }
    }
    std::fs::write(path, contents).map_err(wrap)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}

/// File-name-safe form of a drill name: lowercase words joined by `_`.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_end_matches('_');
    if trimmed.is_empty() {
        "drill".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Generate the output path for an artifact.
///
/// | Scenario | Output |
/// |----------|--------|
/// | Input `dir/pairs.json`, no `-o` | `dir/pairs.{ext}` |
/// | Generated drill "Give and Go", no `-o` | `give_and_go.{ext}` |
/// | `-o out.svg` | `out.svg` |
/// | `-o dir/` | `dir/{input stem or slug}.{ext}` |
pub fn output_path(
    input: Option<&Path>,
    drill_name: &str,
    output_arg: Option<&Path>,
    extension: &str,
) -> PathBuf {
    let stem = input
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| slug(drill_name));

    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(format!("{}.{}", stem, extension))
            } else {
                output.to_path_buf()
            }
        }
        None => match input {
            Some(input) => input.with_extension(extension),
            None => PathBuf::from(format!("{}.{}", stem, extension)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Give and Go (Wall Pass)"), "give_and_go_wall_pass");
        assert_eq!(slug("2v1 Finishing"), "2v1_finishing");
        assert_eq!(slug("  --  "), "drill");
    }

    #[test]
    fn test_output_path_from_input() {
        let path = output_path(Some(Path::new("drills/pairs.json")), "Pairs", None, "svg");
        assert_eq!(path, PathBuf::from("drills/pairs.svg"));
    }

    #[test]
    fn test_output_path_generated() {
        let path = output_path(None, "Crossing and Finishing", None, "json");
        assert_eq!(path, PathBuf::from("crossing_and_finishing.json"));
    }

    #[test]
    fn test_output_path_explicit_file() {
        let path =
            output_path(Some(Path::new("pairs.json")), "Pairs", Some(Path::new("out/d.svg")), "svg");
        assert_eq!(path, PathBuf::from("out/d.svg"));
    }

    #[test]
    fn test_output_path_directory() {
        let path = output_path(None, "Rondo", Some(Path::new("renders/")), "svg");
        assert_eq!(path, PathBuf::from("renders/rondo.svg"));

        let dir = tempfile::tempdir().unwrap();
        let path = output_path(Some(Path::new("a/pairs.json")), "Pairs", Some(dir.path()), "svg");
        assert_eq!(path, dir.path().join("pairs.svg"));
    }

    #[test]
    fn test_write_text_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("drill.svg");
        write_text(&path, "<svg/>\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>\n");
    }

    #[test]
    fn test_write_text_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be overwritten as a file
        let err = write_text(dir.path(), "x").unwrap_err();
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }
}
