//! Filesystem utilities.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Find files matching a glob pattern relative to a base directory.
/// Results are sorted and deduplicated for determinism.
pub fn glob_files(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = base.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let mut results = Vec::new();
    for entry in
        glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", pattern))?
    {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    results.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("glob error: {}", e);
            }
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

/// Lexically normalize a path: resolve `.` and `..` components without
/// touching the filesystem.
pub fn normalize_lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_glob_files() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("config");
        fs::create_dir_all(&config).unwrap();
        fs::write(config.join("probe_int.c"), "int main() {}").unwrap();
        fs::write(config.join("probe_long.c"), "int main() {}").unwrap();
        fs::write(config.join("readme.txt"), "readme").unwrap();

        let files = glob_files(tmp.path(), "config/*.c").unwrap();
        assert_eq!(files.len(), 2);
        // Sorted for determinism.
        assert!(files[0].ends_with("probe_int.c"));
    }

    #[test]
    fn test_glob_files_empty_match() {
        let tmp = TempDir::new().unwrap();
        let files = glob_files(tmp.path(), "config/*.c").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_normalize_lexical() {
        assert_eq!(
            normalize_lexical(Path::new("/src/fastlib/base/../../script/config.py")),
            PathBuf::from("/src/script/config.py")
        );
        assert_eq!(
            normalize_lexical(Path::new("a/./b/../c")),
            PathBuf::from("a/c")
        );
        assert_eq!(normalize_lexical(Path::new("../x")), PathBuf::from("../x"));
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("genfiles/x86/linux/gcc/O2");
        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
