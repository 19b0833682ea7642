//! Discovery of play text files in a directory.
//!
//! Both the batch normalizer (raw sources) and the interactive shell
//! (normalized plays) work over a flat directory of `*.txt` files, so a
//! single glob-based scan serves both. Results come back sorted for stable
//! menu numbering and batch order.

use anyhow::{Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Find all `*.txt` files directly under `dir`, sorted by path.
///
/// Unreadable directory entries are skipped with a warning; only a bad
/// pattern (a directory name the glob syntax cannot express) is an error.
pub fn find_text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.txt", dir.display());
    debug!(%pattern, "scanning for play texts");

    let entries = glob(&pattern)
        .with_context(|| format!("invalid scan pattern for {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("skipping unreadable entry: {e}"),
        }
    }

    files.sort();
    debug!(count = files.len(), "discovery complete");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_finds_only_txt_files_sorted() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.txt"), "B").unwrap();
        std::fs::write(dir.path().join("a.txt"), "A").unwrap();
        std::fs::write(dir.path().join("notes.md"), "skip").unwrap();

        let files = find_text_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(find_text_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_does_not_recurse() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/deep.txt"), "deep").unwrap();
        std::fs::write(dir.path().join("top.txt"), "top").unwrap();

        let files = find_text_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("top.txt"));
    }

    #[test]
    fn test_directory_named_txt_is_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("decoy.txt")).unwrap();
        std::fs::write(dir.path().join("real.txt"), "x").unwrap();

        let files = find_text_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("real.txt"));
    }
}
