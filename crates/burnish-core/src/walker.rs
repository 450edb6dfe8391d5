//! File enumeration boundary
//!
//! Walks a directory tree and returns candidate files for the task
//! generator, skipping build output, dependency, and VCS directories.
//! Output is sorted so generation is deterministic across runs.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::WalkError;

/// Directory names never descended into
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "out",
    "coverage",
    "target",
    ".next",
    "vendor",
];

/// Enumerate all files under `root`, skipping ignored directories.
pub fn list_files(root: &Path, extra_ignores: &[String]) -> Result<Vec<PathBuf>, WalkError> {
    if !root.exists() {
        return Err(WalkError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(WalkError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    let walk = WalkDir::new(root).into_iter().filter_entry(|entry| {
        // depth 0 is the root itself, never filtered
        entry.depth() == 0
            || !is_ignored_dir(entry.path(), entry.file_type().is_dir(), extra_ignores)
    });

    for entry in walk {
        let entry = entry.map_err(|e| WalkError::Read {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
            source: e,
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!(root = %root.display(), count = files.len(), "enumerated files");
    Ok(files)
}

fn is_ignored_dir(path: &Path, is_dir: bool, extra_ignores: &[String]) -> bool {
    if !is_dir {
        return false;
    }
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    DEFAULT_IGNORED_DIRS.contains(&name) || extra_ignores.iter().any(|i| i == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "").unwrap();
    }

    #[test]
    fn test_list_files_sorted() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b.ts");
        touch(temp.path(), "a.ts");
        touch(temp.path(), "src/c.ts");

        let files = list_files(temp.path(), &[]).unwrap();
        assert_eq!(files.len(), 3);
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_list_files_skips_ignored_dirs() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "index.ts");
        touch(temp.path(), "node_modules/dep/index.js");
        touch(temp.path(), "dist/bundle.js");
        touch(temp.path(), ".git/config");

        let files = list_files(temp.path(), &[]).unwrap();
        assert_eq!(files, vec![temp.path().join("index.ts")]);
    }

    #[test]
    fn test_list_files_extra_ignores() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "index.ts");
        touch(temp.path(), "generated/schema.ts");

        let files = list_files(temp.path(), &["generated".to_string()]).unwrap();
        assert_eq!(files, vec![temp.path().join("index.ts")]);
    }

    #[test]
    fn test_list_files_missing_root() {
        let err = list_files(Path::new("/nonexistent/burnish-root"), &[]).unwrap_err();
        assert!(matches!(err, WalkError::RootNotFound(_)));
    }

    #[test]
    fn test_list_files_root_is_file() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.ts");
        let err = list_files(&temp.path().join("a.ts"), &[]).unwrap_err();
        assert!(matches!(err, WalkError::NotADirectory(_)));
    }

    #[test]
    fn test_empty_tree_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let files = list_files(temp.path(), &[]).unwrap();
        assert!(files.is_empty());
    }
}
