//! Directory listing for the context generator.
use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;

/// List every file under `base_path`, sorted by file name so the
/// enumeration order is deterministic across platforms. Paths are
/// absolute with separators normalized to `/`.
///
/// A missing or unreadable directory is an error; the caller fails the
/// whole transform invocation.
pub fn list_files(base_path: &Path, recursive: bool) -> Result<Vec<String>> {
    let mut walker = WalkDir::new(base_path).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(normalize_separators(&entry.path().to_string_lossy()));
        }
    }
    Ok(files)
}

/// Normalize path separators to `/`.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}
