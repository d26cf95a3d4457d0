//! Directory addressing for directive calls.
use std::path::{Component, Path, PathBuf};

/// Resolve the raw directory literal to an absolute base path.
///
/// The addressing mode is selected by the first character, matching the
/// webpack convention: `.` is relative to the directory containing the
/// originating file, `/` is relative to the project base path, `@` maps
/// into `<project base>/src/` with the marker stripped, and a bare name
/// is a package directory under `<project base>/node_modules/`.
pub fn resolve_base_path(
    directory: &str,
    file: &str,
    project_base_path: &Path,
) -> PathBuf {
    let joined = match directory.chars().next() {
        Some('.') => {
            let file = Path::new(file);
            let parent = file.parent().unwrap_or_else(|| Path::new(""));
            parent.join(directory)
        }
        Some('/') => project_base_path.join(directory.trim_start_matches('/')),
        Some('@') => project_base_path
            .join("src")
            .join(directory[1..].trim_start_matches('/')),
        _ => project_base_path.join("node_modules").join(directory),
    };
    normalize(&joined)
}

/// Resolve `.` and `..` segments lexically, without touching the
/// filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
