use std::path::{Path, PathBuf};

use anyhow::Result;

/// Absolute path of the fixture project tree.
pub fn project_base() -> Result<PathBuf> {
    Ok(PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/project")
        .canonicalize()?)
}

/// Read a fixture file, normalizing line endings on Windows checkouts.
pub fn read_fixture<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut content = std::fs::read_to_string(path)?;
    if cfg!(target_os = "windows") {
        content = content.replace("\r\n", "\n");
    }
    Ok(content)
}
