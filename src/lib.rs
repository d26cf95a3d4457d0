//! Rewrites `require.context()` calls into static imports for the
//! Vite development server.
//!
//! Webpack projects lean on `require.context(directory, recursive?,
//! pattern?)` to bulk-import every file matching a pattern; Vite has no
//! equivalent primitive. This crate scans a served file for occurrences
//! of the call, expands each one into static `import * as` statements
//! plus a key lookup map, and replaces the call expression with a
//! generated accessor preserving the webpack contract: `fn(key)`,
//! `fn.keys()`, `fn.resolve(key)` and `fn.id`.
//!
//! The transform is meant for the development-serve phase only; a
//! production build should resolve the calls with a bundler-native
//! mechanism instead.
use std::path::PathBuf;

use anyhow::{bail, Result};

pub mod arguments;
pub mod context;
pub mod options;
pub mod transform;

pub use options::{Options, Pattern};
pub use transform::Transform;

/// Transform a module file on disc and print or write the result.
///
/// Files without any occurrence of the directive are passed through
/// unchanged.
pub fn transform_file(
    module: PathBuf,
    options: Options,
    output: Option<PathBuf>,
) -> Result<()> {
    if !module.is_file() {
        bail!("Module {:?} does not exist", module);
    }
    let code = std::fs::read_to_string(&module)?;
    let id = module.canonicalize()?.to_string_lossy().replace('\\', "/");
    let transform = Transform::new(options);
    let result = transform.transform(&code, &id)?.unwrap_or(code);
    match output {
        Some(path) => std::fs::write(path, result)?,
        None => print!("{}", result),
    }
    Ok(())
}

/// Print the directive occurrences of a module file as JSON.
pub fn inspect(module: PathBuf, options: Options) -> Result<()> {
    if !module.is_file() {
        bail!("Module {:?} does not exist", module);
    }
    let code = std::fs::read_to_string(&module)?;
    let transform = Transform::new(options);
    let reports = transform.occurrences(&code)?;
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
