//! Generation of the replacement code for one directive occurrence.
//!
//! Given a decoded call this walks the requested directory, derives the
//! consumer-facing keys and import specifiers, and renders the four text
//! fragments the dispatcher splices into the file: import statements,
//! the key to binding map, the accessor functions and the generated
//! function name.
use std::path::Path;

use anyhow::Result;
use indexmap::IndexMap;

use crate::options::Pattern;

pub mod generator;
pub mod resolve;
pub mod walk;

pub use generator::Generator;

/// Identifier prefix shared by every generated binding, map and
/// function.
pub const IDENTIFIER_PREFIX: &str = "__require_context_for_vite";

/// One directive occurrence, decoded.
#[derive(Debug)]
pub struct ContextRequest<'a> {
    /// The raw directory literal from the call.
    pub directory: &'a str,
    /// Whether subdirectories are listed.
    pub recursive: bool,
    /// Pattern tested against each `./`-prefixed relative path.
    pub pattern: &'a Pattern,
    /// Identifier of the file being transformed.
    pub file: &'a str,
    /// Project base path for the `/`, `@` and package addressing modes.
    pub project_base_path: &'a Path,
    /// Zero-based index of the occurrence within its file.
    pub index: usize,
}

/// A map value: the generated import binding and its import specifier.
#[derive(Debug)]
pub struct MapEntry {
    /// Generated `import * as` binding name.
    pub binding: String,
    /// Project-root-relative path used in the import statement.
    pub import_specifier: String,
}

/// The rendered fragments for one occurrence.
#[derive(Debug)]
pub struct GeneratedContext {
    /// One star import per matched file, in enumeration order.
    pub imports: String,
    /// The key to binding map declaration.
    pub map: String,
    /// The accessor, resolve, keys and id definitions.
    pub functions: String,
    /// Name of the generated accessor function.
    pub function_name: String,
}

/// Walk the requested directory and render the replacement code.
pub fn generate(request: &ContextRequest<'_>) -> Result<GeneratedContext> {
    let base_path = resolve::resolve_base_path(
        request.directory,
        request.file,
        request.project_base_path,
    );
    let files = walk::list_files(&base_path, request.recursive)?;

    let base = walk::normalize_separators(&base_path.to_string_lossy());
    let project = walk::normalize_separators(
        &request.project_base_path.to_string_lossy(),
    );

    let mut entries: IndexMap<String, MapEntry> = IndexMap::new();
    for file in files.iter() {
        let relative = file
            .strip_prefix(&base)
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or_else(|| file.as_str());
        let key = format!("./{}", relative);
        if !request.pattern.is_match(&key) {
            continue;
        }
        let binding =
            format!("{}_{}_{}", IDENTIFIER_PREFIX, request.index, entries.len());
        let import_specifier = file
            .strip_prefix(&project)
            .unwrap_or_else(|| file.as_str())
            .to_string();
        entries.insert(
            key,
            MapEntry {
                binding,
                import_specifier,
            },
        );
    }

    let generator = Generator::new(&entries, request.index);
    Ok(generator.create())
}
