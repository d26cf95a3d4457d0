//! Rendering of the generated replacement code.
//!
//! The output shapes follow what webpack's `require.context` produced,
//! so downstream consumers keep seeing the same text modulo identifier
//! names.
use indexmap::IndexMap;

use super::{GeneratedContext, MapEntry, IDENTIFIER_PREFIX};

/// Renders the import statements, map declaration and accessor
/// functions for one occurrence.
pub struct Generator<'a> {
    entries: &'a IndexMap<String, MapEntry>,
    index: usize,
}

impl<'a> Generator<'a> {
    /// Create a new generator over the entries of one occurrence.
    pub fn new(entries: &'a IndexMap<String, MapEntry>, index: usize) -> Self {
        Generator { entries, index }
    }

    /// Render all fragments.
    pub fn create(&self) -> GeneratedContext {
        let function_name =
            format!("{}_function_{}", IDENTIFIER_PREFIX, self.index);
        let map_name = format!("{}_map_{}", IDENTIFIER_PREFIX, self.index);
        GeneratedContext {
            imports: self.imports(),
            map: self.map(&map_name),
            functions: self.functions(&function_name, &map_name),
            function_name,
        }
    }

    /// One star import per entry, in enumeration order, followed by a
    /// blank line.
    fn imports(&self) -> String {
        let mut imports = String::new();
        for entry in self.entries.values() {
            imports.push_str(&format!(
                "import * as {} from \"{}\";\n",
                entry.binding, entry.import_specifier
            ));
        }
        imports.push('\n');
        imports
    }

    /// The key to binding map declaration.
    fn map(&self, map_name: &str) -> String {
        if self.entries.is_empty() {
            return format!("var {} = {{}};\n", map_name);
        }
        let body = self
            .entries
            .iter()
            .map(|(key, entry)| format!("\t\"{}\" : {}", key, entry.binding))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("var {} = {{\n{}\n}};\n", map_name, body)
    }

    /// The accessor, resolve, keys and id definitions.
    ///
    /// The main accessor calls the resolve function and then discards
    /// its value, returning the raw map lookup instead; resolve is
    /// invoked only so an absent key throws. Webpack consumers depend
    /// on this exact shape, so it is reproduced as is.
    fn functions(&self, function_name: &str, map_name: &str) -> String {
        let resolve_name = format!("{}_resolve", function_name);
        let keys_name = format!("{}_keys", function_name);

        let mut functions = format!(
            "function {name}(req) {{\n    var id = {resolve}(req);\n    return {map}[req];\n}}\n",
            name = function_name,
            resolve = resolve_name,
            map = map_name,
        );
        functions.push_str(&format!(
            "function {resolve}(req) {{\n    if (req in {map}) {{\n        return {map}[req];\n    }}\n    var e = new Error(\"Cannot find module '\" + req + \"'\");\n    e.code = 'MODULE_NOT_FOUND';\n    throw e;\n}}\n",
            resolve = resolve_name,
            map = map_name,
        ));
        functions.push_str(&format!(
            "{name}.keys = function {keys}() {{\n    return Object.keys({map});\n}}\n",
            name = function_name,
            keys = keys_name,
            map = map_name,
        ));
        functions.push_str(&format!(
            "{name}.resolve = {resolve}\n",
            name = function_name,
            resolve = resolve_name,
        ));
        // Not the id scheme webpack itself uses.
        functions.push_str(&format!(
            "{name}.id = \"{prefix}_{name}\"\n",
            name = function_name,
            prefix = IDENTIFIER_PREFIX,
        ));
        functions
    }
}
