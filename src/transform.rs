//! The transform dispatcher.
//!
//! Receives each served file's full text and identifier, locates
//! `require.context(...)` occurrences, generates the replacement code
//! for each one and splices it all back together.
//!
//! Calls are located with a single non-greedy regular expression rather
//! than an expression parser. Known limitation: a call whose arguments
//! span multiple lines or contain an unbalanced `)` is not recognized.
use anyhow::{bail, Result};
use regex::Regex;
use serde::Serialize;

use crate::arguments::{self, Literal};
use crate::context::{self, ContextRequest, GeneratedContext};
use crate::options::{Options, Pattern};

/// Name printed into the generated-code marker comments.
pub const PLUGIN_NAME: &str = "vite-require-context";

/// Path segment identifying vendored dependency files, which are never
/// transformed.
const NODE_MODULES_PATH: &str = "/node_modules/";

const DEFAULT_USE_RECURSIVE: bool = false;

/// The transform dispatcher.
///
/// Holds the construction-time configuration; every `transform`
/// invocation is otherwise stateless, so one value may serve different
/// files concurrently.
///
/// The host pipeline must apply this transform during the
/// development-serve phase only, never in a production build.
pub struct Transform {
    options: Options,
    directive: Regex,
}

/// One textual directive occurrence.
struct Occurrence<'a> {
    /// Raw argument text between the call parentheses.
    args: &'a str,
    /// Byte range of the whole call in the source, recorded for
    /// position-based substitution.
    start: usize,
    end: usize,
    /// Zero-based position in the match list, namespacing the
    /// generated identifiers.
    index: usize,
}

/// A decoded occurrence, as reported by [`Transform::occurrences`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceReport {
    /// Zero-based position in the match list.
    pub index: usize,
    /// Raw argument text between the call parentheses.
    pub arguments: String,
    /// Decoded directory literal.
    pub directory: String,
    /// Decoded recursion flag.
    pub recursive: bool,
    /// Textual form of the effective match pattern.
    pub pattern: String,
}

impl Transform {
    /// Create a dispatcher with the given configuration.
    pub fn new(options: Options) -> Self {
        Transform {
            options,
            directive: Regex::new(r"require\.context\((.+?)\)")
                .expect("invalid directive pattern"),
        }
    }

    /// Rewrite one file, or signal no change.
    ///
    /// Returns `Ok(None)` when the file is under a vendor directory or
    /// contains no occurrence of the directive. Argument-parse and
    /// filesystem failures propagate; no partial output is produced.
    pub fn transform(&self, code: &str, id: &str) -> Result<Option<String>> {
        if id.contains(NODE_MODULES_PATH) {
            return Ok(None);
        }
        let occurrences = self.find_occurrences(code);
        if occurrences.is_empty() {
            return Ok(None);
        }
        log::debug!(
            "Transform {} occurrence(s) of require.context in {}",
            occurrences.len(),
            id
        );

        let mut added = String::new();
        let mut substitutions = Vec::with_capacity(occurrences.len());

        for occurrence in occurrences.iter() {
            let generated = self.generate(occurrence, id)?;
            added.push_str(&format!(
                "\n// start of generated code of {}, generated by {}\n",
                generated.function_name, PLUGIN_NAME
            ));
            added.push_str(&generated.imports);
            added.push_str(&generated.map);
            added.push_str(&generated.functions);
            added.push_str(&format!(
                "// end of generated code of {}\n",
                generated.function_name
            ));
            substitutions.push((
                occurrence.start,
                occurrence.end,
                generated.function_name,
            ));
        }

        let mut transformed = format!("// generated by {}\n", PLUGIN_NAME);
        transformed.push_str(&added);

        // Substitute by recorded offsets so two occurrences with
        // identical argument text cannot alias.
        let mut cursor = 0;
        for (start, end, function_name) in substitutions {
            transformed.push_str(&code[cursor..start]);
            transformed.push_str(&function_name);
            cursor = end;
        }
        transformed.push_str(&code[cursor..]);

        Ok(Some(transformed))
    }

    /// Decode every occurrence in `code` without generating anything.
    pub fn occurrences(&self, code: &str) -> Result<Vec<OccurrenceReport>> {
        let mut reports = Vec::new();
        for occurrence in self.find_occurrences(code) {
            let (directory, recursive, pattern) = self.decode(&occurrence)?;
            let pattern = pattern
                .as_ref()
                .unwrap_or(&self.options.default_reg_exp)
                .as_str()
                .to_string();
            reports.push(OccurrenceReport {
                index: occurrence.index,
                arguments: occurrence.args.to_string(),
                directory,
                recursive,
                pattern,
            });
        }
        Ok(reports)
    }

    fn find_occurrences<'a>(&self, code: &'a str) -> Vec<Occurrence<'a>> {
        let mut occurrences = Vec::new();
        for (index, captures) in self.directive.captures_iter(code).enumerate()
        {
            if let (Some(call), Some(args)) = (captures.get(0), captures.get(1))
            {
                occurrences.push(Occurrence {
                    args: args.as_str(),
                    start: call.start(),
                    end: call.end(),
                    index,
                });
            }
        }
        occurrences
    }

    fn generate(
        &self,
        occurrence: &Occurrence<'_>,
        id: &str,
    ) -> Result<GeneratedContext> {
        let (directory, recursive, pattern) = self.decode(occurrence)?;
        let request = ContextRequest {
            directory: &directory,
            recursive,
            pattern: pattern.as_ref().unwrap_or(&self.options.default_reg_exp),
            file: id,
            project_base_path: &self.options.project_base_path,
            index: occurrence.index,
        };
        context::generate(&request)
    }

    /// Split the argument text on top-level commas and parse up to
    /// three parameters. Missing or empty trailing parameters are
    /// absent and take the configured defaults.
    fn decode(
        &self,
        occurrence: &Occurrence<'_>,
    ) -> Result<(String, bool, Option<Pattern>)> {
        let params = arguments::split(occurrence.args);

        let directory = match params.get(0).filter(|p| !p.is_empty()) {
            Some(param) => match arguments::parse_literal(param)? {
                Literal::Str(directory) => directory,
                other => bail!(
                    "Directory argument `{}` must be a string literal, got {:?}",
                    param,
                    other
                ),
            },
            None => bail!("require.context() requires a directory argument"),
        };

        let recursive = match params.get(1).filter(|p| !p.is_empty()) {
            Some(param) => match arguments::parse_literal(param)? {
                Literal::Bool(recursive) => recursive,
                other => bail!(
                    "Recursive argument `{}` must be a boolean literal, got {:?}",
                    param,
                    other
                ),
            },
            None => DEFAULT_USE_RECURSIVE,
        };

        let pattern = match params.get(2).filter(|p| !p.is_empty()) {
            Some(param) => match arguments::parse_literal(param)? {
                Literal::Regex(pattern) => Some(pattern),
                Literal::Str(pattern) => Some(Pattern::new(&pattern)?),
                other => bail!(
                    "Pattern argument `{}` must be a regular expression, got {:?}",
                    param,
                    other
                ),
            },
            None => None,
        };

        Ok((directory, recursive, pattern))
    }
}
