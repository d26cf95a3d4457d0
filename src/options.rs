//! Construction-time configuration for the transform.
use std::convert::TryFrom;
use std::path::PathBuf;

use regex::Regex;
use serde::Deserialize;

/// Pattern applied when a call omits its third parameter: every
/// `./`-prefixed relative path.
const DEFAULT_REGEXP: &str = r"^\./.*$";

/// Configuration applied once when the transform is constructed.
///
/// The JSON form uses the camelCase option names `projectBasePath`
/// and `defaultRegExp`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Base path of the project, used by the `/`, `@` and package
    /// addressing modes. Defaults to the current working directory.
    pub project_base_path: PathBuf,

    /// Pattern applied when a call omits its third parameter.
    pub default_reg_exp: Pattern,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            project_base_path: std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from(".")),
            default_reg_exp: Pattern::default(),
        }
    }
}

/// A compiled match pattern, tested against `./`-prefixed relative
/// paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "String")]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile a pattern from its textual form.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Pattern(Regex::new(pattern)?))
    }

    /// Test a candidate relative path against the pattern.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.0.is_match(candidate)
    }

    /// The textual form of the pattern.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern(Regex::new(DEFAULT_REGEXP).expect("invalid default pattern"))
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Pattern(regex)
    }
}

impl TryFrom<String> for Pattern {
    type Error = regex::Error;

    fn try_from(pattern: String) -> Result<Self, Self::Error> {
        Pattern::new(&pattern)
    }
}
