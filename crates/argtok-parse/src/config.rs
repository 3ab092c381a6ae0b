use serde::{Deserialize, Serialize};

use crate::arguments::Arguments;
use crate::error::Result;
use crate::parser;

/// Behavior switches for one tokenizer pass.
///
/// A config is never mutated by parsing, so one value can be shared by any
/// number of concurrent `parse` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TokenizerConfig {
    /// Lowercase option names before storing them.
    pub ignore_case: bool,
    /// Recognize `-name` and `--name` as options.
    pub use_dash_options: bool,
    /// Recognize `/name` as an option.
    ///
    /// Off by default outside Windows, where a leading `/` is usually a path.
    pub use_slash_options: bool,
    /// Split a single-dash option into one flag per character:
    /// `-abc` becomes `a`, `b` and `c`. Double-dash options are left whole.
    /// Needs `use_dash_options`.
    pub use_single_dash_flags: bool,
    /// Turn `-!abc` into `!a`, `!b` and `!c` instead of `!`, `a`, `b`, `c`.
    /// Needs `use_single_dash_flags`.
    pub negate_flags: bool,
    /// Drop the `-`, `--` or `/` indicator from stored option names.
    /// A negation `!` is kept either way.
    pub trim_indicator: bool,
    /// Stop at the first option whose name is empty (e.g. `--`) and pass
    /// everything after it through untouched.
    pub enable_pass_through: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            ignore_case: true,
            use_dash_options: true,
            use_slash_options: cfg!(windows),
            use_single_dash_flags: false,
            negate_flags: false,
            trim_indicator: true,
            enable_pass_through: false,
        }
    }
}

impl TokenizerConfig {
    /// Create a config with the default switches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set [`ignore_case`](Self::ignore_case).
    pub fn with_ignore_case(mut self, on: bool) -> Self {
        self.ignore_case = on;
        self
    }

    /// Set [`use_dash_options`](Self::use_dash_options).
    pub fn with_dash_options(mut self, on: bool) -> Self {
        self.use_dash_options = on;
        self
    }

    /// Set [`use_slash_options`](Self::use_slash_options).
    pub fn with_slash_options(mut self, on: bool) -> Self {
        self.use_slash_options = on;
        self
    }

    /// Set [`use_single_dash_flags`](Self::use_single_dash_flags).
    pub fn with_single_dash_flags(mut self, on: bool) -> Self {
        self.use_single_dash_flags = on;
        self
    }

    /// Set [`negate_flags`](Self::negate_flags).
    pub fn with_negate_flags(mut self, on: bool) -> Self {
        self.negate_flags = on;
        self
    }

    /// Set [`trim_indicator`](Self::trim_indicator).
    pub fn with_trim_indicator(mut self, on: bool) -> Self {
        self.trim_indicator = on;
        self
    }

    /// Set [`enable_pass_through`](Self::enable_pass_through).
    pub fn with_pass_through(mut self, on: bool) -> Self {
        self.enable_pass_through = on;
        self
    }

    /// Decode a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Tokenize `tokens` with this config.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Arguments {
        parser::parse(self, tokens)
    }
}
