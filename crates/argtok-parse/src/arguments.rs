use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::compare::Comparison;

/// A positional command together with its index in the original token array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Positional {
    pub index: usize,
    pub text: String,
}

impl Positional {
    /// Create a positional found at `index` in the token array.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// The tokenized form of an argument array.
///
/// Equality is structural: the option maps must hold the same keys (in any
/// order) with identical value lists, and positionals and pass-through must be
/// identical sequences. An absent value (`None`) never equals `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Arguments {
    /// Every option occurrence, grouped by resolved name. Each occurrence
    /// appends one entry; `None` marks an occurrence without a value.
    pub options: IndexMap<String, Vec<Option<String>>>,
    /// Tokens that are not options, in input order.
    pub positionals: Vec<Positional>,
    /// Tokens after a pass-through marker, verbatim.
    pub pass_through: Vec<String>,
}

impl Arguments {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `values` as occurrences of option `name`.
    pub fn with_option<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<V>>,
        V: Into<String>,
    {
        self.options
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(|v| v.map(Into::into)));
        self
    }

    /// Append one value-less occurrence of option `name`.
    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        self.push_option(name.into(), None);
        self
    }

    /// Append a positional found at `index`.
    pub fn with_positional(mut self, index: usize, text: impl Into<String>) -> Self {
        self.positionals.push(Positional::new(index, text));
        self
    }

    /// Append `items` to the pass-through tail.
    pub fn with_pass_through<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pass_through.extend(items.into_iter().map(Into::into));
        self
    }

    /// The last attached value of option `name`, skipping value-less occurrences.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.options
            .get(name)?
            .iter()
            .rev()
            .find_map(|v| v.as_deref())
    }

    /// All occurrences of option `name`.
    pub fn get_all(&self, name: &str) -> Option<&[Option<String>]> {
        self.options.get(name).map(|v| v.as_slice())
    }

    /// Whether option `name` occurred at least once, with or without a value.
    pub fn is_present(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Positional texts in input order.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.positionals.iter().map(|p| p.text.as_str())
    }

    /// Whether no option, positional or pass-through token was recorded.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty() && self.positionals.is_empty() && self.pass_through.is_empty()
    }

    /// Whether the positionals are exactly `command`, compared word by word.
    pub fn matches_command<S: AsRef<str>>(&self, comparison: Comparison, command: &[S]) -> bool {
        command.len() == self.positionals.len() && self.matches_prefix(comparison, command)
    }

    /// Whether the positionals start with `command`. An empty `command` always matches.
    pub fn matches_command_at_start<S: AsRef<str>>(
        &self,
        comparison: Comparison,
        command: &[S],
    ) -> bool {
        command.len() <= self.positionals.len() && self.matches_prefix(comparison, command)
    }

    /// [`matches_command`](Self::matches_command) with the default comparison.
    pub fn matches<S: AsRef<str>>(&self, command: &[S]) -> bool {
        self.matches_command(Comparison::default(), command)
    }

    /// [`matches_command_at_start`](Self::matches_command_at_start) with the default comparison.
    pub fn matches_at_start<S: AsRef<str>>(&self, command: &[S]) -> bool {
        self.matches_command_at_start(Comparison::default(), command)
    }

    fn matches_prefix<S: AsRef<str>>(&self, comparison: Comparison, command: &[S]) -> bool {
        command
            .iter()
            .zip(&self.positionals)
            .all(|(expected, p)| comparison.equals(expected.as_ref(), &p.text))
    }
}

impl Arguments {
    pub(crate) fn push_option(&mut self, name: String, value: Option<String>) {
        self.options.entry(name).or_default().push(value);
    }

    pub(crate) fn push_positional(&mut self, index: usize, text: &str) {
        self.positionals.push(Positional::new(index, text));
    }

    pub(crate) fn push_pass_through<S: AsRef<str>>(&mut self, rest: &[S]) {
        self.pass_through
            .extend(rest.iter().map(|s| s.as_ref().to_string()));
    }
}

/// Trace rendering: `--name value` per occurrence, then the positionals.
///
/// Not reversible. An empty attached value prints like a bare flag, and
/// pass-through tokens are not shown.
impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, values) in &self.options {
            for value in values {
                if !std::mem::take(&mut first) {
                    f.write_str(" ")?;
                }
                match value.as_deref() {
                    Some(v) if !v.is_empty() => write!(f, "--{name} {v}")?,
                    _ => write!(f, "--{name}")?,
                }
            }
        }
        for p in &self.positionals {
            if !std::mem::take(&mut first) {
                f.write_str(" ")?;
            }
            f.write_str(&p.text)?;
        }
        Ok(())
    }
}
