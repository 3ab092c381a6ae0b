use std::str::FromStr;

use crate::error::Error;

/// How a command word is compared against a positional.
///
/// None of the modes consult the process locale, so a match gives the same
/// answer on every host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Comparison {
    /// Exact, byte-for-byte equality.
    #[default]
    Ordinal,
    /// Equality after folding ASCII letters only.
    IgnoreAsciiCase,
    /// Equality after full Unicode lowercasing of both sides.
    IgnoreCase,
}

impl Comparison {
    /// Compare `a` and `b` under this mode.
    pub fn equals(self, a: &str, b: &str) -> bool {
        match self {
            Self::Ordinal => a == b,
            Self::IgnoreAsciiCase => a.eq_ignore_ascii_case(b),
            Self::IgnoreCase => {
                a == b
                    || a.chars()
                        .flat_map(char::to_lowercase)
                        .eq(b.chars().flat_map(char::to_lowercase))
            }
        }
    }

    /// The name accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ordinal => "ordinal",
            Self::IgnoreAsciiCase => "ignore-ascii-case",
            Self::IgnoreCase => "ignore-case",
        }
    }
}

impl FromStr for Comparison {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordinal" => Ok(Self::Ordinal),
            "ignore-ascii-case" => Ok(Self::IgnoreAsciiCase),
            "ignore-case" => Ok(Self::IgnoreCase),
            _ => Err(Error::UnknownComparison(s.to_string())),
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
