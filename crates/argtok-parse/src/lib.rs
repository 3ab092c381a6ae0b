//! Schema-less command-line argument tokenizer.
//!
//! Turns the raw argument array of a process into:
//! - named options, each with the list of values it was given (`None` for a bare flag)
//! - positional commands, keeping their index in the original array
//! - an optional pass-through tail after a `--` style marker
//!
//! Nothing is validated here. Unknown options, missing values and arity are
//! left to the caller, which inspects the returned [`Arguments`].
//!
//! # Example
//!
//! ```
//! use argtok_parse::{Comparison, TokenizerConfig};
//!
//! let config = TokenizerConfig::new()
//!     .with_slash_options(false)
//!     .with_pass_through(true);
//! let args = config.parse(&["build", "--Target", "wasm", "--", "-v"]);
//!
//! assert!(args.matches_command(Comparison::Ordinal, &["build"]));
//! assert_eq!(args.get("target"), Some("wasm"));
//! assert_eq!(args.pass_through, vec!["-v"]);
//! ```

mod arguments;
mod compare;
mod config;
mod error;
mod parser;

pub use arguments::{Arguments, Positional};
pub use compare::Comparison;
pub use config::TokenizerConfig;
pub use error::{Error, Result};
pub use parser::{parse, parse_env};
