use std::ffi::OsString;
use tracing::{debug, trace};

use crate::arguments::Arguments;
use crate::config::TokenizerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Slash,
    Dash,
    DoubleDash,
}

impl Marker {
    /// Length of the indicator in bytes (all indicators are ASCII).
    fn len(self) -> usize {
        match self {
            Self::DoubleDash => 2,
            Self::Slash | Self::Dash => 1,
        }
    }
}

/// `--` has to be checked before `-`.
fn detect_marker(config: &TokenizerConfig, token: &str) -> Option<Marker> {
    if config.use_slash_options && token.starts_with('/') {
        Some(Marker::Slash)
    } else if config.use_dash_options && token.starts_with("--") {
        Some(Marker::DoubleDash)
    } else if config.use_dash_options && token.starts_with('-') {
        Some(Marker::Dash)
    } else {
        None
    }
}

/// Tokenize `tokens` into options, positionals and pass-through.
///
/// Never fails: any token sequence produces a result. Rules, in order:
/// - a token without an option indicator is a positional and keeps its index
/// - `--name=value` carries its own value (possibly empty)
/// - otherwise `--name` takes the next token as its value unless that token is
///   itself an option
/// - with `enable_pass_through`, an option whose resolved name is empty ends
///   parsing and every token after it is passed through verbatim
/// - with `use_single_dash_flags`, `-abc` registers `a`, `b` and `c`, each
///   with the shared value
pub fn parse<S: AsRef<str>>(config: &TokenizerConfig, tokens: &[S]) -> Arguments {
    let out = tokenize(config, tokens);
    debug!(
        tokens = tokens.len(),
        options = out.options.len(),
        positionals = out.positionals.len(),
        pass_through = out.pass_through.len(),
        "tokenized arguments"
    );
    out
}

/// Tokenize the current process arguments, skipping the program name.
///
/// Arguments that are not valid UTF-8 are converted lossily.
pub fn parse_env(config: &TokenizerConfig) -> Arguments {
    parse_os_args(config, std::env::args_os())
}

/// `args` starts with the program name, as `std::env::args_os` does.
fn parse_os_args<I>(config: &TokenizerConfig, args: I) -> Arguments
where
    I: IntoIterator<Item = OsString>,
{
    let argv: Vec<String> = args
        .into_iter()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    parse(config, &argv)
}

/// Lowercase one char at a time so every input char stays one char.
/// `İ` folds to `i` rather than `i` plus a combining dot.
fn fold_case(name: &str) -> String {
    name.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

fn tokenize<S: AsRef<str>>(config: &TokenizerConfig, tokens: &[S]) -> Arguments {
    let mut out = Arguments::new();
    let mut i = 0usize;

    while i < tokens.len() {
        let start = i;
        let token = tokens[i].as_ref();

        let Some(marker) = detect_marker(config, token) else {
            trace!(index = i, token, "positional");
            out.push_positional(i, token);
            i += 1;
            continue;
        };

        // --key=value, else --key [value]
        let (raw, value) = match token.split_once('=') {
            Some((raw, value)) => (raw, Some(value.to_string())),
            None => {
                let next = tokens
                    .get(i + 1)
                    .map(|t| t.as_ref())
                    .filter(|t| detect_marker(config, t).is_none());
                if next.is_some() {
                    i += 1;
                }
                (token, next.map(str::to_string))
            }
        };
        i += 1;

        let name = if config.trim_indicator {
            &raw[marker.len()..]
        } else {
            raw
        };
        let name = if config.ignore_case {
            fold_case(name)
        } else {
            name.to_string()
        };

        if config.enable_pass_through && name.is_empty() {
            // The tail starts right after the marker token, so a value the
            // marker took from the next token is passed through as well.
            trace!(index = start, token, "pass-through marker");
            out.push_pass_through(&tokens[start + 1..]);
            return out;
        }

        trace!(index = start, token, ?marker, name = %name, ?value, "option");

        if config.use_single_dash_flags && marker == Marker::Dash {
            let mut letters = if config.trim_indicator {
                name.as_str()
            } else {
                &name[1..]
            };
            let negate = config.negate_flags && letters.starts_with('!');
            if negate {
                letters = &letters[1..];
            }
            let prefix = match (config.trim_indicator, negate) {
                (true, false) => "",
                (true, true) => "!",
                (false, false) => "-",
                (false, true) => "-!",
            };
            for c in letters.chars() {
                out.push_option(format!("{prefix}{c}"), value.clone());
            }
        } else {
            out.push_option(name, value);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dash_only() -> TokenizerConfig {
        TokenizerConfig::new().with_slash_options(false)
    }

    #[test]
    fn marker_prefers_double_dash() {
        let config = dash_only();
        assert_eq!(detect_marker(&config, "--foo"), Some(Marker::DoubleDash));
        assert_eq!(detect_marker(&config, "-f"), Some(Marker::Dash));
        assert_eq!(detect_marker(&config, "/f"), None);
        assert_eq!(detect_marker(&config, "foo"), None);
        assert_eq!(detect_marker(&config, ""), None);
    }

    #[test]
    fn marker_respects_style_switches() {
        let slash = TokenizerConfig::new()
            .with_dash_options(false)
            .with_slash_options(true);
        assert_eq!(detect_marker(&slash, "/f"), Some(Marker::Slash));
        assert_eq!(detect_marker(&slash, "--f"), None);
        assert_eq!(detect_marker(&slash, "-f"), None);
    }

    #[test]
    fn attached_value_never_consumes_next_token() {
        let args = parse(&dash_only(), &["--out=a.txt", "b.txt"]);
        assert_eq!(args.get_all("out"), Some(&[Some("a.txt".to_string())][..]));
        assert!(args.matches(&["b.txt"]));
        assert_eq!(args.positionals[0].index, 1);
    }

    #[test]
    fn attached_value_splits_at_first_equals() {
        let args = parse(&dash_only(), &["--define=a=b", "--empty="]);
        assert_eq!(args.get("define"), Some("a=b"));
        assert_eq!(args.get_all("empty"), Some(&[Some(String::new())][..]));
    }

    #[test]
    fn option_is_never_consumed_as_value() {
        let args = parse(&dash_only(), &["--a", "-b", "c"]);
        assert_eq!(args.get_all("a"), Some(&[None][..]));
        assert_eq!(args.get("b"), Some("c"));
        assert!(args.positionals.is_empty());
    }

    #[test]
    fn trailing_option_has_absent_value() {
        let args = parse(&dash_only(), &["run", "--verbose"]);
        assert_eq!(args.get_all("verbose"), Some(&[None][..]));
    }

    #[test]
    fn slash_option_trims_one_character() {
        let config = TokenizerConfig::new().with_slash_options(true);
        let args = parse(&config, &["/Out", "x", "/path/to"]);
        assert_eq!(args.get("out"), Some("x"));
        assert_eq!(args.get_all("path/to"), Some(&[None][..]));
    }

    #[test]
    fn single_dash_flags_share_value() {
        let config = dash_only().with_single_dash_flags(true);
        let args = parse(&config, &["-xv", "file.tar", "--long", "y"]);
        assert_eq!(args.get("x"), Some("file.tar"));
        assert_eq!(args.get("v"), Some("file.tar"));
        assert_eq!(args.get("long"), Some("y"));
        assert!(!args.is_present("xv"));
    }

    #[test]
    fn single_dash_flags_keep_indicator_per_letter() {
        let config = dash_only()
            .with_single_dash_flags(true)
            .with_negate_flags(true)
            .with_trim_indicator(false);
        let args = parse(&config, &["-ab", "-!c"]);
        assert!(args.is_present("-a"));
        assert!(args.is_present("-b"));
        assert!(args.is_present("-!c"));
        assert_eq!(args.options.len(), 3);
    }

    #[test]
    fn bang_is_a_flag_without_negation() {
        let config = dash_only().with_single_dash_flags(true);
        let args = parse(&config, &["-!ab"]);
        assert!(args.is_present("!"));
        assert!(args.is_present("a"));
        assert!(args.is_present("b"));
    }

    #[test]
    fn negate_flags_needs_single_dash_flags() {
        let config = dash_only().with_negate_flags(true);
        let args = parse(&config, &["-!ab"]);
        assert!(args.is_present("!ab"));
        assert_eq!(args.options.len(), 1);
    }

    #[test]
    fn single_dash_flags_need_dash_options() {
        let config = dash_only()
            .with_dash_options(false)
            .with_single_dash_flags(true);
        let args = parse(&config, &["-ab"]);
        assert!(args.options.is_empty());
        assert!(args.matches(&["-ab"]));
    }

    #[test]
    fn single_dash_flags_split_unicode_by_char() {
        let config = dash_only().with_single_dash_flags(true);
        let args = parse(&config, &["-äÖ"]);
        assert!(args.is_present("ä"));
        assert!(args.is_present("ö"));
    }

    #[test]
    fn ignore_case_keeps_one_flag_per_char() {
        let config = dash_only().with_single_dash_flags(true);
        let args = parse(&config, &["-İx"]);
        assert!(args.is_present("i"));
        assert!(args.is_present("x"));
        assert_eq!(args.options.len(), 2);

        let args = parse(&dash_only(), &["--İD", "v"]);
        assert_eq!(args.get("id"), Some("v"));
    }

    #[test]
    fn fold_case_maps_chars_one_to_one() {
        assert_eq!(fold_case("FoO"), "foo");
        assert_eq!(fold_case("İ"), "i");
        assert_eq!(fold_case("ÄÖ"), "äö");
        assert_eq!(fold_case(""), "");
    }

    #[test]
    fn os_args_skip_program_name() {
        let argv = ["argtok", "build", "--out", "x"].map(OsString::from);
        let args = parse_os_args(&dash_only(), argv);
        assert_eq!(args.positionals, vec![crate::Positional::new(0, "build")]);
        assert_eq!(args.get("out"), Some("x"));

        let args = parse_os_args(&dash_only(), [OsString::from("argtok")]);
        assert!(args.is_empty());
    }

    #[test]
    fn empty_name_without_pass_through_is_an_option() {
        let args = parse(&dash_only(), &["--", "x"]);
        assert_eq!(args.get(""), Some("x"));
        assert!(args.pass_through.is_empty());
    }

    #[test]
    fn pass_through_returns_consumed_value_to_tail() {
        let config = dash_only().with_pass_through(true);
        let args = parse(&config, &["a", "--", "x", "--y"]);
        assert!(args.matches(&["a"]));
        assert_eq!(args.pass_through, vec!["x", "--y"]);
        assert!(args.options.is_empty());
    }

    #[test]
    fn pass_through_with_attached_value_drops_it() {
        let config = dash_only().with_pass_through(true);
        let args = parse(&config, &["--=ignored", "tail"]);
        assert_eq!(args.pass_through, vec!["tail"]);
        assert!(args.positionals.is_empty());
    }

    #[test]
    fn pass_through_needs_empty_name_after_trim() {
        let config = dash_only().with_pass_through(true).with_trim_indicator(false);
        let args = parse(&config, &["--", "x"]);
        assert!(args.pass_through.is_empty());
        assert_eq!(args.get("--"), Some("x"));
    }

    #[test]
    fn case_is_kept_when_not_ignored() {
        let config = dash_only().with_ignore_case(false);
        let args = parse(&config, &["--FoO", "Bar"]);
        assert_eq!(args.get("FoO"), Some("Bar"));
        assert!(!args.is_present("foo"));
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let args = parse::<&str>(&dash_only(), &[]);
        assert!(args.is_empty());
    }
}
