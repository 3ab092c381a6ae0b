mod config_file;

use anyhow::{Context, Result};
use argtok_parse::{Comparison, TokenizerConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config_file::{load_config, write_default_config};

#[derive(Parser)]
#[command(name = "argtok")]
#[command(version, about = "Inspect how an argument array is tokenized", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize the arguments after `--` and print the result
    Parse(ParseArgs),

    /// Check the positional commands of the arguments after `--`
    Match(MatchArgs),

    /// Write a default argtok.json
    Init(InitArgs),
}

/// Config source and per-switch overrides, applied on top of the config file.
#[derive(Args)]
struct TokenizerArgs {
    /// Path to a JSON tokenizer config (default: ./argtok.json if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Lowercase option names
    #[arg(long, value_name = "BOOL")]
    ignore_case: Option<bool>,

    /// Recognize `-name` and `--name` options
    #[arg(long, value_name = "BOOL")]
    dash_options: Option<bool>,

    /// Recognize `/name` options
    #[arg(long, value_name = "BOOL")]
    slash_options: Option<bool>,

    /// Split `-abc` into one flag per letter
    #[arg(long, value_name = "BOOL")]
    single_dash_flags: Option<bool>,

    /// Expand `-!abc` into negated flags
    #[arg(long, value_name = "BOOL")]
    negate_flags: Option<bool>,

    /// Strip `-`, `--` and `/` from option names
    #[arg(long, value_name = "BOOL")]
    trim_indicator: Option<bool>,

    /// Pass everything after an empty-named option through
    #[arg(long, value_name = "BOOL")]
    pass_through: Option<bool>,
}

impl TokenizerArgs {
    fn resolve(&self) -> Result<TokenizerConfig> {
        let mut config = match load_config(self.config.as_deref())? {
            Some(loaded) => {
                tracing::debug!(path = %loaded.path.display(), "using config file");
                loaded.config
            }
            None => TokenizerConfig::default(),
        };

        let overrides = [
            (self.ignore_case, &mut config.ignore_case),
            (self.dash_options, &mut config.use_dash_options),
            (self.slash_options, &mut config.use_slash_options),
            (self.single_dash_flags, &mut config.use_single_dash_flags),
            (self.negate_flags, &mut config.negate_flags),
            (self.trim_indicator, &mut config.trim_indicator),
            (self.pass_through, &mut config.enable_pass_through),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }

        tracing::debug!(?config, "resolved tokenizer config");
        Ok(config)
    }
}

#[derive(Parser)]
struct ParseArgs {
    #[command(flatten)]
    tokenizer: TokenizerArgs,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// The argument array to tokenize
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

#[derive(Parser)]
struct MatchArgs {
    #[command(flatten)]
    tokenizer: TokenizerArgs,

    /// Expected command word (repeat for each word, in order)
    #[arg(short, long = "word", value_name = "WORD")]
    words: Vec<String>,

    /// How words are compared: ordinal, ignore-ascii-case or ignore-case
    #[arg(long, default_value = "ordinal", value_name = "MODE")]
    comparison: Comparison,

    /// Only require the positionals to start with the words
    #[arg(long)]
    prefix: bool,

    /// The argument array to tokenize
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

#[derive(Parser)]
struct InitArgs {
    /// Directory to write argtok.json into (default: current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Overwrite an existing argtok.json
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse(args) => parse_command(args),
        Commands::Match(args) => match_command(args),
        Commands::Init(args) => init(args),
    }
}

fn parse_command(args: ParseArgs) -> Result<()> {
    tracing::debug!("executing parse command");

    let config = args.tokenizer.resolve()?;
    let parsed = config.parse(&args.tokens);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&parsed).context("failed to serialize arguments")?
        );
    } else {
        println!("{parsed}");
        if !parsed.pass_through.is_empty() {
            println!("-- {}", parsed.pass_through.join(" "));
        }
    }

    Ok(())
}

fn match_command(args: MatchArgs) -> Result<()> {
    tracing::debug!("executing match command");

    let config = args.tokenizer.resolve()?;
    let parsed = config.parse(&args.tokens);

    let matched = if args.prefix {
        parsed.matches_command_at_start(args.comparison, &args.words)
    } else {
        parsed.matches_command(args.comparison, &args.words)
    };

    if matched {
        println!("match");
        Ok(())
    } else {
        println!("no match");
        std::process::exit(1);
    }
}

fn init(args: InitArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    let dest = write_default_config(&dir, args.force)?;
    eprintln!("Created: {}", dest.display());

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
