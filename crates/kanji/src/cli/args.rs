//! Clap argument definitions for the `kanji` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "kanji")]
#[command(about = "Search kanji records with a small query language")]
pub struct Cli {
    /// Log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output mode flag.
#[derive(Args, Debug, Clone, Default)]
pub struct JsonArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `kanji search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Query to run
    pub query: String,

    /// Data file to search (repeatable); replaces the configured files
    #[arg(short = 'd', long = "data")]
    pub data: Vec<PathBuf>,

    /// Maximum rows to show, at most 50 [default: from config, 50]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: JsonArgs,

    /// Show tokens and the parsed query instead of searching
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for `kanji check`.
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    /// Query to check
    pub query: String,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: JsonArgs,
}

/// Arguments for `kanji suggest`.
#[derive(Args, Debug, Clone)]
pub struct SuggestCommand {
    /// Partial query
    pub query: String,

    /// Cursor position in characters [default: end of query]
    #[arg(short = 'c', long)]
    pub cursor: Option<usize>,
}

/// Arguments for `kanji init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.kanji.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `kanji` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search records and print the matches
    #[command(after_help = "\
QUERY SYNTAX:
  fire              Kanji, Han Viet, English or Vietnamese meaning contains text
  \"fire\"            One of those fields equals the text exactly
  a & b, a AND b    Both must match
  a | b, a OR b     Either matches (AND binds tighter than OR)
  !a, NOT a         Must not match
  a b               Adjacent terms are ANDed
  (expr)            Grouping

FIELD PREFIXES:
  char: kanji:      The character itself
  hv: hanviet:      Han Viet reading
  en: english:      English meaning
  vn: vietnamese:   Vietnamese meaning
  on: onyomi:       On'yomi readings
  kun: kunyomi:     Kun'yomi readings
  com: component:   Components
  jlpt:             JLPT level: jlpt:N3, jlpt:<N3 (easier), jlpt:>=N2
  freq: frequency:  Frequency rank: freq:<500, freq:100-200, freq:42

EXAMPLES:
  kanji search fire
  kanji search 'en:\"fire\"'
  kanji search 'jlpt:N5 & freq:<500'
  kanji search '(on:コウ | kun:い) & jlpt:N5'
  kanji search '!jlpt:N1 vn:nước' -n 10")]
    Search(SearchCommand),

    /// Check a query's syntax without searching
    Check(CheckCommand),

    /// Suggest completions for a partial query
    Suggest(SuggestCommand),

    /// Show how a query is tokenized or parsed
    Inspect {
        /// What to inspect
        #[command(subcommand)]
        what: InspectWhat,
    },

    /// Initialize kanji configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Show configuration files, data files and warnings
    Status,
}

impl Commands {
    /// Whether the command reads `.kanji.toml` files.
    pub fn needs_config(&self) -> bool {
        matches!(self, Self::Search(_) | Self::Config | Self::Status)
    }
}

/// What to inspect with `kanji inspect`.
#[derive(Clone, Subcommand)]
pub enum InspectWhat {
    /// List the tokens of a query
    Tokens {
        /// Query to tokenize
        query: String,

        #[command(flatten)]
        /// Output formatting flags.
        output: JsonArgs,
    },
    /// Show the parsed query tree
    Ast {
        /// Query to parse
        query: String,

        #[command(flatten)]
        /// Output formatting flags.
        output: JsonArgs,
    },
}
