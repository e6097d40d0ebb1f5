//! CLI argument definitions for the table converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use csvtab_cli::convert::{ConvertConfig, ConvertMode, NameCase};
use csvtab_ingest::SourceEncoding;

#[derive(Parser)]
#[command(
    name = "csvtab",
    version,
    about = "Convert three-header-row CSV tables to JSON",
    long_about = "Convert CSV tables whose first rows hold a title, column names and \
                  column kinds into JSON.\n\n\
                  A directory source converts every .csv file inside it. An output path \
                  ending in .json or .cson collects all tables into one file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a table file or a directory of table files to JSON.
    Convert(ConvertArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Table file, or directory containing .csv table files.
    #[arg(value_name = "CSV")]
    pub source: PathBuf,

    /// Output directory, or a single .json/.cson file collecting every table
    /// (default: the source directory).
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Treat sources as UTF-8 instead of GBK.
    #[arg(long = "utf8")]
    pub utf8: bool,

    /// What to write for each table.
    #[arg(long = "mode", value_enum, default_value = "records")]
    pub mode: ModeArg,

    /// How table names are derived from file names.
    #[arg(long = "name-case", value_enum, default_value = "stem")]
    pub name_case: NameCaseArg,

    /// Indent the JSON output.
    #[arg(long = "pretty")]
    pub pretty: bool,
}

impl ConvertArgs {
    pub fn to_config(&self) -> ConvertConfig {
        ConvertConfig {
            source: self.source.clone(),
            output: self.out.clone(),
            encoding: if self.utf8 {
                SourceEncoding::Utf8
            } else {
                SourceEncoding::Gbk
            },
            mode: match self.mode {
                ModeArg::Lines => ConvertMode::Lines,
                ModeArg::Records => ConvertMode::Records,
                ModeArg::Text => ConvertMode::Text,
            },
            name_case: match self.name_case {
                NameCaseArg::Stem => NameCase::Stem,
                NameCaseArg::Pascal => NameCase::Pascal,
            },
            pretty: self.pretty,
        }
    }
}

/// Output payload choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Every tokenized row, header rows included.
    Lines,
    /// One object per data row with coerced values.
    Records,
    /// The decoded file text.
    Text,
}

/// Table name choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum NameCaseArg {
    /// File name without extension.
    Stem,
    /// File stem in PascalCase with underscores removed.
    Pascal,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
