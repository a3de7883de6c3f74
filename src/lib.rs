pub mod commands;
pub mod dataset;
pub mod error;
pub mod inspection;
pub mod simulator;
pub mod stores;

use std::io::{self, IsTerminal};

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, builder::ValueHint};
use clap_complete::Shell;

use camino::Utf8PathBuf;

/// Parse a usize that must be at least 1.
fn parse_at_least_one(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    if n == 0 {
        Err("value must be at least 1".into())
    } else {
        Ok(n)
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the column schema and first rows of CSV files.
    ///
    /// Examples:
    ///   # One file
    ///   lakefeed inspect data/main_metadata.csv
    ///
    ///   # Several files back-to-back
    ///   lakefeed inspect data/players.csv data/teams.csv data/picks_bans.csv
    #[command(verbatim_doc_comment)]
    Inspect(InspectArgs),

    /// Replay a CSV dataset into the lake as timestamped JSON batch files.
    ///
    /// Examples:
    ///   # Defaults: 5-row batches, 50-row limit, 3s between uploads
    ///   lakefeed stream main_metadata.csv --account mylakehouse
    ///
    ///   # Faster cadence into a different directory
    ///   lakefeed stream main_metadata.csv --account mylakehouse \
    ///     --directory landing --delay 1 --row-limit 100
    #[command(verbatim_doc_comment)]
    Stream(StreamArgs),

    /// Generate shell completions for your shell.
    ///
    /// To add completions for your current shell session only:
    ///   zsh:  eval "$(lakefeed completions zsh)"
    ///   bash: eval "$(lakefeed completions bash)"
    ///   fish: lakefeed completions fish | source
    #[command(verbatim_doc_comment)]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

impl Commands {
    pub fn generate_completions(shell: Shell) {
        clap_complete::generate(shell, &mut Cli::command(), "lakefeed", &mut std::io::stdout());
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// CSV files to inspect.
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    pub files: Vec<Utf8PathBuf>,

    /// Rows to read when inferring column types.
    #[arg(long, default_value_t = 5, value_parser = parse_at_least_one)]
    pub sample_rows: usize,

    /// Sample rows to print per file.
    #[arg(long, default_value_t = 2)]
    pub head: usize,

    /// Output format (auto-detects based on TTY if not specified)
    #[arg(long, short = 'f', value_enum, default_value = "auto")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Source CSV dataset to replay.
    #[arg(value_hint = ValueHint::FilePath)]
    pub source: Utf8PathBuf,

    /// Rows per uploaded batch.
    #[arg(long, default_value_t = 5, value_parser = parse_at_least_one)]
    pub batch_size: usize,

    /// Stop after this many rows, even if the dataset is longer.
    #[arg(long, default_value_t = 50)]
    pub row_limit: usize,

    /// Seconds to pause between batch uploads.
    #[arg(long, default_value_t = 3)]
    pub delay: u64,

    /// Storage account name.
    #[arg(long)]
    pub account: String,

    /// Destination container.
    #[arg(long, default_value = "data")]
    pub container: String,

    /// Directory inside the container where batch files land.
    #[arg(long, default_value = "bronze")]
    pub directory: String,

    /// Name prefix for uploaded batch files.
    #[arg(long, default_value = "raw_matches")]
    pub prefix: String,
}

/// Output format for inspect.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Auto-detect: JSON if stdout is not a TTY, otherwise text
    #[default]
    Auto,
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
}

impl OutputFormat {
    pub fn resolves_to_json(&self) -> bool {
        match self {
            OutputFormat::Auto => !io::stdout().is_terminal(),
            OutputFormat::Text => false,
            OutputFormat::Json => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_at_least_one() {
        assert_eq!(parse_at_least_one("5"), Ok(5));
        assert_eq!(parse_at_least_one("1"), Ok(1));
        assert!(parse_at_least_one("0").is_err());
        assert!(parse_at_least_one("batch").is_err());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(
            OutputFormat::from_str("auto", true),
            Ok(OutputFormat::Auto)
        );
        assert_eq!(
            OutputFormat::from_str("text", true),
            Ok(OutputFormat::Text)
        );
        assert_eq!(
            OutputFormat::from_str("json", true),
            Ok(OutputFormat::Json)
        );
    }

    #[test]
    fn test_stream_defaults_match_simulation_constants() {
        let cli = Cli::try_parse_from([
            "lakefeed",
            "stream",
            "main_metadata.csv",
            "--account",
            "mylakehouse",
        ])
        .unwrap();

        let Commands::Stream(args) = cli.command else {
            panic!("expected stream command");
        };
        assert_eq!(args.batch_size, 5);
        assert_eq!(args.row_limit, 50);
        assert_eq!(args.delay, 3);
        assert_eq!(args.container, "data");
        assert_eq!(args.directory, "bronze");
        assert_eq!(args.prefix, "raw_matches");
    }

    #[test]
    fn test_stream_rejects_zero_batch_size() {
        let result = Cli::try_parse_from([
            "lakefeed",
            "stream",
            "main_metadata.csv",
            "--account",
            "mylakehouse",
            "--batch-size",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_inspect_defaults() {
        let cli = Cli::try_parse_from(["lakefeed", "inspect", "teams.csv"]).unwrap();

        let Commands::Inspect(args) = cli.command else {
            panic!("expected inspect command");
        };
        assert_eq!(args.sample_rows, 5);
        assert_eq!(args.head, 2);
        assert_eq!(args.format, OutputFormat::Auto);
    }

    #[test]
    fn test_inspect_requires_a_file() {
        assert!(Cli::try_parse_from(["lakefeed", "inspect"]).is_err());
    }
}
