//! CLI argument parsing and command definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use titlematch::SearchOrder;

/// Typo-tolerant fuzzy search over post titles
#[derive(Debug, Parser)]
#[command(
    name = "titlematch",
    author,
    version,
    about = "Typo-tolerant fuzzy search over post titles",
    propagate_version = true,
    after_help = "Use 'titlematch <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,
    #[command(subcommand)]
    pub command: Command,
}

/// Global options available to all commands
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOpts {
    /// Output format (json, yaml, table, auto)
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        global = true,
        conflicts_with = "json"
    )]
    pub output_format: Option<OutputFormat>,

    /// Output as JSON (shorthand for -o json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Override config file path
    #[arg(long, value_name = "PATH", env = "TITLEMATCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Reduce output to only errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase logging verbosity (stackable: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Enable debug logging (equivalent to -vv)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable trace logging
    #[arg(long, global = true)]
    pub trace: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Hide table headers
    #[arg(long, global = true)]
    pub no_headers: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[non_exhaustive]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
    Auto,
}

/// Result ordering as exposed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Best score first, duplicates collapsed
    Ranked,
    /// Keep input order and duplicates
    Input,
}

impl From<OrderArg> for SearchOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Ranked => SearchOrder::Ranked,
            OrderArg::Input => SearchOrder::Input,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search candidate titles for a query
    Search(SearchCommand),

    /// Show the similarity score between two strings
    Similarity {
        source: String,
        target: String,
    },

    /// Inspect and manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Text to search for (an empty string lists every title)
    pub query: String,

    /// Candidate titles (read from --from or stdin when omitted)
    #[arg(value_name = "TITLE")]
    pub titles: Vec<String>,

    /// Read titles from a file, or '-' for stdin (one per line or a JSON array)
    #[arg(long, value_name = "PATH", conflicts_with = "titles")]
    pub from: Option<PathBuf>,

    /// Minimum similarity score to keep a title
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Result ordering
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Titles per page
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Mark matched query characters inside each title
    #[arg(long)]
    pub highlight: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show effective configuration
    Show,

    /// Print config file path
    Path,

    /// Get a specific configuration value
    Get {
        /// Configuration key (dot-separated path)
        key: Option<String>,
    },

    /// Reset configuration to defaults
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "titlematch",
            "search",
            "rust",
            "Learning Rust",
            "Cooking",
            "-t",
            "0.8",
            "--order",
            "input",
        ])
        .unwrap();

        match cli.command {
            Command::Search(cmd) => {
                assert_eq!(cmd.query, "rust");
                assert_eq!(cmd.titles, vec!["Learning Rust", "Cooking"]);
                assert_eq!(cmd.threshold, Some(0.8));
                assert_eq!(cmd.order, Some(OrderArg::Input));
                assert_eq!(cmd.page, 1);
            }
            _ => panic!("Expected search command"),
        }
    }

    #[test]
    fn test_from_conflicts_with_titles() {
        let result = Cli::try_parse_from([
            "titlematch",
            "search",
            "rust",
            "Learning Rust",
            "--from",
            "titles.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["titlematch", "similarity", "a", "b", "--json", "-vv"])
            .unwrap();
        assert!(cli.global.json);
        assert_eq!(cli.global.verbose, 2);
    }
}
