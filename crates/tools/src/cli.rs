//! Command-line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use p100_core::artist::CharacterType;

/// Artist attribution tooling
#[derive(Parser, Debug)]
#[command(name = "p100-tools", version)]
#[command(about = "Inspect and maintain artwork artist attribution")]
pub struct Cli {
    /// Print results as JSON on stdout (logs stay on stderr)
    #[arg(long, global = true)]
    pub json: bool,

    /// Read artists from a JSON roster file instead of the database
    #[arg(long, global = true, value_name = "FILE")]
    pub artists: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Attribution report for one character
    Report {
        /// Character kind: killer or survivor
        #[arg(long)]
        kind: CharacterType,
        /// Character slug id
        #[arg(long)]
        id: String,
    },

    /// Match rate for every character of one kind
    Summary {
        /// Character kind: killer or survivor
        #[arg(long)]
        kind: CharacterType,
    },

    /// Trace identifier extraction and lookup for artwork URLs
    Debug {
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,
    },

    /// Resolve a single artist identifier
    Resolve { identifier: String },

    /// Report artist table size and key collisions
    Check {
        /// How many artist names to list
        #[arg(long, default_value = "20")]
        sample: usize,
    },

    /// Insert artists from a JSON roster file, skipping existing names
    Seed {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Validate and report without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Follow artist change notifications and keep a cache warm
    Watch {
        /// Seconds between cache reads
        #[arg(long, default_value = "30")]
        interval: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_report() {
        let cli = Cli::parse_from(["p100-tools", "report", "--kind", "killers", "--id", "spirit", "--json"]);
        assert!(cli.json);
        assert_matches!(
            cli.command,
            Command::Report { kind: CharacterType::Killer, ref id } if id == "spirit"
        );
    }

    #[test]
    fn debug_requires_a_url() {
        assert!(Cli::try_parse_from(["p100-tools", "debug"]).is_err());
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["p100-tools", "summary", "--kind", "legion"]).is_err());
    }
}
