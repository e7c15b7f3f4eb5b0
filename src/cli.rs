//! Command-line interface for profdiff

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "profdiff")]
#[command(about = "A profile-based data comparison reporter")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Maximum chart bar width in characters
    #[arg(long, global = true)]
    pub chart_width: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare a base profile against a current profile
    Diff {
        /// Base (reference) profile path
        base: PathBuf,

        /// Current profile path
        current: PathBuf,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,

        /// Custom output file for diff results
        #[arg(long)]
        output: Option<PathBuf>,

        /// Quiet output (machine-readable)
        #[arg(long)]
        quiet: bool,
    },

    /// Show profile information
    Show {
        /// Profile path to display
        profile: PathBuf,

        /// Show per-column details with distribution charts
        #[arg(long)]
        detailed: bool,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Pair profile files across two directory trees
    Scan {
        /// Directory of base profiles
        base_dir: PathBuf,

        /// Directory of current profiles
        current_dir: PathBuf,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,

        /// Quiet output (machine-readable)
        #[arg(long)]
        quiet: bool,
    },
}

/// Parse output format string
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert!(matches!(OutputFormat::parse("pretty"), Ok(OutputFormat::Pretty)));
        assert!(matches!(OutputFormat::parse("JSON"), Ok(OutputFormat::Json)));
        assert!(OutputFormat::parse("yaml").is_err());
    }
}
