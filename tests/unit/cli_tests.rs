//! Unit tests for CLI argument parsing and validation

use clap::Parser;
use profdiff::cli::{Cli, Commands, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_cli_diff_command() {
    let cli = Cli::try_parse_from(["profdiff", "diff", "base.json", "current.json"]).unwrap();
    match cli.command {
        Commands::Diff {
            base,
            current,
            format,
            output,
            quiet,
        } => {
            assert_eq!(base, PathBuf::from("base.json"));
            assert_eq!(current, PathBuf::from("current.json"));
            assert_eq!(format, "pretty");
            assert!(output.is_none());
            assert!(!quiet);
        }
        _ => panic!("Expected Diff command"),
    }
}

#[test]
fn test_cli_diff_command_with_options() {
    let cli = Cli::try_parse_from([
        "profdiff",
        "diff",
        "base.json",
        "current.json",
        "--format",
        "json",
        "--output",
        "result.json",
        "--quiet",
    ])
    .unwrap();

    match cli.command {
        Commands::Diff {
            format,
            output,
            quiet,
            ..
        } => {
            assert_eq!(format, "json");
            assert_eq!(output, Some(PathBuf::from("result.json")));
            assert!(quiet);
        }
        _ => panic!("Expected Diff command"),
    }
}

#[test]
fn test_cli_show_command() {
    let cli = Cli::try_parse_from(["profdiff", "show", "orders.json", "--detailed"]).unwrap();
    match cli.command {
        Commands::Show {
            profile,
            detailed,
            format,
        } => {
            assert_eq!(profile, PathBuf::from("orders.json"));
            assert!(detailed);
            assert_eq!(format, "pretty");
        }
        _ => panic!("Expected Show command"),
    }
}

#[test]
fn test_cli_scan_command() {
    let cli = Cli::try_parse_from(["profdiff", "scan", "base/", "current/"]).unwrap();
    match cli.command {
        Commands::Scan {
            base_dir,
            current_dir,
            format,
            quiet,
        } => {
            assert_eq!(base_dir, PathBuf::from("base/"));
            assert_eq!(current_dir, PathBuf::from("current/"));
            assert_eq!(format, "pretty");
            assert!(!quiet);
        }
        _ => panic!("Expected Scan command"),
    }
}

#[test]
fn test_cli_global_flags() {
    let cli = Cli::try_parse_from([
        "profdiff",
        "show",
        "orders.json",
        "--verbose",
        "--chart-width",
        "60",
    ])
    .unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.chart_width, Some(60));
}

#[test]
fn test_cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["profdiff"]).is_err());
}

#[test]
fn test_output_format_parse() {
    assert!(matches!(OutputFormat::parse("pretty"), Ok(OutputFormat::Pretty)));
    assert!(matches!(OutputFormat::parse("json"), Ok(OutputFormat::Json)));
    assert!(OutputFormat::parse("table").is_err());
}
