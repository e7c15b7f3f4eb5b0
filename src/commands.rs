//! Command implementations for profdiff CLI

use crate::cli::{Commands, OutputFormat};
use crate::diff::ProfileDiffer;
use crate::error::{ProfdiffError, Result};
use crate::profile::ProfileLoader;
use crate::progress::ProgressReporter;
use crate::report::{JsonFormatter, PrettyPrinter};
use crate::scan::DirectoryScanner;
use std::path::Path;

/// Execute a command
pub fn execute_command(command: Commands) -> Result<()> {
    match command {
        Commands::Diff {
            base,
            current,
            format,
            output,
            quiet,
        } => diff_command(&base, &current, &format, output.as_deref(), quiet),
        Commands::Show {
            profile,
            detailed,
            format,
        } => show_command(&profile, detailed, &format),
        Commands::Scan {
            base_dir,
            current_dir,
            format,
            quiet,
        } => scan_command(&base_dir, &current_dir, &format, quiet),
    }
}

/// Compare two profile files
fn diff_command(
    base_path: &Path,
    current_path: &Path,
    format: &str,
    output_path: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let output_format = OutputFormat::parse(format).map_err(ProfdiffError::invalid_input)?;

    let mut progress = if quiet {
        ProgressReporter::new_minimal()
    } else {
        ProgressReporter::new_for_diff()
    };

    let base = ProfileLoader::load(base_path)?;
    let current = ProfileLoader::load(current_path)?;
    log::debug!(
        "Loaded profiles '{}' ({} columns) and '{}' ({} columns)",
        base.name,
        base.column_count(),
        current.name,
        current.column_count()
    );

    progress.update_estimated_columns(current.column_count() as u64);
    progress.finish_load(&format!("Loaded '{}' and '{}'", base.name, current.name));

    let diff = ProfileDiffer::diff(&base, &current)?;
    progress.update_columns(diff.columns.len() as u64);
    progress.finish_columns(&format!("Compared {} columns", diff.columns.len()));

    match output_format {
        OutputFormat::Pretty => {
            PrettyPrinter::print_diff_results(&diff, quiet);
            if !quiet {
                PrettyPrinter::print_residual_charts(&base, &current, &diff)?;
            }
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::format_diff_results(&diff)?);
        }
    }

    if let Some(output_path) = output_path {
        let content = JsonFormatter::format_diff_results(&diff)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output_path, content)?;
        if !quiet {
            println!();
            println!("💾 Diff saved to: {}", output_path.display());
        }
    }

    Ok(())
}

/// Show profile information
fn show_command(profile_path: &Path, detailed: bool, format: &str) -> Result<()> {
    let output_format = OutputFormat::parse(format).map_err(ProfdiffError::invalid_input)?;

    let profile = ProfileLoader::load(profile_path)?;
    let file_size = std::fs::metadata(profile_path).map(|m| m.len()).ok();

    match output_format {
        OutputFormat::Pretty => {
            PrettyPrinter::print_profile_summary(&profile, file_size, detailed);
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::format(&profile)?);
        }
    }

    Ok(())
}

/// Pair profile files across two directory trees
fn scan_command(base_dir: &Path, current_dir: &Path, format: &str, quiet: bool) -> Result<()> {
    let output_format = OutputFormat::parse(format).map_err(ProfdiffError::invalid_input)?;

    let entries = DirectoryScanner::scan(base_dir, current_dir)?;
    log::debug!(
        "Scanned {} and {}: {} pairings",
        base_dir.display(),
        current_dir.display(),
        entries.len()
    );

    match output_format {
        OutputFormat::Pretty => {
            PrettyPrinter::print_scan_results(&entries, quiet);
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::format_scan_results(&entries)?);
        }
    }

    Ok(())
}
