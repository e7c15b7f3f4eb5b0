//! Main entry point for profdiff CLI

use clap::Parser;
use profdiff::chart;
use profdiff::cli::Cli;
use profdiff::commands::execute_command;

fn main() {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Parse command line arguments
    let cli = Cli::parse();

    // Set up verbose logging if requested
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    // Configure chart rendering once, up front
    match cli.chart_width {
        Some(width) => chart::init_with(chart::ChartConfig {
            width,
            ..Default::default()
        }),
        None => chart::init(),
    }

    // Execute the command
    if let Err(e) = execute_command(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
