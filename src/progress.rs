//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for profdiff operations
#[derive(Debug)]
pub struct ProgressReporter {
    pub load_pb: Option<ProgressBar>,
    pub columns_pb: Option<ProgressBar>,
    estimated_columns: u64,
    show_progress: bool,
}

impl ProgressReporter {
    /// Create progress reporter for a diff run
    pub fn new_for_diff() -> Self {
        let load_pb = create_spinner("Loading profiles...");

        Self {
            load_pb: Some(load_pb),
            columns_pb: None,
            estimated_columns: 0,
            show_progress: true,
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            load_pb: None,
            columns_pb: None,
            estimated_columns: 0,
            show_progress: false,
        }
    }

    /// Update estimated columns once the profiles are loaded
    pub fn update_estimated_columns(&mut self, new_count: u64) {
        self.estimated_columns = new_count;
        if let Some(pb) = &self.columns_pb {
            pb.set_length(new_count);
        }
    }

    /// Lazily create columns progress bar when needed
    fn ensure_columns_pb(&mut self) {
        if self.show_progress && self.columns_pb.is_none() {
            self.columns_pb = Some(create_progress_bar(
                self.estimated_columns,
                "Comparing columns",
            ));
        }
    }

    /// Finish profile loading and prepare for column comparison
    pub fn finish_load(&mut self, message: &str) {
        if let Some(pb) = self.load_pb.take() {
            pb.finish_with_message(message.to_string());
        }
        self.ensure_columns_pb();
    }

    /// Update column comparison progress
    pub fn update_columns(&mut self, processed: u64) {
        self.ensure_columns_pb();
        if let Some(pb) = &self.columns_pb {
            pb.set_position(processed);
        }
    }

    /// Finish column comparison
    pub fn finish_columns(&mut self, message: &str) {
        if let Some(pb) = self.columns_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }

    /// Finish all progress bars
    pub fn finish_all(&mut self, message: &str) {
        self.finish_load(message);
        self.finish_columns(message);
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // Ensure all progress bars are cleaned up silently
        if let Some(pb) = self.load_pb.take() {
            pb.finish_and_clear();
        }
        if let Some(pb) = self.columns_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a spinner progress bar
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .expect("Invalid progress template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a progress bar with known total
fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4} {msg}")
            .expect("Invalid progress template")
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
