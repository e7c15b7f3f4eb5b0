//! Terminal chart rendering for distributions
//!
//! Rendering is configured once, explicitly, by the hosting application
//! (the CLI does this from `main`). Nothing here configures itself as an
//! import-time side effect; uninitialized use falls back to defaults.

use crate::error::Result;
use crate::format::{format_abbreviated, format_percentage, format_value};
use crate::profile::{Histogram, TopK};
use crate::scale;
use std::sync::OnceLock;

/// Rendering configuration for terminal charts.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Maximum bar width in characters
    pub width: usize,
    /// Glyph for positive bars
    pub bar_char: char,
    /// Glyph for negative residual bars
    pub negative_bar_char: char,
    /// Render bin-edge / value labels next to bars
    pub show_labels: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 40,
            bar_char: '█',
            negative_bar_char: '░',
            show_labels: true,
        }
    }
}

static CONFIG: OnceLock<ChartConfig> = OnceLock::new();

/// Install the default chart configuration. Call once at application
/// startup, before any rendering.
pub fn init() {
    init_with(ChartConfig::default());
}

/// Install a custom chart configuration. Subsequent calls are ignored.
pub fn init_with(config: ChartConfig) {
    if CONFIG.set(config).is_err() {
        log::warn!("Chart configuration already initialized; ignoring reconfiguration");
    }
}

fn config() -> &'static ChartConfig {
    CONFIG.get_or_init(ChartConfig::default)
}

fn bar(glyph: char, len: usize) -> String {
    std::iter::repeat(glyph).take(len).collect()
}

/// Render a histogram as horizontal bars, one line per bin.
pub fn render_histogram(histogram: &Histogram) -> Vec<String> {
    let cfg = config();
    let max = histogram.counts.iter().copied().max().unwrap_or(0).max(1) as f64;

    histogram
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let len = ((count as f64 / max) * cfg.width as f64).round() as usize;
            let bars = bar(cfg.bar_char, len);
            if cfg.show_labels {
                let label = format!(
                    "[{}, {})",
                    format_abbreviated(histogram.bin_edges[i]),
                    format_abbreviated(histogram.bin_edges[i + 1])
                );
                format!("{:>20} {} {}", label, bars, format_abbreviated(count as f64))
            } else {
                bars
            }
        })
        .collect()
}

/// Render per-bin residuals between two histograms on a symlog axis,
/// one line per bin. Negative residuals use the negative bar glyph.
pub fn render_residuals(base: &Histogram, current: &Histogram) -> Result<Vec<String>> {
    let cfg = config();
    let residuals = scale::residuals(base, current)?;
    let scaled: Vec<f64> = residuals.iter().copied().map(scale::symlog).collect();
    let max = scaled.iter().fold(0f64, |m, v| m.max(v.abs())).max(f64::MIN_POSITIVE);

    let lines = residuals
        .iter()
        .zip(&scaled)
        .enumerate()
        .map(|(i, (&residual, &s))| {
            let len = ((s.abs() / max) * cfg.width as f64).round() as usize;
            let bars = if residual < 0.0 {
                bar(cfg.negative_bar_char, len)
            } else {
                bar(cfg.bar_char, len)
            };
            let delta = if residual >= 0.0 {
                format!("+{}", format_abbreviated(residual))
            } else {
                format_abbreviated(residual)
            };
            if cfg.show_labels {
                let label = format!(
                    "[{}, {})",
                    format_abbreviated(base.bin_edges[i]),
                    format_abbreviated(base.bin_edges[i + 1])
                );
                format!("{:>20} {} {}", label, bars, delta)
            } else {
                bars
            }
        })
        .collect();

    Ok(lines)
}

/// Render a top-K distribution as ranked bars with shares of valid rows.
pub fn render_top_k(top_k: &TopK) -> Vec<String> {
    let cfg = config();
    let max = top_k.counts.iter().copied().max().unwrap_or(0).max(1) as f64;

    top_k
        .values
        .iter()
        .zip(&top_k.counts)
        .enumerate()
        .map(|(rank, (value, &count))| {
            let len = ((count as f64 / max) * cfg.width as f64).round() as usize;
            let bars = bar(cfg.bar_char, len);
            if cfg.show_labels {
                format!(
                    "{:>2}. {:<16} {} {}",
                    rank + 1,
                    format_value(value),
                    bars,
                    format_percentage(top_k.share(rank))
                )
            } else {
                bars
            }
        })
        .collect()
}
