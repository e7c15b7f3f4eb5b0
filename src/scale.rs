//! Symmetric log scale for signed residuals
//!
//! Residuals between two histograms can span several orders of magnitude
//! in both directions. The symlog transform keeps small and large deltas
//! readable on one chart axis: linear near zero, logarithmic at large
//! magnitudes.

use crate::error::{ProfdiffError, Result};
use crate::profile::Histogram;

/// Forward transform: `sign(v) * log10(1 + |v|)`.
pub fn symlog(v: f64) -> f64 {
    v.signum() * (1.0 + v.abs()).log10()
}

/// Inverse transform: `sign(v) * (10^|v| - 1)`.
pub fn symlog_inverse(v: f64) -> f64 {
    v.signum() * (10f64.powf(v.abs()) - 1.0)
}

/// Per-bin residuals `current - base` between two histograms.
///
/// Both histograms must share the same binning; comparing counts across
/// different bin edges is meaningless.
pub fn residuals(base: &Histogram, current: &Histogram) -> Result<Vec<f64>> {
    if base.bin_edges != current.bin_edges {
        return Err(ProfdiffError::binning_mismatch(format!(
            "{} bins vs {} bins",
            base.bin_count(),
            current.bin_count()
        )));
    }

    Ok(base
        .counts
        .iter()
        .zip(&current.counts)
        .map(|(&b, &c)| c as f64 - b as f64)
        .collect())
}

/// Residuals mapped through [`symlog`], ready for a chart axis.
pub fn symlog_residuals(base: &Histogram, current: &Histogram) -> Result<Vec<f64>> {
    Ok(residuals(base, current)?.into_iter().map(symlog).collect())
}
