//! Profile documents: the captured state of a dataset at one point in time
//!
//! A profile is produced by an upstream profiler and consumed here as JSON.
//! It records per-column metrics (counts, null counts, distinct counts),
//! an optional bucketed histogram, and an optional top-K value distribution.

use crate::error::{ProfdiffError, Result};
use crate::value::MetricValue;
use blake3::Hasher;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A bucketed distribution: n+1 ordered bin edges paired with n counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bin_edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn new(bin_edges: Vec<f64>, counts: Vec<u64>) -> Result<Self> {
        let histogram = Self { bin_edges, counts };
        histogram.validate()?;
        Ok(histogram)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bin_edges.len() < 2 {
            return Err(ProfdiffError::histogram(format!(
                "expected at least 2 bin edges, got {}",
                self.bin_edges.len()
            )));
        }
        if self.counts.len() != self.bin_edges.len() - 1 {
            return Err(ProfdiffError::histogram(format!(
                "expected {} counts for {} edges, got {}",
                self.bin_edges.len() - 1,
                self.bin_edges.len(),
                self.counts.len()
            )));
        }
        Ok(())
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// The K most frequent values of a column with their occurrence counts.
///
/// `valids` is the total number of non-null observations, so each count's
/// share of valid rows is `count / valids`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopK {
    pub values: Vec<MetricValue>,
    pub counts: Vec<u64>,
    pub valids: u64,
}

impl TopK {
    pub fn new(values: Vec<MetricValue>, counts: Vec<u64>, valids: u64) -> Result<Self> {
        let top_k = Self {
            values,
            counts,
            valids,
        };
        top_k.validate()?;
        Ok(top_k)
    }

    pub fn validate(&self) -> Result<()> {
        if self.values.len() != self.counts.len() {
            return Err(ProfdiffError::top_k(format!(
                "{} values but {} counts",
                self.values.len(),
                self.counts.len()
            )));
        }
        let total: u64 = self.counts.iter().sum();
        if total > self.valids {
            return Err(ProfdiffError::top_k(format!(
                "counts sum to {} but only {} valid observations",
                total, self.valids
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Share of valid observations held by the entry at `index`.
    pub fn share(&self, index: usize) -> f64 {
        if self.valids == 0 {
            return 0.0;
        }
        self.counts.get(index).map_or(0.0, |&c| c as f64 / self.valids as f64)
    }
}

/// One column's captured state within a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    pub count: u64,
    pub null_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Histogram>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<TopK>,
}

impl ColumnProfile {
    /// Fraction of observed rows that were null.
    pub fn null_fraction(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.null_count as f64 / self.count as f64
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(histogram) = &self.histogram {
            histogram.validate()?;
        }
        if let Some(top_k) = &self.top_k {
            top_k.validate()?;
        }
        Ok(())
    }
}

/// A full dataset profile: row count plus an ordered map of column profiles.
///
/// Column order is meaningful and preserved through serialization; schema
/// diffing compares columns position by position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableProfile {
    #[serde(default = "default_format_version")]
    pub format_version: String,
    pub name: String,
    pub created: DateTime<Utc>,
    pub row_count: u64,
    pub columns: IndexMap<String, ColumnProfile>,
}

fn default_format_version() -> String {
    crate::FORMAT_VERSION.to_string()
}

impl TableProfile {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|name| name.as_str()).collect()
    }

    /// Blake3 fingerprint of the schema portion (name, type, nullability).
    ///
    /// Column order does not affect the fingerprint, so a pure reorder
    /// still requires the full schema diff to be noticed.
    pub fn schema_fingerprint(&self) -> String {
        let mut hasher = Hasher::new();

        let mut sorted: Vec<&ColumnProfile> = self.columns.values().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        for column in sorted {
            hasher.update(column.name.as_bytes());
            hasher.update(b"|");
            hasher.update(column.data_type.as_bytes());
            hasher.update(b"|");
            hasher.update(if column.nullable { b"1" } else { b"0" });
            hasher.update(b"||");
        }

        hasher.finalize().to_hex().to_string()
    }

    pub fn validate(&self) -> Result<()> {
        for (key, column) in &self.columns {
            if key != &column.name {
                return Err(ProfdiffError::invalid_input(format!(
                    "column map key '{}' does not match column name '{}'",
                    key, column.name
                )));
            }
            column.validate()?;
        }
        Ok(())
    }
}

/// Loader for profile JSON documents
pub struct ProfileLoader;

impl ProfileLoader {
    /// Load and validate a profile from a JSON file.
    pub fn load(path: &Path) -> Result<TableProfile> {
        if !path.exists() {
            return Err(ProfdiffError::profile_not_found(path));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Parse and validate a profile from JSON text. `origin` is only used
    /// in error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<TableProfile> {
        let profile: TableProfile = serde_json::from_str(content)
            .map_err(|e| ProfdiffError::invalid_profile(origin, e.to_string()))?;

        let major = profile.format_version.split('.').next().unwrap_or("");
        if major != crate::FORMAT_VERSION.split('.').next().unwrap_or("") {
            return Err(ProfdiffError::unsupported_version(
                profile.format_version.clone(),
            ));
        }

        profile
            .validate()
            .map_err(|e| ProfdiffError::invalid_profile(origin, e.to_string()))?;

        Ok(profile)
    }
}
