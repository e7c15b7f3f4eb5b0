//! Comparison of base and current profiles
//!
//! Classification follows the presentation conventions of the report:
//! added/removed/modified/unchanged for values and columns, and an
//! added/removed/normal trend for count-style pairs. The trend is a
//! styling decision for a single pair, not an ordering law.

use crate::error::Result;
use crate::format::format_percentage;
use crate::profile::{ColumnProfile, Histogram, TableProfile, TopK};
use crate::scale;
use crate::value::{delta_percentage, MetricValue};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Classification of a base/current pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Unchanged,
    Modified,
    Added,
    Removed,
}

/// Classify a comparison pair. A `Missing` value counts as absent.
pub fn classify(base: Option<&MetricValue>, current: Option<&MetricValue>) -> ChangeKind {
    let base = base.filter(|v| !v.is_missing());
    let current = current.filter(|v| !v.is_missing());

    match (base, current) {
        (None, None) => ChangeKind::Unchanged,
        (None, Some(_)) => ChangeKind::Added,
        (Some(_), None) => ChangeKind::Removed,
        (Some(b), Some(c)) => {
            if b == c {
                ChangeKind::Unchanged
            } else {
                ChangeKind::Modified
            }
        }
    }
}

/// Report styling for a count-style pair (e.g. row counts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Added,
    Removed,
    Normal,
}

/// Classify a count pair for report styling: growth (or an absent base)
/// styles as added, shrinkage (or an absent current) as removed.
pub fn classify_counts(base: Option<f64>, current: Option<f64>) -> Trend {
    match (base, current) {
        (None, _) => Trend::Added,
        (_, None) => Trend::Removed,
        (Some(b), Some(c)) => {
            if b < c {
                Trend::Added
            } else if b > c {
                Trend::Removed
            } else {
                Trend::Normal
            }
        }
    }
}

/// Schema-level changes between two profiles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaChanges {
    pub column_order: Option<ColumnOrderChange>,
    pub columns_added: Vec<ColumnAddition>,
    pub columns_removed: Vec<ColumnRemoval>,
    pub columns_renamed: Vec<ColumnRename>,
    pub type_changes: Vec<TypeChange>,
}

/// Column order change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnOrderChange {
    pub before: Vec<String>,
    pub after: Vec<String>,
}

/// Column addition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnAddition {
    pub name: String,
    pub data_type: String,
    pub position: usize,
    pub nullable: bool,
}

/// Column removal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnRemoval {
    pub name: String,
    pub data_type: String,
    pub position: usize,
    pub nullable: bool,
}

/// Column rename
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnRename {
    pub from: String,
    pub to: String,
}

/// Type change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeChange {
    pub column: String,
    pub from: String,
    pub to: String,
}

impl SchemaChanges {
    /// Check if there are any schema changes
    pub fn has_changes(&self) -> bool {
        self.column_order.is_some()
            || !self.columns_added.is_empty()
            || !self.columns_removed.is_empty()
            || !self.columns_renamed.is_empty()
            || !self.type_changes.is_empty()
    }
}

/// A base/current pair for one numeric metric with its formatted delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDelta {
    pub base: Option<f64>,
    pub current: Option<f64>,
    pub delta: String,
}

impl MetricDelta {
    pub fn new(base: Option<f64>, current: Option<f64>) -> Self {
        let delta = match (base, current) {
            (Some(b), Some(c)) => delta_percentage(b, c),
            _ => crate::NA.to_string(),
        };
        Self {
            base,
            current,
            delta,
        }
    }

    pub fn changed(&self) -> bool {
        self.base != self.current
    }
}

/// Outcome of the histogram residual computation for one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ResidualOutcome {
    /// Both sides share a binning; per-bin residuals and their symlog
    /// projection for chart axes.
    Computed {
        residuals: Vec<f64>,
        symlog: Vec<f64>,
    },
    /// The profiler changed the binning between captures; counts are not
    /// comparable bin by bin.
    BinningChanged,
}

impl ResidualOutcome {
    fn compute(base: &Histogram, current: &Histogram) -> Self {
        match scale::residuals(base, current) {
            Ok(residuals) => {
                let symlog = residuals.iter().copied().map(scale::symlog).collect();
                ResidualOutcome::Computed { residuals, symlog }
            }
            Err(_) => ResidualOutcome::BinningChanged,
        }
    }

    fn changed(&self) -> bool {
        match self {
            ResidualOutcome::Computed { residuals, .. } => {
                residuals.iter().any(|&r| r != 0.0)
            }
            ResidualOutcome::BinningChanged => true,
        }
    }
}

/// Shift of a single top-K entry between base and current.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopKEntryDiff {
    pub value: MetricValue,
    pub kind: ChangeKind,
    pub base_share: Option<String>,
    pub current_share: Option<String>,
    /// Positive when the value climbed in rank, negative when it fell.
    pub rank_change: Option<i64>,
}

/// Comparison result for one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDiff {
    pub name: String,
    pub kind: ChangeKind,
    pub count: MetricDelta,
    pub null_count: MetricDelta,
    pub distinct_count: Option<MetricDelta>,
    pub base_null_fraction: Option<String>,
    pub current_null_fraction: Option<String>,
    pub residuals: Option<ResidualOutcome>,
    pub top_k: Vec<TopKEntryDiff>,
}

/// Full comparison of two profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDiff {
    pub base_name: String,
    pub current_name: String,
    pub row_count: MetricDelta,
    pub trend: Trend,
    pub schema_changes: SchemaChanges,
    pub columns: Vec<ColumnDiff>,
}

impl ProfileDiff {
    pub fn has_changes(&self) -> bool {
        self.schema_changes.has_changes()
            || self.row_count.changed()
            || self.columns.iter().any(|c| c.kind != ChangeKind::Unchanged)
    }

    /// Number of columns that are not unchanged.
    pub fn columns_changed(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| c.kind != ChangeKind::Unchanged)
            .count()
    }
}

/// Profile comparison engine
pub struct ProfileDiffer;

impl ProfileDiffer {
    /// Compare two profiles: row counts, schema, and every column.
    pub fn diff(base: &TableProfile, current: &TableProfile) -> Result<ProfileDiff> {
        let schema_changes = Self::detect_schema_changes(base, current);

        let row_count = MetricDelta::new(
            Some(base.row_count as f64),
            Some(current.row_count as f64),
        );
        let trend = classify_counts(
            Some(base.row_count as f64),
            Some(current.row_count as f64),
        );

        let columns = Self::diff_columns(base, current);

        Ok(ProfileDiff {
            base_name: base.name.clone(),
            current_name: current.name.clone(),
            row_count,
            trend,
            schema_changes,
            columns,
        })
    }

    /// Detect schema changes using position-based comparison.
    ///
    /// A matching fingerprint plus identical column order short-circuits
    /// the walk; the fingerprint is order-insensitive so the order check
    /// cannot be skipped.
    pub fn detect_schema_changes(base: &TableProfile, current: &TableProfile) -> SchemaChanges {
        let base_names: Vec<String> = base.columns.keys().cloned().collect();
        let current_names: Vec<String> = current.columns.keys().cloned().collect();

        if base_names == current_names
            && base.schema_fingerprint() == current.schema_fingerprint()
        {
            return SchemaChanges::default();
        }

        let base_cols: Vec<&ColumnProfile> = base.columns.values().collect();
        let current_cols: Vec<&ColumnProfile> = current.columns.values().collect();

        // Detect column order changes (same columns, different order)
        let column_order = if base_names != current_names && base_cols.len() == current_cols.len()
        {
            let mut base_sorted = base_names.clone();
            let mut current_sorted = current_names.clone();
            base_sorted.sort();
            current_sorted.sort();

            if base_sorted == current_sorted {
                Some(ColumnOrderChange {
                    before: base_names.clone(),
                    after: current_names.clone(),
                })
            } else {
                None // Not just reordering, there are additions/removals/renames
            }
        } else {
            None
        };

        let mut columns_added = Vec::new();
        let mut columns_removed = Vec::new();
        let mut columns_renamed = Vec::new();
        let mut type_changes = Vec::new();

        // Handle different column counts (additions/removals at the tail)
        if base_cols.len() != current_cols.len() {
            if current_cols.len() > base_cols.len() {
                for (pos, col) in current_cols.iter().enumerate().skip(base_cols.len()) {
                    columns_added.push(ColumnAddition {
                        name: col.name.clone(),
                        data_type: col.data_type.clone(),
                        position: pos,
                        nullable: col.nullable,
                    });
                }
            } else {
                for (pos, col) in base_cols.iter().enumerate().skip(current_cols.len()) {
                    columns_removed.push(ColumnRemoval {
                        name: col.name.clone(),
                        data_type: col.data_type.clone(),
                        position: pos,
                        nullable: col.nullable,
                    });
                }
            }
        }

        // Compare columns position by position (for common length)
        let min_len = base_cols.len().min(current_cols.len());
        for pos in 0..min_len {
            let base_col = base_cols[pos];
            let current_col = current_cols[pos];

            if base_col.name != current_col.name {
                columns_renamed.push(ColumnRename {
                    from: base_col.name.clone(),
                    to: current_col.name.clone(),
                });
            }

            if base_col.data_type != current_col.data_type {
                type_changes.push(TypeChange {
                    column: current_col.name.clone(), // Use current name in case it was renamed
                    from: base_col.data_type.clone(),
                    to: current_col.data_type.clone(),
                });
            }
        }

        // A pure reorder reports as order change only, not as renames
        let columns_renamed = if column_order.is_some() {
            Vec::new()
        } else {
            columns_renamed
        };

        SchemaChanges {
            column_order,
            columns_added,
            columns_removed,
            columns_renamed,
            type_changes,
        }
    }

    /// Compare columns in parallel, joined by name. Results follow the
    /// current profile's column order; base-only columns trail in base
    /// order.
    fn diff_columns(base: &TableProfile, current: &TableProfile) -> Vec<ColumnDiff> {
        let mut names: Vec<&String> = current.columns.keys().collect();
        for name in base.columns.keys() {
            if !current.columns.contains_key(name) {
                names.push(name);
            }
        }

        names
            .par_iter()
            .map(|name| {
                Self::diff_column(
                    name.as_str(),
                    base.columns.get(name.as_str()),
                    current.columns.get(name.as_str()),
                )
            })
            .collect()
    }

    fn diff_column(
        name: &str,
        base: Option<&ColumnProfile>,
        current: Option<&ColumnProfile>,
    ) -> ColumnDiff {
        let count = MetricDelta::new(
            base.map(|c| c.count as f64),
            current.map(|c| c.count as f64),
        );
        let null_count = MetricDelta::new(
            base.map(|c| c.null_count as f64),
            current.map(|c| c.null_count as f64),
        );

        let distinct_count = match (
            base.and_then(|c| c.distinct_count),
            current.and_then(|c| c.distinct_count),
        ) {
            (None, None) => None,
            (b, c) => Some(MetricDelta::new(
                b.map(|v| v as f64),
                c.map(|v| v as f64),
            )),
        };

        let base_null_fraction = base.map(|c| format_percentage(c.null_fraction()));
        let current_null_fraction = current.map(|c| format_percentage(c.null_fraction()));

        let residuals = match (
            base.and_then(|c| c.histogram.as_ref()),
            current.and_then(|c| c.histogram.as_ref()),
        ) {
            (Some(b), Some(c)) => Some(ResidualOutcome::compute(b, c)),
            _ => None,
        };

        let top_k = Self::compare_top_k(
            base.and_then(|c| c.top_k.as_ref()),
            current.and_then(|c| c.top_k.as_ref()),
        );

        let kind = match (base, current) {
            (None, None) => ChangeKind::Unchanged,
            (None, Some(_)) => ChangeKind::Added,
            (Some(_), None) => ChangeKind::Removed,
            (Some(b), Some(c)) => {
                let type_changed = b.data_type != c.data_type || b.nullable != c.nullable;
                let metrics_changed = count.changed()
                    || null_count.changed()
                    || distinct_count.as_ref().is_some_and(|d| d.changed());
                let distribution_changed = residuals.as_ref().is_some_and(|r| r.changed())
                    || top_k.iter().any(|e| e.kind != ChangeKind::Unchanged);

                if type_changed || metrics_changed || distribution_changed {
                    ChangeKind::Modified
                } else {
                    ChangeKind::Unchanged
                }
            }
        };

        ColumnDiff {
            name: name.to_string(),
            kind,
            count,
            null_count,
            distinct_count,
            base_null_fraction,
            current_null_fraction,
            residuals,
            top_k,
        }
    }

    /// Compare two top-K distributions value by value.
    ///
    /// Entries follow the current ranking; values that dropped out of the
    /// top K trail in base order. Top-K lists are small, so value lookup
    /// is a linear scan (MetricValue contains floats and cannot hash).
    fn compare_top_k(base: Option<&TopK>, current: Option<&TopK>) -> Vec<TopKEntryDiff> {
        if base.is_none() && current.is_none() {
            return Vec::new();
        }

        let empty = TopK {
            values: Vec::new(),
            counts: Vec::new(),
            valids: 0,
        };
        let base = base.unwrap_or(&empty);
        let current = current.unwrap_or(&empty);

        let mut union: Vec<&MetricValue> = current.values.iter().collect();
        for value in &base.values {
            if !current.values.contains(value) {
                union.push(value);
            }
        }

        union
            .into_iter()
            .map(|value| {
                let base_rank = base.values.iter().position(|v| v == value);
                let current_rank = current.values.iter().position(|v| v == value);

                let kind = match (base_rank, current_rank) {
                    (None, None) => ChangeKind::Unchanged,
                    (None, Some(_)) => ChangeKind::Added,
                    (Some(_), None) => ChangeKind::Removed,
                    (Some(b), Some(c)) => {
                        if base.counts[b] == current.counts[c] {
                            ChangeKind::Unchanged
                        } else {
                            ChangeKind::Modified
                        }
                    }
                };

                TopKEntryDiff {
                    value: value.clone(),
                    kind,
                    base_share: base_rank.map(|i| format_percentage(base.share(i))),
                    current_share: current_rank.map(|i| format_percentage(current.share(i))),
                    rank_change: match (base_rank, current_rank) {
                        (Some(b), Some(c)) => Some(b as i64 - c as i64),
                        _ => None,
                    },
                }
            })
            .collect()
    }
}
