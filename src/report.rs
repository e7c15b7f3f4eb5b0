//! Report rendering for profdiff output

use crate::chart;
use crate::diff::{ChangeKind, ColumnDiff, ProfileDiff, ResidualOutcome, SchemaChanges, Trend};
use crate::error::Result;
use crate::format::{format_abbreviated, format_bytes, format_percentage};
use crate::profile::TableProfile;
use crate::scan::ScanEntry;

/// Pretty printer for profdiff output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print a single profile summary
    pub fn print_profile_summary(profile: &TableProfile, file_size: Option<u64>, detailed: bool) {
        println!("📸 Profile: {}", profile.name);
        println!("├─ Created: {}", profile.created);
        if let Some(size) = file_size {
            println!("├─ File size: {}", format_bytes(size));
        }
        println!("├─ Rows: {}", format_abbreviated(profile.row_count as f64));
        println!("├─ Columns: {}", profile.column_count());

        if !detailed {
            println!("└─ Schema fingerprint: {}", profile.schema_fingerprint());
            return;
        }

        println!("└─ Column profiles:");
        let last = profile.column_count().saturating_sub(1);
        for (i, column) in profile.columns.values().enumerate() {
            let prefix = if i == last { "   └─" } else { "   ├─" };
            let cont = if i == last { "      " } else { "   │  " };
            println!(
                "{} {} ({}{})",
                prefix,
                column.name,
                column.data_type,
                if column.nullable { ", nullable" } else { "" }
            );
            println!(
                "{}├─ Rows: {}, nulls: {} ({})",
                cont,
                format_abbreviated(column.count as f64),
                format_abbreviated(column.null_count as f64),
                format_percentage(column.null_fraction())
            );
            if let Some(distinct) = column.distinct_count {
                println!("{}├─ Distinct: {}", cont, format_abbreviated(distinct as f64));
            }

            if let Some(histogram) = &column.histogram {
                println!("{}├─ Histogram:", cont);
                for line in chart::render_histogram(histogram) {
                    println!("{}│  {}", cont, line);
                }
            }
            if let Some(top_k) = &column.top_k {
                println!("{}└─ Top values:", cont);
                for line in chart::render_top_k(top_k) {
                    println!("{}   {}", cont, line);
                }
            } else {
                println!("{}└─ (no top-K captured)", cont);
            }
        }
    }

    /// Print diff results
    pub fn print_diff_results(diff: &ProfileDiff, quiet: bool) {
        if quiet {
            // Machine-readable output
            println!("schema_changed={}", diff.schema_changes.has_changes());
            println!("columns_changed={}", diff.columns_changed());
            println!("row_delta={}", diff.row_count.delta);
            return;
        }

        println!(
            "🔍 Profile diff: {} → {}",
            diff.base_name, diff.current_name
        );

        println!(
            "├─ Rows: {} → {} ({}){}",
            diff.row_count.base.map_or(crate::NA.to_string(), format_abbreviated),
            diff.row_count.current.map_or(crate::NA.to_string(), format_abbreviated),
            diff.row_count.delta,
            Self::trend_marker(diff.trend)
        );

        if diff.schema_changes.has_changes() {
            println!("├─ ❌ Schema: CHANGED");
            Self::print_schema_changes(&diff.schema_changes, "│  ");
        } else {
            println!("├─ ✅ Schema: unchanged");
        }

        let changed = diff.columns_changed();
        if changed > 0 {
            println!("└─ ❌ Columns changed: {}", changed);
            let changed_columns: Vec<&ColumnDiff> = diff
                .columns
                .iter()
                .filter(|c| c.kind != ChangeKind::Unchanged)
                .collect();
            let last = changed_columns.len() - 1;
            for (i, column) in changed_columns.iter().enumerate() {
                let prefix = if i == last { "   └─" } else { "   ├─" };
                let cont = if i == last { "      " } else { "   │  " };
                Self::print_column_diff(column, prefix, cont);
            }
        } else {
            println!("└─ ✅ Columns: all unchanged");
        }
    }

    fn trend_marker(trend: Trend) -> &'static str {
        match trend {
            Trend::Added => " 📈",
            Trend::Removed => " 📉",
            Trend::Normal => "",
        }
    }

    fn print_column_diff(column: &ColumnDiff, prefix: &str, cont: &str) {
        match column.kind {
            ChangeKind::Added => {
                println!("{} {} (added)", prefix, column.name);
                return;
            }
            ChangeKind::Removed => {
                println!("{} {} (removed)", prefix, column.name);
                return;
            }
            _ => println!("{} {} (modified)", prefix, column.name),
        }

        let mut lines = Vec::new();
        if column.count.changed() {
            lines.push(format!(
                "Rows: {} → {} ({})",
                column.count.base.map_or(crate::NA.to_string(), format_abbreviated),
                column.count.current.map_or(crate::NA.to_string(), format_abbreviated),
                column.count.delta
            ));
        }
        if column.null_count.changed() {
            lines.push(format!(
                "Nulls: {} → {}",
                column.base_null_fraction.as_deref().unwrap_or(crate::NA),
                column.current_null_fraction.as_deref().unwrap_or(crate::NA)
            ));
        }
        if let Some(distinct) = &column.distinct_count {
            if distinct.changed() {
                lines.push(format!(
                    "Distinct: {} → {} ({})",
                    distinct.base.map_or(crate::NA.to_string(), format_abbreviated),
                    distinct.current.map_or(crate::NA.to_string(), format_abbreviated),
                    distinct.delta
                ));
            }
        }
        match &column.residuals {
            Some(ResidualOutcome::Computed { residuals, .. }) => {
                let shifted = residuals.iter().filter(|&&r| r != 0.0).count();
                if shifted > 0 {
                    lines.push(format!(
                        "Histogram: {}/{} bins shifted",
                        shifted,
                        residuals.len()
                    ));
                }
            }
            Some(ResidualOutcome::BinningChanged) => {
                lines.push("Histogram: binning changed, counts not comparable".to_string());
            }
            None => {}
        }
        let shifted_values = column
            .top_k
            .iter()
            .filter(|e| e.kind != ChangeKind::Unchanged)
            .count();
        if shifted_values > 0 {
            lines.push(format!("Top values: {} shifted", shifted_values));
        }

        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            let marker = if i == last { "└─" } else { "├─" };
            println!("{}{} {}", cont, marker, line);
        }
    }

    /// Print schema changes details
    fn print_schema_changes(schema_changes: &SchemaChanges, prefix: &str) {
        if let Some(order_change) = &schema_changes.column_order {
            println!("{}├─ Column order changed", prefix);
            println!("{}│  ├─ Before: [{}]", prefix, order_change.before.join(", "));
            println!("{}│  └─ After:  [{}]", prefix, order_change.after.join(", "));
        }

        if !schema_changes.columns_added.is_empty() {
            println!("{}├─ Columns added: {}", prefix, schema_changes.columns_added.len());
            for addition in &schema_changes.columns_added {
                println!("{}│  └─ {} ({})", prefix, addition.name, addition.data_type);
            }
        }

        if !schema_changes.columns_removed.is_empty() {
            println!("{}├─ Columns removed: {}", prefix, schema_changes.columns_removed.len());
            for removal in &schema_changes.columns_removed {
                println!("{}│  └─ {} ({})", prefix, removal.name, removal.data_type);
            }
        }

        if !schema_changes.columns_renamed.is_empty() {
            println!("{}├─ Columns renamed: {}", prefix, schema_changes.columns_renamed.len());
            for rename in &schema_changes.columns_renamed {
                println!("{}│  └─ {} → {}", prefix, rename.from, rename.to);
            }
        }

        if !schema_changes.type_changes.is_empty() {
            println!("{}└─ Type changes: {}", prefix, schema_changes.type_changes.len());
            for type_change in &schema_changes.type_changes {
                println!(
                    "{}   └─ {}: {} → {}",
                    prefix, type_change.column, type_change.from, type_change.to
                );
            }
        }
    }

    /// Print residual charts for modified columns where both sides share
    /// a binning. Needs the original profiles for the bin edges.
    pub fn print_residual_charts(
        base: &TableProfile,
        current: &TableProfile,
        diff: &ProfileDiff,
    ) -> Result<()> {
        for column in &diff.columns {
            let shifted = matches!(
                &column.residuals,
                Some(ResidualOutcome::Computed { residuals, .. })
                    if residuals.iter().any(|&r| r != 0.0)
            );
            if !shifted {
                continue;
            }

            let base_hist = base
                .columns
                .get(&column.name)
                .and_then(|c| c.histogram.as_ref());
            let current_hist = current
                .columns
                .get(&column.name)
                .and_then(|c| c.histogram.as_ref());

            if let (Some(b), Some(c)) = (base_hist, current_hist) {
                println!();
                println!("📊 Residuals for '{}' (symlog axis):", column.name);
                for line in chart::render_residuals(b, c)? {
                    println!("   {}", line);
                }
            }
        }
        Ok(())
    }

    /// Print scan results
    pub fn print_scan_results(entries: &[ScanEntry], quiet: bool) {
        let added = entries.iter().filter(|e| e.kind == ChangeKind::Added).count();
        let removed = entries.iter().filter(|e| e.kind == ChangeKind::Removed).count();
        let modified = entries.iter().filter(|e| e.kind == ChangeKind::Modified).count();

        if quiet {
            println!("profiles={}", entries.len());
            println!("added={}", added);
            println!("removed={}", removed);
            println!("modified={}", modified);
            return;
        }

        if entries.is_empty() {
            println!("No profile files found.");
            return;
        }

        println!("📂 Scanned {} profile pairings:", entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let prefix = if i == entries.len() - 1 { "└─" } else { "├─" };
            let marker = match entry.kind {
                ChangeKind::Added => "➕ added",
                ChangeKind::Removed => "➖ removed",
                ChangeKind::Modified => "❌ modified",
                ChangeKind::Unchanged => "✅ unchanged",
            };
            println!("{} {} ({})", prefix, entry.name, marker);
        }

        if added + removed + modified > 0 {
            println!();
            println!("🟡 You may want to run:");
            println!("  profdiff diff <base.json> <current.json>");
        }
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Format diff results as JSON
    pub fn format_diff_results(diff: &ProfileDiff) -> Result<String> {
        Ok(serde_json::to_string_pretty(diff)?)
    }

    /// Format scan results as JSON
    pub fn format_scan_results(entries: &[ScanEntry]) -> Result<String> {
        let json = serde_json::json!({
            "profiles": entries.len(),
            "entries": entries,
        });
        Ok(serde_json::to_string_pretty(&json)?)
    }
}
