//! Directory scanning: pair profile files across base and current trees
//!
//! Pairing is by path relative to the scanned root, so `daily/orders.json`
//! in the base tree matches `daily/orders.json` in the current tree. Each
//! pairing is classified with the same added/removed/modified/unchanged
//! scheme used for values, with blake3 content fingerprints standing in
//! for the values themselves.

use crate::diff::{classify, ChangeKind};
use crate::error::{ProfdiffError, Result};
use crate::value::MetricValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One paired (or unpaired) profile file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEntry {
    /// Path relative to the scanned root
    pub name: String,
    pub kind: ChangeKind,
    pub base_path: Option<PathBuf>,
    pub current_path: Option<PathBuf>,
}

/// Scanner for trees of profile JSON files
pub struct DirectoryScanner;

impl DirectoryScanner {
    /// Pair `.json` files across two directory trees and classify each
    /// pairing by content fingerprint.
    pub fn scan(base_dir: &Path, current_dir: &Path) -> Result<Vec<ScanEntry>> {
        let base_files = Self::collect_profiles(base_dir)?;
        let current_files = Self::collect_profiles(current_dir)?;

        let names: BTreeSet<&String> = base_files.keys().chain(current_files.keys()).collect();

        let mut entries = Vec::with_capacity(names.len());
        for name in names {
            let base_path = base_files.get(name);
            let current_path = current_files.get(name);

            let base_print = base_path.map(|p| Self::fingerprint(p)).transpose()?;
            let current_print = current_path.map(|p| Self::fingerprint(p)).transpose()?;

            let kind = classify(base_print.as_ref(), current_print.as_ref());

            entries.push(ScanEntry {
                name: name.clone(),
                kind,
                base_path: base_path.cloned(),
                current_path: current_path.cloned(),
            });
        }

        Ok(entries)
    }

    /// Collect `.json` files under `dir`, keyed by root-relative path.
    fn collect_profiles(dir: &Path) -> Result<BTreeMap<String, PathBuf>> {
        if !dir.is_dir() {
            return Err(ProfdiffError::invalid_input(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }

        let mut files = BTreeMap::new();
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let is_json = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if !is_json {
                continue;
            }

            let relative = path
                .strip_prefix(dir)
                .map_err(|_| {
                    ProfdiffError::invalid_input(format!(
                        "Path escapes scanned root: {}",
                        path.display()
                    ))
                })?
                .to_string_lossy()
                .replace('\\', "/");
            files.insert(relative, path.to_path_buf());
        }

        Ok(files)
    }

    fn fingerprint(path: &Path) -> Result<MetricValue> {
        let content = std::fs::read(path)?;
        let hash = blake3::hash(&content).to_hex().to_string();
        Ok(MetricValue::Text(hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_classifies_pairings() {
        let base = TempDir::new().unwrap();
        let current = TempDir::new().unwrap();

        write(base.path(), "same.json", "{\"a\":1}");
        write(current.path(), "same.json", "{\"a\":1}");
        write(base.path(), "changed.json", "{\"a\":1}");
        write(current.path(), "changed.json", "{\"a\":2}");
        write(base.path(), "gone.json", "{}");
        write(current.path(), "fresh.json", "{}");
        // Non-JSON files are ignored
        write(current.path(), "notes.txt", "ignore me");

        let entries = DirectoryScanner::scan(base.path(), current.path()).unwrap();
        let by_name: std::collections::HashMap<_, _> =
            entries.iter().map(|e| (e.name.as_str(), e.kind)).collect();

        assert_eq!(entries.len(), 4);
        assert_eq!(by_name["same.json"], ChangeKind::Unchanged);
        assert_eq!(by_name["changed.json"], ChangeKind::Modified);
        assert_eq!(by_name["gone.json"], ChangeKind::Removed);
        assert_eq!(by_name["fresh.json"], ChangeKind::Added);
    }

    #[test]
    fn test_scan_pairs_nested_paths() {
        let base = TempDir::new().unwrap();
        let current = TempDir::new().unwrap();

        write(base.path(), "daily/orders.json", "{}");
        write(current.path(), "daily/orders.json", "{}");

        let entries = DirectoryScanner::scan(base.path(), current.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "daily/orders.json");
        assert_eq!(entries[0].kind, ChangeKind::Unchanged);
    }

    #[test]
    fn test_scan_rejects_missing_dir() {
        let base = TempDir::new().unwrap();
        let missing = base.path().join("nope");
        assert!(DirectoryScanner::scan(&missing, base.path()).is_err());
    }
}
