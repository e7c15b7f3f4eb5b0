//! Common test utilities and helpers

use profdiff::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture manager for creating temporary profile files
pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Get the root path of the test fixture
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a profile JSON document under the fixture root
    pub fn write_profile(&self, name: &str, doc: &serde_json::Value) -> Result<PathBuf> {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(doc)?)?;
        Ok(path)
    }

    /// Write a file with raw string content
    pub fn write_raw(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }
}

/// Minimal valid profile document with an `id` and a `status` column
pub fn profile_doc(name: &str, row_count: u64) -> serde_json::Value {
    serde_json::json!({
        "format_version": "1.0.0",
        "name": name,
        "created": "2024-03-01T12:00:00Z",
        "row_count": row_count,
        "columns": {
            "id": {
                "name": "id",
                "data_type": "INTEGER",
                "nullable": false,
                "count": row_count,
                "null_count": 0
            },
            "status": {
                "name": "status",
                "data_type": "TEXT",
                "nullable": true,
                "count": row_count,
                "null_count": row_count / 10
            }
        }
    })
}

/// Profile document carrying a histogram and a top-K on an `amount` column
pub fn rich_profile_doc(name: &str, row_count: u64, counts: &[u64]) -> serde_json::Value {
    let edges: Vec<f64> = (0..=counts.len()).map(|i| i as f64 * 10.0).collect();
    let total: u64 = counts.iter().sum();
    serde_json::json!({
        "format_version": "1.0.0",
        "name": name,
        "created": "2024-03-01T12:00:00Z",
        "row_count": row_count,
        "columns": {
            "amount": {
                "name": "amount",
                "data_type": "DOUBLE",
                "nullable": true,
                "count": row_count,
                "null_count": 0,
                "distinct_count": 42,
                "histogram": {
                    "bin_edges": edges,
                    "counts": counts
                },
                "top_k": {
                    "values": [9.99, 19.99],
                    "counts": [total / 2, total / 4],
                    "valids": total
                }
            }
        }
    })
}
