//! Functional tests for directory scanning

use crate::common::{profile_doc, TestFixture};
use profdiff::cli::Commands;
use profdiff::commands::execute_command;
use profdiff::diff::ChangeKind;
use profdiff::scan::DirectoryScanner;

#[test]
fn test_scan_directories_end_to_end() {
    let base = TestFixture::new().unwrap();
    let current = TestFixture::new().unwrap();

    let doc = profile_doc("orders", 1000);
    base.write_profile("orders.json", &doc).unwrap();
    current.write_profile("orders.json", &doc).unwrap();

    base.write_profile("users.json", &profile_doc("users", 50))
        .unwrap();
    current
        .write_profile("users.json", &profile_doc("users", 75))
        .unwrap();

    current
        .write_profile("events.json", &profile_doc("events", 10))
        .unwrap();

    let entries = DirectoryScanner::scan(base.root(), current.root()).unwrap();
    assert_eq!(entries.len(), 3);

    let by_name: std::collections::HashMap<_, _> =
        entries.iter().map(|e| (e.name.as_str(), e.kind)).collect();
    assert_eq!(by_name["orders.json"], ChangeKind::Unchanged);
    assert_eq!(by_name["users.json"], ChangeKind::Modified);
    assert_eq!(by_name["events.json"], ChangeKind::Added);
}

#[test]
fn test_scan_command_runs() {
    let base = TestFixture::new().unwrap();
    let current = TestFixture::new().unwrap();
    base.write_profile("a.json", &profile_doc("a", 1)).unwrap();
    current.write_profile("a.json", &profile_doc("a", 2)).unwrap();

    execute_command(Commands::Scan {
        base_dir: base.root().to_path_buf(),
        current_dir: current.root().to_path_buf(),
        format: "json".to_string(),
        quiet: false,
    })
    .unwrap();
}

#[test]
fn test_scan_command_rejects_missing_dir() {
    let base = TestFixture::new().unwrap();

    let result = execute_command(Commands::Scan {
        base_dir: base.root().join("does-not-exist"),
        current_dir: base.root().to_path_buf(),
        format: "pretty".to_string(),
        quiet: true,
    });
    assert!(result.is_err());
}
