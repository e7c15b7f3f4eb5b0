//! Functional tests for the end-to-end diff flow

use crate::common::{profile_doc, rich_profile_doc, TestFixture};
use profdiff::cli::Commands;
use profdiff::commands::execute_command;
use profdiff::diff::{ChangeKind, ProfileDiffer, ResidualOutcome, Trend};
use profdiff::profile::ProfileLoader;

#[test]
fn test_diff_loaded_profiles() {
    let fixture = TestFixture::new().unwrap();

    let base_path = fixture
        .write_profile("base.json", &profile_doc("orders", 1000))
        .unwrap();
    let mut current_doc = profile_doc("orders", 1500);
    current_doc["columns"]["status"]["null_count"] = serde_json::json!(300);
    let current_path = fixture.write_profile("current.json", &current_doc).unwrap();

    let base = ProfileLoader::load(&base_path).unwrap();
    let current = ProfileLoader::load(&current_path).unwrap();
    let diff = ProfileDiffer::diff(&base, &current).unwrap();

    assert!(diff.has_changes());
    assert_eq!(diff.row_count.delta, "+50.0%");
    assert_eq!(diff.trend, Trend::Added);
    assert!(!diff.schema_changes.has_changes());

    let status = diff.columns.iter().find(|c| c.name == "status").unwrap();
    assert_eq!(status.kind, ChangeKind::Modified);
    // 100/1000 nulls before, 300/1500 after
    assert_eq!(status.base_null_fraction.as_deref(), Some("10.0%"));
    assert_eq!(status.current_null_fraction.as_deref(), Some("20.0%"));
}

#[test]
fn test_diff_identical_profiles() {
    let fixture = TestFixture::new().unwrap();
    let doc = profile_doc("orders", 1000);
    let base_path = fixture.write_profile("base.json", &doc).unwrap();
    let current_path = fixture.write_profile("current.json", &doc).unwrap();

    let base = ProfileLoader::load(&base_path).unwrap();
    let current = ProfileLoader::load(&current_path).unwrap();
    let diff = ProfileDiffer::diff(&base, &current).unwrap();

    assert!(!diff.has_changes());
    assert_eq!(diff.row_count.delta, "0");
    assert_eq!(diff.trend, Trend::Normal);
    assert_eq!(diff.columns_changed(), 0);
}

#[test]
fn test_diff_histogram_residuals_end_to_end() {
    let fixture = TestFixture::new().unwrap();
    let base_path = fixture
        .write_profile(
            "base.json",
            &rich_profile_doc("metrics", 150, &[10, 20, 30, 40, 50]),
        )
        .unwrap();
    let current_path = fixture
        .write_profile(
            "current.json",
            &rich_profile_doc("metrics", 175, &[15, 25, 35, 45, 55]),
        )
        .unwrap();

    let base = ProfileLoader::load(&base_path).unwrap();
    let current = ProfileLoader::load(&current_path).unwrap();
    let diff = ProfileDiffer::diff(&base, &current).unwrap();

    let amount = &diff.columns[0];
    match amount.residuals.as_ref().unwrap() {
        ResidualOutcome::Computed { residuals, symlog } => {
            assert_eq!(residuals, &vec![5.0, 5.0, 5.0, 5.0, 5.0]);
            let expected = 6f64.log10();
            for v in symlog {
                assert!((v - expected).abs() < 1e-12);
            }
        }
        other => panic!("unexpected residual outcome: {:?}", other),
    }
}

#[test]
fn test_diff_command_writes_output_file() {
    let fixture = TestFixture::new().unwrap();
    let base_path = fixture
        .write_profile("base.json", &profile_doc("orders", 1000))
        .unwrap();
    let current_path = fixture
        .write_profile("current.json", &profile_doc("orders", 1200))
        .unwrap();
    let output_path = fixture.root().join("reports").join("diff.json");

    execute_command(Commands::Diff {
        base: base_path,
        current: current_path,
        format: "pretty".to_string(),
        output: Some(output_path.clone()),
        quiet: true,
    })
    .unwrap();

    let content = std::fs::read_to_string(&output_path).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(saved["row_count"]["delta"], "+20.0%");
    assert_eq!(saved["trend"], "added");
}

#[test]
fn test_diff_command_missing_profile() {
    let fixture = TestFixture::new().unwrap();
    let base_path = fixture
        .write_profile("base.json", &profile_doc("orders", 1000))
        .unwrap();

    let result = execute_command(Commands::Diff {
        base: base_path,
        current: fixture.root().join("missing.json"),
        format: "pretty".to_string(),
        output: None,
        quiet: true,
    });
    assert!(result.is_err());
}

#[test]
fn test_diff_command_rejects_bad_format() {
    let fixture = TestFixture::new().unwrap();
    let base_path = fixture
        .write_profile("base.json", &profile_doc("orders", 1000))
        .unwrap();

    let result = execute_command(Commands::Diff {
        base: base_path.clone(),
        current: base_path,
        format: "xml".to_string(),
        output: None,
        quiet: true,
    });
    assert!(result.is_err());
}

#[test]
fn test_show_command_json_round_trip() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .write_profile("orders.json", &rich_profile_doc("orders", 100, &[60, 40]))
        .unwrap();

    execute_command(Commands::Show {
        profile: path,
        detailed: true,
        format: "json".to_string(),
    })
    .unwrap();
}

#[test]
fn test_invalid_profile_is_rejected() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.write_raw("broken.json", "{not json at all").unwrap();
    assert!(ProfileLoader::load(&path).is_err());
}
