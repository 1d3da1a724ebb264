//! E2E tests for analytics query files
//!
//! Loads participant and conference queries from disk and checks the
//! resulting reports, including rejected ranges.

use confstats::{AnalyticsQuery, AppConfig, Durations};
use std::path::PathBuf;

const HOUR_MS: u64 = 60 * 60 * 1000;
const MINUTE_MS: u64 = 60 * 1000;

fn write_query(dir: &tempfile::TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("query.json");
    std::fs::write(&path, json).unwrap();
    path
}

/// Test participant sessions aggregated hourly over a day
#[test]
fn test_participant_sessions_hourly() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_query(
        &dir,
        r#"{
            "start_time": "2024-03-01T00:00:00Z",
            "end_time": "2024-03-02T00:00:00Z",
            "interval_ms": 3600000,
            "intervals": [
                {"start_time": "2024-03-01T01:00:00Z", "end_time": "2024-03-01T01:15:00Z"},
                {"start_time": "2024-03-01T01:10:00Z", "end_time": "2024-03-01T02:30:00Z"},
                {"start_time": "2024-02-29T23:30:00Z", "end_time": "2024-03-01T00:30:00Z"}
            ]
        }"#,
    );

    let query = AnalyticsQuery::load(&path).unwrap();
    let report = query.run(&AppConfig::default()).unwrap();

    let Durations::Millis(durations) = &report.durations else {
        panic!("Expected millisecond durations");
    };
    assert_eq!(durations.len(), 24);
    assert_eq!(durations[0], 30 * MINUTE_MS);
    assert_eq!(durations[1], 15 * MINUTE_MS + 50 * MINUTE_MS);
    assert_eq!(durations[2], 30 * MINUTE_MS);
    assert!(durations[3..].iter().all(|&d| d == 0));
    assert_eq!(report.total_ms, 2 * HOUR_MS + 5 * MINUTE_MS);
}

/// Test activity outside the range is ignored
#[test]
fn test_activity_outside_range_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_query(
        &dir,
        r#"{
            "start_time": "2024-03-01T00:00:00Z",
            "end_time": "2024-03-02T00:00:00Z",
            "interval_ms": 3600000,
            "intervals": [
                {"start_time": "2024-02-29T22:00:00Z", "end_time": "2024-02-29T22:10:00Z"},
                {"start_time": "2024-03-02T02:00:00Z", "end_time": "2024-03-02T02:10:00Z"}
            ]
        }"#,
    );

    let report = AnalyticsQuery::load(&path)
        .unwrap()
        .run(&AppConfig::default())
        .unwrap();
    assert_eq!(report.durations, Durations::Millis(vec![0; 24]));
}

/// Test a year of minute buckets is rejected
#[test]
fn test_range_too_large_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_query(
        &dir,
        r#"{
            "start_time": "2024-01-01T00:00:00Z",
            "end_time": "2025-01-01T00:00:00Z",
            "interval_ms": 60000
        }"#,
    );

    let err = AnalyticsQuery::load(&path)
        .unwrap()
        .run(&AppConfig::default())
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Too many buckets"));
}

/// Test inverted range and zero interval are rejected
#[test]
fn test_invalid_query_parameters_rejected() {
    let inverted: AnalyticsQuery = serde_json::from_str(
        r#"{
            "start_time": "2024-03-02T00:00:00Z",
            "end_time": "2024-03-01T00:00:00Z",
            "interval_ms": 3600000
        }"#,
    )
    .unwrap();
    assert!(inverted.run(&AppConfig::default()).is_err());

    let zero_width: AnalyticsQuery = serde_json::from_str(
        r#"{
            "start_time": "2024-03-01T00:00:00Z",
            "end_time": "2024-03-02T00:00:00Z",
            "interval_ms": 0
        }"#,
    )
    .unwrap();
    let err = zero_width.run(&AppConfig::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("Bucket width must be at least 1ms"));
}

/// Test a range narrower than one millisecond is rejected
#[test]
fn test_sub_millisecond_range_rejected() {
    let query: AnalyticsQuery = serde_json::from_str(
        r#"{
            "start_time": "2024-03-01T00:00:00.000200Z",
            "end_time": "2024-03-01T00:00:00.000800Z",
            "interval_ms": 1
        }"#,
    )
    .unwrap();
    let err = query.run(&AppConfig::default()).unwrap_err();
    assert!(
        format!("{:#}", err).contains("must be after range start"),
        "Unexpected error: {:#}",
        err
    );
}

/// Test missing query file reports the path
#[test]
fn test_missing_query_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let err = AnalyticsQuery::load(&path).unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}
