// LogGrid - tests/e2e_table.rs
//
// End-to-end tests for the parse -> command -> view pipeline.
//
// These tests exercise a real log file on disk, the real extraction
// rules, real table state commands, and real CSV/JSON export -- no mocks,
// no stubs. This is the full path from raw log text to the derived view
// a rendering surface would consume.

use loggrid::app::state::TableState;
use loggrid::core::export::{export_csv, export_json};
use loggrid::core::model::{SortDirection, Value};
use loggrid::core::parser::{parse_content, ParseConfig};
use loggrid::platform::config::load_config;
use loggrid::util::constants;
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Parse the sample fixture into a fresh table.
fn load_sample() -> TableState {
    let raw = fs::read_to_string(fixture("sample.log")).unwrap();
    let mut state = TableState::new(constants::DEFAULT_PLACEHOLDER);
    state.load(parse_content(&raw, &ParseConfig::default()));
    state
}

/// Cells of one column, top to bottom, in the current view.
fn column_cells(state: &TableState, column: &str) -> Vec<String> {
    let view = state.view();
    let pos = view.columns.iter().position(|c| c == column).unwrap();
    view.rows.iter().map(|row| row[pos].clone()).collect()
}

// =============================================================================
// Parse E2E
// =============================================================================

/// The fixture's blank line is dropped; every other line produces a
/// record, including the freeform rotation marker (an empty record).
#[test]
fn e2e_parse_fixture_produces_expected_records() {
    let state = load_sample();
    let view = state.view();

    assert_eq!(view.total, 7);
    assert_eq!(view.matched, 7);
}

/// The column schema comes from the first record only, in
/// extraction-rule order, and covers all thirteen known fields.
#[test]
fn e2e_columns_derive_from_first_record_in_rule_order() {
    let state = load_sample();

    assert_eq!(
        state.columns(),
        [
            "timestamp",
            "level",
            "message",
            "user",
            "request_id",
            "method",
            "path",
            "status",
            "duration",
            "api",
            "size",
            "human_size",
            "params",
        ]
    );
}

/// Later records with fewer fields surface as placeholder cells, not
/// schema changes; the freeform line is a full row of placeholders.
#[test]
fn e2e_missing_fields_render_as_placeholders() {
    let state = load_sample();

    assert_eq!(
        column_cells(&state, "user"),
        vec!["alice", "-", "bob", "carol", "alice", "dave", "-"]
    );

    let view = state.view();
    let last_row = view.rows.last().unwrap();
    assert!(last_row.iter().all(|cell| cell == "-"));
}

// =============================================================================
// Command E2E
// =============================================================================

/// Searching narrows to matching records; clearing restores everything;
/// a second term restarts from the canonical set.
#[test]
fn e2e_search_is_reentrant() {
    let mut state = load_sample();

    state.set_search_term("alice");
    assert_eq!(state.view().matched, 2);

    state.set_search_term("carol");
    assert_eq!(state.view().matched, 1);
    assert_eq!(column_cells(&state, "message"), vec!["upstream timeout"]);

    state.set_search_term("");
    assert_eq!(state.view().matched, 7);
}

/// Numeric sort on status: numeric order (not lexical), records without
/// the column pinned last, ties in original relative order.
#[test]
fn e2e_sort_by_status_is_numeric_and_stable() {
    let mut state = load_sample();

    state.set_sort("status").unwrap();
    assert_eq!(
        column_cells(&state, "status"),
        vec!["200", "200", "204", "413", "504", "-", "-"]
    );
    // The two 200s keep input order: req-001 before req-002.
    assert_eq!(column_cells(&state, "request_id")[..2], ["req-001", "req-002"]);

    // Toggle to descending: present values reverse, absent stay last.
    state.set_sort("status").unwrap();
    assert_eq!(
        state.sort().unwrap().direction,
        SortDirection::Descending
    );
    assert_eq!(
        column_cells(&state, "status"),
        vec!["504", "413", "204", "200", "200", "-", "-"]
    );
}

/// Filter and sort compose: the view is always sort(filter(records)).
#[test]
fn e2e_search_then_sort_compose() {
    let mut state = load_sample();

    state.set_search_term("req-");
    state.set_sort("duration").unwrap();
    // Durations of the five request records, lexically compared
    // ("12ms" etc. do not parse as numbers).
    assert_eq!(
        column_cells(&state, "duration"),
        vec!["102ms", "12ms", "30s", "8ms", "941ms"]
    );
    assert_eq!(state.view().total, 7);
    assert_eq!(state.view().matched, 5);
}

/// Moving a column is a pure permutation: same column set, same rows.
#[test]
fn e2e_move_column_permutes_headers_only() {
    let mut state = load_sample();
    let messages_before = column_cells(&state, "message");

    state.move_column("message", "timestamp").unwrap();

    let view = state.view();
    assert_eq!(view.columns[0], "message");
    assert_eq!(view.columns[1], "timestamp");
    assert_eq!(view.columns.len(), 13);
    assert_eq!(column_cells(&state, "message"), messages_before);
}

/// A reorder naming an unknown column faults and changes nothing.
#[test]
fn e2e_invalid_move_is_rejected() {
    let mut state = load_sample();
    let columns_before = state.columns().to_vec();

    assert!(state.move_column("message", "severity").is_err());
    assert_eq!(state.columns(), columns_before.as_slice());
}

// =============================================================================
// Export E2E
// =============================================================================

/// CSV export carries the current column order and placeholder cells.
#[test]
fn e2e_csv_export_matches_view() {
    let mut state = load_sample();
    state.set_search_term("alice");

    let mut buf = Vec::new();
    let count = export_csv(&state.view(), &mut buf).unwrap();
    assert_eq!(count, 2);

    let output = String::from_utf8(buf).unwrap();
    assert!(output.starts_with("timestamp,level,message,user,"));
    assert!(output.contains("req-001"));
    assert!(output.contains("req-004"));
    assert!(!output.contains("req-002"));
}

/// JSON export keeps real values: structured params stay objects, the
/// malformed params payload stays raw text, absent fields are absent.
#[test]
fn e2e_json_export_round_trips_params() {
    let state = load_sample();

    let mut buf = Vec::new();
    export_json(&state.visible_records(), &mut buf).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    // req-002 has a valid params object.
    assert_eq!(parsed[2]["params"]["q"], "widgets");
    // req-005's payload has a trailing comma: kept as raw text.
    assert_eq!(parsed[5]["params"], r#"{"chunked":true,}"#);
    // The "server ready" record has no user key at all.
    assert!(parsed[1].get("user").is_none());
}

/// The parsed values survive unchanged through the record layer.
#[test]
fn e2e_extracted_values_are_literal_tokens() {
    let state = load_sample();
    let records = state.visible_records();

    assert_eq!(
        records[0].get("timestamp"),
        Some(&Value::Text("2024-05-14T09:12:01Z".into()))
    );
    assert_eq!(
        records[0].get("human_size"),
        Some(&Value::Text("2.0 KB".into()))
    );
    assert_eq!(records[0].get("size"), Some(&Value::Text("2048".into())));
}

// =============================================================================
// Config E2E
// =============================================================================

/// A real config.toml on disk drives parsing and display behaviour.
#[test]
fn e2e_config_file_controls_cap_and_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(constants::CONFIG_FILE_NAME),
        "[parse]\nmax_records = 1000\n\n[display]\nplaceholder = \"?\"\n",
    )
    .unwrap();

    let (config, warnings) = load_config(dir.path());
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(config.max_records, 1000);

    let raw = fs::read_to_string(fixture("sample.log")).unwrap();
    let mut state = TableState::new(&config.placeholder);
    state.load(parse_content(
        &raw,
        &ParseConfig {
            max_records: config.max_records,
        },
    ));

    assert_eq!(column_cells(&state, "user")[1], "?");
}
