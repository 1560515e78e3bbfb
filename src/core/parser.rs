// LogGrid - core/parser.rs
//
// Record parsing: a raw text blob in, the canonical record sequence and
// derived column list out. Core layer: pure over its input, no I/O.

use crate::core::extract;
use crate::core::model::Record;

/// Configuration for parsing operations.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Cap on the number of records produced by one parse.
    pub max_records: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        use crate::util::constants;
        Self {
            max_records: constants::DEFAULT_MAX_RECORDS,
        }
    }
}

/// Result of parsing one text blob.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Records in input order. This is the canonical order absent an
    /// explicit sort.
    pub records: Vec<Record>,

    /// Column names derived from the first record, in extraction-rule
    /// order. Empty when there are no records. Fixed for the lifetime of
    /// this record set: later records with other field sets surface as
    /// blank cells, not schema changes.
    pub columns: Vec<String>,

    /// Total lines processed (including lines that matched nothing).
    pub lines_processed: u64,

    /// True when parsing stopped at the record cap and dropped input.
    pub truncated: bool,
}

/// Parse a text blob into records and a derived column list.
///
/// Splits on line breaks, discards lines that are empty after trimming,
/// and extracts fields from each surviving line in input order. Lines
/// matching no field pattern still produce a record (an empty one); only
/// blank lines are dropped. Parsing never fails -- the worst input yields
/// an outcome with empty records and columns.
pub fn parse_content(content: &str, config: &ParseConfig) -> ParseOutcome {
    tracing::debug!(bytes = content.len(), "Parsing started");

    let mut records = Vec::new();
    let mut lines_processed: u64 = 0;
    let mut truncated = false;

    for line in content.lines() {
        lines_processed += 1;

        if line.trim().is_empty() {
            continue;
        }

        if records.len() >= config.max_records {
            // Resource bound: stop ingesting rather than grow without
            // limit on pathological input.
            truncated = true;
            tracing::warn!(
                max_records = config.max_records,
                "Record cap reached; remaining input dropped"
            );
            break;
        }

        records.push(extract::extract(line));
    }

    let columns: Vec<String> = records
        .first()
        .map(|first| first.field_names().map(str::to_string).collect())
        .unwrap_or_default();

    tracing::debug!(
        records = records.len(),
        columns = columns.len(),
        lines = lines_processed,
        truncated,
        "Parsing complete"
    );

    ParseOutcome {
        records,
        columns,
        lines_processed,
        truncated,
    }
}
