// LogGrid - core/export.rs
//
// CSV and JSON export of the derived table view.
// Core layer: writes to any Write trait object.

use crate::core::model::{Record, TableView};
use crate::util::error::ExportError;
use std::io::Write;

/// Write the view as CSV: a header row in current column order, then one
/// row of display cells per visible record (absent fields appear as the
/// view's placeholder text, exactly as rendered).
///
/// Returns the number of data rows written.
pub fn export_csv<W: Write>(view: &TableView, writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(&view.columns)
        .map_err(|e| ExportError::Csv { source: e })?;

    let mut count = 0;
    for row in &view.rows {
        csv_writer
            .write_record(row)
            .map_err(|e| ExportError::Csv { source: e })?;
        count += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| ExportError::Io { source: e })?;

    Ok(count)
}

/// Write records as a JSON array of objects, in the order given.
///
/// Unlike CSV this keeps real field values: absent fields are absent keys
/// rather than placeholder cells, and a structured `params` value stays a
/// nested object.
pub fn export_json<W: Write>(records: &[&Record], writer: W) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records)
        .map_err(|e| ExportError::Json { source: e })?;
    Ok(records.len())
}
