// LogGrid - app/state.rs
//
// Table state management. Holds the canonical record set, the derived
// filtered/sorted view, the column order, and the active search/sort.
// Owned by whatever shell drives the table (the CLI here); a UI layer
// would subscribe to view() output rather than reach into this state.

use crate::core::model::{Record, SortDirection, SortSpec, TableView};
use crate::core::parser::ParseOutcome;
use crate::core::query;
use crate::util::constants;
use crate::util::error::TableError;

/// The table state manager.
///
/// Commands are strictly serialised by the caller: each runs to
/// completion and recomputes the derived index list before the next is
/// accepted. Derived views are recomputed values -- they never alias the
/// canonical records.
#[derive(Debug)]
pub struct TableState {
    /// Canonical records from the most recent parse, in input order.
    records: Vec<Record>,

    /// Column names in current display order. Derived from the first
    /// record of the most recent parse; reset by every parse.
    columns: Vec<String>,

    /// Indices into `records` for the current derived view: filtered by
    /// the search term, then stably sorted by the active sort.
    filtered: Vec<usize>,

    /// Active free-text search term (empty = no filter).
    search_term: String,

    /// Active sort, if any.
    sort: Option<SortSpec>,

    /// Cell text used for fields a record does not have.
    placeholder: String,
}

impl TableState {
    /// Create an empty table with the given placeholder text.
    pub fn new(placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            ..Self::default()
        }
    }

    /// Replace the table contents with a fresh parse outcome.
    ///
    /// Reset-all policy: the search term, sort spec, and column order are
    /// cleared together with the record set, so no retained state can
    /// name a column the new schema does not have.
    pub fn load(&mut self, outcome: ParseOutcome) {
        tracing::debug!(
            records = outcome.records.len(),
            columns = outcome.columns.len(),
            truncated = outcome.truncated,
            "Loading parse outcome"
        );

        self.records = outcome.records;
        self.columns = outcome.columns;
        self.search_term.clear();
        self.sort = None;
        self.filtered = (0..self.records.len()).collect();
    }

    /// Set the free-text search term and recompute the derived view from
    /// the canonical records. An empty term restores the full set.
    /// Filtering is re-entrant: each call restarts from the canonical
    /// records, never from the previous filtered subset.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.recompute();
    }

    /// Sort by `column`, toggling direction when it is already the active
    /// sort column (first selection of a column is always ascending).
    /// Re-sorts the current filtered view in place.
    ///
    /// A column outside the current set is a fault: state is unchanged.
    pub fn set_sort(&mut self, column: &str) -> Result<(), TableError> {
        if !self.columns.iter().any(|c| c == column) {
            return Err(TableError::UnknownColumn {
                column: column.to_string(),
            });
        }

        let direction = match &self.sort {
            Some(spec) if spec.column == column => spec.direction.toggled(),
            _ => SortDirection::Ascending,
        };
        let spec = SortSpec {
            column: column.to_string(),
            direction,
        };
        query::sort_indices(&self.records, &mut self.filtered, &spec);
        self.sort = Some(spec);
        Ok(())
    }

    /// Replace the column order. `new_order` must be a permutation of the
    /// current column set -- no additions, no removals. Anything else is a
    /// fault and leaves the order unchanged.
    ///
    /// Reordering columns never changes which records are visible or
    /// their relative order; only view projection is affected.
    pub fn set_columns(&mut self, new_order: Vec<String>) -> Result<(), TableError> {
        let mut provided_sorted = new_order.clone();
        provided_sorted.sort();
        let mut expected_sorted = self.columns.clone();
        expected_sorted.sort();

        if provided_sorted != expected_sorted {
            return Err(TableError::NotAPermutation {
                provided: new_order,
                expected: self.columns.clone(),
            });
        }

        self.columns = new_order;
        Ok(())
    }

    /// Move `source` to the position of `target`, shifting the columns in
    /// between. Silent no-op when the two are the same column; a fault
    /// when either is not in the current column set.
    pub fn move_column(&mut self, source: &str, target: &str) -> Result<(), TableError> {
        if source == target {
            return Ok(());
        }

        let from = self.column_position(source)?;
        let to = self.column_position(target)?;

        let mut new_order = self.columns.clone();
        let moved = new_order.remove(from);
        new_order.insert(to, moved);

        self.set_columns(new_order)
    }

    /// Build the derived view for the rendering boundary.
    pub fn view(&self) -> TableView {
        let rows = self
            .filtered
            .iter()
            .map(|&idx| {
                let record = &self.records[idx];
                self.columns
                    .iter()
                    .map(|column| {
                        record
                            .get(column)
                            .map(|value| value.display_text())
                            .unwrap_or_else(|| self.placeholder.clone())
                    })
                    .collect()
            })
            .collect();

        TableView {
            columns: self.columns.clone(),
            rows,
            sort: self.sort.clone(),
            matched: self.filtered.len(),
            total: self.records.len(),
        }
    }

    /// The visible records (filtered, sorted) by reference, for export.
    pub fn visible_records(&self) -> Vec<&Record> {
        self.filtered.iter().map(|&idx| &self.records[idx]).collect()
    }

    /// Current column order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Active sort, if any.
    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Active search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Recompute the derived index list: filter from the canonical set in
    /// input order, then re-apply the active sort. This is the
    /// `sort(filter(records, term), spec)` view invariant.
    fn recompute(&mut self) {
        self.filtered = query::filter_records(&self.records, &self.search_term);
        if let Some(spec) = &self.sort {
            query::sort_indices(&self.records, &mut self.filtered, spec);
        }
    }

    fn column_position(&self, column: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| TableError::UnknownColumn {
                column: column.to_string(),
            })
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            columns: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            sort: None,
            placeholder: constants::DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}
