// LogGrid - core/query.rs
//
// Query evaluation: the free-text filter predicate and the per-column
// comparator used for sorting. Core layer: pure logic, no I/O.

use crate::core::model::{Record, SortDirection, SortSpec};
use std::cmp::Ordering;

/// Check whether a record matches a search term.
///
/// A record matches when ANY of its present field values, in display
/// form, contains the term as a case-insensitive substring. `needle_lower`
/// must already be lowercased (callers hoist the conversion out of the
/// per-record loop). An empty term matches every record.
pub fn matches_term(record: &Record, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    record
        .values()
        .any(|value| value.display_text().to_lowercase().contains(needle_lower))
}

/// Apply the search term to a record slice, returning indices of matching
/// records.
///
/// Returns indices into the original slice rather than cloned records, so
/// the canonical set is never aliased into a derived view. Filtering
/// always runs over the full slice -- it is not cumulative.
pub fn filter_records(records: &[Record], term: &str) -> Vec<usize> {
    if term.is_empty() {
        return (0..records.len()).collect();
    }

    let needle_lower = term.to_lowercase();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_term(record, &needle_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Compare two records by one column under the given direction.
///
/// Value comparison is numeric when both cells parse as numbers, lexical
/// otherwise. Records missing the column order after all present values
/// in BOTH directions -- the direction flips only the present-vs-present
/// comparison, so unsortable records stay pinned to the bottom.
pub fn compare_in(a: &Record, b: &Record, column: &str, direction: SortDirection) -> Ordering {
    match (a.get(column), b.get(column)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(va), Some(vb)) => {
            let ordering = compare_values(&va.display_text(), &vb.display_text());
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

/// Natural ordering of two cell texts: numeric when both parse as
/// numbers, else lexical.
fn compare_values(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(na), Ok(nb)) => na.total_cmp(&nb),
        _ => a.cmp(b),
    }
}

/// Stably sort a derived index list by the given sort spec.
///
/// `indices` index into `records` and arrive in the order the view
/// currently shows; `sort_by` is stable, so records equal under the
/// comparator keep that relative order.
pub fn sort_indices(records: &[Record], indices: &mut [usize], spec: &SortSpec) {
    indices.sort_by(|&ia, &ib| compare_in(&records[ia], &records[ib], &spec.column, spec.direction));
}
