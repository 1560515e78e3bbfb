// LogGrid - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// =============================================================================
// Field value
// =============================================================================

/// The value of one extracted field.
///
/// Every field is plain text except `params`, whose payload is an inline
/// JSON object. When that payload parses, the structured value is kept so
/// JSON export can round-trip it; when it does not, the raw matched text
/// is stored unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Literal text as it appeared in the log line.
    Text(String),

    /// Parsed JSON object (the `params` payload).
    Object(serde_json::Value),
}

impl Value {
    /// Display form of the value: the text itself, or the compact JSON
    /// string for structured payloads.
    pub fn display_text(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Object(v) => v.to_string(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Object(v) => write!(f, "{v}"),
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// One parsed log line: an ordered mapping from field name to value.
///
/// Field order is extraction-rule order, which is what makes the first
/// record of a parse define the displayed column order. Fields that did
/// not match are simply absent -- never placeholder entries. With at most
/// one entry per extraction rule the list stays small, so lookups scan
/// rather than hash.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field. Callers must not push the same name twice; the
    /// extractor's fixed rule list guarantees this.
    pub fn push(&mut self, name: &str, value: Value) {
        debug_assert!(self.get(name).is_none(), "duplicate field '{name}'");
        self.fields.push((name.to_string(), value));
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Field names in extraction order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Field values in extraction order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, value)| value)
    }

    /// Number of extracted fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no rule matched the source line.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// Serialised as a JSON object in field order, so export produces the same
// shape the `params` payload uses.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Sort specification
// =============================================================================

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction (used by the sort-toggle command).
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Short label for compact display (e.g. sort indicators).
    pub fn short_label(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// The active sort key: at most one column at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Column the table is sorted by.
    pub column: String,

    /// Sort direction.
    pub direction: SortDirection,
}

// =============================================================================
// Table view (derived output surface)
// =============================================================================

/// The derived view handed to the rendering boundary.
///
/// Always recomputed from canonical state; holding one never aliases the
/// canonical records, so callers cannot corrupt table state through it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// Column names in current display order.
    pub columns: Vec<String>,

    /// One row per visible record, one display cell per column.
    /// Absent fields appear as the configured placeholder text.
    pub rows: Vec<Vec<String>>,

    /// Active sort indicator, if any.
    pub sort: Option<SortSpec>,

    /// Number of records matching the current search term.
    pub matched: usize,

    /// Total records in the canonical set.
    pub total: usize,
}
