//! Field fallback resolution for raw billing API records.
//!
//! The backend serves the same logical field under different keys depending on
//! the route (`name` vs `company_name`, `msisdn` vs `phone`, ...). Each domain
//! record resolves its display fields through a fixed candidate chain; the
//! first defined, non-empty value wins.

use chrono::NaiveDateTime;
use serde_json::Value;

/// Placeholder for empty table cells.
pub const CELL_PLACEHOLDER: &str = "--";
/// Placeholder for empty inline labels. Not interchangeable with
/// [`CELL_PLACEHOLDER`]; call sites pick the one their view uses.
pub const LABEL_PLACEHOLDER: &str = "\u{2014}";

/// Resolves the first non-empty string among the candidate keys.
///
/// Numeric values are stringified since identifiers and phone numbers arrive
/// as either JSON numbers or strings.
pub fn str_field(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match record.get(key) {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Resolves an opaque read-only field (balance, billing mode, ...) to its
/// display string without interpreting it.
pub fn opaque_field(record: &Value, key: &str) -> Option<String> {
    match record.get(key) {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}

/// Table-cell display value.
pub fn cell(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => CELL_PLACEHOLDER,
    }
}

/// Inline-label display value.
pub fn label(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => LABEL_PLACEHOLDER,
    }
}

/// Normalizes an API timestamp for display. The backend emits a handful of
/// formats; anything unparseable is returned as received.
pub fn timestamp_display(raw: &str) -> String {
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw.trim_end_matches('Z'), format) {
            return ts.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_first_non_empty_candidate_wins() {
        let record = json!({"name": "  ", "company_name": "Acme Telecom"});
        assert_eq!(
            str_field(&record, &["name", "company_name"]),
            Some("Acme Telecom".to_string())
        );

        let record = json!({"name": "Direct", "company_name": "Fallback"});
        assert_eq!(
            str_field(&record, &["name", "company_name"]),
            Some("Direct".to_string())
        );
    }

    #[test]
    fn test_numeric_values_are_stringified() {
        let record = json!({"id": 42});
        assert_eq!(str_field(&record, &["id", "client_id"]), Some("42".to_string()));
    }

    #[test]
    fn test_missing_candidates_resolve_to_none() {
        let record = json!({"unrelated": true});
        assert_eq!(str_field(&record, &["name", "company_name"]), None);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(cell(None), "--");
        assert_eq!(cell(Some("")), "--");
        assert_eq!(cell(Some("x")), "x");
        assert_eq!(label(None), "\u{2014}");
        assert_eq!(label(Some("x")), "x");
    }

    #[test]
    fn test_timestamp_display_normalizes_known_formats() {
        assert_eq!(
            timestamp_display("2024-03-01T09:30:00.000Z"),
            "2024-03-01 09:30"
        );
        assert_eq!(timestamp_display("2024-03-01 09:30:00"), "2024-03-01 09:30");
        assert_eq!(timestamp_display("last tuesday"), "last tuesday");
    }

    #[test]
    fn test_opaque_field_keeps_booleans_and_numbers() {
        let record = json!({"balance": 10.5, "kyb_status": true});
        assert_eq!(opaque_field(&record, "balance"), Some("10.5".to_string()));
        assert_eq!(opaque_field(&record, "kyb_status"), Some("true".to_string()));
        assert_eq!(opaque_field(&record, "credit_limit"), None);
    }
}
