//! Unwrappers for the billing API's inconsistent response envelopes.
//!
//! Different routes (and versions of the same route) wrap list payloads in
//! different shapes: `{data: [...]}`, `{data: {data: [...]}}`,
//! `{clients: [...]}`, `{message: [...]}`, `{message: {data: [...]}}`,
//! `{message: {clients: [...]}}`, or a bare array. The unwrappers accept any
//! of them and never fail; an unrecognized payload yields an empty list.

use serde_json::Value;

use crate::pagination::PageInfo;

/// Extracts the record array from a list response.
///
/// `collection` names the route-specific key (`"clients"`, `"users"`, ...).
/// Candidates are tried in a fixed priority order: direct data wins over
/// message-wrapped data. First match wins.
pub fn unwrap_records(payload: &Value, collection: &str) -> Vec<Value> {
    if let Value::Array(records) = payload {
        return records.clone();
    }

    let candidates = [
        payload.get("data"),
        payload.get("data").and_then(|d| d.get("data")),
        payload.get(collection),
        payload.get("message"),
        payload.get("message").and_then(|m| m.get("data")),
        payload.get("message").and_then(|m| m.get(collection)),
    ];

    for candidate in candidates.into_iter().flatten() {
        if let Value::Array(records) = candidate {
            return records.clone();
        }
    }

    Vec::new()
}

/// Extracts (or synthesizes) the pagination descriptor from a list response.
///
/// A response with `total` beside an array `data` carries its own descriptor;
/// otherwise a nested object at `data`/`message` may carry one. Bulk "all"
/// style responses have no metadata at all and get a synthesized single-page
/// descriptor when records were found. `None` means no page controls.
pub fn unwrap_page_info(payload: &Value, record_count: usize) -> Option<PageInfo> {
    if payload.get("total").is_some() && payload.get("data").is_some_and(Value::is_array) {
        if let Some(info) = page_info_from(payload) {
            return Some(info);
        }
    }

    for key in ["data", "message"] {
        if let Some(nested) = payload.get(key) {
            if nested.is_object() && nested.get("total").is_some() {
                if let Some(info) = page_info_from(nested) {
                    return Some(info);
                }
            }
        }
    }

    if record_count > 0 {
        return Some(PageInfo::single_page(record_count as u64));
    }

    None
}

fn page_info_from(value: &Value) -> Option<PageInfo> {
    let total = num_field(value, "total")?;
    Some(PageInfo {
        total,
        per_page: num_field(value, "per_page").unwrap_or_else(|| total.max(1)),
        current_page: num_field(value, "current_page").unwrap_or(1),
        last_page: num_field(value, "last_page"),
        total_pages: num_field(value, "total_pages"),
        from: num_field(value, "from"),
        to: num_field(value, "to"),
    })
}

// Pagination counters arrive as numbers on some routes and numeric strings on
// others.
fn num_field(value: &Value, key: &str) -> Option<u64> {
    match value.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
