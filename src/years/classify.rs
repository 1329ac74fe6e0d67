// src/years/classify.rs
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Any 4-digit run starting with 19 or 20, anywhere in the text.
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:19|20)\d{2}").unwrap());

/// Does the string form of `value` contain a year? `null` never does.
pub fn looks_like_year(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => str_looks_like_year(s),
        // numbers, bools and nested values are judged by their compact JSON text
        other => str_looks_like_year(&other.to_string()),
    }
}

pub fn str_looks_like_year(raw: &str) -> bool {
    let s = raw.trim();
    if s.is_empty() {
        return false;
    }
    // a whole-string year is just the tightest substring hit
    YEAR_RE.is_match(s)
}
