//! Raw input coercion
//!
//! Turns the text a user typed into a typed query value. The coercion
//! order is load-bearing and must not be reordered: a quoted `'true'`
//! yields the string `"true"`, never the boolean.

use serde::Serialize;
use serde_json::Number;

/// A value as it appears in the assembled query document.
///
/// Serializes untagged, so the wire form is the plain JSON scalar (or
/// string array for `in` lists).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<String>),
}

impl QueryValue {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// Coerce a raw input string into a typed value.
///
/// With `enforce_string` set the input is returned verbatim, always a
/// string. Otherwise the checks run in this exact order:
///
/// 1. non-blank numeric text → number (integer form preserved when the
///    value has no fraction; blank input is not numeric),
/// 2. exactly `true`/`false` → boolean,
/// 3. exactly `NULL` → null,
/// 4. single-quoted, length ≥ 2 → the inner text with one quote pair
///    stripped (escape hatch forcing a literal string),
/// 5. anything else → the input verbatim.
pub fn parse_value(raw: &str, enforce_string: bool) -> QueryValue {
    if enforce_string {
        return QueryValue::string(raw);
    }
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        if let Ok(int) = trimmed.parse::<i64>() {
            return QueryValue::Number(int.into());
        }
        if let Ok(float) = trimmed.parse::<f64>() {
            // from_f64 rejects NaN/infinity, which are not numeric input.
            if let Some(number) = Number::from_f64(float) {
                return QueryValue::Number(number);
            }
        }
    }
    if raw == "true" {
        return QueryValue::Bool(true);
    }
    if raw == "false" {
        return QueryValue::Bool(false);
    }
    if raw == "NULL" {
        return QueryValue::Null;
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return QueryValue::string(&raw[1..raw.len() - 1]);
    }
    QueryValue::string(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enforce_string_overrides_all_coercion() {
        assert_eq!(parse_value("true", true), QueryValue::string("true"));
        assert_eq!(parse_value("5", true), QueryValue::string("5"));
        assert_eq!(parse_value("NULL", true), QueryValue::string("NULL"));
    }

    #[test]
    fn numeric_text_becomes_a_number() {
        assert_eq!(parse_value("5", false), QueryValue::Number(5.into()));
        assert_eq!(parse_value(" 5 ", false), QueryValue::Number(5.into()));
        assert_eq!(parse_value("-17", false), QueryValue::Number((-17).into()));
        assert_eq!(
            parse_value("2.5", false),
            QueryValue::Number(Number::from_f64(2.5).unwrap())
        );
    }

    #[test]
    fn blank_input_is_not_numeric() {
        assert_eq!(parse_value("", false), QueryValue::string(""));
        assert_eq!(parse_value("   ", false), QueryValue::string("   "));
    }

    #[test]
    fn booleans_and_null_are_exact_matches() {
        assert_eq!(parse_value("true", false), QueryValue::Bool(true));
        assert_eq!(parse_value("false", false), QueryValue::Bool(false));
        assert_eq!(parse_value("NULL", false), QueryValue::Null);
        // Not exact: stays a string.
        assert_eq!(parse_value("True", false), QueryValue::string("True"));
        assert_eq!(parse_value("null", false), QueryValue::string("null"));
    }

    #[test]
    fn single_quotes_force_a_literal_string() {
        assert_eq!(parse_value("'5'", false), QueryValue::string("5"));
        assert_eq!(parse_value("'true'", false), QueryValue::string("true"));
        assert_eq!(parse_value("'NULL'", false), QueryValue::string("NULL"));
        // Only one quote pair is stripped.
        assert_eq!(parse_value("''x''", false), QueryValue::string("'x'"));
        // A lone quote is too short to be a quoted value.
        assert_eq!(parse_value("'", false), QueryValue::string("'"));
    }

    #[test]
    fn everything_else_passes_through() {
        assert_eq!(parse_value("kermit", false), QueryValue::string("kermit"));
        assert_eq!(parse_value("5x", false), QueryValue::string("5x"));
    }
}
