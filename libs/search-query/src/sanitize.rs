//! Operator-specific value transforms
//!
//! Applied after coercion, before the value lands in the query document.
//! Exactly one rule fires per value; a value no rule matches passes
//! through unchanged. The rules only ever apply to string values — a
//! coerced number, boolean, or null is already in its final form.

use chrono::{Local, LocalResult, NaiveDateTime, TimeZone, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::value::QueryValue;

/// Escaped wildcards `\%` and `\_` (literal characters, not patterns).
static ESCAPED_WILDCARD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\\%)|(\\_)").unwrap());

/// Unescaped SQL-LIKE wildcards `%` and `_`.
static WILDCARD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(%)|(_)").unwrap());

/// Timezone-less `YYYY-MM-DDTHH:mm:ss` with up to four fractional digits.
static SIMPLE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]{0,4})?$").unwrap()
});

/// Transform a parsed value according to its operator. First matching
/// rule wins:
///
/// 1. `like` (case-insensitive) and the value carries no unescaped
///    wildcard → wrap as `%value%`. A value that already contains `%` or
///    `_` is a user-supplied pattern and passes through.
/// 2. `in` (exact) → split on `,` into a list of strings; no trimming,
///    no unescaping of embedded commas.
/// 3. `allow_dates` and the value is a timezone-less date-time → the
///    canonical wire form `YYYY-MM-DDTHH:mm:ss.SSS±ZZZZ`.
/// 4. anything else passes through unchanged.
pub fn sanitize_value(value: QueryValue, operator_key: &str, allow_dates: bool) -> QueryValue {
    let QueryValue::String(text) = value else {
        return value;
    };
    if operator_key.eq_ignore_ascii_case("like")
        && !WILDCARD.is_match(&ESCAPED_WILDCARD.replace_all(&text, ""))
    {
        return QueryValue::String(format!("%{text}%"));
    }
    if operator_key == "in" {
        return QueryValue::List(text.split(',').map(str::to_string).collect());
    }
    if allow_dates && SIMPLE_DATE.is_match(&text) {
        if let Some(canonical) = canonicalize_date(&text) {
            return QueryValue::String(canonical);
        }
    }
    QueryValue::String(text)
}

/// Reformat a matched simple date to the wire form the backend expects:
/// milliseconds zero-padded to three digits, explicit local offset.
/// Fractions beyond millisecond precision are truncated.
fn canonicalize_date(input: &str) -> Option<String> {
    let (base, fraction) = match input.split_once('.') {
        Some((base, fraction)) => (base, fraction),
        None => (input, ""),
    };
    let naive = NaiveDateTime::parse_from_str(base, "%Y-%m-%dT%H:%M:%S").ok()?;

    let mut digits = fraction.to_string();
    while digits.len() < 3 {
        digits.push('0');
    }
    let millis: u32 = digits[..3].parse().ok()?;
    let naive = naive.with_nanosecond(millis * 1_000_000)?;

    let local = match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        // The local time does not exist (DST gap); leave the value alone.
        LocalResult::None => return None,
    };
    Some(local.format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> QueryValue {
        QueryValue::string(text)
    }

    #[test]
    fn like_wraps_plain_values() {
        assert_eq!(sanitize_value(s("abc"), "like", false), s("%abc%"));
        assert_eq!(sanitize_value(s("abc"), "LIKE", false), s("%abc%"));
        assert_eq!(sanitize_value(s("abc"), "Like", false), s("%abc%"));
    }

    #[test]
    fn like_passes_user_patterns_through() {
        assert_eq!(sanitize_value(s("a%b"), "like", false), s("a%b"));
        assert_eq!(sanitize_value(s("a_b"), "like", false), s("a_b"));
    }

    #[test]
    fn escaped_wildcards_do_not_count_as_patterns() {
        assert_eq!(
            sanitize_value(s(r"100\% sure"), "like", false),
            s(r"%100\% sure%")
        );
        assert_eq!(sanitize_value(s(r"a\_b"), "like", false), s(r"%a\_b%"));
        // One escaped, one literal: the literal wins.
        assert_eq!(sanitize_value(s(r"a\%b%c"), "like", false), s(r"a\%b%c"));
    }

    #[test]
    fn in_splits_on_commas_verbatim() {
        assert_eq!(
            sanitize_value(s("a,b,c"), "in", false),
            QueryValue::List(vec!["a".into(), "b".into(), "c".into()])
        );
        // No trimming, no comma unescaping.
        assert_eq!(
            sanitize_value(s("a, b"), "in", false),
            QueryValue::List(vec!["a".into(), " b".into()])
        );
        assert_eq!(
            sanitize_value(s(r"a\,b"), "in", false),
            QueryValue::List(vec![r"a\".into(), "b".into()])
        );
        // `in` is matched exactly, unlike `like`.
        assert_eq!(sanitize_value(s("a,b"), "IN", false), s("a,b"));
    }

    #[test]
    fn dates_are_canonicalized_when_allowed() {
        let out = sanitize_value(s("2020-01-01T10:00:00"), "eq", true);
        let text = out.as_str().unwrap();
        assert!(text.starts_with("2020-01-01T10:00:00.000"));
        assert!(Regex::new(r"\.\d{3}[+-]\d{4}$").unwrap().is_match(text));
    }

    #[test]
    fn fractional_digits_pad_and_truncate_to_millis() {
        let out = sanitize_value(s("2020-01-01T10:00:00.7"), "eq", true);
        assert!(out.as_str().unwrap().contains(".700"));

        let out = sanitize_value(s("2020-01-01T10:00:00.1234"), "eq", true);
        assert!(out.as_str().unwrap().contains(".123"));
    }

    #[test]
    fn dates_pass_through_when_not_allowed_or_not_simple() {
        assert_eq!(
            sanitize_value(s("2020-01-01T10:00:00"), "eq", false),
            s("2020-01-01T10:00:00")
        );
        // Timezone present: not a simple date.
        assert_eq!(
            sanitize_value(s("2020-01-01T10:00:00Z"), "eq", true),
            s("2020-01-01T10:00:00Z")
        );
        // Date without time: not a simple date.
        assert_eq!(sanitize_value(s("2020-01-01"), "eq", true), s("2020-01-01"));
    }

    #[test]
    fn only_the_first_matching_rule_fires() {
        // A simple date under `like` gets wrapped, never canonicalized.
        assert_eq!(
            sanitize_value(s("2020-01-01T10:00:00"), "like", true),
            s("%2020-01-01T10:00:00%")
        );
    }

    #[test]
    fn non_string_values_pass_through() {
        assert_eq!(
            sanitize_value(QueryValue::Number(5.into()), "like", false),
            QueryValue::Number(5.into())
        );
        assert_eq!(
            sanitize_value(QueryValue::Bool(true), "in", false),
            QueryValue::Bool(true)
        );
        assert_eq!(
            sanitize_value(QueryValue::Null, "like", true),
            QueryValue::Null
        );
    }
}
