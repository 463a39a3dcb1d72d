//! Output field name derivation
//!
//! The backend exposes operator variants of some fields as distinct
//! query properties (`nameLike`, `createdBefore`, `dueAfter`, ...) and
//! expression variants for user fields (`assigneeExpression`). The name
//! is derived from the criterion's type, operator, and raw value.

use once_cell::sync::Lazy;
use regex::Regex;

/// A value starting (after optional whitespace) with `#{` or `${`
/// denotes a deferred expression rather than a literal.
static EXPRESSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[#$]\{").unwrap());

/// Operators the backend models as field-name suffixes. Case-sensitive:
/// the lowercase `like` variable operator is not one of them.
const SUFFIX_OPERATORS: [&str; 3] = ["Like", "Before", "After"];

/// Types whose expression variants the backend accepts.
const EXPRESSION_TYPES: [&str; 6] = [
    "assignee",
    "owner",
    "candidateGroup",
    "candidateUser",
    "involvedUser",
    "processInstanceBusinessKey",
];

/// Derive the query-document field name for a scalar criterion.
///
/// Priority is special-cased by the backend: any operator other than
/// `eq` selects a dedicated `<op>Priority` field, overriding every
/// suffix rule. Otherwise the operator suffix (if any) is appended
/// first and the `Expression` suffix (if the value is an expression on
/// an eligible type) second; the two stack.
pub fn resolve_property(type_key: &str, operator_key: &str, raw_value: &str) -> String {
    if type_key == "priority" && operator_key != "eq" {
        return format!("{operator_key}Priority");
    }
    let mut out = String::from(type_key);
    if SUFFIX_OPERATORS.contains(&operator_key) {
        out.push_str(operator_key);
    }
    if EXPRESSION_TYPES.contains(&type_key) && EXPRESSION.is_match(raw_value) {
        out.push_str("Expression");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_types_resolve_to_themselves() {
        assert_eq!(resolve_property("assignee", "eq", "demo"), "assignee");
        assert_eq!(resolve_property("name", "eq", "invoice"), "name");
    }

    #[test]
    fn suffix_operators_append_case_sensitively() {
        assert_eq!(resolve_property("name", "Like", "inv"), "nameLike");
        assert_eq!(resolve_property("created", "Before", "x"), "createdBefore");
        assert_eq!(resolve_property("due", "After", "x"), "dueAfter");
        // lowercase `like` is a variable operator, not a suffix.
        assert_eq!(resolve_property("name", "like", "inv"), "name");
    }

    #[test]
    fn priority_overrides_everything_but_eq() {
        assert_eq!(resolve_property("priority", "gt", "5"), "gtPriority");
        assert_eq!(resolve_property("priority", "lt", "5"), "ltPriority");
        assert_eq!(resolve_property("priority", "eq", "5"), "priority");
    }

    #[test]
    fn expressions_suffix_eligible_types_only() {
        assert_eq!(
            resolve_property("assignee", "eq", "${ currentUser() }"),
            "assigneeExpression"
        );
        assert_eq!(
            resolve_property("owner", "eq", "  #{mgmt}"),
            "ownerExpression"
        );
        // Ineligible type: no suffix even for expression values.
        assert_eq!(resolve_property("name", "eq", "${foo}"), "name");
        // Eligible type, literal value: no suffix.
        assert_eq!(resolve_property("assignee", "eq", "demo"), "assignee");
    }

    #[test]
    fn operator_and_expression_suffixes_stack_in_order() {
        assert_eq!(
            resolve_property("owner", "Before", "${foo}"),
            "ownerBeforeExpression"
        );
        assert_eq!(
            resolve_property("processInstanceBusinessKey", "Like", "#{key}"),
            "processInstanceBusinessKeyLikeExpression"
        );
    }
}
