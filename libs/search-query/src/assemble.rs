//! Query document assembly
//!
//! Folds an ordered criteria sequence and a match-mode flag into the
//! filter-query document the backend consumes. Assembly is pure: the
//! document is recomputed wholesale on every call, never patched.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::criterion::SearchCriterion;
use crate::property::resolve_property;
use crate::sanitize::sanitize_value;
use crate::value::{parse_value, QueryValue};

/// The three output fields that accumulate named sub-criteria instead of
/// a single scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableField {
    Process,
    Task,
    CaseInstance,
}

impl VariableField {
    pub fn from_type_key(key: &str) -> Option<Self> {
        match key {
            "processVariables" => Some(Self::Process),
            "taskVariables" => Some(Self::Task),
            "caseInstanceVariables" => Some(Self::CaseInstance),
            _ => None,
        }
    }
}

/// One named sub-criterion inside a variable-bearing field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableFilter {
    pub name: String,
    pub operator: String,
    pub value: QueryValue,
}

/// The accumulating half of a query document: the three variable
/// sequences plus the flat scalar fields, flattened into one JSON
/// object on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub process_variables: Vec<VariableFilter>,
    pub task_variables: Vec<VariableFilter>,
    pub case_instance_variables: Vec<VariableFilter>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, QueryValue>,
}

impl FilterQuery {
    fn variables_mut(&mut self, field: VariableField) -> &mut Vec<VariableFilter> {
        match field {
            VariableField::Process => &mut self.process_variables,
            VariableField::Task => &mut self.task_variables,
            VariableField::CaseInstance => &mut self.case_instance_variables,
        }
    }
}

/// The assembled document. Under AND semantics the query is flat; under
/// OR semantics it is wrapped in a single-element `orQueries` sequence
/// (one recursion level only). The shape makes the `orQueries` key
/// structurally absent in the AND case rather than empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryDocument {
    All(FilterQuery),
    Any {
        #[serde(rename = "orQueries")]
        or_queries: Vec<FilterQuery>,
    },
}

impl QueryDocument {
    pub fn match_any(&self) -> bool {
        matches!(self, Self::Any { .. })
    }

    /// The query carrying the accumulated criteria: the document itself
    /// under AND semantics, the single `orQueries` element under OR.
    pub fn query(&self) -> &FilterQuery {
        match self {
            Self::All(query) => query,
            Self::Any { or_queries } => &or_queries[0],
        }
    }
}

fn criterion_value(criterion: &SearchCriterion) -> QueryValue {
    if criterion.basic {
        return QueryValue::Bool(true);
    }
    sanitize_value(
        parse_value(&criterion.value.raw, criterion.enforce_string),
        &criterion.operator.key,
        criterion.allow_dates,
    )
}

/// Assemble the filter-query document for `criteria` under the given
/// match mode.
///
/// Criteria are folded in input order. A criterion whose type names one
/// of the variable-bearing fields appends a [`VariableFilter`] to that
/// sequence; any other criterion sets a scalar field whose name comes
/// from [`resolve_property`], last write winning on collision. Identical
/// input always yields a structurally identical document.
pub fn assemble(criteria: &[SearchCriterion], match_any: bool) -> QueryDocument {
    let mut target = FilterQuery::default();

    for criterion in criteria {
        let value = criterion_value(criterion);
        match VariableField::from_type_key(&criterion.search_type.key) {
            Some(field) => target.variables_mut(field).push(VariableFilter {
                name: criterion.name.wire_name().to_string(),
                operator: criterion.operator.key.clone(),
                value,
            }),
            None => {
                let field_name = resolve_property(
                    &criterion.search_type.key,
                    &criterion.operator.key,
                    &criterion.value.raw,
                );
                target.fields.insert(field_name, value);
            }
        }
    }

    if match_any {
        QueryDocument::Any {
            or_queries: vec![target],
        }
    } else {
        QueryDocument::All(target)
    }
}
