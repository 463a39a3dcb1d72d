//! Translation engine for task search criteria.
//!
//! Converts user-entered search criteria (type, operator, value triples)
//! into the filter-query document the task-search REST API consumes.
//! The pipeline per criterion is parse → sanitize → resolve:
//!
//! - [`value::parse_value`] coerces the raw input string into a typed value
//!   (number, boolean, null, quote-forced string, plain string).
//! - [`sanitize::sanitize_value`] applies operator-specific transforms
//!   (`LIKE` wildcard wrapping, `in` list splitting, date canonicalization).
//! - [`property::resolve_property`] derives the output field name from the
//!   type/operator/value combination (operator and expression suffixes,
//!   the priority special case).
//! - [`assemble::assemble`] folds a criteria sequence plus a match-mode
//!   flag into the final [`assemble::QueryDocument`].
//!
//! The engine never fails: malformed combinations degrade to the most
//! literal interpretation of their input instead of raising. Errors only
//! occur at the edges (configuration loading, criterion validation).

#![forbid(unsafe_code)]

pub mod assemble;
pub mod channel;
pub mod config;
pub mod criterion;
pub mod error;
pub mod property;
pub mod sanitize;
pub mod value;

pub use assemble::{assemble, FilterQuery, QueryDocument, VariableField, VariableFilter};
pub use channel::QueryChannel;
pub use config::{KeyValue, SearchConfig, TypeDefinition};
pub use criterion::{CriterionName, CriterionValue, SearchCriterion};
pub use error::{Error, Result};
pub use property::resolve_property;
pub use sanitize::sanitize_value;
pub use value::{parse_value, QueryValue};
