//! Search criterion model
//!
//! One user-specified search condition: a type, an operator, and the raw
//! value the user typed. Criteria arrive from the UI layer, typically as
//! JSON; missing optional fields are normalized to defaults at
//! deserialization instead of being read as absent at use sites.

use serde::{Deserialize, Serialize};

use crate::config::{KeyValue, TypeDefinition};
use crate::error::{Error, Result};

/// Display name of a criterion: either a key/label pair picked from the
/// type's potential names, or a plain string typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CriterionName {
    Keyed(KeyValue),
    Plain(String),
}

impl CriterionName {
    /// The name sent on the wire: the key of a structured name, the
    /// string itself otherwise.
    pub fn wire_name(&self) -> &str {
        match self {
            Self::Keyed(kv) => &kv.key,
            Self::Plain(s) => s,
        }
    }
}

impl Default for CriterionName {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

/// The value cell of a criterion. `raw` is the text exactly as typed;
/// everything downstream (parsing, expression detection) reads `raw`.
/// `value` is the display form the UI shows, which may differ once the
/// widget formats it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CriterionValue {
    #[serde(default)]
    pub value: String,
    pub raw: String,
}

impl CriterionValue {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            value: raw.clone(),
            raw,
        }
    }
}

/// One search condition as edited by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriterion {
    #[serde(rename = "type")]
    pub search_type: KeyValue,
    #[serde(default)]
    pub operator: KeyValue,
    #[serde(default)]
    pub value: CriterionValue,
    #[serde(default)]
    pub name: CriterionName,
    /// Skip coercion; the value always stays a string.
    #[serde(default)]
    pub enforce_string: bool,
    /// Presence-only criterion: operator and value are not consulted,
    /// the criterion contributes a fixed `true` marker.
    #[serde(default)]
    pub basic: bool,
    /// The value may be canonicalized as a date.
    #[serde(default)]
    pub allow_dates: bool,
}

impl SearchCriterion {
    pub fn new(search_type: KeyValue, operator: KeyValue, raw_value: impl Into<String>) -> Self {
        Self {
            search_type,
            operator,
            value: CriterionValue::new(raw_value),
            name: CriterionName::default(),
            enforce_string: false,
            basic: false,
            allow_dates: false,
        }
    }

    /// A presence-only criterion for the given type.
    pub fn basic(search_type: KeyValue) -> Self {
        Self {
            basic: true,
            ..Self::new(search_type, KeyValue::default(), "")
        }
    }

    /// Build a criterion for a configured type, inheriting its
    /// `enforceString`/`allowDates`/`basic` flags.
    pub fn for_type(def: &TypeDefinition, operator: KeyValue, raw_value: impl Into<String>) -> Self {
        Self {
            enforce_string: def.enforce_string,
            allow_dates: def.allow_dates,
            basic: def.basic,
            ..Self::new(def.id.clone(), operator, raw_value)
        }
    }

    pub fn with_name(mut self, name: CriterionName) -> Self {
        self.name = name;
        self
    }

    /// Reject criteria the assembler could only interpret as garbage.
    /// Basic criteria need a type; everything else needs a type and an
    /// operator.
    pub fn validate(&self) -> Result<()> {
        if self.search_type.key.is_empty() {
            return Err(Error::InvalidCriterion("missing type key".into()));
        }
        if !self.basic && self.operator.key.is_empty() {
            return Err(Error::InvalidCriterion(format!(
                "missing operator key for type {:?}",
                self.search_type.key
            )));
        }
        Ok(())
    }
}
