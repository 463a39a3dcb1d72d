//! Static search configuration
//!
//! Which criterion types exist, which operators each type offers, and the
//! tooltip text keys the UI layer translates. The configuration is loaded
//! once from JSON, is immutable afterwards, and is passed explicitly to
//! whoever needs it — the engine never reads ambient global state.
//!
//! A default configuration is embedded in the crate; deployments may load
//! their own with [`SearchConfig::from_json_str`].

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static DEFAULT_CONFIG: Lazy<SearchConfig> = Lazy::new(|| {
    SearchConfig::from_json_str(include_str!("../search-config.json"))
        .expect("failed to load embedded search-config.json")
});

/// Wire pair used for type ids, operator definitions, and structured
/// criterion names. `key` is the machine identifier, `value` the
/// (translatable) display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One searchable criterion type, as supplied by the configuration.
///
/// `potential_names` is derived metadata refreshed from the outside (the
/// current filter's variable definitions); the engine never writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    pub id: KeyValue,
    /// Operators this type offers, in display order. Types without their
    /// own list fall back to an operator group (e.g. dates).
    #[serde(default)]
    pub operators: Vec<KeyValue>,
    #[serde(default)]
    pub potential_names: Vec<KeyValue>,
    /// Values of this type are never coerced; they stay strings.
    #[serde(default)]
    pub enforce_string: bool,
    /// Values of this type may be canonicalized as dates.
    #[serde(default)]
    pub allow_dates: bool,
    /// Presence-only criterion: contributes a fixed `true` marker and
    /// consults neither operator nor value.
    #[serde(default)]
    pub basic: bool,
}

/// Search configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Tooltip text keys, translated by the UI layer.
    #[serde(default)]
    pub tooltips: HashMap<String, String>,
    /// Criterion types in display order.
    pub types: Vec<TypeDefinition>,
    /// Shared operator groups (e.g. `date` holds `Before`/`After`).
    #[serde(default)]
    pub operators: HashMap<String, Vec<KeyValue>>,
}

impl SearchConfig {
    /// The configuration embedded in the crate.
    pub fn default_config() -> &'static SearchConfig {
        &DEFAULT_CONFIG
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Look up a type definition by its machine key. Missing types yield
    /// `None`, never a fault.
    pub fn type_by_key(&self, key: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.id.key == key)
    }

    /// Operators for a type: its own list, or the named fallback group
    /// when the list is empty. Unknown groups yield an empty slice.
    pub fn operators_for_type(&self, key: &str, fallback_group: &str) -> &[KeyValue] {
        match self.type_by_key(key) {
            Some(t) if !t.operators.is_empty() => &t.operators,
            _ => self
                .operators
                .get(fallback_group)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.types.is_empty() {
            return Err(Error::InvalidConfig("no criterion types defined".into()));
        }
        for t in &self.types {
            if t.id.key.is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "type with empty key (label: {:?})",
                    t.id.value
                )));
            }
            if !t.basic && t.operators.is_empty() && !t.allow_dates {
                tracing::debug!(type_key = %t.id.key, "type has no operators and no fallback group hint");
            }
        }
        Ok(())
    }
}
