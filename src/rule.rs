//! The unit of work in a chain.
//!
//! A [`Rule`] is a settings map plus a transformation. It never stores the
//! capabilities it works with: the runner builds a [`RuleContext`] for each
//! chain and lends it to every rule in turn.
//!
//! Settings are a flat `key → JSON value` map. They are what a rule-set
//! document records for the rule, so a rule must be fully described by them.

use crate::error::Result;
use crate::fs::FileSystem;
use crate::imaging::ImageCodec;
use crate::naming::NameFormatter;
use crate::record::Image;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Immutable `key → value` settings of a rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, Value>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for constructing rules in code.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Numeric value of `key`. Numeric strings (`"200"`) are accepted too.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for Settings {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Wire shapes accepted for settings. Some producers write an empty JSON
/// array for "no settings".
#[derive(Deserialize)]
#[serde(untagged)]
enum SettingsRepr {
    Map(BTreeMap<String, Value>),
    List(Vec<Value>),
}

impl<'de> Deserialize<'de> for Settings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match SettingsRepr::deserialize(deserializer)? {
            SettingsRepr::Map(map) => Ok(Self(map)),
            SettingsRepr::List(list) if list.is_empty() => Ok(Self::default()),
            SettingsRepr::List(_) => Err(de::Error::custom(
                "rule settings must be a map of key to value",
            )),
        }
    }
}

/// Capabilities lent to rules for the duration of one chain.
pub struct RuleContext<'a> {
    pub fs: &'a dyn FileSystem,
    pub codec: &'a dyn ImageCodec,
    pub names: &'a mut NameFormatter,
}

impl fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleContext")
            .field("root", &self.fs.root())
            .finish_non_exhaustive()
    }
}

pub trait Rule: fmt::Debug {
    /// Identifier the rule is registered under.
    fn kind(&self) -> &'static str;

    fn settings(&self) -> &Settings;

    /// Apply the transformation to `image`.
    ///
    /// Missing or invalid settings are reported here, when the rule runs,
    /// not when it is constructed.
    fn process(&self, image: &mut Image, ctx: &mut RuleContext<'_>) -> Result<()>;
}
