//! Built-in rules and the registry that names them.
//!
//! | id | settings | effect |
//! |---|---|---|
//! | `duplicate` | none | copy the file, continue on the copy |
//! | `resize` | `width`, `max-height` | aspect-preserving resize |
//! | `crop` | `width`, `height`, `crop-box-width`, `x`, `y` | crop + scale to an exact size |
//! | `grayscale` | none | channel-mean desaturation |
//!
//! The [`RuleRegistry`] maps an id to a factory `Settings -> Box<dyn Rule>`.
//! Rule-set documents are decoded through it, so a document can only name
//! rules the registry knows. Applications add their own rules with
//! [`RuleRegistry::register`]; a rule is always filed under its own
//! [`Rule::kind`], the same id a stringified document records.

mod crop;
mod duplicate;
mod grayscale;
mod resize;

pub use crop::Crop;
pub use duplicate::Duplicate;
pub use grayscale::{Grayscale, desaturate};
pub use resize::Resize;

use crate::rule::{Rule, Settings};
use std::collections::BTreeMap;

/// Builds a rule from its settings.
pub type RuleFactory = fn(Settings) -> Box<dyn Rule>;

#[derive(Debug, Clone)]
pub struct RuleRegistry {
    factories: BTreeMap<String, RuleFactory>,
}

impl RuleRegistry {
    /// Registry with no rules at all.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry with the four built-in rules.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(|s| Box::new(Crop::new(s)));
        registry.register(|s| Box::new(Duplicate::new(s)));
        registry.register(|s| Box::new(Grayscale::new(s)));
        registry.register(|s| Box::new(Resize::new(s)));
        registry
    }

    /// Add or replace a factory, keyed by the `kind()` of the rule it builds.
    pub fn register(&mut self, factory: RuleFactory) -> &mut Self {
        let kind = factory(Settings::new()).kind();
        self.factories.insert(kind.to_string(), factory);
        self
    }

    pub fn resolve(&self, kind: &str) -> Option<RuleFactory> {
        self.factories.get(kind).copied()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered ids in sorted order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
