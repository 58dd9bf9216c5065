//! Runner construction and rule-set documents.
//!
//! A rule-set document is a JSON array with one object per rule, in chain
//! order:
//!
//! ```json
//! [
//!   {"rule": "duplicate", "settings": {}},
//!   {"rule": "crop", "settings": {"width": 200, "height": 100}}
//! ]
//! ```
//!
//! `rule` is the rule's `kind()`, which is also the identifier the
//! [`RuleRegistry`] files it under; `settings` is the rule's settings map, written verbatim.
//! Documents can only name registered rules.

use crate::chain::Chain;
use crate::config::RunnerConfig;
use crate::error::{ChainError, Result};
use crate::imaging::Quality;
use crate::rule::{Rule, Settings};
use crate::rules::RuleRegistry;
use crate::runner::ChainRunner;
use serde::{Deserialize, Serialize};

/// Naming template applied when the configuration does not set one.
pub const DEFAULT_FORMAT: &str = "{NAME}-{####}-{W}x{H}";

const MISSING_SOURCE: &str = "Unable to find image source";
const INVALID_DOCUMENT: &str = "Invalid rule string provided";

/// One element of a rule-set document.
#[derive(Debug, Serialize, Deserialize)]
struct RuleEntry {
    rule: String,
    #[serde(default)]
    settings: Settings,
}

#[derive(Debug, Clone, Default)]
pub struct ChainBuilder {
    registry: RuleRegistry,
}

impl ChainBuilder {
    /// Builder over the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// Runner initialised on `config.source` and naming with `config.format`.
    pub fn new_runner(&self, config: &RunnerConfig) -> Result<ChainRunner> {
        config.validate()?;
        let source = config
            .source
            .as_deref()
            .ok_or_else(|| ChainError::configuration(MISSING_SOURCE))?;

        let mut runner = ChainRunner::new();
        if let Some(q) = config.quality {
            runner = runner.with_jpg_quality(Quality::try_new(q)?);
        }
        runner
            .init(source)?
            .write_as(config.format.as_deref().unwrap_or(DEFAULT_FORMAT));
        Ok(runner)
    }

    /// Serialise `chain` as a rule-set document.
    pub fn stringify(&self, chain: &Chain) -> Result<String> {
        let entries: Vec<RuleEntry> = chain
            .rules()
            .iter()
            .map(|rule| RuleEntry {
                rule: rule.kind().to_string(),
                settings: rule.settings().clone(),
            })
            .collect();
        serde_json::to_string(&entries).map_err(|e| ChainError::serialization(e.to_string()))
    }

    /// Build a chain from a rule-set document.
    pub fn convert(&self, document: &str) -> Result<Chain> {
        let entries: Vec<RuleEntry> = serde_json::from_str(document).map_err(|e| {
            tracing::debug!(error = %e, "rule-set document rejected");
            ChainError::serialization(INVALID_DOCUMENT)
        })?;

        entries
            .into_iter()
            .map(|entry| -> Result<Box<dyn Rule>> {
                let factory = self
                    .registry
                    .resolve(&entry.rule)
                    .ok_or(ChainError::UnknownRule(entry.rule))?;
                Ok(factory(entry.settings))
            })
            .collect()
    }
}
