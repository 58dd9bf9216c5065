//! An ordered list of rules run against one image.

use crate::error::Result;
use crate::record::Image;
use crate::rule::{Rule, RuleContext};

/// Rules executed in list order.
///
/// The order is fixed once the chain is handed to a runner: `run` only ever
/// borrows a chain immutably.
#[derive(Debug, Default)]
pub struct Chain {
    rules: Vec<Box<dyn Rule>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Append a rule, builder style.
    pub fn then(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn push(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule on `image`, stopping at the first error.
    pub fn process(&self, image: &mut Image, ctx: &mut RuleContext<'_>) -> Result<()> {
        for rule in &self.rules {
            tracing::debug!(rule = rule.kind(), image = %image.name, "applying rule");
            rule.process(image, ctx)?;
        }
        Ok(())
    }
}

impl FromIterator<Box<dyn Rule>> for Chain {
    fn from_iter<I: IntoIterator<Item = Box<dyn Rule>>>(iter: I) -> Self {
        Self::with_rules(iter.into_iter().collect())
    }
}
