//! # Shackles
//!
//! Batch image transformation as chains of rules. A rule is one
//! transformation (crop, resize, grayscale, duplicate) with a settings map; a
//! chain is an ordered list of rules; a runner applies chains to one image at
//! a time inside a base directory and names the result with a template.
//!
//! # Architecture
//!
//! ```text
//! rule-set JSON ──ChainBuilder::convert──▶ Chain
//!                                            │
//! RunnerConfig ──ChainBuilder::new_runner──▶ ChainRunner
//!                                            │ process(file) → Image
//!                                            │ run(chain)
//!                                            ▼
//!                  rules in order: decode → transform → encode (same path)
//!                                            │
//!                  NameFormatter(template, NAME) → rename on disk
//! ```
//!
//! Rules never hold the filesystem or the codec. The runner lends them a
//! [`RuleContext`] for the duration of each chain, so tests swap in a
//! recording codec and a seeded name generator without touching the rules.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`runner`] | `ChainRunner`: base directory, staged image, chain execution, renaming |
//! | [`builder`] | `ChainBuilder`: runner construction and rule-set JSON in both directions |
//! | [`chain`] | `Chain`: ordered rules, fail-fast execution |
//! | [`rule`] | `Rule` trait, `Settings`, `RuleContext` |
//! | [`rules`] | Built-in rules and the `RuleRegistry` that names them |
//! | [`naming`] | `{NAME}` / `{####}` template evaluation |
//! | [`record`] | `Image`, the record a run carries through its chains |
//! | [`imaging`] | Crop geometry, resize math, the codec trait and its `image`-crate implementation |
//! | [`fs`] | Filesystem capability rooted at the base directory |
//! | [`config`] | `RunnerConfig` and its TOML loading |
//! | [`error`] | `ChainError` and the error taxonomy |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Registry Instead of Type Names
//!
//! A rule-set document names rules by a registered identifier. The
//! [`RuleRegistry`] maps each identifier to a factory
//! `fn(Settings) -> Box<dyn Rule>`, and a document can only name what is
//! registered. Applications add their own rules with `register`, which files
//! each factory under the `kind()` of the rule it builds, so whatever
//! `stringify` writes the same registry can read back.
//!
//! ## Rules Write In Place
//!
//! Every pixel rule decodes the current file, transforms it, and encodes back
//! to the same path. The only rule that creates a file is `duplicate`, which
//! copies first and continues on the copy. A chain that starts with
//! `duplicate` therefore never modifies the source file.
//!
//! ## No Rollback
//!
//! The first error stops the run. Rules that already wrote their output and
//! renames that already happened stay as they are; the error carries the
//! message and the caller decides what to do about the directory.

pub mod builder;
pub mod chain;
pub mod config;
pub mod error;
pub mod fs;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod record;
pub mod rule;
pub mod rules;
pub mod runner;

pub use builder::ChainBuilder;
pub use chain::Chain;
pub use error::{ChainError, Result};
pub use record::Image;
pub use rule::{Rule, RuleContext, Settings};
pub use rules::RuleRegistry;
pub use runner::ChainRunner;

#[cfg(test)]
pub(crate) mod test_helpers;
