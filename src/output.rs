//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Run
//!
//! ```text
//! 5639.jpg → 5639-Q0ZD-x.jpg
//! 5640.jpg → failed: Invalid crop dimensions
//!
//! Processed 1 image, 1 failed
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 duplicate
//! 002 crop
//!     height: 100
//!     width: 200
//! ```
//!
//! ## Rules
//!
//! ```text
//! crop
//! duplicate
//! grayscale
//! resize
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::chain::Chain;
use crate::error::ChainError;
use crate::rules::RuleRegistry;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Outcome of running the chain on one file.
pub fn format_run_line(source: &str, outcome: Result<&str, &ChainError>) -> String {
    match outcome {
        Ok(name) => format!("{source} → {name}"),
        Err(err) => format!("{source} → failed: {err}"),
    }
}

pub fn format_run_summary(processed: usize, failed: usize) -> String {
    if failed == 0 {
        format!("Processed {}", plural(processed, "image"))
    } else {
        format!("Processed {}, {failed} failed", plural(processed, "image"))
    }
}

/// One header per rule, settings indented beneath in key order.
pub fn format_chain(chain: &Chain) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, rule) in chain.rules().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), rule.kind()));
        for (key, value) in rule.settings().iter() {
            lines.push(format!("    {key}: {value}"));
        }
    }
    if lines.is_empty() {
        lines.push("(empty chain)".to_string());
    }
    lines
}

pub fn format_rules(registry: &RuleRegistry) -> Vec<String> {
    registry.kinds().map(str::to_string).collect()
}

pub fn print_chain(chain: &Chain) {
    for line in format_chain(chain) {
        println!("{}", line);
    }
}

pub fn print_rules(registry: &RuleRegistry) {
    for line in format_rules(registry) {
        println!("{}", line);
    }
}
