//! Output file naming from templates.
//!
//! A template is plain text with brace tokens. Evaluation runs in two passes:
//!
//! 1. **Wildcards**: every `{#}`, `{##}`, `{####}`… becomes a random string
//!    of the same length drawn from `A-Z0-9`. Each token is drawn separately,
//!    so `{##}-{##}` yields two unrelated pairs.
//! 2. **Variables**: every remaining `{KEY}` is looked up in the variable
//!    map (exact, case-sensitive). Unknown keys become the empty string.
//!
//! ```text
//! "{NAME}-{####}"   NAME=5639   →  "5639-Q7ZK"
//! "thumb-{NAME}"    NAME=5639   →  "thumb-5639"
//! "{NAME}-{W}x{H}"  NAME=5639   →  "5639-x"
//! ```
//!
//! ## Image names
//!
//! [`NameFormatter::image_name`] is what the runner and the `duplicate` rule
//! use: `NAME` is the stem of the image's source name, and the image's
//! extension is appended to the result. `{W}` and `{H}` are never supplied.
//!
//! ## Randomness
//!
//! The formatter owns its random source. Production code seeds from the OS;
//! tests build one with [`NameFormatter::seeded`] to get repeatable names.

use crate::record::Image;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Symbols wildcard tokens draw from.
pub const WILDCARD_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Template variable holding the source file stem.
pub const NAME_VAR: &str = "NAME";

static WILDCARD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(#+)\}").unwrap());
static VARIABLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").unwrap());

pub struct NameFormatter {
    rng: Box<dyn RngCore>,
}

impl NameFormatter {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Formatter with a fixed seed, for reproducible names.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: impl RngCore + 'static) -> Self {
        Self { rng: Box::new(rng) }
    }

    /// Evaluate `template` against `vars`. Inputs are left untouched.
    pub fn generate(&mut self, template: &str, vars: &HashMap<&str, &str>) -> String {
        let with_wildcards = WILDCARD.replace_all(template, |caps: &Captures| {
            self.random_string(caps[1].len())
        });
        evaluate(&with_wildcards, vars)
    }

    /// File name for `image` under `template`, extension included.
    pub fn image_name(&mut self, template: &str, image: &Image) -> String {
        let vars = HashMap::from([(NAME_VAR, image.source_stem())]);
        let base = self.generate(template, &vars);
        image.with_extension(&base)
    }

    fn random_string(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| WILDCARD_ALPHABET[self.rng.random_range(0..WILDCARD_ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for NameFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NameFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameFormatter").finish_non_exhaustive()
    }
}

/// Variable pass on its own: replace every `{KEY}` with its value or `""`.
pub fn evaluate(template: &str, vars: &HashMap<&str, &str>) -> String {
    VARIABLE
        .replace_all(template, |caps: &Captures| {
            vars.get(&caps[1]).copied().unwrap_or("").to_string()
        })
        .into_owned()
}
