//! Fallback chain derivation.
//!
//! The form takes fallbacks as free text. The chain is parsed into model ids
//! and the primary model is dropped from it: a model cannot fall back to
//! itself.

use crate::state::parse_list;

/// A parsed fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FallbackChain {
    /// Fallback model ids in the order they were given.
    pub models: Vec<String>,
    /// How many entries were dropped because they named the primary model.
    pub removed_primary: usize,
}

/// Parse `raw` (comma/newline separated) and drop entries equal to `primary`.
pub fn derive_fallbacks(raw: &str, primary: &str) -> FallbackChain {
    let parsed = parse_list(raw);
    let total = parsed.len();
    let models: Vec<String> = parsed.into_iter().filter(|m| m != primary).collect();

    FallbackChain {
        removed_primary: total - models.len(),
        models,
    }
}
