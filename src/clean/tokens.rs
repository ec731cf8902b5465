//! Blank-like tokens normalized to null.

use std::collections::BTreeSet;

use crate::config::DEFAULT_NULL_TOKENS;

/// Set of tokens treated as missing values.
///
/// Empty and whitespace-only cells are always missing. Other tokens match
/// exactly (case-sensitive) against the trimmed cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullTokens {
    tokens: BTreeSet<String>,
}

impl NullTokens {
    /// Builds a token set; tokens are trimmed and empty ones dropped.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        Self { tokens }
    }

    pub fn is_null(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        trimmed.is_empty() || self.tokens.contains(trimmed)
    }
}

impl Default for NullTokens {
    fn default() -> Self {
        Self::new(DEFAULT_NULL_TOKENS)
    }
}
