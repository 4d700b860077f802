//! Candidate tables the guess is allowed to choose from.

use serde::{Deserialize, Serialize};

use crate::dialect::{Escape, Quote};
use crate::error::{GuessError, Result};

/// Candidate lists and limits used while guessing.
///
/// The order of each list is its priority: earlier entries win ties. The
/// defaults try comma, tab, pipe and semicolon (in that order), double then
/// single quotes, and doubled then backslash escapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuessPolicy {
    pub delimiters: Vec<char>,
    pub quotes: Vec<Quote>,
    pub escapes: Vec<Escape>,
    /// Literals recognized as a missing value.
    pub null_strings: Vec<String>,
    /// Prefixes that mark a comment line.
    pub comment_line_markers: Vec<String>,
    /// Maximum number of preamble rows skipped before the table starts.
    pub max_skip_lines: usize,
}

impl Default for GuessPolicy {
    fn default() -> Self {
        Self {
            delimiters: vec![',', '\t', '|', ';'],
            quotes: vec![Quote::Some('"'), Quote::Some('\''), Quote::None],
            escapes: vec![Escape::Doubled, Escape::Backslash, Escape::None],
            null_strings: ["null", "NULL", "#N/A", "\\N"]
                .into_iter()
                .map(String::from)
                .collect(),
            comment_line_markers: vec!["#".to_string(), "//".to_string()],
            max_skip_lines: 10,
        }
    }
}

impl GuessPolicy {
    /// Parse a policy from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Priority of a delimiter; lower is preferred. Unknown delimiters (for
    /// example one pinned by a seed) rank after every listed one.
    pub fn delimiter_rank(&self, delimiter: char) -> usize {
        self.delimiters
            .iter()
            .position(|&d| d == delimiter)
            .unwrap_or(self.delimiters.len())
    }

    fn validate(&self) -> Result<()> {
        if self.delimiters.is_empty() {
            return Err(GuessError::InvalidConfig(
                "policy needs at least one delimiter".to_string(),
            ));
        }
        if self.quotes.is_empty() || self.escapes.is_empty() {
            return Err(GuessError::InvalidConfig(
                "policy needs at least one quote and one escape candidate".to_string(),
            ));
        }
        if self.comment_line_markers.iter().any(String::is_empty) {
            return Err(GuessError::InvalidConfig(
                "comment line markers cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
