//! Parser configuration exchanged with the caller.
//!
//! The same [`ParserConfig`] shape is used for the seed (what the caller
//! already knows) and for the guessed diff (what the engine suggests). Absent
//! fields are omitted from the JSON form, so an empty diff serializes as `{}`.

use serde::{Deserialize, Serialize};

use crate::dialect::{Escape, Quote};
use crate::error::{GuessError, Result};

/// Name of the parser type this engine guesses for.
pub const CSV_PARSER_TYPE: &str = "csv";

/// CSV parser options. Every field is optional; `None` means "not set".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Parser type, `"csv"` for this engine.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escape: Option<Escape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim_if_needed: Option<bool>,
    /// Whether the first data line is a header. Only read from seeds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_line: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_header_lines: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_line_marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_extra_columns: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_optional_columns: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<ColumnConfig>>,
}

impl ParserConfig {
    /// Parse a parser configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether this configuration belongs to a parser other than CSV.
    pub fn is_foreign(&self) -> bool {
        self.kind
            .as_deref()
            .is_some_and(|kind| kind != CSV_PARSER_TYPE)
    }

    /// Merge `other` under `self`: fields set here win, missing fields are
    /// taken from `other`.
    pub fn merge(&self, other: &ParserConfig) -> ParserConfig {
        ParserConfig {
            kind: self.kind.clone().or_else(|| other.kind.clone()),
            delimiter: self.delimiter.or(other.delimiter),
            quote: self.quote.or(other.quote),
            escape: self.escape.or(other.escape),
            null_string: self
                .null_string
                .clone()
                .or_else(|| other.null_string.clone()),
            trim_if_needed: self.trim_if_needed.or(other.trim_if_needed),
            header_line: self.header_line.or(other.header_line),
            skip_header_lines: self.skip_header_lines.or(other.skip_header_lines),
            comment_line_marker: self
                .comment_line_marker
                .clone()
                .or_else(|| other.comment_line_marker.clone()),
            allow_extra_columns: self.allow_extra_columns.or(other.allow_extra_columns),
            allow_optional_columns: self
                .allow_optional_columns
                .or(other.allow_optional_columns),
            columns: self.columns.clone().or_else(|| other.columns.clone()),
        }
    }

    /// Reject seeds that no parser could honor.
    pub fn validate(&self) -> Result<()> {
        if let Some(delimiter) = self.delimiter {
            if matches!(delimiter, '\n' | '\r') {
                return Err(GuessError::InvalidConfig(
                    "delimiter cannot be a line terminator".to_string(),
                ));
            }
            if self.quote == Some(Quote::Some(delimiter)) {
                return Err(GuessError::InvalidConfig(format!(
                    "delimiter and quote are both {delimiter:?}"
                )));
            }
        }
        if self.quote == Some(Quote::None) && self.escape == Some(Escape::Doubled) {
            return Err(GuessError::InvalidConfig(
                "doubled escape requires a quote character".to_string(),
            ));
        }
        if let Some(marker) = &self.comment_line_marker
            && marker.is_empty()
        {
            return Err(GuessError::InvalidConfig(
                "comment_line_marker cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// One column of a parser schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    /// Timestamp format, for timestamp columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Other timestamp formats seen in the sample.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_formats: Vec<String>,
}

/// Configuration fragment suggested by a guess, wrapped the way the
/// orchestrator stores it: `{"parser": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigDiff {
    #[serde(default, skip_serializing_if = "ParserConfig::is_empty")]
    pub parser: ParserConfig,
}

impl ConfigDiff {
    /// The "no suggestion" diff.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the diff suggests nothing.
    pub fn is_empty(&self) -> bool {
        self.parser.is_empty()
    }

    /// Apply this diff to a seed. Seed fields win.
    pub fn apply_to(&self, seed: &ParserConfig) -> ParserConfig {
        seed.merge(&self.parser)
    }

    /// Combine with a later diff. Fields already suggested here win.
    pub fn and_then(&self, later: &ConfigDiff) -> ConfigDiff {
        ConfigDiff {
            parser: self.parser.merge(&later.parser),
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
