use std::fmt;

use crate::config::{CSV_PARSER_TYPE, ColumnConfig, ConfigDiff, ParserConfig};
use crate::dialect::Dialect;
use crate::field_type::ColumnType;

/// Why a guess declined to suggest anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The sample has no content lines.
    EmptyOrDegenerateSample,
    /// No candidate dialect splits the rows into two or more columns.
    NoConsistentDialect,
    /// The seed belongs to a parser other than CSV.
    UnsupportedParserType,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyOrDegenerateSample => write!(f, "empty or degenerate sample"),
            SkipReason::NoConsistentDialect => write!(f, "no consistent dialect"),
            SkipReason::UnsupportedParserType => write!(f, "unsupported parser type"),
        }
    }
}

/// A guessed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

impl Column {
    /// Render as a schema entry.
    pub fn to_config(&self) -> ColumnConfig {
        let (format, alternate_formats) = match self.column_type.timestamp_format() {
            Some(ts) => (
                Some(ts.format.to_string()),
                ts.alternates.iter().map(|f| f.to_string()).collect(),
            ),
            None => (None, Vec::new()),
        };

        ColumnConfig {
            name: self.name.clone(),
            column_type: self.column_type.name().to_string(),
            format,
            alternate_formats,
        }
    }
}

/// A complete guessed parser configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    /// Winning dialect, including the null literal if one was found.
    pub dialect: Dialect,
    /// Whether the first data line is a header.
    pub header: bool,
    /// Whether unquoted values need whitespace trimming.
    pub trim: bool,
    /// Sample lines before the first data row (preamble plus header).
    pub skip_header_lines: usize,
    pub comment_line_marker: Option<String>,
    pub columns: Vec<Column>,
}

/// Outcome of a guess: a suggestion, or an explicit refusal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessResult {
    /// Decline to suggest; the seed must be left alone.
    Empty(SkipReason),
    Suggested(Guess),
}

impl GuessResult {
    /// Returns true for a declined guess.
    pub fn is_empty(&self) -> bool {
        matches!(self, GuessResult::Empty(_))
    }

    /// The suggestion, if any.
    pub fn guess(&self) -> Option<&Guess> {
        match self {
            GuessResult::Suggested(guess) => Some(guess),
            GuessResult::Empty(_) => None,
        }
    }

    /// Why the guess declined, if it did.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            GuessResult::Empty(reason) => Some(*reason),
            GuessResult::Suggested(_) => None,
        }
    }

    /// Render as a diff against `seed`: only fields the seed does not set are
    /// emitted. A declined guess is the empty diff.
    pub fn to_config_diff(&self, seed: &ParserConfig) -> ConfigDiff {
        let GuessResult::Suggested(guess) = self else {
            return ConfigDiff::empty();
        };

        let mut parser = ParserConfig::default();

        if seed.kind.is_none() {
            parser.kind = Some(CSV_PARSER_TYPE.to_string());
        }
        if seed.delimiter.is_none() {
            parser.delimiter = Some(guess.dialect.delimiter);
        }
        if seed.quote.is_none() {
            parser.quote = Some(guess.dialect.quote);
        }
        if seed.escape.is_none() {
            parser.escape = Some(guess.dialect.escape);
        }
        if seed.null_string.is_none() {
            parser.null_string = guess.dialect.null_string.clone();
        }
        if seed.trim_if_needed.is_none() && guess.trim {
            parser.trim_if_needed = Some(true);
        }
        if seed.skip_header_lines.is_none() && guess.skip_header_lines > 0 {
            parser.skip_header_lines = Some(guess.skip_header_lines);
        }
        if seed.comment_line_marker.is_none() {
            parser.comment_line_marker = guess.comment_line_marker.clone();
        }
        if seed.allow_extra_columns.is_none() {
            parser.allow_extra_columns = Some(false);
        }
        if seed.allow_optional_columns.is_none() {
            parser.allow_optional_columns = Some(false);
        }
        if seed.columns.is_none() {
            parser.columns = Some(guess.columns.iter().map(Column::to_config).collect());
        }

        ConfigDiff { parser }
    }
}
