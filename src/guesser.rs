//! The CSV guesser builder and guess methods.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::config::{ConfigDiff, ParserConfig};
use crate::error::Result;
use crate::field_type::ColumnType;
use crate::infer::candidates::generate_candidates;
use crate::infer::header::detect_header;
use crate::infer::markers::{
    ContentLines, count_preamble, guess_comment_marker, guess_null_string,
};
use crate::infer::score::{Tier, find_best, score_all};
use crate::infer::tokenizer::{ParsedRow, tokenize};
use crate::infer::trim::{detect_trim, prepare_rows};
use crate::infer::type_detection::infer_column_types;
use crate::policy::GuessPolicy;
use crate::result::{Column, Guess, GuessResult, SkipReason};
use crate::sample::{DatePreference, Sample, SampleSize};

/// How column types are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuessMode {
    /// Infer each column's type from its values.
    #[default]
    Typed,
    /// Every column is a string.
    AllStrings,
}

/// Guesses a CSV parser configuration from a sample.
///
/// # Example
///
/// ```no_run
/// use csv_guess::{CsvGuesser, DatePreference, ParserConfig, SampleSize};
///
/// let mut guesser = CsvGuesser::new();
/// guesser
///     .sample_size(SampleSize::new(200, 64 * 1024))
///     .date_preference(DatePreference::DmyFormat);
///
/// let result = guesser.guess_path("data.csv", &ParserConfig::default()).unwrap();
/// let diff = result.to_config_diff(&ParserConfig::default());
/// println!("{}", diff.to_json_pretty().unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CsvGuesser {
    policy: GuessPolicy,
    sample_size: SampleSize,
    date_preference: DatePreference,
    mode: GuessMode,
}

impl CsvGuesser {
    /// Create a guesser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate tables.
    pub fn policy(&mut self, policy: GuessPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    /// Set the sample bounds used by [`guess_path`](Self::guess_path) and
    /// [`guess_reader`](Self::guess_reader).
    pub fn sample_size(&mut self, sample_size: SampleSize) -> &mut Self {
        self.sample_size = sample_size;
        self
    }

    /// Set the date preference for ambiguous dates.
    pub fn date_preference(&mut self, date_preference: DatePreference) -> &mut Self {
        self.date_preference = date_preference;
        self
    }

    /// Set how column types are chosen.
    pub fn mode(&mut self, mode: GuessMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Capture a sample from the file at `path` and guess.
    pub fn guess_path<P: AsRef<Path>>(&self, path: P, seed: &ParserConfig) -> Result<GuessResult> {
        let file = File::open(path.as_ref())?;
        self.guess_reader(BufReader::new(file), seed)
    }

    /// Capture a sample from a reader and guess.
    pub fn guess_reader<R: Read>(&self, reader: R, seed: &ParserConfig) -> Result<GuessResult> {
        let sample = Sample::read(reader, self.sample_size)?;
        self.guess(&sample, seed)
    }

    /// Guess and render the result as a diff against `seed`.
    pub fn guess_diff(&self, sample: &Sample, seed: &ParserConfig) -> Result<ConfigDiff> {
        Ok(self.guess(sample, seed)?.to_config_diff(seed))
    }

    /// Guess a parser configuration for `sample`.
    ///
    /// Seeded fields are honored and never re-guessed. An invalid seed is an
    /// error; a sample that cannot be guessed is an empty result.
    pub fn guess(&self, sample: &Sample, seed: &ParserConfig) -> Result<GuessResult> {
        seed.validate()?;

        if seed.is_foreign() {
            return Ok(decline(SkipReason::UnsupportedParserType));
        }

        let lines: Vec<&str> = sample.lines().iter().map(String::as_str).collect();
        if lines.iter().all(|line| line.trim().is_empty()) {
            return Ok(decline(SkipReason::EmptyOrDegenerateSample));
        }

        let comment_line_marker = seed
            .comment_line_marker
            .clone()
            .or_else(|| guess_comment_marker(&lines, &self.policy.comment_line_markers));
        let content = ContentLines::new(&lines, comment_line_marker.as_deref());
        if content.lines.iter().all(|line| line.trim().is_empty()) {
            return Ok(decline(SkipReason::EmptyOrDegenerateSample));
        }

        // Score every candidate dialect
        let candidates = generate_candidates(&content.lines, &self.policy, seed);
        let scores = score_all(&content.lines, &candidates);
        let Some(best) = find_best(&scores, &self.policy) else {
            return Ok(decline(SkipReason::NoConsistentDialect));
        };
        if best.tier == Tier::SingleColumn && seed.delimiter.is_none() {
            return Ok(decline(SkipReason::NoConsistentDialect));
        }

        let width = best.modal_width;
        let mut dialect = best.dialect.clone();
        tracing::debug!(
            delimiter = ?dialect.delimiter,
            quote = %dialect.quote,
            escape = %dialect.escape,
            width,
            consistency = best.consistency,
            "selected dialect"
        );

        let parsed: Vec<ParsedRow> = tokenize(&content.lines, &dialect)
            .filter_map(|row| row.ok())
            .filter(|row| !row.is_blank())
            .collect();
        let null_candidates = &self.policy.null_strings;

        // Seeded line skips replace preamble and header detection
        let (skip_rows, seeded_header) = match seed.skip_header_lines {
            Some(skip) => (
                parsed
                    .iter()
                    .take_while(|row| content.origin(row.line) < skip)
                    .count(),
                Some(seed.header_line.unwrap_or(false)),
            ),
            None => (
                count_preamble(&parsed, width, self.policy.max_skip_lines),
                seed.header_line,
            ),
        };
        let rows: Vec<ParsedRow> = parsed
            .iter()
            .skip(skip_rows)
            .filter(|row| row.width() == width)
            .cloned()
            .collect();
        if rows.is_empty() {
            return Ok(decline(SkipReason::EmptyOrDegenerateSample));
        }

        // padded literals count while trim is still undecided
        let loose_null = seed
            .null_string
            .clone()
            .or_else(|| guess_null_string(&parsed, null_candidates, true));
        let trim = seed.trim_if_needed.unwrap_or_else(|| {
            detect_trim(&rows, width, loose_null.as_deref(), self.date_preference)
        });
        dialect.null_string = if trim || seed.null_string.is_some() {
            loose_null
        } else {
            guess_null_string(&parsed, null_candidates, false)
        };

        let null_string = dialect.null_string.as_deref();
        let values = prepare_rows(&rows, trim, null_string);

        let header = seeded_header
            .unwrap_or_else(|| detect_header(&values, width, self.date_preference));
        tracing::debug!(header, trim, rows = rows.len(), "detected layout");

        let names = column_names(header.then(|| &rows[0]), width);
        let data = &values[usize::from(header)..];
        let types = match self.mode {
            GuessMode::Typed => infer_column_types(data, width, self.date_preference),
            GuessMode::AllStrings => vec![ColumnType::String; width],
        };

        // a header-only sample ends right after its header line
        let skip_header_lines = match (seed.skip_header_lines, rows.get(usize::from(header))) {
            (Some(skip), _) => skip,
            (None, Some(first_data)) => content.origin(first_data.line),
            (None, None) => content.origin(rows[0].line) + 1,
        };

        let columns = names
            .into_iter()
            .zip(types)
            .map(|(name, column_type)| Column { name, column_type })
            .collect();

        Ok(GuessResult::Suggested(Guess {
            dialect,
            header,
            trim,
            skip_header_lines,
            comment_line_marker,
            columns,
        }))
    }
}

fn decline(reason: SkipReason) -> GuessResult {
    tracing::debug!(%reason, "declining to guess");
    GuessResult::Empty(reason)
}

/// Names from the trimmed header cells, or positional `c0`, `c1`, ... for
/// blank cells and header-less samples.
fn column_names(header: Option<&ParsedRow>, width: usize) -> Vec<String> {
    (0..width)
        .map(|i| {
            header
                .and_then(|row| row.cells.get(i))
                .map(|cell| cell.value.trim())
                .filter(|name| !name.is_empty())
                .map_or_else(|| format!("c{i}"), str::to_string)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Escape, Quote};

    fn guess(lines: &[&str]) -> GuessResult {
        CsvGuesser::new()
            .guess(&Sample::from_lines(lines.iter().copied()), &ParserConfig::default())
            .unwrap()
    }

    fn suggested(lines: &[&str]) -> Guess {
        guess(lines).guess().cloned().unwrap()
    }

    fn types(guess: &Guess) -> Vec<&'static str> {
        guess.columns.iter().map(|c| c.column_type.name()).collect()
    }

    #[test]
    fn test_guesser_builder() {
        let mut guesser = CsvGuesser::new();
        guesser
            .sample_size(SampleSize::new(50, 4096))
            .date_preference(DatePreference::DmyFormat)
            .mode(GuessMode::AllStrings);

        assert_eq!(guesser.sample_size, SampleSize::new(50, 4096));
        assert_eq!(guesser.date_preference, DatePreference::DmyFormat);
        assert_eq!(guesser.mode, GuessMode::AllStrings);
    }

    #[test]
    fn test_header_and_schema() {
        let guess = suggested(&["name,age", "alice,30", "bob,25"]);

        assert_eq!(guess.dialect.delimiter, ',');
        assert!(guess.header);
        assert_eq!(guess.skip_header_lines, 1);
        assert_eq!(guess.columns[0].name, "name");
        assert_eq!(guess.columns[1].name, "age");
        assert_eq!(types(&guess), vec!["string", "long"]);
    }

    #[test]
    fn test_numeric_rows_have_no_header() {
        let guess = suggested(&["1,2", "3,4"]);
        assert!(!guess.header);
        assert_eq!(guess.skip_header_lines, 0);
        assert_eq!(guess.columns[0].name, "c0");
        assert_eq!(guess.columns[1].name, "c1");
    }

    #[test]
    fn test_preamble_is_skipped() {
        let guess = suggested(&["Report generated today", "", "id,score", "1,2.5", "2,3.0"]);
        assert!(guess.header);
        assert_eq!(guess.skip_header_lines, 3);
        assert_eq!(types(&guess), vec!["long", "double"]);
    }

    #[test]
    fn test_comment_lines() {
        let guess = suggested(&["# exported", "id,flag", "1,true", "# note", "2,false"]);
        assert_eq!(guess.comment_line_marker.as_deref(), Some("#"));
        assert_eq!(guess.skip_header_lines, 2);
        assert_eq!(types(&guess), vec!["long", "boolean"]);
    }

    #[test]
    fn test_null_literal_is_wildcard() {
        let guess = suggested(&["id,value", "1,NULL", "2,5"]);
        assert_eq!(guess.dialect.null_string.as_deref(), Some("NULL"));
        assert_eq!(types(&guess), vec!["long", "long"]);
    }

    #[test]
    fn test_blank_header_cell_is_positional() {
        let guess = suggested(&[" id , ", "1,x", "2,y"]);
        assert_eq!(guess.columns[0].name, "id");
        assert_eq!(guess.columns[1].name, "c1");
    }

    #[test]
    fn test_single_column_declines() {
        assert_eq!(
            guess(&["alpha", "beta"]).skip_reason(),
            Some(SkipReason::NoConsistentDialect)
        );
    }

    #[test]
    fn test_single_column_with_seeded_delimiter() {
        let seed = ParserConfig {
            delimiter: Some(','),
            ..Default::default()
        };
        let result = CsvGuesser::new()
            .guess(&Sample::from_lines(["id", "1", "2"]), &seed)
            .unwrap();
        let guess = result.guess().unwrap();

        assert_eq!(guess.columns.len(), 1);
        assert!(guess.header);
        assert_eq!(guess.columns[0].name, "id");
    }

    #[test]
    fn test_seeded_dialect_is_used() {
        let seed = ParserConfig {
            quote: Some(Quote::None),
            escape: Some(Escape::None),
            ..Default::default()
        };
        let result = CsvGuesser::new()
            .guess(&Sample::from_lines([r#""a","b""#, r#""1","2""#]), &seed)
            .unwrap();
        let guess = result.guess().unwrap();

        // quotes are literal text, so both rows are plain strings
        assert_eq!(guess.dialect.quote, Quote::None);
        assert!(!guess.header);
        assert_eq!(types(guess), vec!["string", "string"]);
    }

    #[test]
    fn test_seeded_skip_header_lines() {
        let seed = ParserConfig {
            skip_header_lines: Some(1),
            ..Default::default()
        };
        let result = CsvGuesser::new()
            .guess(&Sample::from_lines(["x,y", "1,2", "3,4"]), &seed)
            .unwrap();
        let guess = result.guess().unwrap();

        assert!(!guess.header);
        assert_eq!(guess.skip_header_lines, 1);
        assert_eq!(types(guess), vec!["long", "long"]);
    }

    #[test]
    fn test_seeded_header_on_header_only_sample() {
        let seed = ParserConfig {
            header_line: Some(true),
            ..Default::default()
        };
        let result = CsvGuesser::new()
            .guess(&Sample::from_lines(["name,age"]), &seed)
            .unwrap();
        let guess = result.guess().unwrap();

        assert!(guess.header);
        assert_eq!(guess.columns[0].name, "name");
        assert_eq!(guess.columns[1].name, "age");
        assert_eq!(types(guess), vec!["string", "string"]);
        assert_eq!(guess.skip_header_lines, 1);
    }

    #[test]
    fn test_padded_null_follows_trim() {
        let lines = ["id,value", "1, NULL ", "2,5"];

        let guess = suggested(&lines);
        assert!(guess.trim);
        assert_eq!(guess.dialect.null_string.as_deref(), Some("NULL"));
        assert_eq!(types(&guess), vec!["long", "long"]);

        let seed = ParserConfig {
            trim_if_needed: Some(false),
            ..Default::default()
        };
        let result = CsvGuesser::new()
            .guess(&Sample::from_lines(lines), &seed)
            .unwrap();
        let guess = result.guess().unwrap();
        assert!(!guess.trim);
        assert_eq!(guess.dialect.null_string, None);
        assert_eq!(types(guess), vec!["long", "string"]);
    }

    #[test]
    fn test_foreign_seed_declines() {
        let seed = ParserConfig {
            kind: Some("json".to_string()),
            ..Default::default()
        };
        let result = CsvGuesser::new()
            .guess(&Sample::from_lines(["a,b", "1,2"]), &seed)
            .unwrap();
        assert_eq!(result.skip_reason(), Some(SkipReason::UnsupportedParserType));
    }

    #[test]
    fn test_invalid_seed_is_error() {
        let seed = ParserConfig {
            delimiter: Some('"'),
            quote: Some(Quote::Some('"')),
            ..Default::default()
        };
        assert!(
            CsvGuesser::new()
                .guess(&Sample::from_lines(["a,b"]), &seed)
                .is_err()
        );
    }

    #[test]
    fn test_all_strings_mode() {
        let mut guesser = CsvGuesser::new();
        guesser.mode(GuessMode::AllStrings);
        let result = guesser
            .guess(
                &Sample::from_lines(["name,age", "alice,30"]),
                &ParserConfig::default(),
            )
            .unwrap();
        let guess = result.guess().unwrap();

        assert!(guess.header);
        assert_eq!(types(guess), vec!["string", "string"]);
    }
}
