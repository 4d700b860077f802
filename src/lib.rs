//! csv-guess: guess a complete CSV parser configuration from a sample
//!
//! Given the first lines of an unknown delimited text file, the guesser
//! derives the field delimiter, quote character, escape convention, header
//! presence, whitespace trim policy and a typed column schema. When the
//! sample is too small or degenerate to guess safely it declines with an
//! empty result instead of a wrong confident guess.
//!
//! # Quick Start
//!
//! ```no_run
//! use csv_guess::{CsvGuesser, ParserConfig, Sample};
//!
//! let sample = Sample::from_text("name,age\nalice,30\nbob,25\n");
//! let seed = ParserConfig::default();
//!
//! let diff = CsvGuesser::new().guess_diff(&sample, &seed).unwrap();
//! println!("{}", diff.to_json_pretty().unwrap());
//! ```
//!
//! # Seeds and diffs
//!
//! The caller passes a seed [`ParserConfig`] holding whatever it already
//! knows. Seeded fields are never re-guessed, and the returned [`ConfigDiff`]
//! only carries fields the seed lacks, so applying the diff never changes a
//! seeded value. A declined guess is the empty diff (`{}` in JSON).
//!
//! # How the dialect is chosen
//!
//! Every combination of candidate delimiter, quote and escape is tokenized
//! and scored by how many rows share the most common row width. Ties go to
//! the earlier delimiter (comma, tab, pipe, semicolon), then to quotes and
//! escapes the sample actually uses, then to "no quote" and "no escape".
//! Column types are tried from most to least specific: boolean, long,
//! double, timestamp, string.

mod config;
mod dialect;
mod encoding;
mod error;
mod field_type;
mod guesser;
mod infer;
mod plugin;
mod policy;
mod result;
mod sample;

pub use config::{CSV_PARSER_TYPE, ColumnConfig, ConfigDiff, ParserConfig};
pub use dialect::{Dialect, Escape, Quote};
pub use error::{GuessError, Result};
pub use field_type::{ColumnType, TimestampFormat};
pub use guesser::{CsvGuesser, GuessMode};
pub use plugin::{CsvAllStringsGuessPlugin, CsvGuessPlugin, GuessPipeline, GuessPlugin};
pub use policy::GuessPolicy;
pub use result::{Column, Guess, GuessResult, SkipReason};
pub use sample::{DatePreference, Sample, SampleSize};

// Re-export for advanced usage
pub use encoding::{decode, is_utf8};
