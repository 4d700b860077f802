//! Inference passes run by the guesser.
//!
//! Candidates are tokenized and scored by row-width consistency; the winning
//! tokenization then feeds header, trim and column type detection.

pub mod candidates;
pub mod header;
pub mod markers;
pub mod regexes;
pub mod score;
pub mod timestamp;
pub mod tokenizer;
pub mod trim;
pub mod type_detection;
