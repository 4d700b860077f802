//! Generation of candidate dialects to score.

use crate::config::ParserConfig;
use crate::dialect::{Dialect, Escape, Quote};
use crate::policy::GuessPolicy;

/// Count occurrences of `c` across the lines.
///
/// ASCII characters (every default candidate) go through the SIMD byte
/// counter; anything else falls back to a char scan.
pub fn count_char(lines: &[&str], c: char) -> usize {
    if c.is_ascii() {
        let byte = c as u8;
        lines
            .iter()
            .map(|line| bytecount::count(line.as_bytes(), byte))
            .sum()
    } else {
        lines.iter().map(|line| line.matches(c).count()).sum()
    }
}

/// Build the candidate dialects for a sample.
///
/// Seeded delimiter, quote and escape restrict their axis to the seeded
/// value. Unseeded quote and backslash candidates whose character never
/// occurs in the sample are dropped: they would tokenize exactly like "no
/// quote"/"no escape", which wins that tie anyway. Candidates are returned
/// in priority order.
pub fn generate_candidates(
    lines: &[&str],
    policy: &GuessPolicy,
    seed: &ParserConfig,
) -> Vec<Dialect> {
    let delimiters: Vec<char> = match seed.delimiter {
        Some(d) => vec![d],
        None => policy.delimiters.clone(),
    };

    let quotes: Vec<Quote> = match seed.quote {
        Some(q) => vec![q],
        None => policy
            .quotes
            .iter()
            .copied()
            .filter(|q| q.char().is_none_or(|c| count_char(lines, c) > 0))
            .collect(),
    };

    let escapes: Vec<Escape> = match seed.escape {
        Some(e) => vec![e],
        None => {
            let has_backslash = count_char(lines, '\\') > 0;
            policy
                .escapes
                .iter()
                .copied()
                .filter(|e| *e != Escape::Backslash || has_backslash)
                .collect()
        }
    };

    let mut candidates = Vec::new();
    for &delimiter in &delimiters {
        for &quote in &quotes {
            if quote.char() == Some(delimiter) {
                continue;
            }
            for &escape in &escapes {
                if escape.requires_quote() && quote == Quote::None {
                    continue;
                }
                candidates.push(Dialect::new(delimiter, quote, escape));
            }
        }
    }

    // an unseeded axis may have been pruned to nothing
    if candidates.is_empty() {
        for &delimiter in &delimiters {
            let quote = seed.quote.unwrap_or(Quote::None);
            let escape = seed.escape.unwrap_or(Escape::None);
            if quote.char() != Some(delimiter) {
                candidates.push(Dialect::new(delimiter, quote, escape));
            }
        }
    }

    candidates
}
