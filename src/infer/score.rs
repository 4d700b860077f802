//! Consistency scoring of candidate dialects.
//!
//! A candidate's score is the number of rows whose width equals the modal
//! width. Ties are broken by delimiter priority, then by quote and escape
//! evidence, then by candidate order, so the selection is total.

use std::cmp::Ordering;

use foldhash::{HashMap, HashMapExt};
use rayon::prelude::*;

use super::tokenizer::tokenize;
use crate::dialect::{Dialect, Escape, Quote};
use crate::policy::GuessPolicy;

/// Quality tier of a candidate, worst first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    /// No row could be parsed.
    Disqualified,
    /// Modal width 1: the delimiter never splits anything.
    SingleColumn,
    /// Modal width of at least 2.
    Consistent,
}

/// Score of one candidate dialect.
#[derive(Debug, Clone)]
pub struct DialectScore {
    pub dialect: Dialect,
    /// Position in the candidate list.
    pub index: usize,
    pub tier: Tier,
    /// Rows whose width equals the modal width.
    pub consistency: usize,
    /// Most common row width (ties go to the larger width).
    pub modal_width: usize,
    /// Non-blank rows that tokenized.
    pub parsed_rows: usize,
    pub malformed_rows: usize,
    /// Cells that were actually written quoted.
    pub quote_evidence: usize,
    /// Escape sequences actually consumed.
    pub escape_evidence: usize,
}

/// Most common width; deterministic tie-breaking prefers the larger width.
pub fn modal_width<I: IntoIterator<Item = usize>>(widths: I) -> usize {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for width in widths {
        *counts.entry(width).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(width_a, count_a), (width_b, count_b)| {
            count_a.cmp(count_b).then_with(|| width_a.cmp(width_b))
        })
        .map_or(0, |(width, _)| width)
}

/// Tokenize the sample under `dialect` and score the result.
pub fn score_dialect(lines: &[&str], dialect: &Dialect, index: usize) -> DialectScore {
    let mut widths = Vec::new();
    let mut malformed_rows = 0;
    let mut quote_evidence = 0;
    let mut escape_evidence = 0;

    for row in tokenize(lines, dialect) {
        match row {
            Ok(row) if row.is_blank() => {}
            Ok(row) => {
                widths.push(row.width());
                quote_evidence += row.quoted_cells();
                escape_evidence += row.escapes;
            }
            Err(malformed) => {
                tracing::trace!(line = malformed.line, kind = ?malformed.kind, "malformed row");
                malformed_rows += 1;
            }
        }
    }

    let modal_width = modal_width(widths.iter().copied());
    let consistency = widths.iter().filter(|&&w| w == modal_width).count();
    let tier = match modal_width {
        0 => Tier::Disqualified,
        1 => Tier::SingleColumn,
        _ => Tier::Consistent,
    };

    let score = DialectScore {
        dialect: dialect.clone(),
        index,
        tier,
        consistency,
        modal_width,
        parsed_rows: widths.len(),
        malformed_rows,
        quote_evidence,
        escape_evidence,
    };

    tracing::trace!(
        delimiter = ?score.dialect.delimiter,
        quote = %score.dialect.quote,
        escape = %score.dialect.escape,
        tier = ?score.tier,
        consistency = score.consistency,
        modal_width = score.modal_width,
        parsed = score.parsed_rows,
        malformed = score.malformed_rows,
        "scored candidate"
    );

    score
}

/// Score every candidate. Scoring fans out over the rayon pool; results come
/// back in candidate order.
pub fn score_all(lines: &[&str], candidates: &[Dialect]) -> Vec<DialectScore> {
    candidates
        .par_iter()
        .enumerate()
        .map(|(index, dialect)| score_dialect(lines, dialect, index))
        .collect()
}

/// Evidence rank of a quote or escape: used beats "none" beats unused.
fn evidence_rank(is_none: bool, evidence: usize) -> (u8, usize) {
    if is_none {
        (1, 0)
    } else if evidence > 0 {
        (2, evidence)
    } else {
        (0, 0)
    }
}

/// Total order over scores; `Greater` means `a` is the better candidate.
fn compare(a: &DialectScore, b: &DialectScore, policy: &GuessPolicy) -> Ordering {
    a.tier
        .cmp(&b.tier)
        .then_with(|| a.consistency.cmp(&b.consistency))
        .then_with(|| {
            policy
                .delimiter_rank(b.dialect.delimiter)
                .cmp(&policy.delimiter_rank(a.dialect.delimiter))
        })
        .then_with(|| {
            evidence_rank(a.dialect.quote == Quote::None, a.quote_evidence)
                .cmp(&evidence_rank(b.dialect.quote == Quote::None, b.quote_evidence))
        })
        .then_with(|| {
            evidence_rank(a.dialect.escape == Escape::None, a.escape_evidence)
                .cmp(&evidence_rank(b.dialect.escape == Escape::None, b.escape_evidence))
        })
        .then_with(|| b.index.cmp(&a.index))
}

/// Pick the best scored candidate, or `None` if every candidate is
/// disqualified.
pub fn find_best<'a>(scores: &'a [DialectScore], policy: &GuessPolicy) -> Option<&'a DialectScore> {
    scores
        .iter()
        .filter(|s| s.tier != Tier::Disqualified)
        .max_by(|a, b| compare(a, b, policy))
}
