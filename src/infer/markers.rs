//! Null literal, comment line and preamble detection.

use super::tokenizer::ParsedRow;

/// Pick the null literal used by the sample.
///
/// The candidate that appears most often as a whole unquoted cell wins; ties
/// go to the earlier candidate. Padded cells only match when `trim` is on,
/// the same way they are read later. Returns `None` if no candidate occurs.
pub fn guess_null_string(rows: &[ParsedRow], candidates: &[String], trim: bool) -> Option<String> {
    let mut best: Option<(&String, usize)> = None;

    for candidate in candidates {
        let count = rows
            .iter()
            .flat_map(|row| &row.cells)
            .filter(|cell| {
                let value = if trim { cell.value.trim() } else { cell.value.as_str() };
                !cell.quoted && value == candidate.as_str()
            })
            .count();

        if count > 0 && best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((candidate, count));
        }
    }

    best.map(|(candidate, _)| candidate.clone())
}

/// Pick the comment line marker used by the sample.
///
/// A marker qualifies when it starts some, but not all, non-blank lines.
/// The first qualifying marker wins.
pub fn guess_comment_marker(lines: &[&str], markers: &[String]) -> Option<String> {
    let content: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| !line.trim().is_empty())
        .collect();

    markers
        .iter()
        .find(|marker| {
            let commented = content
                .iter()
                .filter(|line| line.starts_with(marker.as_str()))
                .count();
            commented > 0 && commented < content.len()
        })
        .cloned()
}

/// Lines that survive comment removal, with their original indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLines<'a> {
    pub lines: Vec<&'a str>,
    /// Original sample index of each kept line.
    pub origins: Vec<usize>,
}

impl<'a> ContentLines<'a> {
    /// Keep every line that does not start with `marker`.
    pub fn new(lines: &[&'a str], marker: Option<&str>) -> Self {
        let (origins, lines): (Vec<usize>, Vec<&'a str>) = lines
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, line)| marker.is_none_or(|m| !line.starts_with(m)))
            .unzip();
        Self { lines, origins }
    }

    /// Original sample index of kept line `index`.
    pub fn origin(&self, index: usize) -> usize {
        self.origins.get(index).copied().unwrap_or(index)
    }
}

/// Number of leading rows to skip before the table starts: the rows before
/// the first row of `width`, capped at `max_skip`.
pub fn count_preamble(rows: &[ParsedRow], width: usize, max_skip: usize) -> usize {
    rows.iter()
        .position(|row| row.width() == width)
        .unwrap_or(0)
        .min(max_skip)
}
