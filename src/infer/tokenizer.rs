//! Splitting sample lines into rows and cells under one dialect.

use crate::dialect::{Dialect, Escape};

/// One cell of a parsed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Cell text with quotes and escapes removed. Unquoted cells keep their
    /// surrounding whitespace.
    pub value: String,
    /// Whether the cell was written as a quoted value.
    pub quoted: bool,
}

impl Cell {
    /// Returns true if the cell holds nothing but whitespace.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// A row tokenized under one dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    /// Index of the first sample line of this row.
    pub line: usize,
    pub cells: Vec<Cell>,
    /// Escape sequences consumed while tokenizing.
    pub escapes: usize,
}

impl ParsedRow {
    /// Row width (cell count).
    #[inline]
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Returns true for an empty or whitespace-only line.
    pub fn is_blank(&self) -> bool {
        matches!(self.cells.as_slice(), [cell] if !cell.quoted && cell.is_blank())
    }

    /// Number of quoted cells.
    pub fn quoted_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.quoted).count()
    }
}

/// Why a row could not be tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// A quoted value is still open at the end of the sample.
    UnterminatedQuote,
    /// Something other than whitespace or a delimiter follows a closing quote.
    TrailingAfterQuote,
}

/// A row that failed to tokenize. It is excluded from scoring, not fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedRow {
    /// Index of the first sample line of the row.
    pub line: usize,
    pub kind: MalformedKind,
}

pub type RowResult = Result<ParsedRow, MalformedRow>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// At the start of a cell, possibly after spaces.
    CellStart,
    Unquoted,
    Quoted,
    /// After the closing quote of a quoted cell.
    AfterQuote,
}

/// A backslash only counts as escape evidence before a character that would
/// otherwise end or split the value.
#[inline]
fn is_escapable(c: char, delimiter: char, quote: Option<char>) -> bool {
    c == delimiter || c == '\\' || Some(c) == quote
}

/// Lazy iterator over the rows of `lines` under `dialect`.
///
/// Cloning the iterator (or calling [`tokenize`] again) restarts it.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    lines: &'a [&'a str],
    dialect: &'a Dialect,
    next_line: usize,
}

/// Tokenize `lines` under `dialect`.
pub fn tokenize<'a>(lines: &'a [&'a str], dialect: &'a Dialect) -> Tokenizer<'a> {
    Tokenizer {
        lines,
        dialect,
        next_line: 0,
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = RowResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_line >= self.lines.len() {
            return None;
        }
        Some(self.read_row())
    }
}

impl Tokenizer<'_> {
    fn read_row(&mut self) -> RowResult {
        let delimiter = self.dialect.delimiter;
        let quote = self.dialect.quote.char();
        let escape = self.dialect.escape;

        let start = self.next_line;
        let mut cells = Vec::new();
        let mut field = String::new();
        let mut quoted = false;
        let mut escapes = 0;
        let mut state = State::CellStart;

        loop {
            let line = self.lines[self.next_line];
            self.next_line += 1;
            let mut chars = line.chars().peekable();

            while let Some(c) = chars.next() {
                match state {
                    State::CellStart | State::Unquoted => {
                        if c == delimiter {
                            cells.push(Cell {
                                value: std::mem::take(&mut field),
                                quoted: false,
                            });
                            state = State::CellStart;
                        } else if escape == Escape::Backslash && c == '\\' {
                            match chars.next() {
                                Some(next) => {
                                    field.push(next);
                                    if is_escapable(next, delimiter, quote) {
                                        escapes += 1;
                                    }
                                }
                                None => field.push(c),
                            }
                            state = State::Unquoted;
                        } else if state == State::CellStart && Some(c) == quote {
                            // leading spaces before an opening quote are dropped
                            field.clear();
                            quoted = true;
                            state = State::Quoted;
                        } else {
                            field.push(c);
                            if !matches!(c, ' ' | '\t') {
                                state = State::Unquoted;
                            }
                        }
                    }
                    State::Quoted => {
                        if Some(c) == quote {
                            if escape == Escape::Doubled && chars.peek() == Some(&c) {
                                chars.next();
                                field.push(c);
                                escapes += 1;
                            } else {
                                state = State::AfterQuote;
                            }
                        } else if escape == Escape::Backslash && c == '\\' {
                            match chars.next() {
                                Some(next) => {
                                    field.push(next);
                                    if is_escapable(next, delimiter, quote) {
                                        escapes += 1;
                                    }
                                }
                                None => field.push(c),
                            }
                        } else {
                            field.push(c);
                        }
                    }
                    State::AfterQuote => {
                        if c == delimiter {
                            cells.push(Cell {
                                value: std::mem::take(&mut field),
                                quoted,
                            });
                            quoted = false;
                            state = State::CellStart;
                        } else if !matches!(c, ' ' | '\t') {
                            return Err(MalformedRow {
                                line: start,
                                kind: MalformedKind::TrailingAfterQuote,
                            });
                        }
                    }
                }
            }

            if state != State::Quoted {
                break;
            }
            if self.next_line >= self.lines.len() {
                return Err(MalformedRow {
                    line: start,
                    kind: MalformedKind::UnterminatedQuote,
                });
            }
            // the quoted value continues on the next line
            field.push('\n');
        }

        cells.push(Cell {
            value: field,
            quoted,
        });

        Ok(ParsedRow {
            line: start,
            cells,
            escapes,
        })
    }
}
