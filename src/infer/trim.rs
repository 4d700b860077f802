//! Whitespace trim policy and cell value preparation.

use super::tokenizer::ParsedRow;
use super::type_detection::infer_column_types;
use crate::sample::DatePreference;

/// Turn parsed rows into the values seen by type inference.
///
/// With `trim`, unquoted values lose leading and trailing whitespace. Unquoted
/// cells equal to the null literal become blank. Quoted cells are kept as
/// written.
pub fn prepare_rows(
    rows: &[ParsedRow],
    trim: bool,
    null_string: Option<&str>,
) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| {
                    if cell.quoted {
                        return cell.value.clone();
                    }
                    let value = if trim {
                        cell.value.trim()
                    } else {
                        cell.value.as_str()
                    };
                    if null_string == Some(value) {
                        String::new()
                    } else {
                        value.to_string()
                    }
                })
                .collect()
        })
        .collect()
}

/// Decide whether unquoted values need trimming.
///
/// Looks at the rows after row 0 (row 0 alone when it is the only row). Trim
/// is needed if trimming changes any column's type, or if some column's
/// non-blank unquoted values all carry surrounding whitespace.
pub fn detect_trim(
    rows: &[ParsedRow],
    width: usize,
    null_string: Option<&str>,
    preference: DatePreference,
) -> bool {
    let candidates = if rows.len() >= 2 { &rows[1..] } else { rows };
    if candidates.is_empty() {
        return false;
    }

    let raw = infer_column_types(&prepare_rows(candidates, false, null_string), width, preference);
    let trimmed = infer_column_types(&prepare_rows(candidates, true, null_string), width, preference);
    if raw != trimmed {
        tracing::debug!("trimming changes column types");
        return true;
    }

    (0..width).any(|column| {
        let mut values = candidates
            .iter()
            .filter_map(|row| row.cells.get(column))
            .filter(|cell| !cell.quoted && !cell.is_blank())
            .peekable();

        values.peek().is_some() && values.all(|cell| cell.value.trim() != cell.value)
    })
}
