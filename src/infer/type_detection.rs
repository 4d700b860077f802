//! Column type inference over the type hierarchy.
//!
//! Each column is tried as Boolean, Long, Double, Timestamp and finally
//! String. A type is accepted only if every non-blank value of the column
//! parses under it.

use super::regexes::DOUBLE_PATTERN;
use super::timestamp::merge_timestamp_formats;
use crate::field_type::ColumnType;
use crate::sample::DatePreference;

/// Check for boolean literals using an exhaustive match instead of regex.
/// Digits are not booleans; `1`/`0` columns are Long.
#[inline]
pub fn is_boolean(s: &str) -> bool {
    match s.len() {
        1 => matches!(
            s.as_bytes()[0].to_ascii_lowercase(),
            b't' | b'f' | b'y' | b'n'
        ),
        2 => s.eq_ignore_ascii_case("on") || s.eq_ignore_ascii_case("no"),
        3 => s.eq_ignore_ascii_case("yes") || s.eq_ignore_ascii_case("off"),
        4 => s.eq_ignore_ascii_case("true"),
        5 => s.eq_ignore_ascii_case("false"),
        _ => false,
    }
}

/// Optional sign and digits only, within i64 range.
#[inline]
pub fn is_long(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) && s.parse::<i64>().is_ok()
}

/// Optional sign, digits, optional fraction and exponent.
#[inline]
pub fn is_double(s: &str) -> bool {
    DOUBLE_PATTERN.is_match(s)
}

/// Infer the type of one column from its values.
///
/// Blank values are wildcards. A column without any non-blank value is
/// String.
pub fn infer_column_type(values: &[&str], preference: DatePreference) -> ColumnType {
    let values: Vec<&str> = values
        .iter()
        .copied()
        .filter(|v| !v.trim().is_empty())
        .collect();

    if values.is_empty() {
        return ColumnType::String;
    }

    if values.iter().all(|v| is_boolean(v)) {
        ColumnType::Boolean
    } else if values.iter().all(|v| is_long(v)) {
        ColumnType::Long
    } else if values.iter().all(|v| is_double(v)) {
        ColumnType::Double
    } else if let Some(format) = merge_timestamp_formats(&values, preference) {
        ColumnType::Timestamp(format)
    } else {
        ColumnType::String
    }
}

/// Infer the type of every column of `rows`.
///
/// Rows shorter than `width` contribute nothing to the missing columns.
pub fn infer_column_types(
    rows: &[Vec<String>],
    width: usize,
    preference: DatePreference,
) -> Vec<ColumnType> {
    (0..width)
        .map(|column| {
            let values: Vec<&str> = rows
                .iter()
                .filter_map(|row| row.get(column))
                .map(String::as_str)
                .collect();

            if values.iter().all(|v| v.trim().is_empty()) {
                tracing::debug!(column, "no typeable values, column defaults to string");
            }

            infer_column_type(&values, preference)
        })
        .collect()
}
