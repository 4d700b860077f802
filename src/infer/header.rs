//! Header row detection by type contrast.

use super::type_detection::infer_column_types;
use crate::field_type::ColumnType;
use crate::sample::DatePreference;

/// Decide whether row 0 of `rows` is a header.
///
/// Row 0 is a header when every one of its columns types as String while
/// the remaining rows type differently, i.e. at least one column is more
/// specific below the first row. A single row is always data.
pub fn detect_header(rows: &[Vec<String>], width: usize, preference: DatePreference) -> bool {
    let Some((first, rest)) = rows.split_first() else {
        return false;
    };
    if rest.is_empty() {
        return false;
    }

    let first_types = infer_column_types(std::slice::from_ref(first), width, preference);
    if !first_types.iter().all(ColumnType::is_string) {
        return false;
    }

    let rest_types = infer_column_types(rest, width, preference);
    rest_types
        .iter()
        .zip(&first_types)
        .any(|(below, first)| below.specificity() < first.specificity())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn header(data: &[&[&str]]) -> bool {
        let rows = rows(data);
        let width = rows.first().map_or(0, Vec::len);
        detect_header(&rows, width, DatePreference::MdyFormat)
    }

    #[test]
    fn test_header_contrast() {
        assert!(header(&[&["name", "age"], &["alice", "30"]]));
    }

    #[test]
    fn test_numeric_first_row_is_data() {
        assert!(!header(&[&["1", "2"], &["3", "4"]]));
    }

    #[test]
    fn test_single_row_is_data() {
        assert!(!header(&[&["name", "age"]]));
    }

    #[test]
    fn test_all_string_rows_are_data() {
        assert!(!header(&[&["a", "b"], &["c", "d"], &["e", "f"]]));
    }

    #[test]
    fn test_blank_header_cell_still_string() {
        assert!(header(&[&["id", ""], &["1", "x"], &["2", "y"]]));
    }
}
