//! Compiled regex patterns shared by the inference passes.

use regex::Regex;
use std::sync::LazyLock;

/// Floating point number: optional sign, digits with an optional fraction,
/// optional exponent. Integers match too.
pub static DOUBLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?$").expect("Invalid double pattern")
});

/// ISO-8601 zoned date-time with `T` separator, fraction and `+hh:mm` offset.
pub static ISO_T_FRACTION_COLON_ZONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{1,9}[+-]\d{2}:\d{2}$")
        .expect("Invalid ISO zoned pattern")
});

/// ISO-8601 zoned date-time with `T` separator and `+hh:mm` offset.
pub static ISO_T_COLON_ZONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}[+-]\d{2}:\d{2}$")
        .expect("Invalid ISO zoned pattern")
});

/// ISO-8601 UTC date-time with fraction and `Z` suffix.
pub static ISO_T_FRACTION_UTC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{1,9}Z$").expect("Invalid ISO UTC pattern")
});

/// ISO-8601 UTC date-time with `Z` suffix.
pub static ISO_T_UTC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$").expect("Invalid ISO UTC pattern")
});

/// Space-separated date-time with fraction and `+hhmm` offset.
pub static SPACE_FRACTION_ZONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{1,9} [+-]\d{4}$")
        .expect("Invalid zoned pattern")
});

/// Space-separated date-time with `+hhmm` offset.
pub static SPACE_ZONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} [+-]\d{4}$").expect("Invalid zoned pattern")
});

/// ISO-8601 local date-time with `T` separator and fraction.
pub static ISO_T_FRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{1,9}$").expect("Invalid ISO pattern")
});

/// Space-separated local date-time with fraction.
pub static SPACE_FRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{1,9}$").expect("Invalid ISO pattern")
});

/// ISO-8601 local date-time with `T` separator.
pub static ISO_T: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$").expect("Invalid ISO pattern")
});

/// Space-separated local date-time.
pub static SPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").expect("Invalid ISO pattern")
});

/// ISO-8601 date (YYYY-MM-DD).
pub static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid ISO date pattern"));

/// Slash-separated year-first date-time (YYYY/MM/DD HH:MM:SS).
pub static SLASH_YMD_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}/\d{1,2}/\d{1,2} \d{2}:\d{2}:\d{2}$").expect("Invalid slash pattern")
});

/// Slash-separated year-first date (YYYY/MM/DD).
pub static SLASH_YMD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}/\d{1,2}/\d{1,2}$").expect("Invalid slash pattern"));

/// Slash-separated year-last date-time (MM/DD/YYYY or DD/MM/YYYY, with time).
pub static SLASH_YEAR_LAST_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}/\d{1,2}/\d{4} \d{2}:\d{2}:\d{2}$").expect("Invalid slash pattern")
});

/// Slash-separated year-last date (MM/DD/YYYY or DD/MM/YYYY).
pub static SLASH_YEAR_LAST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("Invalid slash pattern"));

/// Dotted day-first date (DD.MM.YYYY).
pub static DOTTED_DMY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}\.\d{1,2}\.\d{4}$").expect("Invalid dotted pattern"));

/// RFC 2822 date-time (`Tue, 03 Jan 2017 10:00:00 +0000`).
pub static RFC_2822: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]{2}, \d{2} [A-Z][a-z]{2} \d{4} \d{2}:\d{2}:\d{2} [+-]\d{4}$")
        .expect("Invalid RFC 2822 pattern")
});
