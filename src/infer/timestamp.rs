//! Timestamp format catalogue and cross-row format reconciliation.
//!
//! Each catalogue pattern belongs to a family of interchangeable spellings
//! (for example ISO-8601 date-times with a `T` or a space between date and
//! time). A column is a timestamp column when one family matches every
//! non-blank value, even if different rows use different spellings.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

use super::regexes::*;
use crate::field_type::TimestampFormat;
use crate::sample::DatePreference;

/// Families of compatible timestamp patterns, in default priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    IsoZoned,
    IsoLocal,
    IsoDate,
    SlashYmdTime,
    SlashYmd,
    MdyTime,
    DmyTime,
    Mdy,
    Dmy,
    DottedDmy,
    Rfc2822,
}

impl Family {
    #[inline]
    const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Priority rank; lower wins. Day-first preference swaps the ambiguous
    /// month-first and day-first families.
    fn rank(self, preference: DatePreference) -> u8 {
        let swapped = match (self, preference.is_dmy()) {
            (Family::MdyTime, true) => Family::DmyTime,
            (Family::DmyTime, true) => Family::MdyTime,
            (Family::Mdy, true) => Family::Dmy,
            (Family::Dmy, true) => Family::Mdy,
            (family, _) => family,
        };
        swapped as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Validation {
    /// Date, time and UTC offset.
    Zoned,
    /// Date and time without offset (a literal `Z` counts as text).
    Local,
    /// Date only.
    Date,
}

/// One catalogue entry.
#[derive(Debug)]
pub struct TimestampPattern {
    /// strftime-style format, as emitted in column configurations.
    pub format: &'static str,
    pub family: Family,
    /// Number of date/time fields the format pins down.
    pub fields: u8,
    shape: &'static LazyLock<Regex>,
    validation: Validation,
}

impl TimestampPattern {
    /// Whether `value` is written in this pattern and is a real calendar
    /// date/time.
    pub fn matches(&self, value: &str) -> bool {
        if !self.shape.is_match(value) {
            return false;
        }
        match self.validation {
            Validation::Zoned => DateTime::parse_from_str(value, self.format).is_ok(),
            Validation::Local => NaiveDateTime::parse_from_str(value, self.format).is_ok(),
            Validation::Date => NaiveDate::parse_from_str(value, self.format).is_ok(),
        }
    }
}

const fn pattern(
    format: &'static str,
    family: Family,
    fields: u8,
    shape: &'static LazyLock<Regex>,
    validation: Validation,
) -> TimestampPattern {
    TimestampPattern {
        format,
        family,
        fields,
        shape,
        validation,
    }
}

const CATALOGUE_LEN: usize = 19;

/// The catalogue, ISO-8601 first. Within a family, earlier entries win ties.
pub static CATALOGUE: [TimestampPattern; CATALOGUE_LEN] = [
    pattern("%Y-%m-%dT%H:%M:%S%.f%:z", Family::IsoZoned, 8, &ISO_T_FRACTION_COLON_ZONE, Validation::Zoned),
    pattern("%Y-%m-%dT%H:%M:%S%:z", Family::IsoZoned, 7, &ISO_T_COLON_ZONE, Validation::Zoned),
    pattern("%Y-%m-%dT%H:%M:%S%.fZ", Family::IsoZoned, 8, &ISO_T_FRACTION_UTC, Validation::Local),
    pattern("%Y-%m-%dT%H:%M:%SZ", Family::IsoZoned, 7, &ISO_T_UTC, Validation::Local),
    pattern("%Y-%m-%d %H:%M:%S%.f %z", Family::IsoZoned, 8, &SPACE_FRACTION_ZONE, Validation::Zoned),
    pattern("%Y-%m-%d %H:%M:%S %z", Family::IsoZoned, 7, &SPACE_ZONE, Validation::Zoned),
    pattern("%Y-%m-%dT%H:%M:%S%.f", Family::IsoLocal, 7, &ISO_T_FRACTION, Validation::Local),
    pattern("%Y-%m-%d %H:%M:%S%.f", Family::IsoLocal, 7, &SPACE_FRACTION, Validation::Local),
    pattern("%Y-%m-%dT%H:%M:%S", Family::IsoLocal, 6, &ISO_T, Validation::Local),
    pattern("%Y-%m-%d %H:%M:%S", Family::IsoLocal, 6, &SPACE, Validation::Local),
    pattern("%Y-%m-%d", Family::IsoDate, 3, &ISO_DATE, Validation::Date),
    pattern("%Y/%m/%d %H:%M:%S", Family::SlashYmdTime, 6, &SLASH_YMD_TIME, Validation::Local),
    pattern("%Y/%m/%d", Family::SlashYmd, 3, &SLASH_YMD, Validation::Date),
    pattern("%m/%d/%Y %H:%M:%S", Family::MdyTime, 6, &SLASH_YEAR_LAST_TIME, Validation::Local),
    pattern("%d/%m/%Y %H:%M:%S", Family::DmyTime, 6, &SLASH_YEAR_LAST_TIME, Validation::Local),
    pattern("%m/%d/%Y", Family::Mdy, 3, &SLASH_YEAR_LAST, Validation::Date),
    pattern("%d/%m/%Y", Family::Dmy, 3, &SLASH_YEAR_LAST, Validation::Date),
    pattern("%d.%m.%Y", Family::DottedDmy, 3, &DOTTED_DMY, Validation::Date),
    pattern("%a, %d %b %Y %H:%M:%S %z", Family::Rfc2822, 7, &RFC_2822, Validation::Zoned),
];

/// Reconcile the timestamp patterns of a column's values.
///
/// Returns `None` when no single family matches every value (or there are
/// no values). Values must already be non-blank.
pub fn merge_timestamp_formats(
    values: &[&str],
    preference: DatePreference,
) -> Option<TimestampFormat> {
    if values.is_empty() {
        return None;
    }

    let mut hits = [0usize; CATALOGUE_LEN];
    let mut families = u16::MAX;

    for value in values {
        let mut value_families = 0u16;
        for (i, p) in CATALOGUE.iter().enumerate() {
            if p.matches(value) {
                hits[i] += 1;
                value_families |= p.family.bit();
            }
        }

        families &= value_families;
        if families == 0 {
            return None;
        }
    }

    let best_fields = |family: Family| {
        CATALOGUE
            .iter()
            .zip(hits)
            .filter(|(p, h)| p.family == family && *h > 0)
            .map(|(p, _)| p.fields)
            .max()
            .unwrap_or(0)
    };

    // most specific family, then catalogue priority
    let family = CATALOGUE
        .iter()
        .map(|p| p.family)
        .filter(|f| families & f.bit() != 0)
        .max_by(|a, b| {
            best_fields(*a)
                .cmp(&best_fields(*b))
                .then_with(|| b.rank(preference).cmp(&a.rank(preference)))
        })?;

    let mut members: Vec<(usize, &TimestampPattern)> = CATALOGUE
        .iter()
        .enumerate()
        .filter(|(i, p)| p.family == family && hits[*i] > 0)
        .collect();

    let representative = members
        .iter()
        .copied()
        .max_by(|(ia, a), (ib, b)| {
            a.fields
                .cmp(&b.fields)
                .then_with(|| hits[*ia].cmp(&hits[*ib]))
                .then_with(|| ib.cmp(ia))
        })
        .map(|(i, _)| i)?;

    members.retain(|(i, _)| *i != representative);

    let mut format = TimestampFormat::new(CATALOGUE[representative].format);
    format.alternates = members.into_iter().map(|(_, p)| p.format).collect();
    Some(format)
}
