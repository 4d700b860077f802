use std::fmt;

/// Type guessed for a CSV column.
///
/// Variants are listed from most to least specific. Every variant other than
/// `String` accepts all non-blank sample values of its column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ColumnType {
    /// Boolean literal (true/false, yes/no, on/off, t/f, y/n).
    Boolean,
    /// 64-bit signed integer.
    Long,
    /// Floating point number.
    Double,
    /// Timestamp with the format(s) that parse every sample value.
    Timestamp(TimestampFormat),
    /// Text (fallback type).
    #[default]
    String,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ColumnType {
    /// Name of the type as written in a column configuration.
    pub const fn name(&self) -> &'static str {
        match self {
            ColumnType::Boolean => "boolean",
            ColumnType::Long => "long",
            ColumnType::Double => "double",
            ColumnType::Timestamp(_) => "timestamp",
            ColumnType::String => "string",
        }
    }

    /// Position in the specificity order; lower is more specific.
    pub const fn specificity(&self) -> u8 {
        match self {
            ColumnType::Boolean => 0,
            ColumnType::Long => 1,
            ColumnType::Double => 2,
            ColumnType::Timestamp(_) => 3,
            ColumnType::String => 4,
        }
    }

    /// Returns true for the `String` fallback.
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, ColumnType::String)
    }

    /// Returns the timestamp format if this is a timestamp column.
    pub fn timestamp_format(&self) -> Option<&TimestampFormat> {
        match self {
            ColumnType::Timestamp(format) => Some(format),
            _ => None,
        }
    }
}

/// The format set reconciled for a timestamp column.
///
/// `format` is the representative strftime-style pattern. `alternates` are
/// other patterns of the same family that also occur in the sample, for
/// example the space-separated spelling of an ISO-8601 date-time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimestampFormat {
    /// Representative pattern.
    pub format: &'static str,
    /// Equally valid alternate spellings seen in the sample.
    pub alternates: Vec<&'static str>,
}

impl TimestampFormat {
    /// Create a format set with no alternates.
    pub const fn new(format: &'static str) -> Self {
        Self {
            format,
            alternates: Vec::new(),
        }
    }

    /// All patterns of the set, representative first.
    pub fn patterns(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.format).chain(self.alternates.iter().copied())
    }
}
