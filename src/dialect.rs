use serde::{Deserialize, Serialize};
use std::fmt;

/// CSV dialect: how a sample is split into rows and cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dialect {
    /// Field delimiter character.
    pub delimiter: char,
    /// Quote character configuration.
    pub quote: Quote,
    /// How a literal quote (or delimiter) is written inside a value.
    pub escape: Escape,
    /// Literal that stands for a missing value, if the sample uses one.
    pub null_string: Option<String>,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: Quote::Some('"'),
            escape: Escape::Doubled,
            null_string: None,
        }
    }
}

impl Dialect {
    /// Create a new Dialect without a null literal.
    pub const fn new(delimiter: char, quote: Quote, escape: Escape) -> Self {
        Self {
            delimiter,
            quote,
            escape,
            null_string: None,
        }
    }

    /// Build a `csv` reader configured for this dialect.
    ///
    /// Returns `None` when the delimiter or quote is not a single byte, which
    /// the `csv` crate cannot express.
    pub fn reader_builder(&self, trim: bool) -> Option<csv::ReaderBuilder> {
        let delimiter = ascii_byte(self.delimiter)?;

        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true);

        match self.quote {
            Quote::None => {
                builder.quoting(false);
            }
            Quote::Some(q) => {
                builder.quoting(true).quote(ascii_byte(q)?);
            }
        }

        match self.escape {
            Escape::Doubled => {
                builder.double_quote(true).escape(None);
            }
            Escape::Backslash => {
                builder.double_quote(false).escape(Some(b'\\'));
            }
            Escape::None => {
                builder.double_quote(false).escape(None);
            }
        }

        if trim {
            builder.trim(csv::Trim::Fields);
        }

        Some(builder)
    }
}

fn ascii_byte(c: char) -> Option<u8> {
    c.is_ascii().then_some(c as u8)
}

/// Quote character configuration.
///
/// In configuration files the quote is a one-character string, or the empty
/// string for no quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Quote {
    /// No quoting.
    None,
    /// Quote with the specified character.
    Some(char),
}

impl Default for Quote {
    fn default() -> Self {
        Quote::Some('"')
    }
}

impl Quote {
    /// Returns the quote character if set.
    pub fn char(&self) -> Option<char> {
        match self {
            Quote::None => None,
            Quote::Some(c) => Some(*c),
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quote::None => write!(f, "none"),
            Quote::Some(c) => write!(f, "{c}"),
        }
    }
}

impl TryFrom<String> for Quote {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Quote::None),
            (Some(c), None) => Ok(Quote::Some(c)),
            _ => Err(format!("quote must be a single character, got {value:?}")),
        }
    }
}

impl From<Quote> for String {
    fn from(quote: Quote) -> Self {
        quote.char().map(String::from).unwrap_or_default()
    }
}

/// Escape convention inside quoted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Escape {
    /// A doubled quote stands for one literal quote (`"a""b"`).
    Doubled,
    /// A backslash makes the next character literal (`"a\"b"`, `a\,b`).
    Backslash,
    /// No escaping.
    None,
}

impl Escape {
    /// Whether this escape can only be meaningful with a quote character.
    pub const fn requires_quote(&self) -> bool {
        matches!(self, Escape::Doubled)
    }
}

impl fmt::Display for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Escape::Doubled => write!(f, "doubled"),
            Escape::Backslash => write!(f, "backslash"),
            Escape::None => write!(f, "none"),
        }
    }
}
