use std::io::Read;

use crate::encoding::decode;
use crate::error::Result;

/// Bounds on how much of a source is captured for guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSize {
    /// Maximum number of lines kept.
    pub lines: usize,
    /// Maximum number of bytes read from the source.
    pub bytes: usize,
}

impl Default for SampleSize {
    fn default() -> Self {
        Self {
            lines: 100,
            bytes: 32 * 1024,
        }
    }
}

impl SampleSize {
    /// Create sample bounds.
    pub const fn new(lines: usize, bytes: usize) -> Self {
        Self { lines, bytes }
    }
}

/// Date format preference for ambiguous dates such as `01/02/2023`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePreference {
    /// Day-Month-Year format (e.g., 31/12/2023).
    DmyFormat,
    /// Month-Day-Year format (e.g., 12/31/2023).
    #[default]
    MdyFormat,
}

impl DatePreference {
    /// Returns true if day comes before month in ambiguous dates.
    pub fn is_dmy(&self) -> bool {
        matches!(self, DatePreference::DmyFormat)
    }
}

/// Captured prefix of a file's text, split into lines.
///
/// Line terminators (`\n`, `\r\n`, `\r`) are not part of the lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sample {
    lines: Vec<String>,
}

impl Sample {
    /// Create a sample from already split lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a sample by splitting text on line terminators.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: split_lines(text).map(str::to_string).collect(),
        }
    }

    /// Create a sample from raw bytes, decoding them to text first.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self::from_text(&decode(data)?))
    }

    /// Capture a bounded sample from a reader.
    ///
    /// When the byte bound cuts the input, the trailing partial line is
    /// dropped so every captured line is complete.
    pub fn read<R: Read>(reader: R, size: SampleSize) -> Result<Self> {
        let mut buffer = Vec::with_capacity(size.bytes.min(64 * 1024));
        reader
            .take(size.bytes as u64 + 1)
            .read_to_end(&mut buffer)?;

        if buffer.len() > size.bytes {
            buffer.truncate(size.bytes);
            let cut = buffer
                .iter()
                .rposition(|&b| b == b'\n' || b == b'\r')
                .map_or(0, |i| i + 1);
            buffer.truncate(cut);
        }

        let text = decode(&buffer)?;
        Ok(Self {
            lines: split_lines(&text)
                .take(size.lines)
                .map(str::to_string)
                .collect(),
        })
    }

    /// The captured lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of captured lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if no line was captured.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Split text on `\n`, `\r\n` and `\r`. A trailing terminator does not
/// produce an empty last line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\n', '\r']) {
            Some(i) => {
                let line = &rest[..i];
                let skip = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_from_text_line_endings() {
        let sample = Sample::from_text("a,b\r\n1,2\r3,4\n\n5,6\n");
        assert_eq!(sample.lines(), &["a,b", "1,2", "3,4", "", "5,6"]);
    }

    #[test]
    fn test_read_line_bound() {
        let data = b"a,b\n1,2\n3,4\n5,6\n";
        let sample = Sample::read(Cursor::new(data), SampleSize::new(2, 1024)).unwrap();
        assert_eq!(sample.lines(), &["a,b", "1,2"]);
    }

    #[test]
    fn test_read_byte_bound_drops_partial_line() {
        let data = b"name,age\nAlice,30\nBob,25\n";
        let sample = Sample::read(Cursor::new(data), SampleSize::new(100, 20)).unwrap();
        assert_eq!(sample.lines(), &["name,age", "Alice,30"]);
    }

    #[test]
    fn test_read_exact_byte_bound_keeps_everything() {
        let data = b"a,b\n1,2";
        let sample = Sample::read(Cursor::new(data), SampleSize::new(100, 7)).unwrap();
        assert_eq!(sample.lines(), &["a,b", "1,2"]);
    }

    #[test]
    fn test_from_bytes_skips_bom() {
        let mut data = vec![0xEF, 0xBB, 0xBF];
        data.extend_from_slice(b"a,b\n");
        let sample = Sample::from_bytes(&data).unwrap();
        assert_eq!(sample.lines(), &["a,b"]);
    }

    #[test]
    fn test_empty() {
        assert!(Sample::from_text("").is_empty());
        assert_eq!(Sample::from_lines(["x"]).len(), 1);
    }
}
