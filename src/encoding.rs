//! Decoding raw sample bytes to text using chardetng and `encoding_rs`.

use std::borrow::Cow;

use chardetng::EncodingDetector;
use simdutf8::basic::from_utf8;

use crate::error::{GuessError, Result};

/// Check if the given bytes are valid UTF-8.
///
/// Uses SIMD-accelerated validation for performance.
pub fn is_utf8(data: &[u8]) -> bool {
    from_utf8(data).is_ok()
}

/// Check if the data starts with a UTF-8 BOM (Byte Order Mark).
fn has_utf8_bom(data: &[u8]) -> bool {
    data.starts_with(&[0xEF, 0xBB, 0xBF])
}

/// Skip the UTF-8 BOM if present and return the remaining data.
pub fn skip_bom(data: &[u8]) -> &[u8] {
    if has_utf8_bom(data) { &data[3..] } else { data }
}

/// Decode sample bytes to text.
///
/// Valid UTF-8 is borrowed as-is (minus a BOM). UTF-16 with a BOM and legacy
/// single/multi-byte encodings are transcoded. Text that still contains NUL
/// characters after decoding is binary data and cannot be guessed.
pub fn decode(data: &[u8]) -> Result<Cow<'_, str>> {
    let text = transcode(data);

    if text.contains('\0') {
        return Err(GuessError::Undecodable(
            "sample contains NUL characters".to_string(),
        ));
    }

    Ok(text)
}

fn transcode(data: &[u8]) -> Cow<'_, str> {
    // chardetng doesn't handle UTF-16 BOMs well
    if data.starts_with(&[0xFF, 0xFE]) {
        let (decoded, _, _) = encoding_rs::UTF_16LE.decode(data);
        return Cow::Owned(decoded.into_owned());
    }
    if data.starts_with(&[0xFE, 0xFF]) {
        let (decoded, _, _) = encoding_rs::UTF_16BE.decode(data);
        return Cow::Owned(decoded.into_owned());
    }

    let data = skip_bom(data);
    if let Ok(text) = from_utf8(data) {
        return Cow::Borrowed(text);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let encoding = detector.guess(None, true);
    tracing::debug!(encoding = encoding.name(), "transcoding sample");

    let (decoded, _, _) = encoding.decode(data);
    Cow::Owned(decoded.into_owned())
}
