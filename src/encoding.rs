//! Encoding detection and transcoding using chardetng and `encoding_rs`.

use std::borrow::Cow;

use chardetng::EncodingDetector;
use simdutf8::basic::from_utf8;

/// Check if the given bytes are valid UTF-8.
///
/// Uses SIMD-accelerated validation for performance.
pub fn is_utf8(data: &[u8]) -> bool {
    from_utf8(data).is_ok()
}

/// Check if the data starts with a UTF-8 BOM (Byte Order Mark).
pub fn has_utf8_bom(data: &[u8]) -> bool {
    data.starts_with(&[0xEF, 0xBB, 0xBF])
}

/// Skip the UTF-8 BOM if present and return the remaining data.
pub fn skip_bom(data: &[u8]) -> &[u8] {
    if has_utf8_bom(data) { &data[3..] } else { data }
}

/// Decode raw file bytes into UTF-8 text.
///
/// UTF-8 input (with or without BOM) is borrowed as-is. UTF-16 input is
/// recognized by its BOM; anything else is guessed with chardetng and
/// transcoded. Returns the text and the name of the source encoding.
pub fn decode_text(data: &[u8]) -> (Cow<'_, str>, &'static str) {
    if data.starts_with(&[0xFF, 0xFE]) {
        let (decoded, _, _) = encoding_rs::UTF_16LE.decode(data);
        return (Cow::Owned(decoded.into_owned()), encoding_rs::UTF_16LE.name());
    }
    if data.starts_with(&[0xFE, 0xFF]) {
        let (decoded, _, _) = encoding_rs::UTF_16BE.decode(data);
        return (Cow::Owned(decoded.into_owned()), encoding_rs::UTF_16BE.name());
    }

    let data = skip_bom(data);
    if let Ok(text) = from_utf8(data) {
        return (Cow::Borrowed(text), encoding_rs::UTF_8.name());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let encoding = detector.guess(None, true);

    let (decoded, _, had_errors) = encoding.decode(data);
    if had_errors {
        tracing::warn!(
            encoding = encoding.name(),
            "input is not valid in the detected encoding; invalid bytes were replaced"
        );
    }
    (Cow::Owned(decoded.into_owned()), encoding.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_utf8() {
        assert!(is_utf8(b"Hello, World!"));
        assert!(is_utf8("こんにちは".as_bytes()));
        assert!(!is_utf8(&[0xFF, 0xFE]));
    }

    #[test]
    fn test_utf8_bom() {
        let with_bom = [0xEF, 0xBB, 0xBF, b'a', b'b', b'c'];
        assert!(has_utf8_bom(&with_bom));
        assert_eq!(skip_bom(&with_bom), b"abc");
        assert_eq!(skip_bom(b"abc"), b"abc");
    }

    #[test]
    fn test_decode_utf8_borrows() {
        let (text, encoding) = decode_text(b"id,name\n1,a\n");
        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(text, "id,name\n1,a\n");
        assert_eq!(encoding, "UTF-8");
    }

    #[test]
    fn test_decode_strips_utf8_bom() {
        let (text, _) = decode_text(&[0xEF, 0xBB, 0xBF, b'i', b'd']);
        assert_eq!(text, "id");
    }

    #[test]
    fn test_decode_utf16_le() {
        let data: &[u8] = &[0xFF, 0xFE, b'H', 0x00, b'i', 0x00];
        let (text, encoding) = decode_text(data);
        assert_eq!(text, "Hi");
        assert_eq!(encoding, "UTF-16LE");
    }

    #[test]
    fn test_decode_windows1251() {
        // "Привет" in Windows-1251
        let data: &[u8] = &[0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        let (text, encoding) = decode_text(data);
        assert!(matches!(text, Cow::Owned(_)));
        assert_ne!(encoding, "UTF-8");
    }
}
