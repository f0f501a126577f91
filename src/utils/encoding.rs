//! Decoding config file bytes with a Latin-1 fallback.
//!
//! Properties files are traditionally ISO-8859-1, while most files written
//! today are UTF-8. Strategy:
//! 1. Strip a UTF-8 BOM if present
//! 2. Strict UTF-8 decoding (fast path)
//! 3. Fall back to Windows-1252, the superset browsers and `encoding_rs`
//!    use for the `iso-8859-1` label

use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

/// Decode raw config bytes to text. Never fails; undecodable input is not
/// possible with a single-byte fallback.
pub fn decode_config_bytes(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    tracing::debug!("Config file is not valid UTF-8, decoding as ISO-8859-1");
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_is_borrowed() {
        let decoded = decode_config_bytes("appName=billing".as_bytes());
        assert!(matches!(decoded, Cow::Borrowed("appName=billing")));
    }

    #[test]
    fn bom_is_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"apiKey=XYZ");
        assert_eq!(decode_config_bytes(&bytes), "apiKey=XYZ");
    }

    #[test]
    fn latin1_falls_back() {
        // "orgName=Caf\xe9" in ISO-8859-1
        let bytes = b"orgName=Caf\xe9";
        assert_eq!(decode_config_bytes(bytes), "orgName=Café");
    }
}
