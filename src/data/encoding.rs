//! Text Encoding Probe
//! Public-data CSV files arrive either as UTF-8 (often with a BOM) or in the
//! Korean legacy code page. Neither is declared, so both are tried in order.

use encoding_rs::{Encoding, EUC_KR, UTF_8};
use std::fmt;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Candidate encodings for the tariff CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, with or without a byte-order mark.
    Utf8,
    /// CP949 (windows-949), the superset of EUC-KR used by Korean Windows tools.
    Cp949,
}

impl TextEncoding {
    /// Order in which encodings are attempted.
    ///
    /// Strict UTF-8 goes first: Hangul in CP949 uses lead bytes that are UTF-8
    /// continuation bytes, so a legacy file never passes UTF-8 validation,
    /// whereas UTF-8 text can occasionally decode as (garbled) CP949.
    pub const PROBE_ORDER: [TextEncoding; 2] = [TextEncoding::Utf8, TextEncoding::Cp949];

    fn codec(self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Cp949 => EUC_KR,
        }
    }

    /// Decode `bytes` strictly. Returns `None` on any malformed sequence;
    /// replacement characters are never substituted.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        let bytes = match self {
            TextEncoding::Utf8 => bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes),
            TextEncoding::Cp949 => bytes,
        };
        self.codec()
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "UTF-8"),
            TextEncoding::Cp949 => write!(f, "CP949"),
        }
    }
}

/// Decode with the first candidate encoding that accepts the whole input.
pub fn decode_probed(bytes: &[u8]) -> Option<(String, TextEncoding)> {
    TextEncoding::PROBE_ORDER.iter().find_map(|&encoding| {
        let text = encoding.decode(bytes);
        if text.is_none() {
            tracing::debug!(%encoding, "decode attempt failed");
        }
        text.map(|text| (text, encoding))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp949_bytes(text: &str) -> Vec<u8> {
        let (bytes, _, had_errors) = EUC_KR.encode(text);
        assert!(!had_errors);
        bytes.into_owned()
    }

    #[test]
    fn test_utf8_is_tried_first() {
        let (text, encoding) = decode_probed("품명,값\n쌀,5\n".as_bytes()).unwrap();
        assert_eq!(encoding, TextEncoding::Utf8);
        assert_eq!(text, "품명,값\n쌀,5\n");
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("품명\n".as_bytes());
        let (text, encoding) = decode_probed(&bytes).unwrap();
        assert_eq!(encoding, TextEncoding::Utf8);
        assert_eq!(text, "품명\n");
    }

    #[test]
    fn test_cp949_fallback() {
        let bytes = cp949_bytes("품명,고율종가(미추천)\n참깨,630\n");
        assert!(TextEncoding::Utf8.decode(&bytes).is_none());

        let (text, encoding) = decode_probed(&bytes).unwrap();
        assert_eq!(encoding, TextEncoding::Cp949);
        assert_eq!(text, "품명,고율종가(미추천)\n참깨,630\n");
    }

    #[test]
    fn test_undecodable_input() {
        // 0x80 is neither valid UTF-8 nor a CP949 lead byte; 0xFF is invalid in both.
        assert!(decode_probed(&[0x41, 0x80, 0xFF, 0xFF]).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(TextEncoding::Utf8.to_string(), "UTF-8");
        assert_eq!(TextEncoding::Cp949.to_string(), "CP949");
    }
}
