//! Text decoding for lyrics files
//!
//! Plenty of LRC files in the wild are saved in a legacy code page rather
//! than UTF-8. Decoding tries, in order: a byte order mark, strict UTF-8,
//! then common legacy encodings, and finally lossy UTF-8.

use encoding_rs::{BIG5, EUC_JP, EUC_KR, Encoding, GBK, SHIFT_JIS, WINDOWS_1252};

/// Decode raw lyrics bytes into text
pub fn decode_lyrics(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    // Most likely first
    let fallbacks = [GBK, BIG5, SHIFT_JIS, EUC_JP, EUC_KR, WINDOWS_1252];
    for encoding in fallbacks {
        let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
        if !had_errors && looks_like_text(&text) {
            tracing::debug!("Decoded lyrics as {}", encoding.name());
            return text.into_owned();
        }
    }

    tracing::warn!("Lyrics are not in a recognised encoding, decoding lossily");
    String::from_utf8_lossy(bytes).into_owned()
}

/// Rejects decodes full of control or private-use characters
fn looks_like_text(s: &str) -> bool {
    let suspicious = s
        .chars()
        .filter(|&c| {
            (c < ' ' && !matches!(c, '\t' | '\n' | '\r')) || ('\u{E000}'..='\u{F8FF}').contains(&c)
        })
        .count();
    suspicious <= (s.len() / 20).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough() {
        let input = "[00:01.00]你好 world";
        assert_eq!(decode_lyrics(input.as_bytes()), input);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"[00:01.00]hi");
        assert_eq!(decode_lyrics(&bytes), "[00:01.00]hi");
    }

    #[test]
    fn test_gbk_fallback() {
        // "[00:01.00]周杰伦" with the name in GBK
        let mut bytes = b"[00:01.00]".to_vec();
        bytes.extend_from_slice(&[0xD6, 0xDC, 0xBD, 0xDC, 0xC2, 0xD7]);
        assert_eq!(decode_lyrics(&bytes), "[00:01.00]周杰伦");
    }

    #[test]
    fn test_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "[00:02.00]ok".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_lyrics(&bytes), "[00:02.00]ok");
    }
}
