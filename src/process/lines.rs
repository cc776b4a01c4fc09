// src/process/lines.rs
use serde::Deserialize;
use std::{borrow::Cow, fmt, fs, path::Path, str::FromStr};
use tracing::{debug, warn};

use crate::error::{ConvertError, Result};

/// Character encodings the line loader knows how to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum TextEncoding {
    /// UTF-8, dropping a leading byte-order mark.
    Utf8Sig,
    Utf8,
    Windows1252,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
}

impl TextEncoding {
    pub const DEFAULT_PRIORITY: [TextEncoding; 4] = [
        TextEncoding::Utf8Sig,
        TextEncoding::Utf8,
        TextEncoding::Windows1252,
        TextEncoding::Latin1,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Windows1252 => "windows-1252",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Decode without substitution; `None` when the bytes are malformed.
    fn decode_strict(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        match self {
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                encoding_rs::UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            TextEncoding::Utf8 => {
                encoding_rs::UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
            }
            TextEncoding::Windows1252 => encoding_rs::WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes),
            TextEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes)),
        }
    }

    /// Decode substituting U+FFFD for malformed input. Never fails.
    fn decode_lossy(self, bytes: &[u8]) -> Cow<'_, str> {
        match self {
            TextEncoding::Utf8Sig => encoding_rs::UTF_8.decode_with_bom_removal(bytes).0,
            TextEncoding::Utf8 => encoding_rs::UTF_8.decode_without_bom_handling(bytes).0,
            TextEncoding::Windows1252 => {
                encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes).0
            }
            TextEncoding::Latin1 => encoding_rs::mem::decode_latin1(bytes),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8-sig" | "utf8-sig" => Ok(TextEncoding::Utf8Sig),
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "windows-1252" | "cp1252" => Ok(TextEncoding::Windows1252),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            other => Err(ConvertError::Config(format!("unknown encoding '{other}'"))),
        }
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = ConvertError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Decode `bytes` using the first encoding in `priority` that accepts them
/// cleanly, falling back to a lossy decode with the first encoding.
pub fn decode_text(bytes: &[u8], priority: &[TextEncoding]) -> (String, Option<TextEncoding>) {
    for &enc in priority {
        if let Some(text) = enc.decode_strict(bytes) {
            debug!(encoding = %enc, "decoded cleanly");
            return (text.into_owned(), Some(enc));
        }
    }
    let fallback = priority.first().copied().unwrap_or(TextEncoding::Utf8Sig);
    warn!(encoding = %fallback, "no encoding decoded cleanly, substituting invalid bytes");
    (fallback.decode_lossy(bytes).into_owned(), None)
}

/// Split text into lines on `\n`, `\r\n` or a lone `\r`.
///
/// Other Unicode line separators (form feed, U+2028 and the like) stay
/// inside the line; exports only ever use these three.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(pos) => {
                lines.push(rest[..pos].to_string());
                let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + skip..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }
    lines
}

/// Read the whole file and return its lines. The handle is released before
/// decoding starts.
#[tracing::instrument(level = "debug", skip(path, priority), fields(path = %path.as_ref().display()))]
pub fn read_lines<P: AsRef<Path>>(path: P, priority: &[TextEncoding]) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| ConvertError::unreadable(path, e))?;
    let (text, _) = decode_text(&bytes, priority);
    let lines = split_lines(&text);
    debug!(lines = lines.len(), bytes = bytes.len(), "read file");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_bom_is_stripped() {
        let (text, used) = decode_text(b"\xEF\xBB\xBFDate\tTemp", &TextEncoding::DEFAULT_PRIORITY);
        assert_eq!(text, "Date\tTemp");
        assert_eq!(used, Some(TextEncoding::Utf8Sig));
    }

    #[test]
    fn test_windows_1252_fallback() {
        // 0xB0 is the degree sign in cp1252 and invalid as UTF-8.
        let (text, used) = decode_text(b"Temp \xB0C", &TextEncoding::DEFAULT_PRIORITY);
        assert_eq!(text, "Temp °C");
        assert_eq!(used, Some(TextEncoding::Windows1252));
    }

    #[test]
    fn test_lossy_when_nothing_fits() {
        let (text, used) = decode_text(b"a\xFFb", &[TextEncoding::Utf8]);
        assert_eq!(text, "a\u{FFFD}b");
        assert_eq!(used, None);
    }

    #[test]
    fn test_split_lines_mixed_terminators() {
        assert_eq!(
            split_lines("a\r\nb\nc\rd"),
            vec!["a", "b", "c", "d"]
        );
        assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_split_lines_keeps_other_separators() {
        assert_eq!(
            split_lines("a\x0cb\u{2028}c\u{85}d\ne"),
            vec!["a\x0cb\u{2028}c\u{85}d", "e"]
        );
    }

    #[test]
    fn test_read_lines_from_file() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(b"header\r\nDate;X\r\n1;2\r\n")?;
        let lines = read_lines(tmp.path(), &TextEncoding::DEFAULT_PRIORITY)?;
        assert_eq!(lines, vec!["header", "Date;X", "1;2"]);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let err = read_lines("/definitely/not/here.txt", &TextEncoding::DEFAULT_PRIORITY)
            .unwrap_err();
        assert_eq!(err.kind(), "unreadable_file");
    }

    #[test]
    fn test_encoding_labels() {
        assert_eq!("CP1252".parse::<TextEncoding>().ok(), Some(TextEncoding::Windows1252));
        assert_eq!("utf_8_sig".parse::<TextEncoding>().ok(), Some(TextEncoding::Utf8Sig));
        assert!("ebcdic".parse::<TextEncoding>().is_err());
    }
}
