/*!
 * Character encoding detection and conversion for resource documents.
 *
 * Detection follows the XML rules in order: byte-order mark, then the
 * `encoding` pseudo-attribute of the declaration, then UTF-8.
 */

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

use crate::errors::DocumentError;

static DECLARED_ENCODING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*<\?xml[^>]*?\sencoding\s*=\s*["']([A-Za-z0-9._:-]+)["']"#)
        .expect("valid declaration regex")
});

/// Encoding of a document as found on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    /// Character encoding
    pub encoding: &'static Encoding,
    /// Whether the file started with a byte-order mark
    pub has_bom: bool,
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self { encoding: UTF_8, has_bom: false }
    }
}

impl TextEncoding {
    /// Detect the encoding of raw document bytes.
    pub fn detect(bytes: &[u8]) -> Result<Self, DocumentError> {
        if let Some((encoding, _)) = Encoding::for_bom(bytes) {
            return Ok(Self { encoding, has_bom: true });
        }

        // UTF-16 without a BOM still has to start with "<?"
        if bytes.starts_with(&[0x3C, 0x00, 0x3F, 0x00]) {
            return Ok(Self { encoding: UTF_16LE, has_bom: false });
        }
        if bytes.starts_with(&[0x00, 0x3C, 0x00, 0x3F]) {
            return Ok(Self { encoding: UTF_16BE, has_bom: false });
        }

        let head = String::from_utf8_lossy(&bytes[..bytes.len().min(1024)]);
        let Some(label) = DECLARED_ENCODING_RE.captures(&head).and_then(|c| c.get(1)) else {
            return Ok(Self::default());
        };

        let encoding = Encoding::for_label(label.as_str().as_bytes()).ok_or_else(|| {
            DocumentError::Parse(format!("unsupported encoding '{}' in XML declaration", label.as_str()))
        })?;

        // An ASCII-compatible byte stream cannot really be UTF-16
        let encoding = if encoding == UTF_16LE || encoding == UTF_16BE { UTF_8 } else { encoding };
        Ok(Self { encoding, has_bom: false })
    }

    /// Decode document bytes into text, rejecting malformed sequences.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, DocumentError> {
        let body = if self.has_bom { &bytes[self.bom().len()..] } else { bytes };
        self.encoding
            .decode_without_bom_handling_and_without_replacement(body)
            .ok_or_else(|| DocumentError::Parse(format!("input is not valid {}", self.encoding.name())))
    }

    /// Encode text back into this encoding.
    ///
    /// Returns the bytes (BOM included when the source had one) and whether
    /// some characters had to be written as numeric character references.
    pub fn encode(&self, text: &str) -> (Vec<u8>, bool) {
        let mut out = Vec::with_capacity(text.len() + 3);
        if self.has_bom {
            out.extend_from_slice(self.bom());
        }

        if self.encoding == UTF_16LE {
            out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
            return (out, false);
        }
        if self.encoding == UTF_16BE {
            out.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
            return (out, false);
        }

        let (bytes, _, had_unmappable) = self.encoding.encode(text);
        out.extend_from_slice(&bytes);
        (out, had_unmappable)
    }

    /// Label written in a generated XML declaration.
    pub fn declaration_label(&self) -> String {
        if self.encoding == UTF_16LE || self.encoding == UTF_16BE {
            "utf-16".to_string()
        } else {
            self.encoding.name().to_lowercase()
        }
    }

    fn bom(&self) -> &'static [u8] {
        if self.encoding == UTF_16LE {
            &[0xFF, 0xFE]
        } else if self.encoding == UTF_16BE {
            &[0xFE, 0xFF]
        } else {
            &[0xEF, 0xBB, 0xBF]
        }
    }
}
