//! `.resx` rendering.
//!
//! Output is the original source with the spans of modified values replaced.
//! Only the XML declaration may change beyond that: it is added when missing
//! and completed with an `encoding` when it had none.

use log::warn;
use quick_xml::escape::partial_escape;
use std::path::Path;

use super::model::ResourceDocument;
use crate::errors::DocumentError;
use crate::file_utils::FileManager;

impl ResourceDocument {
    /// Render the document as text, before encoding.
    pub fn render(&self) -> String {
        let source = self.source.as_str();
        let mut out = String::with_capacity(source.len() + 64);
        let mut cursor = 0;

        match &self.declaration {
            Some(decl) if decl.encoding.is_some() => {}
            Some(decl) => {
                out.push_str(&source[..decl.span.start]);
                out.push_str(&self.declaration_text(&decl.version, decl.standalone.as_deref()));
                cursor = decl.span.end;
            }
            None => {
                out.push_str(&self.declaration_text("1.0", None));
                out.push('\n');
            }
        }

        for entry in self.entries.iter().filter(|e| e.modified) {
            let (Some(span), Some(value)) = (&entry.value_span, &entry.value) else {
                continue;
            };
            out.push_str(&source[cursor..span.start]);
            out.push_str(&partial_escape(value.as_str()));
            cursor = span.end;
        }

        out.push_str(&source[cursor..]);
        out
    }

    /// Render and encode the document with its original encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let (bytes, had_unmappable) = self.encoding.encode(&self.render());
        if had_unmappable {
            warn!(
                "Some characters cannot be represented in {} and were written as character references",
                self.encoding.encoding.name()
            );
        }
        bytes
    }

    /// Write the document to `path`.
    ///
    /// The file is replaced atomically; on failure no partial output exists.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DocumentError> {
        let path = path.as_ref();
        FileManager::write_atomic(path, &self.to_bytes()).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn declaration_text(&self, version: &str, standalone: Option<&str>) -> String {
        let mut decl = format!(
            "<?xml version=\"{}\" encoding=\"{}\"",
            version,
            self.encoding.declaration_label()
        );
        if let Some(standalone) = standalone {
            decl.push_str(&format!(" standalone=\"{}\"", standalone));
        }
        decl.push_str("?>");
        decl
    }
}
