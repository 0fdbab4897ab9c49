//! `.resx` parsing.
//!
//! The reader walks the XML events once, checks that the document follows the
//! resx layout (`<root>` holding `<data name="...">` elements with optional
//! `<value>` and `<comment>` children) and records the byte span of every
//! value so the writer can patch values in place.

use quick_xml::{
    Reader,
    events::{BytesDecl, BytesStart, Event},
};
use std::ops::Range;

use super::encoding::TextEncoding;
use super::model::{Declaration, ResourceDocument, ResourceEntry};
use crate::errors::DocumentError;

const ROOT_ELEMENT: &[u8] = b"root";
const DATA_ELEMENT: &[u8] = b"data";
const VALUE_ELEMENT: &[u8] = b"value";
const COMMENT_ELEMENT: &[u8] = b"comment";

/// Which child of `<data>` is currently being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Value,
    Comment,
}

/// A `<data>` element whose end tag has not been reached yet
#[derive(Debug)]
struct PendingEntry {
    entry: ResourceEntry,
    capture: Option<Capture>,
    text: String,
    value_start: usize,
}

impl PendingEntry {
    fn open(start: &BytesStart, position: usize) -> Result<Self, DocumentError> {
        let mut key = None;
        let mut resource_type = None;
        let mut mimetype = None;

        for attr in start.attributes() {
            let attr = attr.map_err(|e| parse_error(e, position))?;
            let value = attr.unescape_value().map_err(|e| parse_error(e, position))?;
            match attr.key.as_ref() {
                b"name" => key = Some(value.into_owned()),
                b"type" => resource_type = Some(value.into_owned()),
                b"mimetype" => mimetype = Some(value.into_owned()),
                _ => {}
            }
        }

        let key = key.ok_or_else(|| {
            DocumentError::Parse(format!("<data> element without a 'name' attribute at byte {}", position))
        })?;

        Ok(Self {
            entry: ResourceEntry {
                key,
                value: None,
                comment: None,
                resource_type,
                mimetype,
                value_span: None,
                modified: false,
            },
            capture: None,
            text: String::new(),
            value_start: 0,
        })
    }

    fn begin(&mut self, capture: Capture, position: usize) -> Result<(), DocumentError> {
        if capture == Capture::Value && self.entry.value.is_some() {
            return Err(DocumentError::Parse(format!(
                "entry '{}' has more than one <value> (byte {})",
                self.entry.key, position
            )));
        }
        self.capture = Some(capture);
        self.text.clear();
        self.value_start = position;
        Ok(())
    }

    fn finish(&mut self, content_end: usize) {
        let text = std::mem::take(&mut self.text);
        match self.capture.take() {
            Some(Capture::Value) => {
                self.entry.value = Some(text);
                self.entry.value_span = Some(self.value_start..content_end);
            }
            Some(Capture::Comment) => self.entry.comment = Some(text),
            None => {}
        }
    }

    fn empty_child(&mut self, capture: Capture, position: usize) -> Result<(), DocumentError> {
        self.begin(capture, position)?;
        let text = std::mem::take(&mut self.text);
        self.capture = None;
        match capture {
            Capture::Value => self.entry.value = Some(text),
            Capture::Comment => self.entry.comment = Some(text),
        }
        Ok(())
    }
}

/// Parse decoded document text.
pub(crate) fn parse_document(source: String, encoding: TextEncoding) -> Result<ResourceDocument, DocumentError> {
    let (declaration, entries) = read_structure(&source)?;
    Ok(ResourceDocument {
        source,
        encoding,
        declaration,
        entries,
    })
}

fn read_structure(source: &str) -> Result<(Option<Declaration>, Vec<ResourceEntry>), DocumentError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().check_end_names = true;

    let mut declaration = None;
    let mut entries = Vec::new();
    let mut pending: Option<PendingEntry> = None;
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| parse_error(e, reader.error_position() as usize))?;
        let position = reader.buffer_position() as usize;

        match event {
            Event::Decl(ref decl) => {
                declaration = Some(read_declaration(decl, source, position)?);
            }
            Event::Start(ref start) => {
                let name = start.name();
                if depth == 0 {
                    check_root(name.as_ref(), &mut seen_root, position)?;
                } else if depth == 1 && name.as_ref() == DATA_ELEMENT {
                    pending = Some(PendingEntry::open(start, position)?);
                } else if let Some(entry) = pending.as_mut() {
                    if entry.capture == Some(Capture::Value) {
                        return Err(DocumentError::Parse(format!(
                            "entry '{}' contains markup inside <value> (byte {})",
                            entry.entry.key, position
                        )));
                    }
                    if depth == 2 {
                        match name.as_ref() {
                            VALUE_ELEMENT => entry.begin(Capture::Value, position)?,
                            COMMENT_ELEMENT => entry.begin(Capture::Comment, position)?,
                            _ => {}
                        }
                    }
                }
                depth += 1;
            }
            Event::Empty(ref start) => {
                let name = start.name();
                if depth == 0 {
                    check_root(name.as_ref(), &mut seen_root, position)?;
                } else if depth == 1 && name.as_ref() == DATA_ELEMENT {
                    entries.push(PendingEntry::open(start, position)?.entry);
                } else if let Some(entry) = pending.as_mut() {
                    if entry.capture == Some(Capture::Value) {
                        return Err(DocumentError::Parse(format!(
                            "entry '{}' contains markup inside <value> (byte {})",
                            entry.entry.key, position
                        )));
                    }
                    if depth == 2 {
                        match name.as_ref() {
                            VALUE_ELEMENT => entry.empty_child(Capture::Value, position)?,
                            COMMENT_ELEMENT => entry.empty_child(Capture::Comment, position)?,
                            _ => {}
                        }
                    }
                }
            }
            Event::End(ref end) => {
                depth = depth.saturating_sub(1);
                if let Some(entry) = pending.as_mut() {
                    if depth == 2 && entry.capture.is_some() {
                        // The end tag is the last "</" before the current position
                        let content_end = source[..position].rfind("</").unwrap_or(position);
                        entry.finish(content_end);
                    } else if depth == 1 && end.name().as_ref() == DATA_ELEMENT {
                        if let Some(done) = pending.take() {
                            entries.push(done.entry);
                        }
                    }
                }
            }
            Event::Text(ref text) => {
                if let Some(entry) = pending.as_mut().filter(|p| p.capture.is_some()) {
                    let unescaped = text.unescape().map_err(|e| parse_error(e, position))?;
                    entry.text.push_str(&unescaped);
                } else if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(DocumentError::Parse(format!(
                        "text outside of the root element at byte {}",
                        position
                    )));
                }
            }
            Event::CData(ref cdata) => {
                if let Some(entry) = pending.as_mut().filter(|p| p.capture.is_some()) {
                    let content = std::str::from_utf8(cdata).map_err(|e| parse_error(e, position))?;
                    entry.text.push_str(content);
                }
            }
            Event::Eof => break,
            Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    if depth != 0 {
        return Err(DocumentError::Parse("unexpected end of document: unclosed element".to_string()));
    }
    if !seen_root {
        return Err(DocumentError::Parse("document has no <root> element".to_string()));
    }

    Ok((declaration, entries))
}

fn check_root(name: &[u8], seen_root: &mut bool, position: usize) -> Result<(), DocumentError> {
    if *seen_root {
        return Err(DocumentError::Parse(format!("second top-level element at byte {}", position)));
    }
    if name != ROOT_ELEMENT {
        return Err(DocumentError::Parse(format!(
            "expected <root> as the document element, found <{}>",
            String::from_utf8_lossy(name)
        )));
    }
    *seen_root = true;
    Ok(())
}

fn read_declaration(decl: &BytesDecl, source: &str, position: usize) -> Result<Declaration, DocumentError> {
    let start = source[..position].rfind("<?xml").unwrap_or(0);
    let version = decl.version().map_err(|e| parse_error(e, position))?;
    let encoding = match decl.encoding() {
        Some(label) => Some(label.map_err(|e| parse_error(e, position))?),
        None => None,
    };
    let standalone = match decl.standalone() {
        Some(flag) => Some(flag.map_err(|e| parse_error(e, position))?),
        None => None,
    };

    Ok(Declaration {
        span: Range { start, end: position },
        version: String::from_utf8_lossy(&version).into_owned(),
        encoding: encoding.map(|label| String::from_utf8_lossy(&label).into_owned()),
        standalone: standalone.map(|flag| String::from_utf8_lossy(&flag).into_owned()),
    })
}

fn parse_error(error: impl std::fmt::Display, position: usize) -> DocumentError {
    DocumentError::Parse(format!("{} at byte {}", error, position))
}
