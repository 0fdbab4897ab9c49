/*!
 * In-memory model of a `.resx` resource document.
 *
 * The document keeps the full decoded source text. Entries remember where
 * their value text sits in that source, so rendering only rewrites the values
 * that changed and copies every other byte through untouched.
 */

use std::ops::Range;

use super::encoding::TextEncoding;

/// Data `type` prefix for plain string resources
const STRING_TYPE_PREFIX: &str = "System.String";

/// Key prefix used by the WinForms designer for non-localizable metadata
const DESIGNER_KEY_PREFIX: &str = ">>";

/// The XML declaration found at the top of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Byte range of the whole `<?xml ... ?>` declaration
    pub(crate) span: Range<usize>,
    /// Declared XML version
    pub version: String,
    /// Declared encoding label, if any
    pub encoding: Option<String>,
    /// Declared standalone flag, if any
    pub standalone: Option<String>,
}

/// One `<data>` element of a resource document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub(crate) key: String,
    pub(crate) value: Option<String>,
    pub(crate) comment: Option<String>,
    pub(crate) resource_type: Option<String>,
    pub(crate) mimetype: Option<String>,
    /// Byte range of the raw `<value>` content in the document source
    pub(crate) value_span: Option<Range<usize>>,
    pub(crate) modified: bool,
}

impl ResourceEntry {
    /// The `name` attribute, never translated.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Unescaped text of the `<value>` child, `None` when there is no `<value>`.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Unescaped text of the `<comment>` child.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// The `type` attribute.
    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.as_deref()
    }

    /// The `mimetype` attribute.
    pub fn mimetype(&self) -> Option<&str> {
        self.mimetype.as_deref()
    }

    /// Whether this entry holds a plain localizable string.
    ///
    /// Serialized objects (`mimetype`), typed resources other than
    /// `System.String` and designer metadata keys are never translated.
    pub fn is_text_resource(&self) -> bool {
        let plain_type = self
            .resource_type
            .as_deref()
            .is_none_or(|t| t.starts_with(STRING_TYPE_PREFIX));
        plain_type && self.mimetype.is_none() && !self.key.starts_with(DESIGNER_KEY_PREFIX)
    }

    /// The trimmed value text, when it is eligible for translation.
    pub fn source_text(&self) -> Option<&str> {
        if !self.is_text_resource() || self.value_span.is_none() {
            return None;
        }
        self.value.as_deref().map(str::trim).filter(|text| !text.is_empty())
    }

    /// Whether this entry should be sent to a translation provider.
    pub fn is_translatable(&self) -> bool {
        self.source_text().is_some()
    }

    /// Replace the value text.
    ///
    /// Whitespace surrounding the original text is kept around the new text
    /// so indentation inside `<value>` survives. An unchanged text leaves the
    /// entry unmodified, so its source markup is written back as it was.
    pub fn set_value(&mut self, text: &str) {
        let original = self.value.as_deref().unwrap_or_default();
        if original.trim() == text {
            return;
        }
        let trimmed_start = original.trim_start();
        let leading = &original[..original.len() - trimmed_start.len()];
        let trailing = &trimmed_start[trimmed_start.trim_end().len()..];

        self.value = Some(format!("{}{}{}", leading, text, trailing));
        self.modified = true;
    }

    /// Whether the value was replaced since parsing.
    pub fn is_modified(&self) -> bool {
        self.modified
    }
}

/// A parsed `.resx` document
#[derive(Debug, Clone)]
pub struct ResourceDocument {
    /// Decoded source text, BOM excluded
    pub(crate) source: String,
    pub(crate) encoding: TextEncoding,
    pub(crate) declaration: Option<Declaration>,
    pub(crate) entries: Vec<ResourceEntry>,
}

impl ResourceDocument {
    /// All entries in document order.
    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    /// Look up an entry by key.
    pub fn entry(&self, key: &str) -> Option<&ResourceEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Entries eligible for translation, in document order.
    ///
    /// Every call returns a fresh iterator over the current state.
    pub fn translatable(&self) -> impl Iterator<Item = &ResourceEntry> + '_ {
        self.entries.iter().filter(|e| e.is_translatable())
    }

    /// Mutable variant of [`ResourceDocument::translatable`].
    pub fn translatable_mut(&mut self) -> impl Iterator<Item = &mut ResourceEntry> + '_ {
        self.entries.iter_mut().filter(|e| e.is_translatable())
    }

    /// Number of entries eligible for translation.
    pub fn translatable_count(&self) -> usize {
        self.translatable().count()
    }

    /// Encoding the document was read with and will be written with.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// The XML declaration, if the source had one.
    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }
}
