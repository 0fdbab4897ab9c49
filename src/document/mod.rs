/*!
 * Document model adapter for `.resx` resource files.
 *
 * - `model`: `ResourceDocument` and `ResourceEntry`
 * - `parser`: XML reading and schema checks
 * - `writer`: lossless re-rendering of a modified document
 * - `encoding`: byte-order mark and declaration based encoding handling
 */

use std::path::Path;

use crate::errors::DocumentError;
use crate::file_utils::FileManager;

pub mod encoding;
pub mod model;
mod parser;
mod writer;

pub use encoding::TextEncoding;
pub use model::{Declaration, ResourceDocument, ResourceEntry};

impl ResourceDocument {
    /// Read and parse the document at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let bytes = FileManager::read_bytes(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_bytes(&bytes)
    }

    /// Parse a document from raw bytes in any supported encoding.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let encoding = TextEncoding::detect(bytes)?;
        let source = encoding.decode(bytes)?.into_owned();
        parser::parse_document(source, encoding)
    }
}
