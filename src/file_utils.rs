use std::fs;
use std::io::{self, Write};
use std::path::Path;

// @module: File utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Read a whole file as raw bytes
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    /// Replace `path` with `content` without ever exposing a partial file.
    ///
    /// The bytes go to a temporary file in the destination directory which is
    /// then renamed over the target. On failure the temporary file is removed
    /// and any previous file at `path` is left untouched.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &[u8]) -> io::Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = tempfile::Builder::new()
            .prefix(".resxlate-")
            .suffix(".tmp")
            .tempfile_in(parent)?;
        temp.write_all(content)?;
        temp.as_file().sync_all()?;

        // Temporary files are created owner-only; keep the usual permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = match fs::metadata(path) {
                Ok(existing) => existing.permissions(),
                Err(_) => fs::Permissions::from_mode(0o644),
            };
            fs::set_permissions(temp.path(), permissions)?;
        }

        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}
