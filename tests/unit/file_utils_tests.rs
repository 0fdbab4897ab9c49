/*!
 * Tests for file utilities
 */

use resxlate::file_utils::FileManager;
use std::fs;

use crate::common;

#[test]
fn test_read_bytes_withExistingFile_shouldReturnContent() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "a.txt", "content").unwrap();

    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_bytes(&path).unwrap(), b"content");
}

#[test]
fn test_write_atomic_shouldReplaceExistingFile() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "out.resx", "old").unwrap();

    FileManager::write_atomic(&path, b"new").unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"new");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_write_atomic_withMissingDirectory_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("nested").join("out.resx");

    assert!(FileManager::write_atomic(&path, b"data").is_err());
    assert!(!FileManager::file_exists(&path));
}
