/*!
 * Tests for language code utilities
 */

use resxlate::language_utils::{display_name, get_language_name, is_known_language};

#[test]
fn test_get_language_name_withIsoCodes_shouldResolve() {
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
    assert_eq!(get_language_name("fra").unwrap(), "French");
    assert_eq!(get_language_name("de-AT").unwrap(), "German");
}

#[test]
fn test_get_language_name_withInvalidCode_shouldFail() {
    assert!(get_language_name("xx").is_err());
    assert!(get_language_name("").is_err());
}

#[test]
fn test_display_name_shouldNeverFail() {
    assert_eq!(display_name("ja"), "Japanese");
    assert_eq!(display_name("x-custom"), "x-custom");
}

#[test]
fn test_is_known_language_withRegionSubtag_shouldUsePrimaryTag() {
    assert!(is_known_language("zh-CN"));
    assert!(is_known_language("pt_BR"));
    assert!(!is_known_language("qq"));
}
