/*!
 * Tests for the .resx document adapter
 */

use resxlate::document::ResourceDocument;
use resxlate::errors::DocumentError;

use crate::common::{self, SAMPLE_RESX};

#[test]
fn test_load_withSampleFile_shouldListEntriesInOrder() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_sample_resx(dir.path(), "Strings.resx").unwrap();

    let doc = ResourceDocument::load(&path).unwrap();

    let keys: Vec<&str> = doc.entries().iter().map(|e| e.key()).collect();
    assert_eq!(keys, vec!["Greeting", "Empty", "Farewell", "Logo", "Question"]);
    let translatable: Vec<&str> = doc.translatable().map(|e| e.key()).collect();
    assert_eq!(translatable, vec!["Greeting", "Farewell", "Question"]);
}

#[test]
fn test_parse_shouldUnescapeValuesAndKeepComments() {
    let doc = ResourceDocument::parse_bytes(SAMPLE_RESX.as_bytes()).unwrap();

    let greeting = doc.entry("Greeting").unwrap();
    assert_eq!(greeting.value(), Some("Hello"));
    assert_eq!(greeting.comment(), Some("Shown on the start page"));
    assert_eq!(doc.entry("Farewell").unwrap().source_text(), Some("Goodbye & thanks"));
    assert!(!doc.entry("Logo").unwrap().is_text_resource());
}

#[test]
fn test_load_withMissingFile_shouldReturnReadError() {
    let dir = common::create_temp_dir().unwrap();
    let result = ResourceDocument::load(dir.path().join("missing.resx"));
    assert!(matches!(result, Err(DocumentError::Read { .. })));
}

#[test]
fn test_parse_withMalformedXml_shouldReturnParseError() {
    let cases = [
        "<root><data name=\"A\"><value>x</value></root>",
        "<root><data name=\"A\"><value>x</value></data>",
        "<resources><data name=\"A\"/></resources>",
        "<root><data><value>x</value></data></root>",
        "not xml at all",
    ];
    for case in cases {
        assert!(
            matches!(ResourceDocument::parse_bytes(case.as_bytes()), Err(DocumentError::Parse(_))),
            "expected a parse error for {case:?}"
        );
    }
}

#[test]
fn test_translate_and_render_shouldOnlyTouchTranslatedValues() {
    let mut doc = ResourceDocument::parse_bytes(SAMPLE_RESX.as_bytes()).unwrap();
    for entry in doc.translatable_mut() {
        if entry.key() == "Farewell" {
            entry.set_value("Adiós & gracias");
        }
    }

    let expected = SAMPLE_RESX.replace(
        "<value>Goodbye &amp; thanks</value>",
        "<value>Adiós &amp; gracias</value>",
    );
    assert_eq!(doc.render(), expected);
}

#[test]
fn test_save_and_reload_shouldKeepTranslation() {
    let dir = common::create_temp_dir().unwrap();
    let output = dir.path().join("Strings.fr.resx");
    let mut doc = ResourceDocument::parse_bytes(SAMPLE_RESX.as_bytes()).unwrap();
    if let Some(entry) = doc.translatable_mut().next() {
        entry.set_value("Bonjour <b>");
    }

    doc.save(&output).unwrap();
    let reloaded = ResourceDocument::load(&output).unwrap();

    assert_eq!(reloaded.entry("Greeting").unwrap().value(), Some("Bonjour <b>"));
    assert_eq!(reloaded.entry("Greeting").unwrap().comment(), Some("Shown on the start page"));
}

#[test]
fn test_utf16_document_shouldRoundTripWithBom() {
    let text = "<?xml version=\"1.0\" encoding=\"utf-16\"?>\r\n<root><data name=\"A\"><value>Hi</value></data></root>";
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }

    let mut doc = ResourceDocument::parse_bytes(&bytes).unwrap();
    assert_eq!(doc.to_bytes(), bytes);

    if let Some(entry) = doc.translatable_mut().next() {
        entry.set_value("Hallo");
    }
    let reloaded = ResourceDocument::parse_bytes(&doc.to_bytes()).unwrap();
    assert_eq!(reloaded.entry("A").unwrap().value(), Some("Hallo"));
    assert_eq!(&doc.to_bytes()[..2], &[0xFF, 0xFE]);
}
