//! Language utilities for ISO language code handling
//!
//! Target codes are passed to providers unchanged. These helpers only turn
//! codes into readable names for prompts and log lines.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Primary language subtag of a code such as `zh-CN` or `pt_BR`
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Look up an ISO 639-1 or ISO 639-3 code, ignoring any region subtag
fn lookup(code: &str) -> Option<Language> {
    let primary = primary_subtag(code);
    match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    }
}

/// Whether the code names a language isolang knows about
pub fn is_known_language(code: &str) -> bool {
    lookup(code).is_some()
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let lang = lookup(code).ok_or_else(|| anyhow!("Unknown language code: {}", code))?;
    Ok(lang.to_name().to_string())
}

/// Readable name for a code, falling back to the code itself
pub fn display_name(code: &str) -> String {
    get_language_name(code).unwrap_or_else(|_| code.trim().to_string())
}
