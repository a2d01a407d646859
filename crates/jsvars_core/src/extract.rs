use once_cell::sync::Lazy;
use regex::Regex;

use crate::decode::decode_text;
use crate::{Content, VariableBinding};

/// `var`/`let`/`const`, an identifier, `=`, then everything up to the first `;`.
///
/// The value stops at the first `;` even when it sits inside a string literal
/// or a comment. This is pattern matching, not a JavaScript parser.
///
/// Word boundary and whitespace are ASCII-only: a non-ASCII letter before the
/// keyword still counts as a boundary, and U+00A0 is not a separator.
static DECLARATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)(?-u:\b)(?:var|let|const)[\t\n\x0C\r ]+",
        r"([A-Za-z_$][A-Za-z0-9_$]*)[\t\n\x0C\r ]*=[\t\n\x0C\r ]*([^;]*);",
    ))
    .expect("valid declaration pattern")
});

pub trait Extractor: Send + Sync {
    fn extract(&self, content: &Content, filter: Option<&str>) -> Vec<VariableBinding>;
}

/// Default extractor backed by the shared declaration pattern.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclarationExtractor;

impl Extractor for DeclarationExtractor {
    fn extract(&self, content: &Content, filter: Option<&str>) -> Vec<VariableBinding> {
        extract_content(content, filter)
    }
}

/// Scan raw bytes for declarations. An empty `filter` is the same as none.
pub fn extract(content: &[u8], filter: Option<&str>) -> Vec<VariableBinding> {
    extract_text(&decode_text(content, None), filter)
}

/// Like [`extract`], but honours the charset announced by the server.
pub fn extract_content(content: &Content, filter: Option<&str>) -> Vec<VariableBinding> {
    let text = decode_text(&content.bytes, content.content_type.as_deref());
    extract_text(&text, filter)
}

pub fn extract_text(text: &str, filter: Option<&str>) -> Vec<VariableBinding> {
    let filter = filter.filter(|name| !name.is_empty());
    DECLARATION_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            if filter.is_some_and(|wanted| wanted != name) {
                return None;
            }
            let value = caps.get(2)?.as_str().trim();
            Some(VariableBinding::new(name, value))
        })
        .collect()
}
