//! Text extraction from pages returned by the bypass relay.
//!
//! When a browser opens a JSON endpoint it wraps the body in a single
//! `<pre>` element, HTML-escaped. The relay hands that page back verbatim, so
//! recovering the document means taking the element's text content.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static PRE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<pre\b[^>]*>(.*?)</pre\s*>").expect("valid pre regex"));

static INNER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").expect("valid entity regex")
});

/// Returns the text content of the first `<pre>` element, or `None` if the
/// page has none.
#[must_use]
pub fn extract_pre_text(html: &str) -> Option<String> {
    let inner = PRE_BLOCK.captures(html)?.get(1)?.as_str();
    let without_tags = INNER_TAG.replace_all(inner, "");
    Some(decode_entities(&without_tags))
}

/// Decodes the character references an HTML parser would resolve inside text
/// content. Unknown named references are left untouched.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            decode_reference(name).map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn decode_reference(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }

    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}
