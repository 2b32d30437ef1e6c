//! Label and description normalization

use lazy_static::lazy_static;
use regex::Regex;

/// Placeholder shown in derived comments when a source label is missing
pub const MISSING_TEXT: &str = "****";

lazy_static! {
    static ref LOWER_UPPER: Regex = Regex::new("([a-z])([A-Z])").unwrap();
    static ref AUTHN_WORD: Regex = Regex::new("(AuthN)([A-Z])").unwrap();
    static ref IOT_WORD: Regex = Regex::new("(IoT)([A-Z])").unwrap();
    static ref ACRONYM_WORD: Regex = Regex::new("([A-Z]{2,})([A-Z][a-z])").unwrap();
}

/// Turn a camel-case graph label into a readable phrase.
///
/// `"LossOfConfidentiality"` becomes `"Loss Of Confidentiality"`. Acronyms
/// such as `PIN`, `AuthN` and `IoT` are kept as single words and `TW` is
/// spelled out. Labels starting with `[` are returned unchanged apart from the
/// `TW` expansion. Blank input yields `None`.
pub fn un_camel_case(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let text = text.replace("TW", "Trustworthiness");
    if text.starts_with('[') {
        return Some(text);
    }

    let text = LOWER_UPPER.replace_all(&text, "$1 $2");
    let text = text.replace("Auth N", "AuthN");
    let text = AUTHN_WORD.replace_all(&text, "$1 $2");
    let text = text.replace("Io T", "IoT");
    let text = IOT_WORD.replace_all(&text, "$1 $2");
    let text = ACRONYM_WORD.replace_all(&text, "$1 $2");
    // one domain label is "BIOSatHost"
    Some(text.replace("BIO S", "BIOS "))
}

/// [`un_camel_case`] with the missing-text placeholder for blank input
pub fn un_camel_case_or_placeholder(text: Option<&str>) -> String {
    match text.and_then(un_camel_case) {
        Some(phrase) => phrase,
        None => {
            tracing::warn!("un_camel_case: empty text, the wrong domain model may be loaded");
            MISSING_TEXT.to_string()
        }
    }
}

/// A threat description split at its first unquoted colon.
///
/// `head` and `tail` are the raw slices on either side of the colon, so
/// `head + ":" + tail` is always the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Description<'a> {
    pub head: &'a str,
    pub tail: Option<&'a str>,
}

impl<'a> Description<'a> {
    /// Text up to the colon, trimmed
    pub fn short(&self) -> &'a str {
        self.head.trim()
    }

    /// Text after the colon, trimmed, with its first letter uppercased
    pub fn long(&self) -> Option<String> {
        self.tail.map(|tail| capitalize(tail.trim()))
    }
}

/// Split `comment` on the first colon that is not inside a double-quoted
/// substring. Asset labels quoted inside threat comments may contain colons.
pub fn split_description(comment: &str) -> Description<'_> {
    let mut quotes = 0usize;
    for (index, ch) in comment.char_indices() {
        match ch {
            '"' => quotes += 1,
            ':' if quotes % 2 == 0 => {
                return Description {
                    head: &comment[..index],
                    tail: Some(&comment[index + 1..]),
                };
            }
            _ => {}
        }
    }
    Description {
        head: comment,
        tail: None,
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
