use std::borrow::Cow;

use regex::Captures;
use serde::{Deserialize, Serialize};

use super::build_pattern;

/// Opening and closing text wrapped around each highlighted match
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Marker {
    pub open: String,
    pub close: String,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            open: "<mark>".to_string(),
            close: "</mark>".to_string(),
        }
    }
}

/// Wrap every keyword occurrence in `<mark>` tags
pub fn highlight<'a, S: AsRef<str>>(text: &'a str, keywords: &[S]) -> Cow<'a, str> {
    highlight_with(text, keywords, &Marker::default())
}

/// Wrap every keyword occurrence in the given marker
///
/// Matches are case-insensitive substrings scanned left to right; the
/// matched text keeps its original casing. Returns `text` unchanged when it
/// is empty or no usable keyword remains.
pub fn highlight_with<'a, S: AsRef<str>>(
    text: &'a str,
    keywords: &[S],
    marker: &Marker,
) -> Cow<'a, str> {
    if text.is_empty() {
        return Cow::Borrowed(text);
    }

    let Some(pattern) = build_pattern(keywords) else {
        return Cow::Borrowed(text);
    };

    // Closure replacement: matched text is inserted literally, never expanded
    pattern.replace_all(text, |caps: &Captures| {
        format!("{}{}{}", marker.open, &caps[0], marker.close)
    })
}
