use crate::models::KeywordSet;

/// Whitespace as JavaScript's `\s` class defines it: Unicode `White_Space`
/// without NEL (U+0085), plus the byte order mark (U+FEFF)
#[inline]
fn is_whitespace_like(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

#[inline]
fn is_separator(c: char) -> bool {
    is_whitespace_like(c) || c == ','
}

/// Split raw search input into keywords
///
/// Runs of whitespace or commas separate keywords. Empty pieces are dropped;
/// order and duplicates are kept.
pub fn tokenize(input: Option<&str>) -> KeywordSet {
    input
        .unwrap_or_default()
        .split(is_separator)
        .map(|piece| piece.trim_matches(is_whitespace_like))
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>()
        .into()
}
