use regex::{Regex, RegexBuilder};

/// Build a case-insensitive alternation matching any keyword literally
///
/// Every keyword is escaped so metacharacters never act as regex syntax.
/// Returns `None` when no keyword survives; callers must then leave their
/// input untouched instead of matching.
pub fn build_pattern<S: AsRef<str>>(keywords: &[S]) -> Option<Regex> {
    let escaped: Vec<String> = keywords
        .iter()
        .map(|k| regex::escape(k.as_ref()))
        .filter(|k| !k.is_empty())
        .collect();

    if escaped.is_empty() {
        return None;
    }

    match RegexBuilder::new(&escaped.join("|"))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            log::warn!("Keyword pattern rejected ({} keywords): {}", escaped.len(), e);
            None
        }
    }
}
