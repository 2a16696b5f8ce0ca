use rayon::prelude::*;
use regex::Regex;
use rustc_hash::FxHashMap;

use super::build_pattern;
use crate::models::Article;

/// Per-article match counts, only alive during ranking
struct RankEntry {
    article: Article,
    title_matches: usize,
    summary_matches: usize,
}

/// Compile one matcher per distinct keyword, keeping repeats so a keyword
/// typed twice counts twice
///
/// Cache keys are the keywords as given: case folding is left to the regex
/// engine, since keywords that lowercase alike may still match different text.
fn keyword_matchers<S: AsRef<str>>(keywords: &[S]) -> Vec<Regex> {
    let mut compiled: FxHashMap<&str, Regex> = FxHashMap::default();
    let mut matchers = Vec::with_capacity(keywords.len());

    for keyword in keywords {
        let keyword = keyword.as_ref();
        if keyword.is_empty() {
            continue;
        }
        if let Some(existing) = compiled.get(keyword) {
            matchers.push(existing.clone());
            continue;
        }
        if let Some(pattern) = build_pattern(&[keyword]) {
            compiled.insert(keyword, pattern.clone());
            matchers.push(pattern);
        }
    }

    matchers
}

#[inline]
fn count_matches(text: &str, matchers: &[Regex]) -> usize {
    matchers.iter().map(|m| m.find_iter(text).count()).sum()
}

/// Reorder articles by keyword relevance
///
/// Title matches dominate; summary matches break ties; articles equal on
/// both keep their input order. Nothing is filtered out. Without usable
/// keywords the input is returned as is.
pub fn rank_by_keywords<S: AsRef<str>>(articles: Vec<Article>, keywords: &[S]) -> Vec<Article> {
    let matchers = keyword_matchers(keywords);
    if matchers.is_empty() {
        return articles;
    }

    // Indexed collect keeps input order, which the stable sort relies on
    let mut entries: Vec<RankEntry> = articles
        .into_par_iter()
        .map(|article| {
            let title_matches = count_matches(&article.title, &matchers);
            let summary_matches = count_matches(&article.summary, &matchers);
            RankEntry {
                article,
                title_matches,
                summary_matches,
            }
        })
        .collect();

    // Vec::sort_by is stable
    entries.sort_by(|a, b| {
        b.title_matches
            .cmp(&a.title_matches)
            .then_with(|| b.summary_matches.cmp(&a.summary_matches))
    });

    log::debug!(
        "Ranked {} articles against {} keywords",
        entries.len(),
        matchers.len()
    );

    entries.into_iter().map(|e| e.article).collect()
}
