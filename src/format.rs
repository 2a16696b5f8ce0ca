//! Display formatting for list cards

use chrono::{DateTime, Datelike, Utc};

use crate::models::{Article, ArticleCard};
use crate::search::{highlight_with, Marker};

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Format a timestamp as "Mar 3rd, 2024"
pub fn format_date(date: &DateTime<Utc>) -> String {
    let day = date.day();
    format!("{} {}{}, {}", date.format("%b"), day, ordinal_suffix(day), date.year())
}

/// Build the display card for an article, highlighting title and summary
pub fn article_card<S: AsRef<str>>(article: &Article, keywords: &[S], marker: &Marker) -> ArticleCard {
    ArticleCard {
        id: article.id,
        title: highlight_with(&article.title, keywords, marker).into_owned(),
        summary: highlight_with(&article.summary, keywords, marker).into_owned(),
        news_site: article.news_site.clone(),
        published: format_date(&article.published_at),
        image_url: article.image_url.clone(),
    }
}
