use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Core article structure as returned by the news API
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub summary: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub url: String,
    pub image_url: String,
    pub news_site: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub launches: Vec<Launch>,
}

/// Article author with optional social links
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    pub socials: Option<Vec<String>>,
}

/// Launch referenced by an article
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Launch {
    pub launch_id: String,
    pub provider: String,
}

/// List endpoint envelope
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PaginatedResponse<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Ordered search keywords derived from one input string.
///
/// Order follows the input and duplicates are kept. The same set drives the
/// request, the ranking and the highlighting.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new(keywords: Vec<String>) -> Self {
        Self(keywords)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Comma-joined form sent as the `search` parameter, `None` when empty
    pub fn to_csv(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.join(","))
        }
    }
}

impl std::ops::Deref for KeywordSet {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(keywords: Vec<String>) -> Self {
        Self(keywords)
    }
}

/// Lifecycle of the current search slot
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Pending,
    Success,
    Error,
}

/// Snapshot of the list view's search state
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct QueryState {
    pub keywords: KeywordSet,
    pub is_loading: bool,
    pub error: Option<String>,
    pub results: Vec<Article>,
    /// Set once the first request has been accepted
    pub started: bool,
}

impl QueryState {
    pub fn status(&self) -> SearchStatus {
        if self.is_loading {
            SearchStatus::Pending
        } else if self.error.is_some() {
            SearchStatus::Error
        } else if self.started {
            SearchStatus::Success
        } else {
            SearchStatus::Idle
        }
    }

    pub fn results_count(&self) -> usize {
        self.results.len()
    }
}

/// List item prepared for display, with keywords highlighted
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ArticleCard {
    pub id: u64,
    pub title: String,
    pub summary: String,
    pub news_site: String,
    pub published: String,
    pub image_url: String,
}
