//! Data access for articles
//!
//! The search controller and detail gate only see [`ArticleSource`];
//! [`HttpArticleSource`] is the network implementation.

mod client;

pub use client::HttpArticleSource;

use std::future::Future;

use crate::error::FetchError;
use crate::models::Article;

/// Source of articles for the list and detail views
pub trait ArticleSource: Send + Sync + 'static {
    /// Fetch articles matching a comma-joined keyword string, or all
    /// articles when `search` is `None`
    fn fetch_articles(
        &self,
        search: Option<String>,
    ) -> impl Future<Output = Result<Vec<Article>, FetchError>> + Send;

    /// Fetch a single article by id
    fn fetch_article_by_id(&self, id: u64) -> impl Future<Output = Result<Article, FetchError>> + Send;
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory source with per-query latency, recording every call

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    #[derive(Default)]
    pub struct MockSource {
        articles: HashMap<Option<String>, Vec<Article>>,
        delays: HashMap<Option<String>, Duration>,
        failing: Vec<Option<String>>,
        by_id: HashMap<u64, Article>,
        pub list_calls: Mutex<Vec<Option<String>>>,
        pub id_calls: Mutex<Vec<u64>>,
    }

    impl MockSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_results(mut self, search: Option<&str>, articles: Vec<Article>) -> Self {
            self.articles.insert(search.map(str::to_string), articles);
            self
        }

        pub fn with_delay(mut self, search: Option<&str>, delay: Duration) -> Self {
            self.delays.insert(search.map(str::to_string), delay);
            self
        }

        pub fn failing_for(mut self, search: Option<&str>) -> Self {
            self.failing.push(search.map(str::to_string));
            self
        }

        pub fn with_article(mut self, article: Article) -> Self {
            self.by_id.insert(article.id, article);
            self
        }

        pub fn list_calls(&self) -> Vec<Option<String>> {
            self.list_calls.lock().unwrap().clone()
        }

        pub fn id_calls(&self) -> Vec<u64> {
            self.id_calls.lock().unwrap().clone()
        }
    }

    impl ArticleSource for MockSource {
        async fn fetch_articles(&self, search: Option<String>) -> Result<Vec<Article>, FetchError> {
            self.list_calls.lock().unwrap().push(search.clone());
            if let Some(delay) = self.delays.get(&search) {
                tokio::time::sleep(*delay).await;
            }
            if self.failing.contains(&search) {
                return Err(FetchError::Status(500));
            }
            Ok(self.articles.get(&search).cloned().unwrap_or_default())
        }

        async fn fetch_article_by_id(&self, id: u64) -> Result<Article, FetchError> {
            self.id_calls.lock().unwrap().push(id);
            if let Some(delay) = self.delays.get(&Some(id.to_string())) {
                tokio::time::sleep(*delay).await;
            }
            self.by_id.get(&id).cloned().ok_or(FetchError::NotFound(id))
        }
    }
}
