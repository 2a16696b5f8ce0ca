use reqwest::{Client, StatusCode};

use super::ArticleSource;
use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::models::{Article, PaginatedResponse};

/// Article source backed by the news REST API
#[derive(Clone)]
pub struct HttpArticleSource {
    client: Client,
    base_url: String,
}

impl HttpArticleSource {
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    fn articles_url(&self) -> String {
        format!("{}articles/", self.base_url)
    }

    fn article_url(&self, id: u64) -> String {
        format!("{}articles/{}/", self.base_url, id)
    }
}

impl ArticleSource for HttpArticleSource {
    async fn fetch_articles(&self, search: Option<String>) -> Result<Vec<Article>, FetchError> {
        let mut request = self.client.get(self.articles_url());
        if let Some(search) = search.as_deref() {
            request = request.query(&[("search", search)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let page: PaginatedResponse<Article> = response.json().await?;
        log::debug!(
            "Fetched {} of {} articles (search: {:?})",
            page.results.len(),
            page.count,
            search
        );
        Ok(page.results)
    }

    async fn fetch_article_by_id(&self, id: u64) -> Result<Article, FetchError> {
        let response = self.client.get(self.article_url(id)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(FetchError::NotFound(id)),
            status if !status.is_success() => Err(FetchError::Status(status.as_u16())),
            _ => Ok(response.json().await?),
        }
    }
}
