//! Application state management
//!
//! Central state for the client including:
//! - Resolved configuration
//! - The article source shared by list and detail views
//! - The list-to-detail hand-off slot
//! - The detail resolution gate

use std::sync::{Arc, Mutex};

use crate::api::ArticleSource;
use crate::config::ClientConfig;
use crate::models::Article;
use crate::navigation::{DetailGate, DetailResolution};
use crate::search::SearchController;

/// Main application state
pub struct AppState<S> {
    pub config: ClientConfig,

    /// Article source used by every view
    pub source: Arc<S>,

    /// Article handed from the list to the next detail navigation
    handoff: Mutex<Option<Article>>,

    pub detail_gate: DetailGate,
}

impl<S: ArticleSource> AppState<S> {
    pub fn new(config: ClientConfig, source: S) -> Self {
        Self {
            config,
            source: Arc::new(source),
            handoff: Mutex::new(None),
            detail_gate: DetailGate::new(),
        }
    }

    /// Start the list view's search controller
    pub fn search_controller(&self) -> SearchController {
        SearchController::spawn(Arc::clone(&self.source), &self.config)
    }

    /// Hand an already-fetched article to the detail view and return its route id
    pub fn open_article(&self, article: Article) -> String {
        let route_id = article.id.to_string();
        match self.handoff.lock() {
            Ok(mut slot) => *slot = Some(article),
            Err(e) => log::warn!("Hand-off slot unavailable: {}", e),
        }
        route_id
    }

    /// Take the pending hand-off; a second call returns `None`
    pub fn take_handoff(&self) -> Option<Article> {
        self.handoff.lock().ok()?.take()
    }

    /// Resolve the detail view for a route, consuming any hand-off
    pub async fn resolve_detail(&self, route_id: Option<&str>) -> Option<DetailResolution> {
        let handoff = self.take_handoff();
        self.detail_gate
            .resolve(self.source.as_ref(), handoff, route_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockSource;
    use crate::models::fixtures::article;

    #[test]
    fn test_handoff_read_once() {
        let state = AppState::new(ClientConfig::default(), MockSource::new());
        let route = state.open_article(article(5, "Five", ""));
        assert_eq!(route, "5");
        assert_eq!(state.take_handoff().map(|a| a.id), Some(5));
        assert!(state.take_handoff().is_none());
    }

    #[tokio::test]
    async fn test_open_then_resolve_uses_handoff() {
        let state = AppState::new(ClientConfig::default(), MockSource::new());
        let route = state.open_article(article(5, "Five", ""));

        let resolution = state.resolve_detail(Some(&route)).await;
        assert_eq!(resolution, Some(DetailResolution::Render(article(5, "Five", ""))));
        assert!(state.source.id_calls().is_empty());

        // Reload: hand-off is gone, so the article is fetched
        let resolution = state.resolve_detail(Some(&route)).await;
        assert_eq!(resolution, Some(DetailResolution::RedirectToList));
        assert_eq!(state.source.id_calls(), vec![5]);
    }
}
