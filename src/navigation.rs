//! Detail view resolution
//!
//! Decides, once per navigation, whether the detail view can render an
//! article already in hand or has to fetch it by id.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::ArticleSource;
use crate::models::Article;

/// Where a detail navigation ends up
#[derive(Debug, Clone, PartialEq)]
pub enum DetailResolution {
    Render(Article),
    RedirectToList,
}

/// Parse a route id as a positive integer
pub fn parse_route_id(route_id: Option<&str>) -> Option<u64> {
    route_id?.trim().parse::<u64>().ok().filter(|id| *id > 0)
}

/// Resolves detail navigations, discarding any that were overtaken
#[derive(Debug, Default)]
pub struct DetailGate {
    generation: AtomicU64,
}

impl DetailGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a detail navigation
    ///
    /// Returns `None` when another navigation started while this one was
    /// fetching; the caller must not render a stale result.
    pub async fn resolve<S: ArticleSource>(
        &self,
        source: &S,
        handoff: Option<Article>,
        route_id: Option<&str>,
    ) -> Option<DetailResolution> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let id = parse_route_id(route_id);

        if let Some(article) = handoff {
            match id {
                Some(id) if id != article.id => {
                    log::debug!("Discarding hand-off for article {} on route {}", article.id, id);
                }
                _ => return Some(DetailResolution::Render(article)),
            }
        }

        let Some(id) = id else {
            log::debug!("Invalid article route id {:?}, redirecting", route_id);
            return Some(DetailResolution::RedirectToList);
        };

        let resolution = match source.fetch_article_by_id(id).await {
            Ok(article) => DetailResolution::Render(article),
            Err(e) => {
                log::warn!("Failed to load article {}: {}", id, e);
                DetailResolution::RedirectToList
            }
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("Navigation to article {} was superseded", id);
            return None;
        }
        Some(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockSource;
    use crate::models::fixtures::article;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_parse_route_id() {
        assert_eq!(parse_route_id(Some("42")), Some(42));
        assert_eq!(parse_route_id(Some("0")), None);
        assert_eq!(parse_route_id(Some("-3")), None);
        assert_eq!(parse_route_id(Some("abc")), None);
        assert_eq!(parse_route_id(Some("")), None);
        assert_eq!(parse_route_id(None), None);
    }

    #[tokio::test]
    async fn test_invalid_ids_redirect_without_fetching() {
        let source = MockSource::new();
        let gate = DetailGate::new();

        for route_id in [Some("0"), Some("-3"), Some("abc"), None] {
            let resolution = gate.resolve(&source, None, route_id).await;
            assert_eq!(resolution, Some(DetailResolution::RedirectToList));
        }
        assert!(source.id_calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetches_without_handoff() {
        let source = MockSource::new().with_article(article(42, "Fetched", ""));
        let gate = DetailGate::new();

        let resolution = gate.resolve(&source, None, Some("42")).await;
        assert_eq!(resolution, Some(DetailResolution::Render(article(42, "Fetched", ""))));
        assert_eq!(source.id_calls(), vec![42]);
    }

    #[tokio::test]
    async fn test_handoff_skips_fetch() {
        let source = MockSource::new();
        let gate = DetailGate::new();

        let held = article(42, "In memory", "");
        let resolution = gate.resolve(&source, Some(held.clone()), Some("42")).await;
        assert_eq!(resolution, Some(DetailResolution::Render(held)));
        assert!(source.id_calls().is_empty());
    }

    #[tokio::test]
    async fn test_mismatched_handoff_is_ignored() {
        let source = MockSource::new().with_article(article(7, "Seven", ""));
        let gate = DetailGate::new();

        let resolution = gate
            .resolve(&source, Some(article(42, "Stale", "")), Some("7"))
            .await;
        assert_eq!(resolution, Some(DetailResolution::Render(article(7, "Seven", ""))));
        assert_eq!(source.id_calls(), vec![7]);
    }

    #[tokio::test]
    async fn test_fetch_failure_redirects() {
        let source = MockSource::new();
        let gate = DetailGate::new();

        let resolution = gate.resolve(&source, None, Some("99")).await;
        assert_eq!(resolution, Some(DetailResolution::RedirectToList));
        assert_eq!(source.id_calls(), vec![99]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_navigation_is_dropped() {
        let source = Arc::new(
            MockSource::new()
                .with_article(article(1, "Slow", ""))
                .with_delay(Some("1"), Duration::from_millis(500))
                .with_article(article(2, "Fast", "")),
        );
        let gate = Arc::new(DetailGate::new());

        let slow = {
            let (source, gate) = (source.clone(), gate.clone());
            tokio::spawn(async move { gate.resolve(source.as_ref(), None, Some("1")).await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        let fast = gate.resolve(source.as_ref(), None, Some("2")).await;
        assert_eq!(fast, Some(DetailResolution::Render(article(2, "Fast", ""))));
        assert_eq!(slow.await.unwrap(), None);
    }
}
