//! Article search client
//!
//! Keyword search over a news article API with client-side relevance
//! ranking and match highlighting, plus list-to-detail navigation that
//! reuses articles already in memory.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod navigation;
pub mod search;
pub mod state;

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::{ArticleSource, HttpArticleSource};
use crate::config::ClientConfig;
use crate::error::AppError;
use crate::format::{article_card, format_date};
use crate::models::{Article, QueryState};
use crate::navigation::DetailResolution;
use crate::search::Marker;
use crate::state::AppState;

/// Front end options parsed from the command line
#[derive(Debug, Default)]
pub struct RunOptions {
    pub config_path: Option<PathBuf>,
    /// Resolve a single article instead of starting a search session
    pub article_id: Option<String>,
}

/// Run the terminal front end
pub async fn run(options: RunOptions) -> Result<(), AppError> {
    let config = ClientConfig::load(options.config_path.as_deref())?;
    log::info!("Using article API at {}", config.api_url);

    let source = HttpArticleSource::new(&config)?;
    let state = AppState::new(config, source);

    match options.article_id {
        Some(route_id) => {
            show_detail(&state, Some(&route_id)).await;
            Ok(())
        }
        None => search_session(&state).await,
    }
}

/// Interactive list view: every stdin line is a new search input
async fn search_session<S: ArticleSource>(state: &AppState<S>) -> Result<(), AppError> {
    let controller = state.search_controller();

    let mut updates = controller.subscribe();
    let marker = state.config.marker.clone();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            if !snapshot.is_loading {
                print_results(&snapshot, &marker);
            }
        }
    });

    println!("Type keywords to search. Commands: :retry, :open N, :quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        match line.split_once(' ').unwrap_or((line, "")) {
            (":quit", _) => break,
            (":retry", _) => controller.retry(),
            (":open", index) => {
                let selected = index
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| controller.state().results.get(i).cloned());
                match selected {
                    Some(article) => {
                        let route_id = state.open_article(article);
                        show_detail(state, Some(&route_id)).await;
                    }
                    None => println!("No result numbered {:?}", index.trim()),
                }
            }
            _ => controller.set_input(line),
        }
    }

    controller.shutdown().await;
    printer.abort();
    Ok(())
}

async fn show_detail<S: ArticleSource>(state: &AppState<S>, route_id: Option<&str>) {
    match state.resolve_detail(route_id).await {
        Some(DetailResolution::Render(article)) => print_article(&article),
        Some(DetailResolution::RedirectToList) => println!("Article unavailable, back to the list."),
        None => {}
    }
}

fn print_results(state: &QueryState, marker: &Marker) {
    if let Some(error) = &state.error {
        println!("{} (type :retry)", error);
        return;
    }

    if state.keywords.is_empty() {
        println!("{} articles", state.results_count());
    } else {
        println!("{} results for {}", state.results_count(), state.keywords.join(", "));
    }
    for (i, article) in state.results.iter().enumerate() {
        let card = article_card(article, state.keywords.as_slice(), marker);
        println!("{:>3}. {}", i + 1, card.title);
        println!("     {} | {}", card.news_site, card.published);
        println!("     {}", card.summary);
    }
}

fn print_article(article: &Article) {
    println!("{}", article.title);
    println!("{} | {}", article.news_site, format_date(&article.published_at));
    if !article.authors.is_empty() {
        let names: Vec<&str> = article.authors.iter().map(|a| a.name.as_str()).collect();
        println!("By {}", names.join(", "));
    }
    println!();
    println!("{}", article.summary);
    println!();
    println!("{}", article.url);
}
