//! Search query controller
//!
//! One driver task owns the list view's [`QueryState`]. It multiplexes three
//! event sources: the command channel (raw input, retry), the debounce timer
//! and the single in-flight fetch. Accepting a new keyword set replaces the
//! in-flight fetch, dropping the older one, so results always belong to the
//! most recently accepted keywords no matter which request finishes first.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::{rank_by_keywords, tokenize, Marker};
use crate::api::ArticleSource;
use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::format::article_card;
use crate::models::{Article, ArticleCard, KeywordSet, QueryState};

enum Command {
    Input(String),
    Retry,
}

/// Input waiting for the debounce window to close
enum PendingInput {
    Raw(String),
    /// Re-submission of an accepted set; skips de-duplication
    Retry(KeywordSet),
}

struct FetchOutcome {
    request: u64,
    keywords: KeywordSet,
    result: Result<Vec<Article>, FetchError>,
}

type InFlight = Pin<Box<dyn Future<Output = FetchOutcome> + Send>>;

/// Handle to the search driver task
pub struct SearchController {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<QueryState>,
    marker: Marker,
    task: JoinHandle<()>,
}

impl SearchController {
    /// Start a controller that immediately loads the unfiltered list
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<S: ArticleSource>(source: Arc<S>, config: &ClientConfig) -> Self {
        Self::start(source, config, true)
    }

    /// Start a controller that stays idle until the first input
    pub fn idle<S: ArticleSource>(source: Arc<S>, config: &ClientConfig) -> Self {
        Self::start(source, config, false)
    }

    fn start<S: ArticleSource>(source: Arc<S>, config: &ClientConfig, initial_load: bool) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(QueryState::default());

        let driver = Driver {
            source,
            debounce: config.debounce,
            error_message: config.error_message.clone(),
            state: state_tx,
            accepted: None,
            request: 0,
        };
        let task = tokio::spawn(driver.run(command_rx, initial_load));

        Self {
            commands,
            state,
            marker: config.marker.clone(),
            task,
        }
    }

    /// Feed a new raw input value (one keystroke's worth of text)
    pub fn set_input(&self, raw: impl Into<String>) {
        if self.commands.send(Command::Input(raw.into())).is_err() {
            log::warn!("Search input dropped: controller has stopped");
        }
    }

    /// Re-submit the last accepted keyword set
    pub fn retry(&self) {
        if self.commands.send(Command::Retry).is_err() {
            log::warn!("Search retry dropped: controller has stopped");
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> QueryState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.state.clone()
    }

    /// Current results as highlighted display cards
    pub fn cards(&self) -> Vec<ArticleCard> {
        let state = self.state.borrow();
        state
            .results
            .iter()
            .map(|article| article_card(article, state.keywords.as_slice(), &self.marker))
            .collect()
    }

    /// Stop the driver task and wait for it to exit
    pub async fn shutdown(self) {
        let Self { commands, task, .. } = self;
        drop(commands);
        if let Err(e) = task.await {
            log::warn!("Search driver ended abnormally: {}", e);
        }
    }
}

struct Driver<S> {
    source: Arc<S>,
    debounce: Duration,
    error_message: String,
    state: watch::Sender<QueryState>,
    /// Last accepted keyword set, `None` before the first acceptance
    accepted: Option<KeywordSet>,
    /// Sequence number of the latest accepted request
    request: u64,
}

impl<S: ArticleSource> Driver<S> {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>, initial_load: bool) {
        let mut pending: Option<PendingInput> = None;
        let mut in_flight: Option<InFlight> = None;

        if initial_load {
            in_flight = Some(self.accept(KeywordSet::default()));
        }

        let timer = tokio::time::sleep(self.debounce);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                command = commands.recv() => {
                    let input = match command {
                        Some(Command::Input(raw)) => PendingInput::Raw(raw),
                        Some(Command::Retry) => match &self.accepted {
                            Some(keywords) => PendingInput::Retry(keywords.clone()),
                            None => {
                                log::debug!("Retry ignored: nothing accepted yet");
                                continue;
                            }
                        },
                        None => break,
                    };
                    // Restart the window; the newer input supersedes the older one
                    pending = Some(input);
                    timer.as_mut().reset(Instant::now() + self.debounce);
                }
                () = &mut timer, if pending.is_some() => {
                    if let Some(input) = pending.take() {
                        if let Some(fetch) = self.on_debounced(input) {
                            in_flight = Some(fetch);
                        }
                    }
                }
                outcome = next_outcome(&mut in_flight), if in_flight.is_some() => {
                    in_flight = None;
                    self.settle(outcome);
                }
            }
        }

        log::debug!("Search driver stopped");
    }

    fn on_debounced(&mut self, input: PendingInput) -> Option<InFlight> {
        let keywords = match input {
            PendingInput::Raw(raw) => {
                let keywords = tokenize(Some(&raw));
                if self.accepted.as_ref() == Some(&keywords) {
                    log::debug!("Keywords unchanged ({:?}), not searching", keywords.as_slice());
                    return None;
                }
                keywords
            }
            PendingInput::Retry(keywords) => keywords,
        };
        Some(self.accept(keywords))
    }

    /// Commit a keyword set and start its fetch
    fn accept(&mut self, keywords: KeywordSet) -> InFlight {
        self.request += 1;
        self.accepted = Some(keywords.clone());
        log::info!("Search #{} accepted: {:?}", self.request, keywords.as_slice());

        self.state.send_modify(|state| {
            // Results kept while pending must follow the new keywords' order
            let kept = std::mem::take(&mut state.results);
            state.results = rank_by_keywords(kept, keywords.as_slice());
            state.keywords = keywords.clone();
            state.is_loading = true;
            state.error = None;
            state.started = true;
        });

        let source = Arc::clone(&self.source);
        let request = self.request;
        Box::pin(async move {
            let result = source.fetch_articles(keywords.to_csv()).await;
            FetchOutcome {
                request,
                keywords,
                result,
            }
        })
    }

    fn settle(&mut self, outcome: FetchOutcome) {
        if outcome.request != self.request {
            log::debug!(
                "Discarding result of search #{} (latest is #{})",
                outcome.request,
                self.request
            );
            return;
        }

        match outcome.result {
            Ok(articles) => {
                let ranked = rank_by_keywords(articles, outcome.keywords.as_slice());
                log::info!("Search #{} settled with {} results", outcome.request, ranked.len());
                self.state.send_modify(|state| {
                    state.results = ranked;
                    state.is_loading = false;
                });
            }
            Err(e) => {
                log::warn!("Search #{} failed: {}", outcome.request, e);
                let message = self.error_message.clone();
                self.state.send_modify(|state| {
                    state.error = Some(message);
                    state.results = Vec::new();
                    state.is_loading = false;
                });
            }
        }
    }
}

async fn next_outcome(in_flight: &mut Option<InFlight>) -> FetchOutcome {
    match in_flight {
        Some(fetch) => fetch.await,
        None => std::future::pending().await,
    }
}
