//! Search session: query control and the fetch loop
//!
//! [`SearchSession`] owns the state machine and the fetcher and is the only
//! writer of [`SearchState`]. All its operations run on the caller's task;
//! the network call is the only suspension point, and the loading phase
//! gates every trigger, so at most one fetch is ever in flight.
//!
//! After each successful fetch the session consults the scheduler and keeps
//! fetching until it declines, so a submission drives itself through the
//! automatic continuations without further calls.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::client::PageFetcher;
use crate::error::FetchError;
use crate::scheduler;
use crate::state::{reduce, SearchEvent, SearchState};
use crate::Config;

pub struct SearchSession {
    fetcher: Arc<dyn PageFetcher>,
    state: SearchState,
}

impl SearchSession {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &Config) -> Self {
        Self {
            fetcher,
            state: SearchState::new(config.page_limit, config.auto_load_cap),
        }
    }

    /// Current state. Read-only; all mutation goes through the reducer.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Submit a new query. A query that is empty after trimming is ignored
    /// and leaves the state untouched.
    pub async fn submit(&mut self, text: &str) -> Result<(), FetchError> {
        if text.trim().is_empty() {
            debug!("ignoring empty query submission");
            return Ok(());
        }
        self.begin(text).await
    }

    /// Submit a predefined query. The text is caller-supplied and trusted,
    /// so no emptiness validation is applied.
    pub async fn submit_predefined(&mut self, text: &str) -> Result<(), FetchError> {
        self.begin(text).await
    }

    /// Manually fetch the next page of the current query.
    ///
    /// No-op unless a continuation cursor exists, the last page was full,
    /// and nothing is in flight. Not subject to the auto-load cap.
    pub async fn request_more(&mut self) -> Result<(), FetchError> {
        if self.state.cursor.is_empty() || !self.state.has_more || self.state.loading() {
            debug!("request_more has nothing to do");
            return Ok(());
        }
        let cursor = self.state.cursor.clone();
        self.fetch_and_drain(&cursor).await
    }

    async fn begin(&mut self, query: &str) -> Result<(), FetchError> {
        if self.state.loading() {
            debug!("fetch in flight, ignoring submission");
            return Ok(());
        }
        info!(query, "starting fresh search");
        self.state = reduce(
            &self.state,
            &SearchEvent::Submitted {
                query: query.to_string(),
            },
        );
        self.fetch_and_drain("").await
    }

    /// One fetch, then as many automatic continuations as the scheduler
    /// allows. Stops on the first failure; no retry.
    async fn fetch_and_drain(&mut self, cursor: &str) -> Result<(), FetchError> {
        self.fetch_once(cursor).await?;

        while let Some(cmd) = scheduler::next_command(&self.state) {
            self.state = reduce(&self.state, &SearchEvent::AutoLoad);
            info!(
                auto_load_count = self.state.auto_load_count,
                cursor = %cmd.cursor,
                "auto-loading next page"
            );
            self.fetch_once(&cmd.cursor).await?;
        }
        Ok(())
    }

    async fn fetch_once(&mut self, cursor: &str) -> Result<(), FetchError> {
        if self.state.loading() {
            debug!("fetch already in flight, skipping trigger");
            return Ok(());
        }

        // Tag the fetch with the generation in effect when it was issued;
        // the reducer discards the completion if a fresh query superseded it.
        let generation = self.state.generation;
        let query = self.state.query.clone();
        let limit = self.state.limit();

        self.state = reduce(&self.state, &SearchEvent::FetchStarted);

        match self.fetcher.fetch_page(&query, cursor, limit).await {
            Ok(page) => {
                self.state = reduce(&self.state, &SearchEvent::PageArrived { generation, page });
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "fetch attempt failed");
                self.state = reduce(&self.state, &SearchEvent::FetchFailed { generation });
                Err(e)
            }
        }
    }
}
