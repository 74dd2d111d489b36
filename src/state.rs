//! Search state machine
//!
//! The whole search lifecycle is one value, [`SearchState`], advanced by a
//! pure reducer: `reduce(&state, &event) -> state`. Every transition is
//! testable without a network or a UI harness.
//!
//! # Generations
//!
//! Each accepted fresh query bumps `generation`. Completion events carry the
//! generation of the fetch that produced them; a completion whose generation
//! no longer matches the current state is discarded untouched, so a fetch
//! still in flight when a new query is submitted cannot write into the new
//! query's results.
//!
//! # hasMore heuristic
//!
//! The endpoint has no explicit end-of-results marker. A page counts as
//! "more available" exactly when it came back full (`actors.len() == limit`).
//! A short or empty page terminates pagination without erroring.

use tracing::debug;

use crate::accumulator;
use crate::client::{Actor, ActorPage};

/// Lifecycle phase of the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No fetch issued yet, or the prior cycle finished.
    Idle,
    /// A fetch is in flight. All triggers are no-ops in this phase.
    Loading,
    /// The last fetch succeeded; `results`, `cursor`, `has_more` are current.
    Loaded,
    /// The last fetch failed. New submissions are accepted as usual.
    Errored,
}

/// Accumulated state for one search session.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Current query text.
    pub query: String,
    /// Continuation token. Empty means the next fetch is a fresh search.
    pub cursor: String,
    /// Accumulated actors, newest-first by creation time.
    pub results: Vec<Actor>,
    pub phase: Phase,
    /// Size heuristic: the last page came back full.
    pub has_more: bool,
    /// Automatic continuation counter, 1 on each fresh query.
    pub auto_load_count: u32,
    /// Bumped on every accepted fresh query; tags in-flight fetches.
    pub generation: u64,

    limit: u32,
    auto_load_cap: u32,
}

impl SearchState {
    pub fn new(limit: u32, auto_load_cap: u32) -> Self {
        Self {
            query: String::new(),
            cursor: String::new(),
            results: Vec::new(),
            phase: Phase::Idle,
            has_more: false,
            auto_load_count: 1,
            generation: 0,
            limit,
            auto_load_cap,
        }
    }

    /// Configured page limit (the `limit` request parameter).
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Maximum automatic continuations per query.
    pub fn auto_load_cap(&self) -> u32 {
        self.auto_load_cap
    }

    pub fn loading(&self) -> bool {
        self.phase == Phase::Loading
    }
}

/// Events that advance the state machine.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// A fresh query was accepted. Resets accumulation, bumps the generation.
    Submitted { query: String },
    /// A fetch was issued for the current query and cursor.
    FetchStarted,
    /// A fetch completed with a page.
    PageArrived { generation: u64, page: ActorPage },
    /// A fetch failed. No partial data is merged.
    FetchFailed { generation: u64 },
    /// The scheduler decided to continue automatically.
    AutoLoad,
}

/// Advance `state` by one event.
pub fn reduce(state: &SearchState, event: &SearchEvent) -> SearchState {
    match event {
        SearchEvent::Submitted { query } => SearchState {
            query: query.clone(),
            cursor: String::new(),
            results: Vec::new(),
            phase: state.phase,
            has_more: false,
            auto_load_count: 1,
            generation: state.generation + 1,
            limit: state.limit,
            auto_load_cap: state.auto_load_cap,
        },

        SearchEvent::FetchStarted => SearchState {
            phase: Phase::Loading,
            ..state.clone()
        },

        SearchEvent::PageArrived { generation, page } => {
            if *generation != state.generation {
                debug!(
                    stale = *generation,
                    current = state.generation,
                    "discarding completion from superseded query"
                );
                return state.clone();
            }
            let fresh = state.cursor.is_empty();
            let has_more = page.actors.len() as u32 == state.limit;
            SearchState {
                results: accumulator::merge(state.results.clone(), &page.actors, fresh),
                cursor: page.cursor.clone().unwrap_or_default(),
                has_more,
                phase: Phase::Loaded,
                ..state.clone()
            }
        }

        SearchEvent::FetchFailed { generation } => {
            if *generation != state.generation {
                return state.clone();
            }
            // Only the in-flight flag changes; results/cursor/has_more stay.
            SearchState {
                phase: Phase::Errored,
                ..state.clone()
            }
        }

        SearchEvent::AutoLoad => SearchState {
            auto_load_count: state.auto_load_count + 1,
            ..state.clone()
        },
    }
}
