//! Automatic continuation
//!
//! After every fetch completion the session asks this module whether to
//! fetch the next page without user action. The decision is an explicit
//! command derived from the completed state, not a reaction to incidental
//! flag changes: continue exactly when the last page came back full, a
//! continuation cursor exists, nothing is in flight, and the per-query
//! cap has not been reached.
//!
//! Once the counter hits the cap, automatic continuation stops permanently
//! for that query. Manual continuation is never capped.

use tracing::debug;

use crate::state::{Phase, SearchState};

/// Command to fetch the next page of the current query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinueFetch {
    pub query: String,
    pub cursor: String,
    pub generation: u64,
}

/// Decide whether a just-completed fetch should be followed automatically.
///
/// Returns `None` while a fetch is in flight, after a failure, when the
/// last page was short, when no cursor was returned, or once the auto-load
/// counter has reached the cap.
pub fn next_command(state: &SearchState) -> Option<ContinueFetch> {
    if state.phase != Phase::Loaded {
        return None;
    }
    if !state.has_more || state.cursor.is_empty() {
        return None;
    }
    if state.auto_load_count >= state.auto_load_cap() {
        debug!(
            auto_load_count = state.auto_load_count,
            "auto-load cap reached, awaiting manual continuation"
        );
        return None;
    }
    Some(ContinueFetch {
        query: state.query.clone(),
        cursor: state.cursor.clone(),
        generation: state.generation,
    })
}
