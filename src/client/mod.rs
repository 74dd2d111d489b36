//! HTTP client for the actor search endpoint
//!
//! One fetch is one GET request: query text, a string-encoded page limit,
//! and the continuation cursor (empty for the first page). No retry and no
//! timeout live here; a failed attempt is terminal for that attempt and the
//! caller decides what happens next.
//!
//! The [`PageFetcher`] trait is the seam between the state machine and the
//! network. Tests substitute a scripted fetcher; production code uses
//! [`ActorSearchClient`] backed by `reqwest`.

mod types;

pub use types::{Actor, ActorPage};

use async_trait::async_trait;
use tracing::debug;

use crate::error::FetchError;

/// Issues one paginated request to the search endpoint.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a single page for `query`.
    ///
    /// An empty `cursor` requests the first page of a fresh search; a
    /// non-empty cursor must be a token returned by a prior page for the
    /// same query.
    async fn fetch_page(
        &self,
        query: &str,
        cursor: &str,
        limit: u32,
    ) -> Result<ActorPage, FetchError>;
}

/// `reqwest`-backed fetcher for `app.bsky.actor.searchActors`.
#[derive(Debug, Clone)]
pub struct ActorSearchClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ActorSearchClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PageFetcher for ActorSearchClient {
    async fn fetch_page(
        &self,
        query: &str,
        cursor: &str,
        limit: u32,
    ) -> Result<ActorPage, FetchError> {
        debug!(query, cursor, limit, "fetching actor page");

        // The cursor parameter is always sent, empty string included.
        let limit_param = limit.to_string();
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("q", query), ("limit", limit_param.as_str()), ("cursor", cursor)])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Response {
                status: status.as_u16(),
            });
        }

        let page = response
            .json::<ActorPage>()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        debug!(
            actors = page.actors.len(),
            has_cursor = page.cursor.is_some(),
            "page received"
        );

        Ok(page)
    }
}
