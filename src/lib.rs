//! Incremental Bluesky actor search
//!
//! Fetches paginated results from `app.bsky.actor.searchActors`, accumulates
//! them newest-first by account creation time, and automatically continues
//! fetching further pages up to a per-query cap.

pub mod accumulator;
pub mod client;
mod error;
pub mod scheduler;
mod session;
pub mod state;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Actor search endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Page size requested per fetch. Also the hasMore heuristic threshold:
    /// a page of exactly this many actors counts as "more available".
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,

    /// Maximum automatic continuations per query.
    #[serde(default = "default_auto_load_cap")]
    pub auto_load_cap: u32,

    /// Query loaded at startup.
    #[serde(default = "default_query")]
    pub default_query: String,

    /// Canned searches offered alongside free-text input.
    #[serde(default = "default_predefined_searches")]
    pub predefined_searches: Vec<PredefinedSearch>,
}

/// A canned query with a short label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredefinedSearch {
    pub label: String,
    pub query: String,
}

fn default_endpoint() -> String {
    "https://public.api.bsky.app/xrpc/app.bsky.actor.searchActors".to_string()
}

fn default_page_limit() -> u32 {
    100
}

fn default_auto_load_cap() -> u32 {
    10
}

fn default_query() -> String {
    "@andreitr.bsky.social".to_string()
}

fn default_predefined_searches() -> Vec<PredefinedSearch> {
    [
        ("@nuwaves-future", "@nuwaves-future.bsky.social"),
        ("@botfrens", "@botfrens.bsky.social"),
        ("Artbots by", "#artbots by"),
        ("Automated artbot", "automated #artbot"),
    ]
    .into_iter()
    .map(|(label, query)| PredefinedSearch {
        label: label.to_string(),
        query: query.to_string(),
    })
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page_limit: default_page_limit(),
            auto_load_cap: default_auto_load_cap(),
            default_query: default_query(),
            predefined_searches: default_predefined_searches(),
        }
    }
}

/// Load config from config.yaml in package root
pub fn load_yaml_config() -> anyhow::Result<Config> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.yaml");

    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    } else {
        Ok(Config::default())
    }
}

pub use client::{Actor, ActorPage, ActorSearchClient, PageFetcher};
pub use error::FetchError;
pub use scheduler::ContinueFetch;
pub use session::SearchSession;
pub use state::{Phase, SearchEvent, SearchState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_endpoint_contract() {
        let config = Config::default();
        assert!(config.endpoint.ends_with("app.bsky.actor.searchActors"));
        assert_eq!(config.page_limit, 100);
        assert_eq!(config.auto_load_cap, 10);
        assert_eq!(config.predefined_searches.len(), 4);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("page_limit: 25\n").unwrap();
        assert_eq!(config.page_limit, 25);
        assert_eq!(config.auto_load_cap, 10);
        assert_eq!(config.default_query, "@andreitr.bsky.social");
    }
}
