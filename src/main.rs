// CLI demo: run one actor search to its terminal condition and print the
// accumulated, newest-first result list.
//
// Usage:
//   skyfinder                 search the configured default query
//   skyfinder <query...>      search the given free-text query

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use skyfinder::{load_yaml_config, ActorSearchClient, SearchSession};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = load_yaml_config()?;
    let query = {
        let args: Vec<String> = std::env::args().skip(1).collect();
        if args.is_empty() {
            config.default_query.clone()
        } else {
            args.join(" ")
        }
    };

    let fetcher = Arc::new(ActorSearchClient::new(config.endpoint.clone()));
    let mut session = SearchSession::new(fetcher, &config);

    if let Err(e) = session.submit(&query).await {
        // A failed attempt leaves whatever was already accumulated intact.
        tracing::warn!(error = %e, "search ended early");
    }

    let state = session.state();
    info!(
        results = state.results.len(),
        has_more = state.has_more,
        auto_load_count = state.auto_load_count,
        "search finished"
    );

    for actor in &state.results {
        let date = actor.created_date().unwrap_or_else(|| "????-??-??".to_string());
        let description = actor
            .description
            .as_deref()
            .unwrap_or("")
            .chars()
            .take(80)
            .collect::<String>()
            .replace('\n', " ");
        println!(
            "{date}  {label}  @{handle}  {url}  {description}",
            label = actor.display_label(),
            handle = actor.handle,
            url = actor.profile_url(),
        );
    }

    if state.has_more {
        println!(
            "-- {} results accumulated; more pages available (run again or raise auto_load_cap)",
            state.results.len()
        );
    }

    Ok(())
}
