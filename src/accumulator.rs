//! Result accumulation and ordering
//!
//! Merges a freshly fetched page into the running result set and keeps the
//! whole view ordered newest-first by account creation time. The sort is
//! stable, so actors with equal timestamps keep their original fetch order.
//!
//! No deduplication happens here: if the endpoint returns the same actor on
//! two pages, both copies land in the merged view.

use std::cmp::Reverse;

use crate::client::Actor;

/// Merge `incoming` into `existing` and return the re-sorted view.
///
/// A fresh query discards `existing` and starts from the new page alone;
/// an incremental fetch appends to it. Either way the full sequence is
/// re-sorted descending by created-at epoch millis.
pub fn merge(existing: Vec<Actor>, incoming: &[Actor], fresh: bool) -> Vec<Actor> {
    let mut merged = if fresh {
        Vec::with_capacity(incoming.len())
    } else {
        existing
    };
    merged.extend_from_slice(incoming);
    // Stable sort: equal timestamps keep fetch order.
    merged.sort_by_key(|a| Reverse(a.sort_key()));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn actor(did: &str, epoch_secs: i64) -> Actor {
        Actor {
            did: did.to_string(),
            handle: format!("{did}.bsky.social"),
            display_name: None,
            avatar: None,
            description: None,
            created_at: Some(Utc.timestamp_opt(epoch_secs, 0).unwrap()),
        }
    }

    fn dids(actors: &[Actor]) -> Vec<&str> {
        actors.iter().map(|a| a.did.as_str()).collect()
    }

    #[test]
    fn fresh_merge_discards_existing() {
        let existing = vec![actor("old", 50)];
        let incoming = vec![actor("a", 10), actor("b", 30)];
        let merged = merge(existing, &incoming, true);
        assert_eq!(dids(&merged), vec!["b", "a"]);
    }

    #[test]
    fn incremental_merge_appends_and_resorts() {
        let existing = vec![actor("c", 300), actor("a", 100)];
        let incoming = vec![actor("b", 200), actor("d", 400)];
        let merged = merge(existing, &incoming, false);
        assert_eq!(dids(&merged), vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn equal_timestamps_keep_fetch_order() {
        let existing = vec![actor("first", 100), actor("second", 100)];
        let incoming = vec![actor("third", 100)];
        let merged = merge(existing, &incoming, false);
        assert_eq!(dids(&merged), vec!["first", "second", "third"]);
    }

    #[test]
    fn merge_is_idempotent_under_resorting() {
        let merged = merge(
            vec![actor("a", 3), actor("b", 1)],
            &[actor("c", 2)],
            false,
        );
        let again = merge(merged.clone(), &[], false);
        assert_eq!(dids(&again), dids(&merged));
    }

    #[test]
    fn duplicates_are_not_collapsed() {
        let existing = vec![actor("dup", 100)];
        let incoming = vec![actor("dup", 100)];
        let merged = merge(existing, &incoming, false);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn missing_created_at_sorts_last() {
        let mut no_date = actor("nodate", 0);
        no_date.created_at = None;
        let merged = merge(vec![no_date], &[actor("dated", 10)], false);
        assert_eq!(dids(&merged), vec!["dated", "nodate"]);
    }
}
