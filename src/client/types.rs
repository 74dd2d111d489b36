//! Wire types for the actor search endpoint
//!
//! Mirrors the JSON shape of `app.bsky.actor.searchActors`: a page of actor
//! profiles plus an opaque continuation cursor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One actor profile as returned by the search endpoint.
///
/// `did` is the stable identifier; `handle` is the mutable display identity.
/// `created_at` may be absent on old accounts, so the sort key treats a
/// missing timestamp as the minimum epoch (sorts last in the newest-first
/// view) instead of failing the whole page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub did: String,

    pub handle: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Actor {
    /// Epoch-millisecond sort key derived from `created_at`.
    pub fn sort_key(&self) -> i64 {
        self.created_at
            .map(|t| t.timestamp_millis())
            .unwrap_or(i64::MIN)
    }

    /// Display name when set and non-empty, otherwise the handle.
    pub fn display_label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.handle,
        }
    }

    /// Profile page URL for this actor's handle.
    pub fn profile_url(&self) -> String {
        format!("https://bsky.app/profile/{}", self.handle)
    }

    /// Creation date formatted as `YYYY-MM-DD`, if known.
    pub fn created_date(&self) -> Option<String> {
        self.created_at.map(|t| t.format("%Y-%m-%d").to_string())
    }
}

/// One page of search results.
///
/// A missing `cursor` means the endpoint has no further pages to offer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorPage {
    pub actors: Vec<Actor>,

    #[serde(default)]
    pub cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor_json(created_at: &str) -> String {
        format!(
            r#"{{"did":"did:plc:abc123","handle":"bot.bsky.social","displayName":"Bot","createdAt":"{}"}}"#,
            created_at
        )
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let actor: Actor = serde_json::from_str(&actor_json("2024-03-01T12:00:00.000Z")).unwrap();
        assert_eq!(actor.did, "did:plc:abc123");
        assert_eq!(actor.display_name.as_deref(), Some("Bot"));
        assert!(actor.created_at.is_some());
        assert_eq!(actor.created_date().as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn missing_optional_fields_default_to_none() {
        let actor: Actor =
            serde_json::from_str(r#"{"did":"did:plc:x","handle":"x.bsky.social"}"#).unwrap();
        assert!(actor.display_name.is_none());
        assert!(actor.created_at.is_none());
        assert_eq!(actor.sort_key(), i64::MIN);
    }

    #[test]
    fn display_label_falls_back_to_handle() {
        let mut actor: Actor =
            serde_json::from_str(r#"{"did":"did:plc:x","handle":"x.bsky.social"}"#).unwrap();
        assert_eq!(actor.display_label(), "x.bsky.social");
        actor.display_name = Some("  ".to_string());
        assert_eq!(actor.display_label(), "x.bsky.social");
        actor.display_name = Some("X".to_string());
        assert_eq!(actor.display_label(), "X");
    }

    #[test]
    fn page_without_cursor_parses() {
        let page: ActorPage = serde_json::from_str(r#"{"actors":[]}"#).unwrap();
        assert!(page.actors.is_empty());
        assert!(page.cursor.is_none());
    }
}
