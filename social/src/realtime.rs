//! Change-notification channel codec.
//!
//! The backend pushes row inserts over a Phoenix-channel WebSocket. This
//! module builds the frames the client sends (join, heartbeat, leave),
//! recognises insert notifications among everything the server sends, and
//! computes reconnect delays. The socket loop itself lives in the client.

#[cfg(test)]
#[path = "realtime_test.rs"]
mod realtime_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ApiError;

pub const HEARTBEAT_INTERVAL_SECS: u64 = 30;
pub const RECONNECT_INITIAL_MS: u64 = 1_000;
pub const RECONNECT_MAX_MS: u64 = 10_000;

/// One subscribed change feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub topic: String,
    pub table: &'static str,
    pub filter: String,
}

impl Subscription {
    /// New posts in a community.
    #[must_use]
    pub fn community_posts(community_id: &str) -> Self {
        Self {
            topic: format!("realtime:community-posts-{community_id}"),
            table: "posts",
            filter: format!("community_id=eq.{community_id}"),
        }
    }

    /// New comments on a post.
    #[must_use]
    pub fn post_comments(post_id: &str) -> Self {
        Self {
            topic: format!("realtime:post-comments-{post_id}"),
            table: "comments",
            filter: format!("post_id=eq.{post_id}"),
        }
    }

    #[must_use]
    pub fn join_message(&self, access_token: Option<&str>, msg_ref: u64) -> PhoenixMessage {
        PhoenixMessage {
            topic: self.topic.clone(),
            event: "phx_join".to_owned(),
            payload: json!({
                "config": {
                    "postgres_changes": [{
                        "event": "INSERT",
                        "schema": "public",
                        "table": self.table,
                        "filter": self.filter,
                    }]
                },
                "access_token": access_token,
            }),
            msg_ref: Some(msg_ref.to_string()),
        }
    }

    #[must_use]
    pub fn leave_message(&self, msg_ref: u64) -> PhoenixMessage {
        PhoenixMessage {
            topic: self.topic.clone(),
            event: "phx_leave".to_owned(),
            payload: json!({}),
            msg_ref: Some(msg_ref.to_string()),
        }
    }
}

/// A Phoenix channel frame (JSON serializer v1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhoenixMessage {
    pub topic: String,
    pub event: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(rename = "ref", default)]
    pub msg_ref: Option<String>,
}

impl PhoenixMessage {
    #[must_use]
    pub fn heartbeat(msg_ref: u64) -> Self {
        Self {
            topic: "phoenix".to_owned(),
            event: "heartbeat".to_owned(),
            payload: json!({}),
            msg_ref: Some(msg_ref.to_string()),
        }
    }

    pub fn encode(&self) -> Result<String, ApiError> {
        serde_json::to_string(self).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn decode(text: &str) -> Result<Self, ApiError> {
        serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Extract the inserted row if `text` is an insert notification for `topic`.
///
/// Replies, presence and system frames, other topics, and non-insert
/// changes all yield `Ok(None)`. A matching insert whose row does not decode
/// as `T` is an error.
pub fn decode_insert<T: DeserializeOwned>(text: &str, topic: &str) -> Result<Option<T>, ApiError> {
    let msg = PhoenixMessage::decode(text)?;
    if msg.event != "postgres_changes" || msg.topic != topic {
        return Ok(None);
    }
    let data = &msg.payload["data"];
    if data["type"].as_str() != Some("INSERT") {
        return Ok(None);
    }
    let record = data.get("record").cloned().unwrap_or(Value::Null);
    serde_json::from_value(record)
        .map(Some)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Monotonic `ref` counter for outgoing frames.
#[derive(Clone, Debug, Default)]
pub struct RefCounter(u64);

impl RefCounter {
    pub fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

/// Doubling reconnect delay, capped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backoff {
    current_ms: u64,
}

impl Default for Backoff {
    fn default() -> Self {
        Self { current_ms: RECONNECT_INITIAL_MS }
    }
}

impl Backoff {
    /// Delay to wait now; the following call returns double, up to the cap.
    pub fn next_delay_ms(&mut self) -> u64 {
        let delay = self.current_ms;
        self.current_ms = (self.current_ms * 2).min(RECONNECT_MAX_MS);
        delay
    }

    /// Call after a successful connect.
    pub fn reset(&mut self) {
        self.current_ms = RECONNECT_INITIAL_MS;
    }
}
