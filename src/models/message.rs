// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Direct message model and the small derivations the inbox needs.

use serde::{Deserialize, Serialize};

/// Chat message stored at `chats/{chat_id}/messages/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender_uid: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub attachment_url: Option<String>,
    /// Send time (epoch milliseconds)
    pub sent_at: i64,
}

/// Chat thread ID for a pair of users, independent of argument order.
pub fn chat_id_for(a: &str, b: &str) -> String {
    if a <= b {
        format!("{}_{}", a, b)
    } else {
        format!("{}_{}", b, a)
    }
}

/// Messages from `other_uid` sent after the reader's `last_read_ms`.
pub fn unread_count(messages: &[Message], other_uid: &str, last_read_ms: i64) -> usize {
    messages
        .iter()
        .filter(|m| m.sender_uid == other_uid && m.sent_at > last_read_ms)
        .count()
}
