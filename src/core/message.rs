//! Message log entries
//!
//! Messages are append-only: once in the log they are never edited or
//! reordered. The typing indicator is derived from session state, not stored
//! as a message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message author (user or assistant)
///
/// Mode announcements and other synthetic notices are authored by the
/// assistant; there is no separate system author in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Image reference carried by a message
///
/// Either user-supplied (analysis input) or backend-produced (generation
/// output). The URL is an opaque URI; for user files it is a local object
/// reference, never an uploaded address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub url: String,
    pub alt_text: String,
    pub is_generated: bool,
}

/// A single entry in the session message log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique within a session
    pub id: String,
    pub content: String,
    pub role: MessageRole,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<ImageAttachment>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content, None)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content, None)
    }

    pub fn with_attachment(mut self, attachment: ImageAttachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    fn new(role: MessageRole, content: impl Into<String>, attachment: Option<ImageAttachment>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            role,
            created_at: Utc::now(),
            attachment,
        }
    }
}
