//! Application events
//!
//! Async events sent from the controller to the render layer for updates
//! during a turn. Delivery is best-effort: a missing or closed receiver
//! never affects the turn outcome.

use serde::{Deserialize, Serialize};

use super::message::Message;
use super::types::ChatMode;

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// Notification displayed to the user (toast-style)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NotificationLevel::Error,
        }
    }
}

/// Events emitted by the controller to the frontend
///
/// Sent asynchronously via an mpsc channel so the render surface can update
/// while a backend call is in flight.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A turn entered the Sending state
    TurnStarted,

    /// A turn returned to Idle (success or failure)
    TurnCompleted,

    /// A new message was appended to the log
    MessageAdded(Message),

    /// The active conversation mode changed
    ModeChanged(ChatMode),

    /// A user-visible notification was raised
    Notify(Notification),
}
