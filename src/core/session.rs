//! Session state store
//!
//! The only mutable state in the core: the ordered message log, the active
//! mode, and the in-flight flag. Shared behind `Arc<RwLock>` so the render
//! layer can read `{messages, mode, is_processing}` while the controller
//! mutates through the same handle.

use std::sync::{Arc, RwLock};

use super::message::Message;
use super::types::ChatMode;

/// Seeded greeting for a fresh session
pub const WELCOME_MESSAGE: &str = "Hello! How can I assist you today?";

/// In-memory session state
///
/// Lives for the lifetime of the controller; nothing is persisted.
#[derive(Debug, Clone)]
pub struct Session {
    messages: Vec<Message>,
    mode: ChatMode,
    is_processing: bool,
}

impl Session {
    /// Create a session with the seeded welcome message and default mode
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(WELCOME_MESSAGE)],
            mode: ChatMode::default(),
            is_processing: false,
        }
    }

    /// The single mutation primitive: insert at the end, never reorder
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn mode(&self) -> ChatMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ChatMode) {
        self.mode = mode;
    }

    /// Whether a turn is currently in flight
    ///
    /// The typing indicator is a pure render of this flag; no placeholder
    /// message is ever stored in the log.
    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub(crate) fn set_processing(&mut self, processing: bool) {
        self.is_processing = processing;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to the session state
///
/// The controller holds one; the render layer gets clones for read-only
/// access.
pub type SessionHandle = Arc<RwLock<Session>>;

/// Create a fresh shared session
pub fn new_session_handle() -> SessionHandle {
    Arc::new(RwLock::new(Session::new()))
}
