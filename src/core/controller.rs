//! Chat session controller
//!
//! Owns the turn lifecycle: validation, the busy gate, mode dispatch to the
//! backend adapter, and mapping results back into the message log. One turn
//! at a time per session; the state machine is Idle → Sending → Idle with no
//! intermediate state stored.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::backend::{AiBackend, BackendError};

use super::attachment::FileAttachment;
use super::events::{AppEvent, Notification};
use super::message::{ImageAttachment, Message};
use super::session::{new_session_handle, Session, SessionHandle};
use super::types::ChatMode;

/// Fixed prompt sent alongside an image in analysis mode
const ANALYSIS_PROMPT: &str = "What do you see in this image?";

/// Reply synthesized when analysis mode is used without an attachment
const UPLOAD_PROMPT_REPLY: &str = "Please upload an image for me to analyze.";

/// Assistant text accompanying a generated image
const GENERATED_IMAGE_REPLY: &str = "Here's your generated image based on your prompt.";

/// Alt text for generated images
const GENERATED_IMAGE_ALT: &str = "Generated AI image";

/// Outcome of a `send_message` call
///
/// Nothing at this layer is fatal: rejections are silent no-ops and backend
/// failures surface as a notification, so the outcome is a plain enum rather
/// than a `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The turn ran and an assistant message was appended
    Completed,
    /// The call was ignored without touching the log
    Rejected(RejectReason),
    /// The backend call failed; an error notification was raised
    Failed,
}

/// Why a `send_message` call was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Empty/whitespace content with no attachment
    EmptyInput,
    /// A turn is already in flight
    Busy,
}

/// Clears the in-flight flag when the turn scope ends
///
/// Held for the duration of the backend call so the flag is released on
/// every exit path, including panics and task cancellation.
struct ProcessingGuard {
    session: SessionHandle,
}

impl ProcessingGuard {
    fn new(session: SessionHandle) -> Self {
        Self { session }
    }
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        if let Ok(mut session) = self.session.write() {
            session.set_processing(false);
        }
    }
}

/// The mode controller: dispatches turns to a pluggable backend
///
/// Cheap to clone (Arc-backed); the render layer holds a clone of the
/// session handle for read-only display while the controller mutates it.
#[derive(Clone)]
pub struct ChatController {
    session: SessionHandle,
    backend: Arc<dyn AiBackend>,
    events: Option<UnboundedSender<AppEvent>>,
}

impl ChatController {
    /// Create a controller over a fresh session
    ///
    /// The session starts with the seeded welcome message and mode `Text`.
    pub fn new(backend: Arc<dyn AiBackend>) -> Self {
        Self {
            session: new_session_handle(),
            backend,
            events: None,
        }
    }

    /// Attach an event channel for the render layer
    pub fn with_events(mut self, events: UnboundedSender<AppEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Shared handle for read-only access to the session state
    pub fn session(&self) -> SessionHandle {
        Arc::clone(&self.session)
    }

    /// Snapshot of the current session state
    pub fn snapshot(&self) -> Session {
        self.read_session().clone()
    }

    /// Switch the conversation mode
    ///
    /// Always succeeds, never calls the backend, and appends exactly one
    /// announcement message from the fixed per-mode mapping. The log is not
    /// cleared; re-announcing the current mode appends again.
    pub fn change_mode(&self, mode: ChatMode) {
        let announcement = Message::assistant(mode.announcement());
        {
            let mut session = self.write_session();
            session.set_mode(mode);
            session.append(announcement.clone());
        }
        info!(%mode, "conversation mode changed");
        self.emit(AppEvent::ModeChanged(mode));
        self.emit(AppEvent::MessageAdded(announcement));
    }

    /// Run one turn: append the user message, dispatch by mode, append the
    /// assistant reply
    ///
    /// Silently ignored when the content is empty with no attachment or when
    /// a turn is already in flight. On backend failure the turn leaves only
    /// the user message in the log and raises one fixed-text notification.
    pub async fn send_message(
        &self,
        content: &str,
        attachment: Option<FileAttachment>,
    ) -> TurnOutcome {
        let content = content.trim();
        if content.is_empty() && attachment.is_none() {
            debug!("ignoring send: empty content and no attachment");
            return TurnOutcome::Rejected(RejectReason::EmptyInput);
        }

        // Check-and-set under one write lock so concurrent callers cannot
        // both enter the turn.
        let (mode, user_message) = {
            let mut session = self.write_session();
            if session.is_processing() {
                debug!("ignoring send: turn already in flight");
                return TurnOutcome::Rejected(RejectReason::Busy);
            }

            let mode = session.mode();
            let mut user_message = Message::user(content);
            if mode == ChatMode::ImageAnalysis {
                if let Some(file) = &attachment {
                    user_message = user_message.with_attachment(ImageAttachment {
                        url: file.url.clone(),
                        alt_text: file.name.clone(),
                        is_generated: false,
                    });
                }
            }
            session.append(user_message.clone());
            session.set_processing(true);
            (mode, user_message)
        };

        let guard = ProcessingGuard::new(Arc::clone(&self.session));
        self.emit(AppEvent::MessageAdded(user_message));
        self.emit(AppEvent::TurnStarted);
        debug!(%mode, "turn started");

        let result = self.dispatch(mode, content, attachment.as_ref()).await;

        let outcome = match result {
            Ok(reply) => {
                {
                    let mut session = self.write_session();
                    session.append(reply.clone());
                }
                self.emit(AppEvent::MessageAdded(reply));
                TurnOutcome::Completed
            }
            Err(error) => {
                warn!(%error, backend = self.backend.name(), "turn failed");
                self.emit(AppEvent::Notify(Notification::error(
                    "Error",
                    "Failed to process your request. Please try again.",
                )));
                TurnOutcome::Failed
            }
        };

        drop(guard);
        self.emit(AppEvent::TurnCompleted);
        debug!(%mode, ?outcome, "turn finished");
        outcome
    }

    /// Select the backend operation for the active mode and build the
    /// assistant reply
    async fn dispatch(
        &self,
        mode: ChatMode,
        content: &str,
        attachment: Option<&FileAttachment>,
    ) -> Result<Message, BackendError> {
        match mode {
            ChatMode::Text => {
                let text = self.backend.chat(content).await?;
                Ok(Message::assistant(text))
            }
            ChatMode::ImageAnalysis => match attachment {
                // Valid turn, no backend call: prompt the user to upload.
                None => Ok(Message::assistant(UPLOAD_PROMPT_REPLY)),
                Some(file) => {
                    let text = self
                        .backend
                        .chat_with_image(ANALYSIS_PROMPT, &file.url)
                        .await?;
                    Ok(Message::assistant(text))
                }
            },
            ChatMode::ImageGeneration => {
                self.emit(AppEvent::Notify(Notification::info(
                    "Generating image...",
                    "Please wait while the AI creates an image.",
                )));
                let url = self.backend.generate_image(content).await?;
                Ok(
                    Message::assistant(GENERATED_IMAGE_REPLY).with_attachment(ImageAttachment {
                        url,
                        alt_text: GENERATED_IMAGE_ALT.to_string(),
                        is_generated: true,
                    }),
                )
            }
        }
    }

    fn emit(&self, event: AppEvent) {
        if let Some(events) = &self.events {
            // Best-effort: a closed receiver never fails a turn.
            let _ = events.send(event);
        }
    }

    fn read_session(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.session.read().expect("session lock poisoned")
    }

    fn write_session(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.session.write().expect("session lock poisoned")
    }
}
