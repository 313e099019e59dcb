//! Core domain modules
//!
//! Session state, mode dispatch, and the turn lifecycle. The render layer
//! reads this state and drives the controller; it never mutates either.

pub mod attachment;
pub mod controller;
pub mod events;
pub mod message;
pub mod session;
pub mod types;

// Re-export canonical types
pub use attachment::FileAttachment;
pub use events::{AppEvent, Notification, NotificationLevel};
pub use message::{ImageAttachment, Message, MessageRole};
pub use session::{Session, SessionHandle};
pub use types::ChatMode;
