//! muse: multimodal AI chat assistant core
//!
//! This library provides:
//! - A chat session controller with three interchangeable modes
//!   (text chat, image analysis, image generation)
//! - An append-only in-memory message log shared with the render layer
//! - A pluggable backend adapter (HTTP-backed service or deterministic mock)
//! - An event channel for notifications and message updates

pub mod backend;
pub mod config;
pub mod core;

pub use backend::{create_backend, AiBackend, BackendError};
pub use config::Config;
pub use core::controller::{ChatController, TurnOutcome};
pub use core::ChatMode;
