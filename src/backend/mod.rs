//! AI backend adapters
//!
//! The controller talks to an opaque capability with three operations; a
//! real network-backed service and the deterministic mock are interchangeable
//! behind this trait.

mod error;
mod mock;
mod puter;

pub use error::BackendError;
pub use mock::MockBackend;
pub use puter::PuterBackend;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;

/// The backend adapter capability
///
/// Inputs are plain text plus an optional image reference; outputs are plain
/// text or a URI-like image reference. Transport and timeouts are the
/// adapter's concern; the controller never retries.
#[async_trait]
pub trait AiBackend: Send + Sync + std::fmt::Debug {
    /// Get the backend name
    fn name(&self) -> &str;

    /// Text chat: prompt in, reply text out
    async fn chat(&self, prompt: &str) -> Result<String, BackendError>;

    /// Image analysis: prompt plus an image reference, reply text out
    async fn chat_with_image(&self, prompt: &str, image_url: &str)
        -> Result<String, BackendError>;

    /// Image generation: prompt in, image reference out
    async fn generate_image(&self, prompt: &str) -> Result<String, BackendError>;
}

/// Create a backend adapter based on name
pub fn create_backend(name: &str, config: &Config) -> Result<Arc<dyn AiBackend>> {
    match name.to_lowercase().as_str() {
        "puter" => Ok(Arc::new(PuterBackend::from_config(&config.puter)?)),
        "mock" | "offline" => {
            let mut backend = MockBackend::new();
            if config.mock.simulate_latency {
                backend = backend.with_latency();
            }
            Ok(Arc::new(backend))
        }
        _ => anyhow::bail!("Unknown backend: {}. Supported: puter, mock", name),
    }
}
