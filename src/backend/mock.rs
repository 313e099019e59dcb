//! Deterministic mock backend
//!
//! Selects canned responses by scanning the request text for known keyword
//! substrings, case-insensitively. Categories are checked in a fixed
//! priority order and the first match wins, with a generic default when
//! nothing matches. Interchangeable with the real backend behind `AiBackend`
//! so the controller never knows which one it is talking to.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use super::{AiBackend, BackendError};

/// Keyword categories for text chat, in priority order
const CHAT_REPLIES: &[(&[&str], &str)] = &[
    (&["hello", "hi"], "Hello! How can I assist you today?"),
    (
        &["help"],
        "I'm here to help! You can ask me questions, request image analysis, or have me generate images based on your descriptions.",
    ),
    (
        &["weather"],
        "I don't have access to real-time weather data, but I can help you find a reliable weather service if you'd like.",
    ),
    (
        &["thank"],
        "You're welcome! Is there anything else I can help you with?",
    ),
];

const CHAT_DEFAULT: &str = "I'm an AI assistant. How can I help you today?";

/// Keyword categories for image analysis, matched against the image reference
const ANALYSIS_REPLIES: &[(&[&str], &str)] = &[
    (
        &["cat", "kitten"],
        "This image shows a cat. It appears to be a domestic cat with fur. Cats are popular pets known for their independence and playful nature.",
    ),
    (
        &["dog", "puppy"],
        "This image contains a dog. Dogs are domesticated mammals and one of the most popular pets worldwide, known for their loyalty and companionship.",
    ),
    (
        &["landscape", "nature"],
        "This is a landscape image showing natural scenery. I can see elements of nature which may include mountains, trees, water, or sky.",
    ),
    (
        &["food", "meal"],
        "This image shows food. Food photography is popular for sharing culinary experiences and recipes.",
    ),
];

const ANALYSIS_DEFAULT: &str = "This appears to be an image. I can see various elements but without more context, it's difficult to provide specific details.";

/// Keyword categories for image generation, matched against the prompt
const GENERATION_URLS: &[(&[&str], &str)] = &[
    (
        &["cat", "kitten"],
        "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba?w=600&q=80",
    ),
    (
        &["dog", "puppy"],
        "https://images.unsplash.com/photo-1543466835-00a7907e9de1?w=600&q=80",
    ),
    (
        &["landscape", "nature", "mountain"],
        "https://images.unsplash.com/photo-1506744038136-46273834b3fb?w=600&q=80",
    ),
    (
        &["city", "urban"],
        "https://images.unsplash.com/photo-1519501025264-65ba15a82390?w=600&q=80",
    ),
    (
        &["food", "meal", "dish"],
        "https://images.unsplash.com/photo-1504674900247-0877df9cc836?w=600&q=80",
    ),
    (
        &["space", "galaxy", "universe"],
        "https://images.unsplash.com/photo-1462331940025-496dfbfc7564?w=600&q=80",
    ),
    (
        &["portrait", "person", "people"],
        "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=600&q=80",
    ),
];

const GENERATION_DEFAULT: &str =
    "https://images.unsplash.com/photo-1579546929518-9e396f3cc809?w=600&q=80";

/// Scan categories in order; first category with a matching keyword wins
fn first_match<'a>(input: &str, table: &[(&[&str], &'a str)], fallback: &'a str) -> &'a str {
    let input = input.to_lowercase();
    for (keywords, reply) in table {
        if keywords.iter().any(|k| input.contains(k)) {
            return reply;
        }
    }
    fallback
}

/// Mock behavior selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    /// Keyword-matched canned responses (default)
    Canned,
    /// Every call fails with a service error
    Failure,
}

/// Deterministic mock backend
#[derive(Debug)]
pub struct MockBackend {
    scenario: Scenario,
    /// Simulate the real service's latency (off by default so tests are fast)
    simulate_latency: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            scenario: Scenario::Canned,
            simulate_latency: false,
        }
    }

    /// A mock whose every call fails, for exercising the error path
    pub fn failing() -> Self {
        Self {
            scenario: Scenario::Failure,
            simulate_latency: false,
        }
    }

    /// Enable simulated network latency
    pub fn with_latency(mut self) -> Self {
        self.simulate_latency = true;
        self
    }

    async fn simulate_delay(&self, min_ms: u64, max_ms: u64) {
        if !self.simulate_latency {
            return;
        }
        let delay = rand::thread_rng().gen_range(min_ms..=max_ms);
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    fn fail_if_configured(&self) -> Result<(), BackendError> {
        match self.scenario {
            Scenario::Canned => Ok(()),
            Scenario::Failure => Err(BackendError::ServiceError(
                "Simulated backend failure".to_string(),
            )),
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn chat(&self, prompt: &str) -> Result<String, BackendError> {
        self.fail_if_configured()?;
        self.simulate_delay(1000, 3000).await;
        Ok(first_match(prompt, CHAT_REPLIES, CHAT_DEFAULT).to_string())
    }

    async fn chat_with_image(
        &self,
        _prompt: &str,
        image_url: &str,
    ) -> Result<String, BackendError> {
        self.fail_if_configured()?;
        // Analysis takes longer than chat
        self.simulate_delay(2000, 5000).await;
        Ok(first_match(image_url, ANALYSIS_REPLIES, ANALYSIS_DEFAULT).to_string())
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, BackendError> {
        self.fail_if_configured()?;
        // Generation takes the longest
        self.simulate_delay(3000, 6000).await;
        Ok(first_match(prompt, GENERATION_URLS, GENERATION_DEFAULT).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chat_keyword_matching_is_case_insensitive() {
        let backend = MockBackend::new();
        let reply = backend.chat("HELLO there").await.unwrap();
        assert_eq!(reply, "Hello! How can I assist you today?");
    }

    #[tokio::test]
    async fn test_chat_first_category_wins() {
        let backend = MockBackend::new();
        // "hi" outranks "help" because categories are checked in order.
        let reply = backend.chat("hi, I need help").await.unwrap();
        assert_eq!(reply, "Hello! How can I assist you today?");
    }

    #[tokio::test]
    async fn test_chat_default_fallback() {
        let backend = MockBackend::new();
        let reply = backend.chat("tell me about rust").await.unwrap();
        assert_eq!(reply, CHAT_DEFAULT);
    }

    #[tokio::test]
    async fn test_analysis_matches_image_reference() {
        let backend = MockBackend::new();
        let reply = backend
            .chat_with_image("What do you see in this image?", "file:///tmp/cat.png")
            .await
            .unwrap();
        assert!(reply.contains("cat"));

        let reply = backend
            .chat_with_image("What do you see in this image?", "file:///tmp/scan-001.png")
            .await
            .unwrap();
        assert_eq!(reply, ANALYSIS_DEFAULT);
    }

    #[tokio::test]
    async fn test_generation_url_by_prompt() {
        let backend = MockBackend::new();
        let url = backend.generate_image("a mountain landscape").await.unwrap();
        assert_eq!(
            url,
            "https://images.unsplash.com/photo-1506744038136-46273834b3fb?w=600&q=80"
        );

        let url = backend.generate_image("abstract swirls").await.unwrap();
        assert_eq!(url, GENERATION_DEFAULT);
    }

    #[tokio::test]
    async fn test_failing_scenario() {
        let backend = MockBackend::failing();
        let err = backend.chat("hello").await.unwrap_err();
        assert!(matches!(err, BackendError::ServiceError(_)));
        assert!(backend.generate_image("anything").await.is_err());
    }
}
