//! Puter-backed AI adapter (hosted service)
//!
//! Talks to the Puter driver-call API: chat and image analysis go through the
//! chat-completion interface, generation through the image-generation
//! interface. The wire shape stays private to this module; the controller
//! only ever sees the trait.

#![allow(dead_code)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;
use std::time::Duration;
use tracing::debug;

use crate::config::PuterConfig;

use super::{AiBackend, BackendError};

const DEFAULT_BASE_URL: &str = "https://api.puter.com";
const CHAT_INTERFACE: &str = "puter-chat-completion";
const IMAGE_INTERFACE: &str = "puter-image-generation";

/// Any in-flight call is bounded here; the controller enforces no timeout of
/// its own.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub struct PuterBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_token: Option<String>,
}

impl PuterBackend {
    /// Create a backend from config, with env-var fallbacks
    ///
    /// `PUTER_BASE_URL` and `PUTER_API_TOKEN` override the config file.
    pub fn from_config(config: &PuterConfig) -> anyhow::Result<Self> {
        let base_url = env::var("PUTER_BASE_URL").unwrap_or_else(|_| config.base_url.clone());
        let api_token = env::var("PUTER_API_TOKEN")
            .ok()
            .or_else(|| config.api_token.clone());

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url,
            model: config.model.clone(),
            api_token,
        })
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    async fn driver_call(
        &self,
        interface: &str,
        method: &str,
        args: serde_json::Value,
    ) -> Result<serde_json::Value, BackendError> {
        let url = format!("{}/drivers/call", self.base_url);
        let request = DriverCallRequest {
            interface,
            method,
            args,
        };

        debug!(interface, method, "driver call");
        let mut builder = self.client.post(&url).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(BackendError::from_network_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BackendError::from_http_status(status, error_text));
        }

        let body: DriverCallResponse = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;

        if !body.success {
            let message = body
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "driver call reported failure".to_string());
            return Err(BackendError::ServiceError(message));
        }

        Ok(body.result)
    }

    fn extract_text(result: serde_json::Value) -> Result<String, BackendError> {
        // Either a bare string or a chat-completion envelope.
        if let Some(text) = result.as_str() {
            return Ok(text.to_string());
        }
        result
            .pointer("/message/content")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| BackendError::MalformedResponse("no text in chat result".to_string()))
    }

    fn extract_image_url(result: serde_json::Value) -> Result<String, BackendError> {
        if let Some(url) = result.as_str() {
            return Ok(url.to_string());
        }
        result
            .get("url")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                BackendError::MalformedResponse("no image url in generation result".to_string())
            })
    }
}

#[async_trait]
impl AiBackend for PuterBackend {
    fn name(&self) -> &str {
        "puter"
    }

    async fn chat(&self, prompt: &str) -> Result<String, BackendError> {
        let args = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });
        let result = self.driver_call(CHAT_INTERFACE, "complete", args).await?;
        Self::extract_text(result)
    }

    async fn chat_with_image(
        &self,
        prompt: &str,
        image_url: &str,
    ) -> Result<String, BackendError> {
        let args = json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": prompt },
                    { "type": "image_url", "image_url": { "url": image_url } },
                ],
            }],
        });
        let result = self.driver_call(CHAT_INTERFACE, "complete", args).await?;
        Self::extract_text(result)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, BackendError> {
        let args = json!({ "prompt": prompt });
        let result = self.driver_call(IMAGE_INTERFACE, "generate", args).await?;
        Self::extract_image_url(result)
    }
}

// Driver-call wire types

#[derive(Debug, Serialize)]
struct DriverCallRequest<'a> {
    interface: &'a str,
    method: &'a str,
    args: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct DriverCallResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: serde_json::Value,
    #[serde(default)]
    error: Option<DriverCallError>,
}

#[derive(Debug, Deserialize)]
struct DriverCallError {
    #[serde(default)]
    message: String,
}
