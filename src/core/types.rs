//! Canonical type definitions for the core domain
//!
//! The conversation mode is a tagged enum so dispatch is exhaustive at
//! compile time; display strings come from fixed mappings, never computed.

use serde::{Deserialize, Serialize};

/// Conversation mode determines which backend operation a turn invokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Text chat: plain prompt in, plain reply out
    #[default]
    Text,
    /// Image analysis: user supplies an image, assistant describes it
    ImageAnalysis,
    /// Image generation: prompt in, generated image reference out
    ImageGeneration,
}

impl ChatMode {
    /// Get display label for this mode
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text Chat",
            Self::ImageAnalysis => "Image Analysis",
            Self::ImageGeneration => "Image Generation",
        }
    }

    /// Get description for this mode
    pub fn description(&self) -> &'static str {
        match self {
            Self::Text => "Ask questions and chat with the assistant",
            Self::ImageAnalysis => "Upload an image for the assistant to analyze",
            Self::ImageGeneration => "Describe an image for the assistant to create",
        }
    }

    /// Announcement appended to the log when this mode is activated
    pub fn announcement(&self) -> &'static str {
        match self {
            Self::Text => "Switched to Text Chat mode. Ask me anything!",
            Self::ImageAnalysis => {
                "Switched to Image Analysis mode. Upload an image for me to analyze."
            }
            Self::ImageGeneration => {
                "Switched to Image Generation mode. Describe the image you'd like me to create."
            }
        }
    }

    /// Get the next mode in the cycle (Text → ImageAnalysis → ImageGeneration → Text)
    pub fn next(self) -> Self {
        match self {
            Self::Text => Self::ImageAnalysis,
            Self::ImageAnalysis => Self::ImageGeneration,
            Self::ImageGeneration => Self::Text,
        }
    }

    /// Get the previous mode in the cycle
    pub fn prev(self) -> Self {
        match self {
            Self::Text => Self::ImageGeneration,
            Self::ImageAnalysis => Self::Text,
            Self::ImageGeneration => Self::ImageAnalysis,
        }
    }
}

impl std::str::FromStr for ChatMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "imageanalysis" | "image-analysis" | "analysis" => Self::ImageAnalysis,
            "imagegeneration" | "image-generation" | "generation" => Self::ImageGeneration,
            _ => Self::Text,
        })
    }
}

impl std::fmt::Display for ChatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::ImageAnalysis => write!(f, "image-analysis"),
            Self::ImageGeneration => write!(f, "image-generation"),
        }
    }
}
