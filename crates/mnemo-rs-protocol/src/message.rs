//! Chat messages exchanged with LLM providers.

use serde::{Deserialize, Serialize};

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: MessageContent,
}

impl Message {
    /// Plain text message.
    pub fn text(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: MessageContent::Text(content.into()),
        }
    }

    /// Message carrying a single image reference.
    pub fn image(role: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: MessageContent::Image(ImageReference::ImageUrl {
                image_url: ImageUrl { url: url.into() },
            }),
        }
    }
}

/// Message body: either text or an image reference, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Image(ImageReference),
}

impl MessageContent {
    /// Text body, if this is a text message.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Image(_) => None,
        }
    }
}

/// Tagged multi-modal content, serialized as `{"type": "image_url", "image_url": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageReference {
    ImageUrl { image_url: ImageUrl },
}

impl ImageReference {
    pub fn url(&self) -> &str {
        match self {
            Self::ImageUrl { image_url } => &image_url.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}
