use crate::Message;
use serde::{Deserialize, Serialize};

// The subset of the OpenAI-compatible chat completions API the gateway
// speaks: plain-text messages in, one choice with optional generated
// images out.

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Output modalities to request. Only set on the image path
    /// (`["image", "text"]`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalities: Option<Vec<Modality>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        let role = match message {
            Message::User { .. } => ChatRole::User,
            Message::Assistant { .. } => ChatRole::Assistant,
            Message::System { .. } => ChatRole::System,
        };
        Self {
            role,
            content: message.content().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<ChatCompletionImage>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionImage {
    pub image_url: ChatCompletionImageUrl,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionImageUrl {
    pub url: String,
}
