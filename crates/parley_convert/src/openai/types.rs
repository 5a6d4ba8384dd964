//! OpenAI chat completions wire types.

use serde::{Deserialize, Serialize};

/// Message content: a plain string or an array of parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpenAiContent {
    /// Plain text
    Text(String),
    /// Structured parts
    Parts(Vec<OpenAiContentPart>),
}

/// One part of an array-form message content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenAiContentPart {
    /// Text part
    Text {
        /// Text body
        text: String,
    },
    /// Image by URL or `data:` URI
    ImageUrl {
        /// Image reference
        image_url: OpenAiImageUrl,
    },
    /// Base64 audio
    InputAudio {
        /// Audio payload
        input_audio: OpenAiInputAudio,
    },
    /// Uploaded or inline file
    File {
        /// File reference
        file: OpenAiFile,
    },
}

/// Image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiImageUrl {
    /// URL or `data:` URI
    pub url: String,
    /// Resolution hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Inline audio payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiInputAudio {
    /// Base64 data
    pub data: String,
    /// Encoding, e.g. `mp3` or `wav`
    pub format: String,
}

/// File reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiFile {
    /// Id of an uploaded file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    /// Inline `data:` URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
    /// File name shown to the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Function invocation inside a tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiFunctionCall {
    /// Function name
    pub name: String,
    /// Arguments as a JSON-encoded string
    pub arguments: String,
}

/// Tool call made by the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiToolCall {
    /// Call id
    pub id: String,
    /// Always "function"
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function details
    pub function: OpenAiFunctionCall,
}

/// Chat message in OpenAI format, tagged by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum OpenAiMessage {
    /// System prompt
    System {
        /// Prompt text
        content: OpenAiContent,
        /// Participant name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// User turn
    User {
        /// Turn content
        content: OpenAiContent,
        /// Participant name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Assistant turn; content is null when only tools are called
    Assistant {
        /// Turn content
        #[serde(default)]
        content: Option<OpenAiContent>,
        /// Reasoning emitted by OpenAI-compatible reasoning models
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reasoning_content: Option<String>,
        /// Requested tool calls
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<OpenAiToolCall>,
        /// Participant name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Result of one tool call
    Tool {
        /// Result text
        content: OpenAiContent,
        /// Id of the answered call
        tool_call_id: String,
    },
}

/// Token usage of a completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAiUsage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_tokens: u64,
    /// Completion tokens
    #[serde(default)]
    pub completion_tokens: u64,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u64,
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    /// Position in the choice list
    #[serde(default)]
    pub index: u32,
    /// Generated message
    pub message: OpenAiMessage,
    /// Why generation stopped, e.g. `stop` or `tool_calls`
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Chat completion response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// Completion id
    #[serde(default)]
    pub id: String,
    /// Model that produced the completion
    pub model: String,
    /// Generated choices
    pub choices: Vec<ChatChoice>,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<OpenAiUsage>,
}
