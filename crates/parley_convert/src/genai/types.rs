//! GenAI content wire types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inline bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenAiBlob {
    /// MIME type
    pub mime_type: String,
    /// Base64 data
    pub data: String,
}

/// File referenced by URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenAiFileData {
    /// MIME type
    pub mime_type: String,
    /// File URI, URL or path
    pub file_uri: String,
}

/// Function call predicted by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenAiFunctionCall {
    /// Call id, not always present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Function name
    pub name: String,
    /// Arguments
    #[serde(default)]
    pub args: Map<String, Value>,
}

/// Function result sent back to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenAiFunctionResponse {
    /// Id of the answered call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Function name
    pub name: String,
    /// `{"result": …}` or `{"error": …}`
    #[serde(default)]
    pub response: Map<String, Value>,
}

/// One part of a content. Exactly one payload field is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenAiPart {
    /// Text payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Marks `text` as model reasoning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
    /// Inline bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<GenAiBlob>,
    /// File reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<GenAiFileData>,
    /// Function call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<GenAiFunctionCall>,
    /// Function result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<GenAiFunctionResponse>,
}

impl GenAiPart {
    /// Text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Reasoning part.
    pub fn thought(text: impl Into<String>) -> Self {
        Self {
            thought: Some(true),
            ..Self::text(text)
        }
    }

    /// Inline bytes part.
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            inline_data: Some(GenAiBlob {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
            ..Self::default()
        }
    }

    /// File reference part.
    pub fn file_data(mime_type: impl Into<String>, file_uri: impl Into<String>) -> Self {
        Self {
            file_data: Some(GenAiFileData {
                mime_type: mime_type.into(),
                file_uri: file_uri.into(),
            }),
            ..Self::default()
        }
    }

    /// Function call part.
    pub fn function_call(call: GenAiFunctionCall) -> Self {
        Self {
            function_call: Some(call),
            ..Self::default()
        }
    }

    /// Function result part.
    pub fn function_response(response: GenAiFunctionResponse) -> Self {
        Self {
            function_response: Some(response),
            ..Self::default()
        }
    }

    /// Returns true for reasoning text.
    pub fn is_thought(&self) -> bool {
        self.thought.unwrap_or(false)
    }
}

/// A turn in GenAI format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenAiContent {
    /// `user` or `model`; absent on system instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts
    #[serde(default)]
    pub parts: Vec<GenAiPart>,
}

impl GenAiContent {
    /// Content with a role and parts.
    pub fn new(role: impl Into<String>, parts: Vec<GenAiPart>) -> Self {
        Self {
            role: Some(role.into()),
            parts,
        }
    }
}

/// A converted history: system instruction plus turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenAiHistory {
    /// Concatenated system prompts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GenAiContent>,
    /// User and model turns
    #[serde(default)]
    pub contents: Vec<GenAiContent>,
}

/// Token usage of a generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenAiUsageMetadata {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_token_count: u64,
    /// Generated tokens
    #[serde(default)]
    pub candidates_token_count: u64,
    /// Reasoning tokens
    #[serde(default)]
    pub thoughts_token_count: u64,
    /// Total tokens
    #[serde(default)]
    pub total_token_count: u64,
}

/// One generated candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenAiCandidate {
    /// Generated content, absent when blocked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<GenAiContent>,
    /// e.g. `STOP`, `MAX_TOKENS`, `SAFETY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// `generateContent` response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<GenAiCandidate>,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<GenAiUsageMetadata>,
    /// Model version that answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}
