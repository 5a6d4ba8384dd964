//! Message types for conversation history.

use crate::{Asset, ContentItem, GenerationMetadata, MediaKind, Role, ToolCallRequest, ToolCallResult, generate_id};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A message in the unified history.
///
/// Messages are built once and treated as immutable afterwards; history grows
/// by appending new messages.
///
/// # Examples
///
/// ```
/// use parley_core::{Message, Role};
///
/// let message = Message::user().with_text("Hello!");
///
/// assert_eq!(*message.role(), Role::User);
/// assert_eq!(message.content().len(), 1);
/// assert!(message.id().starts_with("msg_"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Message {
    /// Unique id (`msg_…`)
    id: String,
    /// Creation time
    timestamp: DateTime<Utc>,
    /// Author
    role: Role,
    /// Participant name for multi-user chats
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    /// Ordered content
    #[serde(default)]
    content: Vec<ContentItem>,
    /// Generation metadata, assistant messages only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<GenerationMetadata>,
}

impl Message {
    /// Creates an empty message for `role` stamped with the current time.
    pub fn new(role: Role) -> Self {
        Self {
            id: generate_id("msg"),
            timestamp: Utc::now(),
            role,
            name: None,
            content: Vec::new(),
            metadata: None,
        }
    }

    /// Empty system message.
    pub fn system() -> Self {
        Self::new(Role::System)
    }

    /// Empty user message.
    pub fn user() -> Self {
        Self::new(Role::User)
    }

    /// Empty assistant message.
    pub fn assistant() -> Self {
        Self::new(Role::Assistant)
    }

    /// Empty tool message.
    pub fn tool() -> Self {
        Self::new(Role::Tool)
    }

    /// Replaces the generated id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Replaces the creation time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Sets the participant name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches generation metadata.
    pub fn with_metadata(mut self, metadata: GenerationMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Appends any content item.
    pub fn with_content(mut self, item: ContentItem) -> Self {
        self.content.push(item);
        self
    }

    /// Replaces the whole content sequence.
    pub fn replacing_content(mut self, content: Vec<ContentItem>) -> Self {
        self.content = content;
        self
    }

    /// Appends a text item.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_content(ContentItem::text(text))
    }

    /// Appends a reasoning item.
    pub fn with_thought(self, text: impl Into<String>) -> Self {
        self.with_content(ContentItem::thought(text))
    }

    /// Appends a media item.
    pub fn with_media(self, kind: MediaKind, assets: Vec<Asset>) -> Self {
        self.with_content(ContentItem::media(kind, assets))
    }

    /// Appends a document item.
    pub fn with_document(self, assets: Vec<Asset>) -> Self {
        self.with_content(ContentItem::document(assets))
    }

    /// Appends a tool call request.
    pub fn with_tool_call(self, call: ToolCallRequest) -> Self {
        self.with_content(ContentItem::ToolCall(call))
    }

    /// Appends a tool result.
    pub fn with_tool_result(self, result: ToolCallResult) -> Self {
        self.with_content(ContentItem::ToolResult(result))
    }

    /// Tool call requests in this message.
    pub fn tool_calls(&self) -> impl Iterator<Item = &ToolCallRequest> {
        self.content.iter().filter_map(ContentItem::as_tool_call)
    }

    /// Tool results in this message.
    pub fn tool_results(&self) -> impl Iterator<Item = &ToolCallResult> {
        self.content.iter().filter_map(ContentItem::as_tool_result)
    }
}
