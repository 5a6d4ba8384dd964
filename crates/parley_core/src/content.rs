//! Content items carried by unified messages.

use crate::{Asset, MediaKind, ToolCallRequest, ToolCallResult};
use serde::{Deserialize, Serialize};

/// One tagged unit of message content.
///
/// Converters match on this enum exhaustively, so a new variant must be
/// handled at every role and dialect mapping site.
///
/// # Examples
///
/// ```
/// use parley_core::{Asset, ContentItem, MediaKind};
///
/// let text = ContentItem::text("Hello");
/// assert_eq!(text.tag_name(), "text");
///
/// let image = ContentItem::media(
///     MediaKind::Image,
///     vec![Asset::from_url("https://example.com/a.png", "image/png")],
/// );
/// assert_eq!(image.tag_name(), "image");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    /// Plain text
    Text {
        /// Text body
        text: String,
    },
    /// Model reasoning
    Thought {
        /// Reasoning text
        text: String,
    },
    /// Images, audio or video
    Media {
        /// Media kind shared by all assets
        kind: MediaKind,
        /// Media files
        assets: Vec<Asset>,
    },
    /// PDFs, text files and other documents
    Document {
        /// Document files
        assets: Vec<Asset>,
    },
    /// Tool invocation requested by the model
    ToolCall(ToolCallRequest),
    /// Result of a tool invocation
    ToolResult(ToolCallResult),
}

impl ContentItem {
    /// Text item.
    pub fn text(text: impl Into<String>) -> Self {
        ContentItem::Text { text: text.into() }
    }

    /// Reasoning item.
    pub fn thought(text: impl Into<String>) -> Self {
        ContentItem::Thought { text: text.into() }
    }

    /// Media item.
    pub fn media(kind: MediaKind, assets: Vec<Asset>) -> Self {
        ContentItem::Media { kind, assets }
    }

    /// Document item.
    pub fn document(assets: Vec<Asset>) -> Self {
        ContentItem::Document { assets }
    }

    /// Name of the active tag, with media reported by kind.
    pub fn tag_name(&self) -> &'static str {
        match self {
            ContentItem::Text { .. } => "text",
            ContentItem::Thought { .. } => "thought",
            ContentItem::Media { kind, .. } => kind.family(),
            ContentItem::Document { .. } => "document",
            ContentItem::ToolCall(_) => "tool_call",
            ContentItem::ToolResult(_) => "tool_result",
        }
    }

    /// Text body if this is a text item.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentItem::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Tool call if this is a tool call item.
    pub fn as_tool_call(&self) -> Option<&ToolCallRequest> {
        match self {
            ContentItem::ToolCall(call) => Some(call),
            _ => None,
        }
    }

    /// Tool result if this is a tool result item.
    pub fn as_tool_result(&self) -> Option<&ToolCallResult> {
        match self {
            ContentItem::ToolResult(result) => Some(result),
            _ => None,
        }
    }

    /// Returns true for reasoning items.
    pub fn is_thought(&self) -> bool {
        matches!(self, ContentItem::Thought { .. })
    }
}
