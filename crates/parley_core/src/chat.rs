//! Chat-level metadata and the history container.

use crate::Message;
use parley_error::{JsonError, ParleyResult};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Current version of the persisted history format.
pub const FORMAT_VERSION: &str = "1.0";

/// Vendor wire-format family.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Dialect {
    /// Strict function-calling JSON Schema with chat-completions messages
    #[default]
    #[serde(rename = "openai")]
    #[strum(serialize = "openai")]
    OpenAi,
    /// Typed schema objects with content/parts messages
    #[serde(rename = "genai")]
    #[strum(serialize = "genai")]
    GenAi,
}

/// How model reasoning is shown across turns.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThinkingMode {
    /// Reasoning interleaved with tool calls
    #[default]
    Interleaved,
    /// Reasoning preserved across turns
    Preserved,
}

/// Per-chat configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Reasoning visibility
    #[serde(default)]
    pub thinking_mode: ThinkingMode,
    /// Active provider dialect
    #[serde(default)]
    pub provider: Dialect,
}

/// Reference to cached content held by GenAI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenAiCacheRef {
    /// Cache name (`cachedContents/…`)
    pub name: String,
    /// Expiry time
    pub expires_at: DateTime<Utc>,
}

/// Provider-side cache references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRef {
    /// GenAI cached content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genai: Option<GenAiCacheRef>,
}

/// Metadata and settings for a whole chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMetadata {
    /// Format version
    #[serde(default = "default_version")]
    pub version: String,
    /// Chat configuration
    #[serde(default)]
    pub config: ChatConfig,
    /// Provider cache
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_ref: Option<CacheRef>,
}

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

impl Default for ChatMetadata {
    fn default() -> Self {
        Self {
            version: default_version(),
            config: ChatConfig::default(),
            cache_ref: None,
        }
    }
}

impl ChatMetadata {
    /// Metadata with the given active provider.
    pub fn for_provider(provider: Dialect) -> Self {
        Self {
            config: ChatConfig {
                provider,
                ..ChatConfig::default()
            },
            ..Self::default()
        }
    }
}

/// A complete conversation: ordered messages plus chat metadata.
///
/// Owned by the caller. Conversions read it and return new values; nothing
/// holds on to a history between calls.
///
/// # Examples
///
/// ```
/// use parley_core::{ChatHistory, Message};
///
/// let history = ChatHistory::default().appended(vec![Message::user().with_text("Hi")]);
/// assert_eq!(history.messages().len(), 1);
/// assert_eq!(history.chat_metadata().version, "1.0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct ChatHistory {
    /// Chat metadata
    #[serde(default)]
    chat_metadata: ChatMetadata,
    /// Ordered messages
    #[serde(default)]
    messages: Vec<Message>,
}

impl ChatHistory {
    /// Creates a history from parts.
    pub fn new(chat_metadata: ChatMetadata, messages: Vec<Message>) -> Self {
        Self {
            chat_metadata,
            messages,
        }
    }

    /// Returns a new history with `messages` appended.
    pub fn appended(&self, messages: impl IntoIterator<Item = Message>) -> Self {
        let mut next = self.clone();
        next.messages.extend(messages);
        next
    }

    /// Active provider dialect.
    pub fn provider(&self) -> Dialect {
        self.chat_metadata.config.provider
    }

    /// Parses a persisted history.
    ///
    /// # Errors
    ///
    /// Returns [`ParleyErrorKind::Json`](parley_error::ParleyErrorKind::Json)
    /// when the text is not a valid history document.
    pub fn from_json(content: &str) -> ParleyResult<Self> {
        Ok(serde_json::from_str(content).map_err(JsonError::from)?)
    }

    /// Serializes the history as pretty-printed JSON.
    pub fn to_json(&self) -> ParleyResult<String> {
        Ok(serde_json::to_string_pretty(self).map_err(JsonError::from)?)
    }
}
