//! Generation metadata attached to assistant messages.

use crate::Dialect;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Token counts reported for one generation.
///
/// # Examples
///
/// ```
/// use parley_core::UsageStats;
///
/// let usage = UsageStats::new(150, 50, 200);
/// assert_eq!(*usage.input_tokens(), 150);
/// assert_eq!(*usage.total_tokens(), 200);
/// ```
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
    Getters,
    derive_new::new,
)]
pub struct UsageStats {
    /// Prompt tokens
    #[serde(default)]
    input_tokens: u64,
    /// Generated tokens
    #[serde(default)]
    output_tokens: u64,
    /// Total as reported by the provider
    #[serde(default)]
    total_tokens: u64,
}

/// Why the model stopped generating.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of turn
    Stop,
    /// The model requested tool calls
    ToolCalls,
    /// Output token limit reached
    Length,
    /// Output withheld by a safety filter
    ContentFilter,
}

/// Metadata for an assistant-authored message.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into), pattern = "owned")]
pub struct GenerationMetadata {
    /// Model name, e.g. `gpt-4o`
    model: String,
    /// Dialect of the provider that produced the message
    provider: Dialect,
    /// Token usage
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    usage: Option<UsageStats>,
    /// Finish reason
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    finish_reason: Option<FinishReason>,
    /// Generation latency
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

impl GenerationMetadata {
    /// Creates a builder for `GenerationMetadata`.
    pub fn builder() -> GenerationMetadataBuilder {
        GenerationMetadataBuilder::default()
    }
}
