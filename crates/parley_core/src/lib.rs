//! Unified message model for the Parley chat translation library.
//!
//! This crate defines the vendor-independent conversation representation that
//! the schema synthesizer and history converters exchange with callers.

mod asset;
mod chat;
mod content;
mod media;
mod message;
mod metadata;
mod role;
mod tool_call;
mod validation;

pub use asset::{
    Asset, AssetBuilder, AssetLocation, CloudRef, CloudRefs, GenAiCloudRef, OpenAiCloudRef,
};
pub use chat::{
    CacheRef, ChatConfig, ChatHistory, ChatMetadata, Dialect, GenAiCacheRef, ThinkingMode,
    FORMAT_VERSION,
};
pub use content::ContentItem;
pub use media::MediaKind;
pub use message::Message;
pub use metadata::{FinishReason, GenerationMetadata, GenerationMetadataBuilder, UsageStats};
pub use role::Role;
pub use tool_call::{ToolCallRequest, ToolCallResult};
pub use validation::{
    RoleAlternationWarning, validate_history, validate_metadata_roles, validate_role_alternation,
    validate_tool_call_result_matches_request,
};

/// Generates a prefixed unique identifier such as `msg_1f0c…`.
pub fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}
