//! Provider tool schema formats.

mod genai;
mod openai;

pub use genai::{GenAiFunctionDeclaration, GenAiSchema, GenAiTool, GenAiType};
pub use openai::{OpenAiFunction, OpenAiItems, OpenAiParameters, OpenAiProperty, OpenAiToolSchema, OpenAiTypeSpec};

use crate::ResolvedTool;
use serde::{Deserialize, Serialize};

/// Primitive JSON types every dialect can express.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JsonType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
}

/// Trait for rendering a resolved tool into a provider format.
pub trait ToolSchemaConverter {
    /// The provider-specific tool format.
    type Output;

    /// Convert a resolved tool to the provider format.
    fn convert(tool: &ResolvedTool) -> Self::Output;
}
