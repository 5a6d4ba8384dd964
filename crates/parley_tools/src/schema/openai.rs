//! OpenAI function calling schema conversion.

use crate::schema::{JsonType, ToolSchemaConverter};
use crate::ResolvedTool;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OpenAI function schema format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiToolSchema {
    /// Type (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function details
    pub function: OpenAiFunction,
}

/// OpenAI function definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiFunction {
    /// Function name
    pub name: String,
    /// Function description
    pub description: String,
    /// Whether the model must follow the schema exactly
    pub strict: bool,
    /// Parameters schema
    pub parameters: OpenAiParameters,
}

/// Object schema for function parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiParameters {
    /// Always "object"
    #[serde(rename = "type")]
    pub schema_type: JsonType,
    /// Properties by name
    pub properties: BTreeMap<String, OpenAiProperty>,
    /// Required names in declaration order
    pub required: Vec<String>,
    /// Whether undeclared arguments are accepted
    #[serde(rename = "additionalProperties")]
    pub additional_properties: bool,
}

/// A single type or a union such as `["integer", "null"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpenAiTypeSpec {
    Single(JsonType),
    Union(Vec<JsonType>),
}

/// Element schema of an array property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiItems {
    /// Element type
    #[serde(rename = "type")]
    pub item_type: JsonType,
}

/// Schema of one parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiProperty {
    /// Property type
    #[serde(rename = "type")]
    pub property_type: OpenAiTypeSpec,
    /// Parameter documentation
    pub description: String,
    /// Element schema for arrays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<OpenAiItems>,
}

impl ToolSchemaConverter for OpenAiToolSchema {
    type Output = Self;

    fn convert(tool: &ResolvedTool) -> Self::Output {
        let properties = tool
            .properties
            .iter()
            .map(|p| {
                let property_type = if p.nullable && p.json_type != JsonType::Null {
                    OpenAiTypeSpec::Union(vec![p.json_type, JsonType::Null])
                } else {
                    OpenAiTypeSpec::Single(p.json_type)
                };
                let property = OpenAiProperty {
                    property_type,
                    description: p.description.clone(),
                    items: p.items.map(|item_type| OpenAiItems { item_type }),
                };
                (p.name.clone(), property)
            })
            .collect();

        Self {
            tool_type: "function".to_string(),
            function: OpenAiFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                strict: tool.strict,
                parameters: OpenAiParameters {
                    schema_type: JsonType::Object,
                    properties,
                    required: tool.required.clone(),
                    additional_properties: tool.open_object,
                },
            },
        }
    }
}
