//! GenAI function declaration conversion.

use crate::schema::{JsonType, ToolSchemaConverter};
use crate::ResolvedTool;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// GenAI schema type enum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GenAiType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
}

impl From<JsonType> for GenAiType {
    fn from(t: JsonType) -> Self {
        match t {
            JsonType::String => Self::String,
            JsonType::Integer => Self::Integer,
            JsonType::Number => Self::Number,
            JsonType::Boolean => Self::Boolean,
            JsonType::Array => Self::Array,
            JsonType::Object => Self::Object,
            JsonType::Null => Self::Null,
        }
    }
}

/// GenAI typed schema node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenAiSchema {
    /// Node type
    #[serde(rename = "type")]
    pub schema_type: GenAiType,
    /// Documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether null is accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// Element schema for arrays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<GenAiSchema>>,
    /// Member schemas for objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, GenAiSchema>>,
    /// Required member names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Member order as declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_ordering: Option<Vec<String>>,
}

impl GenAiSchema {
    /// Bare node of the given type.
    pub fn of(schema_type: GenAiType) -> Self {
        Self {
            schema_type,
            description: None,
            nullable: None,
            items: None,
            properties: None,
            required: None,
            property_ordering: None,
        }
    }
}

/// GenAI function declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenAiFunctionDeclaration {
    /// Function name
    pub name: String,
    /// Function description
    pub description: String,
    /// Parameters schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<GenAiSchema>,
}

/// GenAI tool wrapper holding every declaration of a turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenAiTool {
    /// Function declarations in registration order
    pub function_declarations: Vec<GenAiFunctionDeclaration>,
}

impl ToolSchemaConverter for GenAiFunctionDeclaration {
    type Output = Self;

    fn convert(tool: &ResolvedTool) -> Self::Output {
        let properties: BTreeMap<String, GenAiSchema> = tool
            .properties
            .iter()
            .map(|p| {
                let schema = GenAiSchema {
                    description: Some(p.description.clone()),
                    nullable: p.nullable.then_some(true),
                    items: p.items.map(|t| Box::new(GenAiSchema::of(t.into()))),
                    ..GenAiSchema::of(p.json_type.into())
                };
                (p.name.clone(), schema)
            })
            .collect();

        let parameters = (!properties.is_empty()).then(|| GenAiSchema {
            properties: Some(properties),
            required: Some(tool.required.clone()),
            property_ordering: Some(tool.properties.iter().map(|p| p.name.clone()).collect()),
            ..GenAiSchema::of(GenAiType::Object)
        });

        Self {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters,
        }
    }
}
