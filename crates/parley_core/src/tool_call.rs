//! Tool call requests and results.

use crate::Asset;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tool invocation requested by the model.
///
/// # Examples
///
/// ```
/// use parley_core::ToolCallRequest;
/// use serde_json::json;
///
/// let call = ToolCallRequest::new("call_1", "add")
///     .with_arg("first", json!(1.5))
///     .with_arg("second", json!(2));
/// assert_eq!(call.args.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Call id, unique within the owning message
    pub id: String,
    /// Name of the tool to invoke
    pub name: String,
    /// Arguments by parameter name
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl ToolCallRequest {
    /// Creates a request with no arguments.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            args: Map::new(),
        }
    }

    /// Adds one argument.
    pub fn with_arg(mut self, name: impl Into<String>, value: Value) -> Self {
        self.args.insert(name.into(), value);
        self
    }

    /// Replaces the argument mapping.
    pub fn with_args(mut self, args: Map<String, Value>) -> Self {
        self.args = args;
        self
    }
}

/// Outcome of executing a requested tool.
///
/// `id` must equal the id of an earlier, still unresolved [`ToolCallRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResult {
    /// Id of the request this result answers
    pub id: String,
    /// Name of the tool that ran
    pub name: String,
    /// Textual result or error description
    pub content: String,
    /// Whether `content` describes a failure
    #[serde(default)]
    pub is_error: bool,
    /// Files returned by the tool
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<Asset>,
}

impl ToolCallResult {
    /// Successful result.
    pub fn success(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content: content.into(),
            is_error: false,
            assets: Vec::new(),
        }
    }

    /// Failed result.
    pub fn error(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::success(id, name, content)
        }
    }

    /// Attaches files returned by the tool.
    pub fn with_assets(mut self, assets: Vec<Asset>) -> Self {
        self.assets = assets;
        self
    }
}
