//! Provider-agnostic tool descriptors.

use crate::ToolDoc;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// How a parameter receives its arguments.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ParameterKind {
    /// A single named argument
    #[default]
    Positional,
    /// Any number of extra positional arguments
    VariadicPositional,
    /// Any number of extra named arguments
    VariadicKeyword,
}

/// Declared type of a parameter, possibly nested.
///
/// Written in manifests as annotation strings such as `list[int]`,
/// `Optional[str]` or `Vec<f64>`.
///
/// # Examples
///
/// ```
/// use parley_tools::DeclaredType;
///
/// assert_eq!(
///     DeclaredType::parse("list[list[int]]"),
///     DeclaredType::Sequence(Some(Box::new(DeclaredType::Sequence(Some(Box::new(
///         DeclaredType::Integer
///     ))))))
/// );
/// assert_eq!(
///     DeclaredType::parse("Option<String>"),
///     DeclaredType::Optional(Box::new(DeclaredType::String))
/// );
/// assert_eq!(DeclaredType::parse("Path"), DeclaredType::Named("Path".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeclaredType {
    String,
    Integer,
    Number,
    Boolean,
    Null,
    /// Ordered collection with optional element type
    Sequence(Option<Box<DeclaredType>>),
    /// Key/value mapping with optional value type
    Mapping(Option<Box<DeclaredType>>),
    /// Value that may be null
    Optional(Box<DeclaredType>),
    /// Any type without a JSON counterpart
    Named(String),
}

impl DeclaredType {
    /// Parses an annotation string. Never fails; unknown names become [`DeclaredType::Named`].
    pub fn parse(annotation: &str) -> Self {
        let annotation = annotation.trim();

        if let Some((left, right)) = split_union(annotation) {
            return match (is_none(left), is_none(right)) {
                (false, true) => Self::Optional(Box::new(Self::parse(left))),
                (true, false) => Self::Optional(Box::new(Self::parse(right))),
                _ => Self::Named(annotation.to_string()),
            };
        }

        if let Some((head, args)) = split_generic(annotation) {
            let mut args = split_top_level(args, ',');
            return match head {
                "list" | "List" | "sequence" | "Sequence" | "Vec" | "set" | "Set" => {
                    Self::Sequence(args.first().map(|a| Box::new(Self::parse(a))))
                }
                "dict" | "Dict" | "mapping" | "Mapping" | "HashMap" | "BTreeMap" => {
                    Self::Mapping(args.pop().map(|a| Box::new(Self::parse(a))))
                }
                "Optional" | "Option" if args.len() == 1 => {
                    Self::Optional(Box::new(Self::parse(args[0])))
                }
                _ => Self::Named(annotation.to_string()),
            };
        }

        match annotation {
            "str" | "string" | "String" | "&str" => Self::String,
            "int" | "integer" | "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64"
            | "usize" | "isize" => Self::Integer,
            "float" | "number" | "f32" | "f64" => Self::Number,
            "bool" | "boolean" => Self::Boolean,
            "None" | "null" | "()" => Self::Null,
            "list" | "List" | "sequence" | "Vec" | "array" => Self::Sequence(None),
            "dict" | "Dict" | "mapping" | "HashMap" | "object" => Self::Mapping(None),
            other => Self::Named(other.to_string()),
        }
    }

    /// Type implied by a default value when no type is declared.
    ///
    /// A null default implies nothing.
    pub fn infer(default: &Value) -> Option<Self> {
        match default {
            Value::Null => None,
            Value::Bool(_) => Some(Self::Boolean),
            Value::Number(n) if n.is_f64() => Some(Self::Number),
            Value::Number(_) => Some(Self::Integer),
            Value::String(_) => Some(Self::String),
            Value::Array(_) => Some(Self::Sequence(None)),
            Value::Object(_) => Some(Self::Mapping(None)),
        }
    }
}

fn is_none(s: &str) -> bool {
    matches!(s.trim(), "None" | "null")
}

/// Splits `a | b` at its only top-level bar.
fn split_union(s: &str) -> Option<(&str, &str)> {
    let parts = split_top_level(s, '|');
    match parts.as_slice() {
        [left, right] => Some((*left, *right)),
        _ => None,
    }
}

/// Splits `head[args]` or `head<args>` into head and argument text.
fn split_generic(s: &str) -> Option<(&str, &str)> {
    let open = s.find(['[', '<'])?;
    let close = match &s[open..=open] {
        "[" => ']',
        _ => '>',
    };
    let inner = s[open + 1..].strip_suffix(close)?;
    Some((s[..open].trim(), inner))
}

/// Splits on `sep` outside of brackets, trimming each part.
fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '[' | '<' | '(' => depth += 1,
            ']' | '>' | ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    let last = s[start..].trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last);
    }
    parts
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "str"),
            Self::Integer => write!(f, "int"),
            Self::Number => write!(f, "float"),
            Self::Boolean => write!(f, "bool"),
            Self::Null => write!(f, "None"),
            Self::Sequence(None) => write!(f, "list"),
            Self::Sequence(Some(elem)) => write!(f, "list[{}]", elem),
            Self::Mapping(None) => write!(f, "dict"),
            Self::Mapping(Some(value)) => write!(f, "dict[str, {}]", value),
            Self::Optional(inner) => write!(f, "Optional[{}]", inner),
            Self::Named(name) => write!(f, "{}", name),
        }
    }
}

impl From<String> for DeclaredType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<DeclaredType> for String {
    fn from(t: DeclaredType) -> Self {
        t.to_string()
    }
}

/// One parameter of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ParameterSpec {
    /// Parameter name
    name: String,
    /// How arguments bind to this parameter
    #[serde(default)]
    kind: ParameterKind,
    /// Declared type, if any
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    declared_type: Option<DeclaredType>,
    /// Default value; parameters with a default are optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    /// Documentation for the parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl ParameterSpec {
    /// Positional parameter without type, default or description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Positional,
            declared_type: None,
            default: None,
            description: None,
        }
    }

    /// Parameter collecting extra positional arguments.
    pub fn variadic_positional(name: impl Into<String>) -> Self {
        Self::new(name).with_kind(ParameterKind::VariadicPositional)
    }

    /// Parameter collecting extra named arguments.
    pub fn variadic_keyword(name: impl Into<String>) -> Self {
        Self::new(name).with_kind(ParameterKind::VariadicKeyword)
    }

    /// Sets the parameter kind.
    pub fn with_kind(mut self, kind: ParameterKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the declared type.
    pub fn with_type(mut self, declared_type: DeclaredType) -> Self {
        self.declared_type = Some(declared_type);
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declared type, else the type implied by the default.
    pub fn effective_type(&self) -> Option<DeclaredType> {
        self.declared_type
            .clone()
            .or_else(|| self.default.as_ref().and_then(DeclaredType::infer))
    }
}

/// A callable tool as seen by the model.
///
/// # Examples
///
/// ```
/// use parley_tools::ToolDescriptor;
///
/// let tool = ToolDescriptor::builder()
///     .name("now")
///     .summary("Current time.")
///     .build()
///     .unwrap();
/// assert_eq!(tool.full_description(), "Current time.");
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into), pattern = "owned")]
pub struct ToolDescriptor {
    /// Unique tool name
    name: String,
    /// Parameters in declaration order
    #[builder(default)]
    #[serde(default)]
    parameters: Vec<ParameterSpec>,
    /// One-line summary
    #[builder(default)]
    #[serde(default)]
    summary: String,
    /// Long description
    #[builder(default)]
    #[serde(default)]
    description: String,
}

impl ToolDescriptor {
    /// Descriptor with no parameters or documentation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            summary: String::new(),
            description: String::new(),
        }
    }

    /// Creates a builder for `ToolDescriptor`.
    pub fn builder() -> ToolDescriptorBuilder {
        ToolDescriptorBuilder::default()
    }

    /// Appends a parameter.
    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the one-line summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Sets the long description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Fills summary, long description and parameter descriptions from `doc`.
    ///
    /// Fields the documentation leaves empty keep their current value.
    pub fn with_doc(mut self, doc: &ToolDoc) -> Self {
        if !doc.summary().is_empty() {
            self.summary = doc.summary().clone();
        }
        if !doc.description().is_empty() {
            self.description = doc.description().clone();
        }
        for parameter in &mut self.parameters {
            if let Some(text) = doc.param_description(&parameter.name) {
                parameter.description = Some(text.to_string());
            }
        }
        self
    }

    /// Text sent to the model: summary and long description.
    pub fn full_description(&self) -> String {
        format!("{}\n{}", self.summary, self.description)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_primitives_and_containers() {
        assert_eq!(DeclaredType::parse("str"), DeclaredType::String);
        assert_eq!(DeclaredType::parse(" i64 "), DeclaredType::Integer);
        assert_eq!(DeclaredType::parse("float"), DeclaredType::Number);
        assert_eq!(DeclaredType::parse("list"), DeclaredType::Sequence(None));
        assert_eq!(
            DeclaredType::parse("dict[str, int]"),
            DeclaredType::Mapping(Some(Box::new(DeclaredType::Integer)))
        );
        assert_eq!(
            DeclaredType::parse("HashMap<String, Vec<bool>>"),
            DeclaredType::Mapping(Some(Box::new(DeclaredType::Sequence(Some(Box::new(
                DeclaredType::Boolean
            ))))))
        );
    }

    #[test]
    fn test_parse_optional_forms() {
        let expected = DeclaredType::Optional(Box::new(DeclaredType::Integer));
        assert_eq!(DeclaredType::parse("Optional[int]"), expected);
        assert_eq!(DeclaredType::parse("int | None"), expected);
        assert_eq!(DeclaredType::parse("None|int"), expected);
        assert_eq!(
            DeclaredType::parse("int | str"),
            DeclaredType::Named("int | str".to_string())
        );
    }

    #[test]
    fn test_display_reparses() {
        let t = DeclaredType::parse("Optional[list[dict[str, float]]]");
        assert_eq!(DeclaredType::parse(&t.to_string()), t);
    }

    #[test]
    fn test_effective_type_prefers_declaration() {
        let declared = ParameterSpec::new("x")
            .with_type(DeclaredType::String)
            .with_default(json!(3));
        assert_eq!(declared.effective_type(), Some(DeclaredType::String));

        let inferred = ParameterSpec::new("x").with_default(json!(0.5));
        assert_eq!(inferred.effective_type(), Some(DeclaredType::Number));

        let none_default = ParameterSpec::new("x").with_default(Value::Null);
        assert_eq!(none_default.effective_type(), None);
    }
}
