//! Tool schema synthesis.
//!
//! Each descriptor is first resolved into a dialect-neutral [`ResolvedTool`]
//! that already reflects strict-mode and variadic rules, then rendered by the
//! dialect's [`ToolSchemaConverter`].

use crate::{
    DeclaredType, GenAiFunctionDeclaration, GenAiTool, JsonType, NO_DESCRIPTION,
    OpenAiToolSchema, ParameterKind, ParameterSpec, ToolDescriptor, ToolRegistry,
    ToolSchemaConverter,
};
use parley_core::Dialect;
use parley_error::{SchemaError, SchemaErrorKind, SchemaResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// What to do with a variadic-keyword parameter under strict mode.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VariadicKeywordPolicy {
    /// Fail synthesis
    #[default]
    Error,
    /// Leave the whole tool out
    Skip,
}

/// Knobs for schema synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisOptions {
    /// Require every parameter and forbid undeclared ones
    pub strict: bool,
    /// Variadic-keyword handling under strict mode
    pub on_variadic_keyword: VariadicKeywordPolicy,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            strict: true,
            on_variadic_keyword: VariadicKeywordPolicy::Error,
        }
    }
}

/// A parameter after type resolution and rule application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProperty {
    /// Parameter name
    pub name: String,
    /// JSON type
    pub json_type: JsonType,
    /// Element type for arrays
    pub items: Option<JsonType>,
    /// Whether null is accepted
    pub nullable: bool,
    /// Text shown to the model, including hints
    pub description: String,
}

/// A tool ready to be rendered into any dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTool {
    /// Tool name
    pub name: String,
    /// Summary and long description
    pub description: String,
    /// Strict mode flag
    pub strict: bool,
    /// Properties in declaration order
    pub properties: Vec<ResolvedProperty>,
    /// Required names in declaration order
    pub required: Vec<String>,
    /// Whether undeclared named arguments are accepted
    pub open_object: bool,
}

/// A synthesized tool schema in either dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolSchema {
    /// OpenAI function tool
    OpenAi(OpenAiToolSchema),
    /// GenAI function declaration
    GenAi(GenAiFunctionDeclaration),
}

/// Resolves a declared type to its JSON type and array element type.
///
/// Nesting below the first element level collapses: `list[list[int]]`
/// yields an array of arrays with no further element type.
fn resolve_type(declared: Option<&DeclaredType>) -> (JsonType, Option<JsonType>, bool) {
    match declared {
        None => (JsonType::String, None, false),
        Some(DeclaredType::Optional(inner)) => {
            let (json_type, items, _) = resolve_type(Some(&**inner));
            (json_type, items, true)
        }
        Some(DeclaredType::Sequence(elem)) => (
            JsonType::Array,
            elem.as_deref().map(|e| resolve_type(Some(e)).0),
            false,
        ),
        Some(other) => (primitive(other), None, false),
    }
}

fn primitive(declared: &DeclaredType) -> JsonType {
    match declared {
        DeclaredType::String | DeclaredType::Named(_) => JsonType::String,
        DeclaredType::Integer => JsonType::Integer,
        DeclaredType::Number => JsonType::Number,
        DeclaredType::Boolean => JsonType::Boolean,
        DeclaredType::Null => JsonType::Null,
        DeclaredType::Sequence(_) => JsonType::Array,
        DeclaredType::Mapping(_) => JsonType::Object,
        DeclaredType::Optional(inner) => primitive(inner),
    }
}

/// Builds provider tool schemas from a registry.
///
/// # Examples
///
/// ```
/// use parley_core::Dialect;
/// use parley_tools::{
///     ParameterSpec, SchemaSynthesizer, SynthesisOptions, ToolDescriptor, ToolRegistry,
///     ToolSchema, VariadicKeywordPolicy,
/// };
///
/// let mut registry = ToolRegistry::new();
/// registry
///     .register(
///         ToolDescriptor::new("search")
///             .with_parameter(ParameterSpec::new("query"))
///             .with_parameter(ParameterSpec::variadic_keyword("filters")),
///     )
///     .unwrap();
///
/// let strict = SchemaSynthesizer::new(&registry, SynthesisOptions::default());
/// assert!(strict.synthesize(Dialect::OpenAi).is_err());
///
/// let skipping = SchemaSynthesizer::new(
///     &registry,
///     SynthesisOptions { strict: true, on_variadic_keyword: VariadicKeywordPolicy::Skip },
/// );
/// assert!(skipping.synthesize(Dialect::OpenAi).unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SchemaSynthesizer<'a> {
    registry: &'a ToolRegistry,
    options: SynthesisOptions,
}

impl<'a> SchemaSynthesizer<'a> {
    /// Creates a synthesizer over `registry`.
    pub fn new(registry: &'a ToolRegistry, options: SynthesisOptions) -> Self {
        Self { registry, options }
    }

    /// Options in effect.
    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    /// Schemas for every registered tool, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaErrorKind::StrictModeVariadicKeyword`] when a tool
    /// takes arbitrary named arguments under strict mode and the policy is
    /// [`VariadicKeywordPolicy::Error`].
    #[instrument(skip(self), fields(tool_count = self.registry.len(), strict = self.options.strict))]
    pub fn synthesize(&self, dialect: Dialect) -> SchemaResult<Vec<ToolSchema>> {
        let mut schemas = Vec::with_capacity(self.registry.len());
        for descriptor in self.registry.all() {
            if let Some(schema) = self.synthesize_tool(descriptor, dialect)? {
                schemas.push(schema);
            }
        }
        Ok(schemas)
    }

    /// Schema for one tool, `None` when the tool is skipped.
    pub fn synthesize_tool(
        &self,
        descriptor: &ToolDescriptor,
        dialect: Dialect,
    ) -> SchemaResult<Option<ToolSchema>> {
        Ok(self.resolve(descriptor)?.map(|tool| match dialect {
            Dialect::OpenAi => ToolSchema::OpenAi(OpenAiToolSchema::convert(&tool)),
            Dialect::GenAi => ToolSchema::GenAi(GenAiFunctionDeclaration::convert(&tool)),
        }))
    }

    /// OpenAI `tools` array.
    pub fn openai_tools(&self) -> SchemaResult<Vec<OpenAiToolSchema>> {
        self.render::<OpenAiToolSchema>()
    }

    /// GenAI tool holding all function declarations.
    pub fn genai_tool(&self) -> SchemaResult<GenAiTool> {
        Ok(GenAiTool {
            function_declarations: self.render::<GenAiFunctionDeclaration>()?,
        })
    }

    fn render<C: ToolSchemaConverter>(&self) -> SchemaResult<Vec<C::Output>> {
        let mut out = Vec::with_capacity(self.registry.len());
        for descriptor in self.registry.all() {
            if let Some(tool) = self.resolve(descriptor)? {
                out.push(C::convert(&tool));
            }
        }
        Ok(out)
    }

    /// Applies type mapping, strict-mode and variadic rules to a descriptor.
    pub fn resolve(&self, descriptor: &ToolDescriptor) -> SchemaResult<Option<ResolvedTool>> {
        let strict = self.options.strict;
        let mut properties = Vec::with_capacity(descriptor.parameters().len());
        let mut required = Vec::new();
        let mut open_object = false;

        for parameter in descriptor.parameters() {
            match parameter.kind() {
                ParameterKind::VariadicKeyword if strict => {
                    match self.options.on_variadic_keyword {
                        VariadicKeywordPolicy::Error => {
                            return Err(SchemaError::new(
                                SchemaErrorKind::StrictModeVariadicKeyword {
                                    tool: descriptor.name().clone(),
                                    parameter: parameter.name().clone(),
                                },
                            ));
                        }
                        VariadicKeywordPolicy::Skip => {
                            debug!(
                                tool = %descriptor.name(),
                                parameter = %parameter.name(),
                                "Skipping tool with variadic-keyword parameter"
                            );
                            return Ok(None);
                        }
                    }
                }
                ParameterKind::VariadicKeyword => open_object = true,
                ParameterKind::VariadicPositional => {
                    if strict {
                        required.push(parameter.name().clone());
                    }
                    properties.push(variadic_property(parameter));
                }
                ParameterKind::Positional => {
                    let property = self.positional_property(parameter);
                    if strict || parameter.default().is_none() {
                        required.push(parameter.name().clone());
                    }
                    properties.push(property);
                }
            }
        }

        Ok(Some(ResolvedTool {
            name: descriptor.name().clone(),
            description: descriptor.full_description(),
            strict,
            properties,
            required,
            open_object,
        }))
    }

    fn positional_property(&self, parameter: &ParameterSpec) -> ResolvedProperty {
        let effective = parameter.effective_type();
        let (json_type, items, optional) = resolve_type(effective.as_ref());
        let mut description = base_description(parameter);
        let mut nullable = optional;

        if self.options.strict
            && let Some(default) = parameter.default()
        {
            nullable = true;
            description.push_str(&format!(
                " Pass null to use the default value ({}).",
                default
            ));
        }

        ResolvedProperty {
            name: parameter.name().clone(),
            json_type,
            items,
            nullable,
            description,
        }
    }
}

fn base_description(parameter: &ParameterSpec) -> String {
    parameter
        .description()
        .clone()
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

/// Array property whose elements have the parameter's own type.
fn variadic_property(parameter: &ParameterSpec) -> ResolvedProperty {
    let element = parameter.effective_type();
    let (element_type, _, _) = resolve_type(element.as_ref());
    ResolvedProperty {
        name: parameter.name().clone(),
        json_type: JsonType::Array,
        items: Some(element_type),
        nullable: false,
        description: format!(
            "{} Accepts a list of positional values.",
            base_description(parameter)
        ),
    }
}
