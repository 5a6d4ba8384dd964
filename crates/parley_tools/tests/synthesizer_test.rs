//! Tests for tool schema synthesis in both dialects.

use parley_core::Dialect;
use parley_error::SchemaErrorKind;
use parley_tools::*;
use serde_json::json;

fn add_tool() -> ToolDescriptor {
    let doc = ToolDoc::parse(
        "Add two numbers.

        :param first: First addend
        :param second: Second addend
        :return: The sum",
    );
    ToolDescriptor::new("add")
        .with_parameter(ParameterSpec::new("first").with_type(DeclaredType::Number))
        .with_parameter(ParameterSpec::new("second").with_type(DeclaredType::Number))
        .with_doc(&doc)
}

fn registry_of(tools: Vec<ToolDescriptor>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for tool in tools {
        registry.register(tool).expect("unique names");
    }
    registry
}

fn non_strict() -> SynthesisOptions {
    SynthesisOptions {
        strict: false,
        ..SynthesisOptions::default()
    }
}

// ============================================================================
// Dialect A
// ============================================================================

#[test]
fn test_add_tool_openai_strict() {
    let registry = registry_of(vec![add_tool()]);
    let tools = SchemaSynthesizer::new(&registry, SynthesisOptions::default())
        .openai_tools()
        .expect("synthesis");

    let value = serde_json::to_value(&tools[0]).expect("serialize");
    assert_eq!(
        value,
        json!({
            "type": "function",
            "function": {
                "name": "add",
                "description": "Add two numbers.",
                "strict": true,
                "parameters": {
                    "type": "object",
                    "properties": {
                        "first": {"type": "number", "description": "First addend"},
                        "second": {"type": "number", "description": "Second addend"}
                    },
                    "required": ["first", "second"],
                    "additionalProperties": false
                }
            }
        })
    );
}

#[test]
fn test_strict_defaulted_parameter_is_required_and_nullable() {
    let tool = ToolDescriptor::new("search")
        .with_parameter(ParameterSpec::new("query").with_type(DeclaredType::String))
        .with_parameter(
            ParameterSpec::new("limit")
                .with_default(json!(10))
                .with_description("Maximum results."),
        );
    let registry = registry_of(vec![tool]);
    let tools = SchemaSynthesizer::new(&registry, SynthesisOptions::default())
        .openai_tools()
        .expect("synthesis");

    let parameters = &tools[0].function.parameters;
    assert_eq!(parameters.required, vec!["query", "limit"]);

    let limit = serde_json::to_value(&parameters.properties["limit"]).expect("serialize");
    assert_eq!(limit["type"], json!(["integer", "null"]));
    assert_eq!(
        limit["description"],
        "Maximum results. Pass null to use the default value (10)."
    );
}

#[test]
fn test_non_strict_only_requires_parameters_without_defaults() {
    let tool = ToolDescriptor::new("search")
        .with_parameter(ParameterSpec::new("query").with_type(DeclaredType::String))
        .with_parameter(ParameterSpec::new("limit").with_default(json!(10)));
    let registry = registry_of(vec![tool]);
    let tools = SchemaSynthesizer::new(&registry, non_strict())
        .openai_tools()
        .expect("synthesis");

    let function = &tools[0].function;
    assert!(!function.strict);
    assert_eq!(function.parameters.required, vec!["query"]);
    assert_eq!(
        function.parameters.properties["limit"].property_type,
        OpenAiTypeSpec::Single(JsonType::Integer)
    );
    assert_eq!(function.parameters.properties["limit"].description, NO_DESCRIPTION);
}

#[test]
fn test_sequence_of_integer_has_items() {
    let tool = ToolDescriptor::new("sum").with_parameter(
        ParameterSpec::new("values").with_type(DeclaredType::parse("list[int]")),
    );
    let registry = registry_of(vec![tool]);
    let tools = SchemaSynthesizer::new(&registry, SynthesisOptions::default())
        .openai_tools()
        .expect("synthesis");

    let values = serde_json::to_value(&tools[0].function.parameters.properties["values"])
        .expect("serialize");
    assert_eq!(values["type"], "array");
    assert_eq!(values["items"], json!({"type": "integer"}));
}

#[test]
fn test_nested_sequence_collapses_and_bare_list_has_no_items() {
    let tool = ToolDescriptor::new("grid")
        .with_parameter(ParameterSpec::new("rows").with_type(DeclaredType::parse("list[list[int]]")))
        .with_parameter(ParameterSpec::new("tags").with_type(DeclaredType::parse("list")));
    let registry = registry_of(vec![tool]);
    let tools = SchemaSynthesizer::new(&registry, SynthesisOptions::default())
        .openai_tools()
        .expect("synthesis");

    let properties = serde_json::to_value(&tools[0].function.parameters.properties)
        .expect("serialize");
    assert_eq!(properties["rows"]["items"], json!({"type": "array"}));
    assert!(properties["tags"].get("items").is_none());
}

#[test]
fn test_unresolvable_types_degrade() {
    let tool = ToolDescriptor::new("open")
        .with_parameter(ParameterSpec::new("path").with_type(DeclaredType::parse("Path")))
        .with_parameter(ParameterSpec::new("options").with_type(DeclaredType::parse("dict[str, Any]")))
        .with_parameter(ParameterSpec::new("mode"));
    let registry = registry_of(vec![tool]);
    let tools = SchemaSynthesizer::new(&registry, SynthesisOptions::default())
        .openai_tools()
        .expect("synthesis");

    let properties = &tools[0].function.parameters.properties;
    assert_eq!(properties["path"].property_type, OpenAiTypeSpec::Single(JsonType::String));
    assert_eq!(properties["options"].property_type, OpenAiTypeSpec::Single(JsonType::Object));
    assert_eq!(properties["mode"].property_type, OpenAiTypeSpec::Single(JsonType::String));
}

// ============================================================================
// Variadic parameters
// ============================================================================

fn kwargs_tool() -> ToolDescriptor {
    ToolDescriptor::new("configure")
        .with_parameter(ParameterSpec::new("name").with_type(DeclaredType::String))
        .with_parameter(ParameterSpec::variadic_keyword("settings"))
}

#[test]
fn test_variadic_keyword_strict_error() {
    let registry = registry_of(vec![add_tool(), kwargs_tool()]);
    let err = SchemaSynthesizer::new(&registry, SynthesisOptions::default())
        .synthesize(Dialect::OpenAi)
        .unwrap_err();

    assert_eq!(
        err.kind,
        SchemaErrorKind::StrictModeVariadicKeyword {
            tool: "configure".to_string(),
            parameter: "settings".to_string(),
        }
    );
}

#[test]
fn test_variadic_keyword_strict_skip_drops_only_that_tool() {
    let registry = registry_of(vec![add_tool(), kwargs_tool()]);
    let options = SynthesisOptions {
        strict: true,
        on_variadic_keyword: VariadicKeywordPolicy::Skip,
    };
    let schemas = SchemaSynthesizer::new(&registry, options)
        .synthesize(Dialect::GenAi)
        .expect("synthesis");

    assert_eq!(schemas.len(), 1);
    assert!(matches!(&schemas[0], ToolSchema::GenAi(d) if d.name == "add"));
}

#[test]
fn test_variadic_keyword_non_strict_opens_object() {
    let registry = registry_of(vec![kwargs_tool()]);
    let synthesizer = SchemaSynthesizer::new(&registry, non_strict());

    let openai = synthesizer.openai_tools().expect("synthesis");
    let parameters = &openai[0].function.parameters;
    assert!(parameters.additional_properties);
    assert!(!parameters.properties.contains_key("settings"));

    let genai = synthesizer.genai_tool().expect("synthesis");
    let schema = genai.function_declarations[0]
        .parameters
        .as_ref()
        .expect("parameters");
    assert_eq!(schema.property_ordering, Some(vec!["name".to_string()]));
}

#[test]
fn test_variadic_positional() {
    let tool = ToolDescriptor::new("concat").with_parameter(
        ParameterSpec::variadic_positional("parts")
            .with_type(DeclaredType::String)
            .with_description("Pieces to join."),
    );
    let registry = registry_of(vec![tool]);

    let strict = SchemaSynthesizer::new(&registry, SynthesisOptions::default())
        .openai_tools()
        .expect("synthesis");
    let parts = serde_json::to_value(&strict[0].function.parameters.properties["parts"])
        .expect("serialize");
    assert_eq!(
        parts,
        json!({
            "type": "array",
            "items": {"type": "string"},
            "description": "Pieces to join. Accepts a list of positional values."
        })
    );
    assert_eq!(strict[0].function.parameters.required, vec!["parts"]);

    let relaxed = SchemaSynthesizer::new(&registry, non_strict())
        .openai_tools()
        .expect("synthesis");
    assert!(relaxed[0].function.parameters.required.is_empty());
}

// ============================================================================
// Dialect B
// ============================================================================

#[test]
fn test_add_tool_genai() {
    let registry = registry_of(vec![add_tool()]);
    let tool = SchemaSynthesizer::new(&registry, SynthesisOptions::default())
        .genai_tool()
        .expect("synthesis");

    let value = serde_json::to_value(&tool).expect("serialize");
    assert_eq!(
        value,
        json!({
            "functionDeclarations": [{
                "name": "add",
                "description": "Add two numbers.",
                "parameters": {
                    "type": "OBJECT",
                    "properties": {
                        "first": {"type": "NUMBER", "description": "First addend"},
                        "second": {"type": "NUMBER", "description": "Second addend"}
                    },
                    "required": ["first", "second"],
                    "propertyOrdering": ["first", "second"]
                }
            }]
        })
    );
}

#[test]
fn test_genai_nullable_default_and_items() {
    let tool = ToolDescriptor::new("fetch")
        .with_parameter(ParameterSpec::new("ids").with_type(DeclaredType::parse("list[int]")))
        .with_parameter(ParameterSpec::new("verbose").with_default(json!(false)));
    let registry = registry_of(vec![tool]);
    let tool = SchemaSynthesizer::new(&registry, SynthesisOptions::default())
        .genai_tool()
        .expect("synthesis");

    let parameters = tool.function_declarations[0]
        .parameters
        .as_ref()
        .expect("parameters");
    let properties = parameters.properties.as_ref().expect("properties");
    assert_eq!(properties["ids"].schema_type, GenAiType::Array);
    assert_eq!(
        properties["ids"].items.as_ref().map(|i| i.schema_type),
        Some(GenAiType::Integer)
    );
    assert_eq!(properties["verbose"].schema_type, GenAiType::Boolean);
    assert_eq!(properties["verbose"].nullable, Some(true));
}

#[test]
fn test_tool_without_parameters_has_no_genai_schema() {
    let registry = registry_of(vec![ToolDescriptor::new("now").with_summary("Current time.")]);
    let schemas = SchemaSynthesizer::new(&registry, SynthesisOptions::default())
        .synthesize(Dialect::GenAi)
        .expect("synthesis");

    match &schemas[0] {
        ToolSchema::GenAi(declaration) => {
            assert_eq!(declaration.description, "Current time.");
            assert!(declaration.parameters.is_none());
        }
        other => panic!("Expected GenAI declaration, got {:?}", other),
    }
}

#[test]
fn test_emission_follows_registration_order() {
    let registry = registry_of(vec![
        ToolDescriptor::new("zeta"),
        ToolDescriptor::new("alpha"),
        add_tool(),
    ]);
    let tools = SchemaSynthesizer::new(&registry, SynthesisOptions::default())
        .openai_tools()
        .expect("synthesis");
    let names: Vec<_> = tools.iter().map(|t| t.function.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "add"]);
}
