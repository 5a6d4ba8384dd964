//! Tool descriptors, registry and provider schema synthesis.
//!
//! Tools are described once as [`ToolDescriptor`] values, collected in a
//! [`ToolRegistry`], and rendered on every turn into the schema dialect of the
//! active provider by a [`SchemaSynthesizer`].
//!
//! # Examples
//!
//! ```
//! use parley_tools::{
//!     DeclaredType, ParameterSpec, SchemaSynthesizer, SynthesisOptions, ToolDescriptor,
//!     ToolDoc, ToolRegistry,
//! };
//!
//! let doc = ToolDoc::parse(
//!     "Add two numbers.\n\n:param first: First addend\n:param second: Second addend",
//! );
//! let add = ToolDescriptor::new("add")
//!     .with_parameter(ParameterSpec::new("first").with_type(DeclaredType::Number))
//!     .with_parameter(ParameterSpec::new("second").with_type(DeclaredType::Number))
//!     .with_doc(&doc);
//!
//! let mut registry = ToolRegistry::new();
//! registry.register(add).unwrap();
//!
//! let tools = SchemaSynthesizer::new(&registry, SynthesisOptions::default())
//!     .openai_tools()
//!     .unwrap();
//! assert_eq!(tools[0].function.parameters.required, vec!["first", "second"]);
//! ```

mod descriptor;
mod doc;
mod registry;
mod schema;
mod synthesizer;

pub use descriptor::{DeclaredType, ParameterKind, ParameterSpec, ToolDescriptor, ToolDescriptorBuilder};
pub use doc::ToolDoc;
pub use registry::ToolRegistry;
pub use schema::{
    GenAiFunctionDeclaration, GenAiSchema, GenAiTool, GenAiType, JsonType, OpenAiFunction,
    OpenAiItems, OpenAiParameters, OpenAiProperty, OpenAiToolSchema, OpenAiTypeSpec,
    ToolSchemaConverter,
};
pub use synthesizer::{
    ResolvedProperty, ResolvedTool, SchemaSynthesizer, SynthesisOptions, ToolSchema,
    VariadicKeywordPolicy,
};

/// Description used for parameters without documentation.
pub const NO_DESCRIPTION: &str = "No description";
