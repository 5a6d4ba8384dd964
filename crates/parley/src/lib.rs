//! Parley keeps one description of a tool set and one conversation history,
//! and translates both into the wire format of whichever provider dialect
//! handles the next turn.
//!
//! The facade re-exports the workspace crates and adds configuration,
//! tracing setup and the [`Translator`] that wires them together.
//!
//! # Examples
//!
//! ```
//! use parley::{
//!     ChatHistory, ChatMetadata, DeclaredType, Dialect, Message, ParameterSpec, ParleyConfig,
//!     PreparedTurn, ToolDescriptor, ToolRegistry, Translator,
//! };
//! use std::sync::Arc;
//!
//! let mut registry = ToolRegistry::new();
//! registry
//!     .register(
//!         ToolDescriptor::new("add")
//!             .with_summary("Add two numbers.")
//!             .with_parameter(ParameterSpec::new("first").with_type(DeclaredType::Number))
//!             .with_parameter(ParameterSpec::new("second").with_type(DeclaredType::Number)),
//!     )
//!     .unwrap();
//!
//! let translator = Translator::new(Arc::new(registry), ParleyConfig::default());
//! let history = ChatHistory::new(
//!     ChatMetadata::for_provider(Dialect::GenAi),
//!     vec![Message::user().with_text("What is 1 + 2?")],
//! );
//!
//! match translator.prepare_turn(&history).unwrap() {
//!     PreparedTurn::GenAi { history, tool } => {
//!         assert_eq!(history.contents.len(), 1);
//!         assert_eq!(tool.unwrap().function_declarations[0].name, "add");
//!     }
//!     PreparedTurn::OpenAi { .. } => unreachable!(),
//! }
//! ```

mod config;
mod observability;
mod translator;

pub use config::{
    ConversionConfig, ConversionConfigBuilder, ParleyConfig, ParleyConfigBuilder, SchemaConfig,
    SchemaConfigBuilder, ENV_INLINE_THRESHOLD, ENV_STRICT,
};
pub use observability::{LogFormat, init_tracing, init_tracing_with};
pub use translator::{PreparedTurn, Translator};

pub use parley_convert::*;
pub use parley_core::*;
pub use parley_error::*;
pub use parley_tools::*;
