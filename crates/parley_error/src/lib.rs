//! Error types for the Parley library.
//!
//! Every domain gets a `*ErrorKind` enum describing the condition and a
//! `*Error` struct that records where the error was raised.

mod config;
mod conversion;
mod history;
mod registry;
mod schema;

pub use config::ConfigError;
pub use conversion::{ConversionError, ConversionErrorKind, ConversionResult};
pub use history::{HistoryError, HistoryErrorKind, HistoryResult};
pub use registry::{RegistryError, RegistryErrorKind, RegistryResult};
pub use schema::{SchemaError, SchemaErrorKind, SchemaResult};

/// JSON serialization/deserialization error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<serde_json::Error> for JsonError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum ParleyErrorKind {
    /// Tool schema synthesis error
    #[display("{}", _0)]
    Schema(SchemaError),
    /// Tool registry error
    #[display("{}", _0)]
    Registry(RegistryError),
    /// Dialect conversion error
    #[display("{}", _0)]
    Conversion(ConversionError),
    /// Conversation history integrity error
    #[display("{}", _0)]
    History(HistoryError),
    /// Configuration error
    #[display("{}", _0)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[display("{}", _0)]
    Json(JsonError),
}

/// Parley error with kind discrimination.
#[derive(Debug, derive_more::Display)]
#[display("Parley Error: {}", _0)]
pub struct ParleyError(Box<ParleyErrorKind>);

impl ParleyError {
    /// Create a new error from a kind.
    pub fn new(kind: ParleyErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ParleyErrorKind {
        &self.0
    }
}

impl std::error::Error for ParleyError {}

// Generic From implementation for any type that converts to ParleyErrorKind
impl<T> From<T> for ParleyError
where
    T: Into<ParleyErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Parley operations.
pub type ParleyResult<T> = std::result::Result<T, ParleyError>;
