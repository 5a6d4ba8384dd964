//! Tool schema synthesis error types.

/// Specific error conditions for schema synthesis.
///
/// Synthesis degrades gracefully on missing types and documentation, so the
/// only fatal condition is an open-ended parameter set under strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SchemaErrorKind {
    /// A variadic-keyword parameter cannot be expressed under strict mode
    #[display(
        "Tool '{}' has variadic-keyword parameter '{}', which strict mode forbids",
        tool,
        parameter
    )]
    StrictModeVariadicKeyword {
        /// Tool name
        tool: String,
        /// Offending parameter name
        parameter: String,
    },
}

/// Error type for schema synthesis.
///
/// # Examples
///
/// ```
/// use parley_error::{SchemaError, SchemaErrorKind};
///
/// let err = SchemaError::new(SchemaErrorKind::StrictModeVariadicKeyword {
///     tool: "search".to_string(),
///     parameter: "filters".to_string(),
/// });
/// assert!(format!("{}", err).contains("strict mode"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Schema Error: {} at line {} in {}", kind, line, file)]
pub struct SchemaError {
    /// The specific error condition
    pub kind: SchemaErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SchemaError {
    /// Create a new SchemaError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SchemaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for schema synthesis.
pub type SchemaResult<T> = Result<T, SchemaError>;
