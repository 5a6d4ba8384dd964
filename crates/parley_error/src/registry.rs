//! Tool registry error types.

/// Specific error conditions for the tool registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RegistryErrorKind {
    /// No tool registered under the requested name
    #[display("Tool not found: {}", _0)]
    NotFound(String),
    /// A tool with the same name is already registered
    #[display("Duplicate tool name: {}", _0)]
    DuplicateName(String),
    /// Tool manifest could not be read or parsed
    #[display("Invalid tool manifest: {}", _0)]
    Manifest(String),
}

/// Tool registry error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Registry Error: {} at line {} in {}", kind, line, file)]
pub struct RegistryError {
    /// The specific error kind
    pub kind: RegistryErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl RegistryError {
    /// Creates a new error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RegistryErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
