//! Conversation history integrity error types.

/// Integrity violations in a unified conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HistoryErrorKind {
    /// A tool result references no pending tool call request
    #[display("Tool result '{}' has no matching pending tool call request", _0)]
    ToolResultMismatch(String),
    /// Two tool call requests in one message share an id
    #[display("Message '{}' contains duplicate tool call id '{}'", message_id, call_id)]
    DuplicateToolCallId {
        /// Owning message id
        message_id: String,
        /// Repeated call id
        call_id: String,
    },
    /// Generation metadata attached to a message not authored by the assistant
    #[display("Message '{}' carries generation metadata but is not an assistant message", _0)]
    MetadataOnNonAssistant(String),
}

/// History integrity error with location tracking.
///
/// # Examples
///
/// ```
/// use parley_error::{HistoryError, HistoryErrorKind};
///
/// let err = HistoryError::new(HistoryErrorKind::ToolResultMismatch("abc".to_string()));
/// assert!(format!("{}", err).contains("abc"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("History Error: {} at line {} in {}", kind, line, file)]
pub struct HistoryError {
    /// The specific error condition
    pub kind: HistoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl HistoryError {
    /// Create a new HistoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: HistoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for history validation.
pub type HistoryResult<T> = Result<T, HistoryError>;
