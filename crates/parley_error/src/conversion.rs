//! Dialect conversion error types.

/// Specific error conditions for history conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConversionErrorKind {
    /// Content tag has no mapping for this role in the target dialect
    #[display("{} content is not supported for role '{}' in the {} dialect", content, role, dialect)]
    UnsupportedContentForRole {
        /// Target dialect name
        dialect: String,
        /// Message role
        role: String,
        /// Content tag
        content: String,
    },
    /// Asset has no source the target dialect can reference
    #[display("Asset '{}' has no source usable by the {} dialect", asset_id, dialect)]
    UnresolvedAsset {
        /// Asset id
        asset_id: String,
        /// Target dialect name
        dialect: String,
    },
    /// Inline asset exceeds the inline threshold and has no cloud reference
    #[display(
        "Asset '{}' is {} bytes, above the inline threshold of {} bytes; upload it first",
        asset_id,
        size_bytes,
        threshold
    )]
    AssetRequiresUpload {
        /// Asset id
        asset_id: String,
        /// Asset size
        size_bytes: u64,
        /// Configured inline threshold
        threshold: u64,
    },
    /// Tool call arguments could not be interpreted as a JSON object
    #[display("Could not interpret arguments for tool call '{}': {}", call_id, message)]
    InvalidToolArguments {
        /// Tool call id
        call_id: String,
        /// Parse failure detail
        message: String,
    },
    /// External uploader failed to store an asset
    #[display("Upload of asset '{}' failed: {}", asset_id, message)]
    UploadFailed {
        /// Asset id
        asset_id: String,
        /// Uploader failure detail
        message: String,
    },
    /// Native response is missing required structure
    #[display("Malformed native response: {}", _0)]
    MalformedResponse(String),
}

/// Conversion error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Conversion Error: {} at line {} in {}", kind, line, file)]
pub struct ConversionError {
    /// The specific error kind
    pub kind: ConversionErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ConversionError {
    /// Creates a new error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConversionErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for conversion operations.
pub type ConversionResult<T> = Result<T, ConversionError>;
