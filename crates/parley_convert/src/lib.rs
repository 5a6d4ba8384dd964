//! Bidirectional conversion between Parley histories and provider formats.
//!
//! Outbound conversion maps each `(role, content)` pair through a fixed
//! table per dialect; pairs outside the table fail with
//! [`ConversionErrorKind::UnsupportedContentForRole`](parley_error::ConversionErrorKind::UnsupportedContentForRole).
//! Inbound conversion turns native responses into assistant messages with
//! generation metadata.

mod assets;
mod converter;
mod genai;
mod openai;
mod upload;

pub use converter::{
    ConversionOptions, DEFAULT_INLINE_SIZE_THRESHOLD_BYTES, HistoryConverter, ModelTurn,
};
pub use genai::{
    GenAiBlob, GenAiCandidate, GenAiContent, GenAiFileData, GenAiFunctionCall,
    GenAiFunctionResponse, GenAiHistory, GenAiPart, GenAiUsageMetadata, GenerateContentResponse,
};
pub use openai::{
    ChatChoice, ChatCompletion, OpenAiContent, OpenAiContentPart, OpenAiFile, OpenAiFunctionCall,
    OpenAiImageUrl, OpenAiInputAudio, OpenAiMessage, OpenAiToolCall, OpenAiUsage,
};
pub use upload::{AssetUploader, CloudUpload, prepare_assets};
