//! GenAI content/parts dialect.

mod inbound;
mod outbound;
mod types;

pub(crate) use inbound::{message_from_genai, message_from_response};
pub(crate) use outbound::to_genai;
pub use types::{
    GenAiBlob, GenAiCandidate, GenAiContent, GenAiFileData, GenAiFunctionCall,
    GenAiFunctionResponse, GenAiHistory, GenAiPart, GenAiUsageMetadata, GenerateContentResponse,
};
