//! History converter entry points.

use crate::assets::AssetPolicy;
use crate::genai::{self, GenAiContent, GenAiHistory, GenerateContentResponse};
use crate::openai::{self, ChatCompletion, OpenAiMessage};
use parley_core::{ChatHistory, Dialect, Message, validate_history};
use parley_error::{ConversionResult, HistoryResult, ParleyResult};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Default inline size limit: 20 MiB.
pub const DEFAULT_INLINE_SIZE_THRESHOLD_BYTES: u64 = 20 * 1024 * 1024;

/// Options for outbound conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Inline assets above this size must carry a cloud reference
    pub inline_size_threshold_bytes: u64,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            inline_size_threshold_bytes: DEFAULT_INLINE_SIZE_THRESHOLD_BYTES,
        }
    }
}

/// Messages produced by one model call and the history they extend.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTurn {
    /// New messages, in order
    pub delta: Vec<Message>,
    /// Input history with `delta` appended
    pub history: ChatHistory,
}

impl ModelTurn {
    fn new(history: &ChatHistory, message: Message) -> Self {
        let delta = vec![message];
        Self {
            history: history.appended(delta.clone()),
            delta,
        }
    }
}

/// Converts unified histories to and from provider wire formats.
///
/// Every call is a pure function of its inputs; the converter keeps no
/// history between calls.
///
/// # Examples
///
/// ```
/// use parley_convert::{ConversionOptions, HistoryConverter, OpenAiContent, OpenAiMessage};
/// use parley_core::{ChatHistory, Message};
///
/// let history = ChatHistory::default().appended(vec![
///     Message::system().with_text("Be brief."),
///     Message::user().with_text("Hi"),
/// ]);
/// let converter = HistoryConverter::new(ConversionOptions::default());
///
/// let openai = converter.to_openai(&history).unwrap();
/// assert_eq!(openai.len(), 2);
/// assert!(matches!(
///     &openai[1],
///     OpenAiMessage::User { content: OpenAiContent::Text(t), .. } if t == "Hi"
/// ));
///
/// let genai = converter.to_genai(&history).unwrap();
/// assert!(genai.system_instruction.is_some());
/// assert_eq!(genai.contents.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryConverter {
    options: ConversionOptions,
}

impl HistoryConverter {
    /// Creates a converter.
    pub fn new(options: ConversionOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    fn policy(&self, dialect: Dialect) -> AssetPolicy {
        AssetPolicy::new(dialect, self.options.inline_size_threshold_bytes)
    }

    /// Converts a history into OpenAI chat messages.
    ///
    /// # Errors
    ///
    /// History integrity errors, content with no OpenAI mapping for its
    /// role, and assets OpenAI cannot reference.
    #[instrument(skip_all, fields(message_count = history.messages().len()))]
    pub fn to_openai(&self, history: &ChatHistory) -> ParleyResult<Vec<OpenAiMessage>> {
        preflight(history, Dialect::OpenAi)?;
        Ok(openai::to_openai(history.messages(), &self.policy(Dialect::OpenAi))?)
    }

    /// Converts a history into a GenAI system instruction and contents.
    ///
    /// # Errors
    ///
    /// History integrity errors, content with no GenAI mapping for its role,
    /// and assets with no usable source.
    #[instrument(skip_all, fields(message_count = history.messages().len()))]
    pub fn to_genai(&self, history: &ChatHistory) -> ParleyResult<GenAiHistory> {
        preflight(history, Dialect::GenAi)?;
        Ok(genai::to_genai(history.messages(), &self.policy(Dialect::GenAi))?)
    }

    /// Parses OpenAI chat messages into unified messages.
    ///
    /// Consecutive `tool` messages merge into one tool message and regain
    /// their tool names from the preceding assistant calls.
    pub fn messages_from_openai(&self, messages: &[OpenAiMessage]) -> ConversionResult<Vec<Message>> {
        openai::messages_from_openai(messages)
    }

    /// Parses one GenAI content into a unified message.
    pub fn message_from_genai(&self, content: &GenAiContent) -> ConversionResult<Message> {
        genai::message_from_genai(content)
    }

    /// Absorbs an OpenAI completion into `history`.
    #[instrument(skip_all, fields(model = %completion.model))]
    pub fn from_openai(
        &self,
        completion: &ChatCompletion,
        history: &ChatHistory,
        latency_ms: Option<u64>,
    ) -> ConversionResult<ModelTurn> {
        let message = openai::message_from_completion(completion, latency_ms)?;
        Ok(ModelTurn::new(history, message))
    }

    /// Absorbs a GenAI response into `history`.
    #[instrument(skip_all)]
    pub fn from_genai(
        &self,
        response: &GenerateContentResponse,
        history: &ChatHistory,
        latency_ms: Option<u64>,
    ) -> ConversionResult<ModelTurn> {
        let message = genai::message_from_response(response, latency_ms)?;
        Ok(ModelTurn::new(history, message))
    }
}

/// Integrity checks shared by both outbound paths.
fn preflight(history: &ChatHistory, dialect: Dialect) -> HistoryResult<()> {
    for warning in validate_history(history.messages())? {
        warn!(%dialect, %warning, "Role alternation violation");
    }
    Ok(())
}
