//! Per-turn translation between a unified history and one provider.

use crate::ParleyConfig;
use parley_convert::{
    AssetUploader, ChatCompletion, GenAiHistory, GenerateContentResponse, HistoryConverter,
    ModelTurn, OpenAiMessage, prepare_assets,
};
use parley_core::{ChatHistory, Dialect};
use parley_error::ParleyResult;
use parley_tools::{GenAiTool, OpenAiToolSchema, SchemaSynthesizer, ToolRegistry};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Request payload pieces for one provider call.
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedTurn {
    /// OpenAI chat-completions `messages` and `tools`
    OpenAi {
        /// Conversation messages
        messages: Vec<OpenAiMessage>,
        /// Function tools
        tools: Vec<OpenAiToolSchema>,
    },
    /// GenAI contents and the tool holding all function declarations
    GenAi {
        /// System instruction and contents
        history: GenAiHistory,
        /// `None` when no tool survived synthesis
        tool: Option<GenAiTool>,
    },
}

impl PreparedTurn {
    /// Dialect the payload targets.
    pub fn dialect(&self) -> Dialect {
        match self {
            PreparedTurn::OpenAi { .. } => Dialect::OpenAi,
            PreparedTurn::GenAi { .. } => Dialect::GenAi,
        }
    }
}

/// Wires a shared tool registry, the schema synthesizer and the history
/// converter for repeated turns.
///
/// The registry is shared read-only; each call re-synthesizes schemas, so a
/// history may switch providers between turns.
#[derive(Debug, Clone)]
pub struct Translator {
    registry: Arc<ToolRegistry>,
    config: ParleyConfig,
    converter: HistoryConverter,
}

impl Translator {
    /// Creates a translator.
    pub fn new(registry: Arc<ToolRegistry>, config: ParleyConfig) -> Self {
        let converter = HistoryConverter::new(config.conversion_options());
        Self {
            registry,
            config,
            converter,
        }
    }

    /// Shared tool registry.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Configuration in effect.
    pub fn config(&self) -> &ParleyConfig {
        &self.config
    }

    /// The underlying converter.
    pub fn converter(&self) -> &HistoryConverter {
        &self.converter
    }

    fn synthesizer(&self) -> SchemaSynthesizer<'_> {
        SchemaSynthesizer::new(&self.registry, self.config.synthesis_options())
    }

    /// Prepares a turn for the provider recorded in the history metadata.
    pub fn prepare_turn(&self, history: &ChatHistory) -> ParleyResult<PreparedTurn> {
        self.prepare_turn_for(history, history.provider())
    }

    /// Prepares a turn for an explicit dialect.
    #[instrument(skip(self, history), fields(message_count = history.messages().len(), tool_count = self.registry.len()))]
    pub fn prepare_turn_for(
        &self,
        history: &ChatHistory,
        dialect: Dialect,
    ) -> ParleyResult<PreparedTurn> {
        let synthesizer = self.synthesizer();
        let turn = match dialect {
            Dialect::OpenAi => PreparedTurn::OpenAi {
                messages: self.converter.to_openai(history)?,
                tools: synthesizer.openai_tools()?,
            },
            Dialect::GenAi => {
                let tool = synthesizer.genai_tool()?;
                PreparedTurn::GenAi {
                    history: self.converter.to_genai(history)?,
                    tool: (!tool.function_declarations.is_empty()).then_some(tool),
                }
            }
        };
        debug!(%dialect, "Prepared turn");
        Ok(turn)
    }

    /// Uploads oversized inline assets for the history's provider.
    pub async fn upload_assets<U: AssetUploader + ?Sized>(
        &self,
        history: &ChatHistory,
        uploader: &U,
    ) -> ParleyResult<ChatHistory> {
        Ok(prepare_assets(
            history,
            history.provider(),
            *self.config.conversion().inline_size_threshold_bytes(),
            uploader,
        )
        .await?)
    }

    /// Absorbs an OpenAI completion into `history`.
    pub fn absorb_openai(
        &self,
        completion: &ChatCompletion,
        history: &ChatHistory,
        latency_ms: Option<u64>,
    ) -> ParleyResult<ModelTurn> {
        Ok(self.converter.from_openai(completion, history, latency_ms)?)
    }

    /// Absorbs a GenAI response into `history`.
    pub fn absorb_genai(
        &self,
        response: &GenerateContentResponse,
        history: &ChatHistory,
        latency_ms: Option<u64>,
    ) -> ParleyResult<ModelTurn> {
        Ok(self.converter.from_genai(response, history, latency_ms)?)
    }
}
