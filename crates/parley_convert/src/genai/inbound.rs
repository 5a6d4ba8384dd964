//! GenAI contents and responses to unified messages.

use crate::assets::push_asset;
use crate::genai::{GenAiContent, GenAiFunctionResponse, GenAiPart, GenerateContentResponse};
use parley_core::{
    Asset, ContentItem, Dialect, FinishReason, GenerationMetadata, Message, Role,
    ToolCallRequest, ToolCallResult, UsageStats, generate_id,
};
use parley_error::{ConversionError, ConversionErrorKind, ConversionResult};
use serde_json::Value;
use tracing::debug;

fn role_of(content: &GenAiContent) -> ConversionResult<Role> {
    let answers_tools = content.parts.iter().any(|p| p.function_response.is_some())
        && content.parts.iter().all(|p| p.text.is_none());
    match content.role.as_deref() {
        Some("model") | Some("assistant") => Ok(Role::Assistant),
        Some("tool") | Some("function") => Ok(Role::Tool),
        Some("system") => Ok(Role::System),
        Some("user") | None if answers_tools => Ok(Role::Tool),
        Some("user") | None => Ok(Role::User),
        Some(other) => Err(ConversionError::new(ConversionErrorKind::MalformedResponse(
            format!("unknown content role '{}'", other),
        ))),
    }
}

pub(crate) fn message_from_genai(content: &GenAiContent) -> ConversionResult<Message> {
    let role = role_of(content)?;
    let mut items: Vec<ContentItem> = Vec::with_capacity(content.parts.len());

    for part in &content.parts {
        if let Some(asset) = part_asset(part) {
            match items.last_mut() {
                Some(ContentItem::ToolResult(result)) => result.assets.push(asset),
                _ => push_asset(&mut items, asset),
            }
        } else if let Some(text) = &part.text {
            if part.is_thought() {
                items.push(ContentItem::thought(text.clone()));
            } else {
                items.push(ContentItem::text(text.clone()));
            }
        } else if let Some(call) = &part.function_call {
            let id = call.id.clone().unwrap_or_else(|| generate_id("call"));
            items.push(ContentItem::ToolCall(
                ToolCallRequest::new(id, call.name.clone()).with_args(call.args.clone()),
            ));
        } else if let Some(response) = &part.function_response {
            items.push(ContentItem::ToolResult(tool_result(response)));
        } else {
            debug!("Skipping part without payload");
        }
    }

    Ok(Message::new(role).replacing_content(items))
}

fn part_asset(part: &GenAiPart) -> Option<Asset> {
    if let Some(blob) = &part.inline_data {
        return Some(Asset::inline(blob.data.clone(), blob.mime_type.clone()));
    }
    part.file_data
        .as_ref()
        .map(|file| Asset::from_url(file.file_uri.clone(), file.mime_type.clone()))
}

fn tool_result(response: &GenAiFunctionResponse) -> ToolCallResult {
    let id = response.id.clone().unwrap_or_else(|| generate_id("call"));
    if let Some(error) = response.response.get("error") {
        ToolCallResult::error(id, response.name.clone(), value_text(error))
    } else if let Some(result) = response.response.get("result") {
        ToolCallResult::success(id, response.name.clone(), value_text(result))
    } else {
        ToolCallResult::success(
            id,
            response.name.clone(),
            Value::Object(response.response.clone()).to_string(),
        )
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn finish_reason(reason: &str, has_tool_calls: bool) -> Option<FinishReason> {
    match reason {
        "STOP" if has_tool_calls => Some(FinishReason::ToolCalls),
        "STOP" => Some(FinishReason::Stop),
        "MAX_TOKENS" => Some(FinishReason::Length),
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" => {
            Some(FinishReason::ContentFilter)
        }
        _ => None,
    }
}

/// The model message of the first candidate, with generation metadata.
pub(crate) fn message_from_response(
    response: &GenerateContentResponse,
    latency_ms: Option<u64>,
) -> ConversionResult<Message> {
    let candidate = response.candidates.first().ok_or_else(|| {
        ConversionError::new(ConversionErrorKind::MalformedResponse(
            "response has no candidates".to_string(),
        ))
    })?;

    let message = match &candidate.content {
        Some(content) => message_from_genai(content)?,
        None => Message::assistant(),
    };
    if *message.role() != Role::Assistant {
        return Err(ConversionError::new(ConversionErrorKind::MalformedResponse(
            format!("candidate content has role '{}'", message.role()),
        )));
    }

    let has_tool_calls = message.tool_calls().next().is_some();
    let mut metadata = GenerationMetadata::builder()
        .model(response.model_version.clone().unwrap_or_default())
        .provider(Dialect::GenAi);
    if let Some(usage) = response.usage_metadata {
        metadata = metadata.usage(UsageStats::new(
            usage.prompt_token_count,
            usage.candidates_token_count + usage.thoughts_token_count,
            usage.total_token_count,
        ));
    }
    if let Some(reason) = candidate
        .finish_reason
        .as_deref()
        .and_then(|r| finish_reason(r, has_tool_calls))
    {
        metadata = metadata.finish_reason(reason);
    }
    if let Some(latency_ms) = latency_ms {
        metadata = metadata.latency_ms(latency_ms);
    }
    let metadata = metadata.build().map_err(|e| {
        ConversionError::new(ConversionErrorKind::MalformedResponse(e.to_string()))
    })?;

    Ok(message.with_metadata(metadata))
}
