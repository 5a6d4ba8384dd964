//! OpenAI messages and completions to unified messages.

use crate::assets::{parse_data_uri, push_document, push_media};
use crate::openai::payload;
use crate::openai::{
    ChatCompletion, OpenAiContent, OpenAiContentPart, OpenAiFile, OpenAiMessage, OpenAiToolCall,
};
use parley_core::{
    Asset, ContentItem, Dialect, FinishReason, GenerationMetadata, MediaKind, Message, Role,
    ToolCallRequest, ToolCallResult, UsageStats,
};
use parley_error::{ConversionError, ConversionErrorKind, ConversionResult};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

const UNKNOWN_MIME: &str = "application/octet-stream";

pub(crate) fn messages_from_openai(messages: &[OpenAiMessage]) -> ConversionResult<Vec<Message>> {
    let mut tool_names: HashMap<&str, &str> = HashMap::new();
    let mut out: Vec<Message> = Vec::with_capacity(messages.len());

    for native in messages {
        match native {
            OpenAiMessage::System { content, name } => {
                out.push(named(Message::system(), name).replacing_content(content_items(content)?));
            }
            OpenAiMessage::User { content, name } => {
                out.push(named(Message::user(), name).replacing_content(content_items(content)?));
            }
            OpenAiMessage::Assistant {
                content,
                reasoning_content,
                tool_calls,
                name,
            } => {
                for call in tool_calls {
                    tool_names.insert(&call.id, &call.function.name);
                }
                let message = assistant_from_openai(
                    content.as_ref(),
                    reasoning_content.as_deref(),
                    tool_calls,
                )?;
                out.push(named(message, name));
            }
            OpenAiMessage::Tool {
                content,
                tool_call_id,
            } => {
                let tool_name = tool_names.get(tool_call_id.as_str()).copied().unwrap_or_else(|| {
                    debug!(%tool_call_id, "Tool message answers an unknown call");
                    ""
                });
                let result = tool_result(tool_call_id, tool_name, content);
                let merged = match out.pop() {
                    Some(last) if *last.role() == Role::Tool => last.with_tool_result(result),
                    Some(other) => {
                        out.push(other);
                        Message::tool().with_tool_result(result)
                    }
                    None => Message::tool().with_tool_result(result),
                };
                out.push(merged);
            }
        }
    }
    Ok(out)
}

fn named(message: Message, name: &Option<String>) -> Message {
    match name {
        Some(name) => message.with_name(name.clone()),
        None => message,
    }
}

fn content_items(content: &OpenAiContent) -> ConversionResult<Vec<ContentItem>> {
    let mut items = Vec::new();
    match content {
        OpenAiContent::Text(text) if text.is_empty() => {}
        OpenAiContent::Text(text) => items.push(ContentItem::text(text.clone())),
        OpenAiContent::Parts(parts) => {
            for part in parts {
                push_part(&mut items, part)?;
            }
        }
    }
    Ok(items)
}

fn push_part(items: &mut Vec<ContentItem>, part: &OpenAiContentPart) -> ConversionResult<()> {
    match part {
        OpenAiContentPart::Text { text } => items.push(ContentItem::text(text.clone())),
        OpenAiContentPart::ImageUrl { image_url } => {
            let asset = match parse_data_uri(&image_url.url) {
                Some((mime_type, data)) => Asset::inline(data, mime_type),
                None => Asset::from_url(image_url.url.clone(), image_mime_from_url(&image_url.url)),
            };
            push_media(items, MediaKind::Image, asset);
        }
        OpenAiContentPart::InputAudio { input_audio } => {
            let asset = Asset::inline(
                input_audio.data.clone(),
                format!("audio/{}", input_audio.format),
            );
            push_media(items, MediaKind::Audio, asset);
        }
        OpenAiContentPart::File { file } => push_document(items, file_asset(file)?),
    }
    Ok(())
}

/// Outbound file parts name the file after its asset id, so the id is restored from `filename`.
fn file_asset(file: &OpenAiFile) -> ConversionResult<Asset> {
    let asset = if let Some((mime_type, data)) =
        file.file_data.as_deref().and_then(parse_data_uri)
    {
        Asset::inline(data, mime_type)
    } else if let Some(file_id) = &file.file_id {
        Asset::from_openai_file(file_id.clone(), UNKNOWN_MIME)
    } else {
        return Err(ConversionError::new(ConversionErrorKind::MalformedResponse(
            "file part has neither file_id nor file_data".to_string(),
        )));
    };
    Ok(match file.filename.as_deref().filter(|name| !name.is_empty()) {
        Some(filename) => asset.with_id(filename),
        None => asset,
    })
}

/// Guesses an image MIME type from a URL's extension.
fn image_mime_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    let mime_type = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => MediaKind::Image.default_mime(),
    };
    mime_type.to_string()
}

fn assistant_from_openai(
    content: Option<&OpenAiContent>,
    reasoning: Option<&str>,
    tool_calls: &[OpenAiToolCall],
) -> ConversionResult<Message> {
    let mut message = Message::assistant();
    if let Some(reasoning) = reasoning.filter(|r| !r.is_empty()) {
        message = message.with_thought(reasoning);
    }
    if let Some(content) = content {
        for item in content_items(content)? {
            message = message.with_content(item);
        }
    }
    for call in tool_calls {
        message = message.with_tool_call(
            ToolCallRequest::new(call.id.clone(), call.function.name.clone())
                .with_args(parse_arguments(call)?),
        );
    }
    Ok(message)
}

fn parse_arguments(call: &OpenAiToolCall) -> ConversionResult<Map<String, Value>> {
    let raw = call.function.arguments.trim();
    if raw.is_empty() {
        return Ok(Map::new());
    }
    let invalid = |message: String| {
        ConversionError::new(ConversionErrorKind::InvalidToolArguments {
            call_id: call.id.clone(),
            message,
        })
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(args)) => Ok(args),
        Ok(other) => Err(invalid(format!("expected a JSON object, got {}", other))),
        Err(e) => Err(invalid(e.to_string())),
    }
}

fn tool_result(tool_call_id: &str, tool_name: &str, content: &OpenAiContent) -> ToolCallResult {
    let text = match content {
        OpenAiContent::Text(text) => text.clone(),
        OpenAiContent::Parts(parts) => parts
            .iter()
            .filter_map(|p| match p {
                OpenAiContentPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n"),
    };
    match payload::decode(&text) {
        Some((true, error)) => ToolCallResult::error(tool_call_id, tool_name, error),
        Some((false, output)) => ToolCallResult::success(tool_call_id, tool_name, output),
        None => ToolCallResult::success(tool_call_id, tool_name, text),
    }
}

fn finish_reason(reason: &str) -> Option<FinishReason> {
    match reason {
        "stop" => Some(FinishReason::Stop),
        "tool_calls" | "function_call" => Some(FinishReason::ToolCalls),
        "length" => Some(FinishReason::Length),
        "content_filter" => Some(FinishReason::ContentFilter),
        _ => None,
    }
}

/// The assistant message of the first choice, with generation metadata.
pub(crate) fn message_from_completion(
    completion: &ChatCompletion,
    latency_ms: Option<u64>,
) -> ConversionResult<Message> {
    let choice = completion.choices.first().ok_or_else(|| {
        ConversionError::new(ConversionErrorKind::MalformedResponse(
            "completion has no choices".to_string(),
        ))
    })?;
    let OpenAiMessage::Assistant {
        content,
        reasoning_content,
        tool_calls,
        name,
    } = &choice.message
    else {
        return Err(ConversionError::new(ConversionErrorKind::MalformedResponse(
            "first choice is not an assistant message".to_string(),
        )));
    };

    let message = assistant_from_openai(content.as_ref(), reasoning_content.as_deref(), tool_calls)?;

    let mut metadata = GenerationMetadata::builder()
        .model(completion.model.clone())
        .provider(Dialect::OpenAi);
    if let Some(usage) = completion.usage {
        metadata = metadata.usage(UsageStats::new(
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens,
        ));
    }
    if let Some(reason) = choice.finish_reason.as_deref().and_then(finish_reason) {
        metadata = metadata.finish_reason(reason);
    }
    if let Some(latency_ms) = latency_ms {
        metadata = metadata.latency_ms(latency_ms);
    }
    let metadata = metadata.build().map_err(|e| {
        ConversionError::new(ConversionErrorKind::MalformedResponse(e.to_string()))
    })?;

    Ok(named(message, name).with_metadata(metadata))
}
