//! Unified history to OpenAI messages.

use crate::assets::{AssetPolicy, data_uri, unsupported};
use crate::openai::payload;
use crate::openai::{
    OpenAiContent, OpenAiContentPart, OpenAiFile, OpenAiFunctionCall, OpenAiImageUrl,
    OpenAiInputAudio, OpenAiMessage, OpenAiToolCall,
};
use parley_core::{
    Asset, AssetLocation, CloudRef, ContentItem, Dialect, MediaKind, Message, Role,
    ToolCallRequest,
};
use parley_error::{ConversionError, ConversionErrorKind, ConversionResult};
use tracing::debug;

const TOOL_FILES_NOTE: &str = "The preceding tool results returned these files.";

pub(crate) fn to_openai(
    messages: &[Message],
    policy: &AssetPolicy,
) -> ConversionResult<Vec<OpenAiMessage>> {
    let mut out = Vec::with_capacity(messages.len());
    for message in messages {
        match message.role() {
            Role::System => out.push(system_message(message)?),
            Role::User => out.push(user_message(message, policy)?),
            Role::Assistant => match assistant_message(message)? {
                Some(native) => out.push(native),
                None => debug!(
                    message_id = %message.id(),
                    "Skipping message with no sendable content"
                ),
            },
            Role::Tool => tool_messages(message, policy, &mut out)?,
        }
    }
    Ok(out)
}

/// String content for a lone text part, an array otherwise.
fn collapse(parts: Vec<OpenAiContentPart>) -> OpenAiContent {
    if let [OpenAiContentPart::Text { text }] = parts.as_slice() {
        return OpenAiContent::Text(text.clone());
    }
    if parts.is_empty() {
        OpenAiContent::Text(String::new())
    } else {
        OpenAiContent::Parts(parts)
    }
}

fn text_part(text: &str) -> OpenAiContentPart {
    OpenAiContentPart::Text {
        text: text.to_string(),
    }
}

fn system_message(message: &Message) -> ConversionResult<OpenAiMessage> {
    let mut parts = Vec::new();
    for item in message.content() {
        match item {
            ContentItem::Text { text } => parts.push(text_part(text)),
            other => return Err(unsupported(Dialect::OpenAi, Role::System, other)),
        }
    }
    Ok(OpenAiMessage::System {
        content: collapse(parts),
        name: message.name().clone(),
    })
}

fn user_message(message: &Message, policy: &AssetPolicy) -> ConversionResult<OpenAiMessage> {
    let mut parts = Vec::new();
    for item in message.content() {
        match item {
            ContentItem::Text { text } => parts.push(text_part(text)),
            ContentItem::Media { kind, assets } => {
                for asset in assets {
                    parts.push(media_part(*kind, asset, policy, Role::User, item)?);
                }
            }
            ContentItem::Document { assets } => {
                for asset in assets {
                    parts.push(file_part(asset, policy)?);
                }
            }
            other => return Err(unsupported(Dialect::OpenAi, Role::User, other)),
        }
    }
    Ok(OpenAiMessage::User {
        content: collapse(parts),
        name: message.name().clone(),
    })
}

/// `None` when nothing but reasoning remains; OpenAI rejects an assistant
/// message with neither content nor tool calls.
fn assistant_message(message: &Message) -> ConversionResult<Option<OpenAiMessage>> {
    let mut parts = Vec::new();
    let mut tool_calls = Vec::new();
    for item in message.content() {
        match item {
            ContentItem::Text { text } => parts.push(text_part(text)),
            ContentItem::Thought { .. } => {
                debug!(message_id = %message.id(), "Dropping thought from outbound history");
            }
            ContentItem::ToolCall(call) => tool_calls.push(tool_call(call)?),
            other => return Err(unsupported(Dialect::OpenAi, Role::Assistant, other)),
        }
    }
    if parts.is_empty() && tool_calls.is_empty() {
        return Ok(None);
    }
    Ok(Some(OpenAiMessage::Assistant {
        content: (!parts.is_empty()).then(|| collapse(parts)),
        reasoning_content: None,
        tool_calls,
        name: message.name().clone(),
    }))
}

fn tool_call(call: &ToolCallRequest) -> ConversionResult<OpenAiToolCall> {
    let arguments = serde_json::to_string(&call.args).map_err(|e| {
        ConversionError::new(ConversionErrorKind::InvalidToolArguments {
            call_id: call.id.clone(),
            message: e.to_string(),
        })
    })?;
    Ok(OpenAiToolCall {
        id: call.id.clone(),
        tool_type: "function".to_string(),
        function: OpenAiFunctionCall {
            name: call.name.clone(),
            arguments,
        },
    })
}

/// One `tool` message per result, then a `user` message carrying any returned files.
fn tool_messages(
    message: &Message,
    policy: &AssetPolicy,
    out: &mut Vec<OpenAiMessage>,
) -> ConversionResult<()> {
    let mut file_parts = Vec::new();
    for item in message.content() {
        let ContentItem::ToolResult(result) = item else {
            return Err(unsupported(Dialect::OpenAi, Role::Tool, item));
        };
        out.push(OpenAiMessage::Tool {
            content: OpenAiContent::Text(payload::encode(result)),
            tool_call_id: result.id.clone(),
        });
        for asset in &result.assets {
            let part = match MediaKind::from_mime(asset.mime_type()) {
                Some(kind) => media_part(kind, asset, policy, Role::Tool, item)?,
                None => file_part(asset, policy)?,
            };
            file_parts.push(part);
        }
    }

    if !file_parts.is_empty() {
        debug!(files = file_parts.len(), "Forwarding tool result files in a user message");
        let mut parts = vec![text_part(TOOL_FILES_NOTE)];
        parts.append(&mut file_parts);
        out.push(OpenAiMessage::User {
            content: OpenAiContent::Parts(parts),
            name: None,
        });
    }
    Ok(())
}

fn media_part(
    kind: MediaKind,
    asset: &Asset,
    policy: &AssetPolicy,
    role: Role,
    item: &ContentItem,
) -> ConversionResult<OpenAiContentPart> {
    match kind {
        MediaKind::Image => image_part(asset, policy),
        MediaKind::Audio => audio_part(asset, policy),
        MediaKind::Video => Err(unsupported(Dialect::OpenAi, role, item)),
    }
}

fn image_part(asset: &Asset, policy: &AssetPolicy) -> ConversionResult<OpenAiContentPart> {
    let url = match (asset.location(), asset.data_base64()) {
        (Some(AssetLocation::Url(url)), _) => url.clone(),
        (_, Some(data)) => {
            policy.check_inline(asset)?;
            data_uri(&MediaKind::Image.resolve_mime(asset.mime_type()), data)
        }
        _ => return Err(policy.unresolved(asset)),
    };
    Ok(OpenAiContentPart::ImageUrl {
        image_url: OpenAiImageUrl { url, detail: None },
    })
}

fn audio_part(asset: &Asset, policy: &AssetPolicy) -> ConversionResult<OpenAiContentPart> {
    let Some(data) = asset.data_base64() else {
        return Err(policy.unresolved(asset));
    };
    policy.check_inline(asset)?;
    Ok(OpenAiContentPart::InputAudio {
        input_audio: OpenAiInputAudio {
            data: data.clone(),
            format: audio_format(&MediaKind::Audio.resolve_mime(asset.mime_type())),
        },
    })
}

fn file_part(asset: &Asset, policy: &AssetPolicy) -> ConversionResult<OpenAiContentPart> {
    let file = if let Some(CloudRef::OpenAi(uploaded)) =
        asset.cloud_ref_for(Dialect::OpenAi, policy.now)
    {
        OpenAiFile {
            file_id: Some(uploaded.file_id.clone()),
            file_data: None,
            filename: None,
        }
    } else if let Some(data) = asset.data_base64() {
        policy.check_inline(asset)?;
        OpenAiFile {
            file_id: None,
            file_data: Some(data_uri(asset.mime_type(), data)),
            filename: Some(asset.id().clone()),
        }
    } else {
        return Err(policy.unresolved(asset));
    };
    Ok(OpenAiContentPart::File { file })
}

/// `input_audio` format name for an audio MIME type.
pub(crate) fn audio_format(mime_type: &str) -> String {
    match mime_type {
        "audio/mp3" | "audio/mpeg" => "mp3".to_string(),
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav".to_string(),
        other => other
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .unwrap_or(other)
            .to_string(),
    }
}
