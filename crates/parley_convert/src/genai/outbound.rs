//! Unified history to GenAI contents.

use crate::assets::{AssetPolicy, unsupported};
use crate::genai::{GenAiContent, GenAiFunctionCall, GenAiFunctionResponse, GenAiHistory, GenAiPart};
use parley_core::{
    Asset, AssetLocation, CloudRef, ContentItem, Dialect, MediaKind, Message, Role,
    ToolCallResult,
};
use parley_error::ConversionResult;
use serde_json::{Map, Value};
use tracing::debug;

pub(crate) const USER_ROLE: &str = "user";
pub(crate) const MODEL_ROLE: &str = "model";

pub(crate) fn to_genai(messages: &[Message], policy: &AssetPolicy) -> ConversionResult<GenAiHistory> {
    let mut system_parts = Vec::new();
    let mut contents = Vec::with_capacity(messages.len());

    for message in messages {
        let (role, parts) = match message.role() {
            Role::System => {
                for item in message.content() {
                    match item {
                        ContentItem::Text { text } => system_parts.push(GenAiPart::text(text.clone())),
                        other => return Err(unsupported(Dialect::GenAi, Role::System, other)),
                    }
                }
                continue;
            }
            Role::User => (USER_ROLE, user_parts(message, policy)?),
            Role::Assistant => (MODEL_ROLE, model_parts(message, policy)?),
            Role::Tool => (USER_ROLE, tool_parts(message, policy)?),
        };
        if parts.is_empty() {
            debug!(message_id = %message.id(), "Skipping message with no sendable parts");
            continue;
        }
        contents.push(GenAiContent::new(role, parts));
    }

    Ok(GenAiHistory {
        system_instruction: (!system_parts.is_empty()).then(|| GenAiContent {
            role: None,
            parts: system_parts,
        }),
        contents,
    })
}

fn user_parts(message: &Message, policy: &AssetPolicy) -> ConversionResult<Vec<GenAiPart>> {
    let mut parts = Vec::new();
    for item in message.content() {
        match item {
            ContentItem::Text { text } => parts.push(GenAiPart::text(text.clone())),
            ContentItem::Media { .. } | ContentItem::Document { .. } => {
                push_asset_parts(&mut parts, item, policy)?
            }
            other => return Err(unsupported(Dialect::GenAi, Role::User, other)),
        }
    }
    Ok(parts)
}

fn model_parts(message: &Message, policy: &AssetPolicy) -> ConversionResult<Vec<GenAiPart>> {
    let mut parts = Vec::new();
    for item in message.content() {
        match item {
            ContentItem::Text { text } => parts.push(GenAiPart::text(text.clone())),
            ContentItem::Thought { .. } => {
                debug!(message_id = %message.id(), "Dropping thought from outbound history");
            }
            ContentItem::Media { .. } | ContentItem::Document { .. } => {
                push_asset_parts(&mut parts, item, policy)?
            }
            ContentItem::ToolCall(call) => parts.push(GenAiPart::function_call(GenAiFunctionCall {
                id: Some(call.id.clone()),
                name: call.name.clone(),
                args: call.args.clone(),
            })),
            other => return Err(unsupported(Dialect::GenAi, Role::Assistant, other)),
        }
    }
    Ok(parts)
}

/// Function responses, each followed by the files its result returned.
fn tool_parts(message: &Message, policy: &AssetPolicy) -> ConversionResult<Vec<GenAiPart>> {
    let mut parts = Vec::new();
    for item in message.content() {
        let ContentItem::ToolResult(result) = item else {
            return Err(unsupported(Dialect::GenAi, Role::Tool, item));
        };
        parts.push(GenAiPart::function_response(function_response(result)));
        for asset in &result.assets {
            let mime_type = match MediaKind::from_mime(asset.mime_type()) {
                Some(kind) => kind.resolve_mime(asset.mime_type()),
                None => asset.mime_type().clone(),
            };
            parts.push(asset_part(asset, mime_type, policy)?);
        }
    }
    Ok(parts)
}

fn function_response(result: &ToolCallResult) -> GenAiFunctionResponse {
    let key = if result.is_error { "error" } else { "result" };
    let mut response = Map::new();
    response.insert(key.to_string(), Value::String(result.content.clone()));
    GenAiFunctionResponse {
        id: Some(result.id.clone()),
        name: result.name.clone(),
        response,
    }
}

fn push_asset_parts(
    parts: &mut Vec<GenAiPart>,
    item: &ContentItem,
    policy: &AssetPolicy,
) -> ConversionResult<()> {
    match item {
        ContentItem::Media { kind, assets } => {
            for asset in assets {
                parts.push(asset_part(asset, kind.resolve_mime(asset.mime_type()), policy)?);
            }
        }
        ContentItem::Document { assets } => {
            for asset in assets {
                parts.push(asset_part(asset, asset.mime_type().clone(), policy)?);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Cloud reference first, then inline bytes, then URL or local path.
fn asset_part(asset: &Asset, mime_type: String, policy: &AssetPolicy) -> ConversionResult<GenAiPart> {
    if let Some(CloudRef::GenAi(uploaded)) = asset.cloud_ref_for(Dialect::GenAi, policy.now) {
        return Ok(GenAiPart::file_data(mime_type, uploaded.uri.clone()));
    }
    if let Some(data) = asset.data_base64() {
        policy.check_inline(asset)?;
        return Ok(GenAiPart::inline_data(mime_type, data.clone()));
    }
    match asset.location() {
        Some(AssetLocation::Url(url)) => Ok(GenAiPart::file_data(mime_type, url.clone())),
        Some(AssetLocation::Path(path)) => {
            Ok(GenAiPart::file_data(mime_type, path.display().to_string()))
        }
        None => Err(policy.unresolved(asset)),
    }
}
