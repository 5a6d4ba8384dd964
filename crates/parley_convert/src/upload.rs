//! Boundary to the external asset uploader.

use crate::assets::requires_upload;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parley_core::{Asset, ChatHistory, ContentItem, Dialect, ToolCallResult};
use parley_error::ConversionResult;
use tracing::{debug, instrument};

/// Where an uploaded asset now lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloudUpload {
    /// OpenAI file id
    OpenAi {
        /// File identifier
        file_id: String,
    },
    /// GenAI file URI
    GenAi {
        /// File URI
        uri: String,
        /// Expiry of the upload
        expires_at: DateTime<Utc>,
    },
}

/// Stores assets with a provider.
///
/// Implementations perform the network upload; failures should be reported
/// as [`ConversionErrorKind::UploadFailed`](parley_error::ConversionErrorKind::UploadFailed).
#[async_trait]
pub trait AssetUploader: Send + Sync {
    /// Uploads `asset` for use with `dialect`.
    async fn upload(&self, asset: &Asset, dialect: Dialect) -> ConversionResult<CloudUpload>;
}

fn attach(asset: &Asset, upload: CloudUpload) -> Asset {
    match upload {
        CloudUpload::OpenAi { file_id } => asset.clone().with_openai_ref(file_id),
        CloudUpload::GenAi { uri, expires_at } => asset.clone().with_genai_ref(uri, expires_at),
    }
}

async fn upload_all<U: AssetUploader + ?Sized>(
    assets: &[Asset],
    dialect: Dialect,
    threshold: u64,
    now: DateTime<Utc>,
    uploader: &U,
) -> ConversionResult<Vec<Asset>> {
    let mut out = Vec::with_capacity(assets.len());
    for asset in assets {
        if requires_upload(asset, dialect, threshold, now) {
            let upload = uploader.upload(asset, dialect).await?;
            debug!(asset_id = %asset.id(), size_bytes = asset.size_bytes(), "Uploaded asset");
            out.push(attach(asset, upload));
        } else {
            out.push(asset.clone());
        }
    }
    Ok(out)
}

/// Uploads every inline asset above `threshold` that lacks a live cloud
/// reference for `dialect`, returning a history whose assets carry the new
/// references.
///
/// Inline payloads are kept so the history can still be sent to the other
/// dialect.
#[instrument(skip(history, uploader), fields(message_count = history.messages().len()))]
pub async fn prepare_assets<U: AssetUploader + ?Sized>(
    history: &ChatHistory,
    dialect: Dialect,
    threshold: u64,
    uploader: &U,
) -> ConversionResult<ChatHistory> {
    let now = Utc::now();
    let mut messages = Vec::with_capacity(history.messages().len());
    for message in history.messages() {
        let mut content = Vec::with_capacity(message.content().len());
        for item in message.content() {
            let prepared = match item {
                ContentItem::Media { kind, assets } => ContentItem::Media {
                    kind: *kind,
                    assets: upload_all(assets, dialect, threshold, now, uploader).await?,
                },
                ContentItem::Document { assets } => ContentItem::Document {
                    assets: upload_all(assets, dialect, threshold, now, uploader).await?,
                },
                ContentItem::ToolResult(result) => ContentItem::ToolResult(ToolCallResult {
                    assets: upload_all(&result.assets, dialect, threshold, now, uploader).await?,
                    ..result.clone()
                }),
                other => other.clone(),
            };
            content.push(prepared);
        }
        messages.push(message.clone().replacing_content(content));
    }
    Ok(ChatHistory::new(history.chat_metadata().clone(), messages))
}
