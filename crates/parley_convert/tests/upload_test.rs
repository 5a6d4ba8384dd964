//! Tests for the asset upload boundary.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parley_convert::*;
use parley_core::*;
use parley_error::{ConversionError, ConversionErrorKind, ConversionResult};
use std::sync::Mutex;

#[derive(Default)]
struct RecordingUploader {
    uploaded: Mutex<Vec<String>>,
}

#[async_trait]
impl AssetUploader for RecordingUploader {
    async fn upload(&self, asset: &Asset, dialect: Dialect) -> ConversionResult<CloudUpload> {
        self.uploaded
            .lock()
            .expect("lock")
            .push(asset.id().clone());
        Ok(match dialect {
            Dialect::OpenAi => CloudUpload::OpenAi {
                file_id: format!("file-{}", asset.id()),
            },
            Dialect::GenAi => CloudUpload::GenAi {
                uri: format!("https://files.example/{}", asset.id()),
                expires_at: Utc::now() + Duration::hours(48),
            },
        })
    }
}

struct FailingUploader;

#[async_trait]
impl AssetUploader for FailingUploader {
    async fn upload(&self, asset: &Asset, _dialect: Dialect) -> ConversionResult<CloudUpload> {
        Err(ConversionError::new(ConversionErrorKind::UploadFailed {
            asset_id: asset.id().clone(),
            message: "quota exceeded".to_string(),
        }))
    }
}

fn history_with_large_asset() -> ChatHistory {
    ChatHistory::default().appended(vec![
        Message::user()
            .with_text("Summarize")
            .with_document(vec![
                Asset::from_bytes(&[7u8; 64], "application/pdf").with_id("asset_big"),
                Asset::from_bytes(&[7u8; 8], "application/pdf").with_id("asset_small"),
            ]),
    ])
}

#[tokio::test]
async fn test_prepare_assets_uploads_only_oversized() {
    let uploader = RecordingUploader::default();
    let history = history_with_large_asset();

    let prepared = prepare_assets(&history, Dialect::GenAi, 32, &uploader)
        .await
        .expect("prepare");

    assert_eq!(*uploader.uploaded.lock().expect("lock"), vec!["asset_big".to_string()]);

    let ContentItem::Document { assets } = &prepared.messages()[0].content()[1] else {
        panic!("Expected document");
    };
    assert!(assets[0].cloud_refs().genai.is_some());
    assert!(assets[0].is_inline());
    assert!(assets[1].cloud_refs().is_empty());

    let converter = HistoryConverter::new(ConversionOptions {
        inline_size_threshold_bytes: 32,
    });
    assert!(converter.to_genai(&history).is_err());
    let converted = converter.to_genai(&prepared).expect("convert");
    let parts = &converted.contents[0].parts;
    assert_eq!(
        parts[1].file_data.as_ref().map(|f| f.file_uri.as_str()),
        Some("https://files.example/asset_big")
    );
    assert!(parts[2].inline_data.is_some());
}

#[tokio::test]
async fn test_prepare_assets_is_idempotent_per_dialect() {
    let uploader = RecordingUploader::default();
    let once = prepare_assets(&history_with_large_asset(), Dialect::OpenAi, 32, &uploader)
        .await
        .expect("prepare");
    let twice = prepare_assets(&once, Dialect::OpenAi, 32, &uploader)
        .await
        .expect("prepare");

    assert_eq!(uploader.uploaded.lock().expect("lock").len(), 1);
    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_upload_failure_propagates() {
    let err = prepare_assets(&history_with_large_asset(), Dialect::GenAi, 32, &FailingUploader)
        .await
        .unwrap_err();

    assert_eq!(
        err.kind,
        ConversionErrorKind::UploadFailed {
            asset_id: "asset_big".to_string(),
            message: "quota exceeded".to_string(),
        }
    );
}
