//! File-like payloads referenced by message content.

use crate::{Dialect, generate_id};
use base64::Engine;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where an asset lives outside of any provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum AssetLocation {
    /// Path on local storage
    Path(PathBuf),
    /// Publicly reachable URL
    Url(String),
}

/// Reference to a file uploaded to the OpenAI files store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpenAiCloudRef {
    /// File identifier (`file-…`)
    pub file_id: String,
}

/// Reference to a file uploaded to the GenAI files store.
///
/// GenAI uploads expire, so the reference carries its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenAiCloudRef {
    /// File URI
    pub uri: String,
    /// Time after which the URI is no longer valid
    pub expires_at: DateTime<Utc>,
}

/// Provider-side copies of an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CloudRefs {
    /// OpenAI upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<OpenAiCloudRef>,
    /// GenAI upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genai: Option<GenAiCloudRef>,
}

impl CloudRefs {
    /// Returns true when no provider copy is recorded.
    pub fn is_empty(&self) -> bool {
        self.openai.is_none() && self.genai.is_none()
    }
}

/// A live cloud reference for one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudRef<'a> {
    /// OpenAI file id
    OpenAi(&'a OpenAiCloudRef),
    /// GenAI file URI
    GenAi(&'a GenAiCloudRef),
}

/// A media file or document referenced by content.
///
/// In steady state exactly one of `location`, `data_base64` or `cloud_refs`
/// is populated. While an upload is in flight an asset may carry both a
/// location and cloud references.
///
/// # Examples
///
/// ```
/// use parley_core::{Asset, AssetLocation};
///
/// let asset = Asset::from_url("https://example.com/cat.png", "image/png");
/// assert_eq!(
///     asset.location(),
///     &Some(AssetLocation::Url("https://example.com/cat.png".to_string()))
/// );
/// assert!(asset.id().starts_with("asset_"));
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into), pattern = "owned")]
pub struct Asset {
    /// Internal unique id
    id: String,
    /// Local path or URL
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<AssetLocation>,
    /// Inline payload for small files
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_base64: Option<String>,
    /// MIME type, e.g. `image/jpeg` or `application/pdf`
    mime_type: String,
    /// Payload size in bytes (0 when unknown)
    #[builder(default)]
    #[serde(default)]
    size_bytes: u64,
    /// Uploaded copies
    #[builder(default)]
    #[serde(default, skip_serializing_if = "CloudRefs::is_empty")]
    cloud_refs: CloudRefs,
}

impl Asset {
    /// Creates a builder for `Asset`.
    pub fn builder() -> AssetBuilder {
        AssetBuilder::default()
    }

    /// Asset referenced by URL.
    pub fn from_url(url: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id: generate_id("asset"),
            location: Some(AssetLocation::Url(url.into())),
            data_base64: None,
            mime_type: mime_type.into(),
            size_bytes: 0,
            cloud_refs: CloudRefs::default(),
        }
    }

    /// Asset stored on local disk.
    pub fn from_path(path: impl Into<PathBuf>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            id: generate_id("asset"),
            location: Some(AssetLocation::Path(path.into())),
            data_base64: None,
            mime_type: mime_type.into(),
            size_bytes,
            cloud_refs: CloudRefs::default(),
        }
    }

    /// Inline asset from an already base64-encoded payload.
    pub fn inline(data_base64: impl Into<String>, mime_type: impl Into<String>) -> Self {
        let data_base64 = data_base64.into();
        let size_bytes = decoded_len(&data_base64);
        Self {
            id: generate_id("asset"),
            location: None,
            data_base64: Some(data_base64),
            mime_type: mime_type.into(),
            size_bytes,
            cloud_refs: CloudRefs::default(),
        }
    }

    /// Inline asset from raw bytes.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        let mut asset = Self::inline(
            base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type,
        );
        asset.size_bytes = bytes.len() as u64;
        asset
    }

    /// Asset known only by its OpenAI upload.
    pub fn from_openai_file(file_id: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id: generate_id("asset"),
            location: None,
            data_base64: None,
            mime_type: mime_type.into(),
            size_bytes: 0,
            cloud_refs: CloudRefs::default(),
        }
        .with_openai_ref(file_id)
    }

    /// Returns a copy with the asset id replaced.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Returns a copy carrying an OpenAI cloud reference.
    pub fn with_openai_ref(mut self, file_id: impl Into<String>) -> Self {
        self.cloud_refs.openai = Some(OpenAiCloudRef {
            file_id: file_id.into(),
        });
        self
    }

    /// Returns a copy carrying a GenAI cloud reference.
    pub fn with_genai_ref(mut self, uri: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        self.cloud_refs.genai = Some(GenAiCloudRef {
            uri: uri.into(),
            expires_at,
        });
        self
    }

    /// Cloud reference usable by `dialect` at time `now`, skipping expired uploads.
    pub fn cloud_ref_for(&self, dialect: Dialect, now: DateTime<Utc>) -> Option<CloudRef<'_>> {
        match dialect {
            Dialect::OpenAi => self.cloud_refs.openai.as_ref().map(CloudRef::OpenAi),
            Dialect::GenAi => self
                .cloud_refs
                .genai
                .as_ref()
                .filter(|r| r.expires_at > now)
                .map(CloudRef::GenAi),
        }
    }

    /// Returns true when the payload is carried inline.
    pub fn is_inline(&self) -> bool {
        self.data_base64.is_some()
    }
}

/// Number of bytes a padded base64 string decodes to.
fn decoded_len(data: &str) -> u64 {
    let trimmed = data.trim_end();
    let padding = trimmed.chars().rev().take_while(|c| *c == '=').count();
    ((trimmed.len() / 4) * 3).saturating_sub(padding) as u64
}
