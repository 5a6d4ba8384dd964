//! Asset helpers shared by both dialects.

use chrono::{DateTime, Utc};
use parley_core::{Asset, ContentItem, Dialect, MediaKind, Role};
use parley_error::{ConversionError, ConversionErrorKind, ConversionResult};

/// Per-conversion view of the inline size policy.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AssetPolicy {
    pub dialect: Dialect,
    pub threshold: u64,
    pub now: DateTime<Utc>,
}

impl AssetPolicy {
    pub fn new(dialect: Dialect, threshold: u64) -> Self {
        Self {
            dialect,
            threshold,
            now: Utc::now(),
        }
    }

    /// Fails when `asset` would have to be inlined above the threshold.
    #[track_caller]
    pub fn check_inline(&self, asset: &Asset) -> ConversionResult<()> {
        if requires_upload(asset, self.dialect, self.threshold, self.now) {
            return Err(ConversionError::new(
                ConversionErrorKind::AssetRequiresUpload {
                    asset_id: asset.id().clone(),
                    size_bytes: *asset.size_bytes(),
                    threshold: self.threshold,
                },
            ));
        }
        Ok(())
    }

    #[track_caller]
    pub fn unresolved(&self, asset: &Asset) -> ConversionError {
        ConversionError::new(ConversionErrorKind::UnresolvedAsset {
            asset_id: asset.id().clone(),
            dialect: self.dialect.to_string(),
        })
    }
}

/// Inline asset above `threshold` with no live cloud reference for `dialect`.
pub(crate) fn requires_upload(
    asset: &Asset,
    dialect: Dialect,
    threshold: u64,
    now: DateTime<Utc>,
) -> bool {
    asset.is_inline()
        && *asset.size_bytes() > threshold
        && asset.cloud_ref_for(dialect, now).is_none()
}

#[track_caller]
pub(crate) fn unsupported(dialect: Dialect, role: Role, item: &ContentItem) -> ConversionError {
    ConversionError::new(ConversionErrorKind::UnsupportedContentForRole {
        dialect: dialect.to_string(),
        role: role.to_string(),
        content: item.tag_name().to_string(),
    })
}

pub(crate) fn data_uri(mime_type: &str, data: &str) -> String {
    format!("data:{};base64,{}", mime_type, data)
}

/// Splits a base64 `data:` URI into MIME type and payload.
pub(crate) fn parse_data_uri(uri: &str) -> Option<(&str, &str)> {
    uri.strip_prefix("data:")?.split_once(";base64,")
}

/// Appends `asset` as media of `kind`, extending the previous item when it has the same kind.
pub(crate) fn push_media(items: &mut Vec<ContentItem>, kind: MediaKind, asset: Asset) {
    match items.last_mut() {
        Some(ContentItem::Media {
            kind: last_kind,
            assets,
        }) if *last_kind == kind => assets.push(asset),
        _ => items.push(ContentItem::media(kind, vec![asset])),
    }
}

/// Appends `asset` as a document, extending a preceding document item.
pub(crate) fn push_document(items: &mut Vec<ContentItem>, asset: Asset) {
    match items.last_mut() {
        Some(ContentItem::Document { assets }) => assets.push(asset),
        _ => items.push(ContentItem::document(vec![asset])),
    }
}

/// Appends `asset` as media or document depending on its MIME type.
pub(crate) fn push_asset(items: &mut Vec<ContentItem>, asset: Asset) {
    match MediaKind::from_mime(asset.mime_type()) {
        Some(kind) => push_media(items, kind, asset),
        None => push_document(items, asset),
    }
}
