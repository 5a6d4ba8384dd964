//! Media kinds for multimodal content.

use serde::{Deserialize, Serialize};

/// Kind of media carried by a [`ContentItem::Media`](crate::ContentItem::Media) item.
///
/// # Examples
///
/// ```
/// use parley_core::MediaKind;
///
/// assert_eq!(MediaKind::Image.resolve_mime("image/jpeg"), "image/jpeg");
/// assert_eq!(MediaKind::Image.resolve_mime("application/octet-stream"), "image/png");
/// assert_eq!(MediaKind::from_mime("audio/wav"), Some(MediaKind::Audio));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Video,
}

impl MediaKind {
    /// MIME type used when an asset does not declare one of this kind's family.
    pub fn default_mime(&self) -> &'static str {
        match self {
            MediaKind::Image => "image/png",
            MediaKind::Audio => "audio/mp3",
            MediaKind::Video => "video/mp4",
        }
    }

    /// Top-level MIME family, e.g. `image`.
    pub fn family(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }

    /// Picks the MIME type to put on the wire for an asset of this kind.
    pub fn resolve_mime(&self, declared: &str) -> String {
        match declared.split_once('/') {
            Some((family, subtype)) if family == self.family() && !subtype.is_empty() => {
                declared.to_string()
            }
            _ => self.default_mime().to_string(),
        }
    }

    /// Classifies a MIME type; `None` for non-media types such as documents.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.split_once('/').map(|(family, _)| family) {
            Some("image") => Some(MediaKind::Image),
            Some("audio") => Some(MediaKind::Audio),
            Some("video") => Some(MediaKind::Video),
            _ => None,
        }
    }
}
