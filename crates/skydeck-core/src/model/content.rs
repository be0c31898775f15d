// ── Content domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::locale::LocalizedText;

/// The kind of a managed asset. Fixed at creation -- the admin form cannot
/// change an item's kind after the fact.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContentKind {
    #[default]
    Photo,
    Video,
    Specification,
}

impl ContentKind {
    pub const ALL: [Self; 3] = [Self::Photo, Self::Video, Self::Specification];

    /// Pluralized segment used in blob storage paths.
    pub fn plural(self) -> &'static str {
        match self {
            Self::Photo => "photos",
            Self::Video => "videos",
            Self::Specification => "specifications",
        }
    }

    /// Advisory upload filter. Never enforced server-side.
    pub fn accepted_extensions(self) -> &'static [&'static str] {
        match self {
            Self::Photo => &["jpg", "jpeg", "png", "gif", "webp"],
            Self::Video => &["mp4", "mov", "webm", "mkv"],
            Self::Specification => &["pdf", "doc", "docx"],
        }
    }
}

/// A single managed asset belonging to a drone model.
///
/// Within a `(drone_id, kind)` partition, `order` defines the display
/// sequence; ties are broken by fetch order and are stable across repeated
/// fetches of unchanged data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Store-assigned identifier, immutable.
    pub id: String,
    /// Owning drone model; never changed after creation.
    pub drone_id: String,
    pub kind: ContentKind,
    pub title: LocalizedText,
    pub description: Option<LocalizedText>,
    /// Retrieval URL for the uploaded asset. Empty only transiently,
    /// before the first upload completes.
    pub file_url: String,
    /// Poster frame, used for videos only.
    pub thumbnail_url: Option<String>,
    pub order: i64,
    /// Server-assigned creation timestamp, immutable.
    pub created_at: DateTime<Utc>,
}

/// A content item about to be created: everything but the store-assigned
/// `id` and `created_at`. The caller supplies `order` (partition max + 1).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewContentItem {
    pub drone_id: String,
    pub kind: ContentKind,
    pub title: LocalizedText,
    pub description: Option<LocalizedText>,
    pub file_url: String,
    pub thumbnail_url: Option<String>,
    pub order: i64,
}

/// A partial update: only `Some` fields are written, everything else
/// retains its prior value. `drone_id` and `kind` are intentionally
/// absent -- they are immutable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentPatch {
    pub title: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub file_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub order: Option<i64>,
}
