//! Upload classification and object keys

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest accepted upload
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
    File,
}

impl MediaKind {
    pub fn from_content_type(content_type: &str) -> Self {
        let lower = content_type.to_ascii_lowercase();
        if lower.starts_with("image/") {
            Self::Photo
        } else if lower.starts_with("video/") {
            Self::Video
        } else {
            Self::File
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(rename = "type")]
    pub media_type: MediaKind,
    pub url: String,
    pub size: usize,
}

/// Strip directory components and anything outside `[A-Za-z0-9._-]`
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Object key of an upload: `uploads/<yyyymmddHHMMSS>-<filename>`
///
/// The key has one-second resolution. Two uploads of the same sanitized
/// filename within the same second share a key, and the later write replaces
/// the earlier object in either blob store.
pub fn upload_key(now: DateTime<Utc>, filename: &str) -> String {
    format!("uploads/{}-{}", now.format("%Y%m%d%H%M%S"), sanitize_filename(filename))
}
