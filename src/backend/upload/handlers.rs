//! Upload HTTP Handler

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::BlobStore;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::social::{upload_key, MediaKind, UploadResponse, MAX_UPLOAD_BYTES};

/// Store the multipart field `file` and return its URL
pub async fn upload(
    State(blobs): State<Arc<dyn BlobStore>>,
    AuthUser(user): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, BackendError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await?;

        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(BackendError::handler(
                StatusCode::PAYLOAD_TOO_LARGE,
                "File exceeds 10 MiB",
            ));
        }

        let size = bytes.len();
        let key = upload_key(Utc::now(), &filename);
        let url = blobs.put(&key, &content_type, bytes).await?;

        tracing::info!("User {} uploaded {} ({} bytes)", user.username, key, size);

        return Ok(Json(UploadResponse {
            media_type: MediaKind::from_content_type(&content_type),
            url,
            size,
        }));
    }

    Err(BackendError::bad_request("Missing multipart field 'file'"))
}
