/**
 * Blob Store Collaborator
 *
 * Uploaded bytes are handed to a [`BlobStore`], which returns the public URL
 * of the stored object. Two implementations exist:
 *
 * - [`HttpBlobStore`] PUTs objects to an S3-compatible endpoint at
 *   `<endpoint>/<bucket>/<key>`
 * - [`LocalBlobStore`] writes objects under a directory served by the
 *   router at `/uploads`
 */

use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use futures_util::future::BoxFuture;
use thiserror::Error;

/// Upload failures
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("object store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("object store rejected upload with status {0}")]
    Rejected(reqwest::StatusCode),
    #[error("failed to write object: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid object key: {0}")]
    InvalidKey(String),
}

/// Destination for uploaded files
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key` and return the object's public URL
    fn put<'a>(
        &'a self,
        key: &'a str,
        content_type: &'a str,
        bytes: Bytes,
    ) -> BoxFuture<'a, Result<String, BlobError>>;
}

/// S3-compatible object store reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBlobStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
    public_base: String,
}

impl HttpBlobStore {
    /// `public_base` defaults to `https://<bucket>.s3.amazonaws.com`
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>, public_base: Option<String>) -> Self {
        let bucket = bucket.into();
        let public_base = public_base
            .unwrap_or_else(|| format!("https://{}.s3.amazonaws.com", bucket));
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            bucket,
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }
}

impl BlobStore for HttpBlobStore {
    fn put<'a>(
        &'a self,
        key: &'a str,
        content_type: &'a str,
        bytes: Bytes,
    ) -> BoxFuture<'a, Result<String, BlobError>> {
        Box::pin(async move {
            let response = self
                .client
                .put(self.object_url(key))
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(bytes)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(BlobError::Rejected(response.status()));
            }

            tracing::debug!("Stored object {} in bucket {}", key, self.bucket);
            Ok(format!("{}/{}", self.public_base, key))
        })
    }
}

/// Objects written to a local directory
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, key: &str) -> Result<PathBuf, BlobError> {
        let relative = Path::new(key);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(BlobError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl BlobStore for LocalBlobStore {
    fn put<'a>(
        &'a self,
        key: &'a str,
        _content_type: &'a str,
        bytes: Bytes,
    ) -> BoxFuture<'a, Result<String, BlobError>> {
        Box::pin(async move {
            let path = self.object_path(key)?;
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, &bytes).await?;
            Ok(format!("/{}", key))
        })
    }
}
