//! Supabase Storage client for product images and other uploads.
//!
//! Objects get collision-free names (millisecond timestamp + random suffix +
//! sanitized original name). Multi-file uploads collect per-file outcomes
//! instead of aborting on the first failure.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{error, instrument};

use crate::config::SupabaseConfig;

use super::SupabaseError;

/// A successfully stored object.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UploadResult {
    /// Path inside the bucket.
    pub path: String,
    /// Public URL.
    pub url: String,
    /// Object name inside the bucket.
    pub file_name: String,
}

/// A failed upload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UploadError {
    pub file_name: String,
    pub error: String,
}

/// Outcome of a multi-file upload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadOutcome {
    pub success: Vec<UploadResult>,
    pub failed: Vec<UploadError>,
}

/// An in-memory file to upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Client for the Supabase Storage API.
///
/// Cheaply cloneable; all state lives behind an `Arc`.
#[derive(Clone)]
pub struct StorageClient {
    inner: Arc<StorageClientInner>,
}

struct StorageClientInner {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl StorageClient {
    /// Create a new storage client from the Supabase configuration.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            inner: Arc::new(StorageClientInner {
                http: reqwest::Client::new(),
                base_url: config.url.clone(),
                api_key: config.service_role_key.expose_secret().to_string(),
            }),
        }
    }

    /// Public URL for an object in a public bucket.
    #[must_use]
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{bucket}/{path}",
            self.inner.base_url
        )
    }

    /// Upload a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage API rejects the object.
    #[instrument(skip(self, file), fields(file = %file.name, bucket = %bucket))]
    pub async fn upload_file(
        &self,
        bucket: &str,
        folder: Option<&str>,
        file: &UploadFile,
    ) -> Result<UploadResult, SupabaseError> {
        let file_name = unique_object_name(&file.name);
        let path = folder.map_or_else(
            || file_name.clone(),
            |folder| format!("{folder}/{file_name}"),
        );

        let response = self
            .inner
            .http
            .post(format!(
                "{}/storage/v1/object/{bucket}/{path}",
                self.inner.base_url
            ))
            .header("apikey", &self.inner.api_key)
            .header("Authorization", format!("Bearer {}", self.inner.api_key))
            .header("Content-Type", &file.content_type)
            .header("Cache-Control", "max-age=3600")
            .header("x-upsert", "false")
            .body(file.bytes.clone())
            .send()
            .await?;

        if !response.status().is_success() {
            let err = SupabaseError::from_response(response).await;
            return Err(SupabaseError::Upload {
                file: file.name.clone(),
                message: err.to_string(),
            });
        }

        Ok(UploadResult {
            url: self.public_url(bucket, &path),
            path,
            file_name,
        })
    }

    /// Upload several files, collecting per-file successes and failures.
    #[instrument(skip(self, files), fields(count = files.len(), bucket = %bucket))]
    pub async fn upload_many(
        &self,
        bucket: &str,
        folder: Option<&str>,
        files: &[UploadFile],
    ) -> UploadOutcome {
        let mut outcome = UploadOutcome::default();

        for file in files {
            match self.upload_file(bucket, folder, file).await {
                Ok(result) => outcome.success.push(result),
                Err(e) => {
                    error!("upload failed: {e}");
                    outcome.failed.push(UploadError {
                        file_name: file.name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        outcome
    }

    /// Delete a single object.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage API rejects the delete.
    #[instrument(skip(self), fields(bucket = %bucket, path = %path))]
    pub async fn delete_object(&self, bucket: &str, path: &str) -> Result<(), SupabaseError> {
        let response = self
            .inner
            .http
            .delete(format!(
                "{}/storage/v1/object/{bucket}/{path}",
                self.inner.base_url
            ))
            .header("apikey", &self.inner.api_key)
            .header("Authorization", format!("Bearer {}", self.inner.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::from_response(response).await);
        }
        Ok(())
    }
}

/// Generate a collision-free object name: millisecond timestamp, a random
/// six-character suffix, and the original name with whitespace collapsed to
/// underscores.
#[must_use]
pub fn unique_object_name(original: &str) -> String {
    let cleaned: String = original.split_whitespace().collect::<Vec<_>>().join("_");
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();
    format!("{}-{suffix}-{cleaned}", Utc::now().timestamp_millis())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_object_name_sanitizes_whitespace() {
        let name = unique_object_name("my   product photo.jpg");
        assert!(name.ends_with("my_product_photo.jpg"));
        assert!(!name.contains(' '));
    }

    #[test]
    fn test_unique_object_name_shape() {
        let name = unique_object_name("a.png");
        let parts: Vec<&str> = name.splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[0].parse::<i64>().is_ok()); // timestamp
        assert_eq!(parts[1].len(), 6); // random suffix
        assert_eq!(parts[2], "a.png");
    }

    #[test]
    fn test_unique_object_names_differ() {
        assert_ne!(unique_object_name("a.png"), unique_object_name("a.png"));
    }
}
