//! File upload forwarding handler.

use axum::{
    Json,
    extract::{Multipart, State},
};
use tracing::instrument;

use dala_core::ApiResponse;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::supabase::storage::{UploadFile, UploadOutcome};

/// Forward uploaded files to Supabase Storage.
///
/// Multipart fields: `bucket` (required), `folder` (optional), `files`
/// (repeated). Per-file failures are reported in the outcome rather than
/// failing the whole request.
#[instrument(skip(state, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadOutcome>>> {
    let mut bucket: Option<String> = None;
    let mut folder: Option<String> = None;
    let mut files: Vec<UploadFile> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match name.as_str() {
            "bucket" => bucket = Some(field.text().await?),
            "folder" => folder = Some(field.text().await?),
            "files" => {
                let file_name = field.file_name().unwrap_or("file").to_owned();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                files.push(UploadFile {
                    name: file_name,
                    content_type,
                    bytes: field.bytes().await?.to_vec(),
                });
            }
            _ => {}
        }
    }

    let Some(bucket) = bucket.filter(|b| !b.is_empty()) else {
        return Err(AppError::BadRequest("Bucket is required".to_string()));
    };

    let outcome = state
        .storage()
        .upload_many(&bucket, folder.as_deref(), &files)
        .await;

    Ok(Json(ApiResponse::ok(outcome)))
}
