//! Product management handlers.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use dala_core::{ApiResponse, Page, Product, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::supabase::storage::UploadFile;
use crate::validate::{
    ProductCreateDraft, ProductUpdatePayload, validate_product_create, validate_product_update,
};

/// Product listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Product listing for the admin panel.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<ApiResponse<Page<Product>>>> {
    let page = state
        .client()
        .list_products(
            query.q.as_deref(),
            query.page.unwrap_or(1),
            query.limit.unwrap_or(20),
        )
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// Create a product from a multipart form: text fields plus `images` files,
/// which are uploaded to Storage before the row is inserted.
#[instrument(skip(state, multipart))]
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Product>>> {
    let mut draft = ProductCreateDraft::default();
    let mut images: Vec<UploadFile> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match name.as_str() {
            "name" => draft.name = field.text().await?,
            "price" => draft.price = field.text().await?,
            "stock" => draft.stock = field.text().await?,
            "category" => draft.category = Some(field.text().await?),
            "description" => draft.description = Some(field.text().await?),
            "sizes" => draft.sizes.push(field.text().await?),
            "images" => {
                let file_name = field.file_name().unwrap_or("image").to_owned();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                images.push(UploadFile {
                    name: file_name,
                    content_type,
                    bytes: field.bytes().await?.to_vec(),
                });
            }
            _ => {}
        }
    }

    let mut write = validate_product_create(&draft).map_err(AppError::Validation)?;

    // Upload images first; a failed image aborts the create so no product
    // row ends up pointing at missing files.
    let bucket = state.config().supabase.storage_bucket.clone();
    let mut image_urls = Vec::with_capacity(images.len());
    for image in &images {
        let uploaded = state
            .storage()
            .upload_file(&bucket, None, image)
            .await
            .map_err(|e| AppError::Internal(format!("Image upload failed: {e}")))?;
        image_urls.push(uploaded.url);
    }
    write.images = Some(image_urls);

    let product = state.client().create_product(&write).await?;
    Ok(Json(ApiResponse::ok(product)))
}

/// One entry of a bulk stock update.
#[derive(Debug, Deserialize)]
pub struct StockUpdate {
    pub id: ProductId,
    pub stock: i64,
}

/// Update stock counts for several products at once.
#[instrument(skip(state, payload), fields(count = payload.len()))]
pub async fn update_stock(
    State(state): State<AppState>,
    Json(payload): Json<Vec<StockUpdate>>,
) -> Result<Json<ApiResponse<()>>> {
    let items: Vec<(ProductId, i64)> = payload.into_iter().map(|u| (u.id, u.stock)).collect();
    state.client().bulk_update_stock(&items).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// Partial update of a product.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<ProductUpdatePayload>,
) -> Result<Json<ApiResponse<Product>>> {
    let write = validate_product_update(&payload).map_err(AppError::Validation)?;
    let product = state.client().update_product(&id, &write).await?;
    Ok(Json(ApiResponse::ok(product)))
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ApiResponse<()>>> {
    state.client().delete_product(&id).await?;
    Ok(Json(ApiResponse::ok(())))
}
