//! HTTP handlers for the asset collection.
//! Each handler extracts the id/body and delegates to `AssetService`; status
//! codes and error bodies come from the `AppError` conversion.

use crate::{
    errors::AppError,
    models::asset::{Asset, AssetPatch, NewAsset},
    services::asset_service::AssetService,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

/// `GET /api/assets`
pub async fn list_assets(
    State(service): State<AssetService>,
) -> Result<Json<Vec<Asset>>, AppError> {
    Ok(Json(service.list().await?))
}

/// `GET /api/assets/{id}`
pub async fn get_asset(
    State(service): State<AssetService>,
    Path(id): Path<u64>,
) -> Result<Json<Asset>, AppError> {
    Ok(Json(service.get(id).await?))
}

/// `POST /api/assets`: 201 with the stored asset.
pub async fn create_asset(
    State(service): State<AssetService>,
    payload: Result<Json<NewAsset>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let asset = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// `PUT /api/assets/{id}`: partial update, absent fields untouched.
///
/// An unknown id is reported as 404 even when the body is unusable.
pub async fn update_asset(
    State(service): State<AssetService>,
    Path(id): Path<u64>,
    payload: Result<Json<AssetPatch>, JsonRejection>,
) -> Result<Json<Asset>, AppError> {
    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            service.get(id).await?;
            return Err(rejection.into());
        }
    };
    Ok(Json(service.update(id, patch).await?))
}

/// `DELETE /api/assets/{id}`: echoes the removed asset.
pub async fn delete_asset(
    State(service): State<AssetService>,
    Path(id): Path<u64>,
) -> Result<Json<Asset>, AppError> {
    Ok(Json(service.delete(id).await?))
}
