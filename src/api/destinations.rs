//! Destination API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiResult;
use crate::auth::AdminUser;
use crate::errors::AppError;
use crate::models::{
    CreateDestinationRequest, DeleteSummary, Destination, UpdateDestinationRequest,
};
use crate::AppState;

/// GET /destinations - List all destinations, comment authors resolved.
pub async fn list_destinations(State(state): State<AppState>) -> ApiResult<Vec<Destination>> {
    let mut destinations = state.store.list_destinations().await?;
    state.store.populate_destinations(&mut destinations).await?;
    Ok(Json(destinations))
}

/// GET /destinations/{id} - Get a single destination, comment authors resolved.
pub async fn get_destination(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Destination> {
    let mut destination = state
        .store
        .get_destination(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Destination {} not found", id)))?;
    state.store.populate_destination(&mut destination).await?;
    Ok(Json(destination))
}

/// POST /destinations - Create a new destination. Admin only.
pub async fn create_destination(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(request): Json<CreateDestinationRequest>,
) -> ApiResult<Destination> {
    // Validate required fields
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let destination = state.store.create_destination(&request).await?;
    Ok(Json(destination))
}

/// PUT /destinations/{id} - Update a destination's own fields. Admin only.
pub async fn update_destination(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateDestinationRequest>,
) -> ApiResult<Destination> {
    let destination = state.store.update_destination(&id, &request).await?;
    Ok(Json(destination))
}

/// DELETE /destinations/{id} - Delete a destination and its comments. Admin only.
pub async fn delete_destination(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<DeleteSummary> {
    state.store.delete_destination(&id).await?;
    Ok(Json(DeleteSummary { deleted_count: 1 }))
}

/// DELETE /destinations - Delete every destination. Admin only.
pub async fn delete_all_destinations(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<DeleteSummary> {
    let deleted_count = state.store.delete_all_destinations().await?;
    Ok(Json(DeleteSummary { deleted_count }))
}
