//! Partner API endpoints.
//!
//! Partners are plain top-level records with no nested state, so these
//! handlers talk to the store directly.

use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiResult;
use crate::auth::AdminUser;
use crate::errors::AppError;
use crate::models::{CreatePartnerRequest, DeleteSummary, Partner, UpdatePartnerRequest};
use crate::AppState;

/// GET /partners - List all partners.
pub async fn list_partners(State(state): State<AppState>) -> ApiResult<Vec<Partner>> {
    let partners = state.store.list_partners().await?;
    Ok(Json(partners))
}

/// GET /partners/{id} - Get a single partner.
pub async fn get_partner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Partner> {
    let partner = state
        .store
        .get_partner(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Partner {} not found", id)))?;
    Ok(Json(partner))
}

/// POST /partners - Create a new partner. Admin only.
pub async fn create_partner(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(request): Json<CreatePartnerRequest>,
) -> ApiResult<Partner> {
    // Validate required fields
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let partner = state.store.create_partner(&request).await?;
    Ok(Json(partner))
}

/// PUT /partners/{id} - Update a partner. Admin only.
pub async fn update_partner(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<String>,
    Json(request): Json<UpdatePartnerRequest>,
) -> ApiResult<Partner> {
    let partner = state.store.update_partner(&id, &request).await?;
    Ok(Json(partner))
}

/// DELETE /partners/{id} - Delete a partner. Admin only.
pub async fn delete_partner(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<DeleteSummary> {
    state.store.delete_partner(&id).await?;
    Ok(Json(DeleteSummary { deleted_count: 1 }))
}

/// DELETE /partners - Delete every partner. Admin only.
pub async fn delete_all_partners(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<DeleteSummary> {
    let deleted_count = state.store.delete_all_partners().await?;
    Ok(Json(DeleteSummary { deleted_count }))
}
