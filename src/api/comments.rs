//! Comment API endpoints.
//!
//! These routes address the comment sequence nested under a destination;
//! all state mutation goes through [`crate::comments::CommentManager`].

use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiResult;
use crate::auth::{AdminUser, AuthenticatedUser};
use crate::models::{Comment, CreateCommentRequest, Destination, UpdateCommentRequest};
use crate::AppState;

/// GET /destinations/{id}/comments - List a destination's comments, authors resolved.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Comment>> {
    let comments = state.comments.get_all(&id).await?;
    Ok(Json(comments))
}

/// POST /destinations/{id}/comments - Append a comment as the caller.
///
/// Any authenticated user may comment. The response is the whole updated
/// destination.
pub async fn create_comment(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<CreateCommentRequest>,
) -> ApiResult<Destination> {
    let destination = state.comments.append(&id, &user, &request).await?;
    Ok(Json(destination))
}

/// DELETE /destinations/{id}/comments - Remove every comment. Admin only.
pub async fn delete_comments(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Destination> {
    let destination = state.comments.delete_all(&id).await?;
    Ok(Json(destination))
}

/// GET /destinations/{id}/comments/{comment_id} - Get one comment, author resolved.
pub async fn get_comment(
    State(state): State<AppState>,
    Path((id, comment_id)): Path<(String, String)>,
) -> ApiResult<Comment> {
    let comment = state.comments.get_one(&id, &comment_id).await?;
    Ok(Json(comment))
}

/// PUT /destinations/{id}/comments/{comment_id} - Update a comment. Author only.
pub async fn update_comment(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((id, comment_id)): Path<(String, String)>,
    Json(request): Json<UpdateCommentRequest>,
) -> ApiResult<Destination> {
    let destination = state
        .comments
        .update(&id, &comment_id, &user, &request)
        .await?;
    Ok(Json(destination))
}

/// DELETE /destinations/{id}/comments/{comment_id} - Remove a comment. Author only.
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((id, comment_id)): Path<(String, String)>,
) -> ApiResult<Destination> {
    let destination = state.comments.delete_one(&id, &comment_id, &user).await?;
    Ok(Json(destination))
}
