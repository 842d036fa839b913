use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{dto::CommentRequest, repo_types::Comment, services};
use crate::{
    auth::extractors::{AdminUser, AuthUser},
    error::ApiResult,
    extract::{JsonBody, PathParam},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/:id/comments", post(add_comment))
        .route("/admin/comments/:id", delete(delete_comment))
}

#[instrument(skip(state, payload))]
pub async fn add_comment(
    State(state): State<AppState>,
    user: AuthUser,
    PathParam(recipe_id): PathParam<Uuid>,
    JsonBody(payload): JsonBody<CommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let comment = services::add(&state.db, recipe_id, user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[instrument(skip(state, _admin))]
pub async fn delete_comment(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<StatusCode> {
    services::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
