use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{TagRequest, TagShow},
    repo_types::Tag,
    services,
};
use crate::{
    auth::extractors::AdminUser,
    error::ApiResult,
    extract::{JsonBody, PathParam, QueryParams},
    pagination::PageQuery,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(list_tags))
        .route("/tags/:slug", get(show_tag))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/tags", post(create_tag))
        .route("/admin/tags/:id", put(update_tag).delete(delete_tag))
}

#[instrument(skip(state))]
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<Vec<Tag>>> {
    Ok(Json(services::all(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn show_tag(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
    QueryParams(p): QueryParams<PageQuery>,
) -> ApiResult<Json<TagShow>> {
    Ok(Json(services::show(&state.db, &slug, p.into()).await?))
}

#[instrument(skip(state, _admin, payload))]
pub async fn create_tag(
    State(state): State<AppState>,
    _admin: AdminUser,
    JsonBody(payload): JsonBody<TagRequest>,
) -> ApiResult<(StatusCode, Json<Tag>)> {
    let tag = services::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

#[instrument(skip(state, _admin, payload))]
pub async fn update_tag(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathParam(id): PathParam<Uuid>,
    JsonBody(payload): JsonBody<TagRequest>,
) -> ApiResult<Json<Tag>> {
    Ok(Json(services::update(&state.db, id, payload).await?))
}

#[instrument(skip(state, _admin))]
pub async fn delete_tag(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<StatusCode> {
    services::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
