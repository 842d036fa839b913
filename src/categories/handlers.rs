use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{CategoryRequest, CategoryShow},
    repo_types::Category,
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
        .route("/categories", get(list_categories))
        .route("/categories/:slug", get(show_category))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/categories", post(create_category))
        .route(
            "/admin/categories/:id",
            put(update_category).delete(delete_category),
        )
}

#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(services::all(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn show_category(
    State(state): State<AppState>,
    PathParam(slug): PathParam<String>,
    QueryParams(p): QueryParams<PageQuery>,
) -> ApiResult<Json<CategoryShow>> {
    Ok(Json(services::show(&state.db, &slug, p.into()).await?))
}

#[instrument(skip(state, _admin, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    JsonBody(payload): JsonBody<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = services::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[instrument(skip(state, _admin, payload))]
pub async fn update_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathParam(id): PathParam<Uuid>,
    JsonBody(payload): JsonBody<CategoryRequest>,
) -> ApiResult<Json<Category>> {
    Ok(Json(services::update(&state.db, id, payload).await?))
}

#[instrument(skip(state, _admin))]
pub async fn delete_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<StatusCode> {
    services::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
