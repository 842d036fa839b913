use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{RecipeDetails, RecipeRequest, RecipeSummary, TopRecipe},
    services,
};
use crate::{
    auth::extractors::AdminUser,
    error::ApiResult,
    extract::{JsonBody, PathParam, QueryParams},
    pagination::{Page, PageQuery},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/top", get(top_recipes))
        .route("/recipes/:id", get(get_recipe))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/recipes", post(create_recipe))
        .route(
            "/admin/recipes/:id",
            put(update_recipe).delete(delete_recipe),
        )
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    QueryParams(p): QueryParams<PageQuery>,
) -> ApiResult<Json<Page<RecipeSummary>>> {
    Ok(Json(services::latest_page(&state.db, p.into()).await?))
}

#[instrument(skip(state))]
pub async fn top_recipes(State(state): State<AppState>) -> ApiResult<Json<Vec<TopRecipe>>> {
    Ok(Json(services::top_rated(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<Json<RecipeDetails>> {
    Ok(Json(services::details(&state.db, id).await?))
}

#[instrument(skip(state, _admin, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    _admin: AdminUser,
    JsonBody(payload): JsonBody<RecipeRequest>,
) -> ApiResult<(StatusCode, Json<RecipeDetails>)> {
    let recipe = services::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

#[instrument(skip(state, _admin, payload))]
pub async fn update_recipe(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathParam(id): PathParam<Uuid>,
    JsonBody(payload): JsonBody<RecipeRequest>,
) -> ApiResult<Json<RecipeDetails>> {
    Ok(Json(services::update(&state.db, id, payload).await?))
}

#[instrument(skip(state, _admin))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<StatusCode> {
    services::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
