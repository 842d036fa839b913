use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{
    categories::{self, repo_types::Category},
    error::ApiResult,
    recipes::{self, dto::RecipeSummary},
    state::AppState,
};

/// Number of recipes featured on the home page.
pub const HOME_LATEST: i64 = 3;

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub categories: Vec<Category>,
    pub latest_recipes: Vec<RecipeSummary>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/home", get(home))
}

#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> ApiResult<Json<HomePage>> {
    let categories = categories::services::all(&state.db).await?;
    let latest_recipes = recipes::services::latest(&state.db, HOME_LATEST).await?;
    Ok(Json(HomePage {
        categories,
        latest_recipes,
    }))
}
