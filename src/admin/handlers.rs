use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::repo::DashboardCounts;
use crate::{auth::extractors::AdminUser, error::ApiResult, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/admin", get(dashboard))
}

#[instrument(skip(state, _admin))]
pub async fn dashboard(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<DashboardCounts>> {
    Ok(Json(DashboardCounts::load(&state.db).await?))
}
