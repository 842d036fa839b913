use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{
        AdminPasswordRequest, AdminUserRequest, ChangePasswordRequest, ProfileRequest,
        PublicUser, UserListQuery, UserListResponse,
    },
    services,
};
use crate::{
    auth::extractors::{AdminUser, AuthUser},
    error::ApiResult,
    extract::{JsonBody, PathParam, QueryParams},
    state::AppState,
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/account/profile", get(get_profile).put(update_profile))
        .route("/account/password", put(change_password))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/profile",
            get(admin_get_profile).put(admin_update_profile),
        )
        .route("/admin/password", put(admin_change_password))
        .route("/admin/users", get(list_users))
        .route(
            "/admin/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/admin/users/:id/password", put(set_user_password))
}

// --- own account ---

async fn profile_of(state: &AppState, user_id: Uuid) -> ApiResult<Json<PublicUser>> {
    let user = services::get(&state.db, user_id).await?;
    Ok(Json(user.into()))
}

async fn save_profile(
    state: &AppState,
    user_id: Uuid,
    payload: ProfileRequest,
) -> ApiResult<Json<PublicUser>> {
    let payload = payload.normalized()?;
    let user = services::update_profile(&state.db, user_id, &payload.email).await?;
    Ok(Json(user.into()))
}

async fn save_password(
    state: &AppState,
    user_id: Uuid,
    payload: ChangePasswordRequest,
) -> ApiResult<StatusCode> {
    payload.validate()?;
    services::change_own_password(
        &state.db,
        user_id,
        &payload.current_password,
        &payload.new_password,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<PublicUser>> {
    profile_of(&state, user.id).await
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<ProfileRequest>,
) -> ApiResult<Json<PublicUser>> {
    save_profile(&state, user.id, payload).await
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    save_password(&state, user.id, payload).await
}

#[instrument(skip(state))]
pub async fn admin_get_profile(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> ApiResult<Json<PublicUser>> {
    profile_of(&state, admin.id).await
}

#[instrument(skip(state, payload))]
pub async fn admin_update_profile(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonBody(payload): JsonBody<ProfileRequest>,
) -> ApiResult<Json<PublicUser>> {
    save_profile(&state, admin.id, payload).await
}

#[instrument(skip(state, payload))]
pub async fn admin_change_password(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonBody(payload): JsonBody<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    save_password(&state, admin.id, payload).await
}

// --- user management ---

#[instrument(skip(state, _admin))]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(q): QueryParams<UserListQuery>,
) -> ApiResult<Json<UserListResponse>> {
    Ok(Json(services::list(&state.db, q).await?))
}

#[instrument(skip(state, _admin))]
pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<Json<PublicUser>> {
    let user = services::get(&state.db, id).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, _admin, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathParam(id): PathParam<Uuid>,
    JsonBody(payload): JsonBody<AdminUserRequest>,
) -> ApiResult<Json<PublicUser>> {
    let payload = payload.normalized()?;
    let user = services::admin_update(&state.db, id, &payload).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, _admin, payload))]
pub async fn set_user_password(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathParam(id): PathParam<Uuid>,
    JsonBody(payload): JsonBody<AdminPasswordRequest>,
) -> ApiResult<StatusCode> {
    payload.validate()?;
    services::get(&state.db, id).await?;
    services::set_password(&state.db, id, &payload.new_password).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, _admin))]
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathParam(id): PathParam<Uuid>,
) -> ApiResult<StatusCode> {
    services::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
