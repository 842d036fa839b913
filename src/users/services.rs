use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{AdminUserRequest, PublicUser, UserListQuery, UserListResponse},
    repo_types::{normalize_roles, User, UserSort, ROLE_ADMIN, ROLE_USER},
};
use crate::{
    auth::password::{hash_password, verify_password},
    config::AdminBootstrap,
    error::{ApiError, ApiResult},
    pagination::{Page, PageRequest, SortDir, DEFAULT_PER_PAGE},
};

pub async fn get(db: &PgPool, id: Uuid) -> ApiResult<User> {
    User::find_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))
}

/// Creates a regular account. `email` must already be normalized.
pub async fn register(db: &PgPool, email: &str, password: &str) -> ApiResult<User> {
    if User::find_by_email(db, email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::field("email", "Email already registered."));
    }

    let hash = hash_password(password)?;
    let user = User::create(db, email, &hash, &normalize_roles([ROLE_USER])).await?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Returns the user when the credentials match, `None` otherwise.
pub async fn authenticate(db: &PgPool, email: &str, password: &str) -> ApiResult<Option<User>> {
    let Some(user) = User::find_by_email(db, email).await? else {
        warn!(email = %email, "login unknown email");
        return Ok(None);
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Ok(None);
    }
    Ok(Some(user))
}

pub async fn update_profile(db: &PgPool, id: Uuid, email: &str) -> ApiResult<User> {
    let user = get(db, id).await?;
    let updated = User::update_account(db, id, email, &normalize_roles(user.roles)).await?;
    info!(user_id = %id, "profile updated");
    Ok(updated)
}

pub async fn change_own_password(
    db: &PgPool,
    id: Uuid,
    current: &str,
    new_password: &str,
) -> ApiResult<()> {
    let user = get(db, id).await?;
    if !verify_password(current, &user.password_hash)? {
        warn!(user_id = %id, "password change with wrong current password");
        return Err(ApiError::field(
            "current_password",
            "Current password is incorrect.",
        ));
    }
    set_password(db, id, new_password).await
}

pub async fn set_password(db: &PgPool, id: Uuid, new_password: &str) -> ApiResult<()> {
    let hash = hash_password(new_password)?;
    User::update_password(db, id, &hash).await?;
    info!(user_id = %id, "password changed");
    Ok(())
}

/// Admin edit: email plus the admin flag; other roles are kept.
pub async fn admin_update(db: &PgPool, id: Uuid, req: &AdminUserRequest) -> ApiResult<User> {
    let user = get(db, id).await?;
    let mut roles: Vec<String> = user.roles.into_iter().filter(|r| r != ROLE_ADMIN).collect();
    if req.admin {
        roles.push(ROLE_ADMIN.to_string());
    }
    let updated = User::update_account(db, id, &req.email, &normalize_roles(roles)).await?;
    info!(user_id = %id, admin = req.admin, "user updated by admin");
    Ok(updated)
}

pub async fn delete(db: &PgPool, id: Uuid) -> ApiResult<()> {
    if !User::delete(db, id).await? {
        return Err(ApiError::not_found("User"));
    }
    info!(user_id = %id, "user deleted");
    Ok(())
}

pub async fn list(db: &PgPool, q: UserListQuery) -> ApiResult<UserListResponse> {
    let sort = UserSort::parse(q.sort.as_deref());
    let dir = SortDir::parse(q.dir.as_deref());
    let req = PageRequest::new(q.page.unwrap_or(1), q.per_page.unwrap_or(DEFAULT_PER_PAGE));

    let (rows, total) = User::list_page(db, sort, dir, req).await?;
    Ok(UserListResponse {
        page: Page::new(rows, req, total).map(PublicUser::from),
        sort,
        dir,
    })
}

/// Makes sure the configured administrator exists and holds `ROLE_ADMIN`.
pub async fn ensure_admin(db: &PgPool, admin: &AdminBootstrap) -> anyhow::Result<()> {
    match User::find_by_email(db, &admin.email).await? {
        Some(user) if user.is_admin() => {}
        Some(user) => {
            let roles = normalize_roles(user.roles.into_iter().chain([ROLE_ADMIN.to_string()]));
            User::update_account(db, user.id, &user.email, &roles).await?;
            info!(email = %admin.email, "granted admin role");
        }
        None => {
            let hash = hash_password(&admin.password)?;
            User::create(db, &admin.email, &hash, &normalize_roles([ROLE_ADMIN])).await?;
            info!(email = %admin.email, "admin account created");
        }
    }
    Ok(())
}
