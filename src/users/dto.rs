use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{User, UserSort};
use crate::{
    error::{ApiResult, ValidationErrors},
    pagination::{Page, SortDir},
    validation::{check_email, check_new_password, normalize_email},
};

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            roles: u.roles,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub email: String,
}

impl ProfileRequest {
    pub fn normalized(mut self) -> ApiResult<Self> {
        self.email = normalize_email(&self.email);
        let mut errors = ValidationErrors::new();
        check_email(&mut errors, "email", &self.email);
        errors.into_result()?;
        Ok(self)
    }
}

/// Self-service password change; the current password is required.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = ValidationErrors::new();
        if self.current_password.is_empty() {
            errors.add("current_password", "Current password is required.");
        }
        check_new_password(
            &mut errors,
            "new_password",
            &self.new_password,
            &self.confirm_password,
        );
        errors.into_result()
    }
}

/// Password reset performed by an administrator.
#[derive(Debug, Deserialize)]
pub struct AdminPasswordRequest {
    pub new_password: String,
    pub confirm_password: String,
}

impl AdminPasswordRequest {
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = ValidationErrors::new();
        check_new_password(
            &mut errors,
            "new_password",
            &self.new_password,
            &self.confirm_password,
        );
        errors.into_result()
    }
}

#[derive(Debug, Deserialize)]
pub struct AdminUserRequest {
    pub email: String,
    #[serde(default)]
    pub admin: bool,
}

impl AdminUserRequest {
    pub fn normalized(mut self) -> ApiResult<Self> {
        self.email = normalize_email(&self.email);
        let mut errors = ValidationErrors::new();
        check_email(&mut errors, "email", &self.email);
        errors.into_result()?;
        Ok(self)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    #[serde(flatten)]
    pub page: Page<PublicUser>,
    pub sort: UserSort,
    pub dir: SortDir,
}
