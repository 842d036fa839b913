use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiResult, ValidationErrors},
    users::dto::PublicUser,
    validation::{check_email, check_new_password, normalize_email},
};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl RegisterRequest {
    /// Lowercases the email and checks every field.
    pub fn normalized(mut self) -> ApiResult<Self> {
        self.email = normalize_email(&self.email);
        let mut errors = ValidationErrors::new();
        check_email(&mut errors, "email", &self.email);
        check_new_password(&mut errors, "password", &self.password, &self.password_confirm);
        errors.into_result()?;
        Ok(self)
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response returned after login or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: PublicUser,
}
