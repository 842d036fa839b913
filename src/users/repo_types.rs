use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub roles: Vec<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ROLE_ADMIN)
    }

    /// Display name used for comments: the local part of the email.
    pub fn nickname(&self) -> &str {
        nickname_of(&self.email)
    }
}

/// Longest nickname that fits `comments.author_name`.
pub const NICKNAME_MAX: usize = 100;

pub fn nickname_of(email: &str) -> &str {
    let name = match email.split_once('@') {
        Some((local, _)) if !local.is_empty() => local,
        _ => email,
    };
    match name.char_indices().nth(NICKNAME_MAX) {
        Some((cut, _)) => &name[..cut],
        None => name,
    }
}

/// Every user holds `ROLE_USER`; duplicates are dropped, first occurrence wins.
pub fn normalize_roles<I, S>(roles: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for role in roles
        .into_iter()
        .map(Into::into)
        .chain(std::iter::once(ROLE_USER.to_string()))
    {
        if !out.contains(&role) {
            out.push(role);
        }
    }
    out
}

/// Whitelisted sort columns for the admin user listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserSort {
    Id,
    Email,
}

impl UserSort {
    /// Unknown columns fall back to `email`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("id") => UserSort::Id,
            _ => UserSort::Email,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            UserSort::Id => "id",
            UserSort::Email => "email",
        }
    }
}
