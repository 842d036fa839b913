use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::error;

pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 4096;

/// Why a new password is refused. Lengths are counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("Password must be at least {} characters long.", PASSWORD_MIN)]
    TooShort,
    #[error("Password is too long.")]
    TooLong,
}

pub fn check_policy(plain: &str) -> Result<(), PolicyViolation> {
    let len = plain.chars().count();
    if len < PASSWORD_MIN {
        Err(PolicyViolation::TooShort)
    } else if len > PASSWORD_MAX {
        Err(PolicyViolation::TooLong)
    } else {
        Ok(())
    }
}

/// Hashes a new password. Stored hashes are only ever produced for
/// passwords that satisfy [`check_policy`].
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    check_policy(plain)?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
