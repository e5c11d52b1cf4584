//! Argon2id password hashing. Hashing runs on the blocking pool.

use crate::error::AppError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};

/// Hash a password with default Argon2id parameters. Returns a PHC-format string.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
    })
    .await
    .map_err(|e| AppError::Internal(format!("password hashing task: {}", e)))?
}
