//! Password hashing for users and mentors.

use crate::error::ApiError;
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

/// Hash a password with Argon2id into a PHC string.
///
/// Hashing is deliberately slow, so it runs on the blocking thread pool.
pub(crate) async fn hash_password(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await
    .map_err(ApiError::storage)?
    .map_err(|err| ApiError::storage(PasswordError(err)))
}

// `password_hash::Error` only implements `std::error::Error` with the `std`
// feature, so it is wrapped for logging.
#[derive(Debug, thiserror::Error)]
#[error("failed to hash password: {0}")]
struct PasswordError(argon2::password_hash::Error);
