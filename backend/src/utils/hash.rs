// src/utils/hash.rs

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::{error::AppError, models::user::AdminAccount};

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Builds the admin account from configured credentials.
/// The plain password is hashed so it is never kept in application state.
pub fn admin_account(
    username: Option<&str>,
    password: Option<&str>,
) -> Result<Option<AdminAccount>, AppError> {
    match (username, password) {
        (Some(username), Some(password)) => Ok(Some(AdminAccount {
            username: username.to_string(),
            password_hash: hash_password(password)?,
        })),
        _ => Ok(None),
    }
}
