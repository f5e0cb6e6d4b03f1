use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::{
    error::AppError,
    users::{dto::UserPayload, repo_types::NewUser},
};

/// Column width of `name`, `email` and the accepted plain password.
pub const MAX_FIELD_CHARS: usize = 80;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
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

fn check_field(field: &str, value: &str) -> Result<(), AppError> {
    // text columns cannot hold NUL
    if value.contains('\0') {
        return Err(AppError::Validation(format!(
            "{} must not contain NUL characters",
            field
        )));
    }
    if value.chars().count() > MAX_FIELD_CHARS {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_FIELD_CHARS
        )));
    }
    Ok(())
}

/// Validate a create/update body and turn it into storable columns.
pub fn prepare_user(payload: UserPayload) -> Result<NewUser, AppError> {
    check_field("name", &payload.name)?;
    check_field("email", &payload.email)?;
    check_field("password", &payload.password)?;

    let password_hash = hash_password(&payload.password)?;
    Ok(NewUser {
        name: payload.name,
        email: payload.email,
        password_hash,
    })
}
