use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;

use super::repository::{self, Session};
use crate::types::Context;

pub enum Error {
    InvalidSession,
    UnexpectedError,
}

pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            tracing::error!("Error occurred while trying to hash a password: {}", err);
            Error::UnexpectedError
        })
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(err) => {
            tracing::error!("Stored password hash failed to parse: {}", err);
            false
        }
    }
}

pub async fn verify_access_token(ctx: Arc<Context>, token: String) -> Result<Session, Error> {
    repository::find_valid_by_id(&ctx.db_conn.pool, token)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::InvalidSession)
}
