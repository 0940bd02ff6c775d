use thiserror::Error;

use crate::auth::repo_types::StoreError;

/// Failures of the authentication service.
///
/// Unknown email and wrong password both surface as `InvalidCredentials`;
/// callers must not be able to tell them apart.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Credentials taken")]
    DuplicateCredentials,
    #[error("Credentials incorrect")]
    InvalidCredentials,
    #[error(transparent)]
    Store(StoreError),
    #[error("password hashing failed: {0}")]
    Hashing(anyhow::Error),
    #[error("token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}
