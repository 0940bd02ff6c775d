use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;

/// User record in the database.
///
/// Deliberately not `Serialize`: anything leaving the service goes through
/// [`crate::auth::dto::PublicUser`], which has no hash field.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i32,                      // server-generated, immutable
    pub email: String,                // unique
    pub hash: String,                 // Argon2 PHC string
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Partial profile update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key")]
    DuplicateKey,
    #[error("record not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateKey,
            _ => StoreError::Database(e),
        }
    }
}
