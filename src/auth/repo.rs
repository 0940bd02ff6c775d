use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::{StoreError, UserPatch, UserRecord};

/// Persistence seam for user records.
///
/// Uniqueness of `email` is the store's job: `create_user` must be a single
/// atomic insert that reports a collision as [`StoreError::DuplicateKey`].
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, email: &str, hash: &str) -> Result<UserRecord, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<UserRecord, StoreError>;
    async fn find_user_by_id(&self, id: i32) -> Result<UserRecord, StoreError>;
    async fn update_user(&self, id: i32, patch: &UserPatch) -> Result<UserRecord, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    /// Create a new user with hashed password.
    async fn create_user(&self, email: &str, hash: &str) -> Result<UserRecord, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (email, hash)
            VALUES ($1, $2)
            RETURNING id, email, hash, first_name, last_name, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(hash)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    /// Find a user by email.
    async fn find_user_by_email(&self, email: &str) -> Result<UserRecord, StoreError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, hash, first_name, last_name, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn find_user_by_id(&self, id: i32) -> Result<UserRecord, StoreError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, hash, first_name, last_name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn update_user(&self, id: i32, patch: &UserPatch) -> Result<UserRecord, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
               SET email      = COALESCE($2, email),
                   first_name = COALESCE($3, first_name),
                   last_name  = COALESCE($4, last_name),
                   updated_at = now()
             WHERE id = $1
            RETURNING id, email, hash, first_name, last_name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.email.as_deref())
        .bind(patch.first_name.as_deref())
        .bind(patch.last_name.as_deref())
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }
}
