use std::sync::Arc;

use axum::extract::FromRef;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthDto, PublicUser},
        error::AuthError,
        jwt::{AccessToken, JwtKeys},
        password::{hash_password_blocking, verify_dummy_blocking, verify_password_blocking},
        repo::UserStore,
        repo_types::StoreError,
    },
    state::AppState,
};

/// Signup, signin and token minting over an injected user store.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    keys: JwtKeys,
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.users.clone(), state.keys.clone())
    }
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, keys: JwtKeys) -> Self {
        Self { users, keys }
    }

    /// Hashes the password and inserts the user. Email uniqueness is left to
    /// the store's atomic insert.
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn signup(&self, dto: &AuthDto) -> Result<PublicUser, AuthError> {
        let hash = hash_password_blocking(dto.password.clone())
            .await
            .map_err(AuthError::Hashing)?;

        let user = match self.users.create_user(&dto.email, &hash).await {
            Ok(u) => u,
            Err(StoreError::DuplicateKey) => {
                warn!("signup with taken credentials");
                return Err(AuthError::DuplicateCredentials);
            }
            Err(e) => return Err(AuthError::Store(e)),
        };

        info!(user_id = user.id, "user signed up");
        Ok(PublicUser::from(user))
    }

    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn signin(&self, dto: &AuthDto) -> Result<AccessToken, AuthError> {
        let user = match self.users.find_user_by_email(&dto.email).await {
            Ok(u) => u,
            Err(StoreError::NotFound) => {
                verify_dummy_blocking(dto.password.clone()).await;
                warn!("signin rejected");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(AuthError::Store(e)),
        };

        let matches = verify_password_blocking(dto.password.clone(), user.hash)
            .await
            .map_err(AuthError::Hashing)?;
        if !matches {
            warn!("signin rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.sign_token(user.id, &user.email)?;
        info!(user_id = user.id, "user signed in");
        Ok(token)
    }

    pub fn sign_token(&self, user_id: i32, email: &str) -> Result<AccessToken, AuthError> {
        Ok(self.keys.sign(user_id, email)?)
    }
}
