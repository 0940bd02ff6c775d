use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, patch},
    Json, Router,
};
use tracing::{error, info, instrument};

use crate::{
    auth::{dto::PublicUser, jwt::AuthUser, repo_types::StoreError},
    error::ApiError,
    state::AppState,
    users::dto::EditUserDto,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(get_me))
        .route("/users", patch(edit_user))
}

#[instrument(skip_all, fields(user_id = claims.sub))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state
        .users
        .find_user_by_id(claims.sub)
        .await
        .map_err(subject_error)?;
    Ok(Json(user.into()))
}

#[instrument(skip_all, fields(user_id = claims.sub))]
pub async fn edit_user(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    payload: Result<Json<EditUserDto>, JsonRejection>,
) -> Result<Json<PublicUser>, ApiError> {
    let Json(dto) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    dto.validate().map_err(ApiError::BadRequest)?;

    let user = state
        .users
        .update_user(claims.sub, &dto.into())
        .await
        .map_err(subject_error)?;
    info!("user profile updated");
    Ok(Json(user.into()))
}

/// A valid token whose user is gone is an authentication failure, not a 404.
fn subject_error(e: StoreError) -> ApiError {
    match e {
        StoreError::NotFound => {
            error!("token subject no longer exists");
            ApiError::Unauthorized("User not found".into())
        }
        other => other.into(),
    }
}
