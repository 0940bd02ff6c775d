use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{AuthDto, PublicUser},
        jwt::AccessToken,
        services::AuthService,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
}

/// Unwraps the JSON body and runs field validation; every failure is a 400.
fn validated(payload: Result<Json<AuthDto>, JsonRejection>) -> Result<AuthDto, ApiError> {
    let Json(dto) = payload.map_err(|e| {
        warn!(error = %e, "rejected request body");
        ApiError::BadRequest(e.body_text())
    })?;
    dto.validate().map_err(|msg| {
        warn!(reason = %msg, "invalid credentials payload");
        ApiError::BadRequest(msg)
    })?;
    Ok(dto)
}

#[instrument(skip_all)]
pub async fn signup(
    State(auth): State<AuthService>,
    payload: Result<Json<AuthDto>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    let dto = validated(payload)?;
    let user = auth.signup(&dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip_all)]
pub async fn signin(
    State(auth): State<AuthService>,
    payload: Result<Json<AuthDto>, JsonRejection>,
) -> Result<Json<AccessToken>, ApiError> {
    let dto = validated(payload)?;
    let token = auth.signin(&dto).await?;
    Ok(Json(token))
}
