//! Signup, login and current-session routes.

use axum::{extract::Extension, Json};
use serde::Deserialize;

use crate::common::ApiError;
use crate::domains::auth::{self, AuthSession, SignUpInput};
use crate::domains::profiles::Profile;
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

/// POST /auth/signup
pub async fn signup_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<SignUpInput>,
) -> Result<Json<AuthSession>, ApiError> {
    let session = auth::sign_up(input, &state.jwt_service, &state.db_pool).await?;
    Ok(Json(session))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/login
pub async fn login_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<AuthSession>, ApiError> {
    let session =
        auth::sign_in(&input.email, &input.password, &state.jwt_service, &state.db_pool).await?;
    Ok(Json(session))
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// POST /auth/password
pub async fn change_password_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> Result<axum::http::StatusCode, ApiError> {
    auth::change_password(
        user.profile_id,
        &input.current_password,
        &input.new_password,
        &state.db_pool,
    )
    .await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// GET /auth/me
///
/// Returns the profile behind the bearer token. Sessions are stateless, so
/// "signout" is simply dropping the token client-side.
pub async fn me_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> Result<Json<Profile>, ApiError> {
    let profile = Profile::find_by_id(user.profile_id, &state.db_pool).await?;
    Ok(Json(profile))
}
