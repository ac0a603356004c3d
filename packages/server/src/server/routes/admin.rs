//! Admin routes: category catalogue management and user administration.

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::common::{ApiError, CategoryId, ProfileId};
use crate::domains::categories::{CreateCategory, ServiceCategory, UpdateCategory};
use crate::domains::profiles::{Profile, UserType};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

/// POST /admin/categories
pub async fn create_category_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Json(input): Json<CreateCategory>,
) -> Result<Json<ServiceCategory>, ApiError> {
    user.require_admin()?;
    if input.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".into()));
    }
    let category = ServiceCategory::create(input, &state.db_pool).await?;
    Ok(Json(category))
}

/// PUT /admin/categories/:id
pub async fn update_category_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path(id): Path<CategoryId>,
    Json(input): Json<UpdateCategory>,
) -> Result<Json<ServiceCategory>, ApiError> {
    user.require_admin()?;
    ServiceCategory::find_by_id(id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("category"))?;
    let category = ServiceCategory::update(id, input, &state.db_pool).await?;
    Ok(Json(category))
}

/// DELETE /admin/categories/:id
pub async fn delete_category_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode, ApiError> {
    user.require_admin()?;
    ServiceCategory::find_by_id(id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("category"))?;
    ServiceCategory::delete(id, &state.db_pool).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /admin/users
pub async fn list_users_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> Result<Json<Vec<Profile>>, ApiError> {
    user.require_admin()?;
    let profiles = Profile::list(&state.db_pool).await?;
    Ok(Json(profiles))
}

#[derive(Deserialize)]
pub struct UpdateUserTypeRequest {
    pub user_type: UserType,
}

/// PUT /admin/users/:id/type
///
/// The only path to an admin account: promotion by an existing admin.
pub async fn update_user_type_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path(id): Path<ProfileId>,
    Json(input): Json<UpdateUserTypeRequest>,
) -> Result<Json<Profile>, ApiError> {
    user.require_admin()?;
    Profile::find_by_id_optional(id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("profile"))?;
    let profile = Profile::update_user_type(id, input.user_type, &state.db_pool).await?;
    Ok(Json(profile))
}
