//! Profile routes: own-profile management and public profile pages.

use axum::extract::{Extension, Path};
use axum::Json;
use serde::Deserialize;

use crate::common::{ApiError, CategoryId, ProfileId};
use crate::domains::categories::ServiceCategory;
use crate::domains::profiles::{Profile, UpdateProfile};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

/// GET /profiles/me
pub async fn get_my_profile_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> Result<Json<Profile>, ApiError> {
    let profile = Profile::find_by_id(user.profile_id, &state.db_pool).await?;
    Ok(Json(profile))
}

/// PUT /profiles/me
pub async fn update_my_profile_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> Result<Json<Profile>, ApiError> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("name must not be empty".into()));
        }
    }
    let profile = Profile::update(user.profile_id, input, &state.db_pool).await?;
    Ok(Json(profile))
}

/// GET /profiles/:id
///
/// Public profile page (providers advertise their contact details here).
pub async fn get_profile_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<ProfileId>,
) -> Result<Json<Profile>, ApiError> {
    let profile = Profile::find_by_id_optional(id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("profile"))?;
    Ok(Json(profile))
}

/// GET /profiles/me/specialties
pub async fn get_my_specialties_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> Result<Json<Vec<CategoryId>>, ApiError> {
    let profile = Profile::find_by_id(user.profile_id, &state.db_pool).await?;
    Ok(Json(profile.specialties))
}

#[derive(Deserialize)]
pub struct UpdateSpecialtiesRequest {
    pub specialties: Vec<CategoryId>,
}

/// PUT /profiles/me/specialties
///
/// Replaces the professional's specialty set. Every id must reference an
/// existing service category.
pub async fn update_my_specialties_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Json(input): Json<UpdateSpecialtiesRequest>,
) -> Result<Json<Profile>, ApiError> {
    user.require_professional()?;

    // Specialties are a set; repeated ids in the payload collapse to one.
    let mut specialties = input.specialties;
    specialties.sort();
    specialties.dedup();

    let existing = ServiceCategory::count_existing(&specialties, &state.db_pool).await?;
    if existing != specialties.len() as i64 {
        return Err(ApiError::Validation(
            "specialties contain unknown category ids".into(),
        ));
    }

    let profile =
        Profile::update_specialties(user.profile_id, &specialties, &state.db_pool).await?;
    Ok(Json(profile))
}
