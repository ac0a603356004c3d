//! Service request routes: CRUD for the owning client plus the status
//! lifecycle endpoint.

use axum::extract::{Extension, Path};
use axum::Json;
use serde::Deserialize;

use crate::common::{ApiError, RequestId};
use crate::domains::requests::{
    CreateServiceRequest, RequestImage, RequestStatus, ServiceRequest, UpdateServiceRequest,
};
use crate::domains::unlocks::ContactUnlock;
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

/// POST /requests
pub async fn create_request_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Json(input): Json<CreateServiceRequest>,
) -> Result<Json<ServiceRequest>, ApiError> {
    if input.title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be empty".into()));
    }
    if input.description.trim().is_empty() {
        return Err(ApiError::Validation("description must not be empty".into()));
    }
    if input.location.trim().is_empty() {
        return Err(ApiError::Validation("location must not be empty".into()));
    }

    let request = ServiceRequest::create(user.profile_id, input, &state.db_pool).await?;
    Ok(Json(request))
}

/// GET /requests
///
/// The caller's own requests, newest first.
pub async fn list_my_requests_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> Result<Json<Vec<ServiceRequest>>, ApiError> {
    let requests = ServiceRequest::list_by_client(user.profile_id, &state.db_pool).await?;
    Ok(Json(requests))
}

/// GET /requests/:id
///
/// Visible to the owning client, admins, and providers who unlocked it
/// (the marketplace listing exposes open requests without contact data).
pub async fn get_request_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path(id): Path<RequestId>,
) -> Result<Json<ServiceRequest>, ApiError> {
    let request = require_visible(id, &user, &state).await?;
    Ok(Json(request))
}

/// PUT /requests/:id
pub async fn update_request_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path(id): Path<RequestId>,
    Json(input): Json<UpdateServiceRequest>,
) -> Result<Json<ServiceRequest>, ApiError> {
    let request = require_owned(id, &user, &state).await?;
    let updated = ServiceRequest::update(request.id, input, &state.db_pool).await?;
    Ok(Json(updated))
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: RequestStatus,
}

/// POST /requests/:id/status
///
/// Moves the request along its lifecycle; illegal transitions are rejected
/// with 422.
pub async fn update_status_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path(id): Path<RequestId>,
    Json(input): Json<UpdateStatusRequest>,
) -> Result<Json<ServiceRequest>, ApiError> {
    require_owned(id, &user, &state).await?;
    let updated = ServiceRequest::update_status(id, input.status, &state.db_pool).await?;
    Ok(Json(updated))
}

#[derive(Deserialize)]
pub struct AttachImageRequest {
    pub image_url: String,
}

/// POST /requests/:id/images
pub async fn attach_image_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path(id): Path<RequestId>,
    Json(input): Json<AttachImageRequest>,
) -> Result<Json<RequestImage>, ApiError> {
    if input.image_url.trim().is_empty() {
        return Err(ApiError::Validation("image_url must not be empty".into()));
    }
    require_owned(id, &user, &state).await?;
    let image = RequestImage::create(id, &input.image_url, &state.db_pool).await?;
    Ok(Json(image))
}

/// GET /requests/:id/images
pub async fn list_images_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path(id): Path<RequestId>,
) -> Result<Json<Vec<RequestImage>>, ApiError> {
    // Same visibility rule as the request itself.
    require_visible(id, &user, &state).await?;
    let images = RequestImage::list_for_request(id, &state.db_pool).await?;
    Ok(Json(images))
}

/// Loads the request if the caller may view it: the owning client, an
/// admin, or a provider who unlocked it.
async fn require_visible(
    id: RequestId,
    user: &AuthUser,
    state: &AxumAppState,
) -> Result<ServiceRequest, ApiError> {
    let request = ServiceRequest::find_by_id(id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("request"))?;

    if request.client_id != user.profile_id && !user.is_admin() {
        let unlocked = ContactUnlock::find_for_pair(user.profile_id, id, &state.db_pool)
            .await?
            .is_some();
        if !unlocked {
            return Err(ApiError::PermissionDenied(
                "Unlock this request to view it".to_string(),
            ));
        }
    }

    Ok(request)
}

/// Loads the request and checks the caller owns it. Writes are reserved
/// for the owning client; admins get read access only.
async fn require_owned(
    id: RequestId,
    user: &AuthUser,
    state: &AxumAppState,
) -> Result<ServiceRequest, ApiError> {
    let request = ServiceRequest::find_by_id(id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("request"))?;

    if request.client_id != user.profile_id {
        return Err(ApiError::PermissionDenied(
            "Only the request owner can modify it".to_string(),
        ));
    }

    Ok(request)
}
