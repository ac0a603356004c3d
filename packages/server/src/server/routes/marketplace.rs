//! Provider marketplace routes: browse open requests, unlock contacts and
//! review what was already unlocked.

use axum::extract::{Extension, Path};
use axum::Json;

use crate::common::{ApiError, RequestId};
use crate::domains::requests::ServiceRequest;
use crate::domains::unlocks::{unlock_contact, ContactUnlock, UnlockedContact};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

/// GET /marketplace/requests
///
/// Open requests, newest first. Contact details stay hidden until the
/// provider unlocks a request.
pub async fn list_open_requests_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> Result<Json<Vec<ServiceRequest>>, ApiError> {
    user.require_professional()?;
    let requests = ServiceRequest::list_open(&state.db_pool).await?;
    Ok(Json(requests))
}

/// GET /marketplace/unlocks
///
/// Ids of the requests this provider has already unlocked, so the listing
/// can mark them.
pub async fn list_unlocked_ids_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> Result<Json<Vec<RequestId>>, ApiError> {
    user.require_professional()?;
    let ids = ContactUnlock::list_unlocked_request_ids(user.profile_id, &state.db_pool).await?;
    Ok(Json(ids))
}

/// POST /marketplace/requests/:id/unlock
///
/// Spends one credit and reveals the client's contact. Atomic: the credit
/// is only spent if the unlock record lands.
pub async fn unlock_request_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path(id): Path<RequestId>,
) -> Result<Json<ContactUnlock>, ApiError> {
    user.require_professional()?;
    let unlock = unlock_contact(user.profile_id, id, &state.db_pool).await?;
    Ok(Json(unlock))
}

/// GET /marketplace/contacts
///
/// The provider's unlocked contacts with request and client details joined
/// in, newest unlock first.
pub async fn list_unlocked_contacts_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> Result<Json<Vec<UnlockedContact>>, ApiError> {
    user.require_professional()?;
    let contacts = ContactUnlock::list_unlocked_contacts(user.profile_id, &state.db_pool).await?;
    Ok(Json(contacts))
}
