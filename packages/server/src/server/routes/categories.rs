//! Public service category catalogue.

use axum::extract::Extension;
use axum::Json;

use crate::common::ApiError;
use crate::domains::categories::ServiceCategory;
use crate::server::app::AxumAppState;

/// GET /categories
///
/// The full catalogue, alphabetical. No authentication required; the
/// signup and request forms read it.
pub async fn list_categories_handler(
    Extension(state): Extension<AxumAppState>,
) -> Result<Json<Vec<ServiceCategory>>, ApiError> {
    let categories = ServiceCategory::list(&state.db_pool).await?;
    Ok(Json(categories))
}
