//! Provider portfolio routes. The gallery is public; mutations are
//! restricted to the owning professional.

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;

use crate::common::{ApiError, PortfolioItemId, ProfileId};
use crate::domains::portfolio::{CreatePortfolioItem, PortfolioItem, UpdatePortfolioItem};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

/// GET /providers/:id/portfolio
pub async fn list_portfolio_handler(
    Extension(state): Extension<AxumAppState>,
    Path(provider_id): Path<ProfileId>,
) -> Result<Json<Vec<PortfolioItem>>, ApiError> {
    let items = PortfolioItem::list_for_provider(provider_id, &state.db_pool).await?;
    Ok(Json(items))
}

/// POST /portfolio
pub async fn create_portfolio_item_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Json(input): Json<CreatePortfolioItem>,
) -> Result<Json<PortfolioItem>, ApiError> {
    user.require_professional()?;
    if input.title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be empty".into()));
    }
    if input.image_url.trim().is_empty() {
        return Err(ApiError::Validation("image_url must not be empty".into()));
    }
    let item = PortfolioItem::create(user.profile_id, input, &state.db_pool).await?;
    Ok(Json(item))
}

/// PUT /portfolio/:id
pub async fn update_portfolio_item_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path(id): Path<PortfolioItemId>,
    Json(input): Json<UpdatePortfolioItem>,
) -> Result<Json<PortfolioItem>, ApiError> {
    require_owned(id, &user, &state).await?;
    let item = PortfolioItem::update(id, input, &state.db_pool).await?;
    Ok(Json(item))
}

/// DELETE /portfolio/:id
pub async fn delete_portfolio_item_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path(id): Path<PortfolioItemId>,
) -> Result<StatusCode, ApiError> {
    require_owned(id, &user, &state).await?;
    PortfolioItem::delete(id, &state.db_pool).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn require_owned(
    id: PortfolioItemId,
    user: &AuthUser,
    state: &AxumAppState,
) -> Result<PortfolioItem, ApiError> {
    let item = PortfolioItem::find_by_id(id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("portfolio item"))?;

    if item.provider_id != user.profile_id && !user.is_admin() {
        return Err(ApiError::PermissionDenied(
            "Only the portfolio owner can modify it".to_string(),
        ));
    }

    Ok(item)
}
