//! Credit balance, purchase and ledger routes.

use axum::extract::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::common::ApiError;
use crate::domains::credits::{purchase_credits, CreditTransaction, ProviderCredits};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

#[derive(Serialize)]
pub struct BalanceResponse {
    pub credits: i32,
}

/// GET /credits
///
/// Current balance. Providers without a balance row yet read as zero.
pub async fn get_balance_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> Result<Json<BalanceResponse>, ApiError> {
    user.require_professional()?;
    let credits = ProviderCredits::get_or_create(user.profile_id, &state.db_pool).await?;
    Ok(Json(BalanceResponse { credits }))
}

#[derive(Deserialize)]
pub struct PurchaseRequest {
    pub amount: i32,
    pub payment_method: String,
}

/// POST /credits/purchase
///
/// Adds credits and appends a purchase entry to the ledger. Payment is an
/// external concern; the chosen method is recorded verbatim.
pub async fn purchase_credits_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Json(input): Json<PurchaseRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    user.require_professional()?;
    let credits = purchase_credits(
        user.profile_id,
        input.amount,
        &input.payment_method,
        &state.db_pool,
    )
    .await?;
    Ok(Json(BalanceResponse { credits }))
}

/// GET /credits/transactions
///
/// The provider's ledger, newest first.
pub async fn list_transactions_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> Result<Json<Vec<CreditTransaction>>, ApiError> {
    user.require_professional()?;
    let entries = CreditTransaction::list_for_provider(user.profile_id, &state.db_pool).await?;
    Ok(Json(entries))
}
