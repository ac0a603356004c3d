//! Contact unlock: spend one credit to reveal a request's client contact.
//!
//! The whole operation is one database transaction:
//!   1. conditional balance decrement (floor at zero),
//!   2. unlock row insert (unique per provider/request pair),
//!   3. ledger append (amount -1, type "unlock").
//! A duplicate unlock rolls everything back, so the credit is never burned;
//! two concurrent unlocks serialize on the balance row and one of them sees
//! the decremented balance.

use sqlx::PgPool;
use tracing::info;

use crate::common::{ApiError, ProfileId, RequestId};
use crate::domains::credits::models::{CreditTransaction, ProviderCredits};
use crate::domains::requests::ServiceRequest;
use crate::domains::unlocks::models::ContactUnlock;

/// Credits charged per contact unlock.
pub const UNLOCK_COST: i32 = 1;

/// Unlock the client contact behind `request_id` for `provider_id`.
pub async fn unlock_contact(
    provider_id: ProfileId,
    request_id: RequestId,
    pool: &PgPool,
) -> Result<ContactUnlock, ApiError> {
    // Fail with a clean 404 rather than a foreign-key error.
    ServiceRequest::find_by_id(request_id, pool)
        .await?
        .ok_or(ApiError::NotFound("request"))?;

    let mut tx = pool.begin().await?;

    ProviderCredits::ensure_row(provider_id, &mut tx).await?;

    // Insufficiency is checked before the duplicate, matching the original
    // unlock flow's step order.
    let new_balance = ProviderCredits::try_spend(provider_id, UNLOCK_COST, &mut tx)
        .await?
        .ok_or(ApiError::InsufficientCredits)?;

    let unlock = ContactUnlock::insert(provider_id, request_id, UNLOCK_COST, &mut tx)
        .await
        .map_err(ApiError::from_unlock_insert)?;

    CreditTransaction::record(provider_id, -UNLOCK_COST, "unlock", None, &mut tx).await?;

    tx.commit().await?;

    info!(%provider_id, %request_id, new_balance, "Contact unlocked");

    Ok(unlock)
}
