//! Credit purchase flow.
//!
//! Payment itself is simulated (as in the original marketplace); the flow
//! records the ledger entry and the balance change in one transaction.

use sqlx::PgPool;
use tracing::info;

use crate::common::{ApiError, ProfileId};
use crate::domains::credits::models::{CreditTransaction, ProviderCredits};

/// Add purchased credits to a provider's balance. Returns the new balance.
pub async fn purchase_credits(
    provider_id: ProfileId,
    amount: i32,
    payment_method: &str,
    pool: &PgPool,
) -> Result<i32, ApiError> {
    if amount < 1 {
        return Err(ApiError::Validation(
            "amount must be a positive number of credits".into(),
        ));
    }

    let mut tx = pool.begin().await?;

    ProviderCredits::ensure_row(provider_id, &mut tx).await?;
    let new_balance = ProviderCredits::add(provider_id, amount, &mut tx).await?;
    CreditTransaction::record(provider_id, amount, "purchase", Some(payment_method), &mut tx)
        .await?;

    tx.commit().await?;

    info!(%provider_id, amount, new_balance, "Credits purchased");

    Ok(new_balance)
}
