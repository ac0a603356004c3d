use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ProfileId, TransactionId};

/// Append-only ledger entry. Positive amount = purchase, negative = unlock
/// spend. Rows are never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CreditTransaction {
    pub id: TransactionId,
    pub provider_id: ProfileId,
    pub amount: i32,
    pub transaction_type: String,
    pub payment_method: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl CreditTransaction {
    /// Append a ledger entry.
    ///
    /// Takes a connection so the entry commits or rolls back with the
    /// balance mutation it records.
    pub async fn record(
        provider_id: ProfileId,
        amount: i32,
        transaction_type: &str,
        payment_method: Option<&str>,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        let entry = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO credit_transactions (provider_id, amount, transaction_type, payment_method, status)
            VALUES ($1, $2, $3, $4, 'completed')
            RETURNING *
            "#,
        )
        .bind(provider_id)
        .bind(amount)
        .bind(transaction_type)
        .bind(payment_method)
        .fetch_one(&mut *conn)
        .await?;
        Ok(entry)
    }

    /// A provider's ledger, newest first
    pub async fn list_for_provider(provider_id: ProfileId, pool: &PgPool) -> Result<Vec<Self>> {
        let entries = sqlx::query_as::<_, Self>(
            "SELECT * FROM credit_transactions WHERE provider_id = $1 ORDER BY created_at DESC",
        )
        .bind(provider_id)
        .fetch_all(pool)
        .await?;
        Ok(entries)
    }

    /// Count ledger entries for a provider
    pub async fn count_for_provider(provider_id: ProfileId, pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM credit_transactions WHERE provider_id = $1",
        )
        .bind(provider_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
