//! Provider credit balances.
//!
//! One row per provider, lazily created at zero on first touch. All
//! mutations are single conditional UPDATE statements so that a balance can
//! never be driven below zero, regardless of concurrent spends; the CHECK
//! constraint in the schema is the backstop.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::ProfileId;

/// Credit balance row for a provider
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProviderCredits {
    pub provider_id: ProfileId,
    pub credits: i32,
    pub updated_at: DateTime<Utc>,
}

impl ProviderCredits {
    /// Make sure a balance row exists for this provider.
    ///
    /// Takes a connection so it can run inside a larger transaction.
    pub async fn ensure_row(provider_id: ProfileId, conn: &mut PgConnection) -> Result<()> {
        sqlx::query(
            "INSERT INTO provider_credits (provider_id, credits) VALUES ($1, 0)
             ON CONFLICT (provider_id) DO NOTHING",
        )
        .bind(provider_id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Current balance, creating the zero row on first read.
    pub async fn get_or_create(provider_id: ProfileId, pool: &PgPool) -> Result<i32> {
        let mut conn = pool.acquire().await?;
        Self::ensure_row(provider_id, &mut conn).await?;

        let credits = sqlx::query_scalar::<_, i32>(
            "SELECT credits FROM provider_credits WHERE provider_id = $1",
        )
        .bind(provider_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(credits)
    }

    /// Add credits (purchase). Returns the new balance.
    pub async fn add(provider_id: ProfileId, amount: i32, conn: &mut PgConnection) -> Result<i32> {
        let credits = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE provider_credits SET
                credits = credits + $2,
                updated_at = NOW()
            WHERE provider_id = $1
            RETURNING credits
            "#,
        )
        .bind(provider_id)
        .bind(amount)
        .fetch_one(&mut *conn)
        .await?;
        Ok(credits)
    }

    /// Conditionally spend credits: decrements only when the balance covers
    /// `amount`. Returns the new balance, or `None` when it does not.
    ///
    /// This is the atomic decrement-with-floor that replaces any read-then-
    /// write sequence; concurrent spends serialize on the row lock.
    pub async fn try_spend(
        provider_id: ProfileId,
        amount: i32,
        conn: &mut PgConnection,
    ) -> Result<Option<i32>> {
        let credits = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE provider_credits SET
                credits = credits - $2,
                updated_at = NOW()
            WHERE provider_id = $1 AND credits >= $2
            RETURNING credits
            "#,
        )
        .bind(provider_id)
        .bind(amount)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(credits)
    }
}
