use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ProfileId, RequestId, UnlockId};

/// Contact unlock: the join entity recording that a provider paid to see a
/// request's client contact. At most one row per (provider, request) pair,
/// enforced by the unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactUnlock {
    pub id: UnlockId,
    pub provider_id: ProfileId,
    pub request_id: RequestId,
    pub credits_used: i32,
    pub unlocked_at: DateTime<Utc>,
}

/// An unlocked request with the client contact details it paid for.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UnlockedContact {
    pub unlock_id: UnlockId,
    pub unlocked_at: DateTime<Utc>,

    pub request_id: RequestId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub request_created_at: DateTime<Utc>,

    pub client_id: ProfileId,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
}

impl ContactUnlock {
    /// Insert an unlock row.
    ///
    /// Returns the raw sqlx error so the caller can distinguish the
    /// unique-violation (duplicate unlock) from other failures. Runs on a
    /// connection so it participates in the unlock transaction.
    pub async fn insert(
        provider_id: ProfileId,
        request_id: RequestId,
        credits_used: i32,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO contact_unlocks (provider_id, request_id, credits_used)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(provider_id)
        .bind(request_id)
        .bind(credits_used)
        .fetch_one(&mut *conn)
        .await
    }

    /// Look up the unlock for a specific (provider, request) pair
    pub async fn find_for_pair(
        provider_id: ProfileId,
        request_id: RequestId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let unlock = sqlx::query_as::<_, Self>(
            "SELECT * FROM contact_unlocks WHERE provider_id = $1 AND request_id = $2",
        )
        .bind(provider_id)
        .bind(request_id)
        .fetch_optional(pool)
        .await?;
        Ok(unlock)
    }

    /// Request ids this provider has unlocked (drives marketplace button state)
    pub async fn list_unlocked_request_ids(
        provider_id: ProfileId,
        pool: &PgPool,
    ) -> Result<Vec<RequestId>> {
        let ids = sqlx::query_scalar::<_, RequestId>(
            "SELECT request_id FROM contact_unlocks WHERE provider_id = $1",
        )
        .bind(provider_id)
        .fetch_all(pool)
        .await?;
        Ok(ids)
    }

    /// The provider's unlocked requests joined with client contact details,
    /// most recently unlocked first
    pub async fn list_unlocked_contacts(
        provider_id: ProfileId,
        pool: &PgPool,
    ) -> Result<Vec<UnlockedContact>> {
        let contacts = sqlx::query_as::<_, UnlockedContact>(
            r#"
            SELECT
                cu.id AS unlock_id,
                cu.unlocked_at,
                sr.id AS request_id,
                sr.title,
                sr.description,
                sr.category,
                sr.location,
                sr.created_at AS request_created_at,
                p.id AS client_id,
                p.name AS client_name,
                p.email AS client_email,
                p.phone AS client_phone
            FROM contact_unlocks cu
            JOIN service_requests sr ON sr.id = cu.request_id
            JOIN profiles p ON p.id = sr.client_id
            WHERE cu.provider_id = $1
            ORDER BY cu.unlocked_at DESC
            "#,
        )
        .bind(provider_id)
        .fetch_all(pool)
        .await?;
        Ok(contacts)
    }
}
