use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::ProfileId;

/// Password credential for a profile.
///
/// Kept in its own table so `Profile` rows can be serialized to clients
/// without ever carrying the hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credential {
    pub profile_id: ProfileId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Find credential by e-mail (login path)
    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        let credential =
            sqlx::query_as::<_, Self>("SELECT * FROM auth_credentials WHERE email = $1")
                .bind(email)
                .fetch_optional(pool)
                .await?;
        Ok(credential)
    }

    /// Find credential by profile id
    pub async fn find_by_profile_id(
        profile_id: ProfileId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let credential =
            sqlx::query_as::<_, Self>("SELECT * FROM auth_credentials WHERE profile_id = $1")
                .bind(profile_id)
                .fetch_optional(pool)
                .await?;
        Ok(credential)
    }

    /// Replace the stored password hash
    pub async fn update_password_hash(
        profile_id: ProfileId,
        password_hash: &str,
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE auth_credentials SET password_hash = $2, updated_at = NOW() WHERE profile_id = $1",
        )
        .bind(profile_id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(())
    }
}
