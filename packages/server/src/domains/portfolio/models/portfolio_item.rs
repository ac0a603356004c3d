use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{PortfolioItemId, ProfileId};

/// Portfolio item - a media showcase entry owned by a professional.
/// The image itself lives in external storage; only its URL is kept.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PortfolioItem {
    pub id: PortfolioItemId,
    pub provider_id: ProfileId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a portfolio item
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePortfolioItem {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
}

/// Input for editing a portfolio item's text fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePortfolioItem {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PortfolioItem {
    /// Find item by ID
    pub async fn find_by_id(id: PortfolioItemId, pool: &PgPool) -> Result<Option<Self>> {
        let item = sqlx::query_as::<_, Self>("SELECT * FROM provider_portfolio WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(item)
    }

    /// A provider's portfolio, newest first
    pub async fn list_for_provider(provider_id: ProfileId, pool: &PgPool) -> Result<Vec<Self>> {
        let items = sqlx::query_as::<_, Self>(
            "SELECT * FROM provider_portfolio WHERE provider_id = $1 ORDER BY created_at DESC",
        )
        .bind(provider_id)
        .fetch_all(pool)
        .await?;
        Ok(items)
    }

    /// Create an item owned by `provider_id`
    pub async fn create(
        provider_id: ProfileId,
        input: CreatePortfolioItem,
        pool: &PgPool,
    ) -> Result<Self> {
        let item = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO provider_portfolio (provider_id, title, description, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(provider_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image_url)
        .fetch_one(pool)
        .await?;
        Ok(item)
    }

    /// Update an item's text fields
    pub async fn update(
        id: PortfolioItemId,
        input: UpdatePortfolioItem,
        pool: &PgPool,
    ) -> Result<Self> {
        let item = sqlx::query_as::<_, Self>(
            r#"
            UPDATE provider_portfolio SET
                title = COALESCE($2, title),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .fetch_one(pool)
        .await?;
        Ok(item)
    }

    /// Delete an item
    pub async fn delete(id: PortfolioItemId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM provider_portfolio WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
