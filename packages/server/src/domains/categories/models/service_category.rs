use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::CategoryId;

/// ServiceCategory model - the taxonomy of offered service types.
/// Read-heavy; mutated only through the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServiceCategory {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a category (admin)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Input for updating a category (admin)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl ServiceCategory {
    /// All categories, ordered by name
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let categories =
            sqlx::query_as::<_, Self>("SELECT * FROM service_categories ORDER BY name")
                .fetch_all(pool)
                .await?;
        Ok(categories)
    }

    /// Find category by ID
    pub async fn find_by_id(id: CategoryId, pool: &PgPool) -> Result<Option<Self>> {
        let category =
            sqlx::query_as::<_, Self>("SELECT * FROM service_categories WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(category)
    }

    /// How many of the given ids actually exist (specialty validation)
    pub async fn count_existing(ids: &[CategoryId], pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM service_categories WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Create a category
    pub async fn create(input: CreateCategory, pool: &PgPool) -> Result<Self> {
        let category = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO service_categories (name, description, icon)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.icon)
        .fetch_one(pool)
        .await?;
        Ok(category)
    }

    /// Update a category (COALESCE: absent fields keep their value)
    pub async fn update(id: CategoryId, input: UpdateCategory, pool: &PgPool) -> Result<Self> {
        let category = sqlx::query_as::<_, Self>(
            r#"
            UPDATE service_categories SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                icon = COALESCE($4, icon),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.icon)
        .fetch_one(pool)
        .await?;
        Ok(category)
    }

    /// Delete a category
    pub async fn delete(id: CategoryId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM service_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
