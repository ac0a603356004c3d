use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{RequestId, RequestImageId};

/// Image attached to a service request. Storage is external; only the URL
/// is recorded here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RequestImage {
    pub id: RequestImageId,
    pub request_id: RequestId,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl RequestImage {
    /// Attach an image URL to a request
    pub async fn create(request_id: RequestId, image_url: &str, pool: &PgPool) -> Result<Self> {
        let image = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO request_images (request_id, image_url)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(request_id)
        .bind(image_url)
        .fetch_one(pool)
        .await?;
        Ok(image)
    }

    /// Images for a request, oldest first (upload order)
    pub async fn list_for_request(request_id: RequestId, pool: &PgPool) -> Result<Vec<Self>> {
        let images = sqlx::query_as::<_, Self>(
            "SELECT * FROM request_images WHERE request_id = $1 ORDER BY created_at ASC",
        )
        .bind(request_id)
        .fetch_all(pool)
        .await?;
        Ok(images)
    }
}
