use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ApiError, CategoryId, ProfileId, RequestId};

/// Request status enum with explicit allowed transitions.
///
/// Lifecycle: open -> accepted -> in_progress -> completed, with
/// cancellation possible from open or accepted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Open,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Open => "open",
            RequestStatus::Accepted => "accepted",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Open, Accepted)
                | (Accepted, InProgress)
                | (InProgress, Completed)
                | (Open, Cancelled)
                | (Accepted, Cancelled)
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "open" => Ok(RequestStatus::Open),
            "accepted" => Ok(RequestStatus::Accepted),
            "in_progress" => Ok(RequestStatus::InProgress),
            "completed" => Ok(RequestStatus::Completed),
            "cancelled" => Ok(RequestStatus::Cancelled),
            _ => Err(anyhow::anyhow!("Invalid request status: {}", s)),
        }
    }
}

/// ServiceRequest model - a client's ask for a home-maintenance service
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServiceRequest {
    pub id: RequestId,
    pub client_id: ProfileId,

    pub title: String,
    pub description: String,
    pub category: String,
    pub category_id: Option<CategoryId>,
    pub subcategory: Option<String>,

    pub location: String,
    pub postal_code: Option<String>,
    pub preferred_date: Option<DateTime<Utc>>,

    pub status: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceRequest {
    /// Parsed status; rows can only hold the CHECK-constrained values.
    pub fn status_enum(&self) -> RequestStatus {
        self.status.parse().unwrap_or(RequestStatus::Open)
    }
}

/// Input for creating a new request. Status always starts at `open`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateServiceRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub category_id: Option<CategoryId>,
    pub subcategory: Option<String>,
    pub location: String,
    pub postal_code: Option<String>,
    pub preferred_date: Option<DateTime<Utc>>,
}

/// Input for the owner's field edits (status changes go through
/// `update_status` with transition checking)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateServiceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub category_id: Option<CategoryId>,
    pub subcategory: Option<String>,
    pub location: Option<String>,
    pub postal_code: Option<String>,
    pub preferred_date: Option<DateTime<Utc>>,
}

impl ServiceRequest {
    /// Find request by ID
    pub async fn find_by_id(id: RequestId, pool: &PgPool) -> Result<Option<Self>> {
        let request = sqlx::query_as::<_, Self>("SELECT * FROM service_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(request)
    }

    /// Create a new request owned by `client_id`
    pub async fn create(
        client_id: ProfileId,
        input: CreateServiceRequest,
        pool: &PgPool,
    ) -> Result<Self> {
        let request = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO service_requests (
                client_id, title, description, category, category_id,
                subcategory, location, postal_code, preferred_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.category_id)
        .bind(&input.subcategory)
        .bind(&input.location)
        .bind(&input.postal_code)
        .bind(input.preferred_date)
        .fetch_one(pool)
        .await?;
        Ok(request)
    }

    /// A client's own requests, newest first
    pub async fn list_by_client(client_id: ProfileId, pool: &PgPool) -> Result<Vec<Self>> {
        let requests = sqlx::query_as::<_, Self>(
            "SELECT * FROM service_requests WHERE client_id = $1 ORDER BY created_at DESC",
        )
        .bind(client_id)
        .fetch_all(pool)
        .await?;
        Ok(requests)
    }

    /// Marketplace listing: open requests, newest first
    pub async fn list_open(pool: &PgPool) -> Result<Vec<Self>> {
        let requests = sqlx::query_as::<_, Self>(
            "SELECT * FROM service_requests WHERE status = 'open' ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(requests)
    }

    /// Update request fields (COALESCE: absent fields keep their value)
    pub async fn update(id: RequestId, input: UpdateServiceRequest, pool: &PgPool) -> Result<Self> {
        let request = sqlx::query_as::<_, Self>(
            r#"
            UPDATE service_requests SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                category_id = COALESCE($5, category_id),
                subcategory = COALESCE($6, subcategory),
                location = COALESCE($7, location),
                postal_code = COALESCE($8, postal_code),
                preferred_date = COALESCE($9, preferred_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.category_id)
        .bind(&input.subcategory)
        .bind(&input.location)
        .bind(&input.postal_code)
        .bind(input.preferred_date)
        .fetch_one(pool)
        .await?;
        Ok(request)
    }

    /// Move the request to `next`, enforcing the transition table.
    pub async fn update_status(
        id: RequestId,
        next: RequestStatus,
        pool: &PgPool,
    ) -> Result<Self, ApiError> {
        let current = Self::find_by_id(id, pool)
            .await?
            .ok_or(ApiError::NotFound("request"))?;

        let from = current.status_enum();
        if !from.can_transition_to(next) {
            return Err(ApiError::InvalidTransition {
                from: from.to_string(),
                to: next.to_string(),
            });
        }

        // Guard the status in the WHERE clause: a concurrent transition
        // loses instead of overwriting.
        let updated = sqlx::query_as::<_, Self>(
            r#"
            UPDATE service_requests SET
                status = $3,
                updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(from.as_str())
        .bind(next.as_str())
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::InvalidTransition {
            from: from.to_string(),
            to: next.to_string(),
        })?;

        Ok(updated)
    }

    /// Count open requests
    pub async fn count_open(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM service_requests WHERE status = 'open'",
        )
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
