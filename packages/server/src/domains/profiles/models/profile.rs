use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CategoryId, ProfileId};

/// User type enum for type-safe role checks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Client,
    Professional,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Client => "client",
            UserType::Professional => "professional",
            UserType::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "client" => Ok(UserType::Client),
            "professional" => Ok(UserType::Professional),
            "admin" => Ok(UserType::Admin),
            _ => Err(anyhow::anyhow!("Invalid user type: {}", s)),
        }
    }
}

/// Profile model - every registered user has exactly one.
///
/// Professionals additionally carry rating, specialties and service areas;
/// those fields stay at their defaults for clients.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: ProfileId,

    // Identity
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_type: String,

    // Reputation
    pub rating: Option<f64>,
    pub reviews_count: i32,
    pub completed_jobs: i32,
    pub verified: bool,

    // Presentation
    pub bio: Option<String>,
    pub profession: Option<String>,
    pub experience: Option<String>,
    pub address: Option<String>,
    pub location: Option<String>,
    pub photo: Option<String>,

    // Professional coverage
    pub service_areas: Vec<String>,
    pub specialties: Vec<CategoryId>,

    // Timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Parsed user type; rows can only hold the CHECK-constrained values.
    pub fn user_type_enum(&self) -> UserType {
        self.user_type.parse().unwrap_or(UserType::Client)
    }
}

/// Input for creating a new profile (signup)
#[derive(Debug, Clone)]
pub struct CreateProfile {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_type: UserType,
}

/// Input for updating a profile (owner or admin)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profession: Option<String>,
    pub experience: Option<String>,
    pub address: Option<String>,
    pub location: Option<String>,
    pub photo: Option<String>,
    pub service_areas: Option<Vec<String>>,
}

impl Profile {
    /// Find profile by ID
    pub async fn find_by_id(id: ProfileId, pool: &PgPool) -> Result<Self> {
        let profile = sqlx::query_as::<_, Self>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(profile)
    }

    /// Find profile by ID, returning None if not found
    pub async fn find_by_id_optional(id: ProfileId, pool: &PgPool) -> Result<Option<Self>> {
        let profile = sqlx::query_as::<_, Self>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(profile)
    }

    /// Find profile by e-mail (signup duplicate pre-check, login)
    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        let profile = sqlx::query_as::<_, Self>("SELECT * FROM profiles WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(profile)
    }

    /// Create a new profile
    pub async fn create(input: CreateProfile, pool: &PgPool) -> Result<Self> {
        let profile = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO profiles (name, email, phone, user_type)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(input.user_type.as_str())
        .fetch_one(pool)
        .await?;
        Ok(profile)
    }

    /// Update a profile (COALESCE: absent fields keep their value)
    pub async fn update(id: ProfileId, input: UpdateProfile, pool: &PgPool) -> Result<Self> {
        let profile = sqlx::query_as::<_, Self>(
            r#"
            UPDATE profiles SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                bio = COALESCE($4, bio),
                profession = COALESCE($5, profession),
                experience = COALESCE($6, experience),
                address = COALESCE($7, address),
                location = COALESCE($8, location),
                photo = COALESCE($9, photo),
                service_areas = COALESCE($10, service_areas),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.bio)
        .bind(&input.profession)
        .bind(&input.experience)
        .bind(&input.address)
        .bind(&input.location)
        .bind(&input.photo)
        .bind(&input.service_areas)
        .fetch_one(pool)
        .await?;
        Ok(profile)
    }

    /// Change a user's type (admin privilege override)
    pub async fn update_user_type(
        id: ProfileId,
        user_type: UserType,
        pool: &PgPool,
    ) -> Result<Self> {
        let profile = sqlx::query_as::<_, Self>(
            r#"
            UPDATE profiles SET
                user_type = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_type.as_str())
        .fetch_one(pool)
        .await?;
        Ok(profile)
    }

    /// Replace a professional's specialty set (category ids)
    pub async fn update_specialties(
        id: ProfileId,
        specialties: &[CategoryId],
        pool: &PgPool,
    ) -> Result<Self> {
        let profile = sqlx::query_as::<_, Self>(
            r#"
            UPDATE profiles SET
                specialties = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(specialties)
        .fetch_one(pool)
        .await?;
        Ok(profile)
    }

    /// List all profiles, newest first (admin user management)
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let profiles =
            sqlx::query_as::<_, Self>("SELECT * FROM profiles ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?;
        Ok(profiles)
    }

    /// Count all profiles
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profiles")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_roundtrip() {
        for ut in [UserType::Client, UserType::Professional, UserType::Admin] {
            let parsed: UserType = ut.as_str().parse().unwrap();
            assert_eq!(parsed, ut);
        }
    }

    #[test]
    fn test_user_type_rejects_free_text() {
        assert!("superuser".parse::<UserType>().is_err());
        assert!("".parse::<UserType>().is_err());
    }
}
