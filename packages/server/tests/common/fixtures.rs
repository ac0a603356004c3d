//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use conecta_core::common::{ProfileId, RequestId};
use conecta_core::domains::credits::purchase_credits;
use conecta_core::domains::profiles::{CreateProfile, Profile, UserType};
use conecta_core::domains::requests::{CreateServiceRequest, ServiceRequest};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a client profile with a unique e-mail
pub async fn create_test_client(pool: &PgPool, name: &str) -> Result<ProfileId> {
    let profile = Profile::create(
        CreateProfile {
            name: name.to_string(),
            email: format!("{}@test.example", Uuid::new_v4()),
            phone: Some("+55 11 91234-5678".to_string()),
            user_type: UserType::Client,
        },
        pool,
    )
    .await?;
    Ok(profile.id)
}

/// Create a professional profile with a unique e-mail
pub async fn create_test_professional(pool: &PgPool, name: &str) -> Result<ProfileId> {
    let profile = Profile::create(
        CreateProfile {
            name: name.to_string(),
            email: format!("{}@test.example", Uuid::new_v4()),
            phone: Some("+55 11 98765-4321".to_string()),
            user_type: UserType::Professional,
        },
        pool,
    )
    .await?;
    Ok(profile.id)
}

/// Create an open service request owned by `client_id`
pub async fn create_test_request(pool: &PgPool, client_id: ProfileId) -> Result<RequestId> {
    let request = ServiceRequest::create(
        client_id,
        CreateServiceRequest {
            title: "Trocar tomadas da cozinha".to_string(),
            description: "Três tomadas queimadas precisam de troca".to_string(),
            category: "Elétrica".to_string(),
            category_id: None,
            subcategory: None,
            location: "São Paulo, SP".to_string(),
            postal_code: Some("01310-100".to_string()),
            preferred_date: None,
        },
        pool,
    )
    .await?;
    Ok(request.id)
}

/// Give a provider `amount` credits through the purchase flow
pub async fn grant_credits(pool: &PgPool, provider_id: ProfileId, amount: i32) -> Result<i32> {
    let balance = purchase_credits(provider_id, amount, "pix", pool).await?;
    Ok(balance)
}
