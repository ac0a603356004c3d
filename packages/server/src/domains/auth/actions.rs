//! Signup and login flows.
//!
//! Signup keeps the application-level duplicate-email pre-check (a friendly
//! error before the database constraint would fire), then creates the
//! profile and its credential in one transaction. Login answers with the
//! same `InvalidCredentials` for unknown e-mails and wrong passwords.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;

use crate::common::{ApiError, ProfileId};
use crate::domains::auth::password::{hash_password, verify_password, MIN_PASSWORD_LEN};
use crate::domains::auth::{Credential, JwtService};
use crate::domains::profiles::{Profile, UserType};

/// A signed-in session: the bearer token plus the derived profile.
#[derive(Debug, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub profile: Profile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
    pub phone: Option<String>,
}

/// Register a new account and return a signed-in session.
pub async fn sign_up(
    input: SignUpInput,
    jwt: &JwtService,
    pool: &PgPool,
) -> Result<AuthSession, ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".into()));
    }
    if !input.email.contains('@') {
        return Err(ApiError::Validation("invalid e-mail address".into()));
    }
    if input.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    // Admin accounts are only grantable by an existing admin.
    if input.user_type == UserType::Admin {
        return Err(ApiError::Validation(
            "user_type must be client or professional".into(),
        ));
    }

    // Friendly duplicate check before the unique constraint would fire.
    if Profile::find_by_email(&input.email, pool).await?.is_some() {
        return Err(ApiError::EmailTaken);
    }

    let password_hash = hash_password(&input.password)?;

    let mut tx = pool.begin().await?;

    let profile = sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO profiles (name, email, phone, user_type)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(input.name.trim())
    .bind(&input.email)
    .bind(&input.phone)
    .bind(input.user_type.as_str())
    .fetch_one(&mut *tx)
    .await
    .map_err(email_conflict)?;

    sqlx::query(
        r#"
        INSERT INTO auth_credentials (profile_id, email, password_hash)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(profile.id)
    .bind(&input.email)
    .bind(&password_hash)
    .execute(&mut *tx)
    .await
    .map_err(email_conflict)?;

    tx.commit().await?;

    info!(profile_id = %profile.id, user_type = %profile.user_type, "New account registered");

    let token = jwt.create_token(
        profile.id.into_uuid(),
        profile.email.clone(),
        profile.user_type.clone(),
    )?;

    Ok(AuthSession { token, profile })
}

/// Authenticate an e-mail/password pair and return a session.
pub async fn sign_in(
    email: &str,
    password: &str,
    jwt: &JwtService,
    pool: &PgPool,
) -> Result<AuthSession, ApiError> {
    let credential = Credential::find_by_email(email, pool)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(password, &credential.password_hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    // Credentials cascade-delete with their profile, so the row is there;
    // anything that goes wrong here is infrastructure, not a bad password.
    let profile = Profile::find_by_id(credential.profile_id, pool).await?;

    info!(profile_id = %profile.id, "Login");

    let token = jwt.create_token(
        profile.id.into_uuid(),
        profile.email.clone(),
        profile.user_type.clone(),
    )?;

    Ok(AuthSession { token, profile })
}

/// Change the password behind a logged-in profile. Requires the current
/// password even with a valid token.
pub async fn change_password(
    profile_id: ProfileId,
    current: &str,
    new: &str,
    pool: &PgPool,
) -> Result<(), ApiError> {
    if new.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let credential = Credential::find_by_profile_id(profile_id, pool)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(current, &credential.password_hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    let password_hash = hash_password(new)?;
    Credential::update_password_hash(profile_id, &password_hash, pool).await?;

    info!(%profile_id, "Password changed");

    Ok(())
}

/// Maps a unique violation during signup to `EmailTaken` (the pre-check is
/// racy by nature; the constraint is authoritative).
fn email_conflict(err: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return ApiError::EmailTaken;
        }
    }
    ApiError::Database(err)
}
