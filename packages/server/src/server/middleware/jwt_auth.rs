use crate::common::{ApiError, ProfileId};
use crate::domains::auth::JwtService;
use crate::domains::profiles::UserType;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub profile_id: ProfileId,
    pub email: String,
    pub user_type: UserType,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ApiError::AdminRequired)
        }
    }

    /// Professionals (and admins) may use the provider-side features.
    pub fn require_professional(&self) -> Result<(), ApiError> {
        match self.user_type {
            UserType::Professional | UserType::Admin => Ok(()),
            UserType::Client => Err(ApiError::PermissionDenied(
                "This action requires a professional account".to_string(),
            )),
        }
    }
}

/// Extractor for handlers that require an authenticated user.
///
/// Rejects with 401 if the request carried no valid token.
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(ApiError::AuthenticationRequired)
    }
}

/// JWT authentication middleware
///
/// Extracts JWT token from Authorization header, verifies it, and adds AuthUser to request extensions.
/// If no token or invalid token, request continues without AuthUser (public access).
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!(
            "Authenticated user: {} ({})",
            user.profile_id, user.user_type
        );
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    // Get Authorization header
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    // Verify token
    let claims = jwt_service.verify_token(token).ok()?;
    let user_type = claims.user_type.parse().ok()?;

    Some(AuthUser {
        profile_id: ProfileId::from_uuid(claims.profile_id),
        email: claims.email,
        user_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let profile_id = Uuid::new_v4();
        let token = jwt_service
            .create_token(profile_id, "ana@example.com".to_string(), "client".to_string())
            .unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_some());
        let auth_user = auth_user.unwrap();
        assert_eq!(auth_user.profile_id, ProfileId::from_uuid(profile_id));
        assert_eq!(auth_user.user_type, UserType::Client);
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let profile_id = Uuid::new_v4();
        let token = jwt_service
            .create_token(
                profile_id,
                "carlos@example.com".to_string(),
                "professional".to_string(),
            )
            .unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", token)
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_some());
        assert_eq!(
            auth_user.unwrap().profile_id,
            ProfileId::from_uuid(profile_id)
        );
    }

    #[test]
    fn test_no_auth_header() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_none());
    }

    #[test]
    fn test_invalid_token() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = axum::http::Request::builder()
            .header("authorization", "Bearer invalid_token")
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(auth_user.is_none());
    }

    #[test]
    fn test_unknown_user_type_rejected() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let token = jwt_service
            .create_token(Uuid::new_v4(), "x@example.com".to_string(), "robot".to_string())
            .unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();

        assert!(extract_auth_user(&request, &jwt_service).is_none());
    }

    #[test]
    fn test_role_helpers() {
        let admin = AuthUser {
            profile_id: ProfileId::new(),
            email: "admin@example.com".to_string(),
            user_type: UserType::Admin,
        };
        let client = AuthUser {
            profile_id: ProfileId::new(),
            email: "ana@example.com".to_string(),
            user_type: UserType::Client,
        };

        assert!(admin.require_admin().is_ok());
        assert!(admin.require_professional().is_ok());
        assert!(client.require_admin().is_err());
        assert!(client.require_professional().is_err());
    }
}
