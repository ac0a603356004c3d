//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    http::Method,
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    attach_image_handler, change_password_handler, create_category_handler,
    create_portfolio_item_handler,
    create_request_handler, delete_category_handler, delete_portfolio_item_handler,
    get_balance_handler, get_my_profile_handler, get_my_specialties_handler, get_profile_handler,
    get_request_handler,
    health_handler, list_categories_handler, list_images_handler, list_my_requests_handler,
    list_open_requests_handler, list_portfolio_handler, list_transactions_handler,
    list_unlocked_contacts_handler, list_unlocked_ids_handler, list_users_handler, login_handler,
    me_handler, purchase_credits_handler, signup_handler, unlock_request_handler,
    update_category_handler, update_my_profile_handler, update_my_specialties_handler,
    update_portfolio_item_handler, update_request_handler, update_status_handler,
    update_user_type_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, jwt_secret: &str, jwt_issuer: String) -> Router {
    let jwt_service = Arc::new(JwtService::new(jwt_secret, jwt_issuer));

    let app_state = AxumAppState {
        db_pool: pool,
        jwt_service: jwt_service.clone(),
    };

    // CORS configuration - the SPA runs on a different origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Rate limiting: 10 requests per second per IP with bursts up to 20
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers() // Extract IP from X-Forwarded-For header
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );

    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    // Clone jwt_service for middleware closure
    let jwt_service_for_middleware = jwt_service.clone();

    Router::new()
        // Authentication
        .route("/auth/signup", post(signup_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/me", get(me_handler))
        .route("/auth/password", post(change_password_handler))
        // Profiles
        .route(
            "/profiles/me",
            get(get_my_profile_handler).put(update_my_profile_handler),
        )
        .route(
            "/profiles/me/specialties",
            get(get_my_specialties_handler).put(update_my_specialties_handler),
        )
        .route("/profiles/:id", get(get_profile_handler))
        // Service requests (client side)
        .route(
            "/requests",
            post(create_request_handler).get(list_my_requests_handler),
        )
        .route(
            "/requests/:id",
            get(get_request_handler).put(update_request_handler),
        )
        .route("/requests/:id/status", post(update_status_handler))
        .route(
            "/requests/:id/images",
            post(attach_image_handler).get(list_images_handler),
        )
        // Marketplace (provider side)
        .route("/marketplace/requests", get(list_open_requests_handler))
        .route("/marketplace/unlocks", get(list_unlocked_ids_handler))
        .route(
            "/marketplace/requests/:id/unlock",
            post(unlock_request_handler),
        )
        .route("/marketplace/contacts", get(list_unlocked_contacts_handler))
        // Credits
        .route("/credits", get(get_balance_handler))
        .route("/credits/purchase", post(purchase_credits_handler))
        .route("/credits/transactions", get(list_transactions_handler))
        // Categories (public catalogue + admin management)
        .route("/categories", get(list_categories_handler))
        .route("/admin/categories", post(create_category_handler))
        .route(
            "/admin/categories/:id",
            put(update_category_handler).delete(delete_category_handler),
        )
        // Admin user management
        .route("/admin/users", get(list_users_handler))
        .route("/admin/users/:id/type", put(update_user_type_handler))
        // Portfolio
        .route("/providers/:id/portfolio", get(list_portfolio_handler))
        .route("/portfolio", post(create_portfolio_item_handler))
        .route(
            "/portfolio/:id",
            put(update_portfolio_item_handler).delete(delete_portfolio_item_handler),
        )
        // Health check (no auth)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }))
        .layer(rate_limit_layer)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
