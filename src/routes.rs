//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: DB, cache, upgrade queue (public)
//! - `/api/*`            - REST API (Bearer token required)
//! - `/dashboard/*`      - Web UI (cookie session required, except login)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token (API) or cookie session (web)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, Tier};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes with authentication but without rate limiting.
///
/// [`app_router`] wraps these with per-IP limits, which need the peer
/// address from `into_make_service_with_connect_info`. Tests that drive the
/// router in-process use this directly.
pub fn base_router(state: AppState) -> Router {
    build(state, None)
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build(state, Some(behind_proxy)))
}

fn build(state: AppState, limits: Option<bool>) -> Router {
    let limited = |router: Router<AppState>, tier: Tier| match limits {
        Some(behind_proxy) => rate_limit::apply(router, tier, behind_proxy),
        None => router,
    };

    let api_router = limited(
        api::routes::protected_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        Tier::Secure,
    );

    let web_protected = limited(
        web::routes::protected_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            web_auth::layer,
        )),
        Tier::Secure,
    );

    let web_public = limited(web::routes::public_routes(), Tier::Public);

    let web_router = Router::new().merge(web_protected).merge(web_public);

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .nest("/dashboard", web_router)
        .with_state(state)
        .layer(tracing::layer())
}
