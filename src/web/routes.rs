//! Web dashboard route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    create_alias_handler, create_custom_alias_handler, dashboard_handler, delete_alias_handler,
    login_handler, login_submit_handler, logout_handler, set_subdomain_handler,
    update_alias_handler, upgrade_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Protected dashboard routes requiring authentication.
///
/// Protected via [`crate::web::middleware::web_auth`] (cookie-based).
///
/// # Endpoints
///
/// - `GET  /`                             - Dashboard
/// - `POST /subdomain`                    - Claim a custom subdomain
/// - `POST /aliases`                      - Generate a random alias
/// - `POST /aliases/custom`               - Create a custom alias
/// - `POST /aliases/{kind}/{id}`          - Update an alias
/// - `POST /aliases/{kind}/{id}/delete`   - Delete an alias
/// - `GET  /upgrade`                      - Tracked redirect to checkout
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/subdomain", post(set_subdomain_handler))
        .route("/aliases", post(create_alias_handler))
        .route("/aliases/custom", post(create_custom_alias_handler))
        .route("/aliases/{kind}/{id}", post(update_alias_handler))
        .route("/aliases/{kind}/{id}/delete", post(delete_alias_handler))
        .route("/upgrade", get(upgrade_handler))
}

/// Public dashboard routes without authentication.
///
/// # Endpoints
///
/// - `GET  /login`  - Login page
/// - `POST /login`  - Token submission
/// - `GET  /logout` - Clear session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_handler).post(login_submit_handler))
        .route("/logout", get(logout_handler))
}
