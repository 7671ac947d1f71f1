//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_domain_alias_handler, create_random_alias_handler, dashboard_handler,
    delete_alias_handler, delete_domain_alias_handler, delete_random_alias_handler,
    list_domain_aliases_handler, list_profiles_handler, list_random_aliases_handler,
    list_users_handler, premium_countries_handler, subdomain_availability_handler,
    update_alias_handler, update_domain_alias_handler, update_profile_handler,
    update_random_alias_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /profiles`                    - Caller's profiles
/// - `PATCH  /profiles/{id}`               - Claim a subdomain
/// - `GET    /profiles/subdomain`          - Subdomain availability
/// - `GET    /users`                       - The caller
/// - `GET    /relayaddresses`              - List random aliases
/// - `POST   /relayaddresses`              - Create a random alias
/// - `PATCH  /relayaddresses/{id}`         - Update a random alias
/// - `DELETE /relayaddresses/{id}`         - Delete a random alias
/// - `GET    /domainaddresses`             - List custom aliases
/// - `POST   /domainaddresses`             - Create a custom alias
/// - `PATCH  /domainaddresses/{id}`        - Update a custom alias
/// - `DELETE /domainaddresses/{id}`        - Delete a custom alias
/// - `PATCH  /aliases/{kind}/{id}`         - Update either kind
/// - `DELETE /aliases/{kind}/{id}`         - Delete either kind
/// - `GET    /premium_countries`           - Premium availability for the caller
/// - `GET    /dashboard`                   - Composed dashboard view
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/profiles", get(list_profiles_handler))
        .route("/profiles/subdomain", get(subdomain_availability_handler))
        .route("/profiles/{id}", patch(update_profile_handler))
        .route("/users", get(list_users_handler))
        .route(
            "/relayaddresses",
            get(list_random_aliases_handler).post(create_random_alias_handler),
        )
        .route(
            "/relayaddresses/{id}",
            patch(update_random_alias_handler).delete(delete_random_alias_handler),
        )
        .route(
            "/domainaddresses",
            get(list_domain_aliases_handler).post(create_domain_alias_handler),
        )
        .route(
            "/domainaddresses/{id}",
            patch(update_domain_alias_handler).delete(delete_domain_alias_handler),
        )
        .route(
            "/aliases/{kind}/{id}",
            patch(update_alias_handler).delete(delete_alias_handler),
        )
        .route("/premium_countries", get(premium_countries_handler))
        .route("/dashboard", get(dashboard_handler))
}
