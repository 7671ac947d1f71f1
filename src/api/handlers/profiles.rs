//! Handlers for profile endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::api::dto::profile::{ProfileResponse, SubdomainQuery, UpdateProfileRequest};
use crate::api::middleware::auth::AuthUser;
use crate::application::services::SubdomainAvailability;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's profiles.
///
/// # Endpoint
///
/// `GET /api/profiles`
pub async fn list_profiles_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<ProfileResponse>>, AppError> {
    let profiles = state.profile_service.list_profiles(auth.user_id).await?;

    Ok(Json(profiles.into_iter().map(ProfileResponse::from).collect()))
}

/// Claims a custom subdomain.
///
/// # Endpoint
///
/// `PATCH /api/profiles/{id}`
///
/// # Request Body
///
/// ```json
/// { "subdomain": "coolname" }
/// ```
///
/// # Errors
///
/// - 400 if the subdomain is malformed or reserved
/// - 403 if the profile is not premium
/// - 404 if the profile does not belong to the caller
/// - 409 if the profile already has a subdomain or the name is taken
pub async fn update_profile_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    payload.validate()?;

    let profile = state
        .profile_service
        .set_subdomain(auth.user_id, id, &payload.subdomain)
        .await?;

    Ok(Json(profile.into()))
}

/// Checks whether a subdomain can still be claimed.
///
/// # Endpoint
///
/// `GET /api/profiles/subdomain?subdomain=coolname`
///
/// # Response
///
/// ```json
/// { "subdomain": "coolname", "available": true }
/// ```
pub async fn subdomain_availability_handler(
    State(state): State<AppState>,
    Query(query): Query<SubdomainQuery>,
) -> Result<Json<SubdomainAvailability>, AppError> {
    query.validate()?;

    Ok(Json(
        state.profile_service.check_subdomain(&query.subdomain).await?,
    ))
}
