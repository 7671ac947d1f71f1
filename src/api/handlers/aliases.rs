//! Handlers for alias endpoints.
//!
//! Random aliases live under `/api/relayaddresses`, custom aliases under
//! `/api/domainaddresses`. `/api/aliases/{kind}/{id}` accepts either kind and
//! routes by the path's `kind` segment.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::alias::{
    AliasResponse, CreateDomainAliasRequest, CreateRandomAliasRequest, UpdateAliasRequest,
};
use crate::api::middleware::auth::AuthUser;
use crate::domain::entities::{Alias, AliasKind, AliasRef};
use crate::error::AppError;
use crate::state::AppState;

async fn subdomain_of(state: &AppState, user_id: i64) -> Result<Option<String>, AppError> {
    Ok(state.profile_service.primary_profile(user_id).await?.subdomain)
}

fn respond(state: &AppState, alias: Alias, subdomain: Option<&str>) -> AliasResponse {
    AliasResponse::new(alias, &state.mail_domain, subdomain)
}

/// `GET /api/relayaddresses`
pub async fn list_random_aliases_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<AliasResponse>>, AppError> {
    let aliases = state.alias_service.list_random(auth.user_id).await?;

    Ok(Json(
        aliases
            .into_iter()
            .map(|alias| respond(&state, alias.into(), None))
            .collect(),
    ))
}

/// Creates a random alias.
///
/// # Endpoint
///
/// `POST /api/relayaddresses`
///
/// # Errors
///
/// - 403 if a free profile reached its alias limit
/// - 429 if the daily creation limit is reached
pub async fn create_random_alias_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Option<Json<CreateRandomAliasRequest>>,
) -> Result<(StatusCode, Json<AliasResponse>), AppError> {
    let Json(payload) = payload.unwrap_or_default();
    payload.validate()?;

    let alias = state
        .alias_service
        .create_random(auth.user_id, payload.description)
        .await?;

    Ok((StatusCode::CREATED, Json(respond(&state, alias.into(), None))))
}

/// `GET /api/domainaddresses`
pub async fn list_domain_aliases_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<AliasResponse>>, AppError> {
    let (aliases, subdomain) = tokio::try_join!(
        state.alias_service.list_custom(auth.user_id),
        subdomain_of(&state, auth.user_id),
    )?;

    Ok(Json(
        aliases
            .into_iter()
            .map(|alias| respond(&state, alias.into(), subdomain.as_deref()))
            .collect(),
    ))
}

/// Creates a custom alias under the caller's subdomain.
///
/// # Endpoint
///
/// `POST /api/domainaddresses`
///
/// # Request Body
///
/// ```json
/// { "address": "shop", "description": "Online shopping" }
/// ```
///
/// # Errors
///
/// - 400 if the address is malformed
/// - 403 without premium or subdomain
/// - 409 if the address already exists
pub async fn create_domain_alias_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateDomainAliasRequest>,
) -> Result<(StatusCode, Json<AliasResponse>), AppError> {
    payload.validate()?;

    let alias = state
        .alias_service
        .create_custom(auth.user_id, &payload.address, payload.description)
        .await?;
    let subdomain = subdomain_of(&state, auth.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(respond(&state, alias.into(), subdomain.as_deref())),
    ))
}

/// Updates an alias of the given kind.
///
/// # Endpoints
///
/// - `PATCH /api/aliases/{kind}/{id}`
/// - `PATCH /api/relayaddresses/{id}` and `PATCH /api/domainaddresses/{id}`
///   (see [`update_random_alias_handler`], [`update_domain_alias_handler`])
///
/// # Request Body
///
/// ```json
/// { "enabled": false, "description": null }
/// ```
pub async fn update_alias_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((kind, id)): Path<(AliasKind, i64)>,
    Json(payload): Json<UpdateAliasRequest>,
) -> Result<Json<AliasResponse>, AppError> {
    update(state, auth, AliasRef { kind, id }, payload).await
}

/// Deletes an alias of the given kind.
///
/// # Endpoint
///
/// `DELETE /api/aliases/{kind}/{id}`
pub async fn delete_alias_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((kind, id)): Path<(AliasKind, i64)>,
) -> Result<StatusCode, AppError> {
    delete(state, auth, AliasRef { kind, id }).await
}

/// `PATCH /api/relayaddresses/{id}`
pub async fn update_random_alias_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAliasRequest>,
) -> Result<Json<AliasResponse>, AppError> {
    update(state, auth, AliasRef::random(id), payload).await
}

/// `DELETE /api/relayaddresses/{id}`
pub async fn delete_random_alias_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    delete(state, auth, AliasRef::random(id)).await
}

/// `PATCH /api/domainaddresses/{id}`
pub async fn update_domain_alias_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAliasRequest>,
) -> Result<Json<AliasResponse>, AppError> {
    update(state, auth, AliasRef::custom(id), payload).await
}

/// `DELETE /api/domainaddresses/{id}`
pub async fn delete_domain_alias_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    delete(state, auth, AliasRef::custom(id)).await
}

async fn update(
    state: AppState,
    auth: AuthUser,
    alias_ref: AliasRef,
    payload: UpdateAliasRequest,
) -> Result<Json<AliasResponse>, AppError> {
    payload.validate()?;
    let patch = payload.into_patch();

    let alias = state
        .alias_service
        .update(auth.user_id, alias_ref, patch)
        .await?;

    let subdomain = match alias_ref.kind {
        AliasKind::Random => None,
        AliasKind::Custom => subdomain_of(&state, auth.user_id).await?,
    };

    Ok(Json(respond(&state, alias, subdomain.as_deref())))
}

async fn delete(state: AppState, auth: AuthUser, alias_ref: AliasRef) -> Result<StatusCode, AppError> {
    state.alias_service.delete(auth.user_id, alias_ref).await?;

    Ok(StatusCode::NO_CONTENT)
}
