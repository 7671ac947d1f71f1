//! Profile dashboard page and its form actions.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use validator::Validate;

use crate::api::dto::alias::{CreateDomainAliasRequest, UpdateAliasRequest};
use crate::api::middleware::auth::AuthUser;
use crate::application::l10n::Localizer;
use crate::application::services::{DashboardView, Notification};
use crate::domain::entities::{AliasKind, AliasRef, BillingPeriod};
use crate::domain::loadable::Loadable;
use crate::domain::upgrade_event::UpgradeClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_country::extract_country;

/// Template for the dashboard page.
///
/// Renders `templates/dashboard.html`: header (premium stats or greeting),
/// upgrade banner, subdomain form, merged alias list.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub view: DashboardView,
    pub notification: Option<Notification>,
    pub l10n: Arc<Localizer>,
}

/// Placeholder shown while a source is pending or after one failed.
#[derive(Template, WebTemplate)]
#[template(path = "loading.html")]
pub struct LoadingTemplate {
    pub message: String,
    pub failed: bool,
}

async fn render(
    state: &AppState,
    user_id: i64,
    headers: &HeaderMap,
    notification: Option<Notification>,
) -> Response {
    let country = extract_country(headers, &state.default_country);
    let l10n = state.dashboard_service.localizer();

    match state.dashboard_service.load(user_id, &country).await {
        Loadable::Ready(view) => DashboardTemplate {
            view,
            notification,
            l10n,
        }
        .into_response(),
        Loadable::Loading => LoadingTemplate {
            message: l10n.get("profile-label-loading"),
            failed: false,
        }
        .into_response(),
        Loadable::Failed(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            LoadingTemplate {
                message: l10n.get("profile-label-load-failed"),
                failed: true,
            },
        )
            .into_response(),
    }
}

/// Renders the dashboard.
///
/// # Endpoint
///
/// `GET /dashboard`
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    headers: HeaderMap,
) -> Response {
    render(&state, auth.user_id, &headers, None).await
}

#[derive(Debug, Deserialize)]
pub struct SubdomainForm {
    pub profile_id: i64,
    pub subdomain: String,
}

/// Claims a subdomain and re-renders the dashboard.
///
/// A success toast is shown exactly once, on the response to this request.
/// Failures render the dashboard without a toast.
///
/// # Endpoint
///
/// `POST /dashboard/subdomain`
pub async fn set_subdomain_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    headers: HeaderMap,
    Form(form): Form<SubdomainForm>,
) -> Response {
    let notification = state
        .dashboard_service
        .set_custom_subdomain(auth.user_id, form.profile_id, &form.subdomain)
        .await;

    render(&state, auth.user_id, &headers, notification).await
}

/// Generates a new random alias.
///
/// # Endpoint
///
/// `POST /dashboard/aliases`
pub async fn create_alias_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Redirect, AppError> {
    state.dashboard_service.create_alias(auth.user_id).await?;

    Ok(Redirect::to("/dashboard"))
}

#[derive(Debug, Deserialize)]
pub struct CustomAliasForm {
    pub address: String,
    #[serde(default)]
    pub description: String,
}

/// Creates a custom alias under the profile subdomain.
///
/// # Endpoint
///
/// `POST /dashboard/aliases/custom`
///
/// # Errors
///
/// - 400 if the address is malformed
/// - 403 without premium or subdomain
/// - 409 if the address already exists
pub async fn create_custom_alias_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Form(form): Form<CustomAliasForm>,
) -> Result<Redirect, AppError> {
    let request = CreateDomainAliasRequest {
        address: form.address,
        description: Some(form.description.trim().to_string()).filter(|d| !d.is_empty()),
    };
    request.validate()?;

    state
        .dashboard_service
        .create_custom_alias(auth.user_id, &request.address, request.description)
        .await?;

    Ok(Redirect::to("/dashboard"))
}

/// Alias edit form. Each rendered form submits one field; an empty
/// description clears it.
#[derive(Debug, Deserialize)]
pub struct AliasForm {
    pub enabled: Option<bool>,
    pub description: Option<String>,
}

/// Updates an alias of either kind.
///
/// # Endpoint
///
/// `POST /dashboard/aliases/{kind}/{id}`
pub async fn update_alias_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((kind, id)): Path<(AliasKind, i64)>,
    Form(form): Form<AliasForm>,
) -> Result<Redirect, AppError> {
    let request = UpdateAliasRequest {
        enabled: form.enabled,
        description: form.description.map(|d| {
            let d = d.trim();
            (!d.is_empty()).then(|| d.to_string())
        }),
        block_list_emails: None,
    };
    request.validate()?;

    state
        .dashboard_service
        .update_alias(auth.user_id, AliasRef { kind, id }, request.into_patch())
        .await?;

    Ok(Redirect::to("/dashboard"))
}

/// Deletes an alias of either kind.
///
/// # Endpoint
///
/// `POST /dashboard/aliases/{kind}/{id}/delete`
pub async fn delete_alias_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((kind, id)): Path<(AliasKind, i64)>,
) -> Result<Redirect, AppError> {
    state
        .dashboard_service
        .delete_alias(auth.user_id, AliasRef { kind, id })
        .await?;

    Ok(Redirect::to("/dashboard"))
}

#[derive(Debug, Deserialize)]
pub struct UpgradeQuery {
    #[serde(default)]
    pub period: BillingPeriod,
}

/// Records an upgrade click and redirects to checkout.
///
/// The click is queued for the background worker; a full queue drops it.
/// Users who cannot see the banner are sent back to the dashboard.
///
/// # Endpoint
///
/// `GET /dashboard/upgrade?period=monthly`
pub async fn upgrade_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    headers: HeaderMap,
    Query(query): Query<UpgradeQuery>,
) -> Result<Redirect, AppError> {
    let country = extract_country(&headers, &state.default_country);

    let Some(link) = state
        .dashboard_service
        .upgrade_link(auth.user_id, &country, query.period)
        .await?
    else {
        return Ok(Redirect::to("/dashboard"));
    };

    metrics::counter!("upgrade_clicks_total", "period" => query.period.as_str()).increment(1);

    let event = UpgradeClickEvent::new(auth.user_id, country, query.period);
    if let Err(e) = state.upgrade_sender.try_send(event) {
        metrics::counter!("upgrade_clicks_dropped_total").increment(1);
        tracing::warn!(user_id = auth.user_id, error = %e, "Upgrade click dropped");
    }

    Ok(Redirect::to(&link))
}
