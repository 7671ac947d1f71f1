//! Handler for the composed dashboard view.

use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::api::dto::dashboard::LoadingResponse;
use crate::api::middleware::auth::AuthUser;
use crate::domain::loadable::Loadable;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_country::extract_country;

/// Returns the composed dashboard model.
///
/// # Endpoint
///
/// `GET /api/dashboard`
///
/// # Response Codes
///
/// - **200 OK**: all sources resolved; body is the full view
/// - **202 Accepted**: a source missed its deadline; body is `{"status": "loading"}`
/// - error status of the first failing source otherwise
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let country = extract_country(&headers, &state.default_country);

    match state.dashboard_service.load(auth.user_id, &country).await {
        Loadable::Ready(view) => Ok(Json(view).into_response()),
        Loadable::Loading => Ok((StatusCode::ACCEPTED, Json(LoadingResponse::new())).into_response()),
        Loadable::Failed(e) => Err(e),
    }
}
