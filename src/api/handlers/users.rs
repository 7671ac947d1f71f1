//! Handler for the user endpoint.

use axum::{Extension, Json, extract::State};

use crate::api::dto::user::UserResponse;
use crate::api::middleware::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the users visible to the caller (the caller only).
///
/// # Endpoint
///
/// `GET /api/users`
pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.list_users(auth.user_id).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
