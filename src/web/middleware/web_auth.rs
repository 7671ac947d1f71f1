//! Cookie-based authentication middleware for web dashboard.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::{Redirect, Response},
};

use crate::api::middleware::auth::AuthUser;
use crate::state::AppState;

/// Name of the session cookie holding the raw API token.
pub const AUTH_COOKIE: &str = "auth_token";

/// Reads the `auth_token` cookie value, if present.
///
/// Handles multiple cookies in one `Cookie` header and ignores the others.
pub fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == AUTH_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
}

/// Authenticates dashboard requests using cookie-based tokens.
///
/// # Cookie Format
///
/// ```text
/// Cookie: auth_token=<token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract `auth_token` cookie from request
/// 2. Validate token via [`crate::application::services::AuthService`]
/// 3. On success, insert [`AuthUser`] and continue to handler
/// 4. On failure or missing token, redirect to `/dashboard/login`
///
/// Unlike the API auth middleware which returns `401 Unauthorized`, this
/// middleware redirects to the login page.
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let Some(token) = token_from_cookies(req.headers()) else {
        return Err(Redirect::to("/dashboard/login"));
    };

    match st.auth_service.authenticate(&token).await {
        Ok(user_id) => {
            req.extensions_mut().insert(AuthUser { user_id });
            Ok(next.run(req).await)
        }
        Err(_) => Err(Redirect::to("/dashboard/login")),
    }
}
