//! Login and logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::state::AppState;
use crate::web::middleware::web_auth::AUTH_COOKIE;

/// Template for the login page.
///
/// Renders `templates/login.html` with a token input form.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /dashboard/login`
pub async fn login_handler() -> impl IntoResponse {
    LoginTemplate { error: None }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub token: String,
}

/// Validates the submitted API token and stores it in the session cookie.
///
/// # Endpoint
///
/// `POST /dashboard/login`
pub async fn login_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    let token = form.token.trim();

    match state.auth_service.authenticate(token).await {
        Ok(user_id) => {
            tracing::info!(user_id, "Dashboard login");
            let cookie = format!("{AUTH_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/dashboard");
            ([(SET_COOKIE, cookie)], Redirect::to("/dashboard")).into_response()
        }
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            LoginTemplate {
                error: Some("Invalid or revoked token".to_string()),
            },
        )
            .into_response(),
    }
}

/// Clears the session cookie.
///
/// # Endpoint
///
/// `GET /dashboard/logout`
pub async fn logout_handler() -> impl IntoResponse {
    let cookie = format!("{AUTH_COOKIE}=; HttpOnly; SameSite=Lax; Path=/dashboard; Max-Age=0");
    ([(SET_COOKIE, cookie)], Redirect::to("/dashboard/login"))
}
