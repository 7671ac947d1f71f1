mod common;

use axum::http::StatusCode;
use common::bearer;
use serde_json::json;

#[tokio::test]
async fn test_list_profiles() {
    let app = common::spawn_app(true, Some("coolname"));

    let body = app
        .server
        .get("/api/profiles")
        .add_header("Authorization", bearer())
        .await
        .json::<serde_json::Value>();

    assert_eq!(body[0]["id"], app.profile_id);
    assert_eq!(body[0]["has_premium"], true);
    assert_eq!(body[0]["subdomain"], "coolname");
}

#[tokio::test]
async fn test_list_users_returns_caller_only() {
    let app = common::spawn_app(false, None);
    app.store.seed_user("other@example.com", false, None);

    let body = app
        .server
        .get("/api/users")
        .add_header("Authorization", bearer())
        .await
        .json::<serde_json::Value>();

    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["email"], common::EMAIL);
}

#[tokio::test]
async fn test_claim_subdomain() {
    let app = common::spawn_app(true, None);

    let response = app
        .server
        .patch(&format!("/api/profiles/{}", app.profile_id))
        .add_header("Authorization", bearer())
        .json(&json!({ "subdomain": "  CoolName " }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["subdomain"], "coolname");
    assert_eq!(
        app.store.profile(app.profile_id).unwrap().subdomain.as_deref(),
        Some("coolname")
    );
}

#[tokio::test]
async fn test_claim_subdomain_requires_premium() {
    let app = common::spawn_app(false, None);

    app.server
        .patch(&format!("/api/profiles/{}", app.profile_id))
        .add_header("Authorization", bearer())
        .json(&json!({ "subdomain": "coolname" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_claim_subdomain_only_once() {
    let app = common::spawn_app(true, Some("first"));

    app.server
        .patch(&format!("/api/profiles/{}", app.profile_id))
        .add_header("Authorization", bearer())
        .json(&json!({ "subdomain": "second" }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_claim_taken_subdomain() {
    let app = common::spawn_app(true, None);
    app.store.seed_user("other@example.com", true, Some("coolname"));

    app.server
        .patch(&format!("/api/profiles/{}", app.profile_id))
        .add_header("Authorization", bearer())
        .json(&json!({ "subdomain": "coolname" }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_claim_reserved_subdomain() {
    let app = common::spawn_app(true, None);

    let response = app
        .server
        .patch(&format!("/api/profiles/{}", app.profile_id))
        .add_header("Authorization", bearer())
        .json(&json!({ "subdomain": "www" }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_claim_other_users_profile_is_not_found() {
    let app = common::spawn_app(true, None);
    let (_, other_profile) = app.store.seed_user("other@example.com", true, None);

    app.server
        .patch(&format!("/api/profiles/{other_profile}"))
        .add_header("Authorization", bearer())
        .json(&json!({ "subdomain": "coolname" }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_subdomain_availability() {
    let app = common::spawn_app(true, None);
    app.store.seed_user("other@example.com", true, Some("taken"));

    let taken = app
        .server
        .get("/api/profiles/subdomain")
        .add_query_param("subdomain", "taken")
        .add_header("Authorization", bearer())
        .await
        .json::<serde_json::Value>();
    assert_eq!(taken["available"], false);

    let free = app
        .server
        .get("/api/profiles/subdomain")
        .add_query_param("subdomain", "Fresh")
        .add_header("Authorization", bearer())
        .await
        .json::<serde_json::Value>();
    assert_eq!(free["subdomain"], "fresh");
    assert_eq!(free["available"], true);
}
