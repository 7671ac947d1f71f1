mod common;

use axum::http::StatusCode;
use common::bearer;
use serde_json::json;

#[tokio::test]
async fn test_create_random_alias() {
    let app = common::spawn_app(false, None);

    let response = app
        .server
        .post("/api/relayaddresses")
        .add_header("Authorization", bearer())
        .json(&json!({ "description": "Newsletters" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["kind"], "random");
    assert_eq!(body["description"], "Newsletters");
    assert!(body["full_address"].as_str().unwrap().ends_with("@mozmail.com"));

    assert_eq!(app.store.random_aliases().len(), 1);
}

#[tokio::test]
async fn test_create_random_alias_without_body() {
    let app = common::spawn_app(false, None);

    app.server
        .post("/api/relayaddresses")
        .add_header("Authorization", bearer())
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_free_user_alias_limit() {
    let app = common::spawn_app(false, None);
    for i in 0..5 {
        app.store.seed_random(app.user_id, &format!("addr{i}"), 0, 0);
    }

    app.server
        .post("/api/relayaddresses")
        .add_header("Authorization", bearer())
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_custom_alias_requires_subdomain() {
    let app = common::spawn_app(true, None);

    app.server
        .post("/api/domainaddresses")
        .add_header("Authorization", bearer())
        .json(&json!({ "address": "shop" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_custom_alias() {
    let app = common::spawn_app(true, Some("coolname"));

    let response = app
        .server
        .post("/api/domainaddresses")
        .add_header("Authorization", bearer())
        .json(&json!({ "address": "Shop" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["kind"], "custom");
    assert_eq!(body["address"], "shop");
    assert_eq!(body["full_address"], "shop@coolname.mozmail.com");

    // Same address again conflicts.
    app.server
        .post("/api/domainaddresses")
        .add_header("Authorization", bearer())
        .json(&json!({ "address": "shop" }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_routes_random_kind_to_random_collection() {
    let app = common::spawn_app(true, Some("coolname"));
    // Both collections number from 1, so the ids collide.
    let random_id = app.store.seed_random(app.user_id, "aaa111", 0, 0);
    app.store.seed_custom(app.user_id, "shop", 0, 0);

    let response = app
        .server
        .patch(&format!("/api/aliases/random/{random_id}"))
        .add_header("Authorization", bearer())
        .json(&json!({ "enabled": false }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["enabled"], false);

    assert!(!app.store.random_aliases()[0].enabled);
    assert!(app.store.custom_aliases()[0].enabled);
}

#[tokio::test]
async fn test_update_routes_custom_kind_to_custom_collection() {
    let app = common::spawn_app(true, Some("coolname"));
    app.store.seed_random(app.user_id, "aaa111", 0, 0);
    let custom_id = app.store.seed_custom(app.user_id, "shop", 0, 0);

    app.server
        .patch(&format!("/api/aliases/custom/{custom_id}"))
        .add_header("Authorization", bearer())
        .json(&json!({ "description": "Shopping" }))
        .await
        .assert_status_ok();

    assert_eq!(app.store.custom_aliases()[0].description, "Shopping");
    assert_eq!(app.store.random_aliases()[0].description, "");
}

#[tokio::test]
async fn test_update_wrong_kind_is_not_found() {
    let app = common::spawn_app(true, Some("coolname"));
    let custom_id = app.store.seed_custom(app.user_id, "shop", 0, 0);

    app.server
        .patch(&format!("/api/aliases/random/{custom_id}"))
        .add_header("Authorization", bearer())
        .json(&json!({ "enabled": false }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_update_unknown_kind_is_rejected() {
    let app = common::spawn_app(true, None);

    let response = app
        .server
        .patch("/api/aliases/other/1")
        .add_header("Authorization", bearer())
        .json(&json!({ "enabled": false }))
        .await;

    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_update_empty_patch_is_bad_request() {
    let app = common::spawn_app(false, None);
    let id = app.store.seed_random(app.user_id, "aaa111", 0, 0);

    app.server
        .patch(&format!("/api/relayaddresses/{id}"))
        .add_header("Authorization", bearer())
        .json(&json!({}))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_update_description_null_clears_it() {
    let app = common::spawn_app(false, None);
    let id = app.store.seed_random(app.user_id, "aaa111", 0, 0);

    app.server
        .patch(&format!("/api/relayaddresses/{id}"))
        .add_header("Authorization", bearer())
        .json(&json!({ "description": "Temp" }))
        .await
        .assert_status_ok();

    let body = app
        .server
        .patch(&format!("/api/relayaddresses/{id}"))
        .add_header("Authorization", bearer())
        .json(&json!({ "description": null }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(body["description"], "");
}

#[tokio::test]
async fn test_update_description_too_long() {
    let app = common::spawn_app(false, None);
    let id = app.store.seed_random(app.user_id, "aaa111", 0, 0);

    let response = app
        .server
        .patch(&format!("/api/relayaddresses/{id}"))
        .add_header("Authorization", bearer())
        .json(&json!({ "description": "x".repeat(65) }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<serde_json::Value>();
    assert!(body["error"]["details"]["description"].is_array());
    assert_eq!(app.store.random_aliases()[0].description, "");
}

#[tokio::test]
async fn test_block_list_requires_premium() {
    let app = common::spawn_app(false, None);
    let id = app.store.seed_random(app.user_id, "aaa111", 0, 0);

    app.server
        .patch(&format!("/api/relayaddresses/{id}"))
        .add_header("Authorization", bearer())
        .json(&json!({ "block_list_emails": true }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_routes_by_kind() {
    let app = common::spawn_app(true, Some("coolname"));
    let random_id = app.store.seed_random(app.user_id, "aaa111", 0, 0);
    let custom_id = app.store.seed_custom(app.user_id, "shop", 0, 0);

    app.server
        .delete(&format!("/api/aliases/custom/{custom_id}"))
        .add_header("Authorization", bearer())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert!(app.store.custom_aliases().is_empty());
    assert_eq!(app.store.random_aliases().len(), 1);

    app.server
        .delete(&format!("/api/relayaddresses/{random_id}"))
        .add_header("Authorization", bearer())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert!(app.store.random_aliases().is_empty());
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let app = common::spawn_app(false, None);
    let id = app.store.seed_random(app.user_id, "aaa111", 0, 0);

    app.server
        .delete(&format!("/api/aliases/random/{id}"))
        .add_header("Authorization", bearer())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .delete(&format!("/api/aliases/random/{id}"))
        .add_header("Authorization", bearer())
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_cannot_touch_other_users_alias() {
    let app = common::spawn_app(false, None);
    let (other_user, _) = app.store.seed_user("other@example.com", false, None);
    let id = app.store.seed_random(other_user, "theirs1", 0, 0);

    app.server
        .delete(&format!("/api/aliases/random/{id}"))
        .add_header("Authorization", bearer())
        .await
        .assert_status_not_found();

    assert_eq!(app.store.random_aliases().len(), 1);
}

#[tokio::test]
async fn test_list_domain_aliases_uses_subdomain() {
    let app = common::spawn_app(true, Some("coolname"));
    app.store.seed_custom(app.user_id, "shop", 0, 0);
    app.store.seed_random(app.user_id, "aaa111", 0, 0);

    let body = app
        .server
        .get("/api/domainaddresses")
        .add_header("Authorization", bearer())
        .await
        .json::<serde_json::Value>();

    let aliases = body.as_array().unwrap();
    assert_eq!(aliases.len(), 1);
    assert_eq!(aliases[0]["full_address"], "shop@coolname.mozmail.com");
}
