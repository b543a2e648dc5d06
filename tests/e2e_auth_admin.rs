// tests/e2e_auth_admin.rs
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use std::sync::Arc;

mod support;

use support::{ADMIN_PASSWORD, CLERK_PASSWORD, RecordingPublisher, read_json, spawn_app};

#[tokio::test]
async fn login_issues_a_token_that_authenticates() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"username": "clerk", "password": CLERK_PASSWORD}).to_string(),
        ))
        .unwrap();
    let (status, body) = read_json(app.send(request).await).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["username"], "clerk");
    let token = body["token"]["token"].as_str().expect("token").to_string();

    let (status, profile) = app.get("/api/v1/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["user"]["username"], "clerk");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"username": "admin", "password": format!("{ADMIN_PASSWORD}x")}).to_string(),
        ))
        .unwrap();
    let (status, body) = read_json(app.send(request).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn tokens_for_unknown_users_are_rejected() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, _) = app.get("/api/v1/auth/me", "user:999:ghost").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sync_is_superuser_only_and_idempotent() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, _) = app
        .send_json("POST", "/api/v1/admin/sync-config", &app.clerk_token, json!({}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, report) = app
        .send_json("POST", "/api/v1/admin/sync-config", &app.admin_token, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        report,
        json!({"apps_added": [], "models_added": [], "fields_added": [], "actions_added": []})
    );
}

#[tokio::test]
async fn configuration_patches_validate_targets() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, _) = app
        .send_json(
            "PATCH",
            "/api/v1/admin/models/9999",
            &app.admin_token,
            json!({"enable_search": false}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let part = app.model_id("inventory", "Part").await;
    let (status, _) = app
        .send_json(
            "PATCH",
            &format!("/api/v1/admin/models/{part}"),
            &app.clerk_token,
            json!({"enable_search": false}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send_json(
            "PATCH",
            &format!("/api/v1/admin/models/{part}"),
            &app.admin_token,
            json!({"read_permission": {"users": [0], "groups": []}}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = app
        .send_json(
            "PATCH",
            &format!("/api/v1/admin/models/{part}"),
            &app.admin_token,
            json!({"enable_search": false}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["enable_search"], false);

    let field = app.field_id("inventory", "Part", "description").await;
    let (status, updated) = app
        .send_json(
            "PATCH",
            &format!("/api/v1/admin/fields/{field}"),
            &app.admin_token,
            json!({"display_name": "Notes", "enable_in_list": false}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["display_name"], "Notes");

    let (_, detail) = app
        .get("/api/v1/apps/inventory/models/Part/fields?view=detail", &app.admin_token)
        .await;
    let notes = detail
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "description")
        .cloned()
        .unwrap();
    assert_eq!(notes["label"], "Notes");
    let (_, list) = app
        .get("/api/v1/apps/inventory/models/Part/fields?view=list", &app.admin_token)
        .await;
    assert!(list.as_array().unwrap().iter().all(|f| f["name"] != "description"));
}

#[tokio::test]
async fn model_list_settings_can_be_patched() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let records = support::records_uri("inventory", "Part");
    for name in ["Anchor", "Bracket", "Clamp"] {
        let (status, _) = app
            .send_json("POST", &records, &app.admin_token, json!({"values": {"name": name}}))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let part = app.model_id("inventory", "Part").await;
    let uri = format!("/api/v1/admin/models/{part}");

    for invalid in [json!({"default_sort_by": "-colour"}), json!({"list_title": "  "})] {
        let (status, _) = app.send_json("PATCH", &uri, &app.admin_token, invalid).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, updated) = app
        .send_json(
            "PATCH",
            &uri,
            &app.admin_token,
            json!({
                "list_title": "Stock on hand",
                "default_sort_by": "-name",
                "enable_list_report": false
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["default_sort_by"], "-name");
    assert_eq!(updated["enable_list_report"], false);
    assert_eq!(updated["enable_detail_report"], true);

    let (_, list) = app.get(&records, &app.admin_token).await;
    assert_eq!(list["title"], "Stock on hand");
    assert_eq!(list["page"]["items"][0]["values"]["name"], "Clamp");

    let (status, _) = app
        .send_json(
            "POST",
            "/api/v1/apps/inventory/models/Part/report",
            &app.admin_token,
            json!({"kind": "list"}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
