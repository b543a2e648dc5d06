// tests/e2e_scaffold.rs
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;

mod support;

use frame_admin::domain::configuration::ViewType;
use support::{RecordingPublisher, read_json, spawn_app};

fn names(fields: &Value) -> Vec<String> {
    fields
        .as_array()
        .expect("field array")
        .iter()
        .map(|f| f["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn health_is_public() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = read_json(app.send(request).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn scaffold_requires_a_bearer_token() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let request = Request::builder()
        .uri("/api/v1/navigation")
        .body(Body::empty())
        .unwrap();
    let (status, body) = read_json(app.send(request).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = app.get("/api/v1/navigation", "bogus").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn navigation_lists_navigable_models_per_app() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, body) = app.get("/api/v1/navigation", &app.clerk_token).await;
    assert_eq!(status, StatusCode::OK);

    let labels: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
    assert_eq!(labels, ["frame", "inventory"]);
    assert_eq!(
        body["inventory"]["models"][0],
        json!({"name": "Part", "plural": "parts", "url": "part-list"})
    );
    assert_eq!(body["inventory"]["models"][1]["url"], "partvendor-list");
}

#[tokio::test]
async fn apps_without_navigable_models_are_omitted() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let log_model = app.model_id("frame", "LogMessage").await;
    let (status, _) = app
        .send_json(
            "PATCH",
            &format!("/api/v1/admin/models/{log_model}"),
            &app.admin_token,
            json!({"navigation": false}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/v1/navigation", &app.admin_token).await;
    assert!(body.get("frame").is_none());
    assert!(body.get("inventory").is_some());
}

#[tokio::test]
async fn superuser_sees_every_enabled_field_without_the_delete_marker() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let uri = "/api/v1/apps/inventory/models/Part/fields?view=list&computed=true";
    let (status, body) = app.get(uri, &app.admin_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        names(&body),
        [
            "created_at",
            "updated_at",
            "name",
            "description",
            "price",
            "stock_quantity",
            "category",
            "stock_value"
        ]
    );
    let computed = body.as_array().unwrap().last().unwrap();
    assert_eq!(computed["computed"], true);

    let (_, form) = app
        .get("/api/v1/apps/inventory/models/Part/fields?view=form&computed=true", &app.admin_token)
        .await;
    assert_eq!(
        names(&form),
        ["name", "description", "price", "stock_quantity", "category"]
    );
}

#[tokio::test]
async fn inherited_field_permissions_follow_the_model() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let uri = "/api/v1/apps/inventory/models/Part/fields?view=detail";

    let (_, before) = app.get(uri, &app.clerk_token).await;
    assert!(names(&before).is_empty());

    app.grant_clerks("inventory", "Part").await;
    let (_, after) = app.get(uri, &app.clerk_token).await;
    assert!(names(&after).contains(&"name".to_string()));
}

#[tokio::test]
async fn field_specific_grants_hide_a_single_column() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    app.grant_clerks("inventory", "Part").await;

    let price = app.field_id("inventory", "Part", "price").await;
    let (status, body) = app
        .send_json(
            "PATCH",
            &format!("/api/v1/admin/fields/{price}"),
            &app.admin_token,
            json!({
                "inherit_permissions": false,
                "read_permission": {"users": [], "groups": []},
                "write_permission": {"users": [], "groups": []}
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["inherit_permissions"], false);

    let (_, clerk_view) = app
        .get("/api/v1/apps/inventory/models/Part/fields?view=list", &app.clerk_token)
        .await;
    assert!(!names(&clerk_view).contains(&"price".to_string()));
    let (_, admin_view) = app
        .get("/api/v1/apps/inventory/models/Part/fields?view=list", &app.admin_token)
        .await;
    assert!(names(&admin_view).contains(&"price".to_string()));
}

#[tokio::test]
async fn unknown_models_resolve_to_nothing() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, body) = app
        .get("/api/v1/apps/inventory/models/Gadget/fields?view=list", &app.admin_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = app
        .get("/api/v1/apps/inventory/models/Part/fields?view=sideways", &app.admin_token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_actions_put_delete_in_the_dropdown() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, body) = app
        .get("/api/v1/apps/inventory/models/Part/actions?view=list", &app.clerk_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let dropdown: Vec<_> = body["dropdown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap().to_string())
        .collect();
    assert!(dropdown.contains(&"Delete".to_string()));
    assert!(body["button"].as_array().is_some());

    let (status, detail) = app
        .get("/api/v1/apps/inventory/models/Part/actions?view=detail", &app.clerk_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(detail.as_array().is_some_and(|links| !links.is_empty()));
}

#[tokio::test]
async fn form_schema_follows_write_permissions() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, form) = app
        .get("/api/v1/apps/inventory/models/Part/form", &app.admin_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["model"], "Part");
    let name = &form["fields"][0];
    assert_eq!(name["name"], "name");
    assert_eq!(name["required"], true);
    let category = form["fields"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "category")
        .cloned()
        .unwrap();
    assert_eq!(
        category["choices"],
        json!(["hardware", "electrical", "consumable", "tooling"])
    );

    let (_, clerk_form) = app
        .get("/api/v1/apps/inventory/models/Part/form", &app.clerk_token)
        .await;
    assert_eq!(clerk_form["fields"], json!([]));
}

#[tokio::test]
async fn formsets_describe_inline_children() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, body) = app
        .get("/api/v1/apps/inventory/models/Part/formsets", &app.admin_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let formset = &body[0];
    assert_eq!(formset["parent"], "Part");
    assert_eq!(formset["child"], "PartVendor");
    assert_eq!(formset["fk_name"], "part");
    assert_eq!(formset["extra"], 1);
    assert_eq!(formset["can_delete"], true);
    let child_fields: Vec<_> = formset["form"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(child_fields, ["vendor_name", "lead_time_days"]);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = read_json(app.send(request).await).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/navigation"].is_object());
}

#[tokio::test]
async fn resolved_field_names_follow_configuration_and_permissions() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let scaffold = &app.services.scaffold;
    let admin = app.admin().await;
    let clerk = app.clerk().await;

    let list = scaffold
        .resolve_fields("inventory", "Part", &admin.principal, ViewType::List, true)
        .await
        .unwrap();
    assert_eq!(list.first().map(String::as_str), Some("created_at"));
    assert_eq!(list.last().map(String::as_str), Some("stock_value"));
    assert!(!list.iter().any(|f| f == "is_deleted" || f == "id"));

    let form = scaffold
        .resolve_fields("inventory", "Part", &admin.principal, ViewType::Form, true)
        .await
        .unwrap();
    assert!(form.contains(&"name".to_string()));
    assert!(!form.iter().any(|f| f == "stock_value" || f == "created_at"));

    let again = scaffold
        .resolve_fields("inventory", "Part", &admin.principal, ViewType::List, true)
        .await
        .unwrap();
    assert_eq!(again, list);

    let denied = scaffold
        .resolve_fields("inventory", "Part", &clerk.principal, ViewType::List, false)
        .await
        .unwrap();
    assert!(denied.is_empty());

    let unknown = scaffold
        .resolve_fields("inventory", "Gadget", &admin.principal, ViewType::List, true)
        .await
        .unwrap();
    assert!(unknown.is_empty());
}
