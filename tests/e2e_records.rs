// tests/e2e_records.rs
use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::Arc;

mod support;

use support::{RecordingPublisher, TestApp, records_uri, spawn_app};

async fn create_part(app: &TestApp, token: &str, values: Value) -> Value {
    let (status, body) = app
        .send_json(
            "POST",
            &records_uri("inventory", "Part"),
            token,
            json!({ "values": values }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn create_returns_projected_record_with_computed_values() {
    let publisher = Arc::new(RecordingPublisher::default());
    let app = spawn_app(publisher.clone()).await;

    let body = create_part(
        &app,
        &app.admin_token,
        json!({"name": "Hex bolt", "price": "2.50", "stock_quantity": "4", "category": "hardware"}),
    )
    .await;
    assert!(body["id"].as_i64().is_some_and(|id| id > 0));
    assert_eq!(body["values"]["name"], "Hex bolt");
    assert_eq!(body["values"]["price"], json!(2.5));
    assert_eq!(body["values"]["stock_quantity"], json!(4));
    assert_eq!(body["values"]["stock_value"], json!(10.0));

    let events = publisher.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].channel, "Part");
    assert_eq!(events[0].action.as_str(), "created");
    assert_eq!(events[0].data["name"], "Hex bolt");
}

#[tokio::test]
async fn invalid_submissions_report_field_errors() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, body) = app
        .send_json(
            "POST",
            &records_uri("inventory", "Part"),
            &app.admin_token,
            json!({"values": {"price": "cheap", "category": "food"}}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = body["fields"].as_object().expect("field errors");
    assert!(fields.contains_key("name"));
    assert!(fields.contains_key("price"));
    assert!(fields.contains_key("category"));
}

#[tokio::test]
async fn writes_require_model_write_permission() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, _) = app
        .send_json(
            "POST",
            &records_uri("inventory", "Part"),
            &app.clerk_token,
            json!({"values": {"name": "Washer"}}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    app.grant_clerks("inventory", "Part").await;
    create_part(&app, &app.clerk_token, json!({"name": "Washer"})).await;
}

#[tokio::test]
async fn log_messages_cannot_be_written_through_forms() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, _) = app
        .send_json(
            "POST",
            &records_uri("frame", "LogMessage"),
            &app.admin_token,
            json!({"values": {"channel": "Part"}}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn list_searches_sorts_and_paginates() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    for (name, qty) in [("Hex bolt", 5), ("Wing nut", 12), ("Carriage bolt", 1)] {
        create_part(&app, &app.admin_token, json!({"name": name, "stock_quantity": qty})).await;
    }

    let uri = format!("{}?search=BOLT&sort=-stock_quantity", records_uri("inventory", "Part"));
    let (status, body) = app.get(&uri, &app.admin_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Part List");
    assert_eq!(body["page"]["total"], 2);
    let names: Vec<_> = body["page"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["values"]["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Hex bolt", "Carriage bolt"]);

    let uri = format!("{}?page=2&page_size=2", records_uri("inventory", "Part"));
    let (_, page_two) = app.get(&uri, &app.admin_token).await;
    assert_eq!(page_two["page"]["total_pages"], 2);
    assert_eq!(page_two["page"]["items"].as_array().unwrap().len(), 1);

    let uri = format!(
        "{}?search=12&filter=stock_quantity&exact_match=true",
        records_uri("inventory", "Part")
    );
    let (_, exact) = app.get(&uri, &app.admin_token).await;
    assert_eq!(exact["page"]["total"], 1);
    assert_eq!(exact["page"]["items"][0]["values"]["name"], "Wing nut");
}

#[tokio::test]
async fn inline_children_are_created_with_the_parent() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, created) = app
        .send_json(
            "POST",
            &records_uri("inventory", "Part"),
            &app.admin_token,
            json!({
                "values": {"name": "Relay"},
                "inlines": [{
                    "model": "PartVendor",
                    "rows": [
                        {"vendor_name": "Acme", "lead_time_days": "3"},
                        {"vendor_name": "", "lead_time_days": null}
                    ]
                }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    let id = created["id"].as_i64().unwrap();

    let (status, detail) = app
        .get(&format!("{}/{id}", records_uri("inventory", "Part")), &app.admin_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["record"]["values"]["name"], "Relay");
    let child = &detail["children"][0];
    assert_eq!(child["model"], "PartVendor");
    assert_eq!(child["fk_name"], "part");
    let rows = child["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["values"]["vendor_name"], "Acme");
    assert_eq!(rows[0]["values"]["lead_time_days"], 3);
}

#[tokio::test]
async fn inline_errors_reject_the_whole_submission() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, body) = app
        .send_json(
            "POST",
            &records_uri("inventory", "Part"),
            &app.admin_token,
            json!({
                "values": {"name": "Relay"},
                "inlines": [{"model": "PartVendor", "rows": [{"lead_time_days": 2}]}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body["fields"]
            .as_object()
            .unwrap()
            .keys()
            .any(|k| k.ends_with("vendor_name"))
    );

    let (_, list) = app
        .get(&records_uri("inventory", "Part"), &app.admin_token)
        .await;
    assert_eq!(list["page"]["total"], 0);
}

#[tokio::test]
async fn vendor_references_must_point_at_live_parts() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, body) = app
        .send_json(
            "POST",
            &records_uri("inventory", "PartVendor"),
            &app.admin_token,
            json!({"values": {"part": 999, "vendor_name": "Acme"}}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"]["part"], json!(["Select a valid choice."]));
}

fn event_log(publisher: &RecordingPublisher) -> Vec<String> {
    publisher
        .events()
        .iter()
        .map(|e| format!("{}:{}", e.channel, e.action.as_str()))
        .collect()
}

async fn part_with_vendor(app: &TestApp, name: &str) -> (i64, i64) {
    let (status, created) = app
        .send_json(
            "POST",
            &records_uri("inventory", "Part"),
            &app.admin_token,
            json!({
                "values": {"name": name},
                "inlines": [{"model": "PartVendor", "rows": [{"vendor_name": "Acme"}]}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    let part_id = created["id"].as_i64().unwrap();
    let (_, detail) = app
        .get(&format!("{}/{part_id}", records_uri("inventory", "Part")), &app.admin_token)
        .await;
    let vendor_id = detail["children"][0]["rows"][0]["id"].as_i64().unwrap();
    (part_id, vendor_id)
}

#[tokio::test]
async fn inline_rows_of_another_part_are_rejected_before_anything_is_written() {
    let publisher = Arc::new(RecordingPublisher::default());
    let app = spawn_app(publisher.clone()).await;
    let (_, vendor_id) = part_with_vendor(&app, "Relay").await;
    let before = event_log(&publisher);
    assert_eq!(before, ["Part:created", "PartVendor:created"]);

    let (status, _) = app
        .send_json(
            "POST",
            &records_uri("inventory", "Part"),
            &app.admin_token,
            json!({
                "values": {"name": "Switch"},
                "inlines": [{
                    "model": "PartVendor",
                    "rows": [{"vendor_name": "Bolt Co"}, {"id": vendor_id, "delete": true}]
                }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, parts) = app.get(&records_uri("inventory", "Part"), &app.admin_token).await;
    assert_eq!(parts["page"]["total"], 1);
    let (_, vendors) = app
        .get(&records_uri("inventory", "PartVendor"), &app.admin_token)
        .await;
    assert_eq!(vendors["page"]["total"], 1);
    assert_eq!(event_log(&publisher), before);
}

#[tokio::test]
async fn failed_inline_changes_leave_the_parent_untouched() {
    let publisher = Arc::new(RecordingPublisher::default());
    let app = spawn_app(publisher.clone()).await;
    let (_, foreign_vendor) = part_with_vendor(&app, "Relay").await;
    let (part_id, _) = part_with_vendor(&app, "Fuse").await;
    let uri = format!("{}/{part_id}", records_uri("inventory", "Part"));
    let before = event_log(&publisher);

    for row in [
        json!({"id": 99999, "vendor_name": "Ghost"}),
        json!({"id": foreign_vendor, "vendor_name": "Stolen"}),
    ] {
        let (status, _) = app
            .send_json(
                "PUT",
                &uri,
                &app.admin_token,
                json!({
                    "values": {"name": "Fuse renamed"},
                    "inlines": [{"model": "PartVendor", "rows": [row]}]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    let (_, detail) = app.get(&uri, &app.admin_token).await;
    assert_eq!(detail["record"]["values"]["name"], "Fuse");
    let (_, foreign) = app
        .get(
            &format!("{}/{foreign_vendor}", records_uri("inventory", "PartVendor")),
            &app.admin_token,
        )
        .await;
    assert_eq!(foreign["record"]["values"]["vendor_name"], "Acme");
    assert_eq!(event_log(&publisher), before);
}

#[tokio::test]
async fn owned_inline_rows_change_with_the_parent_in_one_commit() {
    let publisher = Arc::new(RecordingPublisher::default());
    let app = spawn_app(publisher.clone()).await;
    let (part_id, vendor_id) = part_with_vendor(&app, "Fuse").await;
    let uri = format!("{}/{part_id}", records_uri("inventory", "Part"));

    let (status, body) = app
        .send_json(
            "PUT",
            &uri,
            &app.admin_token,
            json!({
                "values": {"stock_quantity": 2},
                "inlines": [{
                    "model": "PartVendor",
                    "rows": [
                        {"id": vendor_id, "delete": true},
                        {"vendor_name": "Bolt Co", "lead_time_days": 5}
                    ]
                }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, detail) = app.get(&uri, &app.admin_token).await;
    let rows = detail["children"][0]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["values"]["vendor_name"], "Bolt Co");
    assert_eq!(
        event_log(&publisher)[2..],
        ["Part:updated", "PartVendor:deleted", "PartVendor:created"]
    );
}

#[tokio::test]
async fn vendors_created_directly_are_children_of_their_part() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let part = create_part(&app, &app.admin_token, json!({"name": "Valve"})).await;
    let part_id = part["id"].as_i64().unwrap();

    let (status, vendor) = app
        .send_json(
            "POST",
            &records_uri("inventory", "PartVendor"),
            &app.admin_token,
            json!({"values": {"part": part_id, "vendor_name": "Flow Ltd"}}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{vendor}");

    let uri = format!("{}/{part_id}", records_uri("inventory", "Part"));
    let (status, body) = app
        .send_json(
            "PUT",
            &uri,
            &app.admin_token,
            json!({
                "values": {},
                "inlines": [{
                    "model": "PartVendor",
                    "rows": [{"id": vendor["id"], "lead_time_days": 9}]
                }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, detail) = app.get(&uri, &app.admin_token).await;
    let rows = detail["children"][0]["rows"].as_array().unwrap();
    assert_eq!(rows[0]["values"]["vendor_name"], "Flow Ltd");
    assert_eq!(rows[0]["values"]["lead_time_days"], 9);
}

#[tokio::test]
async fn update_merges_values_and_delete_hides_the_record() {
    let publisher = Arc::new(RecordingPublisher::default());
    let app = spawn_app(publisher.clone()).await;
    let created = create_part(&app, &app.admin_token, json!({"name": "Gear", "price": 3})).await;
    let uri = format!("{}/{}", records_uri("inventory", "Part"), created["id"]);

    let (status, updated) = app
        .send_json("PUT", &uri, &app.admin_token, json!({"values": {"stock_quantity": 7}}))
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["values"]["name"], "Gear");
    assert_eq!(updated["values"]["stock_quantity"], 7);

    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", app.admin_token))
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = app.get(&uri, &app.admin_token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, list) = app.get(&records_uri("inventory", "Part"), &app.admin_token).await;
    assert_eq!(list["page"]["total"], 0);

    let actions: Vec<_> = publisher
        .events()
        .iter()
        .map(|e| e.action.as_str().to_string())
        .collect();
    assert_eq!(actions, ["created", "updated", "deleted"]);
}

#[tokio::test]
async fn single_field_updates_respect_field_permissions() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let created = create_part(&app, &app.admin_token, json!({"name": "Spring"})).await;
    let base = format!("{}/{}/fields", records_uri("inventory", "Part"), created["id"]);

    let (status, body) = app
        .send_json("POST", &format!("{base}/stock_quantity"), &app.admin_token, json!({"value": "9"}))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["field"], "stock_quantity");
    assert_eq!(body["value"], 9);

    let (status, _) = app
        .send_json("POST", &format!("{base}/created_at"), &app.admin_token, json!({"value": "x"}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn list_reports_are_paged_attachments() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    for name in ["Alpha", "Beta", "Gamma"] {
        create_part(&app, &app.admin_token, json!({"name": name})).await;
    }

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/apps/inventory/models/Part/report")
        .header(header::AUTHORIZATION, format!("Bearer {}", app.admin_token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"kind": "list"}).to_string()))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.starts_with("attachment; filename="));
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"));

    let bytes = body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("Alpha") && text.contains("Gamma"));
    // Two rows per landscape page in the test layout.
    assert_eq!(text.matches('\u{c}').count(), 1);
}

#[tokio::test]
async fn detail_reports_need_a_record_id() {
    let app = spawn_app(Arc::new(RecordingPublisher::default())).await;
    let (status, _) = app
        .send_json(
            "POST",
            "/api/v1/apps/inventory/models/Part/report",
            &app.admin_token,
            json!({"kind": "detail"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
