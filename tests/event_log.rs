// tests/event_log.rs
use axum::http::StatusCode;
use frame_admin::application::{
    commands::records::CreateRecordCommand,
    events::{EventDispatcher, ListenerRegistry, LogMessageListener},
    queries::logs::ListLogMessagesQuery,
};
use frame_admin::domain::log_message::{LogMessageRepository, NewLogMessage};
use frame_admin::infrastructure::{
    events::EventWorker,
    repositories::{SqliteLogMessageRepository, SqliteRecordRepository},
};
use serde_json::{Map, Value, json};
use std::{sync::Arc, time::Duration};

mod support;

use support::{FailingPublisher, memory_pool, records_uri, spawn_app, spawn_app_with_pool};

fn values(raw: Value) -> Map<String, Value> {
    raw.as_object().cloned().unwrap_or_default()
}

#[tokio::test]
async fn record_creation_is_logged_through_the_worker() {
    let pool = memory_pool().await;
    let log_repo = Arc::new(SqliteLogMessageRepository::new(SqliteRecordRepository::new(
        pool.clone(),
    )));
    let listeners = ListenerRegistry::builder()
        .subscribe_all(Arc::new(LogMessageListener::new(log_repo.clone())))
        .build();
    let (worker, publisher) = EventWorker::new(EventDispatcher::new(Arc::new(listeners)), 16);
    let handle = worker.spawn();

    let app = spawn_app_with_pool(pool, Arc::new(publisher)).await;
    let admin = app.admin().await;
    let created = app
        .services
        .record_commands
        .create_record(
            &admin,
            CreateRecordCommand {
                app: "inventory".into(),
                model: "Part".into(),
                values: values(json!({"name": "Bearing"})),
                inlines: Vec::new(),
            },
        )
        .await
        .expect("record created");

    // Dropping the last publisher lets the worker drain and stop.
    drop(app);
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("worker drained")
        .expect("worker task");

    let (items, next) = log_repo.list(10, None).await.expect("log listing");
    assert!(next.is_none());
    assert_eq!(items.len(), 1);
    let log = &items[0];
    assert_eq!(log.channel.as_deref(), Some("Part"));
    assert_eq!(log.action.as_deref(), Some("created"));
    assert_eq!(log.message["name"], "Bearing");
    assert_eq!(log.message["id"], json!(created.id));
}

#[tokio::test]
async fn creation_succeeds_when_the_transport_is_down() {
    let app = spawn_app(Arc::new(FailingPublisher)).await;
    let (status, body) = app
        .send_json(
            "POST",
            &records_uri("inventory", "Part"),
            &app.admin_token,
            json!({"values": {"name": "Pulley"}}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (_, logs) = app.get("/api/v1/logs", &app.admin_token).await;
    assert_eq!(logs["items"], json!([]));
}

#[tokio::test]
async fn log_listing_pages_newest_first() {
    let app = spawn_app(Arc::new(FailingPublisher)).await;
    for channel in ["Part", "PartVendor", "Part"] {
        app.log_repo
            .append(NewLogMessage {
                channel: channel.into(),
                action: "created".into(),
                message: json!({"id": 1}),
                created_at: *support::FIXED_NOW,
            })
            .await
            .expect("append");
    }

    let (status, first) = app.get("/api/v1/logs?limit=2", &app.admin_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["has_more"], true);
    let first_ids: Vec<i64> = first["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_i64().unwrap())
        .collect();
    assert!(first_ids[0] > first_ids[1]);

    let cursor = first["next_cursor"].as_str().expect("cursor");
    let (_, second) = app
        .get(&format!("/api/v1/logs?limit=2&cursor={cursor}"), &app.admin_token)
        .await;
    assert_eq!(second["has_more"], false);
    assert_eq!(second["items"].as_array().unwrap().len(), 1);
    assert!(second["items"][0]["id"].as_i64().unwrap() < first_ids[1]);

    let (status, _) = app.get("/api/v1/logs?cursor=***", &app.admin_token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/v1/logs", &app.clerk_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let listed = app
        .services
        .log_queries
        .list_log_messages(
            &app.admin().await,
            ListLogMessagesQuery {
                limit: 50,
                cursor: None,
            },
        )
        .await
        .expect("listing");
    assert_eq!(listed.items.len(), 3);
}
