// tests/sqlite_repositories.rs
use chrono::Duration;
use frame_admin::domain::{
    configuration::{ConfigurationReadRepository, ViewType},
    errors::DomainError,
    events::EventAction,
    record::{
        ChildWrite, NewRecord, ParentWrite, RecordBatch, RecordId, RecordQuery, RecordRepository,
        RecordSort, RecordUpdate,
    },
    user::{NewUser, PasswordHash, UserRepository, Username},
};
use frame_admin::infrastructure::repositories::{
    SqliteConfigurationRepository, SqliteRecordRepository, SqliteUserRepository,
};
use serde_json::{Map, Value, json};

mod support;

use support::{FIXED_NOW, memory_pool};

fn data(raw: Value) -> Map<String, Value> {
    raw.as_object().cloned().unwrap_or_default()
}

#[tokio::test]
async fn record_store_filters_live_rows_only() {
    let repo = SqliteRecordRepository::new(memory_pool().await);
    let now = *FIXED_NOW;

    let bolt = repo
        .insert(NewRecord::new("inventory", "Part", data(json!({"name": "Bolt", "stock_quantity": 3})), now))
        .await
        .unwrap();
    let nut = repo
        .insert(NewRecord::new("inventory", "Part", data(json!({"name": "Nut_50%", "stock_quantity": 10})), now))
        .await
        .unwrap();
    repo.insert(NewRecord::new("crm", "Part", data(json!({"name": "Other app"})), now))
        .await
        .unwrap();

    let (all, total) = repo.list(&RecordQuery::new("inventory", "Part")).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(all[0].id, bolt.id);

    let wildcard = RecordQuery::new("inventory", "Part").with_search("50%", vec!["name".into()]);
    let (found, _) = repo.list(&wildcard).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, nut.id);

    let sorted = RecordQuery::new("inventory", "Part").with_sort(RecordSort::parse("-stock_quantity"));
    let (desc, _) = repo.list(&sorted).await.unwrap();
    assert_eq!(desc[0].id, nut.id);

    repo.soft_delete(bolt.id, now + Duration::minutes(1)).await.unwrap();
    assert!(repo.find_by_id("inventory", "Part", bolt.id).await.unwrap().is_none());
    let (live, total) = repo.list(&RecordQuery::new("inventory", "Part")).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(live[0].id, nut.id);

    let again = repo.soft_delete(bolt.id, now).await;
    assert!(matches!(again, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn batches_link_children_and_commit_together() {
    let repo = SqliteRecordRepository::new(memory_pool().await);
    let now = *FIXED_NOW;

    let batch = RecordBatch::new(ParentWrite::Insert(NewRecord::new(
        "inventory",
        "Part",
        data(json!({"name": "Relay"})),
        now,
    )))
    .with_children([ChildWrite::Insert {
        record: NewRecord::new("inventory", "PartVendor", data(json!({"vendor_name": "Acme"})), now),
        parent_field: "part".into(),
    }]);
    let saved = repo.save_batch(batch).await.unwrap();

    let actions: Vec<_> = saved.changes.iter().map(|(action, _)| *action).collect();
    assert_eq!(actions, [EventAction::Created, EventAction::Created]);
    let vendor = &saved.changes[1].1;
    assert_eq!(vendor.data["part"], json!(saved.parent.id.0));
}

#[tokio::test]
async fn failing_batches_store_nothing() {
    let repo = SqliteRecordRepository::new(memory_pool().await);
    let now = *FIXED_NOW;

    let batch = RecordBatch::new(ParentWrite::Insert(NewRecord::new(
        "inventory",
        "Part",
        data(json!({"name": "Switch"})),
        now,
    )))
    .with_children([
        ChildWrite::Insert {
            record: NewRecord::new("inventory", "PartVendor", data(json!({"vendor_name": "Acme"})), now),
            parent_field: "part".into(),
        },
        ChildWrite::Delete {
            id: RecordId(404),
            at: now,
        },
    ]);
    let result = repo.save_batch(batch).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));

    for model in ["Part", "PartVendor"] {
        let (_, total) = repo.list(&RecordQuery::new("inventory", model)).await.unwrap();
        assert_eq!(total, 0, "{model} rows survived a failed batch");
    }
}

#[tokio::test]
async fn record_updates_replace_data_and_bump_timestamp() {
    let repo = SqliteRecordRepository::new(memory_pool().await);
    let now = *FIXED_NOW;
    let record = repo
        .insert(NewRecord::new("inventory", "Part", data(json!({"name": "Cam"})), now))
        .await
        .unwrap();

    let later = now + Duration::hours(2);
    let updated = repo
        .update(RecordUpdate::merged(&record, data(json!({"stock_quantity": 4})), later))
        .await
        .unwrap();
    assert_eq!(updated.data["name"], "Cam");
    assert_eq!(updated.data["stock_quantity"], 4);
    assert_eq!(updated.created_at, now);
    assert_eq!(updated.updated_at, later);

    let missing = repo
        .update(RecordUpdate::merged(
            &frame_admin::domain::record::Record {
                id: RecordId(4242),
                ..updated.clone()
            },
            Map::new(),
            later,
        ))
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn usernames_are_unique() {
    let repo = SqliteUserRepository::new(memory_pool().await);
    let new_user = || {
        NewUser::new(
            Username::new("operator").unwrap(),
            PasswordHash::new("hash").unwrap(),
            false,
            *FIXED_NOW,
        )
    };
    let user = repo.insert(new_user()).await.unwrap();
    let duplicate = repo.insert(new_user()).await;
    assert!(matches!(duplicate, Err(DomainError::Conflict(_))));

    let group = repo.find_or_create_group("buyers").await.unwrap();
    let same = repo.find_or_create_group("buyers").await.unwrap();
    assert_eq!(group.id, same.id);
    repo.add_to_group(user.id, group.id).await.unwrap();
    repo.add_to_group(user.id, group.id).await.unwrap();

    let loaded = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(loaded.groups.contains(&group.id));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn sync_creates_configuration_once() {
    let pool = memory_pool().await;
    let app = support::spawn_app_with_pool(
        pool.clone(),
        std::sync::Arc::new(support::RecordingPublisher::default()),
    )
    .await;
    let repo = SqliteConfigurationRepository::new(pool);

    let part = repo.find_model("inventory", "Part").await.unwrap().unwrap();
    assert_eq!(part.list_url, "part-list");
    assert!(part.navigation);
    let actions: Vec<_> = part.actions.iter().map(|a| a.list_name.as_str()).collect();
    assert_eq!(actions, ["Create", "Details", "Edit", "Delete"]);
    let fields: Vec<_> = part.fields.iter().map(|f| f.field_name.as_str()).collect();
    assert_eq!(
        fields,
        [
            "created_at",
            "updated_at",
            "is_deleted",
            "name",
            "description",
            "price",
            "stock_quantity",
            "category"
        ]
    );
    let created_at = part.field("created_at").unwrap();
    assert!(!created_at.enabled_for(ViewType::Form));
    assert!(created_at.enabled_for(ViewType::List));

    let report = app.services.config_commands.sync().await.unwrap();
    assert!(report.is_empty());
    let vendor = repo.find_model("inventory", "PartVendor").await.unwrap().unwrap();
    assert_eq!(vendor.actions.len(), 4);
}
