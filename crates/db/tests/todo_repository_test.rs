//! Integration tests for the item repository.
//!
//! Run against DynamoDB Local: `docker run -p 8000:8000 amazon/dynamodb-local`,
//! then `cargo test -p todo-db -- --ignored`.

use aws_sdk_dynamodb::config::{BehaviorVersion, Builder, Credentials, Region};
use todo_core::todo::{TodoError, TodoItem, TodoRepository, TodoUpdate};
use todo_db::{Client, DynamoTodoRepository, ensure_table};
use todo_shared::{OwnerId, TodoId};
use uuid::Uuid;

/// Get DynamoDB endpoint from environment or use default.
fn get_endpoint() -> String {
    std::env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

fn local_client() -> Client {
    let config = Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .endpoint_url(get_endpoint())
        .credentials_provider(Credentials::new("local", "local", None, None, "static"))
        .build();
    Client::from_conf(config)
}

/// Create a repository over a freshly created table.
async fn setup() -> DynamoTodoRepository {
    let client = local_client();
    let table = format!("todos-test-{}", Uuid::new_v4());
    let created = ensure_table(&client, &table)
        .await
        .expect("Failed to create table");
    assert!(created);

    DynamoTodoRepository::new(client, table)
}

fn item(owner: &str, name: &str) -> TodoItem {
    TodoItem {
        owner_id: owner.into(),
        item_id: TodoId::generate(),
        name: name.to_string(),
        created_at: "2024-01-01T00:00:00.000Z".to_string(),
        due_date: Some("2024-01-02".to_string()),
        done: false,
        attachment_url: None,
    }
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_ensure_table_is_idempotent() {
    let repo = setup().await;

    let created = ensure_table(&local_client(), repo.table_name())
        .await
        .unwrap();
    assert!(!created);
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_create_and_list_by_owner() {
    let repo = setup().await;
    let mine = repo.create(item("u1", "Buy milk")).await.unwrap();
    repo.create(item("u2", "Walk dog")).await.unwrap();

    let items = repo.list(&OwnerId::from("u1")).await.unwrap();
    assert_eq!(items, vec![mine]);

    let none = repo.list(&OwnerId::from("nobody")).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_list_follows_pagination() {
    let repo = setup().await;
    // 60 items of ~20 KB exceed the 1 MB query page.
    for i in 0..60 {
        let mut entry = item("u1", &format!("task {i}"));
        entry.attachment_url = Some("y".repeat(20_000));
        repo.create(entry).await.unwrap();
    }

    let items = repo.list(&OwnerId::from("u1")).await.unwrap();
    assert_eq!(items.len(), 60);
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_update_existing_item() {
    let repo = setup().await;
    let original = repo.create(item("u1", "Buy milk")).await.unwrap();

    let update = TodoUpdate {
        name: "Buy oat milk".to_string(),
        due_date: None,
        done: true,
    };
    repo.update(&update, &original.owner_id, &original.item_id)
        .await
        .unwrap();

    let items = repo.list(&original.owner_id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Buy oat milk");
    assert!(items[0].done);
    assert_eq!(items[0].due_date, None);
    assert_eq!(items[0].created_at, original.created_at);
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_update_keeps_attachment_url() {
    let repo = setup().await;
    let original = repo.create(item("u1", "Buy milk")).await.unwrap();
    let url = format!("https://todo-attachments.s3.amazonaws.com/{}", original.item_id);
    repo.set_attachment_url(&original.owner_id, &original.item_id, &url)
        .await
        .unwrap();

    for due_date in [Some("2024-03-01".to_string()), None] {
        let update = TodoUpdate {
            name: "Buy oat milk".to_string(),
            due_date: due_date.clone(),
            done: true,
        };
        repo.update(&update, &original.owner_id, &original.item_id)
            .await
            .unwrap();

        let items = repo.list(&original.owner_id).await.unwrap();
        assert_eq!(items[0].due_date, due_date);
        assert_eq!(items[0].attachment_url.as_deref(), Some(url.as_str()));
    }
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_update_missing_item_is_conditional_check() {
    let repo = setup().await;
    let existing = repo.create(item("u1", "Buy milk")).await.unwrap();

    let update = TodoUpdate {
        name: "x".to_string(),
        due_date: None,
        done: true,
    };
    let err = repo
        .update(&update, &"u1".into(), &"missing-id".into())
        .await
        .unwrap_err();

    assert!(matches!(err, TodoError::ConditionalCheck { .. }));
    let items = repo.list(&"u1".into()).await.unwrap();
    assert_eq!(items, vec![existing]);
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_set_attachment_url() {
    let repo = setup().await;
    let original = repo.create(item("u1", "Buy milk")).await.unwrap();
    let url = format!("https://todo-attachments.s3.amazonaws.com/{}", original.item_id);

    repo.set_attachment_url(&original.owner_id, &original.item_id, &url)
        .await
        .unwrap();

    let items = repo.list(&original.owner_id).await.unwrap();
    assert_eq!(items[0].attachment_url.as_deref(), Some(url.as_str()));

    let err = repo
        .set_attachment_url(&"u1".into(), &"missing-id".into(), &url)
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::ConditionalCheck { .. }));
    assert_eq!(repo.list(&"u1".into()).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_delete_is_idempotent() {
    let repo = setup().await;
    let original = repo.create(item("u1", "Buy milk")).await.unwrap();

    repo.delete(&original.owner_id, &original.item_id).await.unwrap();
    repo.delete(&original.owner_id, &original.item_id).await.unwrap();

    assert!(repo.list(&original.owner_id).await.unwrap().is_empty());
}
