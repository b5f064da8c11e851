//! Query engine paging behavior: normalization, ordering, date ranges
//! and category-name enrichment.
use backend_lib::error::AppError;
use backend_lib::storage::{Category, MemoryStorage, Storage, Todo};
use backend_lib::todo::{self, TodoFilter};
use chrono::{DateTime, Utc};
use ticklist_common::TODO_STATUS_PENDING;

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

async fn seed_category(storage: &MemoryStorage, id: &str, name: &str, user_id: &str) {
    storage
        .create_category(Category {
            id: id.to_string(),
            name: name.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .await
        .unwrap();
}

async fn seed_todo(storage: &MemoryStorage, id: &str, category_id: &str, created_at: &str) {
    storage
        .create_todo(Todo {
            id: id.to_string(),
            title: format!("task {id}"),
            content: String::new(),
            status: TODO_STATUS_PENDING,
            category_id: category_id.to_string(),
            user_id: "alice".to_string(),
            due_date: None,
            created_at: ts(created_at),
            updated_at: ts(created_at),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_out_of_range_paging_resets_to_defaults() {
    let storage = MemoryStorage::new();
    seed_category(&storage, "c1", "Work", "alice").await;
    for i in 0..3 {
        seed_todo(&storage, &format!("t{i}"), "c1", "2024-01-05T10:00:00Z").await;
    }
    let filter = TodoFilter::default();

    let zeroed = todo::page(&storage, "alice", &filter, 0, 0).await.unwrap();
    let explicit = todo::page(&storage, "alice", &filter, 1, 100).await.unwrap();
    assert_eq!(zeroed.current, explicit.current);
    assert_eq!(zeroed.size, explicit.size);
    assert_eq!(zeroed.total, explicit.total);
    assert_eq!(zeroed.records.len(), explicit.records.len());

    // Oversized page sizes reset to the 100 ceiling rather than clamp.
    let oversized = todo::page(&storage, "alice", &filter, 2, 150).await.unwrap();
    assert_eq!(oversized.size, 100);
    assert_eq!(oversized.current, 2);
    assert!(oversized.records.is_empty());

    let negative = todo::page(&storage, "alice", &filter, -3, -7).await.unwrap();
    assert_eq!(negative.current, 1);
    assert_eq!(negative.size, 100);
}

#[tokio::test]
async fn test_page_orders_newest_first_and_offsets() {
    let storage = MemoryStorage::new();
    seed_category(&storage, "c1", "Work", "alice").await;
    seed_todo(&storage, "oldest", "c1", "2024-01-01T08:00:00Z").await;
    seed_todo(&storage, "middle", "c1", "2024-01-02T08:00:00Z").await;
    seed_todo(&storage, "newest", "c1", "2024-01-03T08:00:00Z").await;

    let filter = TodoFilter::default();
    let first = todo::page(&storage, "alice", &filter, 1, 2).await.unwrap();
    assert_eq!(first.total, 3);
    let ids: Vec<&str> = first.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["newest", "middle"]);

    let second = todo::page(&storage, "alice", &filter, 2, 2).await.unwrap();
    assert_eq!(second.total, 3);
    let ids: Vec<&str> = second.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["oldest"]);
}

#[tokio::test]
async fn test_date_range_is_inclusive_of_the_end_day() {
    let storage = MemoryStorage::new();
    seed_category(&storage, "c1", "Work", "alice").await;
    seed_todo(&storage, "edge", "c1", "2024-01-05T23:59:59Z").await;

    let mut filter = TodoFilter {
        end_date: Some("2024-01-05".parse().unwrap()),
        ..TodoFilter::default()
    };
    let page = todo::page(&storage, "alice", &filter, 1, 100).await.unwrap();
    assert_eq!(page.total, 1);

    filter.end_date = Some("2024-01-04".parse().unwrap());
    let page = todo::page(&storage, "alice", &filter, 1, 100).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_results_are_scoped_to_the_owner() {
    let storage = MemoryStorage::new();
    seed_category(&storage, "c1", "Work", "alice").await;
    seed_category(&storage, "c2", "Work", "bob").await;
    seed_todo(&storage, "mine", "c1", "2024-01-05T10:00:00Z").await;
    storage
        .create_todo(Todo {
            id: "theirs".to_string(),
            title: "bob task".to_string(),
            content: String::new(),
            status: TODO_STATUS_PENDING,
            category_id: "c2".to_string(),
            user_id: "bob".to_string(),
            due_date: None,
            created_at: ts("2024-01-05T10:00:00Z"),
            updated_at: ts("2024-01-05T10:00:00Z"),
        })
        .await
        .unwrap();

    let page = todo::page(&storage, "alice", &TodoFilter::default(), 1, 100)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.records[0].id, "mine");
}

#[tokio::test]
async fn test_records_carry_the_category_display_name() {
    let storage = MemoryStorage::new();
    seed_category(&storage, "c1", "Work", "alice").await;
    seed_todo(&storage, "t1", "c1", "2024-01-05T10:00:00Z").await;

    let page = todo::page(&storage, "alice", &TodoFilter::default(), 1, 100)
        .await
        .unwrap();
    assert_eq!(page.records[0].category_name, "Work");
}

#[tokio::test]
async fn test_unresolvable_category_fails_the_whole_page() {
    let storage = MemoryStorage::new();
    seed_category(&storage, "c1", "Work", "alice").await;
    seed_todo(&storage, "ok", "c1", "2024-01-05T10:00:00Z").await;
    // A row referencing a category that no longer resolves.
    seed_todo(&storage, "dangling", "missing-category", "2024-01-05T11:00:00Z").await;

    let result = todo::page(&storage, "alice", &TodoFilter::default(), 1, 100).await;
    assert!(matches!(result, Err(AppError::CategoryNotFound)));
}
