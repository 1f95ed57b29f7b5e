//! Repository Integration Tests
//!
//! Tests for SqliteItemStore with in-memory SQLite database.

use crate::domain::{DomainError, ItemId, ItemPatch, ItemRecord, MarketPrice, MeasureUnit, Priority};
use crate::repository::{open_database, open_in_memory, ItemStore, SqliteItemStore};

fn setup_test_db() -> SqliteItemStore {
    let conn = open_in_memory().expect("Failed to init test DB");
    SqliteItemStore::new(conn)
}

fn record(name: &str, priority: Priority) -> ItemRecord {
    ItemRecord::new(name.to_string(), priority, 1.0, MeasureUnit::Unit, None)
}

#[tokio::test]
async fn test_create_item() {
    let store = setup_test_db();

    let id = store
        .create(&record("Rice", Priority::High))
        .await
        .expect("Failed to create");

    let items = store.list_all().await.expect("List failed");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, id);
    assert_eq!(items[0].name, "Rice");
    assert!(items[0].markets.is_empty());
    assert!(!items[0].is_in_cart);
}

#[tokio::test]
async fn test_ids_are_distinct() {
    let store = setup_test_db();
    let a = store.create(&record("A", Priority::High)).await.unwrap();
    let b = store.create(&record("A", Priority::High)).await.unwrap();
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_list_orders_by_priority_then_name() {
    let store = setup_test_db();

    store.create(&record("Soap", Priority::Low)).await.unwrap();
    store.create(&record("Milk", Priority::High)).await.unwrap();
    store.create(&record("Coffee", Priority::Medium)).await.unwrap();
    store.create(&record("Eggs", Priority::High)).await.unwrap();

    let names: Vec<_> = store.list_all().await.unwrap().into_iter().map(|i| i.name).collect();
    assert_eq!(names, vec!["Eggs", "Milk", "Coffee", "Soap"]);
}

#[tokio::test]
async fn test_update_merges_fields() {
    let store = setup_test_db();
    let mut milk = record("Milk", Priority::Low);
    milk.subcategory = Some("Dairy".to_string());
    let id = store.create(&milk).await.unwrap();

    let patch = ItemPatch {
        priority: Some(Priority::High),
        quantity: Some(3.0),
        ..Default::default()
    };
    store.update(&id, &patch).await.expect("Update failed");

    let item = &store.list_all().await.unwrap()[0];
    assert_eq!(item.priority, Priority::High);
    assert_eq!(item.quantity, 3.0);
    assert_eq!(item.subcategory, "Dairy");
    assert_eq!(item.name, "Milk");
}

#[tokio::test]
async fn test_update_changes_ordering() {
    let store = setup_test_db();
    store.create(&record("Apple", Priority::Medium)).await.unwrap();
    let id = store.create(&record("Banana", Priority::Medium)).await.unwrap();

    store
        .update(&id, &ItemPatch { priority: Some(Priority::High), ..Default::default() })
        .await
        .unwrap();

    let names: Vec<_> = store.list_all().await.unwrap().into_iter().map(|i| i.name).collect();
    assert_eq!(names, vec!["Banana", "Apple"]);
}

#[tokio::test]
async fn test_update_missing_item() {
    let store = setup_test_db();
    let err = store
        .update(&ItemId::new("missing"), &ItemPatch::quantity(2.0))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn test_markets_round_trip() {
    let store = setup_test_db();
    let id = store.create(&record("Beans", Priority::Medium)).await.unwrap();

    let markets = vec![MarketPrice::new("Corner", 4.5), MarketPrice::new("Big Box", 0.0)];
    store.update(&id, &ItemPatch::markets(markets.clone())).await.unwrap();

    assert_eq!(store.list_all().await.unwrap()[0].markets, markets);
}

#[tokio::test]
async fn test_null_subcategory_reads_back_empty() {
    let store = setup_test_db();
    let id = store.create(&record("Salt", Priority::Low)).await.unwrap();

    store
        .update(&id, &ItemPatch { subcategory: Some(None), ..Default::default() })
        .await
        .unwrap();

    assert_eq!(store.list_all().await.unwrap()[0].subcategory, "");
}

#[tokio::test]
async fn test_delete_item() {
    let store = setup_test_db();
    let id = store.create(&record("To delete", Priority::Low)).await.unwrap();

    store.delete(&id).await.expect("Delete failed");
    assert!(store.list_all().await.unwrap().is_empty());

    // Deleting again is not an error
    store.delete(&id).await.expect("Second delete failed");
}

#[tokio::test]
async fn test_batch_update() {
    let store = setup_test_db();
    let a = store.create(&record("A", Priority::High)).await.unwrap();
    let b = store.create(&record("B", Priority::High)).await.unwrap();
    store.update(&a, &ItemPatch::in_cart(true)).await.unwrap();
    store.update(&b, &ItemPatch::in_cart(true)).await.unwrap();

    store
        .batch_update(&[(a, ItemPatch::in_cart(false)), (b, ItemPatch::in_cart(false))])
        .await
        .expect("Batch failed");

    assert!(store.list_all().await.unwrap().iter().all(|i| !i.is_in_cart));
}

#[tokio::test]
async fn test_batch_update_rolls_back_on_missing_item() {
    let store = setup_test_db();
    let a = store.create(&record("A", Priority::High)).await.unwrap();

    let result = store
        .batch_update(&[(a, ItemPatch::in_cart(true)), (ItemId::new("ghost"), ItemPatch::in_cart(true))])
        .await;

    assert!(result.is_err());
    assert!(!store.list_all().await.unwrap()[0].is_in_cart);
}

#[tokio::test]
async fn test_legacy_document_defaults() {
    let conn = open_in_memory().unwrap();
    conn.execute(
        "INSERT INTO shopping_items (id, priority_rank, name, document, created_at) VALUES ('old', 2, 'Arroz', ?, 0)",
        [r#"{"name":"Arroz","priority":"Média","markets":[]}"#],
    )
    .unwrap();
    let store = SqliteItemStore::new(conn);

    let item = &store.list_all().await.unwrap()[0];
    assert_eq!(item.priority, Priority::Medium);
    assert_eq!(item.quantity, 1.0);
    assert_eq!(item.unit, MeasureUnit::Unit);
    assert_eq!(item.subcategory, "");
    assert!(!item.is_in_cart);
}

#[tokio::test]
async fn test_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.db");

    {
        let store = SqliteItemStore::new(open_database(&path).unwrap());
        store.create(&record("Tea", Priority::Medium)).await.unwrap();
    }

    let store = SqliteItemStore::new(open_database(&path).unwrap());
    let items = store.list_all().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Tea");
}
