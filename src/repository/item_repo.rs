//! Item Repository - SQLite Document Store
//!
//! Each item is one row holding its JSON document. Updates read the document,
//! merge the patch and write it back together with the ordering columns.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::traits::ItemStore;
use crate::domain::{
    item_from_document, Document, DomainError, DomainResult, Item, ItemId, ItemPatch, ItemRecord,
};

/// SQLite implementation of the item store
pub struct SqliteItemStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteItemStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

fn internal(e: rusqlite::Error) -> DomainError {
    DomainError::Internal(e.to_string())
}

fn parse_document(raw: &str) -> DomainResult<Document> {
    Ok(serde_json::from_str(raw)?)
}

/// Merge `patch` into the stored document of `id`
fn apply_patch(conn: &Connection, id: &ItemId, patch: &ItemPatch, now: i64) -> DomainResult<()> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT document FROM shopping_items WHERE id = ?",
            params![id.as_str()],
            |row| row.get(0),
        )
        .optional()
        .map_err(internal)?;
    let raw = raw.ok_or_else(|| DomainError::NotFound(format!("item {}", id)))?;

    let mut document = parse_document(&raw)?;
    patch.apply_to(&mut document)?;
    // Re-read through the defaults so the ordering columns match what list_all sees
    let merged = item_from_document(id.clone(), &document)?;

    conn.execute(
        "UPDATE shopping_items SET priority_rank = ?, name = ?, document = ?, updated_at = ? WHERE id = ?",
        params![
            merged.priority.rank(),
            merged.name,
            serde_json::to_string(&document)?,
            now,
            id.as_str()
        ],
    )
    .map_err(internal)?;
    Ok(())
}

#[async_trait]
impl ItemStore for SqliteItemStore {
    async fn list_all(&self) -> DomainResult<Vec<Item>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare("SELECT id, document FROM shopping_items ORDER BY priority_rank ASC, name ASC")
            .map_err(internal)?;
        let mut rows = stmt.query([]).map_err(internal)?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().map_err(internal)? {
            let id: String = row.get(0).map_err(internal)?;
            let raw: String = row.get(1).map_err(internal)?;
            items.push(item_from_document(ItemId::new(id), &parse_document(&raw)?)?);
        }
        Ok(items)
    }

    async fn create(&self, record: &ItemRecord) -> DomainResult<ItemId> {
        let conn = self.conn.lock().await;

        let id = ItemId::new(uuid::Uuid::new_v4().to_string());
        let document = serde_json::to_string(&record.to_document()?)?;
        let now = chrono::Utc::now().timestamp_millis();

        conn.execute(
            "INSERT INTO shopping_items (id, priority_rank, name, document, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
            params![id.as_str(), record.priority.rank(), record.name, document, now, now],
        )
        .map_err(internal)?;

        Ok(id)
    }

    async fn update(&self, id: &ItemId, patch: &ItemPatch) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        apply_patch(&conn, id, patch, chrono::Utc::now().timestamp_millis())
    }

    async fn delete(&self, id: &ItemId) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM shopping_items WHERE id = ?", params![id.as_str()])
            .map_err(internal)?;
        Ok(())
    }

    async fn batch_update(&self, updates: &[(ItemId, ItemPatch)]) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();

        let tx = conn.transaction().map_err(internal)?;
        for (id, patch) in updates {
            apply_patch(&tx, id, patch, now)?;
        }
        tx.commit().map_err(internal)?;
        Ok(())
    }
}
