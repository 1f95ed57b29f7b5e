//! In-Memory Item Store
//!
//! Keeps documents as JSON maps so reads go through the same defaults as the
//! SQLite store. Nothing is persisted.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::traits::ItemStore;
use crate::domain::{
    item_from_document, order_key, Document, DomainError, DomainResult, Item, ItemId, ItemPatch,
    ItemRecord,
};

#[derive(Default)]
pub struct MemoryItemStore {
    documents: Mutex<HashMap<ItemId, Document>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list_all(&self) -> DomainResult<Vec<Item>> {
        let documents = self.documents.lock().await;
        let mut items = documents
            .iter()
            .map(|(id, doc)| item_from_document(id.clone(), doc))
            .collect::<DomainResult<Vec<_>>>()?;
        items.sort_by_key(order_key);
        Ok(items)
    }

    async fn create(&self, record: &ItemRecord) -> DomainResult<ItemId> {
        let mut documents = self.documents.lock().await;
        let id = ItemId::new(uuid::Uuid::new_v4().to_string());
        documents.insert(id.clone(), record.to_document()?);
        Ok(id)
    }

    async fn update(&self, id: &ItemId, patch: &ItemPatch) -> DomainResult<()> {
        let mut documents = self.documents.lock().await;
        let document = documents
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("item {}", id)))?;
        patch.apply_to(document)
    }

    async fn delete(&self, id: &ItemId) -> DomainResult<()> {
        self.documents.lock().await.remove(id);
        Ok(())
    }

    async fn batch_update(&self, updates: &[(ItemId, ItemPatch)]) -> DomainResult<()> {
        let mut documents = self.documents.lock().await;
        // Validate first so a bad id leaves every document untouched
        if let Some((missing, _)) = updates.iter().find(|(id, _)| !documents.contains_key(id)) {
            return Err(DomainError::NotFound(format!("item {}", missing)));
        }
        for (id, patch) in updates {
            if let Some(document) = documents.get_mut(id) {
                patch.apply_to(document)?;
            }
        }
        Ok(())
    }
}
