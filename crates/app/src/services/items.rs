use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use rand::Rng;

use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use crate::util::time::now_rfc3339;
use stackly_core::Item;

/// Ephemeral item backend: a process-wide map behind a mutex. Items kept
/// here and items in the database are distinct populations; entries created
/// while the database is down stay invisible to it once it returns.
#[derive(Clone, Default)]
pub struct MemoryItemStore {
    items: Arc<Mutex<HashMap<String, Item>>>,
}

impl MemoryItemStore {
    fn guard(&self) -> MutexGuard<'_, HashMap<String, Item>> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn list(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.guard().values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    pub fn get(&self, id: &str) -> Option<Item> {
        self.guard().get(id).cloned()
    }

    pub fn insert(&self, item: Item) {
        self.guard().insert(item.id.clone(), item);
    }

    pub fn update(
        &self,
        id: &str,
        name: Option<&str>,
        description: Option<&str>,
        now: &str,
    ) -> Option<Item> {
        let mut guard = self.guard();
        let item = guard.get_mut(id)?;
        if let Some(name) = name {
            item.name = name.to_string();
        }
        if let Some(description) = description {
            item.description = Some(description.to_string());
        }
        item.updated_at = now.to_string();
        Some(item.clone())
    }

    pub fn delete(&self, id: &str) -> bool {
        self.guard().remove(id).is_some()
    }
}

/// Item CRUD preferring the durable store, falling back to the injected
/// ephemeral store when the database is unavailable. Fallbacks are logged,
/// never surfaced to the caller as errors.
#[derive(Clone)]
pub struct ItemsService {
    config: SharedConfig,
    memory: MemoryItemStore,
}

impl ItemsService {
    pub(super) fn new(config: SharedConfig, memory: MemoryItemStore) -> Self {
        Self { config, memory }
    }

    pub fn create(&self, name: &str, description: Option<&str>) -> Result<Item> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("name is required".to_string()));
        }
        let description = description
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let now = now_rfc3339();
        let item = Item {
            id: short_id(),
            name: name.to_string(),
            description,
            created_at: now.clone(),
            updated_at: now,
        };
        match self.insert_durable(&item) {
            Ok(()) => Ok(item),
            Err(err) => {
                tracing::warn!(
                    item_id = %item.id,
                    error = %err,
                    "item store unavailable, creating in-memory"
                );
                self.memory.insert(item.clone());
                Ok(item)
            }
        }
    }

    pub fn get(&self, id: &str) -> Result<Item> {
        match self.get_durable(id) {
            Ok(Some(item)) => Ok(item),
            Ok(None) => self.memory.get(id).ok_or_else(item_not_found),
            Err(err) => {
                tracing::warn!(item_id = %id, error = %err, "item store unavailable, reading in-memory");
                self.memory.get(id).ok_or_else(item_not_found)
            }
        }
    }

    pub fn list(&self) -> Result<Vec<Item>> {
        match self.list_durable() {
            Ok(items) => Ok(items),
            Err(err) => {
                tracing::warn!(error = %err, "item store unavailable, listing in-memory");
                Ok(self.memory.list())
            }
        }
    }

    pub fn update(&self, id: &str, name: Option<&str>, description: Option<&str>) -> Result<Item> {
        let name = name.map(str::trim);
        if matches!(name, Some("")) {
            return Err(AppError::InvalidInput("name cannot be empty".to_string()));
        }
        let description = description.map(str::trim);
        let now = now_rfc3339();
        match self.update_durable(id, name, description, &now) {
            Ok(Some(item)) => Ok(item),
            Ok(None) => self
                .memory
                .update(id, name, description, &now)
                .ok_or_else(item_not_found),
            Err(err) => {
                tracing::warn!(item_id = %id, error = %err, "item store unavailable, updating in-memory");
                self.memory
                    .update(id, name, description, &now)
                    .ok_or_else(item_not_found)
            }
        }
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let fall_back = |deleted: bool| {
            if deleted {
                Ok(())
            } else {
                Err(item_not_found())
            }
        };
        match self.delete_durable(id) {
            Ok(true) => Ok(()),
            Ok(false) => fall_back(self.memory.delete(id)),
            Err(err) => {
                tracing::warn!(item_id = %id, error = %err, "item store unavailable, deleting in-memory");
                fall_back(self.memory.delete(id))
            }
        }
    }

    fn insert_durable(&self, item: &Item) -> Result<()> {
        let db = open_db(&self.config)?;
        db.insert_item(item)?;
        Ok(())
    }

    fn get_durable(&self, id: &str) -> Result<Option<Item>> {
        let db = open_db(&self.config)?;
        Ok(db.get_item(id)?)
    }

    fn list_durable(&self) -> Result<Vec<Item>> {
        let db = open_db(&self.config)?;
        Ok(db.list_items()?)
    }

    fn update_durable(
        &self,
        id: &str,
        name: Option<&str>,
        description: Option<&str>,
        now: &str,
    ) -> Result<Option<Item>> {
        let db = open_db(&self.config)?;
        Ok(db.update_item(id, name, description, now)?)
    }

    fn delete_durable(&self, id: &str) -> Result<bool> {
        let db = open_db(&self.config)?;
        Ok(db.delete_item(id)?)
    }
}

fn item_not_found() -> AppError {
    AppError::NotFound("item not found".to_string())
}

/// Random short identifier; uniqueness is best-effort.
fn short_id() -> String {
    rand::rngs::OsRng
        .sample_iter(rand::distributions::Alphanumeric)
        .take(8)
        .map(char::from)
        .collect()
}
