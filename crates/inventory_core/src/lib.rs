//! View-model layer: forwards create/read/update/delete calls to a
//! [`FoodItemRepository`] and republishes the full item list after each write.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use shared::{
    capture::CaptureRecord,
    domain::{FoodItem, FoodItemDraft, ItemId},
    error::{InventoryError, InventoryResult},
    expiration,
    summary::InventorySummary,
};
use storage::Storage;
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
};
use tokio_stream::wrappers::WatchStream;
use tracing::{error, info};

pub mod config;

pub type ItemList = Arc<Vec<FoodItem>>;

#[async_trait]
pub trait FoodItemRepository: Send + Sync {
    async fn insert(&self, item: &FoodItem) -> Result<()>;
    async fn update(&self, item: &FoodItem) -> Result<bool>;
    async fn delete(&self, id: &ItemId) -> Result<bool>;
    async fn get(&self, id: &ItemId) -> Result<Option<FoodItem>>;
    async fn list(&self) -> Result<Vec<FoodItem>>;
}

#[async_trait]
impl FoodItemRepository for Storage {
    async fn insert(&self, item: &FoodItem) -> Result<()> {
        self.insert_food_item(item).await
    }

    async fn update(&self, item: &FoodItem) -> Result<bool> {
        self.update_food_item(item).await
    }

    async fn delete(&self, id: &ItemId) -> Result<bool> {
        self.delete_food_item(id).await
    }

    async fn get(&self, id: &ItemId) -> Result<Option<FoodItem>> {
        self.get_food_item(id).await
    }

    async fn list(&self) -> Result<Vec<FoodItem>> {
        self.list_food_items().await
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn storage_error(err: anyhow::Error) -> InventoryError {
    InventoryError::Storage(format!("{err:#}"))
}

pub struct InventoryStore {
    repository: Arc<dyn FoodItemRepository>,
    items: watch::Sender<ItemList>,
    // Serializes read-then-publish so a slower refresh never overwrites a newer list.
    publish: Mutex<()>,
}

impl InventoryStore {
    pub async fn open(repository: Arc<dyn FoodItemRepository>) -> InventoryResult<Arc<Self>> {
        let initial = repository.list().await.map_err(storage_error)?;
        info!(items = initial.len(), "inventory loaded");
        let (items, _) = watch::channel(Arc::new(initial));
        Ok(Arc::new(Self {
            repository,
            items,
            publish: Mutex::new(()),
        }))
    }

    pub async fn open_storage(storage: Storage) -> InventoryResult<Arc<Self>> {
        Self::open(Arc::new(storage)).await
    }

    /// Live item list; the receiver sees every republished snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ItemList> {
        self.items.subscribe()
    }

    /// Yields the current list immediately, then every later snapshot.
    pub fn item_stream(&self) -> WatchStream<ItemList> {
        WatchStream::new(self.subscribe())
    }

    pub fn items(&self) -> ItemList {
        self.items.borrow().clone()
    }

    pub fn find_item(&self, id: &ItemId) -> Option<FoodItem> {
        self.items.borrow().iter().find(|item| &item.id == id).cloned()
    }

    pub fn expiring_soon(&self, today: NaiveDate) -> Vec<FoodItem> {
        let items = self.items();
        expiration::expiring_soon(&items, today)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn summary(&self) -> InventorySummary {
        InventorySummary::from_items(&self.items())
    }

    pub async fn refresh(&self) -> InventoryResult<ItemList> {
        let _guard = self.publish.lock().await;
        let latest = Arc::new(self.repository.list().await.map_err(storage_error)?);
        self.items.send_replace(latest.clone());
        Ok(latest)
    }

    pub async fn add_food_item(
        &self,
        draft: FoodItemDraft,
        today: NaiveDate,
    ) -> InventoryResult<FoodItem> {
        let item = FoodItem::create(draft, today)?;
        if self
            .repository
            .get(&item.id)
            .await
            .map_err(storage_error)?
            .is_some()
        {
            return Err(InventoryError::Conflict(item.id));
        }
        self.repository
            .insert(&item)
            .await
            .map_err(storage_error)?;
        info!(item_id = %item.id, name = %item.name, "food item added");
        self.refresh().await?;
        Ok(item)
    }

    pub async fn update_food_item(
        &self,
        id: &ItemId,
        draft: FoodItemDraft,
    ) -> InventoryResult<FoodItem> {
        let existing = self
            .repository
            .get(id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| InventoryError::NotFound(id.clone()))?;
        let updated = existing.apply_edit(draft)?;
        if !self
            .repository
            .update(&updated)
            .await
            .map_err(storage_error)?
        {
            return Err(InventoryError::NotFound(id.clone()));
        }
        info!(item_id = %id, "food item updated");
        self.refresh().await?;
        Ok(updated)
    }

    pub async fn delete_food_item(&self, id: &ItemId) -> InventoryResult<()> {
        if !self.repository.delete(id).await.map_err(storage_error)? {
            return Err(InventoryError::NotFound(id.clone()));
        }
        info!(item_id = %id, "food item deleted");
        self.refresh().await?;
        Ok(())
    }

    pub async fn attach_photo(&self, id: &ItemId, path: String) -> InventoryResult<FoodItem> {
        let existing = self
            .repository
            .get(id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| InventoryError::NotFound(id.clone()))?;
        let mut draft = FoodItemDraft::from_item(&existing);
        draft.image_path = Some(path);
        self.update_food_item(id, draft).await
    }

    /// Attaches the photo named by a capture record if it is recent enough.
    pub async fn attach_capture(
        &self,
        id: &ItemId,
        record: &CaptureRecord,
        now: NaiveDateTime,
        max_age: Duration,
    ) -> InventoryResult<FoodItem> {
        if !record.is_fresh(now, max_age) {
            return Err(InventoryError::Validation(format!(
                "capture from {} is older than {} minutes",
                record.timestamp,
                max_age.num_minutes()
            )));
        }
        self.attach_photo(id, record.photo_path()).await
    }

    /// Background variants of the writes. Failures are logged here and still
    /// returned through the handle so callers can report them.
    pub fn spawn_add(
        self: &Arc<Self>,
        draft: FoodItemDraft,
        today: NaiveDate,
    ) -> JoinHandle<InventoryResult<FoodItem>> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let result = store.add_food_item(draft, today).await;
            if let Err(err) = &result {
                error!("add food item failed: {err}");
            }
            result
        })
    }

    pub fn spawn_update(
        self: &Arc<Self>,
        id: ItemId,
        draft: FoodItemDraft,
    ) -> JoinHandle<InventoryResult<FoodItem>> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let result = store.update_food_item(&id, draft).await;
            if let Err(err) = &result {
                error!(item_id = %id, "update food item failed: {err}");
            }
            result
        })
    }

    pub fn spawn_delete(self: &Arc<Self>, id: ItemId) -> JoinHandle<InventoryResult<()>> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let result = store.delete_food_item(&id).await;
            if let Err(err) = &result {
                error!(item_id = %id, "delete food item failed: {err}");
            }
            result
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
