use super::*;
use anyhow::anyhow;
use shared::domain::FoodType;
use std::path::PathBuf;
use tokio_stream::StreamExt;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("date")
}

fn draft(name: &str, food_type: FoodType, expiration: NaiveDate) -> FoodItemDraft {
    let mut draft = FoodItemDraft::new(name, food_type, expiration);
    draft.quantity = "1".into();
    draft.container = "Fridge".into();
    draft
}

async fn memory_store() -> Arc<InventoryStore> {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    InventoryStore::open_storage(storage).await.expect("store")
}

struct FailingRepository {
    reason: String,
}

#[async_trait]
impl FoodItemRepository for FailingRepository {
    async fn insert(&self, _item: &FoodItem) -> Result<()> {
        Err(anyhow!(self.reason.clone()))
    }

    async fn update(&self, _item: &FoodItem) -> Result<bool> {
        Err(anyhow!(self.reason.clone()))
    }

    async fn delete(&self, _id: &ItemId) -> Result<bool> {
        Err(anyhow!(self.reason.clone()))
    }

    async fn get(&self, _id: &ItemId) -> Result<Option<FoodItem>> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<FoodItem>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn add_publishes_new_list_to_subscribers() {
    let store = memory_store().await;
    let mut rx = store.subscribe();
    assert!(rx.borrow_and_update().is_empty());

    let item = store
        .add_food_item(draft("Milk", FoodType::Dairy, date(2024, 3, 10)), date(2024, 3, 1))
        .await
        .expect("add");

    assert!(rx.has_changed().expect("sender alive"));
    let items = rx.borrow_and_update().clone();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0], item);
    assert_eq!(item.creation_date, date(2024, 3, 1));
}

#[tokio::test]
async fn delete_removes_item_and_detail_lookup_returns_none() {
    let store = memory_store().await;
    let keep = store
        .add_food_item(draft("Rice", FoodType::Pantry, date(2025, 1, 1)), date(2024, 1, 1))
        .await
        .expect("add keep");
    let gone = store
        .add_food_item(draft("Basil", FoodType::Produce, date(2024, 1, 4)), date(2024, 1, 1))
        .await
        .expect("add gone");

    store.delete_food_item(&gone.id).await.expect("delete");

    assert!(store.find_item(&gone.id).is_none());
    assert_eq!(store.find_item(&keep.id), Some(keep.clone()));
    assert_eq!(store.items().as_slice(), &[keep]);
}

#[tokio::test]
async fn edit_preserves_identity_and_creation_date() {
    let store = memory_store().await;
    let original = store
        .add_food_item(draft("Chicken", FoodType::Meats, date(2024, 2, 1)), date(2024, 1, 20))
        .await
        .expect("add");

    let mut edit = draft("Turkey", FoodType::Other, date(2024, 2, 9));
    edit.quantity = "2 lb".into();
    edit.container = "Freezer".into();
    edit.image_path = Some("/photos/turkey.jpg".into());

    let updated = store
        .update_food_item(&original.id, edit)
        .await
        .expect("update");

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.creation_date, original.creation_date);
    assert_eq!(updated.name, "Turkey");
    assert_eq!(updated.food_type, FoodType::Other);
    assert_eq!(updated.quantity, "2 lb");
    assert_eq!(updated.container, "Freezer");
    assert_eq!(updated.expiration_date, date(2024, 2, 9));
    assert_eq!(updated.image_path.as_deref(), Some("/photos/turkey.jpg"));
    assert_eq!(store.find_item(&original.id), Some(updated));
}

#[tokio::test]
async fn unknown_ids_report_not_found() {
    let store = memory_store().await;
    let missing = ItemId::from("missing");

    let err = store
        .update_food_item(&missing, draft("x", FoodType::Other, date(2024, 1, 1)))
        .await
        .expect_err("update unknown");
    assert!(matches!(err, InventoryError::NotFound(_)));

    let err = store
        .delete_food_item(&missing)
        .await
        .expect_err("delete unknown");
    assert!(matches!(err, InventoryError::NotFound(_)));
}

#[tokio::test]
async fn invalid_draft_never_reaches_storage() {
    let store = memory_store().await;
    let err = store
        .add_food_item(draft("  ", FoodType::Other, date(2024, 1, 1)), date(2024, 1, 1))
        .await
        .expect_err("blank name");
    assert!(matches!(err, InventoryError::Validation(_)));
    assert!(store.items().is_empty());
}

#[tokio::test]
async fn derived_views_follow_the_live_list() {
    let store = memory_store().await;
    let today = date(2024, 6, 1);
    for (name, food_type, expiration) in [
        ("Strawberries", FoodType::Produce, date(2024, 6, 2)),
        ("Cream", FoodType::Dairy, date(2024, 5, 30)),
        ("Flour", FoodType::Pantry, date(2025, 1, 1)),
        ("Beef", FoodType::Meats, date(2024, 6, 3)),
    ] {
        store
            .add_food_item(draft(name, food_type, expiration), today)
            .await
            .expect("add");
    }

    let mut expiring: Vec<_> = store
        .expiring_soon(today)
        .into_iter()
        .map(|item| item.name)
        .collect();
    expiring.sort();
    assert_eq!(expiring, vec!["Cream", "Strawberries"]);

    let summary = store.summary();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.count_for(FoodType::Meats), 1);
    assert_eq!(summary.count_for(FoodType::Other), 0);
}

#[tokio::test]
async fn item_stream_starts_with_current_snapshot() {
    let store = memory_store().await;
    let mut stream = store.item_stream();
    let first = stream.next().await.expect("initial snapshot");
    assert!(first.is_empty());

    store
        .add_food_item(draft("Kale", FoodType::Produce, date(2024, 1, 5)), date(2024, 1, 1))
        .await
        .expect("add");
    let second = stream.next().await.expect("updated snapshot");
    assert_eq!(second.len(), 1);
}

#[tokio::test]
async fn spawned_writes_complete_in_the_background() {
    let store = memory_store().await;
    let mut rx = store.subscribe();

    store
        .spawn_add(draft("Tofu", FoodType::Other, date(2024, 2, 1)), date(2024, 1, 1))
        .await
        .expect("add task")
        .expect("add");
    rx.changed().await.expect("list republished");
    let item = rx.borrow_and_update()[0].clone();

    let mut edit = FoodItemDraft::from_item(&item);
    edit.quantity = "2 blocks".into();
    store
        .spawn_update(item.id.clone(), edit)
        .await
        .expect("update task")
        .expect("update");
    assert_eq!(
        store.find_item(&item.id).map(|found| found.quantity),
        Some("2 blocks".to_string())
    );

    store
        .spawn_delete(item.id.clone())
        .await
        .expect("delete task")
        .expect("delete");
    assert!(store.items().is_empty());
}

#[tokio::test]
async fn failed_background_write_leaves_list_untouched() {
    let store = InventoryStore::open(Arc::new(FailingRepository {
        reason: "disk full".into(),
    }))
    .await
    .expect("store");
    let rx = store.subscribe();

    let err = store
        .spawn_add(draft("Soup", FoodType::Pantry, date(2024, 2, 1)), date(2024, 1, 1))
        .await
        .expect("task completes even when the write fails")
        .expect_err("background write reports the failure");
    assert!(err.to_string().contains("disk full"));

    assert!(!rx.has_changed().expect("sender alive"));
    assert!(store.items().is_empty());

    let err = store
        .add_food_item(draft("Soup", FoodType::Pantry, date(2024, 2, 1)), date(2024, 1, 1))
        .await
        .expect_err("awaited write surfaces the failure");
    assert!(err.to_string().contains("disk full"));
}

#[tokio::test]
async fn attaches_only_fresh_captures() {
    let store = memory_store().await;
    let item = store
        .add_food_item(draft("Pears", FoodType::Produce, date(2024, 5, 20)), date(2024, 5, 10))
        .await
        .expect("add");
    let record = CaptureRecord {
        photo: PathBuf::from("/captures/photo_2024-05-10_12-00-00.jpg"),
        timestamp: "2024-05-10T12:00:00".parse().expect("timestamp"),
    };

    let stale_now: NaiveDateTime = "2024-05-10T13:00:00".parse().expect("timestamp");
    let err = store
        .attach_capture(&item.id, &record, stale_now, Duration::minutes(30))
        .await
        .expect_err("stale capture");
    assert!(matches!(err, InventoryError::Validation(_)));

    let fresh_now: NaiveDateTime = "2024-05-10T12:10:00".parse().expect("timestamp");
    let updated = store
        .attach_capture(&item.id, &record, fresh_now, Duration::minutes(30))
        .await
        .expect("fresh capture");
    assert_eq!(
        updated.image_path.as_deref(),
        Some("/captures/photo_2024-05-10_12-00-00.jpg")
    );
    assert_eq!(updated.name, "Pears");
    assert_eq!(updated.creation_date, item.creation_date);
}
