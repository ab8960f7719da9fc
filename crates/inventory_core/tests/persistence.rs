use chrono::NaiveDate;
use inventory_core::{config::normalize_database_url, InventoryStore};
use shared::domain::{FoodItemDraft, FoodType};
use storage::Storage;

#[tokio::test]
async fn items_survive_reopening_the_inventory() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let database_url =
        normalize_database_url(&temp_root.path().join("data").join("inventory.db").to_string_lossy());
    let today = NaiveDate::from_ymd_opt(2024, 4, 1).expect("date");

    let added = {
        let storage = Storage::new(&database_url).await.expect("db");
        let store = InventoryStore::open_storage(storage.clone())
            .await
            .expect("store");
        let mut draft = FoodItemDraft::new(
            "Greek yogurt",
            FoodType::Dairy,
            NaiveDate::from_ymd_opt(2024, 4, 2).expect("date"),
        );
        draft.container = "Top shelf".into();
        let added = store.add_food_item(draft, today).await.expect("add");
        storage.pool().close().await;
        added
    };

    let storage = Storage::new(&database_url).await.expect("reopen");
    let store = InventoryStore::open_storage(storage).await.expect("store");
    assert_eq!(store.find_item(&added.id), Some(added.clone()));
    assert_eq!(
        store
            .expiring_soon(today)
            .into_iter()
            .map(|item| item.id)
            .collect::<Vec<_>>(),
        vec![added.id]
    );
}
