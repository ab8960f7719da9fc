use anyhow::{anyhow, Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::{from_epoch_day, to_epoch_day, FoodItem, FoodType, ItemId};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

const FOOD_ITEM_COLUMNS: &str = "id, name, food_type, quantity, container, creation_date, expiration_date, image_path, image_url";

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open sqlite database '{database_url}'"))?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run food inventory migrations")?;
        tracing::debug!(database_url, "food inventory storage ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// Highest applied migration; 2 once the creation date column exists.
    pub async fn schema_version(&self) -> Result<i64> {
        let version: Option<i64> =
            sqlx::query_scalar("SELECT MAX(version) FROM _sqlx_migrations WHERE success = 1")
                .fetch_one(&self.pool)
                .await
                .context("failed to read migration history")?;
        Ok(version.unwrap_or(0))
    }

    pub async fn insert_food_item(&self, item: &FoodItem) -> Result<()> {
        sqlx::query(
            "INSERT INTO food_items (
                id, name, food_type, quantity, container,
                creation_date, expiration_date, image_path, image_url
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(item.id.as_str())
        .bind(&item.name)
        .bind(item.food_type.as_str())
        .bind(&item.quantity)
        .bind(&item.container)
        .bind(to_epoch_day(item.creation_date))
        .bind(to_epoch_day(item.expiration_date))
        .bind(item.image_path.as_deref())
        .bind(item.image_url.as_deref())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to insert food item {}", item.id))?;
        Ok(())
    }

    /// Replaces every column except `id` and `creation_date`.
    pub async fn update_food_item(&self, item: &FoodItem) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE food_items
             SET name = ?, food_type = ?, quantity = ?, container = ?,
                 expiration_date = ?, image_path = ?, image_url = ?
             WHERE id = ?",
        )
        .bind(&item.name)
        .bind(item.food_type.as_str())
        .bind(&item.quantity)
        .bind(&item.container)
        .bind(to_epoch_day(item.expiration_date))
        .bind(item.image_path.as_deref())
        .bind(item.image_url.as_deref())
        .bind(item.id.as_str())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to update food item {}", item.id))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_food_item(&self, id: &ItemId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM food_items WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete food item {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn get_food_item(&self, id: &ItemId) -> Result<Option<FoodItem>> {
        let row = sqlx::query(&format!(
            "SELECT {FOOD_ITEM_COLUMNS} FROM food_items WHERE id = ?"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(food_item_from_row).transpose()
    }

    pub async fn list_food_items(&self) -> Result<Vec<FoodItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {FOOD_ITEM_COLUMNS} FROM food_items
             ORDER BY expiration_date ASC, name COLLATE NOCASE ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .context("failed to list food items")?;
        rows.iter().map(food_item_from_row).collect()
    }

    pub async fn count_by_food_type(&self) -> Result<Vec<(FoodType, usize)>> {
        let rows = sqlx::query(
            "SELECT food_type, COUNT(*) AS item_count FROM food_items GROUP BY food_type",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to count food items by type")?;

        rows.iter()
            .map(|row| -> Result<(FoodType, usize)> {
                let key: String = row.try_get("food_type")?;
                let count: i64 = row.try_get("item_count")?;
                let food_type = FoodType::from_str(&key)
                    .with_context(|| format!("unrecognised food type {key} in counts"))?;
                let count = usize::try_from(count)
                    .with_context(|| format!("invalid count {count} for food type {key}"))?;
                Ok((food_type, count))
            })
            .collect()
    }
}

fn food_item_from_row(row: &SqliteRow) -> Result<FoodItem> {
    let id: String = row.try_get("id")?;
    let food_type_key: String = row.try_get("food_type")?;
    let food_type = FoodType::from_str(&food_type_key)
        .with_context(|| format!("food item {id} has an unreadable food type"))?;
    let creation_day: i64 = row.try_get("creation_date")?;
    let expiration_day: i64 = row.try_get("expiration_date")?;

    Ok(FoodItem {
        name: row.try_get("name")?,
        food_type,
        quantity: row.try_get("quantity")?,
        container: row.try_get("container")?,
        creation_date: from_epoch_day(creation_day)
            .ok_or_else(|| anyhow!("food item {id} has out-of-range creation date {creation_day}"))?,
        expiration_date: from_epoch_day(expiration_day).ok_or_else(|| {
            anyhow!("food item {id} has out-of-range expiration date {expiration_day}")
        })?,
        image_path: row.try_get("image_path")?,
        image_url: row.try_get("image_url")?,
        id: ItemId(id),
    })
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() || path == ":memory:" {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
