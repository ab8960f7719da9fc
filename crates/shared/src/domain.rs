use std::{fmt, str::FromStr};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::{InventoryError, InventoryResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FoodType {
    #[default]
    Produce,
    Dairy,
    Meats,
    Pantry,
    Other,
}

impl FoodType {
    /// Display order used by pickers and the category summary.
    pub const ALL: [FoodType; 5] = [
        FoodType::Produce,
        FoodType::Dairy,
        FoodType::Meats,
        FoodType::Pantry,
        FoodType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FoodType::Produce => "produce",
            FoodType::Dairy => "dairy",
            FoodType::Meats => "meats",
            FoodType::Pantry => "pantry",
            FoodType::Other => "other",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FoodType::Produce => "Produce",
            FoodType::Dairy => "Dairy",
            FoodType::Meats => "Meats",
            FoodType::Pantry => "Pantry",
            FoodType::Other => "Other",
        }
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for FoodType {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        FoodType::ALL
            .into_iter()
            .find(|food_type| food_type.as_str() == key)
            .ok_or_else(|| InventoryError::Validation(format!("unknown food type '{s}'")))
    }
}

/// One inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: ItemId,
    pub name: String,
    pub food_type: FoodType,
    pub quantity: String,
    pub container: String,
    pub creation_date: NaiveDate,
    pub expiration_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// The user-editable part of a [`FoodItem`]; identity and creation date are
/// owned by the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItemDraft {
    pub name: String,
    pub food_type: FoodType,
    pub quantity: String,
    pub container: String,
    pub expiration_date: NaiveDate,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl FoodItemDraft {
    pub fn new(name: impl Into<String>, food_type: FoodType, expiration_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            food_type,
            quantity: String::new(),
            container: String::new(),
            expiration_date,
            image_path: None,
            image_url: None,
        }
    }

    pub fn from_item(item: &FoodItem) -> Self {
        Self {
            name: item.name.clone(),
            food_type: item.food_type,
            quantity: item.quantity.clone(),
            container: item.container.clone(),
            expiration_date: item.expiration_date,
            image_path: item.image_path.clone(),
            image_url: item.image_url.clone(),
        }
    }

    pub fn validate(&self) -> InventoryResult<()> {
        if self.name.trim().is_empty() {
            return Err(InventoryError::Validation("name must not be empty".into()));
        }
        if let Some(raw) = self.image_url.as_deref() {
            Url::parse(raw).map_err(|err| {
                InventoryError::Validation(format!("invalid image url '{raw}': {err}"))
            })?;
        }
        Ok(())
    }

    /// Trims text fields and turns blank optional fields into `None`.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.quantity = self.quantity.trim().to_string();
        self.container = self.container.trim().to_string();
        self.image_path = non_blank(self.image_path);
        self.image_url = non_blank(self.image_url);
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl FoodItem {
    pub fn create(draft: FoodItemDraft, today: NaiveDate) -> InventoryResult<Self> {
        let draft = draft.normalized();
        draft.validate()?;
        Ok(Self {
            id: ItemId::generate(),
            name: draft.name,
            food_type: draft.food_type,
            quantity: draft.quantity,
            container: draft.container,
            creation_date: today,
            expiration_date: draft.expiration_date,
            image_path: draft.image_path,
            image_url: draft.image_url,
        })
    }

    /// Full-record replacement keeping `id` and `creation_date`.
    pub fn apply_edit(&self, draft: FoodItemDraft) -> InventoryResult<Self> {
        let draft = draft.normalized();
        draft.validate()?;
        Ok(Self {
            id: self.id.clone(),
            name: draft.name,
            food_type: draft.food_type,
            quantity: draft.quantity,
            container: draft.container,
            creation_date: self.creation_date,
            expiration_date: draft.expiration_date,
            image_path: draft.image_path,
            image_url: draft.image_url,
        })
    }

    pub fn has_image(&self) -> bool {
        self.image_path.is_some() || self.image_url.is_some()
    }
}

fn unix_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

pub fn to_epoch_day(date: NaiveDate) -> i64 {
    date.signed_duration_since(unix_epoch()).num_days()
}

pub fn from_epoch_day(days: i64) -> Option<NaiveDate> {
    unix_epoch().checked_add_signed(Duration::try_days(days)?)
}
