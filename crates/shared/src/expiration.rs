//! Expiration arithmetic shared by the overview, the item list and the CLI.

use chrono::NaiveDate;

use crate::domain::FoodItem;

/// Items with fewer than this many days left count as expiring soon.
pub const EXPIRING_SOON_DAYS: i64 = 2;
/// Items with fewer than this many days left are flagged in the item list.
pub const WARNING_DAYS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationBand {
    Critical,
    Warning,
    Fresh,
}

impl ExpirationBand {
    pub fn for_days(days: i64) -> Self {
        if days < EXPIRING_SOON_DAYS {
            Self::Critical
        } else if days < WARNING_DAYS {
            Self::Warning
        } else {
            Self::Fresh
        }
    }
}

pub fn days_until_expiration(item: &FoodItem, today: NaiveDate) -> i64 {
    item.expiration_date.signed_duration_since(today).num_days()
}

/// Already-expired items are included.
pub fn is_expiring_soon(item: &FoodItem, today: NaiveDate) -> bool {
    days_until_expiration(item, today) < EXPIRING_SOON_DAYS
}

pub fn is_expired(item: &FoodItem, today: NaiveDate) -> bool {
    days_until_expiration(item, today) < 0
}

pub fn expiration_band(item: &FoodItem, today: NaiveDate) -> ExpirationBand {
    ExpirationBand::for_days(days_until_expiration(item, today))
}

pub fn expiring_soon(items: &[FoodItem], today: NaiveDate) -> Vec<&FoodItem> {
    items
        .iter()
        .filter(|item| is_expiring_soon(item, today))
        .collect()
}

pub fn describe_expiration(days: i64) -> String {
    match days {
        0 => "Expires today".to_string(),
        1 => "Expires in 1 day".to_string(),
        -1 => "Expired 1 day ago".to_string(),
        d if d < 0 => format!("Expired {} days ago", -d),
        d => format!("Expires in {d} days"),
    }
}
