use serde::{Deserialize, Serialize};

use crate::domain::{FoodItem, FoodType};

/// Tallest bar drawn in the overview's category chart.
pub const BAR_MAX_HEIGHT: f32 = 137.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub food_type: FoodType,
    pub count: usize,
}

impl CategoryCount {
    pub fn bar_height(&self, total: usize, max_height: f32) -> f32 {
        if total == 0 {
            return 0.0;
        }
        max_height * (self.count as f32 / total as f32)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total: usize,
    pub categories: Vec<CategoryCount>,
}

impl InventorySummary {
    pub fn from_items(items: &[FoodItem]) -> Self {
        Self::from_counts(FoodType::ALL.into_iter().map(|food_type| {
            let count = items
                .iter()
                .filter(|item| item.food_type == food_type)
                .count();
            (food_type, count)
        }))
    }

    /// Builds a summary from precomputed counts; missing categories count as zero.
    pub fn from_counts(counts: impl IntoIterator<Item = (FoodType, usize)>) -> Self {
        let mut categories: Vec<CategoryCount> = FoodType::ALL
            .into_iter()
            .map(|food_type| CategoryCount {
                food_type,
                count: 0,
            })
            .collect();
        for (food_type, count) in counts {
            if let Some(slot) = categories.iter_mut().find(|c| c.food_type == food_type) {
                slot.count += count;
            }
        }
        let total = categories.iter().map(|c| c.count).sum();
        Self { total, categories }
    }

    pub fn count_for(&self, food_type: FoodType) -> usize {
        self.categories
            .iter()
            .find(|c| c.food_type == food_type)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}
