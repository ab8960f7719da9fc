use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
    Conflict,
    Storage,
    Internal,
}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("food item {0} not found")]
    NotFound(ItemId),
    #[error("invalid food item: {0}")]
    Validation(String),
    #[error("food item {0} already exists")]
    Conflict(ItemId),
    #[error("storage failure: {0}")]
    Storage(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl InventoryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::Validation,
            Self::Conflict(_) => ErrorCode::Conflict,
            Self::Storage(_) => ErrorCode::Storage,
            Self::Internal(_) => ErrorCode::Internal,
        }
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;
