//! Backend-to-UI events and error modeling for the desktop GUI controller.

use inventory_core::ItemList;
use shared::{
    domain::ItemId,
    error::{ErrorCode, InventoryError},
};

use crate::ui::images::{ImageSource, PreviewImage};

pub enum UiEvent {
    Info(String),
    ItemsUpdated(ItemList),
    ItemSaved(ItemId),
    ItemDeleted(ItemId),
    ImageLoaded {
        source: ImageSource,
        image: PreviewImage,
    },
    ImageFailed {
        source: ImageSource,
        reason: String,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    NotFound,
    Storage,
    Network,
    Unknown,
}

impl UiErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            UiErrorCategory::Validation => "Validation",
            UiErrorCategory::NotFound => "Not found",
            UiErrorCategory::Storage => "Storage",
            UiErrorCategory::Network => "Network",
            UiErrorCategory::Unknown => "Unexpected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    SaveItem,
    DeleteItem,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_inventory(context: UiErrorContext, err: &InventoryError) -> Self {
        let category = match err.code() {
            ErrorCode::Validation | ErrorCode::Conflict => UiErrorCategory::Validation,
            ErrorCode::NotFound => UiErrorCategory::NotFound,
            ErrorCode::Storage => UiErrorCategory::Storage,
            ErrorCode::Internal => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("not found") || lower.contains("no such file") {
            UiErrorCategory::NotFound
        } else if lower.contains("sqlite")
            || lower.contains("database")
            || lower.contains("migration")
            || lower.contains("storage")
        {
            UiErrorCategory::Storage
        } else if lower.contains("timed out")
            || lower.contains("connection")
            || lower.contains("dns")
            || lower.contains("http")
        {
            UiErrorCategory::Network
        } else if lower.contains("invalid")
            || lower.contains("malformed")
            || lower.contains("required")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_fatal(&self) -> bool {
        self.context == UiErrorContext::BackendStartup
    }
}
