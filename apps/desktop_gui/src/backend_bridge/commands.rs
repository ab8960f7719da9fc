//! Backend commands queued from UI to backend worker.

use shared::domain::{FoodItemDraft, ItemId};

use crate::ui::images::ImageSource;

pub enum BackendCommand {
    Refresh,
    AddItem { draft: FoodItemDraft },
    UpdateItem { id: ItemId, draft: FoodItemDraft },
    DeleteItem { id: ItemId },
    LoadImage { source: ImageSource },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Refresh => "refresh",
            BackendCommand::AddItem { .. } => "add_item",
            BackendCommand::UpdateItem { .. } => "update_item",
            BackendCommand::DeleteItem { .. } => "delete_item",
            BackendCommand::LoadImage { .. } => "load_image",
        }
    }
}
