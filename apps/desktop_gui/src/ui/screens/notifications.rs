use std::sync::Arc;

use eframe::egui;
use shared::{
    domain::FoodItem,
    expiration::{days_until_expiration, describe_expiration, expiring_soon, is_expired},
};

use crate::controller::navigation::Route;
use crate::ui::app::DesktopGuiApp;

/// Expired items first, then the ones about to expire.
pub(crate) fn partition_alerts(
    items: &[FoodItem],
    today: chrono::NaiveDate,
) -> (Vec<&FoodItem>, Vec<&FoodItem>) {
    expiring_soon(items, today)
        .into_iter()
        .partition(|item| is_expired(item, today))
}

impl DesktopGuiApp {
    pub(crate) fn show_notifications(&mut self, ui: &mut egui::Ui) {
        let items = Arc::clone(&self.items);
        let (expired, soon) = partition_alerts(&items, self.today);

        if expired.is_empty() && soon.is_empty() {
            ui.label("Nothing is expiring soon.");
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for (title, group) in [("Expired", &expired), ("Expiring soon", &soon)] {
                if group.is_empty() {
                    continue;
                }
                ui.heading(format!("{title} ({})", group.len()));
                for item in group {
                    let text = format!(
                        "{}: {}",
                        item.name,
                        describe_expiration(days_until_expiration(item, self.today))
                    );
                    if ui.link(text).clicked() {
                        self.open(Route::FoodDetails(item.id.clone()));
                    }
                }
                ui.add_space(12.0);
            }
        });
    }
}
