use std::sync::Arc;

use eframe::egui;
use shared::{
    domain::FoodItem,
    expiration::{days_until_expiration, describe_expiration, expiring_soon},
    summary::{InventorySummary, BAR_MAX_HEIGHT},
};

use crate::controller::navigation::Route;
use crate::ui::{app::DesktopGuiApp, images::photo_or_placeholder};

const CARD_WIDTH: f32 = 140.0;
const BAR_WIDTH: f32 = 44.0;

impl DesktopGuiApp {
    pub(crate) fn show_overview(&mut self, ui: &mut egui::Ui) {
        let items = Arc::clone(&self.items);
        let expiring: Vec<&FoodItem> = expiring_soon(&items, self.today);

        egui::ScrollArea::vertical().show(ui, |ui| {
            if !expiring.is_empty() {
                ui.heading("Expiring Soon");
                ui.add_space(6.0);
                egui::ScrollArea::horizontal()
                    .id_salt("expiring_cards")
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            for item in &expiring {
                                self.expiring_card(ui, item);
                            }
                        });
                    });
                ui.add_space(16.0);
            }

            ui.heading("Inventory Summary");
            ui.add_space(6.0);
            let summary = InventorySummary::from_items(&items);
            self.summary_chart(ui, &summary);
        });
    }

    fn expiring_card(&mut self, ui: &mut egui::Ui, item: &FoodItem) {
        let texture = self.item_texture(item);
        let days = days_until_expiration(item, self.today);
        let response = egui::Frame::group(ui.style())
            .corner_radius(10)
            .show(ui, |ui| {
                ui.set_width(CARD_WIDTH);
                ui.vertical(|ui| {
                    photo_or_placeholder(ui, texture.as_ref(), egui::vec2(CARD_WIDTH, 96.0));
                    ui.strong(&item.name);
                    ui.small(describe_expiration(days));
                });
            })
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);
        if response.clicked() {
            self.open(Route::FoodDetails(item.id.clone()));
        }
    }

    fn summary_chart(&self, ui: &mut egui::Ui, summary: &InventorySummary) {
        let bar_color = self.palette(ui.ctx()).primary;
        egui::Frame::group(ui.style())
            .corner_radius(10)
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.label(format!("Total Items: {}", summary.total));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    for category in &summary.categories {
                        ui.vertical(|ui| {
                            ui.set_width(BAR_WIDTH + 12.0);
                            ui.vertical_centered(|ui| ui.label(category.count.to_string()));
                            let (rect, _) = ui.allocate_exact_size(
                                egui::vec2(BAR_WIDTH, BAR_MAX_HEIGHT),
                                egui::Sense::hover(),
                            );
                            let height = category.bar_height(summary.total, BAR_MAX_HEIGHT);
                            let bar = egui::Rect::from_min_max(
                                egui::pos2(rect.left(), rect.bottom() - height),
                                rect.right_bottom(),
                            );
                            ui.painter().rect_filled(bar, 4.0, bar_color);
                            ui.vertical_centered(|ui| {
                                ui.small(category.food_type.display_name())
                            });
                        });
                    }
                });
            });
    }
}
