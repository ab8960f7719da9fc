use std::sync::Arc;

use eframe::egui;
use shared::{
    domain::FoodItem,
    expiration::{expiration_band, ExpirationBand},
};

use crate::controller::navigation::Route;
use crate::ui::{
    app::DesktopGuiApp,
    images::photo_or_placeholder,
    screens::format_date,
    theme::{CRITICAL_TINT, WARNING_TINT},
};

pub(crate) fn type_and_quantity(item: &FoodItem) -> String {
    if item.quantity.is_empty() {
        item.food_type.display_name().to_string()
    } else {
        format!("{} • {}", item.food_type.display_name(), item.quantity)
    }
}

fn band_tint(band: ExpirationBand) -> Option<egui::Color32> {
    match band {
        ExpirationBand::Critical => Some(CRITICAL_TINT),
        ExpirationBand::Warning => Some(WARNING_TINT),
        ExpirationBand::Fresh => None,
    }
}

impl DesktopGuiApp {
    pub(crate) fn show_all_items(&mut self, ui: &mut egui::Ui) {
        let items = Arc::clone(&self.items);
        if items.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.label(egui::RichText::new("No items yet").size(18.0).weak());
            });
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for item in items.iter() {
                self.item_row(ui, item);
                ui.add_space(6.0);
            }
        });
    }

    fn item_row(&mut self, ui: &mut egui::Ui, item: &FoodItem) {
        let texture = self.item_texture(item);
        let fill = band_tint(expiration_band(item, self.today))
            .map(|tint| tint.gamma_multiply(0.45))
            .unwrap_or(ui.visuals().extreme_bg_color);

        let response = egui::Frame::new()
            .fill(fill)
            .corner_radius(10)
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    photo_or_placeholder(ui, texture.as_ref(), egui::vec2(56.0, 56.0));
                    ui.vertical(|ui| {
                        ui.strong(&item.name);
                        ui.label(type_and_quantity(item));
                        ui.small(format!("Expires: {}", format_date(item.expiration_date)));
                    });
                });
            })
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);
        if response.clicked() {
            self.open(Route::FoodDetails(item.id.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::domain::{FoodItemDraft, FoodType};

    fn item(quantity: &str) -> FoodItem {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).expect("date");
        let mut draft = FoodItemDraft::new("Milk", FoodType::Dairy, today);
        draft.quantity = quantity.to_string();
        FoodItem::create(draft, today).expect("item")
    }

    #[test]
    fn row_subtitle_joins_type_and_quantity() {
        assert_eq!(type_and_quantity(&item("2 L")), "Dairy • 2 L");
        assert_eq!(type_and_quantity(&item("")), "Dairy");
    }

    #[test]
    fn only_urgent_bands_are_tinted() {
        assert_eq!(band_tint(ExpirationBand::Critical), Some(CRITICAL_TINT));
        assert_eq!(band_tint(ExpirationBand::Warning), Some(WARNING_TINT));
        assert_eq!(band_tint(ExpirationBand::Fresh), None);
    }

    #[test]
    fn dates_render_in_month_day_year_form() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");
        assert_eq!(format_date(date), "Mar 9, 2024");
    }
}
