use eframe::egui;
use shared::{
    domain::ItemId,
    expiration::{days_until_expiration, describe_expiration},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::navigation::Route;
use crate::ui::{app::DesktopGuiApp, images::photo_or_placeholder, screens::format_date};

impl DesktopGuiApp {
    /// Renders nothing when the item is unknown, e.g. right after a delete.
    pub(crate) fn show_food_details(&mut self, ui: &mut egui::Ui, id: &ItemId) {
        let Some(item) = self.find_item(id) else {
            return;
        };
        let texture = self.item_texture(&item);
        let days = days_until_expiration(&item, self.today);

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading(&item.name);
            ui.add_space(8.0);
            photo_or_placeholder(ui, texture.as_ref(), egui::vec2(320.0, 220.0));
            ui.add_space(8.0);
            ui.strong(describe_expiration(days));
            ui.add_space(8.0);

            egui::Grid::new("food_details_grid")
                .num_columns(2)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    let rows = [
                        ("Food Type", item.food_type.display_name().to_string()),
                        ("Container", item.container.clone()),
                        ("Quantity", item.quantity.clone()),
                        ("Expires On", format_date(item.expiration_date)),
                        ("Added On", format_date(item.creation_date)),
                    ];
                    for (label, value) in rows {
                        ui.label(egui::RichText::new(label).weak());
                        ui.label(value);
                        ui.end_row();
                    }
                    if let Some(url) = &item.image_url {
                        ui.label(egui::RichText::new("Image URL").weak());
                        ui.hyperlink(url);
                        ui.end_row();
                    }
                });

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if ui.button("Edit").clicked() {
                    self.open(Route::EditItem(item.id.clone()));
                }
                if ui.button("Delete").clicked()
                    && self.send(BackendCommand::DeleteItem {
                        id: item.id.clone(),
                    })
                {
                    self.go_back();
                }
            });
        });
    }
}
