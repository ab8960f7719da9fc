use eframe::egui;

use crate::controller::navigation::Route;
use crate::ui::{
    app::DesktopGuiApp,
    theme::{ThemeMode, ThemePreset},
};

impl DesktopGuiApp {
    pub(crate) fn show_settings(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Notifications");
            if ui.button("Expiration alerts").clicked() {
                self.open(Route::Notifications);
            }
            ui.separator();

            ui.heading("Theme");
            egui::ComboBox::from_label("Style")
                .selected_text(self.theme.preset.label())
                .show_ui(ui, |ui| {
                    for preset in ThemePreset::ALL {
                        ui.selectable_value(&mut self.theme.preset, preset, preset.label());
                    }
                });
            ui.horizontal(|ui| {
                for mode in ThemeMode::ALL {
                    ui.radio_value(&mut self.theme.mode, mode, mode.label());
                }
            });
            ui.separator();

            ui.heading("About");
            ui.label(format!("App version {}", env!("CARGO_PKG_VERSION")));
        });
    }
}
