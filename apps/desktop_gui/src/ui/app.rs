use std::{path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use inventory_core::{config, config::normalize_database_url, today, ItemList};
use serde::{Deserialize, Serialize};
use shared::domain::FoodItem;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiEvent},
    navigation::{Navigator, Route, TABS},
    orchestration::dispatch_backend_command,
};
use crate::ui::{
    images::{ImageCache, ImageSource},
    screens::edit::ItemForm,
    theme::{palette, visuals_for_palette, Palette, ThemeSettings},
};

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub data_dir: Option<PathBuf>,
    pub database_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub db_path: PathBuf,
}

impl AppPaths {
    pub fn from_startup(startup: &StartupConfig) -> anyhow::Result<Self> {
        let root = if let Some(p) = &startup.data_dir {
            p.clone()
        } else {
            let base = dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("unable to resolve local app data dir"))?;
            base.join("food_inventory")
        };

        Ok(Self {
            db_path: root.join("food_inventory.db"),
            data_root: root,
        })
    }
}

/// Command line first, then configured settings, then the per-user data dir.
pub fn resolve_database_url(startup: &StartupConfig) -> String {
    if let Some(url) = &startup.database_url {
        return normalize_database_url(url);
    }
    let settings = config::load_settings();
    match AppPaths::from_startup(startup) {
        Ok(paths) => {
            tracing::debug!(data_root = %paths.data_root.display(), "using app data dir");
            settings.database_url_or(&paths.db_path)
        }
        Err(err) => {
            tracing::warn!("{err}; falling back to the working directory database");
            settings.database_url()
        }
    }
}

pub const SETTINGS_STORAGE_KEY: &str = "food_inventory.settings";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedDesktopSettings {
    pub theme: ThemeSettings,
}

impl PersistedDesktopSettings {
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Option<Self> {
        storage.and_then(|storage| {
            storage
                .get_string(SETTINGS_STORAGE_KEY)
                .and_then(|text| serde_json::from_str::<Self>(&text).ok())
        })
    }
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    pub(crate) items: ItemList,
    pub(crate) navigator: Navigator,
    pub(crate) form: Option<ItemForm>,
    pub(crate) images: ImageCache,
    pub(crate) theme: ThemeSettings,
    applied_theme: Option<(ThemeSettings, bool)>,
    pub(crate) status: String,
    status_banner: Option<UiError>,
    pub(crate) today: NaiveDate,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted_settings: Option<PersistedDesktopSettings>,
    ) -> Self {
        let settings = persisted_settings.unwrap_or_default();
        Self {
            cmd_tx,
            ui_rx,
            items: Arc::new(Vec::new()),
            navigator: Navigator::default(),
            form: None,
            images: ImageCache::default(),
            theme: settings.theme,
            applied_theme: None,
            status: "Loading inventory...".to_string(),
            status_banner: None,
            today: today(),
        }
    }

    /// Starts on `route` instead of the overview; tabs keep single-top semantics.
    pub fn with_initial_route(mut self, route: Route) -> Self {
        if route.is_tab() {
            self.navigator.navigate_tab(route);
        } else {
            self.navigator.navigate(route);
        }
        self
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::ItemsUpdated(items) => {
                    self.status = format!("{} items", items.len());
                    self.items = items;
                }
                UiEvent::ItemSaved(id) => {
                    tracing::debug!(item_id = %id, "item saved");
                    self.status_banner = None;
                }
                UiEvent::ItemDeleted(id) => {
                    tracing::debug!(item_id = %id, "item deleted");
                    self.status_banner = None;
                }
                UiEvent::ImageLoaded { source, image } => {
                    self.images.store_loaded(ctx, source, image);
                }
                UiEvent::ImageFailed { source, reason } => {
                    tracing::debug!(source = source.describe(), %reason, "showing placeholder");
                    self.images.mark_failed(source);
                }
                UiEvent::Error(err) => {
                    tracing::warn!(
                        category = ?err.category(),
                        context = ?err.context(),
                        "{}",
                        err.message()
                    );
                    self.status_banner = Some(err);
                }
            }
        }
    }

    fn system_prefers_dark(ctx: &egui::Context) -> bool {
        ctx.system_theme()
            .map(|theme| theme == egui::Theme::Dark)
            .unwrap_or(false)
    }

    pub(crate) fn palette(&self, ctx: &egui::Context) -> Palette {
        let dark = self.theme.mode.is_dark(Self::system_prefers_dark(ctx));
        palette(self.theme.preset, dark)
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        let dark = self.theme.mode.is_dark(Self::system_prefers_dark(ctx));
        if self.applied_theme == Some((self.theme, dark)) {
            return;
        }

        ctx.set_theme(if dark {
            egui::Theme::Dark
        } else {
            egui::Theme::Light
        });
        ctx.set_visuals(visuals_for_palette(palette(self.theme.preset, dark)));
        self.applied_theme = Some((self.theme, dark));
    }

    pub(crate) fn send(&mut self, cmd: BackendCommand) -> bool {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status)
    }

    pub(crate) fn open(&mut self, route: Route) {
        self.form = None;
        self.navigator.navigate(route);
    }

    pub(crate) fn go_back(&mut self) {
        self.form = None;
        self.navigator.pop_back();
    }

    fn open_tab(&mut self, route: Route) {
        self.form = None;
        self.navigator.navigate_tab(route);
    }

    pub(crate) fn find_item(&self, id: &shared::domain::ItemId) -> Option<FoodItem> {
        self.items.iter().find(|item| &item.id == id).cloned()
    }

    pub(crate) fn photo_texture(&mut self, source: &ImageSource) -> Option<egui::TextureHandle> {
        self.images.texture(source, &self.cmd_tx, &mut self.status)
    }

    pub(crate) fn item_texture(&mut self, item: &FoodItem) -> Option<egui::TextureHandle> {
        let source = ImageSource::for_item(item)?;
        self.photo_texture(&source)
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        let route = self.navigator.current().clone();
        egui::TopBottomPanel::top("app_top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if self.navigator.can_pop() && ui.button("←").on_hover_text("Back").clicked() {
                    self.go_back();
                }
                ui.heading(route.title());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if matches!(route, Route::Overview | Route::AllItems)
                        && ui.button("＋ Add Item").clicked()
                    {
                        self.open(Route::AddItem);
                    }
                });
            });
            ui.add_space(6.0);
        });
    }

    fn show_bottom_bar(&mut self, ctx: &egui::Context) {
        let selected = self.navigator.selected_tab();
        let status = self.status.clone();
        egui::TopBottomPanel::bottom("app_bottom_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.columns(TABS.len(), |columns| {
                for (column, tab) in columns.iter_mut().zip(TABS.iter()) {
                    column.vertical_centered(|ui| {
                        if ui
                            .selectable_label(*tab == selected, tab.title())
                            .clicked()
                        {
                            self.open_tab(tab.clone());
                        }
                    });
                }
            });
            ui.small(status);
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(err) = self.status_banner.clone() else {
            return;
        };
        let fill = ui.visuals().error_fg_color.gamma_multiply(0.2);
        egui::Frame::new()
            .fill(fill)
            .corner_radius(8)
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.strong(format!("{} error:", err.category().label()));
                    ui.label(err.message());
                    if !err.is_fatal() && ui.small_button("Dismiss").clicked() {
                        self.status_banner = None;
                    }
                });
            });
        ui.add_space(8.0);
    }

    fn show_current_screen(&mut self, ui: &mut egui::Ui) {
        match self.navigator.current().clone() {
            Route::Overview => self.show_overview(ui),
            Route::AllItems => self.show_all_items(ui),
            Route::Settings => self.show_settings(ui),
            Route::Notifications => self.show_notifications(ui),
            Route::AddItem => self.show_item_form(ui, None),
            Route::FoodDetails(id) => self.show_food_details(ui, &id),
            Route::EditItem(id) => self.show_item_form(ui, Some(&id)),
        }
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.today = today();
        self.process_ui_events(ctx);
        self.apply_theme_if_needed(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && self.navigator.can_pop() {
            self.go_back();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            self.send(BackendCommand::Refresh);
        }

        self.show_top_bar(ctx);
        self.show_bottom_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            self.show_current_screen(ui);
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(200));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedDesktopSettings { theme: self.theme };
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::{ThemeMode, ThemePreset};

    #[test]
    fn explicit_data_dir_holds_the_database() {
        let startup = StartupConfig {
            data_dir: Some(PathBuf::from("/tmp/pantry")),
            database_url: None,
        };
        let paths = AppPaths::from_startup(&startup).expect("paths");
        assert_eq!(paths.data_root, PathBuf::from("/tmp/pantry"));
        assert_eq!(paths.db_path, PathBuf::from("/tmp/pantry/food_inventory.db"));
    }

    #[test]
    fn command_line_database_url_wins() {
        let startup = StartupConfig {
            data_dir: Some(PathBuf::from("/tmp/pantry")),
            database_url: Some("/srv/food.db".to_string()),
        };
        assert_eq!(resolve_database_url(&startup), "sqlite:///srv/food.db");
    }

    #[test]
    fn persisted_settings_tolerate_missing_fields() {
        let settings: PersistedDesktopSettings = serde_json::from_str("{}").expect("defaults");
        assert_eq!(settings, PersistedDesktopSettings::default());

        let settings = PersistedDesktopSettings {
            theme: ThemeSettings {
                preset: ThemePreset::X,
                mode: ThemeMode::Light,
            },
        };
        let text = serde_json::to_string(&settings).expect("serialize");
        assert_eq!(
            serde_json::from_str::<PersistedDesktopSettings>(&text).expect("deserialize"),
            settings
        );
    }

    #[test]
    fn navigation_resets_the_open_form() {
        let (cmd_tx, _cmd_rx) = crossbeam_channel::bounded(4);
        let (_ui_tx, ui_rx) = crossbeam_channel::bounded(4);
        let mut app = DesktopGuiApp::new(cmd_tx, ui_rx, None);
        app.open(Route::AddItem);
        app.form = Some(ItemForm::blank(app.today));
        app.go_back();
        assert!(app.form.is_none());
        assert_eq!(app.navigator.current(), &Route::Overview);
    }

    #[test]
    fn initial_route_sits_above_the_overview() {
        let (cmd_tx, _cmd_rx) = crossbeam_channel::bounded(4);
        let (_ui_tx, ui_rx) = crossbeam_channel::bounded(4);
        let id = shared::domain::ItemId::from("abc");
        let mut app = DesktopGuiApp::new(cmd_tx, ui_rx, None)
            .with_initial_route(Route::FoodDetails(id.clone()));
        assert_eq!(app.navigator.current(), &Route::FoodDetails(id));
        app.go_back();
        assert_eq!(app.navigator.current(), &Route::Overview);
    }
}
