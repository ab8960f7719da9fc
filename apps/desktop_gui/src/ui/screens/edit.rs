use std::path::Path;

use chrono::NaiveDate;
use eframe::egui;
use shared::domain::{FoodItem, FoodItemDraft, FoodType, ItemId};

use crate::backend_bridge::commands::BackendCommand;
use crate::ui::{
    app::DesktopGuiApp,
    calendar::{CalendarMonth, WEEKDAY_HEADERS},
    images::{is_image_file, photo_or_placeholder, ImageSource, IMAGE_EXTENSIONS},
    screens::format_date,
};

/// Editable state behind the add and edit screens.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemForm {
    pub editing: Option<ItemId>,
    pub name: String,
    pub food_type: FoodType,
    pub quantity: String,
    pub container: String,
    pub expiration_date: NaiveDate,
    pub image_path: Option<String>,
    pub image_url: String,
    pub calendar: CalendarMonth,
    pub calendar_open: bool,
    pub photo_error: Option<String>,
}

impl ItemForm {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            editing: None,
            name: String::new(),
            food_type: FoodType::default(),
            quantity: String::new(),
            container: String::new(),
            expiration_date: today,
            image_path: None,
            image_url: String::new(),
            calendar: CalendarMonth::containing(today),
            calendar_open: false,
            photo_error: None,
        }
    }

    pub fn for_item(item: &FoodItem) -> Self {
        Self {
            editing: Some(item.id.clone()),
            name: item.name.clone(),
            food_type: item.food_type,
            quantity: item.quantity.clone(),
            container: item.container.clone(),
            expiration_date: item.expiration_date,
            image_path: item.image_path.clone(),
            image_url: item.image_url.clone().unwrap_or_default(),
            calendar: CalendarMonth::containing(item.expiration_date),
            calendar_open: false,
            photo_error: None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Save Changes"
        } else {
            "Add Item"
        }
    }

    pub fn pick_date(&mut self, date: NaiveDate) {
        self.expiration_date = date;
        self.calendar = CalendarMonth::containing(date);
        self.calendar_open = false;
    }

    pub fn attach_photo(&mut self, path: &Path) -> Result<(), String> {
        if !is_image_file(path) {
            return Err(format!("'{}' is not an image file", path.display()));
        }
        self.image_path = Some(path.to_string_lossy().into_owned());
        Ok(())
    }

    pub fn to_draft(&self) -> FoodItemDraft {
        let mut draft = FoodItemDraft::new(self.name.clone(), self.food_type, self.expiration_date);
        draft.quantity = self.quantity.clone();
        draft.container = self.container.clone();
        draft.image_path = self.image_path.clone();
        draft.image_url = Some(self.image_url.clone()).filter(|url| !url.trim().is_empty());
        draft
    }

    /// `None` while the name is empty; submission is ignored then.
    pub fn to_command(&self) -> Option<BackendCommand> {
        if !self.can_submit() {
            return None;
        }
        let draft = self.to_draft();
        Some(match &self.editing {
            Some(id) => BackendCommand::UpdateItem {
                id: id.clone(),
                draft,
            },
            None => BackendCommand::AddItem { draft },
        })
    }
}

impl DesktopGuiApp {
    pub(crate) fn show_item_form(&mut self, ui: &mut egui::Ui, editing: Option<&ItemId>) {
        let stale = self
            .form
            .as_ref()
            .map_or(true, |form| form.editing.as_ref() != editing);
        if stale {
            self.form = match editing {
                Some(id) => self.find_item(id).map(|item| ItemForm::for_item(&item)),
                None => Some(ItemForm::blank(self.today)),
            };
        }
        let Some(mut form) = self.form.take() else {
            return;
        };

        let preview = form
            .image_path
            .clone()
            .map(ImageSource::File)
            .and_then(|source| self.photo_texture(&source));
        let mut submitted = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("item_form_grid")
                .num_columns(2)
                .spacing([16.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Name");
                    ui.text_edit_singleline(&mut form.name);
                    ui.end_row();

                    ui.label("Food Type");
                    egui::ComboBox::from_id_salt("food_type_select")
                        .selected_text(form.food_type.display_name())
                        .show_ui(ui, |ui| {
                            for food_type in FoodType::ALL {
                                ui.selectable_value(
                                    &mut form.food_type,
                                    food_type,
                                    food_type.display_name(),
                                );
                            }
                        });
                    ui.end_row();

                    ui.label("Quantity");
                    ui.text_edit_singleline(&mut form.quantity);
                    ui.end_row();

                    ui.label("Container");
                    ui.text_edit_singleline(&mut form.container);
                    ui.end_row();

                    ui.label("Expiration Date");
                    if ui.button(format_date(form.expiration_date)).clicked() {
                        form.calendar_open = !form.calendar_open;
                    }
                    ui.end_row();
                });

            if form.calendar_open {
                ui.add_space(6.0);
                calendar_picker(ui, &mut form);
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                photo_or_placeholder(ui, preview.as_ref(), egui::vec2(120.0, 90.0));
                ui.vertical(|ui| {
                    if ui.button("Take Photo").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &IMAGE_EXTENSIONS)
                            .pick_file()
                        {
                            form.photo_error = form.attach_photo(&path).err();
                        }
                    }
                    if let Some(err) = &form.photo_error {
                        ui.colored_label(ui.visuals().error_fg_color, err);
                    }
                });
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Image URL");
                ui.text_edit_singleline(&mut form.image_url);
            });

            ui.add_space(16.0);
            let submit = ui.add_enabled(form.can_submit(), egui::Button::new(form.submit_label()));
            if submit.clicked() {
                submitted = form.to_command();
            }
        });

        match submitted {
            Some(cmd) => {
                if self.send(cmd) {
                    self.go_back();
                } else {
                    self.form = Some(form);
                }
            }
            None => self.form = Some(form),
        }
    }
}

fn calendar_picker(ui: &mut egui::Ui, form: &mut ItemForm) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            if ui.small_button("<").clicked() {
                form.calendar = form.calendar.previous();
            }
            ui.strong(form.calendar.title());
            if ui.small_button(">").clicked() {
                form.calendar = form.calendar.next();
            }
        });

        egui::Grid::new("expiration_calendar")
            .num_columns(7)
            .spacing([4.0, 4.0])
            .show(ui, |ui| {
                for header in WEEKDAY_HEADERS {
                    ui.small(header);
                }
                ui.end_row();

                let cells = form.calendar.cells();
                for week in cells.chunks(7) {
                    for cell in week {
                        match cell {
                            Some(date) => {
                                let selected = *date == form.expiration_date;
                                let label = date.format("%-d").to_string();
                                if ui.selectable_label(selected, label).clicked() {
                                    form.pick_date(*date);
                                }
                            }
                            None => {
                                ui.label("");
                            }
                        }
                    }
                    ui.end_row();
                }
            });
    });
}
