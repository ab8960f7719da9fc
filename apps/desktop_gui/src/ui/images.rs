//! Photo loading: sources, decoding, and the per-source texture cache.

use std::{collections::HashMap, path::Path};

use crossbeam_channel::Sender;
use eframe::egui;
use shared::domain::FoodItem;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::dispatch_backend_command;

pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];
const PREVIEW_MAX_DIMENSION: u32 = 640;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource {
    File(String),
    Url(String),
}

impl ImageSource {
    /// A local photo wins over a remote image URL.
    pub fn for_item(item: &FoodItem) -> Option<Self> {
        if let Some(path) = item.image_path.as_deref().filter(|p| !p.trim().is_empty()) {
            return Some(ImageSource::File(path.to_string()));
        }
        item.image_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(|u| ImageSource::Url(u.to_string()))
    }

    pub fn describe(&self) -> &str {
        match self {
            ImageSource::File(path) => path,
            ImageSource::Url(url) => url,
        }
    }
}

pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = if dynamic.width().max(dynamic.height()) > PREVIEW_MAX_DIMENSION {
        dynamic.thumbnail(PREVIEW_MAX_DIMENSION, PREVIEW_MAX_DIMENSION)
    } else {
        dynamic
    }
    .to_rgba8();
    Ok(PreviewImage {
        width: resized.width() as usize,
        height: resized.height() as usize,
        rgba: resized.into_raw(),
    })
}

pub fn is_image_file(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .is_some_and(|mime| mime.type_() == mime_guess::mime::IMAGE)
}

pub async fn fetch_image_bytes(
    http: &reqwest::Client,
    source: &ImageSource,
) -> Result<Vec<u8>, String> {
    match source {
        ImageSource::File(path) => tokio::fs::read(path)
            .await
            .map_err(|err| format!("could not read photo '{path}': {err}")),
        ImageSource::Url(url) => {
            let response = http
                .get(url)
                .send()
                .await
                .map_err(|err| format!("failed to fetch image: {err}"))?
                .error_for_status()
                .map_err(|err| format!("image request returned error: {err}"))?;
            let bytes = response
                .bytes()
                .await
                .map_err(|err| format!("failed to read image body: {err}"))?;
            Ok(bytes.to_vec())
        }
    }
}

enum ImageSlot {
    Loading,
    Ready(egui::TextureHandle),
    Failed,
}

#[derive(Default)]
pub struct ImageCache {
    slots: HashMap<ImageSource, ImageSlot>,
}

impl ImageCache {
    /// Returns the texture when decoded; queues a load the first time a
    /// source is seen.
    pub fn texture(
        &mut self,
        source: &ImageSource,
        cmd_tx: &Sender<BackendCommand>,
        status: &mut String,
    ) -> Option<egui::TextureHandle> {
        match self.slots.get(source) {
            Some(ImageSlot::Ready(texture)) => Some(texture.clone()),
            Some(ImageSlot::Loading | ImageSlot::Failed) => None,
            None => {
                let queued = dispatch_backend_command(
                    cmd_tx,
                    BackendCommand::LoadImage {
                        source: source.clone(),
                    },
                    status,
                );
                if queued {
                    self.slots.insert(source.clone(), ImageSlot::Loading);
                }
                None
            }
        }
    }

    pub fn store_loaded(&mut self, ctx: &egui::Context, source: ImageSource, image: PreviewImage) {
        let color_image =
            egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
        let texture = ctx.load_texture(
            format!("food-photo:{}", source.describe()),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        self.slots.insert(source, ImageSlot::Ready(texture));
    }

    pub fn mark_failed(&mut self, source: ImageSource) {
        self.slots.insert(source, ImageSlot::Failed);
    }
}

/// Draws the photo scaled to fit `size`, or a placeholder box.
pub fn photo_or_placeholder(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    size: egui::Vec2,
) -> egui::Response {
    match texture {
        Some(texture) => {
            let tex_size = texture.size_vec2();
            let scale = (size.x / tex_size.x).min(size.y / tex_size.y);
            ui.add(egui::Image::new((texture.id(), tex_size * scale)).corner_radius(8))
        }
        None => {
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());
            let visuals = ui.visuals();
            ui.painter().rect_filled(rect, 8.0, visuals.faint_bg_color);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No photo",
                egui::FontId::proportional(12.0),
                visuals.weak_text_color(),
            );
            response
        }
    }
}
