//! Color presets and their mapping onto egui visuals.

use eframe::egui;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemePreset {
    X,
    Lg,
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 2] = [ThemePreset::X, ThemePreset::Lg];

    pub fn label(self) -> &'static str {
        match self {
            ThemePreset::X => "X (Monochrome)",
            ThemePreset::Lg => "LG (Red)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMode {
    System,
    Light,
    Dark,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::System, ThemeMode::Light, ThemeMode::Dark];

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::System => "Follow system",
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }

    pub fn is_dark(self, system_dark: bool) -> bool {
        match self {
            ThemeMode::System => system_dark,
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub preset: ThemePreset,
    pub mode: ThemeMode,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            preset: ThemePreset::Lg,
            mode: ThemeMode::System,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: egui::Color32,
    pub on_primary: egui::Color32,
    pub background: egui::Color32,
    pub on_background: egui::Color32,
    pub surface: egui::Color32,
    pub on_surface: egui::Color32,
    pub dark: bool,
}

const LG_RED: egui::Color32 = egui::Color32::from_rgb(0xC6, 0x28, 0x28);
const LG_RED_BRIGHT: egui::Color32 = egui::Color32::from_rgb(0xE5, 0x39, 0x35);

/// Row tint for items with fewer than two days left.
pub const CRITICAL_TINT: egui::Color32 = egui::Color32::from_rgb(0xE5, 0x73, 0x73);
/// Row tint for items with fewer than ten days left.
pub const WARNING_TINT: egui::Color32 = egui::Color32::from_rgb(0xFF, 0xB7, 0x4D);

pub fn palette(preset: ThemePreset, dark: bool) -> Palette {
    match (preset, dark) {
        (ThemePreset::X, false) => Palette {
            primary: egui::Color32::BLACK,
            on_primary: egui::Color32::WHITE,
            background: egui::Color32::WHITE,
            on_background: egui::Color32::BLACK,
            surface: egui::Color32::WHITE,
            on_surface: egui::Color32::BLACK,
            dark,
        },
        (ThemePreset::X, true) => Palette {
            primary: egui::Color32::WHITE,
            on_primary: egui::Color32::BLACK,
            background: egui::Color32::BLACK,
            on_background: egui::Color32::WHITE,
            surface: egui::Color32::BLACK,
            on_surface: egui::Color32::WHITE,
            dark,
        },
        (ThemePreset::Lg, false) => Palette {
            primary: LG_RED,
            on_primary: egui::Color32::WHITE,
            background: egui::Color32::from_rgb(0xF5, 0xF5, 0xF5),
            on_background: egui::Color32::BLACK,
            surface: egui::Color32::WHITE,
            on_surface: egui::Color32::BLACK,
            dark,
        },
        (ThemePreset::Lg, true) => Palette {
            primary: LG_RED_BRIGHT,
            on_primary: egui::Color32::WHITE,
            background: egui::Color32::from_rgb(0x12, 0x12, 0x12),
            on_background: egui::Color32::WHITE,
            surface: egui::Color32::from_rgb(0x1E, 0x1E, 0x1E),
            on_surface: egui::Color32::WHITE,
            dark,
        },
    }
}

pub fn visuals_for_palette(palette: Palette) -> egui::Visuals {
    let mut visuals = if palette.dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    visuals.override_text_color = Some(palette.on_background);
    visuals.panel_fill = palette.background;
    visuals.window_fill = palette.surface;
    visuals.extreme_bg_color = palette.surface;
    visuals.faint_bg_color = if palette.dark {
        egui::Color32::from_gray(40)
    } else {
        egui::Color32::from_gray(232)
    };
    visuals.hyperlink_color = palette.primary;
    visuals.selection.bg_fill = palette.primary;
    visuals.selection.stroke = egui::Stroke::new(1.0, palette.on_primary);
    visuals.widgets.active.bg_fill = palette.primary;
    visuals.widgets.hovered.bg_fill = palette.primary.gamma_multiply(0.85);
    visuals.window_corner_radius = egui::CornerRadius::same(12);
    visuals.menu_corner_radius = egui::CornerRadius::same(8);
    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lg_uses_red_primaries() {
        assert_eq!(palette(ThemePreset::Lg, false).primary, LG_RED);
        let dark = palette(ThemePreset::Lg, true);
        assert_eq!(dark.primary, LG_RED_BRIGHT);
        assert_eq!(dark.background, egui::Color32::from_rgb(0x12, 0x12, 0x12));
        assert_eq!(dark.surface, egui::Color32::from_rgb(0x1E, 0x1E, 0x1E));
    }

    #[test]
    fn x_is_monochrome_and_inverts_in_dark_mode() {
        let light = palette(ThemePreset::X, false);
        let dark = palette(ThemePreset::X, true);
        assert_eq!(light.primary, dark.background);
        assert_eq!(light.background, dark.primary);
    }

    #[test]
    fn mode_resolution_respects_system_only_when_asked() {
        assert!(ThemeMode::System.is_dark(true));
        assert!(!ThemeMode::System.is_dark(false));
        assert!(ThemeMode::Dark.is_dark(false));
        assert!(!ThemeMode::Light.is_dark(true));
    }

    #[test]
    fn visuals_follow_palette_brightness() {
        let visuals = visuals_for_palette(palette(ThemePreset::Lg, true));
        assert!(visuals.dark_mode);
        assert_eq!(visuals.selection.bg_fill, LG_RED_BRIGHT);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = ThemeSettings {
            preset: ThemePreset::X,
            mode: ThemeMode::Dark,
        };
        let json = serde_json::to_string(&settings).expect("serialize");
        let restored: ThemeSettings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, settings);
        let partial: ThemeSettings = serde_json::from_str("{}").expect("defaults");
        assert_eq!(partial, ThemeSettings::default());
    }
}
