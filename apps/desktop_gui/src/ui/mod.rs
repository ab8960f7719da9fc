//! UI layer for desktop GUI: app shell, screens, photos, themes, and the date picker.

pub mod app;
pub mod calendar;
pub mod images;
pub mod screens;
pub mod theme;

pub use app::{resolve_database_url, DesktopGuiApp, PersistedDesktopSettings, StartupConfig};
