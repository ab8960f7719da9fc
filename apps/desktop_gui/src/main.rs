use std::path::PathBuf;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::{
    commands::BackendCommand,
    runtime::{self, BackendConfig},
};
use controller::{events::UiEvent, navigation::Route};
use ui::{resolve_database_url, DesktopGuiApp, PersistedDesktopSettings, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "Household food inventory")]
struct Args {
    /// Directory holding the inventory database.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Database file path or sqlite URL; overrides --data-dir and config.
    #[arg(long)]
    database_url: Option<String>,
    /// Screen to open first, e.g. `all_items` or `food_details/<id>`.
    #[arg(long, value_parser = parse_route)]
    open: Option<Route>,
}

fn parse_route(raw: &str) -> Result<Route, String> {
    Route::parse(raw).ok_or_else(|| format!("unknown screen '{raw}'"))
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let initial_route = args.open;
    let startup = StartupConfig {
        data_dir: args.data_dir,
        database_url: args.database_url,
    };
    let database_url = resolve_database_url(&startup);
    tracing::info!(%database_url, "starting food inventory");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(cmd_rx, ui_tx, BackendConfig { database_url });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Food Inventory")
            .with_inner_size([480.0, 820.0])
            .with_min_inner_size([380.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Food Inventory",
        options,
        Box::new(|cc| {
            let persisted_settings = PersistedDesktopSettings::load(cc.storage);
            let mut app = DesktopGuiApp::new(cmd_tx, ui_rx, persisted_settings);
            if let Some(route) = initial_route {
                app = app.with_initial_route(route);
            }
            Ok(Box::new(app))
        }),
    )
}
