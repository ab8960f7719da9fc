//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use inventory_core::{today, InventoryStore};
use shared::error::InventoryResult;
use storage::Storage;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::ui::images::{decode_preview_image, fetch_image_bytes, ImageSource};

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub database_url: String,
}

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    config: BackendConfig,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(serve(cmd_rx, ui_tx, config));
    })
}

async fn serve(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, config: BackendConfig) {
    let store = match open_store(&config.database_url).await {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(database_url = %config.database_url, "{err:#}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: {err:#}"),
            )));
            return;
        }
    };

    let forwarder = tokio::spawn(forward_item_updates(Arc::clone(&store), ui_tx.clone()));
    let http = reqwest::Client::new();
    let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

    while let Ok(cmd) = cmd_rx.recv() {
        handle_command(&store, &http, &ui_tx, cmd).await;
    }

    tracing::info!("ui command queue closed; backend worker stopping");
    forwarder.abort();
}

async fn open_store(database_url: &str) -> anyhow::Result<Arc<InventoryStore>> {
    let storage = Storage::new(database_url).await?;
    let store = InventoryStore::open_storage(storage).await?;
    Ok(store)
}

async fn forward_item_updates(store: Arc<InventoryStore>, ui_tx: Sender<UiEvent>) {
    let mut items = store.item_stream();
    while let Some(list) = items.next().await {
        match ui_tx.try_send(UiEvent::ItemsUpdated(list)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!("ui event queue full; dropped an item list update");
            }
            Err(TrySendError::Disconnected(_)) => break,
        }
    }
}

async fn handle_command(
    store: &Arc<InventoryStore>,
    http: &reqwest::Client,
    ui_tx: &Sender<UiEvent>,
    cmd: BackendCommand,
) {
    let event = match cmd {
        BackendCommand::Refresh => match store.refresh().await {
            Ok(_) => return,
            Err(err) => UiEvent::Error(UiError::from_inventory(UiErrorContext::General, &err)),
        },
        BackendCommand::AddItem { draft } => {
            tokio::spawn(report_write(
                store.spawn_add(draft, today()),
                ui_tx.clone(),
                UiErrorContext::SaveItem,
                |item| UiEvent::ItemSaved(item.id),
            ));
            return;
        }
        BackendCommand::UpdateItem { id, draft } => {
            tokio::spawn(report_write(
                store.spawn_update(id, draft),
                ui_tx.clone(),
                UiErrorContext::SaveItem,
                |item| UiEvent::ItemSaved(item.id),
            ));
            return;
        }
        BackendCommand::DeleteItem { id } => {
            tokio::spawn(report_write(
                store.spawn_delete(id.clone()),
                ui_tx.clone(),
                UiErrorContext::DeleteItem,
                move |()| UiEvent::ItemDeleted(id),
            ));
            return;
        }
        BackendCommand::LoadImage { source } => {
            tokio::spawn(load_image(http.clone(), ui_tx.clone(), source));
            return;
        }
    };
    let _ = ui_tx.try_send(event);
}

async fn report_write<T>(
    write: JoinHandle<InventoryResult<T>>,
    ui_tx: Sender<UiEvent>,
    context: UiErrorContext,
    on_success: impl FnOnce(T) -> UiEvent,
) {
    let event = match write.await {
        Ok(Ok(value)) => on_success(value),
        Ok(Err(err)) => UiEvent::Error(UiError::from_inventory(context, &err)),
        Err(err) => UiEvent::Error(UiError::from_message(
            context,
            format!("write task failed: {err}"),
        )),
    };
    let _ = ui_tx.try_send(event);
}

async fn load_image(http: reqwest::Client, ui_tx: Sender<UiEvent>, source: ImageSource) {
    let decoded = match fetch_image_bytes(&http, &source).await {
        Ok(bytes) => tokio::task::spawn_blocking(move || decode_preview_image(&bytes))
            .await
            .unwrap_or_else(|err| Err(format!("image decode task failed: {err}"))),
        Err(reason) => Err(reason),
    };

    let event = match decoded {
        Ok(image) => UiEvent::ImageLoaded { source, image },
        Err(reason) => {
            tracing::warn!(source = source.describe(), "photo unavailable: {reason}");
            UiEvent::ImageFailed { source, reason }
        }
    };
    let _ = ui_tx.try_send(event);
}
