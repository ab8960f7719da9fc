//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup failure); restart the app"
                    .to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::ItemId;

    #[test]
    fn queued_command_leaves_status_untouched() {
        let (tx, rx) = bounded(1);
        let mut status = String::from("ready");
        assert!(dispatch_backend_command(
            &tx,
            BackendCommand::Refresh,
            &mut status
        ));
        assert_eq!(status, "ready");
        assert!(matches!(rx.try_recv(), Ok(BackendCommand::Refresh)));
    }

    #[test]
    fn full_queue_reports_retry() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        assert!(dispatch_backend_command(&tx, BackendCommand::Refresh, &mut status));
        assert!(!dispatch_backend_command(
            &tx,
            BackendCommand::DeleteItem {
                id: ItemId::from("a")
            },
            &mut status
        ));
        assert!(status.contains("full"));
    }

    #[test]
    fn disconnected_backend_is_reported() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        assert!(!dispatch_backend_command(&tx, BackendCommand::Refresh, &mut status));
        assert!(status.contains("disconnected"));
    }
}
