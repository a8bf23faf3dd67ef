//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use async_trait::async_trait;
use crossbeam_channel::{Receiver, Sender, TrySendError};
use hanoi_core::{PlaybackController, SessionObserver};
use shared::protocol::SessionEvent;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Hands session events to the egui thread. The hand-off is the queue push;
/// the window drains the queue on its next frame.
struct UiForwardingObserver {
    ui_tx: Sender<UiEvent>,
}

#[async_trait]
impl SessionObserver for UiForwardingObserver {
    async fn on_event(&self, event: SessionEvent) {
        match self.ui_tx.try_send(UiEvent::Session(event)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!("ui event queue is full; window will resync on the next session");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui event queue closed; window is gone");
            }
        }
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build playback runtime: {err}"),
                )));
                tracing::error!("failed to build playback runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let controller = PlaybackController::new_with_observer(Arc::new(UiForwardingObserver {
                ui_tx: ui_tx.clone(),
            }));
            let _ = ui_tx.try_send(UiEvent::Info("Ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Start {
                        disk_count,
                        pacing_ms,
                    } => {
                        if let Err(err) = controller.start(disk_count, pacing_ms).await {
                            tracing::warn!(error = %err, "refused to start playback");
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_hanoi(
                                UiErrorContext::StartPlayback,
                                &err,
                            )));
                        }
                    }
                    BackendCommand::Stop => {
                        if controller.cancel_active().is_none() {
                            let _ = ui_tx.try_send(UiEvent::Info("Nothing is playing".to_string()));
                        }
                    }
                    BackendCommand::SetPacing { pacing_ms } => {
                        if let Err(err) = controller.set_pacing(pacing_ms) {
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_hanoi(
                                UiErrorContext::SetPacing,
                                &err,
                            )));
                        }
                    }
                    BackendCommand::Shutdown => break,
                }
            }

            controller.shutdown().await;
            tracing::info!("playback worker stopped");
        });
    });
}
