use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex as StdMutex, PoisonError,
};

use async_trait::async_trait;
use shared::{
    domain::{EndReason, SessionId, SessionState},
    error::HanoiError,
    protocol::SessionEvent,
};
use tokio::{
    sync::{broadcast, watch, Mutex},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub mod config;
pub mod move_sequence;
pub mod pacing;
pub mod rod_state;
pub mod sequencer;

pub use move_sequence::MoveSequence;
pub use pacing::{Pacing, DEFAULT_PACING_MS, PACING_RANGE_MS};
pub use rod_state::{RodSnapshot, RodState, SUPPORTED_DISK_COUNTS};
pub use sequencer::Sequencer;

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Presentation-side effect of playback.
///
/// The sequencer awaits every call before it starts the pacing delay, so an
/// implementation that hands the event to another thread decides how long
/// playback waits for it.
#[async_trait]
pub trait SessionObserver: Send + Sync {
    async fn on_event(&self, event: SessionEvent);
}

pub struct NoopObserver;

#[async_trait]
impl SessionObserver for NoopObserver {
    async fn on_event(&self, _event: SessionEvent) {}
}

/// Forwards to the caller's observer, then to broadcast subscribers.
struct FanoutObserver {
    inner: Arc<dyn SessionObserver>,
    events: broadcast::Sender<SessionEvent>,
}

#[async_trait]
impl SessionObserver for FanoutObserver {
    async fn on_event(&self, event: SessionEvent) {
        self.inner.on_event(event.clone()).await;
        let _ = self.events.send(event);
    }
}

/// Caller's view of one playback session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: SessionId,
    disk_count: u8,
    cancel: CancellationToken,
    state: watch::Receiver<SessionState>,
}

impl SessionHandle {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn disk_count(&self) -> u8 {
        self.disk_count
    }

    /// Requests a cooperative stop and returns immediately. The session
    /// finishes the delay it is in before it stops.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Waits for the terminal state.
    pub async fn finished(&self) -> SessionState {
        let mut state = self.state.clone();
        let terminal = state
            .wait_for(|current| current.is_terminal())
            .await
            .map(|current| *current);
        // The sender only goes away without a terminal state if the task died.
        terminal.unwrap_or(SessionState::Faulted)
    }
}

/// Owns the rods, the pacing value and at most one running session.
pub struct PlaybackController {
    rods: Arc<Mutex<RodState>>,
    pacing: Pacing,
    observer: Arc<dyn SessionObserver>,
    events: broadcast::Sender<SessionEvent>,
    task: Mutex<Option<JoinHandle<Result<EndReason, HanoiError>>>>,
    current: StdMutex<Option<SessionHandle>>,
    next_session: AtomicU64,
}

impl PlaybackController {
    pub fn new() -> Arc<Self> {
        Self::new_with_observer(Arc::new(NoopObserver))
    }

    pub fn new_with_observer(observer: Arc<dyn SessionObserver>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            rods: Arc::new(Mutex::new(RodState::new())),
            pacing: Pacing::default(),
            observer: Arc::new(FanoutObserver {
                inner: observer,
                events: events.clone(),
            }),
            events,
            task: Mutex::new(None),
            current: StdMutex::new(None),
            next_session: AtomicU64::new(1),
        })
    }

    /// Starts a new session, cancelling and waiting out any running one first.
    ///
    /// Arguments are validated before anything is touched, so a rejected start
    /// leaves a running session alone.
    pub async fn start(
        &self,
        disk_count: u8,
        pacing_ms: u64,
    ) -> Result<SessionHandle, HanoiError> {
        if !SUPPORTED_DISK_COUNTS.contains(&disk_count) {
            return Err(HanoiError::invalid_argument(format!(
                "disk count {disk_count} is outside {}..={}",
                SUPPORTED_DISK_COUNTS.start(),
                SUPPORTED_DISK_COUNTS.end()
            )));
        }
        pacing::validate_pacing(pacing_ms)?;

        // Held until the new task is registered so concurrent starts queue up.
        let mut task = self.task.lock().await;
        if let Some(previous) = self.lock_current().take() {
            previous.cancel();
        }
        if let Some(previous) = task.take() {
            Self::retire(previous).await;
        }

        self.pacing.set(pacing_ms)?;
        self.rods.lock().await.reset(disk_count)?;

        let id = SessionId(self.next_session.fetch_add(1, Ordering::Relaxed));
        let cancel = CancellationToken::new();
        let (state_tx, state_rx) = watch::channel(SessionState::Idle);
        let handle = SessionHandle {
            id,
            disk_count,
            cancel: cancel.clone(),
            state: state_rx,
        };

        self.observer
            .on_event(SessionEvent::SessionStarted {
                session: id,
                disk_count,
                pacing_ms,
            })
            .await;
        info!(session = %id, disks = disk_count, pacing_ms, "hanoi session started");

        let sequencer = Sequencer::new(
            id,
            disk_count,
            Arc::clone(&self.rods),
            self.pacing.clone(),
            Arc::clone(&self.observer),
            cancel,
        );
        state_tx.send_replace(SessionState::Running);
        *task = Some(tokio::spawn(async move {
            let outcome = sequencer.play().await;
            let terminal = match &outcome {
                Ok(reason) => SessionState::from(*reason),
                Err(_) => SessionState::Faulted,
            };
            state_tx.send_replace(terminal);
            outcome
        }));
        *self.lock_current() = Some(handle.clone());

        Ok(handle)
    }

    pub fn cancel(&self, handle: &SessionHandle) {
        debug!(session = %handle.id(), "cancel requested");
        handle.cancel();
    }

    /// Cancels whatever session is current, if any.
    pub fn cancel_active(&self) -> Option<SessionId> {
        let current = self.lock_current();
        let handle = current.as_ref()?;
        self.cancel(handle);
        Some(handle.id())
    }

    /// Applies to the next pacing delay; a delay already running is unaffected.
    pub fn set_pacing(&self, pacing_ms: u64) -> Result<(), HanoiError> {
        self.pacing.set(pacing_ms)?;
        debug!(pacing_ms, "pacing updated");
        Ok(())
    }

    pub fn pacing_ms(&self) -> u64 {
        self.pacing.millis()
    }

    /// State of the current session, `Idle` before the first start.
    pub fn state(&self) -> SessionState {
        self.lock_current()
            .as_ref()
            .map_or(SessionState::Idle, SessionHandle::state)
    }

    pub fn current_session(&self) -> Option<SessionHandle> {
        self.lock_current().clone()
    }

    pub async fn rods(&self) -> RodSnapshot {
        self.rods.lock().await.snapshot()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Cancels the current session and waits for it to end.
    pub async fn shutdown(&self) {
        let mut task = self.task.lock().await;
        if let Some(current) = self.lock_current().as_ref() {
            current.cancel();
        }
        if let Some(previous) = task.take() {
            Self::retire(previous).await;
        }
    }

    async fn retire(task: JoinHandle<Result<EndReason, HanoiError>>) {
        match task.await {
            Ok(Ok(reason)) => debug!(?reason, "previous session retired"),
            Ok(Err(err)) => warn!(error = %err, "previous session had faulted"),
            Err(err) => error!("previous session task failed: {err}"),
        }
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Option<SessionHandle>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
