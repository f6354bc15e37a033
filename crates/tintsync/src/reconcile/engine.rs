//! Debounced reconcile worker.

use std::sync::Arc;
use std::time::Duration;

use tokio::select;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::{ReconcileCore, ReconcileOutcome, ReconcileStatus};
use crate::config::EngineConfig;
use crate::guard::ConflictGuard;
use crate::store::{SettingsStore, WorkspaceHost};

#[derive(Debug, Clone, Copy)]
enum Request {
    Reconcile { force: bool },
    Cancel,
    Shutdown,
}

enum Pending {
    Fire,
    Canceled,
    Stop,
}

/// Owns a [`ReconcileCore`] and the background task that drives it.
///
/// [`request_reconcile`](Self::request_reconcile) is cheap and can be called
/// from any trigger (config change, theme change, timer). Requests arriving
/// within the debounce window collapse into one reconcile, which is forced if
/// any of them was.
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use tintsync::{EngineConfig, JsonFileStore, ReconcileEngine, WorkspaceHost};
/// # async fn demo(host: Arc<dyn WorkspaceHost>) {
/// let store = Arc::new(JsonFileStore::new(".vscode/settings.json"));
/// let engine = ReconcileEngine::spawn(store, host, EngineConfig::default());
///
/// engine.request_reconcile(false);
/// let mut status = engine.subscribe();
/// status.changed().await.ok();
/// println!("{:?}", status.borrow().tint_colors);
///
/// engine.shutdown().await;
/// # }
/// ```
pub struct ReconcileEngine {
    core: Arc<ReconcileCore>,
    requests: mpsc::UnboundedSender<Request>,
    worker: JoinHandle<()>,
}

impl ReconcileEngine {
    /// Builds a core with an armed guard and starts the worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(
        store: Arc<dyn SettingsStore>,
        host: Arc<dyn WorkspaceHost>,
        config: EngineConfig,
    ) -> Self {
        let core = ReconcileCore::new(store, host, ConflictGuard::armed(config.guard));
        Self::with_core(Arc::new(core), config.debounce)
    }

    /// Starts a worker for an existing core.
    pub fn with_core(core: Arc<ReconcileCore>, debounce: Duration) -> Self {
        let (requests, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(Arc::clone(&core), rx, debounce));
        Self {
            core,
            requests,
            worker,
        }
    }

    /// Schedules a reconcile after the debounce delay, restarting the delay
    /// if one is already pending.
    pub fn request_reconcile(&self, force: bool) {
        if self.requests.send(Request::Reconcile { force }).is_err() {
            debug!("reconcile worker stopped; request dropped");
        }
    }

    /// Runs a reconcile right away, serialized with the worker's.
    pub async fn reconcile_now(&self, force: bool) -> ReconcileOutcome {
        self.core.reconcile(force).await
    }

    /// Drops a pending debounced reconcile. One already running finishes.
    pub fn cancel_pending(&self) {
        let _ = self.requests.send(Request::Cancel);
    }

    pub fn subscribe(&self) -> watch::Receiver<ReconcileStatus> {
        self.core.subscribe()
    }

    pub fn status(&self) -> ReconcileStatus {
        self.core.status()
    }

    pub fn core(&self) -> &Arc<ReconcileCore> {
        &self.core
    }

    /// Stops the worker, dropping any pending request, and waits for an
    /// in-flight reconcile to finish.
    pub async fn shutdown(self) {
        let _ = self.requests.send(Request::Shutdown);
        if let Err(e) = self.worker.await {
            warn!(error = %e, "reconcile worker ended abnormally");
        }
    }
}

async fn run_worker(
    core: Arc<ReconcileCore>,
    mut rx: mpsc::UnboundedReceiver<Request>,
    debounce: Duration,
) {
    while let Some(request) = rx.recv().await {
        let mut force = match request {
            Request::Reconcile { force } => force,
            Request::Cancel => continue,
            Request::Shutdown => break,
        };

        let pending = loop {
            select! {
                next = rx.recv() => match next {
                    Some(Request::Reconcile { force: again }) => force |= again,
                    Some(Request::Cancel) => break Pending::Canceled,
                    Some(Request::Shutdown) | None => break Pending::Stop,
                },
                () = sleep(debounce) => break Pending::Fire,
            }
        };

        match pending {
            Pending::Fire => {
                let outcome = core.reconcile(force).await;
                debug!(force, ?outcome, "debounced reconcile finished");
            }
            Pending::Canceled => debug!("pending reconcile canceled"),
            Pending::Stop => break,
        }
    }
    debug!("reconcile worker stopped");
}
