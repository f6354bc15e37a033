//! Single-flight reconciliation.

use std::collections::BTreeMap;
use std::sync::Arc;

use tintsync_color::{generate, PaletteRequest, TintTarget};
use tintsync_settings::{documents_equal, has_managed_keys_without_marker, merge, remove, Document};
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use super::{ReconcileOutcome, ReconcileStatus};
use crate::config::TintConfig;
use crate::error::StoreError;
use crate::guard::{ConflictGuard, GuardDecision};
use crate::store::{SettingsStore, WorkspaceHost};

/// Runs reconciles one at a time against a store and a host.
///
/// Concurrent calls to [`reconcile`](Self::reconcile) queue on an internal
/// lock, so at most one is ever in flight. Status is published to
/// [`subscribe`](Self::subscribe)rs after every reconcile.
pub struct ReconcileCore {
    store: Arc<dyn SettingsStore>,
    host: Arc<dyn WorkspaceHost>,
    state: Mutex<CoreState>,
    status_tx: watch::Sender<ReconcileStatus>,
}

struct CoreState {
    guard: ConflictGuard,
    status: ReconcileStatus,
}

/// Status fields that describe what the document holds. Committed only once
/// the document is known to match.
struct Settled {
    workspace_identifier: Option<String>,
    tint_colors: BTreeMap<TintTarget, String>,
}

impl Settled {
    fn cleared() -> Self {
        Self {
            workspace_identifier: None,
            tint_colors: BTreeMap::new(),
        }
    }

    fn commit(self, status: &mut ReconcileStatus) {
        status.workspace_identifier = self.workspace_identifier;
        status.tint_colors = self.tint_colors;
        status.customized_outside_owner = false;
    }
}

impl ReconcileCore {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        host: Arc<dyn WorkspaceHost>,
        guard: ConflictGuard,
    ) -> Self {
        let (status_tx, _) = watch::channel(ReconcileStatus::default());
        Self {
            store,
            host,
            state: Mutex::new(CoreState {
                guard,
                status: ReconcileStatus::default(),
            }),
            status_tx,
        }
    }

    /// Receiver that sees the status after every reconcile.
    pub fn subscribe(&self) -> watch::Receiver<ReconcileStatus> {
        self.status_tx.subscribe()
    }

    /// Status as of the last completed reconcile.
    pub fn status(&self) -> ReconcileStatus {
        self.status_tx.borrow().clone()
    }

    pub async fn arm_guard(&self) {
        self.state.lock().await.guard.arm();
    }

    pub async fn disarm_guard(&self) {
        self.state.lock().await.guard.disarm();
    }

    /// Clears recorded writes and lifts any cooldown.
    pub async fn reset_guard(&self) {
        self.state.lock().await.guard.reset();
    }

    /// Writes the guard currently counts inside its window.
    pub async fn recorded_writes(&self) -> usize {
        self.state.lock().await.guard.recorded_writes()
    }

    /// Runs one reconcile, waiting for any in-flight one to finish first.
    pub async fn reconcile(&self, force: bool) -> ReconcileOutcome {
        let mut state = self.state.lock().await;
        let outcome = self.run(&mut state, force).await;

        state.status.reconcile_count += 1;
        match &outcome {
            ReconcileOutcome::Failed(message) => state.status.last_error = Some(message.clone()),
            ReconcileOutcome::Blocked { .. } => {
                state.status.last_error = state.guard.last_error().map(str::to_owned);
            }
            ReconcileOutcome::Written | ReconcileOutcome::Removed | ReconcileOutcome::Unchanged => {
                state.status.last_error = None;
            }
            ReconcileOutcome::CustomizedOutside | ReconcileOutcome::ThemeUnresolved => {}
        }
        self.status_tx.send_replace(state.status.clone());
        outcome
    }

    async fn run(&self, state: &mut CoreState, force: bool) -> ReconcileOutcome {
        match state.guard.check(force) {
            GuardDecision::Allowed { recovered } => {
                if recovered {
                    state.status.last_error = None;
                }
            }
            GuardDecision::Tripped { cooldown } => {
                return ReconcileOutcome::Blocked {
                    remaining: cooldown,
                }
            }
            GuardDecision::CoolingDown { remaining } => {
                return ReconcileOutcome::Blocked { remaining }
            }
        }

        let config = self.host.config();
        let identifier = if config.is_active() {
            self.host.workspace_identifier().await
        } else {
            None
        };

        match identifier {
            Some(identifier) => self.apply(state, &config, identifier, force).await,
            None => self.clear(state, force).await,
        }
    }

    async fn apply(
        &self,
        state: &mut CoreState,
        config: &TintConfig,
        identifier: String,
        force: bool,
    ) -> ReconcileOutcome {
        let theme = self.host.theme();
        let Some(theme_name) = theme.resolved_name() else {
            warn!("active theme has no name; not writing colors");
            return ReconcileOutcome::ThemeUnresolved;
        };

        let palette = generate(
            &PaletteRequest::new(&identifier, &theme)
                .seed(config.seed)
                .targets(config.targets.iter().copied())
                .style(config.style)
                .harmony(config.harmony)
                .blend(config.blend.clone()),
        );

        let current = match self.store.read().await {
            Ok(doc) => doc,
            Err(e) => return failed("read", e),
        };

        if !force && has_managed_keys_without_marker(&current, Some(theme_name)) {
            warn!(theme = %theme_name, "colors were customized outside tintsync; not applying");
            state.status.customized_outside_owner = true;
            return ReconcileOutcome::CustomizedOutside;
        }

        let settled = Settled {
            tint_colors: config
                .targets
                .iter()
                .filter_map(|target| {
                    palette
                        .get(target.primary_key())
                        .map(|hex| (*target, hex.to_owned()))
                })
                .collect(),
            workspace_identifier: Some(identifier),
        };

        let next = merge(&current, &palette, theme_name);
        self.write_if_changed(state, &current, &next, settled, ReconcileOutcome::Written)
            .await
    }

    async fn clear(&self, state: &mut CoreState, force: bool) -> ReconcileOutcome {
        let current = match self.store.read().await {
            Ok(doc) => doc,
            Err(e) => return failed("read", e),
        };

        let theme = self.host.theme();
        if !force && has_managed_keys_without_marker(&current, theme.resolved_name()) {
            warn!("colors were customized outside tintsync; not removing");
            state.status.customized_outside_owner = true;
            return ReconcileOutcome::CustomizedOutside;
        }

        let next = remove(&current).unwrap_or_default();
        self.write_if_changed(
            state,
            &current,
            &next,
            Settled::cleared(),
            ReconcileOutcome::Removed,
        )
        .await
    }

    async fn write_if_changed(
        &self,
        state: &mut CoreState,
        current: &Document,
        next: &Document,
        settled: Settled,
        on_write: ReconcileOutcome,
    ) -> ReconcileOutcome {
        if documents_equal(current, next) {
            debug!(wrote = false, "settings already up to date");
            settled.commit(&mut state.status);
            return ReconcileOutcome::Unchanged;
        }
        match self.store.write(next).await {
            Ok(()) => {
                settled.commit(&mut state.status);
                state.guard.record_write();
                info!(wrote = true, outcome = ?on_write, "settings updated");
                on_write
            }
            Err(e) => failed("write", e),
        }
    }
}

fn failed(operation: &str, e: StoreError) -> ReconcileOutcome {
    error!(error = %e, operation, "settings store failed");
    ReconcileOutcome::Failed(e.to_string())
}
