//! Write-loop protection.
//!
//! Another tool fighting over the same settings keys can make every write
//! trigger another reconcile. [`ConflictGuard`] counts real writes in a
//! sliding window and, once the limit is hit, blocks automatic writes for a
//! cooldown period. Forced reconciles always get through.
//!
//! The guard is inert until [`arm`](ConflictGuard::arm)ed.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::GuardConfig;

/// Result of asking the guard for permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed. `recovered` is set on the first check after a cooldown ended.
    Allowed { recovered: bool },
    /// This check tripped the guard; writes are blocked for `cooldown`.
    Tripped { cooldown: Duration },
    /// Still blocked from an earlier trip.
    CoolingDown { remaining: Duration },
}

impl GuardDecision {
    /// True when the reconcile may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allowed { .. })
    }
}

/// Sliding-window write limiter with cooldown.
#[derive(Debug, Clone)]
pub struct ConflictGuard {
    config: GuardConfig,
    armed: bool,
    writes: VecDeque<Instant>,
    cooldown_until: Option<Instant>,
    last_error: Option<String>,
}

impl ConflictGuard {
    /// Creates a disarmed guard.
    pub fn new(config: GuardConfig) -> Self {
        Self {
            config,
            armed: false,
            writes: VecDeque::new(),
            cooldown_until: None,
            last_error: None,
        }
    }

    /// Creates a guard that is already armed.
    pub fn armed(config: GuardConfig) -> Self {
        let mut guard = Self::new(config);
        guard.arm();
        guard
    }

    /// Starts counting writes and enforcing the limit.
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Stops enforcing; the guard allows everything until re-armed.
    pub fn disarm(&mut self) {
        self.armed = false;
        self.reset();
    }

    /// Whether the guard is enforcing.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Forgets all recorded writes, any cooldown and the error.
    pub fn reset(&mut self) {
        self.writes.clear();
        self.cooldown_until = None;
        self.last_error = None;
    }

    /// The user-facing message for the current or last trip, cleared once
    /// the cooldown has been observed to end.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Writes currently inside the window.
    pub fn recorded_writes(&self) -> usize {
        self.writes.len()
    }

    /// Asks whether a reconcile may write now.
    pub fn check(&mut self, force: bool) -> GuardDecision {
        self.check_at(force, Instant::now())
    }

    /// Records a write that actually reached the store.
    pub fn record_write(&mut self) {
        self.record_write_at(Instant::now());
    }

    pub(crate) fn check_at(&mut self, force: bool, now: Instant) -> GuardDecision {
        if force || !self.armed {
            return GuardDecision::Allowed { recovered: false };
        }

        let mut recovered = false;
        if let Some(until) = self.cooldown_until {
            if now < until {
                let remaining = until - now;
                self.last_error = Some(cooldown_message(remaining));
                tracing::debug!(remaining_ms = remaining.as_millis() as u64, "guard cooling down");
                return GuardDecision::CoolingDown { remaining };
            }
            self.cooldown_until = None;
            self.writes.clear();
            self.last_error = None;
            recovered = true;
            tracing::debug!("guard cooldown elapsed");
        }

        while let Some(&oldest) = self.writes.front() {
            if now.saturating_duration_since(oldest) >= self.config.window {
                self.writes.pop_front();
            } else {
                break;
            }
        }

        if self.writes.len() >= self.config.max_writes {
            let cooldown = self.config.cooldown;
            tracing::warn!(
                writes = self.writes.len(),
                window_ms = self.config.window.as_millis() as u64,
                cooldown_ms = cooldown.as_millis() as u64,
                "settings rewritten too often; pausing automatic updates"
            );
            self.writes.clear();
            self.cooldown_until = Some(now + cooldown);
            self.last_error = Some(cooldown_message(cooldown));
            return GuardDecision::Tripped { cooldown };
        }

        GuardDecision::Allowed { recovered }
    }

    pub(crate) fn record_write_at(&mut self, now: Instant) {
        if self.armed {
            self.writes.push_back(now);
        }
    }
}

fn cooldown_message(remaining: Duration) -> String {
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    format!(
        "Settings were changed repeatedly by something else; automatic tint updates paused for {secs}s"
    )
}
