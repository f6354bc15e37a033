//! Reconciliation: bringing the settings document in line with the tint.
//!
//! [`ReconcileCore`] runs one reconcile at a time. [`ReconcileEngine`] wraps
//! it in a debounced background worker and is what hosts normally use.
//!
//! A reconcile walks these steps:
//!
//! 1. Ask the [`ConflictGuard`](crate::ConflictGuard) for permission (forced
//!    reconciles bypass it).
//! 2. If tinting is disabled, has no targets, or there is no workspace,
//!    strip managed colors. Otherwise generate the palette.
//! 3. Read the document and refuse to touch it when managed colors are
//!    present that the ownership marker does not account for, unless forced.
//! 4. Merge or strip, and write only when the result differs.

mod engine;
mod reconciler;

pub use engine::ReconcileEngine;
pub use reconciler::ReconcileCore;

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use tintsync_color::TintTarget;

/// What a single reconcile did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The palette was merged and the document written.
    Written,
    /// Managed colors were stripped and the document written.
    Removed,
    /// The document already matched; nothing was written.
    Unchanged,
    /// The guard is cooling down after too many writes.
    Blocked { remaining: Duration },
    /// Managed colors exist that this system did not write; left alone.
    CustomizedOutside,
    /// The active theme has no usable name, so there is no block to write.
    ThemeUnresolved,
    /// Reading or writing the store failed.
    Failed(String),
}

impl ReconcileOutcome {
    /// True when the store was written.
    pub fn wrote(&self) -> bool {
        matches!(self, ReconcileOutcome::Written | ReconcileOutcome::Removed)
    }
}

/// Observable state after the most recent reconcile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileStatus {
    /// Workspace the current tint was computed for; `None` when not tinting.
    pub workspace_identifier: Option<String>,
    /// Primary background per tinted target.
    pub tint_colors: BTreeMap<TintTarget, String>,
    /// Managed colors were found that this system does not own.
    pub customized_outside_owner: bool,
    /// Most recent failure or guard message.
    pub last_error: Option<String>,
    /// Reconciles run so far, including ones that changed nothing.
    pub reconcile_count: u64,
}
