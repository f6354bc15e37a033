//! # tintsync - Workspace Tints Kept in Sync
//!
//! `tintsync` gives every workspace a stable, recognizable color and keeps
//! that color written into the editor's settings document, without ever
//! clobbering colors somebody else put there.
//!
//! This crate is the engine. It re-exports the palette math from
//! [`tintsync_color`] and the document transforms from [`tintsync_settings`].
//!
//! ## Pieces
//!
//! - [`TintConfig`] / [`EngineConfig`]: what to color and how often writes may happen
//! - [`SettingsStore`] / [`WorkspaceHost`]: the seams to the embedding editor
//! - [`ConflictGuard`]: stops write loops with another tool
//! - [`ReconcileCore`]: one serialized reconcile at a time
//! - [`ReconcileEngine`]: debounced background worker around the core
//!
//! ## Ownership
//!
//! Colors go into the block of the active theme, and a root-level
//! `"tintsync.ownedTheme"` marker records which block is ours. When managed
//! colors show up that the marker does not account for, reconciles stop and
//! report [`ReconcileOutcome::CustomizedOutside`] until a forced reconcile
//! takes them over.

pub mod config;
mod error;
pub mod guard;
pub mod reconcile;
pub mod store;

pub use config::{EngineConfig, GuardConfig, TintConfig};
pub use error::{ConfigError, StoreError};
pub use guard::{ConflictGuard, GuardDecision};
pub use reconcile::{ReconcileCore, ReconcileEngine, ReconcileOutcome, ReconcileStatus};
pub use store::{JsonFileStore, SettingsStore, WorkspaceHost};

pub use tintsync_color as color;
pub use tintsync_settings as settings;

pub use tintsync_color::{
    generate, hue, BlendConfig, BlendMethod, Harmony, ManagedKey, Palette, PaletteEntry,
    PaletteRequest, ThemeContext, ThemeKind, TintStyle, TintTarget,
};
pub use tintsync_settings::Document;
