//! # tintsync-test - In-Process Doubles for the Reconcile Engine
//!
//! Drive a [`ReconcileCore`] or [`ReconcileEngine`] without an editor or a
//! file system:
//!
//! - [`MemoryStore`]: a settings document in memory that counts writes, can
//!   be edited "externally" and can be told to fail
//! - [`StaticHost`]: configuration, theme and workspace identity that tests
//!   change between reconciles
//! - [`Harness`]: both, wired together
//!
//! Combine with `#[tokio::test(start_paused = true)]` so debounce and guard
//! timing run on a virtual clock.
//!
//! ```rust
//! use tintsync::{ReconcileOutcome, TintConfig};
//! use tintsync_test::Harness;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let harness = Harness::new("/work/project");
//! let core = harness.core();
//!
//! assert_eq!(core.reconcile(false).await, ReconcileOutcome::Written);
//! assert_eq!(core.reconcile(false).await, ReconcileOutcome::Unchanged);
//! assert_eq!(harness.store.write_count(), 1);
//!
//! harness.host.set_config(TintConfig { enabled: false, ..TintConfig::default() });
//! assert_eq!(core.reconcile(false).await, ReconcileOutcome::Removed);
//! assert!(harness.store.document().is_empty());
//! # }
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use tintsync::{
    ConflictGuard, Document, EngineConfig, ReconcileCore, ReconcileEngine, SettingsStore,
    StoreError, ThemeContext, ThemeKind, TintConfig, WorkspaceHost,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Fixtures
// ============================================================================

/// Name of the theme [`StaticHost`] starts with.
pub const DARK_THEME: &str = "Default Dark Modern";
/// Name of the light theme fixture.
pub const LIGHT_THEME: &str = "Default Light Modern";

/// A dark theme with an editor background.
pub fn dark_theme() -> ThemeContext {
    ThemeContext::new(ThemeKind::Dark, DARK_THEME).with_color("editor.background", "#1F1F1F")
}

/// A light theme with an editor background.
pub fn light_theme() -> ThemeContext {
    ThemeContext::new(ThemeKind::Light, LIGHT_THEME).with_color("editor.background", "#FFFFFF")
}

/// Builds a document from a `json!` object literal.
///
/// # Panics
///
/// Panics if `value` is not an object.
pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("document fixture must be a JSON object, got {other}"),
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory [`SettingsStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Document>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts with `document`.
    pub fn with_document(document: Document) -> Self {
        Self {
            document: Mutex::new(document),
            ..Self::default()
        }
    }

    /// Current document contents.
    pub fn document(&self) -> Document {
        lock(&self.document).clone()
    }

    /// Replaces the document as another tool would; not counted as a write.
    pub fn set_external(&self, document: Document) {
        *lock(&self.document) = document;
    }

    /// Edits the document in place as another tool would.
    pub fn edit_external(&self, f: impl FnOnce(&mut Document)) {
        f(&mut *lock(&self.document));
    }

    /// Makes subsequent writes fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Reads so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn read(&self) -> Result<Document, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.document())
    }

    async fn write(&self, document: &Document) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("injected failure".into()));
        }
        *lock(&self.document) = document.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// StaticHost
// ============================================================================

/// [`WorkspaceHost`] whose answers tests set directly.
#[derive(Debug)]
pub struct StaticHost {
    config: Mutex<TintConfig>,
    theme: Mutex<ThemeContext>,
    identifier: Mutex<Option<String>>,
}

impl StaticHost {
    /// Default config, [`dark_theme`], and the given workspace.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            config: Mutex::new(TintConfig::default()),
            theme: Mutex::new(dark_theme()),
            identifier: Mutex::new(Some(identifier.into())),
        }
    }

    pub fn set_config(&self, config: TintConfig) {
        *lock(&self.config) = config;
    }

    /// Changes part of the configuration.
    pub fn update_config(&self, f: impl FnOnce(&mut TintConfig)) {
        f(&mut *lock(&self.config));
    }

    pub fn set_theme(&self, theme: ThemeContext) {
        *lock(&self.theme) = theme;
    }

    /// `None` simulates a window with no workspace open.
    pub fn set_identifier(&self, identifier: Option<&str>) {
        *lock(&self.identifier) = identifier.map(str::to_owned);
    }
}

#[async_trait]
impl WorkspaceHost for StaticHost {
    fn config(&self) -> TintConfig {
        lock(&self.config).clone()
    }

    fn theme(&self) -> ThemeContext {
        lock(&self.theme).clone()
    }

    async fn workspace_identifier(&self) -> Option<String> {
        lock(&self.identifier).clone()
    }
}

// ============================================================================
// Harness
// ============================================================================

/// A [`MemoryStore`] and a [`StaticHost`] ready to drive reconciles.
#[derive(Debug, Clone)]
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub host: Arc<StaticHost>,
}

impl Harness {
    /// Empty document, default host for `identifier`.
    pub fn new(identifier: &str) -> Self {
        Self::with_document(identifier, Document::new())
    }

    /// Starts from an existing document.
    pub fn with_document(identifier: &str, document: Document) -> Self {
        Self {
            store: Arc::new(MemoryStore::with_document(document)),
            host: Arc::new(StaticHost::new(identifier)),
        }
    }

    /// A core with a disarmed guard.
    pub fn core(&self) -> ReconcileCore {
        self.core_with_guard(ConflictGuard::new(Default::default()))
    }

    pub fn core_with_guard(&self, guard: ConflictGuard) -> ReconcileCore {
        ReconcileCore::new(self.store.clone(), self.host.clone(), guard)
    }

    /// Spawns an engine; requires a Tokio runtime.
    pub fn engine(&self, config: EngineConfig) -> ReconcileEngine {
        ReconcileEngine::spawn(self.store.clone(), self.host.clone(), config)
    }
}
