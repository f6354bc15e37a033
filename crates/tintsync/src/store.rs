//! Seams to the outside world.
//!
//! The engine never touches a file or an editor API directly. It reads and
//! writes the settings document through a [`SettingsStore`] and asks a
//! [`WorkspaceHost`] for configuration, theme and workspace identity on every
//! reconcile. [`JsonFileStore`] is the store used by the command-line tool.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tintsync_color::ThemeContext;
use tintsync_settings::{parse_document, Document};

use crate::config::TintConfig;
use crate::error::StoreError;

/// Where the settings document lives.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Reads the current document. A missing document reads as empty.
    async fn read(&self) -> Result<Document, StoreError>;

    /// Replaces the document.
    async fn write(&self, document: &Document) -> Result<(), StoreError>;
}

/// The editor (or whatever embeds the engine).
#[async_trait]
pub trait WorkspaceHost: Send + Sync {
    /// Current tint configuration for this workspace.
    fn config(&self) -> TintConfig;

    /// Snapshot of the active theme.
    fn theme(&self) -> ThemeContext;

    /// Stable identity of the open workspace, or `None` when there is none.
    async fn workspace_identifier(&self) -> Option<String>;
}

/// A settings document stored as a plain JSON file.
///
/// Comments are not supported; the file is rewritten pretty-printed.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn read(&self) -> Result<Document, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(parse_document(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn write(&self, document: &Document) -> Result<(), StoreError> {
        let mut text = serde_json::to_string_pretty(document).map_err(StoreError::Serialize)?;
        text.push('\n');
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), keys = document.len(), "settings written");
        Ok(())
    }
}
