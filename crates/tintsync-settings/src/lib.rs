//! # tintsync-settings - Ownership-Marked Settings Merging
//!
//! Pure transforms over a user-editable settings document: write a palette
//! into a theme-scoped block, strip it back out, and tell whether managed
//! colors are present that this system did not write.
//!
//! ## Document shape
//!
//! ```json
//! {
//!   "editor.fontSize": 14,
//!   "[Default Dark Modern]": {
//!     "statusBar.background": "#3A5F8C",
//!     "statusBar.foreground": "#F1F4F8"
//!   },
//!   "tintsync.ownedTheme": "Default Dark Modern"
//! }
//! ```
//!
//! The root marker names the block this system owns. It never appears
//! inside a block.
//!
//! ## Example
//!
//! ```rust
//! use tintsync_settings::{has_managed_keys_without_marker, merge, parse_document, remove};
//! use tintsync_color::{ManagedKey, Palette};
//!
//! let existing = parse_document(r#"{ "editor.fontSize": 14 }"#).unwrap();
//! let palette: Palette = [(ManagedKey::StatusBarBackground, "#3A5F8C".to_string())]
//!     .into_iter()
//!     .collect();
//!
//! let applied = merge(&existing, &palette, "Default Dark Modern");
//! assert!(!has_managed_keys_without_marker(&applied, Some("Default Dark Modern")));
//!
//! let cleared = remove(&applied).unwrap();
//! assert_eq!(cleared, existing);
//! ```

mod document;
mod error;
pub mod keys;
mod merge;

pub use document::{
    documents_equal, find_owner, parse_document, theme_block_key, theme_name_of_block, Document,
    Owner,
};
pub use error::SettingsError;
pub use keys::{is_managed_key, is_marker_key, LEGACY_MARKER_KEYS, OWNER_MARKER_KEY};
pub use merge::{has_managed_keys_without_marker, merge, remove};
