//! Which document keys belong to this system.
//!
//! Color keys come from the closed [`ManagedKey`] enum. The ownership marker
//! lives at the document root under [`OWNER_MARKER_KEY`]; documents written by
//! older releases may carry one of the [`LEGACY_MARKER_KEYS`] instead, which
//! are read as equivalent and replaced by the canonical key on the next write.

pub use tintsync_color::ManagedKey;

/// Root key recording which theme block this system owns.
pub const OWNER_MARKER_KEY: &str = "tintsync.ownedTheme";

/// Marker keys written by earlier releases, in lookup order.
pub const LEGACY_MARKER_KEYS: [&str; 2] = ["workspaceTint.ownedTheme", "windowTint.ownedTheme"];

/// True for the canonical marker key or any legacy alias.
pub fn is_marker_key(key: &str) -> bool {
    key == OWNER_MARKER_KEY || LEGACY_MARKER_KEYS.contains(&key)
}

/// True for any key this system may write or strip: the managed color keys
/// plus every marker key.
pub fn is_managed_key(key: &str) -> bool {
    ManagedKey::is_managed(key) || is_marker_key(key)
}

/// Marker keys in lookup order: canonical first, then legacy aliases.
pub(crate) fn marker_keys() -> impl Iterator<Item = &'static str> {
    std::iter::once(OWNER_MARKER_KEY).chain(LEGACY_MARKER_KEYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_are_managed() {
        assert!(is_marker_key("tintsync.ownedTheme"));
        assert!(is_marker_key("workspaceTint.ownedTheme"));
        assert!(is_marker_key("windowTint.ownedTheme"));
        assert!(is_managed_key("windowTint.ownedTheme"));
        assert!(!is_marker_key("tintsync.ownedtheme"));
    }

    #[test]
    fn color_keys_are_managed_foreign_keys_are_not() {
        assert!(is_managed_key("statusBar.background"));
        assert!(!is_managed_key("editor.background"));
        assert!(!is_managed_key("statusBar.debuggingBackground"));
    }

    #[test]
    fn canonical_marker_is_looked_up_first() {
        let order: Vec<_> = marker_keys().collect();
        assert_eq!(
            order,
            vec![
                "tintsync.ownedTheme",
                "workspaceTint.ownedTheme",
                "windowTint.ownedTheme"
            ]
        );
    }
}
