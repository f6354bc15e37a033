//! Snapshot of the active editor theme.
//!
//! A [`ThemeContext`] is built fresh for every palette computation by the
//! host. It carries the theme kind (which selects the lightness curve), the
//! display name (which scopes the written colors) and, optionally, the
//! theme's own background colors keyed by settings key (which tints are
//! blended toward).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::colorspace::Rgb;

/// Settings key used as the fallback background when the theme does not
/// define a color for a specific managed key.
pub const EDITOR_BACKGROUND_KEY: &str = "editor.background";

/// Broad category of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThemeKind {
    /// Dark theme.
    #[default]
    #[serde(rename = "dark")]
    Dark,
    /// Light theme.
    #[serde(rename = "light")]
    Light,
    /// High-contrast dark theme.
    #[serde(rename = "hcDark")]
    HighContrastDark,
    /// High-contrast light theme.
    #[serde(rename = "hcLight")]
    HighContrastLight,
}

impl ThemeKind {
    /// True for dark and high-contrast dark themes.
    pub fn is_dark(self) -> bool {
        matches!(self, ThemeKind::Dark | ThemeKind::HighContrastDark)
    }

    /// True for either high-contrast variant.
    pub fn is_high_contrast(self) -> bool {
        matches!(
            self,
            ThemeKind::HighContrastDark | ThemeKind::HighContrastLight
        )
    }
}

/// The active theme as seen by the palette generator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeContext {
    /// Theme category.
    #[serde(rename = "type")]
    pub kind: ThemeKind,
    /// Display name, e.g. `"Default Dark Modern"`.
    pub name: String,
    /// Whether the editor picked the theme from the OS color scheme.
    pub is_auto_detected: bool,
    /// Theme colors keyed by settings key (`"titleBar.activeBackground"` → hex).
    pub colors: BTreeMap<String, String>,
}

impl ThemeContext {
    /// Creates a context with no known colors.
    pub fn new(kind: ThemeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            is_auto_detected: false,
            colors: BTreeMap::new(),
        }
    }

    /// Adds one theme color, returning `self` for chaining.
    pub fn with_color(mut self, key: impl Into<String>, hex: impl Into<String>) -> Self {
        self.colors.insert(key.into(), hex.into());
        self
    }

    /// Marks whether the theme was auto-detected.
    pub fn auto_detected(mut self, auto: bool) -> Self {
        self.is_auto_detected = auto;
        self
    }

    /// The theme name trimmed, or `None` when blank.
    pub fn resolved_name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Background to blend `key` toward: the theme's own value for that key,
    /// falling back to the editor background.
    pub fn background_for(&self, key: &str) -> Option<&str> {
        self.colors
            .get(key)
            .or_else(|| self.colors.get(EDITOR_BACKGROUND_KEY))
            .map(String::as_str)
    }

    /// Hues of the theme's chromatic background colors, in key order.
    ///
    /// Only keys naming a background participate; entries that fail to parse
    /// or are effectively gray are skipped.
    pub fn background_hues(&self) -> Vec<f64> {
        self.colors
            .iter()
            .filter(|(key, _)| is_background_key(key))
            .filter_map(|(_, hex)| Rgb::from_hex(hex).ok())
            .map(Rgb::to_oklch)
            .filter(|lch| !lch.is_achromatic())
            .map(|lch| lch.h)
            .collect()
    }
}

/// True when a settings key names a background color slot.
pub fn is_background_key(key: &str) -> bool {
    key.ends_with("Background") || key.ends_with(".background")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_predicates() {
        assert!(ThemeKind::Dark.is_dark());
        assert!(ThemeKind::HighContrastDark.is_dark());
        assert!(!ThemeKind::Light.is_dark());
        assert!(ThemeKind::HighContrastLight.is_high_contrast());
        assert!(!ThemeKind::Dark.is_high_contrast());
    }

    #[test]
    fn resolved_name_rejects_blank() {
        assert_eq!(ThemeContext::new(ThemeKind::Dark, "  ").resolved_name(), None);
        assert_eq!(
            ThemeContext::new(ThemeKind::Dark, " Monokai ").resolved_name(),
            Some("Monokai")
        );
    }

    #[test]
    fn background_for_falls_back_to_editor() {
        let theme = ThemeContext::new(ThemeKind::Dark, "T")
            .with_color("editor.background", "#1E1E1E")
            .with_color("statusBar.background", "#007ACC");
        assert_eq!(theme.background_for("statusBar.background"), Some("#007ACC"));
        assert_eq!(theme.background_for("sideBar.background"), Some("#1E1E1E"));
        assert_eq!(
            ThemeContext::new(ThemeKind::Dark, "T").background_for("sideBar.background"),
            None
        );
    }

    #[test]
    fn background_hues_skip_foregrounds_grays_and_garbage() {
        let theme = ThemeContext::new(ThemeKind::Dark, "T")
            .with_color("editor.background", "#1E1E1E")
            .with_color("statusBar.background", "#007ACC")
            .with_color("statusBar.foreground", "#FF0000")
            .with_color("titleBar.activeBackground", "not-a-color");
        let hues = theme.background_hues();
        assert_eq!(hues.len(), 1);
        assert!(hues[0] > 200.0 && hues[0] < 270.0);
    }

    #[test]
    fn deserializes_host_shape() {
        let theme: ThemeContext = serde_json::from_str(
            r##"{"type":"hcLight","name":"Light HC","isAutoDetected":true,"colors":{"editor.background":"#FFFFFF"}}"##,
        )
        .unwrap();
        assert_eq!(theme.kind, ThemeKind::HighContrastLight);
        assert!(theme.is_auto_detected);
        assert_eq!(theme.colors.len(), 1);
    }
}
