//! The closed set of settings keys this system writes.
//!
//! The key strings are part of the external contract with the settings
//! document and must not change. Membership checks go through
//! [`ManagedKey::from_key`], so extending the namespace is a compile-checked
//! change to this enum.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::palette::TintTarget;

/// Whether a key colors a surface or the text drawn on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    /// Surface color; eligible for theme blending.
    Background,
    /// Text/icon color; never blended.
    Foreground,
}

/// How prominent a background is within its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// The main, most saturated surface.
    Primary,
    /// A window that does not have focus.
    Inactive,
    /// Large surfaces that should stay calm (side bar body).
    Subtle,
}

/// A settings key managed by the tint engine.
///
/// Variants are declared in document order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ManagedKey {
    /// `titleBar.activeBackground`
    #[serde(rename = "titleBar.activeBackground")]
    TitleBarActiveBackground,
    /// `titleBar.activeForeground`
    #[serde(rename = "titleBar.activeForeground")]
    TitleBarActiveForeground,
    /// `titleBar.inactiveBackground`
    #[serde(rename = "titleBar.inactiveBackground")]
    TitleBarInactiveBackground,
    /// `titleBar.inactiveForeground`
    #[serde(rename = "titleBar.inactiveForeground")]
    TitleBarInactiveForeground,
    /// `statusBar.background`
    #[serde(rename = "statusBar.background")]
    StatusBarBackground,
    /// `statusBar.foreground`
    #[serde(rename = "statusBar.foreground")]
    StatusBarForeground,
    /// `activityBar.background`
    #[serde(rename = "activityBar.background")]
    ActivityBarBackground,
    /// `activityBar.foreground`
    #[serde(rename = "activityBar.foreground")]
    ActivityBarForeground,
    /// `sideBar.background`
    #[serde(rename = "sideBar.background")]
    SideBarBackground,
    /// `sideBar.foreground`
    #[serde(rename = "sideBar.foreground")]
    SideBarForeground,
    /// `sideBarSectionHeader.background`
    #[serde(rename = "sideBarSectionHeader.background")]
    SideBarSectionHeaderBackground,
    /// `sideBarSectionHeader.foreground`
    #[serde(rename = "sideBarSectionHeader.foreground")]
    SideBarSectionHeaderForeground,
}

impl ManagedKey {
    /// Every managed key, in document order.
    pub const ALL: [ManagedKey; 12] = [
        ManagedKey::TitleBarActiveBackground,
        ManagedKey::TitleBarActiveForeground,
        ManagedKey::TitleBarInactiveBackground,
        ManagedKey::TitleBarInactiveForeground,
        ManagedKey::StatusBarBackground,
        ManagedKey::StatusBarForeground,
        ManagedKey::ActivityBarBackground,
        ManagedKey::ActivityBarForeground,
        ManagedKey::SideBarBackground,
        ManagedKey::SideBarForeground,
        ManagedKey::SideBarSectionHeaderBackground,
        ManagedKey::SideBarSectionHeaderForeground,
    ];

    /// The dotted settings key.
    pub const fn as_str(self) -> &'static str {
        match self {
            ManagedKey::TitleBarActiveBackground => "titleBar.activeBackground",
            ManagedKey::TitleBarActiveForeground => "titleBar.activeForeground",
            ManagedKey::TitleBarInactiveBackground => "titleBar.inactiveBackground",
            ManagedKey::TitleBarInactiveForeground => "titleBar.inactiveForeground",
            ManagedKey::StatusBarBackground => "statusBar.background",
            ManagedKey::StatusBarForeground => "statusBar.foreground",
            ManagedKey::ActivityBarBackground => "activityBar.background",
            ManagedKey::ActivityBarForeground => "activityBar.foreground",
            ManagedKey::SideBarBackground => "sideBar.background",
            ManagedKey::SideBarForeground => "sideBar.foreground",
            ManagedKey::SideBarSectionHeaderBackground => "sideBarSectionHeader.background",
            ManagedKey::SideBarSectionHeaderForeground => "sideBarSectionHeader.foreground",
        }
    }

    /// Looks up a settings key. Exact, case-sensitive match.
    pub fn from_key(key: &str) -> Option<ManagedKey> {
        ManagedKey::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// True when `key` is a managed color key.
    pub fn is_managed(key: &str) -> bool {
        ManagedKey::from_key(key).is_some()
    }

    /// The UI element family this key belongs to.
    pub const fn target(self) -> TintTarget {
        match self {
            ManagedKey::TitleBarActiveBackground
            | ManagedKey::TitleBarActiveForeground
            | ManagedKey::TitleBarInactiveBackground
            | ManagedKey::TitleBarInactiveForeground => TintTarget::TitleBar,
            ManagedKey::StatusBarBackground | ManagedKey::StatusBarForeground => {
                TintTarget::StatusBar
            }
            ManagedKey::ActivityBarBackground | ManagedKey::ActivityBarForeground => {
                TintTarget::ActivityBar
            }
            ManagedKey::SideBarBackground
            | ManagedKey::SideBarForeground
            | ManagedKey::SideBarSectionHeaderBackground
            | ManagedKey::SideBarSectionHeaderForeground => TintTarget::SideBar,
        }
    }

    /// Background or foreground.
    pub const fn role(self) -> ColorRole {
        match self.surface() {
            Some(_) => ColorRole::Foreground,
            None => ColorRole::Background,
        }
    }

    /// For a foreground key, the background key it is drawn on.
    pub const fn surface(self) -> Option<ManagedKey> {
        match self {
            ManagedKey::TitleBarActiveForeground => Some(ManagedKey::TitleBarActiveBackground),
            ManagedKey::TitleBarInactiveForeground => {
                Some(ManagedKey::TitleBarInactiveBackground)
            }
            ManagedKey::StatusBarForeground => Some(ManagedKey::StatusBarBackground),
            ManagedKey::ActivityBarForeground => Some(ManagedKey::ActivityBarBackground),
            ManagedKey::SideBarForeground => Some(ManagedKey::SideBarBackground),
            ManagedKey::SideBarSectionHeaderForeground => {
                Some(ManagedKey::SideBarSectionHeaderBackground)
            }
            _ => None,
        }
    }

    /// Prominence of the surface this key colors (or sits on).
    pub const fn tone(self) -> Tone {
        match self {
            ManagedKey::TitleBarInactiveBackground | ManagedKey::TitleBarInactiveForeground => {
                Tone::Inactive
            }
            ManagedKey::SideBarBackground | ManagedKey::SideBarForeground => Tone::Subtle,
            _ => Tone::Primary,
        }
    }
}

impl fmt::Display for ManagedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_strings_are_exact() {
        let keys: Vec<&str> = ManagedKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "titleBar.activeBackground",
                "titleBar.activeForeground",
                "titleBar.inactiveBackground",
                "titleBar.inactiveForeground",
                "statusBar.background",
                "statusBar.foreground",
                "activityBar.background",
                "activityBar.foreground",
                "sideBar.background",
                "sideBar.foreground",
                "sideBarSectionHeader.background",
                "sideBarSectionHeader.foreground",
            ]
        );
    }

    #[test]
    fn from_key_roundtrips_and_rejects_unknown() {
        for key in ManagedKey::ALL {
            assert_eq!(ManagedKey::from_key(key.as_str()), Some(key));
        }
        assert_eq!(ManagedKey::from_key("editor.background"), None);
        assert_eq!(ManagedKey::from_key("TitleBar.activeBackground"), None);
    }

    #[test]
    fn every_foreground_sits_on_a_background_of_the_same_target() {
        for key in ManagedKey::ALL {
            if let Some(surface) = key.surface() {
                assert_eq!(surface.role(), ColorRole::Background);
                assert_eq!(surface.target(), key.target());
                assert_eq!(surface.tone(), key.tone());
            }
        }
    }

    #[test]
    fn roles_split_evenly() {
        let backgrounds = ManagedKey::ALL
            .iter()
            .filter(|k| k.role() == ColorRole::Background)
            .count();
        assert_eq!(backgrounds, 6);
    }

    #[test]
    fn serde_uses_dotted_keys() {
        let json = serde_json::to_string(&ManagedKey::SideBarSectionHeaderBackground).unwrap();
        assert_eq!(json, "\"sideBarSectionHeader.background\"");
    }
}
