//! Palette generation: from workspace identity to one hex color per key.
//!
//! # Pipeline
//!
//! 1. [`hue`](crate::hue()) turns the identifier and seed into a base hue.
//! 2. The [`Harmony`] rotates each [`TintTarget`] relative to that base hue.
//! 3. The [`TintStyle`] picks lightness and chroma for the theme kind, and
//!    each background's [`Tone`] adjusts them (inactive title bar, calm side
//!    bar body).
//! 4. Background colors are blended toward the theme's matching background
//!    when a non-zero factor applies (see [`crate::blend`]).
//! 5. Foreground colors are derived from the final background for contrast;
//!    they are never blended.
//!
//! The whole pipeline is a pure function of the [`PaletteRequest`].
//!
//! ```rust
//! use tintsync_color::{generate, Harmony, ManagedKey, PaletteRequest, ThemeContext, ThemeKind, TintTarget};
//!
//! let theme = ThemeContext::new(ThemeKind::Dark, "Default Dark Modern");
//! let request = PaletteRequest::new("/home/me/project", &theme)
//!     .targets([TintTarget::TitleBar, TintTarget::StatusBar])
//!     .harmony(Harmony::Complementary);
//!
//! let palette = generate(&request);
//! assert_eq!(palette.len(), 6);
//! assert!(palette.get(ManagedKey::StatusBarBackground).is_some());
//! assert_eq!(palette, generate(&request));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::blend::{blend_with_theme, majority_direction, normalize_hue, BlendConfig, BlendMethod};
use crate::colorspace::{Oklch, Rgb};
use crate::hue::hue;
use crate::keys::{ColorRole, ManagedKey, Tone};
use crate::theme::{ThemeContext, ThemeKind};

// ─── Targets ────────────────────────────────────────────────────────────────

/// A UI element family that can be tinted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum TintTarget {
    /// Window title bar.
    TitleBar,
    /// Bottom status bar.
    StatusBar,
    /// Vertical icon strip.
    ActivityBar,
    /// Side bar body and its section headers.
    SideBar,
}

impl TintTarget {
    /// Every target, in document order.
    pub const ALL: [TintTarget; 4] = [
        TintTarget::TitleBar,
        TintTarget::StatusBar,
        TintTarget::ActivityBar,
        TintTarget::SideBar,
    ];

    /// Managed keys written for this target.
    pub fn keys(self) -> &'static [ManagedKey] {
        match self {
            TintTarget::TitleBar => &[
                ManagedKey::TitleBarActiveBackground,
                ManagedKey::TitleBarActiveForeground,
                ManagedKey::TitleBarInactiveBackground,
                ManagedKey::TitleBarInactiveForeground,
            ],
            TintTarget::StatusBar => &[
                ManagedKey::StatusBarBackground,
                ManagedKey::StatusBarForeground,
            ],
            TintTarget::ActivityBar => &[
                ManagedKey::ActivityBarBackground,
                ManagedKey::ActivityBarForeground,
            ],
            TintTarget::SideBar => &[
                ManagedKey::SideBarBackground,
                ManagedKey::SideBarForeground,
                ManagedKey::SideBarSectionHeaderBackground,
                ManagedKey::SideBarSectionHeaderForeground,
            ],
        }
    }

    /// The key shown as this target's color in status views.
    pub fn primary_key(self) -> ManagedKey {
        match self {
            TintTarget::TitleBar => ManagedKey::TitleBarActiveBackground,
            TintTarget::StatusBar => ManagedKey::StatusBarBackground,
            TintTarget::ActivityBar => ManagedKey::ActivityBarBackground,
            TintTarget::SideBar => ManagedKey::SideBarBackground,
        }
    }
}

// ─── Style and harmony ──────────────────────────────────────────────────────

/// Lightness/chroma character of the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TintStyle {
    /// Light, low-chroma colors.
    #[default]
    Pastel,
    /// Saturated colors.
    Vibrant,
    /// Subdued colors that sit close to the theme.
    Muted,
    /// Zero chroma: grays only.
    Monochrome,
}

/// Base lightness and chroma for a style under a theme kind.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Curve {
    lightness: f64,
    chroma: f64,
}

impl TintStyle {
    fn curve(self, kind: ThemeKind) -> Curve {
        let (dark_l, light_l, chroma) = match self {
            TintStyle::Pastel => (0.58, 0.88, 0.07),
            TintStyle::Vibrant => (0.50, 0.68, 0.16),
            TintStyle::Muted => (0.38, 0.80, 0.045),
            TintStyle::Monochrome => (0.34, 0.86, 0.0),
        };
        match kind {
            ThemeKind::Dark => Curve {
                lightness: dark_l,
                chroma,
            },
            ThemeKind::Light => Curve {
                lightness: light_l,
                chroma,
            },
            ThemeKind::HighContrastDark => Curve {
                lightness: (dark_l - 0.1_f64).max(0.15),
                chroma: chroma * 1.15,
            },
            ThemeKind::HighContrastLight => Curve {
                lightness: (light_l + 0.05_f64).min(0.97),
                chroma: chroma * 1.15,
            },
        }
    }
}

/// How target hues relate to the base hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Harmony {
    /// Every target uses the base hue.
    #[default]
    Uniform,
    /// Neighbouring hues within ±30°.
    Analogous,
    /// Status and activity bars opposite the title bar.
    Complementary,
    /// Three hues 120° apart.
    Triadic,
    /// The two hues flanking the complement.
    SplitComplementary,
}

impl Harmony {
    /// Hue offset in degrees applied to `target`.
    pub fn offset(self, target: TintTarget) -> f64 {
        use TintTarget::*;
        match (self, target) {
            (Harmony::Uniform, _) => 0.0,
            (Harmony::Analogous, TitleBar) => 0.0,
            (Harmony::Analogous, StatusBar) => -30.0,
            (Harmony::Analogous, ActivityBar) => 30.0,
            (Harmony::Analogous, SideBar) => 15.0,
            (Harmony::Complementary, StatusBar | ActivityBar) => 180.0,
            (Harmony::Complementary, _) => 0.0,
            (Harmony::Triadic, StatusBar) => 120.0,
            (Harmony::Triadic, ActivityBar) => 240.0,
            (Harmony::Triadic, _) => 0.0,
            (Harmony::SplitComplementary, StatusBar) => 150.0,
            (Harmony::SplitComplementary, ActivityBar) => 210.0,
            (Harmony::SplitComplementary, _) => 0.0,
        }
    }
}

// ─── Request and result ─────────────────────────────────────────────────────

/// Inputs to [`generate`].
#[derive(Debug, Clone)]
pub struct PaletteRequest<'a> {
    /// Workspace identifier.
    pub identifier: &'a str,
    /// User seed.
    pub seed: i32,
    /// Targets to color; duplicates are ignored.
    pub targets: Vec<TintTarget>,
    /// Active theme, including its background colors.
    pub theme: &'a ThemeContext,
    /// Lightness/chroma style.
    pub style: TintStyle,
    /// Per-target hue offsets.
    pub harmony: Harmony,
    /// Theme blending.
    pub blend: BlendConfig,
}

impl<'a> PaletteRequest<'a> {
    /// Creates a request for every target with default style, harmony and
    /// no blending.
    pub fn new(identifier: &'a str, theme: &'a ThemeContext) -> Self {
        Self {
            identifier,
            seed: 0,
            targets: TintTarget::ALL.to_vec(),
            theme,
            style: TintStyle::default(),
            harmony: Harmony::default(),
            blend: BlendConfig::default(),
        }
    }

    /// Sets the seed.
    pub fn seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the targets.
    pub fn targets(mut self, targets: impl IntoIterator<Item = TintTarget>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    /// Sets the style.
    pub fn style(mut self, style: TintStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the harmony.
    pub fn harmony(mut self, harmony: Harmony) -> Self {
        self.harmony = harmony;
        self
    }

    /// Sets the blend configuration.
    pub fn blend(mut self, blend: BlendConfig) -> Self {
        self.blend = blend;
        self
    }
}

/// One managed color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Settings key.
    pub key: ManagedKey,
    /// `#RRGGBB`.
    pub hex: String,
}

/// Generated colors keyed by managed key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: BTreeMap<ManagedKey, String>,
}

impl Palette {
    /// Hex value for `key`, if generated.
    pub fn get(&self, key: ManagedKey) -> Option<&str> {
        self.colors.get(&key).map(String::as_str)
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when no target was requested.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterates `(key, hex)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (ManagedKey, &str)> {
        self.colors.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// The palette as ordered entries.
    pub fn entries(&self) -> Vec<PaletteEntry> {
        self.iter()
            .map(|(key, hex)| PaletteEntry {
                key,
                hex: hex.to_string(),
            })
            .collect()
    }

    /// Colors keyed by their dotted settings key.
    pub fn to_settings_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_string()))
            .collect()
    }
}

impl FromIterator<(ManagedKey, String)> for Palette {
    fn from_iter<I: IntoIterator<Item = (ManagedKey, String)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}

// ─── Generation ─────────────────────────────────────────────────────────────

/// Lightness above which a surface gets dark text.
const LIGHT_SURFACE: f64 = 0.62;

/// Generates the palette for `request`.
///
/// Output keys are exactly the keys of the requested targets; an empty
/// target list yields an empty palette.
///
/// Only backgrounds are blended toward the theme. Foregrounds are then
/// picked against the final, blended background, so their lightness follows
/// whatever the blend did to the surface they sit on.
pub fn generate(request: &PaletteRequest<'_>) -> Palette {
    let base = hue(request.identifier, request.seed);
    let theme = request.theme;
    let blend = &request.blend;

    let majority = match blend.method {
        BlendMethod::HueShift => majority_direction(base, theme.background_hues()),
        BlendMethod::Overlay => None,
    };

    let curve = request.style.curve(theme.kind);
    let mut colors: BTreeMap<ManagedKey, Rgb> = BTreeMap::new();

    for target in TintTarget::ALL
        .into_iter()
        .filter(|t| request.targets.contains(t))
    {
        let target_hue = normalize_hue(base + request.harmony.offset(target));
        let factor = blend.factor_for(target);

        for &key in target.keys().iter().filter(|k| k.role() == ColorRole::Background) {
            let tint = background(curve, key.tone(), theme.kind, target_hue);
            let color = match theme.background_for(key.as_str()) {
                Some(theme_hex) if factor > 0.0 => blend_with_theme(
                    tint,
                    theme_hex,
                    blend.method,
                    factor,
                    blend.hue_only,
                    majority,
                ),
                _ => tint,
            };
            colors.insert(key, color);
        }

        for &key in target.keys() {
            if let Some(surface) = key.surface() {
                if let Some(&bg) = colors.get(&surface) {
                    colors.insert(key, foreground(bg, key.tone(), curve.chroma, target_hue));
                }
            }
        }
    }

    colors
        .into_iter()
        .map(|(key, rgb)| (key, rgb.to_hex()))
        .collect()
}

fn background(curve: Curve, tone: Tone, kind: ThemeKind, target_hue: f64) -> Rgb {
    let dark = kind.is_dark();
    let (l, c) = match tone {
        Tone::Primary => (curve.lightness, curve.chroma),
        Tone::Inactive if dark => (curve.lightness - 0.06, curve.chroma * 0.6),
        Tone::Inactive => (curve.lightness + 0.04, curve.chroma * 0.6),
        Tone::Subtle if dark => (curve.lightness - 0.12, curve.chroma * 0.45),
        Tone::Subtle => (curve.lightness + 0.06, curve.chroma * 0.45),
    };
    Oklch::new(l.clamp(0.1, 0.97), c, target_hue).to_rgb()
}

fn foreground(surface: Rgb, tone: Tone, chroma: f64, target_hue: f64) -> Rgb {
    let light_surface = surface.to_oklch().l > LIGHT_SURFACE;
    let inactive = tone == Tone::Inactive;
    let (l, c) = match (light_surface, inactive) {
        (true, false) => (0.22, (chroma * 0.5).min(0.04)),
        (true, true) => (0.40, (chroma * 0.3).min(0.03)),
        (false, false) => (0.96, (chroma * 0.2).min(0.02)),
        (false, true) => (0.80, (chroma * 0.2).min(0.02)),
    };
    Oklch::new(l, c, target_hue).to_rgb()
}
