//! Theme-aware blending of tint colors.
//!
//! Two strategies pull a generated tint toward the active theme's background
//! so tinted chrome does not clash with the rest of the editor:
//!
//! - [`BlendMethod::Overlay`]: alpha-composite in linear sRGB. Physically
//!   correct mixing; the result drifts toward the theme color in every
//!   channel at once.
//! - [`BlendMethod::HueShift`]: interpolate in OKLCH. With `hue_only`, the
//!   tint keeps its own lightness and chroma and only rotates toward the
//!   theme's hue.
//!
//! # Hue direction
//!
//! Interpolating an angle needs a direction. [`blend_hue_directed`] supports
//! the shortest arc and forced clockwise/counter-clockwise rotation. When
//! several elements are blended at once, [`majority_direction`] picks one
//! direction for all of them so neighbouring bars do not rotate opposite
//! ways. A forced direction is only honoured while the resulting arc stays
//! within [`MAX_FORCED_ARC`] degrees; see [`effective_direction`].
//!
//! ```rust
//! use tintsync_color::{blend_hue_directed, HueDirection};
//!
//! assert_eq!(blend_hue_directed(10.0, 350.0, 0.25, HueDirection::Cw), 95.0);
//! assert_eq!(blend_hue_directed(350.0, 10.0, 0.5, HueDirection::Shortest), 0.0);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::colorspace::{Oklch, Rgb};
use crate::palette::TintTarget;

/// Longest arc, in degrees, a forced hue direction may travel before the
/// pair falls back to the shortest path.
pub const MAX_FORCED_ARC: f64 = 270.0;

/// Strategy for pulling a tint toward the theme background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlendMethod {
    /// Linear-sRGB alpha compositing.
    #[default]
    Overlay,
    /// OKLCH interpolation with directed hue rotation.
    HueShift,
}

/// Direction of hue interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HueDirection {
    /// Take the arc of at most 180°.
    #[default]
    Shortest,
    /// Increasing hue.
    Cw,
    /// Decreasing hue.
    Ccw,
}

/// Blend settings shared by every target in a palette.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlendConfig {
    /// Blend strategy.
    pub method: BlendMethod,
    /// With [`BlendMethod::HueShift`], keep the tint's L and C. Ignored by overlay.
    pub hue_only: bool,
    /// Blend factor in `[0, 1]`; 0 disables blending.
    pub factor: f64,
    /// Per-target overrides of `factor`.
    pub per_target: BTreeMap<TintTarget, f64>,
}

impl BlendConfig {
    /// Creates a config with the given method and factor and no overrides.
    pub fn new(method: BlendMethod, factor: f64) -> Self {
        Self {
            method,
            factor,
            ..Self::default()
        }
    }

    /// Enables hue-only blending.
    pub fn hue_only(mut self, hue_only: bool) -> Self {
        self.hue_only = hue_only;
        self
    }

    /// Overrides the factor for one target.
    pub fn with_target_factor(mut self, target: TintTarget, factor: f64) -> Self {
        self.per_target.insert(target, factor);
        self
    }

    /// The factor that applies to `target`, clamped to `[0, 1]`.
    pub fn factor_for(&self, target: TintTarget) -> f64 {
        let f = self.per_target.get(&target).copied().unwrap_or(self.factor);
        clamp_factor(f)
    }
}

fn clamp_factor(f: f64) -> f64 {
    if f.is_nan() {
        0.0
    } else {
        f.clamp(0.0, 1.0)
    }
}

// ─── Hue arithmetic ─────────────────────────────────────────────────────────

/// Normalizes an angle into `[0, 360)`.
pub fn normalize_hue(h: f64) -> f64 {
    let n = ((h % 360.0) + 360.0) % 360.0;
    // -1e-15 % 360 + 360 rounds to exactly 360.0
    if n >= 360.0 {
        0.0
    } else {
        n
    }
}

/// Interpolates from `h1` toward `h2` by `f`, rotating in `direction`.
///
/// - `Shortest`: the signed difference is folded into `[-180, 180]`.
/// - `Cw`: a negative difference gets `+360`.
/// - `Ccw`: a positive difference gets `-360`.
pub fn blend_hue_directed(h1: f64, h2: f64, f: f64, direction: HueDirection) -> f64 {
    let mut diff = h2 - h1;
    match direction {
        HueDirection::Shortest => {
            if diff > 180.0 {
                diff -= 360.0;
            } else if diff < -180.0 {
                diff += 360.0;
            }
        }
        HueDirection::Cw => {
            if diff < 0.0 {
                diff += 360.0;
            }
        }
        HueDirection::Ccw => {
            if diff > 0.0 {
                diff -= 360.0;
            }
        }
    }
    normalize_hue(h1 + diff * f)
}

/// Shortest-path rotation from `from` to `to`.
///
/// Returns `None` when the hues coincide. An exact half-turn counts as `Cw`.
pub fn shortest_direction(from: f64, to: f64) -> Option<HueDirection> {
    let diff = normalize_hue(to - from);
    if diff == 0.0 {
        None
    } else if diff <= 180.0 {
        Some(HueDirection::Cw)
    } else {
        Some(HueDirection::Ccw)
    }
}

/// Arc length travelled from `from` to `to` when rotating in `direction`.
pub fn arc_length(from: f64, to: f64, direction: HueDirection) -> f64 {
    match direction {
        HueDirection::Cw => normalize_hue(to - from),
        HueDirection::Ccw => normalize_hue(from - to),
        HueDirection::Shortest => {
            let d = normalize_hue(to - from);
            d.min(360.0 - d)
        }
    }
}

/// Majority vote of shortest-path directions from `base_hue` to each of
/// `theme_hues`.
///
/// Returns `None` when no hue casts a vote; ties go to `Cw`.
pub fn majority_direction<I>(base_hue: f64, theme_hues: I) -> Option<HueDirection>
where
    I: IntoIterator<Item = f64>,
{
    let (mut cw, mut ccw) = (0usize, 0usize);
    for h in theme_hues {
        match shortest_direction(base_hue, h) {
            Some(HueDirection::Cw) => cw += 1,
            Some(HueDirection::Ccw) => ccw += 1,
            _ => {}
        }
    }
    match (cw, ccw) {
        (0, 0) => None,
        (cw, ccw) if ccw > cw => Some(HueDirection::Ccw),
        _ => Some(HueDirection::Cw),
    }
}

/// Direction to use for one (tint, theme) hue pair given the palette-wide
/// majority.
///
/// The majority is honoured only while its arc is at most
/// [`MAX_FORCED_ARC`]; otherwise this pair takes the shortest path.
pub fn effective_direction(
    tint_hue: f64,
    theme_hue: f64,
    majority: Option<HueDirection>,
) -> HueDirection {
    match majority {
        Some(dir @ (HueDirection::Cw | HueDirection::Ccw))
            if arc_length(tint_hue, theme_hue, dir) <= MAX_FORCED_ARC =>
        {
            dir
        }
        _ => HueDirection::Shortest,
    }
}

// ─── Blend strategies ───────────────────────────────────────────────────────

/// Composites `tint` toward `theme` in linear sRGB: `tint*(1-f) + theme*f`.
pub fn overlay(tint: Rgb, theme: Rgb, f: f64) -> Rgb {
    let f = clamp_factor(f);
    if f == 0.0 {
        return tint;
    }
    if f == 1.0 {
        return theme;
    }
    tint.to_linear().mix(theme.to_linear(), f).to_rgb()
}

/// Interpolates `tint` toward `theme` in OKLCH.
///
/// With `hue_only`, L and C come from the tint and only the hue moves.
/// A gray theme color has no usable hue, so the tint hue is kept. The result
/// is gamut-clamped.
pub fn hue_shift(tint: Oklch, theme: Oklch, f: f64, hue_only: bool, direction: HueDirection) -> Oklch {
    let f = clamp_factor(f);
    let h = if theme.is_achromatic() {
        tint.h
    } else if tint.is_achromatic() {
        // gray tints (monochrome) take the theme hue outright
        theme.h
    } else {
        blend_hue_directed(tint.h, theme.h, f, direction)
    };

    let (l, c) = if hue_only {
        (tint.l, tint.c)
    } else {
        (
            tint.l + (theme.l - tint.l) * f,
            tint.c + (theme.c - tint.c) * f,
        )
    };

    Oklch::new(l, c, h).to_gamut()
}

/// Blends `tint` toward the theme color given as hex.
///
/// A malformed `theme_hex` leaves the tint untouched.
pub fn blend_with_theme(
    tint: Rgb,
    theme_hex: &str,
    method: BlendMethod,
    factor: f64,
    hue_only: bool,
    majority: Option<HueDirection>,
) -> Rgb {
    let theme = match Rgb::from_hex(theme_hex) {
        Ok(rgb) => rgb,
        Err(err) => {
            tracing::debug!(theme_hex, error = %err, "skipping blend with malformed theme color");
            return tint;
        }
    };

    if clamp_factor(factor) == 0.0 {
        return tint;
    }

    match method {
        BlendMethod::Overlay => overlay(tint, theme, factor),
        BlendMethod::HueShift => {
            let tint_lch = tint.to_oklch();
            let theme_lch = theme.to_oklch();
            let direction = effective_direction(tint_lch.h, theme_lch.h, majority);
            hue_shift(tint_lch, theme_lch, factor, hue_only, direction).to_rgb()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // =====================================================================
    // normalize_hue
    // =====================================================================

    #[test]
    fn normalize_wraps_both_ways() {
        assert!(approx(normalize_hue(360.0), 0.0));
        assert!(approx(normalize_hue(-10.0), 350.0));
        assert!(approx(normalize_hue(725.0), 5.0));
        assert!(normalize_hue(-1e-15) < 360.0);
    }

    // =====================================================================
    // blend_hue_directed
    // =====================================================================

    #[test]
    fn directed_cw_takes_long_arc() {
        assert!(approx(blend_hue_directed(10.0, 350.0, 0.25, HueDirection::Cw), 95.0));
    }

    #[test]
    fn shortest_crosses_zero() {
        assert!(approx(
            blend_hue_directed(350.0, 10.0, 0.5, HueDirection::Shortest),
            0.0
        ));
    }

    #[test]
    fn ccw_subtracts_full_turn() {
        // diff = 40 → -320; 10 - 320*0.5 = -150 → 210
        assert!(approx(blend_hue_directed(10.0, 50.0, 0.5, HueDirection::Ccw), 210.0));
    }

    #[test]
    fn factor_endpoints() {
        assert!(approx(blend_hue_directed(40.0, 200.0, 0.0, HueDirection::Cw), 40.0));
        assert!(approx(blend_hue_directed(40.0, 200.0, 1.0, HueDirection::Ccw), 200.0));
    }

    // =====================================================================
    // Direction helpers
    // =====================================================================

    #[test]
    fn shortest_direction_basics() {
        assert_eq!(shortest_direction(10.0, 50.0), Some(HueDirection::Cw));
        assert_eq!(shortest_direction(10.0, 350.0), Some(HueDirection::Ccw));
        assert_eq!(shortest_direction(0.0, 180.0), Some(HueDirection::Cw));
        assert_eq!(shortest_direction(90.0, 90.0), None);
    }

    #[test]
    fn majority_none_without_votes() {
        assert_eq!(majority_direction(120.0, Vec::<f64>::new()), None);
        assert_eq!(majority_direction(120.0, vec![120.0]), None);
    }

    #[test]
    fn majority_tie_breaks_cw() {
        assert_eq!(
            majority_direction(100.0, vec![140.0, 60.0]),
            Some(HueDirection::Cw)
        );
    }

    #[test]
    fn majority_picks_dominant() {
        assert_eq!(
            majority_direction(100.0, vec![60.0, 70.0, 140.0]),
            Some(HueDirection::Ccw)
        );
    }

    #[test]
    fn forced_arc_within_limit_is_kept() {
        // cw from 10 to 250 is 240°
        assert_eq!(
            effective_direction(10.0, 250.0, Some(HueDirection::Cw)),
            HueDirection::Cw
        );
    }

    #[test]
    fn forced_arc_over_limit_falls_back() {
        // cw from 10 to 350 is 340°
        assert_eq!(
            effective_direction(10.0, 350.0, Some(HueDirection::Cw)),
            HueDirection::Shortest
        );
        assert_eq!(effective_direction(10.0, 350.0, None), HueDirection::Shortest);
    }

    // =====================================================================
    // Strategies
    // =====================================================================

    #[test]
    fn overlay_boundaries() {
        let tint = Rgb(200, 40, 90);
        let theme = Rgb(30, 30, 30);
        assert_eq!(overlay(tint, theme, 0.0), tint);
        assert_eq!(overlay(tint, theme, 1.0), theme);
        assert_eq!(overlay(tint, theme, -3.0), tint);
        assert_eq!(overlay(tint, theme, 7.0), theme);
    }

    #[test]
    fn overlay_midpoint_is_linear_light() {
        // Linear-light midpoint of black and white is ~#BCBCBC, not #808080.
        let mid = overlay(Rgb(0, 0, 0), Rgb(255, 255, 255), 0.5);
        assert_eq!(mid, Rgb(188, 188, 188));
    }

    #[test]
    fn hue_only_preserves_lightness_and_chroma() {
        let tint = Oklch::new(0.5, 0.1, 40.0);
        let theme = Oklch::new(0.2, 0.05, 100.0);
        let out = hue_shift(tint, theme, 0.5, true, HueDirection::Shortest);
        assert!(approx(out.l, 0.5));
        assert!(approx(out.c, 0.1));
        assert!(approx(out.h, 70.0));
    }

    #[test]
    fn full_hue_shift_interpolates_all_channels() {
        let tint = Oklch::new(0.6, 0.1, 40.0);
        let theme = Oklch::new(0.2, 0.05, 100.0);
        let out = hue_shift(tint, theme, 0.5, false, HueDirection::Shortest);
        assert!(approx(out.l, 0.4));
        assert!(approx(out.c, 0.075));
        assert!(approx(out.h, 70.0));
    }

    #[test]
    fn gray_theme_keeps_tint_hue() {
        let tint = Oklch::new(0.6, 0.1, 40.0);
        let theme = Oklch::new(0.2, 0.0, 0.0);
        let out = hue_shift(tint, theme, 0.5, false, HueDirection::Cw);
        assert!(approx(out.h, 40.0));
    }

    #[test]
    fn malformed_theme_hex_returns_tint() {
        let tint = Rgb(12, 34, 56);
        for bad in ["", "nope", "#12", "#zzzzzz"] {
            assert_eq!(
                blend_with_theme(tint, bad, BlendMethod::HueShift, 0.5, false, None),
                tint
            );
            assert_eq!(
                blend_with_theme(tint, bad, BlendMethod::Overlay, 0.5, false, None),
                tint
            );
        }
    }

    #[test]
    fn zero_factor_is_identity_for_both_methods() {
        let tint = Rgb(12, 134, 56);
        for method in [BlendMethod::Overlay, BlendMethod::HueShift] {
            assert_eq!(blend_with_theme(tint, "#1e1e1e", method, 0.0, false, None), tint);
        }
    }

    #[test]
    fn factor_for_prefers_override() {
        let config = BlendConfig::new(BlendMethod::Overlay, 0.3)
            .with_target_factor(TintTarget::StatusBar, 2.0);
        assert!(approx(config.factor_for(TintTarget::TitleBar), 0.3));
        assert!(approx(config.factor_for(TintTarget::StatusBar), 1.0));
    }

    #[test]
    fn blend_config_deserializes_camel_case() {
        let config: BlendConfig = serde_json::from_str(
            r#"{"method":"hueShift","hueOnly":true,"factor":0.4,"perTarget":{"sideBar":0.1}}"#,
        )
        .unwrap();
        assert_eq!(config.method, BlendMethod::HueShift);
        assert!(config.hue_only);
        assert!(approx(config.factor_for(TintTarget::SideBar), 0.1));
    }
}
