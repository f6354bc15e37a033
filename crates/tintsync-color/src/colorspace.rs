//! Color representations and conversions used by the tint engine.
//!
//! # Spaces
//!
//! | Type | Space | Used for |
//! |------|-------|----------|
//! | [`Rgb`] | 8-bit gamma-encoded sRGB | hex input and output |
//! | [`LinearRgb`] | linear-light sRGB | physically correct compositing |
//! | [`Oklab`] | Oklab | intermediate for OKLCH |
//! | [`Oklch`] | OKLCH (polar Oklab) | palette construction and hue blending |
//!
//! OKLCH is perceptually uniform: equal steps in lightness look like equal
//! steps, and a hue rotation at fixed L and C keeps the perceived brightness.
//! That makes it the natural space for deriving a family of related colors
//! from a single hue angle.
//!
//! # Gamut
//!
//! Not every OKLCH triple is displayable. [`Oklch::to_gamut`] reduces chroma
//! at fixed lightness and hue until the color fits inside sRGB, and
//! [`Oklch::to_rgb`] always goes through it, so every generated hex value is
//! a real sRGB color.
//!
//! # Example
//!
//! ```rust
//! use tintsync_color::{Oklch, Rgb};
//!
//! let rgb = Rgb::from_hex("#3A6EA5").unwrap();
//! let lch = rgb.to_oklch();
//! assert!(lch.h > 200.0 && lch.h < 280.0);
//!
//! // Very high chroma is out of gamut; conversion clamps it.
//! let loud = Oklch::new(0.6, 0.5, 140.0);
//! let hex = loud.to_rgb().to_hex();
//! assert_eq!(hex.len(), 7);
//! ```

use std::fmt;

use crate::error::{ColorError, Result};

// ─── RGB type ───────────────────────────────────────────────────────────────

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses a hex color.
    ///
    /// Accepts `#rgb`, `#rrggbb` and `#rrggbbaa` (alpha is ignored), in any
    /// letter case. Surrounding whitespace is trimmed.
    pub fn from_hex(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(s.to_string()));
        }

        let byte = |i: usize| -> Result<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidDigit(s.to_string()))
        };

        match hex.len() {
            3 => {
                let nibble = |i: usize| -> Result<u8> {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|n| n * 17)
                        .map_err(|_| ColorError::InvalidDigit(s.to_string()))
                };
                Ok(Rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 | 8 => Ok(Rgb(byte(0)?, byte(2)?, byte(4)?)),
            digits => Err(ColorError::InvalidLength {
                value: s.to_string(),
                digits,
            }),
        }
    }

    /// Formats as uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Converts to linear-light sRGB.
    pub fn to_linear(self) -> LinearRgb {
        LinearRgb {
            r: srgb_to_linear(self.0),
            g: srgb_to_linear(self.1),
            b: srgb_to_linear(self.2),
        }
    }

    /// Converts to OKLCH.
    pub fn to_oklch(self) -> Oklch {
        self.to_linear().to_oklab().to_oklch()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ─── Transfer functions ────────────────────────────────────────────────────

/// Convert an sRGB component (0–255) to linear light (0.0–1.0).
fn srgb_to_linear(c: u8) -> f64 {
    let c = c as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a linear light value (0.0–1.0) to sRGB (0–255), clamped.
fn linear_to_srgb(c: f64) -> u8 {
    let c = if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) };
    let s = if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (s * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Linear RGB ─────────────────────────────────────────────────────────────

/// A linear-light sRGB color. Components are nominally 0.0–1.0 but may fall
/// outside that range for out-of-gamut colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

/// Tolerance used when deciding whether a linear component is in gamut.
const GAMUT_EPSILON: f64 = 1e-6;

impl LinearRgb {
    /// Mixes two colors channel by channel: `self*(1-t) + other*t`.
    pub fn mix(self, other: LinearRgb, t: f64) -> LinearRgb {
        let inv = 1.0 - t;
        LinearRgb {
            r: self.r * inv + other.r * t,
            g: self.g * inv + other.g * t,
            b: self.b * inv + other.b * t,
        }
    }

    /// True when every channel lies in `[0, 1]` (with a small tolerance).
    pub fn in_gamut(self) -> bool {
        let ok = |c: f64| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(&c);
        ok(self.r) && ok(self.g) && ok(self.b)
    }

    /// Encodes to 8-bit sRGB, clamping each channel.
    pub fn to_rgb(self) -> Rgb {
        Rgb(
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b),
        )
    }

    /// Converts to Oklab.
    pub fn to_oklab(self) -> Oklab {
        let l = 0.412_221_470_8 * self.r + 0.536_332_536_3 * self.g + 0.051_445_992_9 * self.b;
        let m = 0.211_903_498_2 * self.r + 0.680_699_545_1 * self.g + 0.107_396_956_6 * self.b;
        let s = 0.088_302_461_9 * self.r + 0.281_718_837_6 * self.g + 0.629_978_700_5 * self.b;

        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        Oklab {
            l: 0.210_454_255_3 * l_ + 0.793_617_785_0 * m_ - 0.004_072_046_8 * s_,
            a: 1.977_998_495_1 * l_ - 2.428_592_205_0 * m_ + 0.450_593_709_9 * s_,
            b: 0.025_904_037_1 * l_ + 0.782_771_766_2 * m_ - 0.808_675_766_0 * s_,
        }
    }
}

// ─── Oklab ──────────────────────────────────────────────────────────────────

/// A color in the Oklab space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    /// Perceptual lightness, 0.0 (black) to 1.0 (white).
    pub l: f64,
    /// Green–red axis.
    pub a: f64,
    /// Blue–yellow axis.
    pub b: f64,
}

impl Oklab {
    /// Converts to linear sRGB without clamping.
    pub fn to_linear(self) -> LinearRgb {
        let l_ = self.l + 0.396_337_777_4 * self.a + 0.215_803_757_3 * self.b;
        let m_ = self.l - 0.105_561_345_8 * self.a - 0.063_854_172_8 * self.b;
        let s_ = self.l - 0.089_484_177_5 * self.a - 1.291_485_548_0 * self.b;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        LinearRgb {
            r: 4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s,
            g: -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s,
            b: -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s,
        }
    }

    /// Converts to polar form.
    pub fn to_oklch(self) -> Oklch {
        let c = (self.a * self.a + self.b * self.b).sqrt();
        let h = if c < ACHROMATIC_CHROMA {
            0.0
        } else {
            crate::blend::normalize_hue(self.b.atan2(self.a).to_degrees())
        };
        Oklch { l: self.l, c, h }
    }
}

// ─── OKLCH ──────────────────────────────────────────────────────────────────

/// Chroma below which a color is treated as gray and its hue as meaningless.
pub const ACHROMATIC_CHROMA: f64 = 0.005;

/// A color in OKLCH: lightness, chroma and hue in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    /// Perceptual lightness, 0.0–1.0.
    pub l: f64,
    /// Chroma, 0.0 and up (sRGB tops out around 0.37).
    pub c: f64,
    /// Hue angle in degrees, `[0, 360)`.
    pub h: f64,
}

impl Oklch {
    /// Creates a color, normalizing the hue and clamping L and C to their
    /// valid ranges.
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            c: c.max(0.0),
            h: crate::blend::normalize_hue(h),
        }
    }

    /// True when the chroma is too small for the hue to carry information.
    pub fn is_achromatic(self) -> bool {
        self.c < ACHROMATIC_CHROMA
    }

    /// Converts to Oklab.
    pub fn to_oklab(self) -> Oklab {
        let rad = self.h.to_radians();
        Oklab {
            l: self.l,
            a: self.c * rad.cos(),
            b: self.c * rad.sin(),
        }
    }

    /// True when the color is representable in sRGB.
    pub fn in_gamut(self) -> bool {
        self.to_oklab().to_linear().in_gamut()
    }

    /// Reduces chroma until the color fits inside the sRGB gamut.
    ///
    /// Lightness and hue are preserved. Binary search over chroma; colors
    /// already in gamut are returned unchanged.
    pub fn to_gamut(self) -> Self {
        if self.in_gamut() {
            return self;
        }

        let mut lo = 0.0;
        let mut hi = self.c;
        for _ in 0..24 {
            let mid = (lo + hi) * 0.5;
            if (Self { c: mid, ..self }).in_gamut() {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Self { c: lo, ..self }
    }

    /// Gamut-clamps and encodes to 8-bit sRGB.
    pub fn to_rgb(self) -> Rgb {
        self.to_gamut().to_oklab().to_linear().to_rgb()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // Hex parsing
    // =====================================================================

    #[test]
    fn parse_six_digit_hex() {
        assert_eq!(Rgb::from_hex("#ff6b35").unwrap(), Rgb(255, 107, 53));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            Rgb::from_hex("#FF6B35").unwrap(),
            Rgb::from_hex("#ff6b35").unwrap()
        );
    }

    #[test]
    fn parse_three_digit_hex() {
        assert_eq!(Rgb::from_hex("#fff").unwrap(), Rgb(255, 255, 255));
        assert_eq!(Rgb::from_hex("#a0c").unwrap(), Rgb(170, 0, 204));
    }

    #[test]
    fn parse_eight_digit_hex_ignores_alpha() {
        assert_eq!(Rgb::from_hex("#1e1e1e80").unwrap(), Rgb(30, 30, 30));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(Rgb::from_hex("  #000000 ").unwrap(), Rgb(0, 0, 0));
    }

    #[test]
    fn parse_rejects_missing_hash() {
        assert!(matches!(
            Rgb::from_hex("ff0000"),
            Err(ColorError::MissingHash(_))
        ));
    }

    #[test]
    fn parse_rejects_bad_length() {
        assert!(matches!(
            Rgb::from_hex("#12345"),
            Err(ColorError::InvalidLength { digits: 5, .. })
        ));
        assert!(Rgb::from_hex("#").is_err());
    }

    #[test]
    fn parse_rejects_non_hex_and_multibyte() {
        assert!(matches!(
            Rgb::from_hex("#gg0000"),
            Err(ColorError::InvalidDigit(_))
        ));
        assert!(Rgb::from_hex("#ééé").is_err());
    }

    #[test]
    fn to_hex_is_uppercase() {
        assert_eq!(Rgb(10, 171, 255).to_hex(), "#0AABFF");
    }

    // =====================================================================
    // Linear transfer
    // =====================================================================

    #[test]
    fn linear_roundtrip_is_exact_for_all_bytes() {
        for v in 0..=255u8 {
            assert_eq!(linear_to_srgb(srgb_to_linear(v)), v);
        }
    }

    #[test]
    fn linear_mix_endpoints() {
        let a = Rgb(200, 30, 40).to_linear();
        let b = Rgb(10, 220, 90).to_linear();
        assert_eq!(a.mix(b, 0.0).to_rgb(), Rgb(200, 30, 40));
        assert_eq!(a.mix(b, 1.0).to_rgb(), Rgb(10, 220, 90));
    }

    // =====================================================================
    // Oklab / OKLCH
    // =====================================================================

    /// Assert that RGB → OKLCH → RGB round-trips within tolerance.
    fn assert_oklch_roundtrip(rgb: Rgb) {
        let back = rgb.to_oklch().to_rgb();
        let d = |x: u8, y: u8| (x as i16 - y as i16).abs();
        assert!(
            d(rgb.0, back.0) <= 1 && d(rgb.1, back.1) <= 1 && d(rgb.2, back.2) <= 1,
            "Round-trip failed: {:?} → {:?}",
            rgb,
            back
        );
    }

    #[test]
    fn oklch_roundtrip_primaries_and_grays() {
        for rgb in [
            Rgb(0, 0, 0),
            Rgb(255, 255, 255),
            Rgb(255, 0, 0),
            Rgb(0, 255, 0),
            Rgb(0, 0, 255),
            Rgb(128, 128, 128),
            Rgb(30, 30, 30),
            Rgb(200, 100, 50),
        ] {
            assert_oklch_roundtrip(rgb);
        }
    }

    #[test]
    fn white_has_full_lightness() {
        let lch = Rgb(255, 255, 255).to_oklch();
        assert!((lch.l - 1.0).abs() < 0.01, "L = {}", lch.l);
        assert!(lch.is_achromatic());
    }

    #[test]
    fn black_has_zero_lightness() {
        let lch = Rgb(0, 0, 0).to_oklch();
        assert!(lch.l.abs() < 0.01);
    }

    #[test]
    fn red_hue_is_near_29_degrees() {
        let lch = Rgb(255, 0, 0).to_oklch();
        assert!((lch.h - 29.2).abs() < 1.0, "h = {}", lch.h);
    }

    #[test]
    fn new_normalizes_hue() {
        assert!((Oklch::new(0.5, 0.1, -30.0).h - 330.0).abs() < 1e-9);
        assert!((Oklch::new(0.5, 0.1, 720.0).h).abs() < 1e-9);
    }

    #[test]
    fn to_gamut_keeps_in_gamut_colors() {
        let c = Oklch::new(0.6, 0.05, 200.0);
        assert_eq!(c.to_gamut(), c);
    }

    #[test]
    fn to_gamut_reduces_chroma_only() {
        let c = Oklch::new(0.7, 0.4, 145.0);
        assert!(!c.in_gamut());
        let g = c.to_gamut();
        assert!(g.in_gamut());
        assert!(g.c < c.c);
        assert_eq!(g.l, c.l);
        assert_eq!(g.h, c.h);
    }
}
