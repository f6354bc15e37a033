//! # tintsync-color - Deterministic Workspace Tints
//!
//! `tintsync-color` turns a workspace's identity into a small, coordinated
//! palette for editor chrome (title bar, status bar, activity bar, side bar),
//! optionally blended toward the active theme so the tint sits comfortably
//! on top of it.
//!
//! Everything in this crate is pure: the same inputs always produce the same
//! palette, with no global state.
//!
//! ## Core Concepts
//!
//! - [`hue()`]: identifier + seed → base hue, a pinned and versioned hash
//! - [`Oklch`], [`Rgb`]: the color spaces palettes are built and emitted in
//! - [`blend`]: linear-sRGB overlay and OKLCH hue-shift toward the theme
//! - [`generate`]: the full palette for a [`PaletteRequest`]
//! - [`ManagedKey`]: the closed set of settings keys a palette can contain
//!
//! ## Quick Start
//!
//! ```rust
//! use tintsync_color::{
//!     generate, BlendConfig, BlendMethod, ManagedKey, PaletteRequest, ThemeContext, ThemeKind,
//!     TintStyle,
//! };
//!
//! let theme = ThemeContext::new(ThemeKind::Dark, "Default Dark Modern")
//!     .with_color("editor.background", "#1F1F1F");
//!
//! let palette = generate(
//!     &PaletteRequest::new("/home/me/project", &theme)
//!         .seed(3)
//!         .style(TintStyle::Vibrant)
//!         .blend(BlendConfig::new(BlendMethod::HueShift, 0.25)),
//! );
//!
//! let title = palette.get(ManagedKey::TitleBarActiveBackground).unwrap();
//! assert!(title.starts_with('#'));
//! ```
//!
//! ## Blending
//!
//! Backgrounds can be pulled toward the theme's own colors. Overlay mixes in
//! linear light; hue-shift rotates in OKLCH and, when several targets blend
//! at once, agrees on a single rotation direction by majority vote:
//!
//! ```rust
//! use tintsync_color::{majority_direction, HueDirection};
//!
//! // Two theme hues clockwise of 100°, one counter-clockwise.
//! assert_eq!(
//!     majority_direction(100.0, [140.0, 150.0, 60.0]),
//!     Some(HueDirection::Cw)
//! );
//! ```

pub mod blend;
pub mod colorspace;
mod error;
pub mod hue;
mod keys;
pub mod palette;
pub mod theme;

pub use blend::{
    blend_hue_directed, blend_with_theme, effective_direction, majority_direction,
    normalize_hue, overlay, BlendConfig, BlendMethod, HueDirection, MAX_FORCED_ARC,
};
pub use colorspace::{Oklab, Oklch, Rgb};
pub use error::{ColorError, Result};
pub use hue::{hue, identity_hash, HUE_HASH_VERSION};
pub use keys::{ColorRole, ManagedKey, Tone};
pub use palette::{generate, Harmony, Palette, PaletteEntry, PaletteRequest, TintStyle, TintTarget};
pub use theme::{is_background_key, ThemeContext, ThemeKind, EDITOR_BACKGROUND_KEY};
