//! User and engine configuration.
//!
//! [`TintConfig`] is what the user edits: which targets to color, the seed,
//! style, harmony and blending. It is read from the host on every reconcile.
//! [`EngineConfig`] holds timing policy and is fixed when the engine starts.
//!
//! Both load from YAML or JSON with camelCase keys; every field has a
//! default, so an empty document is a valid configuration.
//!
//! ```yaml
//! targets: [titleBar, statusBar]
//! seed: 3
//! style: vibrant
//! blend:
//!   method: hueShift
//!   factor: 0.3
//!   perTarget:
//!     statusBar: 0.1
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tintsync_color::{BlendConfig, Harmony, TintStyle, TintTarget};

use crate::error::ConfigError;

/// Per-workspace tint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TintConfig {
    /// Master switch; `false` removes any managed colors.
    pub enabled: bool,
    /// UI elements to color. Empty behaves like `enabled: false`.
    pub targets: Vec<TintTarget>,
    /// Nonce mixed into the hue hash to pick a different color.
    pub seed: i32,
    /// Lightness/chroma character.
    pub style: TintStyle,
    /// Per-target hue offsets.
    pub harmony: Harmony,
    /// Blending toward the theme's own backgrounds.
    pub blend: BlendConfig,
}

impl Default for TintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            targets: vec![
                TintTarget::TitleBar,
                TintTarget::StatusBar,
                TintTarget::ActivityBar,
            ],
            seed: 0,
            style: TintStyle::default(),
            harmony: Harmony::default(),
            blend: BlendConfig::default(),
        }
    }
}

impl TintConfig {
    /// Parses and validates YAML.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates JSON.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a file, choosing the format by extension (`.json` is JSON,
    /// anything else YAML).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(&text),
            _ => Self::from_yaml(&text),
        }
    }

    /// True when reconciles should apply colors rather than remove them.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.targets.is_empty()
    }

    /// Rejects blend factors outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_factor("blend.factor", self.blend.factor)?;
        for (target, factor) in &self.blend.per_target {
            check_factor(&format!("blend.perTarget.{}", target_name(*target)), *factor)?;
        }
        Ok(())
    }
}

fn check_factor(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::FactorOutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

fn target_name(target: TintTarget) -> &'static str {
    match target {
        TintTarget::TitleBar => "titleBar",
        TintTarget::StatusBar => "statusBar",
        TintTarget::ActivityBar => "activityBar",
        TintTarget::SideBar => "sideBar",
    }
}

// ============================================================================
// Engine policy
// ============================================================================

/// Debounce delay before a requested reconcile runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(75);
/// Sliding window over which writes are counted.
pub const DEFAULT_GUARD_WINDOW: Duration = Duration::from_secs(3);
/// Writes allowed inside one window before the guard trips.
pub const DEFAULT_GUARD_MAX_WRITES: usize = 5;
/// How long automatic writes stay blocked after a trip.
pub const DEFAULT_GUARD_COOLDOWN: Duration = Duration::from_secs(10);

/// Write-loop protection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuardConfig {
    #[serde(rename = "windowMs", with = "millis")]
    pub window: Duration,
    pub max_writes: usize,
    #[serde(rename = "cooldownMs", with = "millis")]
    pub cooldown: Duration,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_GUARD_WINDOW,
            max_writes: DEFAULT_GUARD_MAX_WRITES,
            cooldown: DEFAULT_GUARD_COOLDOWN,
        }
    }
}

/// Timing policy for a [`ReconcileEngine`](crate::ReconcileEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    #[serde(rename = "debounceMs", with = "millis")]
    pub debounce: Duration,
    pub guard: GuardConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            guard: GuardConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates YAML.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        if config.guard.max_writes == 0 {
            return Err(ConfigError::ZeroMaxWrites);
        }
        Ok(config)
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
