//! Configuration for swipe navigation.
//!
//! [`SwipeConfig`] can be built in code or loaded from TOML. Every field has
//! a default, so a file only needs the values it changes:
//!
//! ```toml
//! cycling_enabled = true
//! allowed_swipe_direction = "right"
//! animation_duration_ms = 250
//! swipe_animation = "push"
//!
//! [interaction]
//! completion_velocity = 300.0
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use swipetab_core::logging::targets;

use crate::animation::{AnimationStyle, DEFAULT_ANIMATION_DURATION_MS, Direction, Easing};
use crate::error::{ConfigError, ConfigResult};
use crate::gesture::{DEFAULT_MINIMUM_TOUCHES, DEFAULT_PAN_SLOP, PanConfig};

/// Default progress past which a released drag completes.
pub const DEFAULT_COMPLETION_FRACTION: f32 = 0.5;

/// Default upper bound for the reported drag progress.
pub const DEFAULT_MAXIMUM_FRACTION: f32 = 0.99;

/// Default release velocity (points per second) that completes a short drag.
pub const DEFAULT_COMPLETION_VELOCITY: f32 = 200.0;

/// Default vertical travel (points) that marks a drag as diagonal.
pub const DEFAULT_SUSPEND_TRANSLATION_Y: f32 = 5.0;

/// Default vertical velocity (points per second) that marks a drag as
/// diagonal.
pub const DEFAULT_SUSPEND_VELOCITY_Y: f32 = 100.0;

/// Which swipes may switch tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllowedSwipeDirection {
    /// Only swipes revealing the tab on the left (finger moving right).
    Left,
    /// Only swipes revealing the tab on the right (finger moving left).
    Right,
    #[default]
    Both,
}

impl AllowedSwipeDirection {
    /// Whether a swipe with transition edge `direction` is allowed.
    pub fn permits(self, direction: Direction) -> bool {
        match self {
            AllowedSwipeDirection::Left => direction == Direction::Right,
            AllowedSwipeDirection::Right => direction == Direction::Left,
            AllowedSwipeDirection::Both => true,
        }
    }
}

/// Thresholds of the interactive transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub completion_fraction: f32,
    pub maximum_fraction: f32,
    pub completion_velocity: f32,
    pub suspend_translation_y: f32,
    pub suspend_velocity_y: f32,
    pub pan_slop: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            completion_fraction: DEFAULT_COMPLETION_FRACTION,
            maximum_fraction: DEFAULT_MAXIMUM_FRACTION,
            completion_velocity: DEFAULT_COMPLETION_VELOCITY,
            suspend_translation_y: DEFAULT_SUSPEND_TRANSLATION_Y,
            suspend_velocity_y: DEFAULT_SUSPEND_VELOCITY_Y,
            pan_slop: DEFAULT_PAN_SLOP,
        }
    }
}

impl InteractionConfig {
    fn validate(&self) -> ConfigResult<()> {
        let fraction_ok = |value: f32| value > 0.0 && value <= 1.0;
        if !fraction_ok(self.completion_fraction) {
            return invalid(format!(
                "interaction.completion_fraction must be in (0, 1], got {}",
                self.completion_fraction
            ));
        }
        if !fraction_ok(self.maximum_fraction) {
            return invalid(format!(
                "interaction.maximum_fraction must be in (0, 1], got {}",
                self.maximum_fraction
            ));
        }
        if self.completion_fraction >= self.maximum_fraction {
            return invalid(format!(
                "interaction.completion_fraction ({}) must be below maximum_fraction ({})",
                self.completion_fraction, self.maximum_fraction
            ));
        }
        for (name, value) in [
            ("completion_velocity", self.completion_velocity),
            ("suspend_translation_y", self.suspend_translation_y),
            ("suspend_velocity_y", self.suspend_velocity_y),
            ("pan_slop", self.pan_slop),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!(
                    "interaction.{name} must be a non-negative number, got {value}"
                ));
            }
        }
        Ok(())
    }
}

/// Swipe navigation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub swipe_enabled: bool,
    pub cycling_enabled: bool,
    pub allowed_swipe_direction: AllowedSwipeDirection,
    /// Refuse drags that start with vertical movement.
    pub diagonal_swipe_suppression: bool,
    pub minimum_touches: usize,
    /// `None` means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_touches: Option<usize>,
    pub animations_enabled: bool,
    #[serde(rename = "animation_duration_ms", with = "duration_ms")]
    pub animation_duration: Duration,
    pub swipe_animation: AnimationStyle,
    pub tap_animation: AnimationStyle,
    pub easing: Easing,
    pub interaction: InteractionConfig,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            swipe_enabled: true,
            cycling_enabled: false,
            allowed_swipe_direction: AllowedSwipeDirection::Both,
            diagonal_swipe_suppression: true,
            minimum_touches: DEFAULT_MINIMUM_TOUCHES,
            maximum_touches: None,
            animations_enabled: true,
            animation_duration: Duration::from_millis(DEFAULT_ANIMATION_DURATION_MS),
            swipe_animation: AnimationStyle::SideBySide,
            tap_animation: AnimationStyle::SideBySide,
            easing: Easing::Linear,
            interaction: InteractionConfig::default(),
        }
    }
}

impl SwipeConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: SwipeConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded swipe config");
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Write the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check that the values are consistent with each other.
    pub fn validate(&self) -> ConfigResult<()> {
        let result = self.validate_fields();
        if let Err(err) = &result {
            tracing::warn!(target: targets::CONFIG, %err, "rejected swipe config");
        }
        result
    }

    fn validate_fields(&self) -> ConfigResult<()> {
        if self.minimum_touches == 0 {
            return invalid("minimum_touches must be at least 1".to_string());
        }
        if let Some(maximum) = self.maximum_touches
            && maximum < self.minimum_touches
        {
            return invalid(format!(
                "maximum_touches ({maximum}) is below minimum_touches ({})",
                self.minimum_touches
            ));
        }
        self.interaction.validate()
    }

    /// Pan recognizer parameters derived from this configuration.
    pub fn pan_config(&self) -> PanConfig {
        PanConfig {
            minimum_touches: self.minimum_touches,
            maximum_touches: self.maximum_touches,
            slop: self.interaction.pan_slop,
        }
    }
}

fn invalid(message: String) -> ConfigResult<()> {
    Err(ConfigError::Invalid(message))
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
