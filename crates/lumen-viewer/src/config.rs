#![forbid(unsafe_code)]

//! Viewer configuration as data.
//!
//! Every tunable across the gesture, animation and navigation stack is grouped
//! into one [`ViewerConfig`]. Defaults reproduce the built-in constants, so
//! `ViewerConfig::default()` behaves exactly like an unconfigured viewer.
//!
//! # Loading
//!
//! With the `config-files` feature:
//!
//! ```toml
//! teardown_delay_ms = 300
//!
//! [gesture]
//! pan_threshold = 12.0
//!
//! [gesture.tap]
//! double_tap_window_ms = 250
//!
//! [navigation]
//! swipe_fraction = 0.15
//! ```
//!
//! ```rust,ignore
//! let config = ViewerConfig::from_toml_file("lumen.toml")?;
//! let config = ViewerConfig::from_json_str(json)?;
//! ```
//!
//! Missing keys keep their defaults. Durations are integer milliseconds.

#[cfg(feature = "config-files")]
use std::path::Path;

use lumen_core::{AnimationConfig, Duration, GestureConfig};

use crate::error::{Result, ViewerError};
use crate::navigation::NavigationConfig;

/// Top-level configuration for a [`ViewerSession`](crate::ViewerSession).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-files", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config-files", serde(default))]
pub struct ViewerConfig {
    pub gesture: GestureConfig,
    pub animation: AnimationConfig,
    pub navigation: NavigationConfig,
    /// Delay between close and teardown (default: 300 ms).
    #[cfg_attr(
        feature = "config-files",
        serde(rename = "teardown_delay_ms", with = "lumen_core::serde_ms")
    )]
    pub teardown_delay: Duration,
    /// How long after a gesture a synthetic activation is swallowed
    /// (default: 350 ms).
    #[cfg_attr(
        feature = "config-files",
        serde(rename = "activation_suppression_ms", with = "lumen_core::serde_ms")
    )]
    pub activation_suppression: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            animation: AnimationConfig::default(),
            navigation: NavigationConfig::default(),
            teardown_delay: Duration::from_millis(300),
            activation_suppression: Duration::from_millis(350),
        }
    }
}

impl ViewerConfig {
    /// Load from a TOML string. The result is validated.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string. The result is validated.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty TOML.
    #[cfg(feature = "config-files")]
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Human-readable violations; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.gesture.validate();
        errors.extend(self.animation.validate());
        errors.extend(self.navigation.validate());
        if self.gesture.tap.tap_slop < self.gesture.pan_threshold {
            errors.push(format!(
                "gesture.tap.tap_slop ({}) must be >= gesture.pan_threshold ({})",
                self.gesture.tap.tap_slop, self.gesture.pan_threshold
            ));
        }
        errors
    }

    /// `self` if valid, otherwise [`ViewerError::InvalidConfig`].
    pub fn checked(self) -> Result<Self> {
        ViewerError::check(self.validate())?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_empty(), "{:?}", config.validate());
        assert_eq!(config.teardown_delay, Duration::from_millis(300));
        assert_eq!(config.navigation.dismiss_distance, 60.0);
    }

    #[test]
    fn nested_violations_are_collected() {
        let mut config = ViewerConfig::default();
        config.navigation.swipe_fraction = 2.0;
        config.gesture.pan_threshold = 50.0;
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("swipe_fraction")));
        assert!(errors.iter().any(|e| e.contains("pan_threshold")));
        assert!(matches!(
            config.checked(),
            Err(ViewerError::InvalidConfig(_))
        ));
    }
}
