#![forbid(unsafe_code)]

//! Interaction configuration.
//!
//! Groups every tunable threshold of the interaction layer into a single
//! [`InteractionConfig`] that hosts can override in code or, with the
//! `config` feature, load from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # ninezone.toml
//! [gesture]
//! drag_threshold_px = 8.0
//! double_click_window_ms = 250
//!
//! [drop_zone]
//! upper_boundary = 0.25
//! lower_boundary = 0.75
//! ```
//!
//! ```rust,ignore
//! let config = InteractionConfig::from_toml_file("ninezone.toml")?;
//! let classifier = PointerGestureClassifier::new(config.to_gesture_config());
//! ```
//!
//! # Defaults
//!
//! `InteractionConfig::default()` yields a 10px drag threshold, a 300ms
//! double-click window and drop zone bands at 1/3 and 2/3, identical to
//! `GestureConfig::default()` and `DropZoneConfig::default()`.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::drop_zone::DropZoneConfig;
use crate::gesture::{DistanceMetric, GestureConfig};

/// Top-level interaction configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct InteractionConfig {
    /// Pointer gesture thresholds.
    pub gesture: GestureSettings,
    /// Drop zone band boundaries.
    pub drop_zone: DropZoneConfig,
}

/// Gesture thresholds in file-friendly units.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GestureSettings {
    /// Drag threshold in pixels.
    pub drag_threshold_px: f64,
    /// Double-click window in milliseconds.
    pub double_click_window_ms: u64,
    /// Displacement measure.
    pub distance_metric: DistanceMetric,
}

impl Default for GestureSettings {
    fn default() -> Self {
        let defaults = GestureConfig::default();
        Self {
            drag_threshold_px: defaults.drag_threshold,
            double_click_window_ms: defaults.double_click_window.as_millis() as u64,
            distance_metric: defaults.distance_metric,
        }
    }
}

impl InteractionConfig {
    /// Override the drag threshold.
    #[must_use]
    pub fn with_drag_threshold(mut self, pixels: f64) -> Self {
        self.gesture.drag_threshold_px = pixels;
        self
    }

    /// Override the double-click window.
    #[must_use]
    pub fn with_double_click_window(mut self, window: Duration) -> Self {
        self.gesture.double_click_window_ms = window.as_millis().min(u128::from(u64::MAX)) as u64;
        self
    }

    /// Override the drop zone band boundaries.
    #[must_use]
    pub fn with_drop_zone(mut self, drop_zone: DropZoneConfig) -> Self {
        self.drop_zone = drop_zone;
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.gesture.drag_threshold_px.is_finite() && self.gesture.drag_threshold_px > 0.0) {
            errors.push(format!(
                "gesture.drag_threshold_px must be > 0, got {}",
                self.gesture.drag_threshold_px
            ));
        }

        if self.gesture.double_click_window_ms == 0 {
            errors.push("gesture.double_click_window_ms must be > 0".into());
        }

        let DropZoneConfig {
            upper_boundary,
            lower_boundary,
        } = self.drop_zone;
        if !(0.0..=1.0).contains(&upper_boundary) {
            errors.push(format!(
                "drop_zone.upper_boundary must be in [0, 1], got {upper_boundary}"
            ));
        }
        if !(0.0..=1.0).contains(&lower_boundary) {
            errors.push(format!(
                "drop_zone.lower_boundary must be in [0, 1], got {lower_boundary}"
            ));
        }
        if upper_boundary > lower_boundary {
            errors.push(format!(
                "drop_zone.upper_boundary ({upper_boundary}) must not exceed lower_boundary ({lower_boundary})"
            ));
        }

        errors
    }

    /// Return `self` if valid, otherwise the collected validation errors.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            crate::warn!(count = errors.len(), "interaction config rejected");
            Err(ConfigError::Validation(errors))
        }
    }

    /// Build a [`GestureConfig`] from this configuration.
    #[must_use]
    pub fn to_gesture_config(&self) -> GestureConfig {
        GestureConfig {
            drag_threshold: self.gesture.drag_threshold_px,
            double_click_window: Duration::from_millis(self.gesture.double_click_window_ms),
            distance_metric: self.gesture.distance_metric,
        }
    }

    /// Build a [`DropZoneConfig`] from this configuration.
    #[must_use]
    pub fn to_drop_zone_config(&self) -> DropZoneConfig {
        self.drop_zone
    }
}

/// Errors that can occur when loading an interaction configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_component_defaults() {
        let config = InteractionConfig::default();
        assert_eq!(config.to_gesture_config(), GestureConfig::default());
        assert_eq!(config.to_drop_zone_config(), DropZoneConfig::default());
    }

    #[test]
    fn default_validates_clean() {
        assert!(InteractionConfig::default().validate().is_empty());
    }

    #[test]
    fn builders_override_single_fields() {
        let config = InteractionConfig::default()
            .with_drag_threshold(4.0)
            .with_double_click_window(Duration::from_millis(450));
        let gesture = config.to_gesture_config();
        assert_eq!(gesture.drag_threshold, 4.0);
        assert_eq!(gesture.double_click_window, Duration::from_millis(450));
        assert_eq!(config.drop_zone, DropZoneConfig::default());
    }

    #[test]
    fn validate_catches_non_positive_threshold() {
        let config = InteractionConfig::default().with_drag_threshold(0.0);
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("drag_threshold_px"));
    }

    #[test]
    fn validate_catches_inverted_bands() {
        let config = InteractionConfig::default().with_drop_zone(DropZoneConfig::new(0.8, 0.2));
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("must not exceed")));
    }

    #[test]
    fn multiple_validation_errors_collected() {
        let mut config = InteractionConfig::default();
        config.gesture.drag_threshold_px = -1.0;
        config.gesture.double_click_window_ms = 0;
        config.drop_zone.lower_boundary = 1.5;
        let errors = config.validate();
        assert!(errors.len() >= 3, "should catch multiple errors: {errors:?}");
    }

    #[test]
    fn validated_returns_error_list() {
        let err = InteractionConfig::default()
            .with_drag_threshold(f64::NAN)
            .validated()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().starts_with("validation errors:"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_override_preserves_defaults() {
        let config = InteractionConfig::from_toml_str(
            "[gesture]\ndouble_click_window_ms = 250\n",
        )
        .unwrap();
        assert_eq!(config.gesture.double_click_window_ms, 250);
        assert_eq!(config.gesture.drag_threshold_px, 10.0);
        assert_eq!(config.drop_zone, DropZoneConfig::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_metric_is_kebab_case() {
        let config = InteractionConfig::from_json_str(
            r#"{"gesture": {"distance_metric": "max-axis"}}"#,
        )
        .unwrap();
        assert_eq!(config.gesture.distance_metric, DistanceMetric::MaxAxis);
    }

    #[cfg(feature = "config")]
    #[test]
    fn invalid_file_values_are_rejected() {
        let err = InteractionConfig::from_toml_str("[gesture]\ndrag_threshold_px = -3.0\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = InteractionConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn missing_file_is_io_error() {
        let err = InteractionConfig::from_toml_file("/nonexistent/ninezone.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
