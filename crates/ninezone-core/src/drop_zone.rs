#![forbid(unsafe_code)]

//! Drop zone classification for drag-and-drop reordering.
//!
//! A hovered target is split vertically into three bands. The band under the
//! pointer decides whether a drop inserts before the target, onto it, or
//! after it.
//!
//! ```text
//!   top ┌──────────────┐
//!       │    Above     │  relative_y < upper_boundary
//!       ├──────────────┤
//!       │      On      │  upper_boundary ≤ relative_y < lower_boundary
//!       ├──────────────┤
//!       │    Below     │  relative_y ≥ lower_boundary
//!       └──────────────┘ top + height
//! ```
//!
//! [`classify`] is a pure function. [`DropZoneTracker`] caches the last zone
//! so hosts only repaint when it changes.

use crate::geometry::Rect;

/// Relative zone of a drag-and-drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DropZone {
    /// Upper band: insert before the target.
    Above,
    /// Middle band: drop onto the target.
    #[default]
    On,
    /// Lower band: insert after the target.
    Below,
}

/// Band boundaries as fractions of the target height.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DropZoneConfig {
    /// Boundary between `Above` and `On` (default: 1/3).
    pub upper_boundary: f64,
    /// Boundary between `On` and `Below` (default: 2/3).
    pub lower_boundary: f64,
}

impl Default for DropZoneConfig {
    fn default() -> Self {
        Self {
            upper_boundary: 1.0 / 3.0,
            lower_boundary: 2.0 / 3.0,
        }
    }
}

impl DropZoneConfig {
    /// Create a config with explicit boundaries.
    #[must_use]
    pub const fn new(upper_boundary: f64, lower_boundary: f64) -> Self {
        Self {
            upper_boundary,
            lower_boundary,
        }
    }

    /// Classify a relative vertical position (`0.0` = top, `1.0` = bottom).
    ///
    /// A non-finite position maps to `On`.
    #[must_use]
    pub fn zone_for(&self, relative_y: f64) -> DropZone {
        if !relative_y.is_finite() {
            DropZone::On
        } else if relative_y < self.upper_boundary {
            DropZone::Above
        } else if relative_y < self.lower_boundary {
            DropZone::On
        } else {
            DropZone::Below
        }
    }

    /// Classify `pointer_y` against a target starting at `rect_top` with
    /// height `rect_height`.
    ///
    /// A target without positive height maps to `On`.
    #[must_use]
    pub fn classify(&self, pointer_y: f64, rect_top: f64, rect_height: f64) -> DropZone {
        if rect_height > 0.0 {
            self.zone_for((pointer_y - rect_top) / rect_height)
        } else {
            DropZone::On
        }
    }

    /// Classify `pointer_y` against a target rectangle.
    #[must_use]
    pub fn classify_rect(&self, pointer_y: f64, rect: &Rect) -> DropZone {
        rect.relative_y(pointer_y)
            .map_or(DropZone::On, |relative_y| self.zone_for(relative_y))
    }
}

/// Classify with the default 1/3 and 2/3 boundaries.
#[must_use]
pub fn classify(pointer_y: f64, rect_top: f64, rect_height: f64) -> DropZone {
    DropZoneConfig::default().classify(pointer_y, rect_top, rect_height)
}

/// Caches the zone of the current drag-over so repeated moves inside the
/// same band are no-ops.
#[derive(Debug, Clone, Default)]
pub struct DropZoneTracker {
    config: DropZoneConfig,
    current: Option<DropZone>,
}

impl DropZoneTracker {
    /// Create a tracker with the given boundaries.
    #[must_use]
    pub const fn new(config: DropZoneConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    /// Reclassify after a pointer move over `rect`.
    ///
    /// Returns the new zone only when it differs from the previous one.
    pub fn update(&mut self, pointer_y: f64, rect: &Rect) -> Option<DropZone> {
        let zone = self.config.classify_rect(pointer_y, rect);
        if self.current == Some(zone) {
            return None;
        }
        crate::trace!(?zone, pointer_y, "drop zone changed");
        self.current = Some(zone);
        Some(zone)
    }

    /// Zone of the current drag-over, if one is in progress.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<DropZone> {
        self.current
    }

    /// Forget the cached zone (drag left the target or dropped).
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Band boundaries in use.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DropZoneConfig {
        &self.config
    }
}
