#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! The hosting view translates its DOM-style pointer and touch events into
//! [`InputEvent`] values. Only the primary pointer is modelled; hosts drop
//! secondary buttons before they reach the classifiers.

use crate::geometry::Point;

/// A raw input event as delivered by the hosting view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary pointer pressed.
    PointerDown(Point),
    /// Pointer moved (pressed or not).
    PointerMove(Point),
    /// Primary pointer released.
    PointerUp(Point),
    /// Touch contact began.
    TouchStart {
        /// Number of active touch points.
        touches: usize,
    },
}

impl InputEvent {
    /// Pointer position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown(p) | Self::PointerMove(p) | Self::PointerUp(p) => Some(*p),
            Self::TouchStart { .. } => None,
        }
    }

    /// Returns true for pointer (non-touch) events.
    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        !matches!(self, Self::TouchStart { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_of_pointer_events() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(InputEvent::PointerDown(p).position(), Some(p));
        assert_eq!(InputEvent::PointerMove(p).position(), Some(p));
        assert_eq!(InputEvent::PointerUp(p).position(), Some(p));
        assert_eq!(InputEvent::TouchStart { touches: 1 }.position(), None);
    }

    #[test]
    fn touch_is_not_pointer() {
        assert!(InputEvent::PointerUp(Point::ORIGIN).is_pointer());
        assert!(!InputEvent::TouchStart { touches: 2 }.is_pointer());
    }
}
