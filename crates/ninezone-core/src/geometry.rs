#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are client-space pixels as reported by the hosting view
//! (origin at top-left, y grows downward). Fractional values are allowed.

/// A 2D point in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Vector from `self` to `other` as `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn delta_to(self, other: Self) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }

    /// Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        let (dx, dy) = self.delta_to(other);
        dx.hypot(dy)
    }

    /// Largest single-axis displacement to another point (Chebyshev distance).
    #[inline]
    #[must_use]
    pub fn max_axis_distance_to(self, other: Self) -> f64 {
        let (dx, dy) = self.delta_to(other);
        dx.abs().max(dy.abs())
    }

    /// Manhattan distance to another point.
    #[inline]
    #[must_use]
    pub fn manhattan_distance_to(self, other: Self) -> f64 {
        let (dx, dy) = self.delta_to(other);
        dx.abs() + dy.abs()
    }

    /// Translate by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, typically a DOM bounding client rect.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub left: f64,
    /// Top edge (inclusive).
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    #[inline]
    #[must_use]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Check if the rectangle has no area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Check if a point is inside the rectangle (right/bottom exclusive).
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }

    /// Vertical position of `y` relative to this rectangle, in units of its
    /// height: `0.0` at the top edge, `1.0` at the bottom edge.
    ///
    /// Returns `None` for a rectangle without positive height.
    #[inline]
    #[must_use]
    pub fn relative_y(&self, y: f64) -> Option<f64> {
        if self.height > 0.0 {
            Some((y - self.top) / self.height)
        } else {
            None
        }
    }

    /// Same rectangle moved so its top-left corner sits at `origin`.
    #[inline]
    #[must_use]
    pub const fn with_origin(self, origin: Point) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::ORIGIN;
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(a.max_axis_distance_to(b), 4.0);
        assert_eq!(a.manhattan_distance_to(b), 7.0);
        assert_eq!(b.delta_to(a), (-3.0, -4.0));
    }

    #[test]
    fn rect_edges_and_contains() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert!(r.contains(Point::new(10.0, 20.0)));
        assert!(!r.contains(Point::new(40.0, 20.0)));
        assert!(!r.contains(Point::new(10.0, 60.0)));
    }

    #[test]
    fn relative_y_spans_height() {
        let r = Rect::new(0.0, 100.0, 50.0, 30.0);
        assert_eq!(r.relative_y(100.0), Some(0.0));
        assert_eq!(r.relative_y(115.0), Some(0.5));
        assert_eq!(r.relative_y(130.0), Some(1.0));
    }

    #[test]
    fn zero_height_has_no_relative_y() {
        assert!(Rect::from_size(10.0, 0.0).relative_y(5.0).is_none());
        assert!(Rect::from_size(10.0, 0.0).is_empty());
    }
}
