//! Geometry primitives for percentage-space placement
//!
//! Object geometry is stored as a centre point plus width and height, all
//! expressed as percentages of the rendered floor-plan box. The same types
//! are reused for pixel coordinates on the input side of the viewport.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Move the point by a delta
    pub fn offset(self, delta: Delta) -> Point {
        Point::new(self.x + delta.dx, self.y + delta.dy)
    }

    /// Delta that carries `self` onto `other`
    pub fn delta_to(self, other: Point) -> Delta {
        Delta::new(other.x - self.x, other.y - self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A displacement between two points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

impl Delta {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// The axis-aligned rectangle occupied by an object, stored by centre and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub center: Point,
    pub width: f64,
    pub height: f64,
}

impl Footprint {
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// Build a footprint from its four edges
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            center: Point::new((left + right) / 2.0, (top + bottom) / 2.0),
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// Left edge x-coordinate
    pub fn left(&self) -> f64 {
        self.center.x - self.half_width()
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.center.x + self.half_width()
    }

    /// Top edge y-coordinate (y grows downwards)
    pub fn top(&self) -> f64 {
        self.center.y - self.half_height()
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.center.y + self.half_height()
    }

    /// Same size, new centre
    pub fn moved_to(&self, center: Point) -> Footprint {
        Footprint { center, ..*self }
    }

    /// Strict overlap test: footprints that only share an edge or a corner
    /// do not overlap.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        (self.center.x - other.center.x).abs() < self.half_width() + other.half_width()
            && (self.center.y - other.center.y).abs() < self.half_height() + other.half_height()
    }

    /// Check if this footprint contains a point (edges included)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Absolute position of one of the four corners
    pub fn corner(&self, handle: Handle) -> Point {
        let x = if handle.moves_left_edge() {
            self.left()
        } else {
            self.right()
        };
        let y = if handle.moves_top_edge() {
            self.top()
        } else {
            self.bottom()
        };
        Point::new(x, y)
    }

    /// Drag the corner named by `handle` by `delta` while the opposite corner
    /// stays put. Each dimension is floored at `min_dimension`.
    pub fn resized(&self, handle: Handle, delta: Delta, min_dimension: f64) -> Footprint {
        let (mut left, mut top, mut right, mut bottom) =
            (self.left(), self.top(), self.right(), self.bottom());

        if handle.moves_left_edge() {
            left = right - (self.width - delta.dx).max(min_dimension);
        } else {
            right = left + (self.width + delta.dx).max(min_dimension);
        }

        if handle.moves_top_edge() {
            top = bottom - (self.height - delta.dy).max(min_dimension);
        } else {
            bottom = top + (self.height + delta.dy).max(min_dimension);
        }

        Footprint::from_edges(left, top, right, bottom)
    }
}

/// Corner resize handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    pub const ALL: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    /// Whether dragging this handle moves the left edge (otherwise the right)
    pub fn moves_left_edge(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::BottomLeft)
    }

    /// Whether dragging this handle moves the top edge (otherwise the bottom)
    pub fn moves_top_edge(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::TopRight)
    }

    /// The corner that stays anchored while this handle is dragged
    pub fn opposite(self) -> Handle {
        match self {
            Handle::TopLeft => Handle::BottomRight,
            Handle::TopRight => Handle::BottomLeft,
            Handle::BottomLeft => Handle::TopRight,
            Handle::BottomRight => Handle::TopLeft,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Handle::TopLeft => "top-left",
            Handle::TopRight => "top-right",
            Handle::BottomLeft => "bottom-left",
            Handle::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised handle name
#[derive(Debug, Clone, Error, PartialEq)]
#[error("unknown resize handle '{0}' (expected top-left, top-right, bottom-left or bottom-right)")]
pub struct UnknownHandle(pub String);

impl FromStr for Handle {
    type Err = UnknownHandle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Handle::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| UnknownHandle(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_footprint_edges() {
        let fp = Footprint::new(Point::new(50.0, 40.0), 10.0, 4.0);
        assert_eq!(fp.left(), 45.0);
        assert_eq!(fp.right(), 55.0);
        assert_eq!(fp.top(), 38.0);
        assert_eq!(fp.bottom(), 42.0);
    }

    #[test]
    fn test_from_edges_round_trip() {
        let fp = Footprint::from_edges(10.0, 20.0, 30.0, 25.0);
        assert_eq!(fp.center, Point::new(20.0, 22.5));
        assert_eq!(fp.width, 20.0);
        assert_eq!(fp.height, 5.0);
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Footprint::new(Point::new(50.0, 50.0), 5.0, 5.0);
        let touching = Footprint::new(Point::new(55.0, 50.0), 5.0, 5.0);
        let overlapping = Footprint::new(Point::new(51.0, 51.0), 5.0, 5.0);
        let corner_only = Footprint::new(Point::new(55.0, 55.0), 5.0, 5.0);

        assert!(!a.overlaps(&touching));
        assert!(!a.overlaps(&corner_only));
        assert!(a.overlaps(&overlapping));
        assert!(overlapping.overlaps(&a));
    }

    #[test]
    fn test_overlap_needs_both_axes() {
        let a = Footprint::new(Point::new(50.0, 50.0), 10.0, 2.0);
        let same_column = Footprint::new(Point::new(50.0, 60.0), 10.0, 2.0);
        assert!(!a.overlaps(&same_column));
    }

    #[test]
    fn test_contains() {
        let fp = Footprint::new(Point::new(50.0, 50.0), 10.0, 10.0);
        assert!(fp.contains(Point::new(45.0, 55.0)));
        assert!(!fp.contains(Point::new(44.9, 50.0)));
    }

    #[test]
    fn test_resize_bottom_right_keeps_top_left() {
        let fp = Footprint::new(Point::new(50.0, 50.0), 5.0, 5.0);
        let resized = fp.resized(Handle::BottomRight, Delta::new(3.0, 2.0), 1.0);
        assert!(approx(resized.width, 8.0));
        assert!(approx(resized.height, 7.0));
        let before = fp.corner(Handle::TopLeft);
        let after = resized.corner(Handle::TopLeft);
        assert!(approx(before.x, after.x) && approx(before.y, after.y));
    }

    #[test]
    fn test_resize_top_right() {
        let fp = Footprint::new(Point::new(50.0, 50.0), 5.0, 5.0);
        let resized = fp.resized(Handle::TopRight, Delta::new(4.0, -4.0), 1.0);
        assert!(approx(resized.width, 9.0));
        assert!(approx(resized.height, 9.0));
        assert!(approx(resized.center.x, 52.0));
        assert!(approx(resized.center.y, 48.0));
    }

    #[test]
    fn test_resize_clamps_to_minimum_and_stays_anchored() {
        let fp = Footprint::new(Point::new(50.0, 50.0), 5.0, 5.0);
        let resized = fp.resized(Handle::TopLeft, Delta::new(20.0, 20.0), 1.0);
        assert!(approx(resized.width, 1.0));
        assert!(approx(resized.height, 1.0));
        let anchor = fp.corner(Handle::BottomRight);
        let after = resized.corner(Handle::BottomRight);
        assert!(approx(anchor.x, after.x) && approx(anchor.y, after.y));
    }

    #[test]
    fn test_handle_parse_and_opposite() {
        assert_eq!("bottom-left".parse::<Handle>(), Ok(Handle::BottomLeft));
        assert!("middle".parse::<Handle>().is_err());
        for handle in Handle::ALL {
            assert_eq!(handle.opposite().opposite(), handle);
            assert_eq!(handle.to_string().parse::<Handle>(), Ok(handle));
        }
    }
}
