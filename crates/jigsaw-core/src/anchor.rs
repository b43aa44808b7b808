//! Immutable 2D points used for piece positions.

use std::fmt;
use std::ops::{Add, Sub};

/// A point on the canvas plane.
///
/// `Anchor` is a `Copy` value: every operation returns a new anchor and
/// nothing mutates in place. Pieces keep their current and target
/// positions as two separately stored anchors, so updating one can never
/// affect the other.
///
/// # Examples
///
/// ```
/// use jigsaw_core::Anchor;
///
/// let a = Anchor::new(1.0, 2.0);
/// assert_eq!(a.scale(10.0).translate(5.0, 5.0), Anchor::new(15.0, 25.0));
/// assert_eq!(Anchor::new(0.0, 0.0).distance(Anchor::new(3.0, 4.0)), 5.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Anchor {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Anchor {
    /// The origin `(0, 0)`.
    pub const ORIGIN: Anchor = Anchor { x: 0.0, y: 0.0 };

    /// Create an anchor at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This anchor shifted by `(dx, dy)`.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// This anchor with both coordinates multiplied by `factor`.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Anchor) -> f64 {
        let (dx, dy) = self.diff(other);
        dx.hypot(dy)
    }

    /// Component-wise difference `other - self`.
    pub fn diff(self, other: Anchor) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }

    /// Whether `other` lies within `tolerance` of this anchor.
    pub fn is_close_to(self, other: Anchor, tolerance: f64) -> bool {
        self.distance(other) <= tolerance
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Anchor {
    type Output = Anchor;

    fn add(self, rhs: Anchor) -> Anchor {
        self.translate(rhs.x, rhs.y)
    }
}

impl Sub for Anchor {
    type Output = Anchor;

    fn sub(self, rhs: Anchor) -> Anchor {
        self.translate(-rhs.x, -rhs.y)
    }
}

impl From<(f64, f64)> for Anchor {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
