#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! [`Rect`] is the value type every sprite, panel, and collision area is built
//! on. Coordinates are screen-style: origin at top-left, `y` grows downward.
//!
//! All overlap tests are strict. Two rectangles that only share an edge do not
//! intersect, and a point on a boundary is not contained.

use bitflags::bitflags;

bitflags! {
    /// Edges of a rectangle, combinable with bitwise operators.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BorderFlags: u8 {
        /// No edge.
        const NONE   = 0x00;
        /// Top edge.
        const TOP    = 0x01;
        /// Bottom edge.
        const BOTTOM = 0x02;
        /// Left edge.
        const LEFT   = 0x04;
        /// Right edge.
        const RIGHT  = 0x08;
        /// Either horizontal-axis edge.
        const LEFT_OR_RIGHT = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Either vertical-axis edge.
        const TOP_OR_BOTTOM = Self::TOP.bits() | Self::BOTTOM.bits();
        /// All four edges.
        const ALL = Self::LEFT_OR_RIGHT.bits() | Self::TOP_OR_BOTTOM.bits();
    }
}

impl Default for BorderFlags {
    fn default() -> Self {
        Self::NONE
    }
}

impl BorderFlags {
    /// True if the top edge is set.
    #[inline]
    pub const fn top(self) -> bool {
        self.intersects(Self::TOP)
    }

    /// True if the bottom edge is set.
    #[inline]
    pub const fn bottom(self) -> bool {
        self.intersects(Self::BOTTOM)
    }

    /// True if the left edge is set.
    #[inline]
    pub const fn left(self) -> bool {
        self.intersects(Self::LEFT)
    }

    /// True if the right edge is set.
    #[inline]
    pub const fn right(self) -> bool {
        self.intersects(Self::RIGHT)
    }

    /// True if the top or the bottom edge is set.
    #[inline]
    pub const fn top_or_bottom(self) -> bool {
        self.intersects(Self::TOP_OR_BOTTOM)
    }

    /// True if the left or the right edge is set.
    #[inline]
    pub const fn left_or_right(self) -> bool {
        self.intersects(Self::LEFT_OR_RIGHT)
    }
}

/// An axis-aligned rectangle.
///
/// Width and height are expected to be non-negative but this is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(w: f64, h: f64) -> Self {
        Self::new(0.0, 0.0, w, h)
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Move the top-left corner, keeping the size.
    #[inline]
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Copy of this rectangle shifted by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Check if the two rectangles overlap.
    ///
    /// Rectangles that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Check if a point is strictly inside the rectangle.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x < x && self.right() > x && self.y < y && self.bottom() > y
    }

    /// Which edges of `self` are crossed by `other`.
    ///
    /// Returns [`BorderFlags::NONE`] when the rectangles do not intersect.
    /// Each edge is checked on its own, so a corner overlap reports two edges
    /// and a rectangle spanning `self` horizontally reports both LEFT and RIGHT.
    pub fn intersects_borders(&self, other: &Rect) -> BorderFlags {
        let mut borders = BorderFlags::NONE;
        if !self.intersects(other) {
            return borders;
        }
        if other.left() < self.right() && other.right() > self.right() {
            borders |= BorderFlags::RIGHT;
        }
        if other.left() < self.left() && other.right() > self.left() {
            borders |= BorderFlags::LEFT;
        }
        if other.top() < self.bottom() && other.bottom() > self.bottom() {
            borders |= BorderFlags::BOTTOM;
        }
        if other.top() < self.top() && other.bottom() > self.top() {
            borders |= BorderFlags::TOP;
        }
        borders
    }
}

/// Anything that occupies a rectangle on screen.
///
/// Containment checks operate on this trait so sprites and bare rectangles can
/// be clamped the same way.
pub trait Bounded {
    /// Current bounding rectangle.
    fn bounds(&self) -> Rect;

    /// Mutable access to the bounding rectangle.
    fn bounds_mut(&mut self) -> &mut Rect;
}

impl Bounded for Rect {
    #[inline]
    fn bounds(&self) -> Rect {
        *self
    }

    #[inline]
    fn bounds_mut(&mut self) -> &mut Rect {
        self
    }
}
