#![forbid(unsafe_code)]

//! Panels: rectangles that keep other rectangles inside them.
//!
//! # Axis precedence
//!
//! Each axis reports at most one edge. RIGHT is checked before LEFT and BOTTOM
//! before TOP, so an item wider (or taller) than the panel that crosses both
//! edges of an axis is reported, and clamped, against RIGHT (or BOTTOM) only.

use crate::geometry::{BorderFlags, Bounded, Rect};

/// A rectangle with bounds checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    bounds: Rect,
    /// Whether the panel is drawn.
    pub visible: bool,
}

impl Panel {
    /// Create a panel covering `bounds`.
    pub const fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            visible: true,
        }
    }

    /// Create a panel at the origin with the given size.
    pub const fn from_size(w: f64, h: f64) -> Self {
        Self::new(Rect::from_size(w, h))
    }

    /// Panel edges that `item` touches or crosses.
    pub fn check_bounds(&self, item: &impl Bounded) -> BorderFlags {
        let rect = item.bounds();
        let mut borders = BorderFlags::NONE;
        if rect.right() >= self.bounds.right() {
            borders |= BorderFlags::RIGHT;
        } else if rect.left() <= self.bounds.x {
            borders |= BorderFlags::LEFT;
        }
        if rect.bottom() >= self.bounds.bottom() {
            borders |= BorderFlags::BOTTOM;
        } else if rect.top() <= self.bounds.y {
            borders |= BorderFlags::TOP;
        }
        borders
    }

    /// Clamp `item` inside the panel and report the edges it hit.
    ///
    /// The offending edge of `item` is aligned with the matching panel edge;
    /// the item's size is never changed.
    pub fn restrict_bounds(&self, item: &mut impl Bounded) -> BorderFlags {
        let borders = self.check_bounds(item);
        if borders.is_empty() {
            return borders;
        }
        let rect = item.bounds_mut();
        if borders.left() {
            rect.x = self.bounds.x;
        } else if borders.right() {
            rect.x = self.bounds.right() - rect.w;
        }
        if borders.top() {
            rect.y = self.bounds.y;
        } else if borders.bottom() {
            rect.y = self.bounds.bottom() - rect.h;
        }
        borders
    }
}

impl Bounded for Panel {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn bounds_mut(&mut self) -> &mut Rect {
        &mut self.bounds
    }
}
