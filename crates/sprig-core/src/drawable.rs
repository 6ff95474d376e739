#![forbid(unsafe_code)]

//! Drawing boundary.
//!
//! sprig never draws anything itself. A renderer implements [`Blit`] for its
//! surface type, and anything that knows how to put pixels on that surface
//! implements [`Drawable`]. Bare closures are adapted with [`FnDrawable`].

use std::time::Duration;

use crate::geometry::{Bounded, Rect};
use crate::sprite::Sprite;

/// Something that can draw itself onto a `Target`.
pub trait Drawable<Target: ?Sized> {
    /// Draw into `dest` on `target`.
    fn draw(&self, target: &mut Target, dest: Rect);

    /// Natural width.
    fn width(&self) -> f64;

    /// Natural height.
    fn height(&self) -> f64;
}

/// A render target that copies a region of an image onto itself.
pub trait Blit<Image: ?Sized> {
    /// Copy `src` (in image coordinates) from `image` to `dest`.
    fn blit(&mut self, image: &Image, src: Rect, dest: Rect);
}

/// Adapts a closure into a [`Drawable`] of fixed size.
#[derive(Clone)]
pub struct FnDrawable<F> {
    draw_fn: F,
    w: f64,
    h: f64,
}

impl<F> FnDrawable<F> {
    /// Wrap `draw_fn`, reporting `w` × `h` as the natural size.
    pub const fn new(w: f64, h: f64, draw_fn: F) -> Self {
        Self { draw_fn, w, h }
    }
}

impl<F> std::fmt::Debug for FnDrawable<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnDrawable")
            .field("w", &self.w)
            .field("h", &self.h)
            .finish_non_exhaustive()
    }
}

impl<Target, F> Drawable<Target> for FnDrawable<F>
where
    Target: ?Sized,
    F: Fn(&mut Target, Rect),
{
    fn draw(&self, target: &mut Target, dest: Rect) {
        (self.draw_fn)(target, dest);
    }

    fn width(&self) -> f64 {
        self.w
    }

    fn height(&self) -> f64 {
        self.h
    }
}

/// World-space rectangles for a collision debug overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionOutlines {
    /// The sprite's bounding rectangle.
    pub bounds: Rect,
    /// Each collision area translated to world coordinates.
    pub areas: Vec<Rect>,
}

/// A sprite paired with the drawable that renders it.
#[derive(Debug)]
pub struct DrawableSprite<D> {
    sprite: Sprite,
    drawable: D,
}

impl<D> DrawableSprite<D> {
    /// Pair `sprite` with `drawable`.
    pub const fn new(sprite: Sprite, drawable: D) -> Self {
        Self { sprite, drawable }
    }

    /// The drawable.
    pub const fn drawable(&self) -> &D {
        &self.drawable
    }

    /// Mutable drawable.
    pub fn drawable_mut(&mut self) -> &mut D {
        &mut self.drawable
    }

    /// Advance the underlying sprite.
    pub fn update(&mut self, dt: Duration) -> &mut Self {
        self.sprite.update(dt);
        self
    }

    /// Draw at the sprite's bounds if it is visible.
    pub fn draw<Target: ?Sized>(&self, target: &mut Target)
    where
        D: Drawable<Target>,
    {
        if self.sprite.visible {
            self.drawable.draw(target, self.sprite.bounds());
        }
    }

    /// Multiply width and height by `amount`.
    pub fn scale(&mut self, amount: f64) -> &mut Self {
        self.scale_xy(amount, amount)
    }

    /// Multiply width by `x` and height by `y`.
    pub fn scale_xy(&mut self, x: f64, y: f64) -> &mut Self {
        let (w, h) = (self.sprite.w() * x, self.sprite.h() * y);
        self.sprite.resize(w, h);
        self
    }

    /// Bounds and world-space collision areas, for debug overlays.
    pub fn collision_outlines(&self) -> CollisionOutlines {
        CollisionOutlines {
            bounds: self.sprite.bounds(),
            areas: self.sprite.world_collision_areas().collect(),
        }
    }
}

impl<D> AsRef<Sprite> for DrawableSprite<D> {
    fn as_ref(&self) -> &Sprite {
        &self.sprite
    }
}

impl<D> AsMut<Sprite> for DrawableSprite<D> {
    fn as_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

impl<D> Bounded for DrawableSprite<D> {
    fn bounds(&self) -> Rect {
        self.sprite.bounds()
    }

    fn bounds_mut(&mut self) -> &mut Rect {
        self.sprite.bounds_mut()
    }
}
