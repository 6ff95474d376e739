#![forbid(unsafe_code)]

//! Sprites: moving rectangles with optional collision areas.
//!
//! A [`Sprite`] is a [`Rect`] with a velocity, activity/visibility flags, and
//! identity. Velocity is stored per millisecond so that [`Sprite::update`] can
//! integrate directly with the frame delta, and exposed per second through
//! [`Sprite::velocity`] / [`Sprite::set_velocity`].
//!
//! # Collision model
//!
//! [`Sprite::intersects`] is two-phase:
//!
//! 1. **Broad phase**: bounding rectangles must intersect.
//! 2. **Narrow phase**: if either sprite declares collision areas, those areas
//!    (translated to world space) decide the result. Areas are tested against
//!    the other sprite's areas, or against its bounds when it has none.
//!
//! Without collision areas on either side the broad phase is authoritative.
//!
//! # Identity
//!
//! Every sprite carries a [`Uid`] handed out by a [`UidAllocator`]. The
//! allocator is an explicit value owned by whoever builds sprites, so tests can
//! reset it and get deterministic ids.

use std::any::Any;
use std::fmt;
use std::time::Duration;

use crate::geometry::{BorderFlags, Bounded, Rect};

/// Milliseconds in `dt` as a float, exact for whole milliseconds.
#[inline]
pub(crate) fn millis_f64(dt: Duration) -> f64 {
    dt.as_nanos() as f64 / 1_000_000.0
}

/// Unique sprite identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uid(u64);

impl Uid {
    /// Raw counter value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic source of sprite [`Uid`]s.
///
/// Ids are never reused unless [`reset`](Self::reset) is called.
#[derive(Debug, Clone, Default)]
pub struct UidAllocator {
    next: u64,
}

impl UidAllocator {
    /// Allocator whose first id is `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocator whose first id is `base`.
    #[must_use]
    pub const fn starting_at(base: u64) -> Self {
        Self { next: base }
    }

    /// Take the next id.
    pub fn next_uid(&mut self) -> Uid {
        let uid = Uid(self.next);
        self.next += 1;
        uid
    }

    /// The id the next call to [`next_uid`](Self::next_uid) will return.
    #[must_use]
    pub const fn peek(&self) -> Uid {
        Uid(self.next)
    }

    /// Restart numbering at `base`.
    pub fn reset(&mut self, base: u64) {
        tracing::trace!(base, "sprite uid counter reset");
        self.next = base;
    }

    /// Build a sprite of the given size at the origin with a fresh id.
    pub fn sprite(&mut self, w: f64, h: f64) -> Sprite {
        Sprite::new(self.next_uid(), w, h)
    }
}

/// Velocity in distance units per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    /// Horizontal component.
    pub vx: f64,
    /// Vertical component.
    pub vy: f64,
}

/// A rectangle that moves.
pub struct Sprite {
    bounds: Rect,
    /// Horizontal velocity per millisecond.
    vx: f64,
    /// Vertical velocity per millisecond.
    vy: f64,
    /// Whether the sprite is drawn.
    pub visible: bool,
    /// Whether the sprite is updated.
    pub active: bool,
    /// User-facing id, defaults to the uid.
    pub id: String,
    /// Ordering hint for z-ordered lists.
    pub z_index: i32,
    user_data: Option<Box<dyn Any>>,
    collision_areas: Vec<Rect>,
    uid: Uid,
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("uid", &self.uid)
            .field("id", &self.id)
            .field("bounds", &self.bounds)
            .field("velocity", &self.velocity())
            .field("active", &self.active)
            .field("visible", &self.visible)
            .field("z_index", &self.z_index)
            .field("collision_areas", &self.collision_areas.len())
            .finish_non_exhaustive()
    }
}

impl Sprite {
    /// Create a sprite at the origin with zero velocity.
    pub fn new(uid: Uid, w: f64, h: f64) -> Self {
        Self {
            bounds: Rect::from_size(w, h),
            vx: 0.0,
            vy: 0.0,
            visible: true,
            active: true,
            id: uid.to_string(),
            z_index: 0,
            user_data: None,
            collision_areas: Vec::new(),
            uid,
        }
    }

    /// Set the velocity in distance per second (builder pattern).
    #[must_use]
    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.set_velocity(vx, vy);
        self
    }

    /// Set the position (builder pattern).
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.bounds.move_to(x, y);
        self
    }

    /// Set the z-index (builder pattern).
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Unique id assigned at construction.
    #[inline]
    pub const fn uid(&self) -> Uid {
        self.uid
    }

    /// Left edge.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.bounds.x
    }

    /// Top edge.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.bounds.y
    }

    /// Width.
    #[inline]
    pub const fn w(&self) -> f64 {
        self.bounds.w
    }

    /// Height.
    #[inline]
    pub const fn h(&self) -> f64 {
        self.bounds.h
    }

    /// Move the top-left corner.
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.bounds.move_to(x, y);
        self
    }

    /// Change the size, keeping the position.
    pub fn resize(&mut self, w: f64, h: f64) -> &mut Self {
        self.bounds.w = w;
        self.bounds.h = h;
        self
    }

    /// Advance the position by `dt` if the sprite is active.
    pub fn update(&mut self, dt: Duration) -> &mut Self {
        if self.active {
            let ms = millis_f64(dt);
            if self.vx != 0.0 {
                self.bounds.x += self.vx * ms;
            }
            if self.vy != 0.0 {
                self.bounds.y += self.vy * ms;
            }
        }
        self
    }

    /// Clear both `active` and `visible`.
    pub fn disable(&mut self) -> &mut Self {
        self.active = false;
        self.visible = false;
        self
    }

    /// Set both `active` and `visible`.
    pub fn enable(&mut self) -> &mut Self {
        self.active = true;
        self.visible = true;
        self
    }

    /// Velocity in distance per second.
    pub fn velocity(&self) -> Velocity {
        Velocity {
            vx: self.vx * 1000.0,
            vy: self.vy * 1000.0,
        }
    }

    /// Set the velocity in distance per second.
    pub fn set_velocity(&mut self, vx: f64, vy: f64) -> &mut Self {
        self.vx = vx / 1000.0;
        self.vy = vy / 1000.0;
        self
    }

    /// Attach opaque user data, replacing any previous value.
    pub fn set_user_data<T: Any>(&mut self, data: T) -> &mut Self {
        self.user_data = Some(Box::new(data));
        self
    }

    /// User data, if present and of type `T`.
    pub fn user_data<T: Any>(&self) -> Option<&T> {
        self.user_data.as_deref()?.downcast_ref()
    }

    /// Mutable user data, if present and of type `T`.
    pub fn user_data_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.user_data.as_deref_mut()?.downcast_mut()
    }

    /// Add a collision area in sprite-local coordinates.
    pub fn add_collision_area(&mut self, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        self.collision_areas.push(Rect::new(x, y, w, h));
        self
    }

    /// Collision areas in sprite-local coordinates.
    pub fn collision_areas(&self) -> &[Rect] {
        &self.collision_areas
    }

    /// Collision areas translated to world coordinates.
    pub fn world_collision_areas(&self) -> impl Iterator<Item = Rect> + '_ {
        let (x, y) = (self.bounds.x, self.bounds.y);
        self.collision_areas
            .iter()
            .map(move |area| area.translated(x, y))
    }

    /// Check if a point is strictly inside the sprite's bounds.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.bounds.contains(x, y)
    }

    /// Which edges of this sprite's bounds are crossed by `other`.
    pub fn intersects_borders(&self, other: &impl Bounded) -> BorderFlags {
        self.bounds.intersects_borders(&other.bounds())
    }

    /// Check if two sprites collide.
    pub fn intersects(&self, other: &Sprite) -> bool {
        if !self.bounds.intersects(&other.bounds) {
            return false;
        }
        if !self.collision_areas.is_empty() {
            self.collision_areas_hit(other)
        } else if !other.collision_areas.is_empty() {
            other.collision_areas_hit(self)
        } else {
            true
        }
    }

    /// Narrow phase driven by this sprite's collision areas.
    fn collision_areas_hit(&self, other: &Sprite) -> bool {
        self.world_collision_areas().any(|area| {
            if other.collision_areas.is_empty() {
                area.intersects(&other.bounds)
            } else {
                other
                    .world_collision_areas()
                    .any(|other_area| area.intersects(&other_area))
            }
        })
    }
}

impl Bounded for Sprite {
    #[inline]
    fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    fn bounds_mut(&mut self) -> &mut Rect {
        &mut self.bounds
    }
}

impl AsRef<Sprite> for Sprite {
    fn as_ref(&self) -> &Sprite {
        self
    }
}

impl AsMut<Sprite> for Sprite {
    fn as_mut(&mut self) -> &mut Sprite {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Sprite, UidAllocator, Velocity};
    use crate::geometry::{BorderFlags, Bounded, Rect};

    fn pair(ids: &mut UidAllocator) -> (Sprite, Sprite) {
        (ids.sprite(100.0, 100.0), ids.sprite(100.0, 100.0))
    }

    #[test]
    fn uids_are_monotonic_and_resettable() {
        let mut ids = UidAllocator::new();
        let a = ids.sprite(1.0, 1.0);
        let b = ids.sprite(1.0, 1.0);
        assert_eq!(a.uid().get(), 0);
        assert_eq!(b.uid().get(), 1);
        assert_eq!(b.id, "1");
        assert_eq!(ids.peek().get(), 2);

        ids.reset(40);
        assert_eq!(ids.sprite(1.0, 1.0).id, "40");
        assert_eq!(UidAllocator::starting_at(7).next_uid().get(), 7);
    }

    #[test]
    fn bounding_box_collisions() {
        let mut ids = UidAllocator::new();
        let (mut s1, mut s2) = pair(&mut ids);
        s1.move_to(0.0, 0.0);
        s2.move_to(50.0, 50.0);
        assert!(s1.intersects(&s2));
        assert!(s2.intersects(&s1));

        s2.move_to(100.0, 100.0);
        assert!(!s1.intersects(&s2));
        assert!(!s2.intersects(&s1));
    }

    #[test]
    fn border_collisions() {
        let mut ids = UidAllocator::new();
        let (s1, mut s2) = pair(&mut ids);
        s2.move_to(50.0, 50.0);
        assert_eq!(s1.intersects_borders(&s2), BorderFlags::BOTTOM | BorderFlags::RIGHT);
        assert_eq!(s2.intersects_borders(&s1), BorderFlags::TOP | BorderFlags::LEFT);

        s2.move_to(100.0, 100.0);
        assert_eq!(s1.intersects_borders(&s2), BorderFlags::NONE);
    }

    #[test]
    fn collision_areas_refine_bounds() {
        let mut ids = UidAllocator::new();
        let (mut s1, mut s2) = pair(&mut ids);
        s1.add_collision_area(10.0, 0.0, 80.0, 100.0);
        s1.move_to(100.0, 100.0);
        s2.move_to(150.0, 150.0);
        assert!(s1.intersects(&s2));
        assert!(s2.intersects(&s1));

        s2.add_collision_area(10.0, 0.0, 80.0, 100.0);
        assert!(s1.intersects(&s2));
        assert!(s2.intersects(&s1));

        s2.move_to(200.0, 200.0);
        assert!(!s1.intersects(&s2));
        assert!(!s2.intersects(&s1));

        s2.move_to(170.0, 170.0);
        assert!(s1.intersects(&s2));
        assert!(s2.intersects(&s1));
    }

    #[test]
    fn collision_areas_can_veto_overlapping_bounds() {
        let mut ids = UidAllocator::new();
        let (mut s1, mut s2) = pair(&mut ids);
        s1.add_collision_area(0.0, 0.0, 10.0, 10.0);
        s2.move_to(50.0, 50.0);
        assert!(s1.bounds().intersects(&s2.bounds()));
        assert!(!s1.intersects(&s2));
        assert!(!s2.intersects(&s1));
    }

    #[test]
    fn multiple_collision_areas() {
        let mut ids = UidAllocator::new();
        let (mut s1, mut s2) = pair(&mut ids);
        s1.add_collision_area(0.0, 0.0, 50.0, 50.0)
            .add_collision_area(50.0, 50.0, 50.0, 50.0);
        s2.add_collision_area(0.0, 0.0, 50.0, 50.0)
            .add_collision_area(50.0, 50.0, 50.0, 50.0);

        s1.move_to(100.0, 100.0);
        for (x, y, hit) in [
            (150.0, 150.0, true),
            (149.0, 100.0, true),
            (51.0, 100.0, true),
            (5.0, 100.0, false),
        ] {
            s2.move_to(x, y);
            assert_eq!(s1.intersects(&s2), hit, "s2 at ({x}, {y})");
            assert_eq!(s2.intersects(&s1), hit, "s2 at ({x}, {y}) reversed");
        }
    }

    #[test]
    fn world_collision_areas_follow_position() {
        let mut ids = UidAllocator::new();
        let mut s = ids.sprite(20.0, 20.0).at(5.0, 7.0);
        s.add_collision_area(1.0, 2.0, 3.0, 4.0);
        let areas: Vec<Rect> = s.world_collision_areas().collect();
        assert_eq!(areas, vec![Rect::new(6.0, 9.0, 3.0, 4.0)]);
        assert_eq!(s.collision_areas(), &[Rect::new(1.0, 2.0, 3.0, 4.0)]);
    }

    #[test]
    fn velocity_integration() {
        let mut ids = UidAllocator::new();
        let mut s = ids.sprite(100.0, 100.0).with_velocity(10.0, 5.0).at(100.0, 100.0);
        s.update(Duration::ZERO);
        assert_eq!((s.x(), s.y()), (100.0, 100.0));

        s.update(Duration::from_millis(1000));
        assert_eq!((s.x(), s.y()), (110.0, 105.0));

        s.set_velocity(5.0, 10.0);
        s.update(Duration::from_millis(1000));
        assert_eq!((s.x(), s.y()), (115.0, 115.0));

        s.active = false;
        s.update(Duration::from_millis(1000));
        assert_eq!((s.x(), s.y()), (115.0, 115.0));
    }

    #[test]
    fn velocity_round_trips_per_second() {
        let mut ids = UidAllocator::new();
        let s = ids.sprite(1.0, 1.0).with_velocity(250.0, -125.0);
        assert_eq!(s.velocity(), Velocity { vx: 250.0, vy: -125.0 });
    }

    #[test]
    fn contains_point() {
        let mut ids = UidAllocator::new();
        let s = ids.sprite(100.0, 100.0).at(100.0, 100.0);
        assert!(s.contains(150.0, 150.0));
        assert!(!s.contains(50.0, 50.0));
    }

    #[test]
    fn enable_disable_toggle_both_flags() {
        let mut ids = UidAllocator::new();
        let mut s = ids.sprite(1.0, 1.0);
        s.disable();
        assert!(!s.active && !s.visible);
        s.enable();
        assert!(s.active && s.visible);
        s.visible = false;
        assert!(s.active);
    }

    #[test]
    fn user_data_is_typed() {
        let mut ids = UidAllocator::new();
        let mut s = ids.sprite(1.0, 1.0);
        assert!(s.user_data::<u32>().is_none());
        s.set_user_data(41_u32);
        *s.user_data_mut::<u32>().unwrap() += 1;
        assert_eq!(s.user_data::<u32>(), Some(&42));
        assert!(s.user_data::<String>().is_none());
    }
}
