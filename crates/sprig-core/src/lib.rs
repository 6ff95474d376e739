#![forbid(unsafe_code)]

//! Core: rectangles, sprites, collision, containment, and sprite lists.
//!
//! # Role in sprig
//! `sprig-core` is the renderer-independent model layer. Everything here is
//! plain data plus pure operations; nothing touches a clock or a surface.
//!
//! # Primary responsibilities
//! - **Rect / BorderFlags**: axis-aligned geometry and edge reporting.
//! - **Sprite**: velocity integration and two-phase collision.
//! - **Panel**: containment checks and clamping.
//! - **OrderedList**: comparator-sorted sprite collection with purge.
//! - **Drawing boundary**: [`Drawable`] and [`Blit`] traits that renderers
//!   implement, plus sprite sheets, animated sprites, and tiled backdrops.
//!
//! # How it fits in the system
//! `sprig-runtime` drives these types from a frame-paced animation loop. The
//! `sprig` facade re-exports both crates.

pub mod backdrop;
pub mod collections;
pub mod drawable;
pub mod geometry;
pub mod panel;
pub mod sheet;
pub mod sprite;

pub use backdrop::{Backdrop, BackgroundStyle};
pub use collections::{NodeList, OrderedList, SpriteSet, ZOrderedList};
pub use drawable::{Blit, CollisionOutlines, Drawable, DrawableSprite, FnDrawable};
pub use geometry::{BorderFlags, Bounded, Rect};
pub use panel::Panel;
pub use sheet::{AnimatedSprite, AnimationFrames, FrameGrid, SheetImage, SpriteSheet};
pub use sprite::{Sprite, Uid, UidAllocator, Velocity};
