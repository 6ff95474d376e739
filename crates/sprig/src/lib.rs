#![forbid(unsafe_code)]

//! sprig public facade crate.
//!
//! Re-exports the sprite model from `sprig-core` and, with the default
//! `runtime` feature, the animation loop from `sprig-runtime`, plus a prelude
//! for day-to-day usage.
//!
//! ```
//! use std::ops::ControlFlow;
//! use sprig::prelude::*;
//!
//! let mut ids = UidAllocator::new();
//! let panel = Panel::from_size(320.0, 240.0);
//! let mut ship = ids.sprite(16.0, 16.0).at(10.0, 10.0).with_velocity(120.0, 0.0);
//!
//! let mut animation = AnimationLoop::new(|dt| {
//!     ship.update(dt);
//!     panel.restrict_bounds(&mut ship);
//!     ControlFlow::Continue(())
//! });
//! let mut frames = ManualFrameSource::with_intervals([Duration::from_millis(16); 4]);
//! assert_eq!(animation.run(&mut frames), 3);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use sprig_core::backdrop::{Backdrop, BackgroundStyle};
pub use sprig_core::collections::{NodeList, OrderedList, SpriteSet, ZOrderedList};
pub use sprig_core::drawable::{Blit, CollisionOutlines, Drawable, DrawableSprite, FnDrawable};
pub use sprig_core::geometry::{BorderFlags, Bounded, Rect};
pub use sprig_core::panel::Panel;
pub use sprig_core::sheet::{AnimatedSprite, AnimationFrames, SheetImage, SpriteSheet};
pub use sprig_core::sprite::{Sprite, Uid, UidAllocator, Velocity};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use sprig_runtime::{
    AnimationLoop, DeterministicClock, FrameClock, FrameOutcome, FrameSource, LoopConfig,
    LoopConfigError, ManualFrameSource, SystemClock, TimerFrameSource,
};

// --- Prelude --------------------------------------------------------------

/// Common imports for sprig applications.
pub mod prelude {
    pub use std::time::Duration;

    pub use crate::{
        BorderFlags, Bounded, Drawable, DrawableSprite, FnDrawable, OrderedList, Panel, Rect,
        Sprite, UidAllocator, ZOrderedList,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{AnimationLoop, FrameSource, LoopConfig, ManualFrameSource, TimerFrameSource};

    pub use crate::core;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use sprig_core as core;
#[cfg(feature = "runtime")]
pub use sprig_runtime as runtime;
