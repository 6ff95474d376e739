#![forbid(unsafe_code)]

//! Runtime: frame-paced animation loop and the frame sources that drive it.
//!
//! # Role in sprig
//! `sprig-runtime` is the timing layer. It turns host frame notifications into
//! per-frame deltas, drops anomalous gaps, and hands the deltas to caller code
//! that updates and draws `sprig-core` sprites.
//!
//! # Primary responsibilities
//! - **AnimationLoop**: start/stop state machine, delta computation, dropped
//!   frame detection, and running statistics.
//! - **FrameSource**: one-shot next-frame requests, host driven
//!   ([`ManualFrameSource`]) or timer driven ([`TimerFrameSource`]).
//! - **Clocks**: [`SystemClock`] and [`DeterministicClock`] behind
//!   [`FrameClock`].
//! - **LoopConfig**: tunables, loadable from TOML/JSON with `loop-config`.

pub mod animation_loop;
pub mod clock;
pub mod config;
pub mod frame_source;

pub use animation_loop::{AnimationLoop, FrameOutcome};
pub use clock::{DeterministicClock, FrameClock, SystemClock};
pub use config::{DEFAULT_MAX_DELTA_MS, LoopConfig, LoopConfigError};
pub use frame_source::{FrameSource, ManualFrameSource, TimerFrameSource};
