#![forbid(unsafe_code)]

//! Frame-paced animation loop.
//!
//! [`AnimationLoop`] turns a stream of frame timestamps into per-frame deltas
//! and calls the user callback with each one. Deltas that reach the
//! configured maximum (a backgrounded tab, a debugger pause) are dropped: the
//! callback is skipped and the statistics are left untouched.
//!
//! # Driving the loop
//!
//! - [`run`](AnimationLoop::run) owns the loop: it waits on a
//!   [`FrameSource`], dispatches each frame, and re-arms the source while the
//!   loop is running.
//! - [`on_frame`](AnimationLoop::on_frame) steps a single frame, for hosts that
//!   own their event loop and re-arm their own redraw request while
//!   [`is_running`](AnimationLoop::is_running) holds.
//!
//! # Stopping
//!
//! Stopping is cooperative. [`stop`](AnimationLoop::stop) only clears the
//! running flag; a frame already requested still arrives once, does no work,
//! and is not re-armed. A callback stops the loop by returning
//! [`ControlFlow::Break`].
//!
//! # Statistics
//!
//! Elapsed time and frame count survive `stop`/`start`. A fresh `start` only
//! forgets the previous frame timestamp, so the first frame after it sets the
//! baseline instead of producing a delta.

use std::fmt;
use std::ops::ControlFlow;
use std::time::Duration;

use crate::config::{LoopConfig, LoopConfigError};
use crate::frame_source::FrameSource;

/// What [`AnimationLoop::on_frame`] did with a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// First frame since `start`; recorded as the delta baseline.
    Baseline,
    /// The loop is stopped; the timestamp was recorded only.
    Stopped,
    /// The callback ran with this delta.
    Dispatched(Duration),
    /// The delta reached the maximum and the frame was skipped.
    Dropped(Duration),
}

/// Calls a callback once per frame with the time since the previous frame.
pub struct AnimationLoop<F> {
    callback: F,
    running: bool,
    last_frame: Option<Duration>,
    elapsed: Duration,
    frame_count: u64,
    max_delta: Duration,
}

impl<F> fmt::Debug for AnimationLoop<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationLoop")
            .field("running", &self.running)
            .field("last_frame", &self.last_frame)
            .field("elapsed", &self.elapsed)
            .field("frame_count", &self.frame_count)
            .field("max_delta", &self.max_delta)
            .finish_non_exhaustive()
    }
}

impl<F> AnimationLoop<F>
where
    F: FnMut(Duration) -> ControlFlow<()>,
{
    /// Create a stopped loop with the default configuration.
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            running: false,
            last_frame: None,
            elapsed: Duration::ZERO,
            frame_count: 0,
            max_delta: LoopConfig::default().max_delta(),
        }
    }

    /// Create a stopped loop from a validated configuration.
    pub fn with_config(config: &LoopConfig, callback: F) -> Result<Self, LoopConfigError> {
        config.check()?;
        let mut animation = Self::new(callback);
        animation.max_delta = config.max_delta();
        Ok(animation)
    }

    /// Start the loop and arm `source`. Ignored if already running.
    pub fn start(&mut self, source: &mut impl FrameSource) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_frame = None;
        tracing::trace!(frame_count = self.frame_count, "animation loop started");
        source.request_frame();
    }

    /// Stop the loop at the next frame.
    pub fn stop(&mut self) {
        if self.running {
            tracing::trace!(frame_count = self.frame_count, "animation loop stopped");
        }
        self.running = false;
    }

    /// Whether the loop is running.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Sum of all dispatched frame deltas.
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of dispatched frames.
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average dispatch rate over the loop's lifetime.
    ///
    /// NaN before any frame has been dispatched.
    pub fn frames_per_second(&self) -> f64 {
        let elapsed_ms = self.elapsed.as_secs_f64() * 1000.0;
        1000.0 * self.frame_count as f64 / elapsed_ms
    }

    /// Deltas at or above this are dropped.
    pub const fn max_delta(&self) -> Duration {
        self.max_delta
    }

    /// Change the drop threshold.
    pub fn set_max_delta(&mut self, max_delta: Duration) {
        self.max_delta = max_delta;
    }

    /// Handle one frame notification at host time `now`.
    ///
    /// Timestamps that run backwards produce a zero delta.
    pub fn on_frame(&mut self, now: Duration) -> FrameOutcome {
        let previous = self.last_frame.replace(now);
        if !self.running {
            return FrameOutcome::Stopped;
        }
        let Some(previous) = previous else {
            return FrameOutcome::Baseline;
        };

        let dt = now.saturating_sub(previous);
        if dt >= self.max_delta {
            tracing::debug!(
                dt_ms = dt.as_secs_f64() * 1000.0,
                max_delta_ms = self.max_delta.as_millis() as u64,
                "animation frame dropped"
            );
            return FrameOutcome::Dropped(dt);
        }

        self.elapsed += dt;
        self.frame_count += 1;
        if (self.callback)(dt).is_break() {
            self.stop();
        }
        FrameOutcome::Dispatched(dt)
    }

    /// Start if needed, then dispatch frames from `source` until the loop
    /// stops or the source runs dry.
    ///
    /// Returns the number of frames dispatched during this call. A stopped
    /// loop withdraws any request it left on the source.
    pub fn run(&mut self, source: &mut impl FrameSource) -> u64 {
        self.start(source);
        let mut dispatched = 0;
        while let Some(now) = source.next_frame() {
            if let FrameOutcome::Dispatched(_) = self.on_frame(now) {
                dispatched += 1;
            }
            if !self.running {
                break;
            }
            source.request_frame();
        }
        if !self.running {
            source.cancel();
        }
        dispatched
    }
}
