#![forbid(unsafe_code)]

//! Frame sources: where "next frame" notifications come from.
//!
//! A [`FrameSource`] models a host's one-shot redraw request. The loop arms it
//! with [`request_frame`](FrameSource::request_frame); the next call to
//! [`next_frame`](FrameSource::next_frame) then yields the frame timestamp and
//! disarms it again. An unarmed source yields nothing.
//!
//! - [`ManualFrameSource`] replays timestamps pushed by a host or a test.
//! - [`TimerFrameSource`] is the timer fallback for hosts without a native
//!   redraw primitive.

use std::collections::VecDeque;
use std::time::Duration;

use crate::clock::{DeterministicClock, FrameClock, SystemClock};
use crate::config::LoopConfig;

/// One-shot next-frame notifications.
pub trait FrameSource {
    /// Arm a single notification for the next frame.
    fn request_frame(&mut self);

    /// Withdraw a pending request, if any.
    fn cancel(&mut self);

    /// Deliver the pending notification's timestamp.
    ///
    /// Returns `None` when no frame was requested or the host has no further
    /// frames to deliver.
    fn next_frame(&mut self) -> Option<Duration>;
}

/// Frame source fed by the host.
///
/// Timestamps are queued with [`push_frame_at`](Self::push_frame_at) or
/// [`push_frame_after`](Self::push_frame_after) and released one per request.
/// The internal [`DeterministicClock`] follows the last delivered frame.
#[derive(Debug, Default, Clone)]
pub struct ManualFrameSource {
    clock: DeterministicClock,
    queued: VecDeque<Duration>,
    armed: bool,
    requests: u64,
}

impl ManualFrameSource {
    /// Create an empty, unarmed source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source with frames spaced by `intervals`, starting from zero.
    #[must_use]
    pub fn with_intervals(intervals: impl IntoIterator<Item = Duration>) -> Self {
        let mut source = Self::new();
        for dt in intervals {
            source.push_frame_after(dt);
        }
        source
    }

    /// Queue a frame at absolute time `now`.
    pub fn push_frame_at(&mut self, now: Duration) -> &mut Self {
        self.queued.push_back(now);
        self
    }

    /// Queue a frame `dt` after the last queued (or delivered) frame.
    pub fn push_frame_after(&mut self, dt: Duration) -> &mut Self {
        let base = self
            .queued
            .back()
            .copied()
            .unwrap_or_else(|| self.clock.now_mono());
        self.push_frame_at(base.saturating_add(dt))
    }

    /// Whether a frame request is outstanding.
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Number of frames still queued.
    pub fn pending(&self) -> usize {
        self.queued.len()
    }

    /// Total number of frame requests received.
    pub const fn requests(&self) -> u64 {
        self.requests
    }

    /// Clock positioned at the last delivered frame.
    pub const fn clock(&self) -> &DeterministicClock {
        &self.clock
    }
}

impl FrameSource for ManualFrameSource {
    fn request_frame(&mut self) {
        self.armed = true;
        self.requests += 1;
    }

    fn cancel(&mut self) {
        self.armed = false;
    }

    fn next_frame(&mut self) -> Option<Duration> {
        if !self.armed {
            return None;
        }
        let now = self.queued.pop_front()?;
        self.armed = false;
        self.clock.set(now);
        Some(now)
    }
}

/// Timer-driven frame source.
///
/// With a zero interval every request is answered immediately with the
/// clock's current time. A non-zero interval paces frames by sleeping the
/// calling thread until the next deadline.
#[derive(Debug, Clone)]
pub struct TimerFrameSource<C = SystemClock> {
    clock: C,
    interval: Duration,
    last: Option<Duration>,
    armed: bool,
}

impl TimerFrameSource<SystemClock> {
    /// Zero-delay source on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }

    /// System-clock source paced by `config.frame_interval_ms`.
    #[must_use]
    pub fn from_config(config: &LoopConfig) -> Self {
        Self::new().with_interval(config.frame_interval())
    }
}

impl Default for TimerFrameSource<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: FrameClock> TimerFrameSource<C> {
    /// Zero-delay source reading `clock`.
    pub const fn with_clock(clock: C) -> Self {
        Self {
            clock,
            interval: Duration::ZERO,
            last: None,
            armed: false,
        }
    }

    /// Minimum spacing between delivered frames.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// The pacing interval.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// The clock being read.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable clock access.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

impl<C: FrameClock> FrameSource for TimerFrameSource<C> {
    fn request_frame(&mut self) {
        self.armed = true;
    }

    fn cancel(&mut self) {
        self.armed = false;
    }

    fn next_frame(&mut self) -> Option<Duration> {
        if !self.armed {
            return None;
        }
        self.armed = false;
        let mut now = self.clock.now_mono();
        if let Some(last) = self.last {
            let deadline = last.saturating_add(self.interval);
            if now < deadline {
                std::thread::sleep(deadline - now);
                now = self.clock.now_mono().max(deadline);
            }
        }
        self.last = Some(now);
        Some(now)
    }
}
