//! Property-based invariant tests for animation loop frame accounting.
//!
//! 1. Dropped frames never touch frame count or elapsed time
//! 2. Elapsed time equals the sum of dispatched deltas
//! 3. The callback runs exactly once per dispatched frame
//! 4. Stopped loops never dispatch

use std::cell::Cell;
use std::ops::ControlFlow;
use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;
use sprig_runtime::{AnimationLoop, FrameOutcome, ManualFrameSource};

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Frame(u64),
    Start,
    Stop,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => (0u64..250).prop_map(Op::Frame),
        1 => Just(Op::Start),
        1 => Just(Op::Stop),
    ]
}

fn counting_loop() -> (
    Rc<Cell<u64>>,
    AnimationLoop<impl FnMut(Duration) -> ControlFlow<()>>,
) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let animation = AnimationLoop::new(move |_dt| {
        counter.set(counter.get() + 1);
        ControlFlow::Continue(())
    });
    (calls, animation)
}

// ═══════════════════════════════════════════════════════════════════════
// 1-4. Accounting under arbitrary lifecycles
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn accounting_matches_outcomes(ops in prop::collection::vec(op_strategy(), 0..300)) {
        let (calls, mut animation) = counting_loop();
        let mut source = ManualFrameSource::new();
        let mut now = Duration::ZERO;
        let mut expected_elapsed = Duration::ZERO;
        let mut expected_count = 0u64;

        for op in &ops {
            match *op {
                Op::Start => animation.start(&mut source),
                Op::Stop => animation.stop(),
                Op::Frame(gap_ms) => {
                    now += Duration::from_millis(gap_ms);
                    let before = (animation.frame_count(), animation.elapsed());
                    let running = animation.is_running();
                    match animation.on_frame(now) {
                        FrameOutcome::Dispatched(dt) => {
                            prop_assert!(running);
                            prop_assert!(dt < animation.max_delta());
                            expected_elapsed += dt;
                            expected_count += 1;
                        }
                        FrameOutcome::Dropped(dt) => {
                            prop_assert!(dt >= animation.max_delta());
                            prop_assert_eq!(
                                (animation.frame_count(), animation.elapsed()),
                                before,
                                "dropped frame changed the statistics"
                            );
                        }
                        FrameOutcome::Stopped => prop_assert!(!running),
                        FrameOutcome::Baseline => prop_assert!(running),
                    }
                }
            }
        }

        prop_assert_eq!(animation.frame_count(), expected_count);
        prop_assert_eq!(animation.elapsed(), expected_elapsed);
        prop_assert_eq!(calls.get(), expected_count);
    }

    #[test]
    fn stopped_loop_never_dispatches(gaps in prop::collection::vec(0u64..250, 0..100)) {
        let (calls, mut animation) = counting_loop();
        let mut now = Duration::ZERO;
        for gap in gaps {
            now += Duration::from_millis(gap);
            prop_assert_eq!(animation.on_frame(now), FrameOutcome::Stopped);
        }
        prop_assert_eq!(calls.get(), 0);
        prop_assert_eq!(animation.frame_count(), 0);
    }

    #[test]
    fn run_dispatches_exactly_the_short_gaps(gaps in prop::collection::vec(0u64..250, 1..100)) {
        let (calls, mut animation) = counting_loop();
        let mut source = ManualFrameSource::with_intervals(gaps.iter().map(|&g| Duration::from_millis(g)));
        let dispatched = animation.run(&mut source);

        let short: Vec<u64> = gaps.iter().skip(1).copied().filter(|&g| g < 100).collect();
        prop_assert_eq!(dispatched, short.len() as u64);
        prop_assert_eq!(calls.get(), dispatched);
        prop_assert_eq!(animation.elapsed(), Duration::from_millis(short.iter().sum()));
    }
}
