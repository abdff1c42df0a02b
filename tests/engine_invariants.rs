//! Property-based tests for engine invariants.
//!
//! Drives a carousel over a `SimHost` and a `ManualClock` with generated
//! gestures and checks what must hold regardless of input:
//! - a drag keeps the carousel in the dragging phase until release
//! - releasing without a drag is a no-op
//! - the visible window is `min(count, visible_count)` wide and in range
//! - `scroll_to_item` lands exactly on the requested item
//! - motion is a pure function of inputs and clock
//! - a settled carousel rests on an item inside the valid range

use carousel::config::CarouselConfig;
use carousel::engine::layout::computed_visible_count;
use carousel::engine::{Carousel, ManualClock, Phase};
use carousel::sim::SimHost;
use proptest::prelude::*;

const FRAME: f64 = 1.0 / 60.0;
const MAX_FRAMES: usize = 100_000;

fn build(count: usize, wrap: bool, bounce: bool) -> Carousel<SimHost, ManualClock> {
    let config = CarouselConfig {
        wrap,
        bounce,
        ..CarouselConfig::default()
    };
    Carousel::new(SimHost::new(count), ManualClock::new(), config)
}

fn drag(c: &mut Carousel<SimHost, ManualClock>, deltas: &[f64], velocity: f64) {
    c.begin_drag();
    for delta in deltas {
        c.scheduler().advance(FRAME);
        c.drag_changed(*delta, velocity);
        c.tick();
    }
    c.end_drag();
}

// ===== Strategies =====

fn arb_deltas() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-150.0f64..150.0, 1..12)
}

fn arb_velocity() -> impl Strategy<Value = f64> {
    -4000.0f64..4000.0
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn drag_phase_persists_until_release(
        count in 1usize..40,
        wrap in any::<bool>(),
        deltas in arb_deltas(),
        velocity in arb_velocity(),
    ) {
        let mut c = build(count, wrap, true);
        c.begin_drag();
        for delta in &deltas {
            c.scheduler().advance(FRAME);
            c.drag_changed(*delta, velocity);
            c.tick();
            prop_assert_eq!(c.phase(), Phase::Dragging);
        }
        c.end_drag();
        prop_assert_ne!(c.phase(), Phase::Dragging);
    }

    #[test]
    fn release_without_drag_changes_nothing(count in 0usize..40, wrap in any::<bool>()) {
        let mut c = build(count, wrap, true);
        c.host_mut().take_events();
        let before = c.scroll_offset();

        c.end_drag();

        prop_assert_eq!(c.scroll_offset(), before);
        prop_assert!(c.host().events().is_empty());
        prop_assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn visible_window_matches_count(count in 0usize..120, wrap in any::<bool>()) {
        let c = build(count, wrap, true);
        let expected = count.min(computed_visible_count(c.config()));
        let visible = c.visible_indices();
        prop_assert_eq!(visible.len(), expected);
        prop_assert!(visible.iter().all(|index| *index < count));
    }

    #[test]
    fn scroll_to_item_lands_on_item(
        count in 1usize..60,
        target in 0usize..60,
        wrap in any::<bool>(),
    ) {
        let target = target % count;
        let mut c = build(count, wrap, true);
        c.scroll_to_item(target, true).unwrap();
        c.run_until_idle(FRAME, MAX_FRAMES);

        prop_assert_eq!(c.current_item_index(), Some(target));
        prop_assert!((c.scroll_offset() - target as f64).abs() < 1e-9);
        prop_assert_eq!(c.phase(), Phase::Idle);
        prop_assert!(c.visible_indices().contains(&target));
    }

    #[test]
    fn motion_is_deterministic(
        count in 2usize..40,
        wrap in any::<bool>(),
        deltas in arb_deltas(),
        velocity in arb_velocity(),
    ) {
        let trace = |mut c: Carousel<SimHost, ManualClock>| {
            drag(&mut c, &deltas, velocity);
            let mut offsets = vec![c.scroll_offset()];
            let mut frames = 0;
            while c.scheduler().is_running() && frames < MAX_FRAMES {
                c.scheduler().advance(FRAME);
                c.tick();
                offsets.push(c.scroll_offset());
                frames += 1;
            }
            (offsets, c.host().events().to_vec())
        };

        let first = trace(build(count, wrap, true));
        let second = trace(build(count, wrap, true));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn settled_carousel_rests_on_an_item(
        count in 1usize..40,
        wrap in any::<bool>(),
        bounce in any::<bool>(),
        deltas in arb_deltas(),
        velocity in arb_velocity(),
    ) {
        let mut c = build(count, wrap, bounce);
        drag(&mut c, &deltas, velocity);
        c.run_until_idle(FRAME, MAX_FRAMES);

        prop_assert!(!c.scheduler().is_running());
        prop_assert_eq!(c.phase(), Phase::Idle);
        let offset = c.scroll_offset();
        prop_assert!((offset - offset.round()).abs() < 1e-6, "rests between items at {}", offset);
        let upper = if wrap { count as f64 } else { (count - 1) as f64 + 1e-6 };
        prop_assert!(offset > -1e-6 && offset < upper, "offset {} outside range", offset);
    }

    #[test]
    fn insert_and_remove_keep_window_in_range(
        count in 1usize..30,
        ops in prop::collection::vec((any::<bool>(), 0usize..40), 1..20),
    ) {
        let mut c = build(count, true, true);
        for (insert, raw) in ops {
            let len = c.item_count();
            if insert {
                c.insert_item(raw % (len + 1), false).unwrap();
            } else if len > 0 {
                c.remove_item(raw % len, false).unwrap();
            }
            let len = c.item_count();
            prop_assert!(c.visible_indices().iter().all(|index| *index < len));
            prop_assert_eq!(c.visible_indices().len(), len.min(c.visible_count()));
            if len > 0 {
                prop_assert!(c.current_item_index().is_some_and(|i| i < len));
            } else {
                prop_assert_eq!(c.current_item_index(), None);
            }
        }
    }
}
