//! Per-frame motion: eased scrolls, deceleration and toggle decay.

use super::carousel::Carousel;
use super::constants::{FLOAT_ERROR_MARGIN, MAX_TOGGLE_DURATION, SCROLL_DURATION, SNAP_DURATION};
use super::host::{CarouselHost, FrameScheduler, ManualClock};
use super::scroll_state::{rounding_remainder, Motion};
use tracing::{debug, trace};

impl<D: CarouselHost, S: FrameScheduler> Carousel<D, S> {
    /// Advance all running motion to the scheduler's current time.
    ///
    /// Call once per frame while the scheduler is running. Stops the scheduler
    /// once nothing is left to animate.
    pub fn tick(&mut self) {
        let now = self.scheduler.now();
        match self.state.motion {
            Motion::Scrolling(animation) => {
                self.state.offset = animation.eased_offset(now);
                trace!(offset = self.state.offset, "Scroll frame");
                self.update(now);
                if animation.progress(now) >= 1.0 && self.state.is_scrolling() {
                    self.state.motion = Motion::Idle;
                    debug!(offset = self.state.offset, "Animated scroll finished");
                    self.host.did_end_scrolling();
                }
            }
            Motion::Decelerating(animation) => {
                self.state.offset = animation.decelerated_offset(now);
                trace!(offset = self.state.offset, "Deceleration frame");
                self.update(now);
                if animation.deceleration_finished(now) && self.state.is_decelerating() {
                    self.state.motion = Motion::Idle;
                    self.finish_deceleration(now);
                }
            }
            Motion::Idle | Motion::Dragging => {
                if self.state.toggle().abs() > FLOAT_ERROR_MARGIN {
                    self.state.decay_toggle(now);
                    trace!(toggle = self.state.toggle(), "Toggle frame");
                    self.update(now);
                } else if !self.state.is_dragging() {
                    trace!("Nothing to animate, stopping scheduler");
                    self.scheduler.stop();
                }
            }
        }
    }

    /// Settle after coasting: bounce back into range, or snap to the nearest
    /// item.
    fn finish_deceleration(&mut self, now: f64) {
        let Some(current) = self.current_item_index() else {
            return;
        };

        if self.state.is_out_of_bounds() {
            let duration = if (self.state.offset() - current as f64).abs() < FLOAT_ERROR_MARGIN {
                SNAP_DURATION
            } else {
                SCROLL_DURATION
            };
            debug!(current, duration, "Deceleration overshot, returning");
            self.scroll_to_index(current as i64, duration);
            return;
        }

        let diff = rounding_remainder(self.state.offset());
        self.state
            .arm_toggle(-diff, now - MAX_TOGGLE_DURATION * diff.abs());
        let target = (current as f64 + diff).round() as i64;
        debug!(current, target, "Deceleration finished, snapping");
        self.scroll_to_index(target, SCROLL_DURATION);
    }
}

impl<D: CarouselHost> Carousel<D, ManualClock> {
    /// Drive a manually clocked carousel until it stops requesting frames.
    ///
    /// Advances the clock by `frame_interval` before each tick. Returns the
    /// number of ticks delivered, at most `max_frames`.
    pub fn run_until_idle(&mut self, frame_interval: f64, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.scheduler.is_running() && frames < max_frames {
            self.scheduler.advance(frame_interval);
            self.tick();
            frames += 1;
        }
        frames
    }

    /// Advance the clock by `seconds`, ticking every `frame_interval`
    /// whether or not frames were requested.
    pub fn advance_for(&mut self, seconds: f64, frame_interval: f64) -> usize {
        if !(frame_interval > 0.0) {
            return 0;
        }
        let frames = (seconds / frame_interval).ceil().max(0.0) as usize;
        for _ in 0..frames {
            self.scheduler.advance(frame_interval);
            if self.scheduler.is_running() {
                self.tick();
            }
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CarouselConfig;
    use crate::engine::scroll_state::Phase;
    use crate::test_harness::{carousel, FRAME};

    #[test]
    fn animated_scroll_eases_to_target_and_stops() {
        let mut c = carousel(10, CarouselConfig::default());
        c.scroll_to_item(3, true).unwrap();
        assert_eq!(c.phase(), Phase::AnimatingScroll);
        assert!(c.scheduler().is_running());

        c.run_until_idle(FRAME, 1_000);

        assert_eq!(c.scroll_offset(), 3.0);
        assert_eq!(c.current_item_index(), Some(3));
        assert_eq!(c.phase(), Phase::Idle);
        assert!(!c.scheduler().is_running());
    }

    #[test]
    fn scroll_emits_begin_and_end_once() {
        let mut c = carousel(10, CarouselConfig::default());
        c.host_mut().take_events();
        c.scroll_to_item(2, true).unwrap();
        c.run_until_idle(FRAME, 1_000);

        let names = c.host().event_names();
        assert_eq!(names.iter().filter(|n| **n == "will_begin_scrolling").count(), 1);
        assert_eq!(names.iter().filter(|n| **n == "did_end_scrolling").count(), 1);
        assert_eq!(names.first(), Some(&"will_begin_scrolling_to"));
    }

    #[test]
    fn passing_items_arms_the_toggle() {
        let mut c = carousel(10, CarouselConfig::default());
        c.scroll_to_item(1, true).unwrap();
        c.advance_for(0.3, FRAME);
        assert!(c.toggle() < 0.0, "forward moves arm a negative toggle");

        c.run_until_idle(FRAME, 1_000);
        assert_eq!(c.toggle(), 0.0);
    }

    #[test]
    fn deceleration_snaps_to_an_item() {
        let mut c = carousel(20, CarouselConfig::default());
        c.begin_drag();
        c.drag_changed(-30.0, -900.0);
        c.end_drag();
        assert_eq!(c.phase(), Phase::Decelerating);

        c.run_until_idle(FRAME, 10_000);

        let offset = c.scroll_offset();
        assert!((offset - offset.round()).abs() < 1e-9, "rests on an item: {offset}");
        assert!(offset > 1.0, "coasted forward: {offset}");
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn tick_without_motion_stops_scheduler() {
        let mut c = carousel(5, CarouselConfig::default());
        c.scroll_by_offset(0.0, 0.4);
        c.run_until_idle(FRAME, 1_000);
        c.tick();
        assert!(!c.scheduler().is_running());
    }
}
