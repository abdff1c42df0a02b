//! Scroll position and motion state.
//!
//! [`ScrollState`] is plain data plus the arithmetic that acts on it. It never
//! touches the host or the clock; the [`Carousel`](super::Carousel) passes the
//! current time in and reacts to what comes back.

use super::constants::{
    BOUNCE_DISTANCE, DECELERATE_THRESHOLD, DECELERATION_MULTIPLIER, FLOAT_ERROR_MARGIN,
    MAX_TOGGLE_DURATION, MIN_TOGGLE_DURATION, SCROLL_DISTANCE_THRESHOLD, SCROLL_SPEED,
    SCROLL_SPEED_THRESHOLD,
};
use super::easing::ease_in_out;
use super::index_math::{clamped_index, clamped_offset};
use serde::Serialize;

/// What the carousel is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing moves.
    Idle,
    /// The user is dragging.
    Dragging,
    /// A timed, eased scroll is running.
    AnimatingScroll,
    /// A released drag is coasting to a stop.
    Decelerating,
    /// At rest, but the toggle overlay is still decaying.
    Toggling,
}

/// One timed offset animation.
///
/// Shared by eased scrolls and decelerations. `velocity` is only meaningful for
/// the latter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    /// Offset when the animation began.
    pub start_offset: f64,
    /// Offset the animation ends on.
    pub end_offset: f64,
    /// Clock time when the animation began.
    pub start_time: f64,
    /// Length in seconds.
    pub duration: f64,
    /// Release velocity in items per second.
    pub velocity: f64,
}

impl ScrollAnimation {
    fn elapsed(&self, now: f64) -> f64 {
        (now - self.start_time).clamp(0.0, self.duration.max(0.0))
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed(now) / self.duration
        }
    }

    /// Eased offset at `now`.
    pub fn eased_offset(&self, now: f64) -> f64 {
        let t = self.progress(now);
        self.start_offset + (self.end_offset - self.start_offset) * ease_in_out(t)
    }

    /// Offset at `now` under constant deceleration to rest at `duration`.
    pub fn decelerated_offset(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return self.end_offset;
        }
        let t = self.elapsed(now);
        let acceleration = -self.velocity / self.duration;
        self.start_offset + self.velocity * t + 0.5 * acceleration * t * t
    }

    /// Whether a deceleration has reached its duration.
    pub fn deceleration_finished(&self, now: f64) -> bool {
        (self.elapsed(now) - self.duration).abs() < FLOAT_ERROR_MARGIN
    }
}

/// Primary motion. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Motion {
    Idle,
    Dragging,
    Scrolling(ScrollAnimation),
    Decelerating(ScrollAnimation),
}

/// Scroll position, motion phase and toggle overlay.
#[derive(Debug, Clone)]
pub struct ScrollState {
    pub(crate) item_count: usize,
    pub(crate) wrap: bool,
    pub(crate) bounce: bool,
    pub(crate) offset: f64,
    pub(crate) previous_offset: f64,
    pub(crate) previous_item_index: Option<usize>,
    pub(crate) motion: Motion,
    pub(crate) drag_translation: f64,
    pub(crate) start_velocity: f64,
    pub(crate) toggle: f64,
    pub(crate) toggle_start_time: f64,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            item_count: 0,
            wrap: true,
            bounce: true,
            offset: 0.0,
            previous_offset: 0.0,
            previous_item_index: None,
            motion: Motion::Idle,
            drag_translation: 0.0,
            start_velocity: 0.0,
            toggle: 0.0,
            toggle_start_time: 0.0,
        }
    }
}

impl ScrollState {
    /// Empty state: no items, offset zero, idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Continuous scroll offset in item units.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Whether the sequence is circular.
    pub fn wraps(&self) -> bool {
        self.wrap
    }

    /// Last release velocity in items per second.
    pub fn start_velocity(&self) -> f64 {
        self.start_velocity
    }

    /// Toggle overlay value in `[-1, 1]`.
    pub fn toggle(&self) -> f64 {
        self.toggle
    }

    /// Accumulated drag translation in points since the drag began.
    pub fn drag_translation(&self) -> f64 {
        self.drag_translation
    }

    /// Running animation, if any.
    pub fn animation(&self) -> Option<ScrollAnimation> {
        match self.motion {
            Motion::Scrolling(animation) | Motion::Decelerating(animation) => Some(animation),
            Motion::Idle | Motion::Dragging => None,
        }
    }

    /// Current motion phase.
    pub fn phase(&self) -> Phase {
        match self.motion {
            Motion::Dragging => Phase::Dragging,
            Motion::Scrolling(_) => Phase::AnimatingScroll,
            Motion::Decelerating(_) => Phase::Decelerating,
            Motion::Idle if self.toggle.abs() > FLOAT_ERROR_MARGIN => Phase::Toggling,
            Motion::Idle => Phase::Idle,
        }
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.motion, Motion::Dragging)
    }

    /// Whether an eased scroll is running.
    pub fn is_scrolling(&self) -> bool {
        matches!(self.motion, Motion::Scrolling(_))
    }

    /// Whether a deceleration is running.
    pub fn is_decelerating(&self) -> bool {
        matches!(self.motion, Motion::Decelerating(_))
    }

    /// Index of the item nearest the offset, `None` when empty.
    pub fn current_item_index(&self) -> Option<usize> {
        clamped_index(self.offset.round() as i64, self.item_count, self.wrap).map(|i| i as usize)
    }

    /// Offset folded (wrap) or clamped (no wrap) into the valid item range.
    pub fn clamped_offset(&self) -> Option<f64> {
        clamped_offset(self.offset, self.item_count, self.wrap)
    }

    /// Whether the offset lies in the rubber-band zone.
    pub fn is_out_of_bounds(&self) -> bool {
        self.clamped_offset()
            .is_some_and(|clamped| (self.offset - clamped).abs() > FLOAT_ERROR_MARGIN)
    }

    /// Highest offset a non-wrapping carousel may reach.
    fn max_offset(&self) -> f64 {
        self.item_count.saturating_sub(1) as f64
    }

    /// Bring the offset back into its legal range.
    ///
    /// Wrapping or non-bouncing carousels clamp to the item range. Bouncing
    /// carousels may overshoot by [`BOUNCE_DISTANCE`]; hitting that limit
    /// kills the release velocity.
    pub(crate) fn bound_offset(&mut self) {
        if self.item_count == 0 {
            self.offset = 0.0;
            return;
        }
        if self.wrap || !self.bounce {
            if let Some(clamped) = self.clamped_offset() {
                self.offset = clamped;
            }
            return;
        }
        let min = -BOUNCE_DISTANCE;
        let max = self.max_offset() + BOUNCE_DISTANCE;
        if self.offset < min || self.offset > max {
            self.offset = self.offset.clamp(min, max);
            self.start_velocity = 0.0;
        }
    }

    /// Drag resistance in `[0, 1]`: 1 in range, falling to 0 at the bounce limit.
    pub fn rubber_band_factor(&self) -> f64 {
        if self.wrap || !self.bounce {
            return 1.0;
        }
        let overshoot = self
            .clamped_offset()
            .map_or(0.0, |clamped| (self.offset - clamped).abs());
        1.0 - overshoot.min(BOUNCE_DISTANCE) / BOUNCE_DISTANCE
    }

    /// Distance (items) a release at the current velocity would coast.
    pub fn deceleration_distance(&self, deceleration_rate: f64) -> f64 {
        let velocity = self.start_velocity;
        let acceleration = -velocity * DECELERATION_MULTIPLIER * (1.0 - deceleration_rate);
        if velocity == 0.0 || acceleration == 0.0 {
            return 0.0;
        }
        -(velocity * velocity) / (2.0 * acceleration)
    }

    /// Whether a release should coast.
    pub fn should_decelerate(&self, deceleration_rate: f64) -> bool {
        self.start_velocity.abs() > SCROLL_SPEED_THRESHOLD
            && self.deceleration_distance(deceleration_rate).abs() > DECELERATE_THRESHOLD
    }

    /// Whether a release was a flick that should advance one item.
    pub fn should_scroll(&self) -> bool {
        self.start_velocity.abs() > SCROLL_SPEED_THRESHOLD
            && self.current_item_index().is_some_and(|current| {
                (self.offset - current as f64).abs() > SCROLL_DISTANCE_THRESHOLD
            })
    }

    pub(crate) fn begin_drag(&mut self) {
        self.motion = Motion::Dragging;
        self.drag_translation = 0.0;
    }

    /// Apply one drag report. Returns `false` when no drag is active.
    pub(crate) fn apply_drag(
        &mut self,
        translation_delta: f64,
        velocity: f64,
        item_width: f64,
        offset_multiplier: f64,
    ) -> bool {
        if !self.is_dragging() || !(item_width > 0.0) {
            return false;
        }
        let factor = self.rubber_band_factor();
        self.start_velocity = -velocity * factor * SCROLL_SPEED / item_width;
        self.offset -= translation_delta * factor * offset_multiplier / item_width;
        self.drag_translation += translation_delta;
        true
    }

    /// Leave the dragging phase. Returns `false` when no drag was active.
    pub(crate) fn end_drag(&mut self) -> bool {
        if self.is_dragging() {
            self.motion = Motion::Idle;
            true
        } else {
            false
        }
    }

    /// Begin an eased scroll by `delta`. Non-wrapping targets are clamped.
    pub(crate) fn start_scroll(&mut self, now: f64, delta: f64, duration: f64) {
        let mut end_offset = self.offset + delta;
        if !self.wrap {
            end_offset = clamped_offset(end_offset, self.item_count, false).unwrap_or(0.0);
        }
        self.motion = Motion::Scrolling(ScrollAnimation {
            start_offset: self.offset,
            end_offset,
            start_time: now,
            duration,
            velocity: 0.0,
        });
    }

    /// Begin coasting at the current velocity.
    ///
    /// Returns `false` (leaving the state idle) when the projected distance is
    /// zero after clamping.
    pub(crate) fn start_deceleration(&mut self, now: f64, deceleration_rate: f64) -> bool {
        let velocity = self.start_velocity;
        let mut end_offset = self.offset + self.deceleration_distance(deceleration_rate);
        if !self.wrap {
            end_offset = if self.bounce {
                end_offset.clamp(-BOUNCE_DISTANCE, self.max_offset() + BOUNCE_DISTANCE)
            } else {
                clamped_offset(end_offset, self.item_count, false).unwrap_or(0.0)
            };
        }
        let distance = end_offset - self.offset;
        if distance == 0.0 || velocity == 0.0 {
            return false;
        }
        self.motion = Motion::Decelerating(ScrollAnimation {
            start_offset: self.offset,
            end_offset,
            start_time: now,
            duration: (distance / (0.5 * velocity)).abs(),
            velocity,
        });
        true
    }

    /// Cancel any timed animation. Dragging is left alone.
    pub(crate) fn cancel_animation(&mut self) {
        if !self.is_dragging() {
            self.motion = Motion::Idle;
        }
    }

    /// Arm the toggle overlay.
    pub(crate) fn arm_toggle(&mut self, value: f64, start_time: f64) {
        self.toggle = value.clamp(-1.0, 1.0);
        self.toggle_start_time = start_time;
    }

    /// Toggle decay duration: slower releases decay more slowly.
    pub fn toggle_duration(&self) -> f64 {
        let speed = self.start_velocity.abs();
        let factor = if speed != 0.0 {
            (1.0 / speed).clamp(0.0, 1.0)
        } else {
            1.0
        };
        MIN_TOGGLE_DURATION + (MAX_TOGGLE_DURATION - MIN_TOGGLE_DURATION) * factor
    }

    /// Advance the toggle overlay towards zero.
    pub(crate) fn decay_toggle(&mut self, now: f64) {
        let t = ((now - self.toggle_start_time) / self.toggle_duration()).clamp(0.0, 1.0);
        let eased = ease_in_out(t);
        self.toggle = if self.toggle < 0.0 {
            eased - 1.0
        } else {
            1.0 - eased
        };
    }

    /// Complete turns a wrapping offset has made past the last item.
    ///
    /// The rounded offset is `current + laps * count`; at the seam (e.g. 4.6
    /// with five items) it is 1.
    pub(crate) fn laps(&self) -> i64 {
        if !self.wrap || self.item_count == 0 {
            return 0;
        }
        (self.offset.round() as i64).div_euclid(self.item_count as i64)
    }

    /// Renumber after an insertion or removal.
    ///
    /// The current item moved by `items`; a wrapping offset measured from
    /// past the ring end moves by `laps` more so it still rounds onto the
    /// same item under the new count. Call after `item_count` is updated.
    pub(crate) fn shift(&mut self, items: i64, laps: i64) {
        let delta = (items + laps) as f64;
        self.offset += delta;
        self.previous_offset += delta;

        let count = self.item_count as i64;
        let wrap = self.wrap;
        self.previous_item_index = self.previous_item_index.and_then(|index| {
            let shifted = index as i64 + items;
            let shifted = if wrap && count > 0 {
                shifted.rem_euclid(count)
            } else {
                shifted
            };
            usize::try_from(shifted).ok()
        });
        if let Motion::Scrolling(ref mut animation) | Motion::Decelerating(ref mut animation) =
            self.motion
        {
            animation.start_offset += delta;
            animation.end_offset += delta;
        }
    }

    /// Forget position and motion. Bounds mode is kept.
    pub(crate) fn reset(&mut self, item_count: usize) {
        *self = Self {
            item_count,
            wrap: self.wrap,
            bounce: self.bounce,
            ..Self::default()
        };
    }
}

/// Signed distance from `offset` to its nearest integer, folded into
/// `[-0.5, 0.5]`.
pub(crate) fn rounding_remainder(offset: f64) -> f64 {
    let mut diff = offset.round() - offset;
    if diff > 0.5 {
        diff -= 1.0;
    } else if diff < -0.5 {
        diff += 1.0;
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(count: usize, wrap: bool, bounce: bool) -> ScrollState {
        ScrollState {
            item_count: count,
            wrap,
            bounce,
            ..ScrollState::default()
        }
    }

    #[test]
    fn phase_reports_toggle_only_at_rest() {
        let mut s = state(5, true, true);
        assert_eq!(s.phase(), Phase::Idle);

        s.arm_toggle(0.5, 0.0);
        assert_eq!(s.phase(), Phase::Toggling);

        s.begin_drag();
        assert_eq!(s.phase(), Phase::Dragging);
    }

    #[test]
    fn current_index_wraps_and_clamps() {
        let mut s = state(5, true, true);
        s.offset = 4.6;
        assert_eq!(s.current_item_index(), Some(0));

        let mut s = state(5, false, true);
        s.offset = -0.7;
        assert_eq!(s.current_item_index(), Some(0));
        s.offset = 4.9;
        assert_eq!(s.current_item_index(), Some(4));

        assert_eq!(state(0, true, true).current_item_index(), None);
    }

    #[test]
    fn bound_offset_allows_bounce_overshoot() {
        let mut s = state(5, false, true);
        s.offset = -0.4;
        s.bound_offset();
        assert_eq!(s.offset, -0.4);

        s.offset = -3.0;
        s.start_velocity = 4.0;
        s.bound_offset();
        assert_eq!(s.offset, -1.0);
        assert_eq!(s.start_velocity, 0.0);
    }

    #[test]
    fn bound_offset_clamps_without_bounce() {
        let mut s = state(5, false, false);
        s.offset = 6.2;
        s.bound_offset();
        assert_eq!(s.offset, 4.0);
    }

    #[test]
    fn bound_offset_wraps() {
        let mut s = state(5, true, true);
        s.offset = -1.0;
        s.bound_offset();
        assert_eq!(s.offset, 4.0);
    }

    #[test]
    fn rubber_band_factor_falls_off_past_the_ends() {
        let mut s = state(5, false, true);
        assert_eq!(s.rubber_band_factor(), 1.0);
        s.offset = -0.25;
        assert!((s.rubber_band_factor() - 0.75).abs() < 1e-12);
        s.offset = 5.5;
        assert_eq!(s.rubber_band_factor(), 0.0);
    }

    #[test]
    fn drag_moves_against_translation() {
        let mut s = state(5, true, true);
        s.begin_drag();
        assert!(s.apply_drag(-50.0, -200.0, 100.0, 1.0));
        assert!((s.offset - 0.5).abs() < 1e-12);
        assert!((s.start_velocity - 2.0).abs() < 1e-12);
        assert_eq!(s.drag_translation(), -50.0);
    }

    #[test]
    fn drag_is_ignored_when_not_dragging() {
        let mut s = state(5, true, true);
        assert!(!s.apply_drag(-50.0, 0.0, 100.0, 1.0));
        assert_eq!(s.offset, 0.0);
        assert!(!s.end_drag());
    }

    #[test]
    fn deceleration_distance_is_zero_without_velocity() {
        let s = state(5, true, true);
        assert_eq!(s.deceleration_distance(0.95), 0.0);
        assert!(!s.should_decelerate(0.95));
    }

    #[test]
    fn deceleration_distance_follows_velocity_sign() {
        let mut s = state(5, true, true);
        s.start_velocity = 6.0;
        // v / (2 * 60 * 0.05) = 1.0
        assert!((s.deceleration_distance(0.95) - 1.0).abs() < 1e-9);
        s.start_velocity = -6.0;
        assert!((s.deceleration_distance(0.95) + 1.0).abs() < 1e-9);
        assert!(s.should_decelerate(0.95));
    }

    #[test]
    fn deceleration_ends_exactly_on_target() {
        let mut s = state(10, true, true);
        s.offset = 2.0;
        s.start_velocity = 6.0;
        assert!(s.start_deceleration(0.0, 0.95));
        let animation = s.animation().unwrap();
        assert!((animation.duration - 1.0 / 3.0).abs() < 1e-9);
        assert!((animation.decelerated_offset(10.0) - animation.end_offset).abs() < 1e-9);
        assert!(animation.deceleration_finished(10.0));
        assert!(!animation.deceleration_finished(0.1));
    }

    #[test]
    fn deceleration_is_clamped_to_bounce_range() {
        let mut s = state(3, false, true);
        s.offset = 1.8;
        s.start_velocity = 60.0;
        assert!(s.start_deceleration(0.0, 0.95));
        assert_eq!(s.animation().unwrap().end_offset, 3.0);
    }

    #[test]
    fn deceleration_refused_when_pinned() {
        let mut s = state(3, false, false);
        s.offset = 2.0;
        s.start_velocity = 60.0;
        assert!(!s.start_deceleration(0.0, 0.95));
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn scroll_target_is_clamped_without_wrap() {
        let mut s = state(5, false, true);
        s.offset = 3.0;
        s.start_scroll(0.0, 4.0, 0.4);
        assert_eq!(s.animation().unwrap().end_offset, 4.0);
        assert_eq!(s.phase(), Phase::AnimatingScroll);
    }

    #[test]
    fn eased_offset_hits_endpoints() {
        let animation = ScrollAnimation {
            start_offset: 1.0,
            end_offset: 3.0,
            start_time: 0.0,
            duration: 0.4,
            velocity: 0.0,
        };
        assert_eq!(animation.eased_offset(0.0), 1.0);
        assert_eq!(animation.eased_offset(0.2), 2.0);
        assert_eq!(animation.eased_offset(5.0), 3.0);
    }

    #[test]
    fn toggle_decays_to_zero() {
        let mut s = state(5, true, true);
        s.arm_toggle(-1.0, 0.0);
        s.decay_toggle(0.2);
        assert!(s.toggle() < 0.0 && s.toggle() > -1.0);
        s.decay_toggle(10.0);
        assert_eq!(s.toggle(), 0.0);
    }

    #[test]
    fn toggle_duration_shrinks_with_speed() {
        let mut s = state(5, true, true);
        assert_eq!(s.toggle_duration(), MAX_TOGGLE_DURATION);
        s.start_velocity = 1e6;
        assert!((s.toggle_duration() - MIN_TOGGLE_DURATION).abs() < 1e-6);
    }

    #[test]
    fn shift_moves_animation_with_offset() {
        let mut s = state(5, true, true);
        s.offset = 2.0;
        s.previous_item_index = Some(2);
        s.start_scroll(0.0, 1.0, 0.4);
        s.item_count = 6;
        s.shift(1, 0);
        assert_eq!(s.offset, 3.0);
        assert_eq!(s.previous_item_index, Some(3));
        let animation = s.animation().unwrap();
        assert_eq!((animation.start_offset, animation.end_offset), (3.0, 4.0));
    }

    #[test]
    fn laps_count_turns_past_the_seam() {
        let mut s = state(5, true, true);
        s.offset = 4.4;
        assert_eq!(s.laps(), 0);
        s.offset = 4.6;
        assert_eq!(s.laps(), 1);
        assert_eq!(s.current_item_index(), Some(0));

        let mut linear = state(5, false, true);
        linear.offset = 4.9;
        assert_eq!(linear.laps(), 0);
    }

    #[test]
    fn shift_past_the_seam_keeps_current_item() {
        let mut s = state(5, true, true);
        s.offset = 4.6;
        s.previous_item_index = Some(0);

        // Insert at 2 under six items: item 0 is unaffected
        let laps = s.laps();
        s.item_count = 6;
        s.shift(0, laps);
        assert!((s.offset - 5.6).abs() < 1e-9);
        assert_eq!(s.current_item_index(), Some(0));
        assert_eq!(s.previous_item_index, Some(0));
    }

    #[test]
    fn rounding_remainder_is_folded() {
        assert!((rounding_remainder(2.3) + 0.3).abs() < 1e-12);
        assert!((rounding_remainder(2.7) - 0.3).abs() < 1e-12);
        assert_eq!(rounding_remainder(4.0), 0.0);
    }

    #[test]
    fn reset_keeps_bounds_mode() {
        let mut s = state(5, false, false);
        s.offset = 3.0;
        s.arm_toggle(1.0, 0.0);
        s.reset(7);
        assert_eq!(s.item_count(), 7);
        assert_eq!(s.offset(), 0.0);
        assert_eq!(s.toggle(), 0.0);
        assert!(!s.wraps());
        assert!(!s.bounce);
    }
}
