//! Gesture interpretation: drag, tap and swipe.
//!
//! Each handler checks its enable flag and the item count first and silently
//! ignores input it cannot act on.

use super::carousel::Carousel;
use super::constants::{FLOAT_ERROR_MARGIN, SCROLL_DURATION, SNAP_DURATION};
use super::host::{CarouselHost, FrameScheduler};
use crate::model::{CarouselError, GestureInput, SwipeDirection};
use tracing::debug;

impl<D: CarouselHost, S: FrameScheduler> Carousel<D, S> {
    /// Feed one host gesture event.
    ///
    /// # Errors
    ///
    /// Only taps can fail; see [`tap`](Self::tap).
    pub fn handle_gesture(&mut self, input: GestureInput) -> Result<(), CarouselError> {
        match input {
            GestureInput::DragBegan => self.begin_drag(),
            GestureInput::DragChanged {
                translation_delta,
                velocity,
            } => self.drag_changed(translation_delta, velocity),
            GestureInput::DragEnded => self.end_drag(),
            GestureInput::Tap(index) => return self.tap(index),
            GestureInput::Swipe(direction) => self.swipe(direction),
        }
        Ok(())
    }

    /// A pan started. Cancels any running animation.
    pub fn begin_drag(&mut self) {
        if !self.config.scroll_enabled || !self.config.pan_enabled {
            return;
        }
        if self.state.item_count() == 0 {
            return;
        }
        self.state.begin_drag();
        self.scheduler.start();
        debug!(offset = self.state.offset(), "Drag began");
    }

    /// The pan moved by `translation_delta` points at `velocity` points/s.
    pub fn drag_changed(&mut self, translation_delta: f64, velocity: f64) {
        let moved = self.state.apply_drag(
            translation_delta,
            velocity,
            self.config.item_width,
            self.config.offset_multiplier,
        );
        if moved {
            let now = self.scheduler.now();
            self.update(now);
        }
    }

    /// The pan ended. Coasts, flicks one item, or settles on the nearest one.
    ///
    /// Does nothing if no drag is active.
    pub fn end_drag(&mut self) {
        if !self.state.end_drag() {
            return;
        }
        let rate = self.config.deceleration_rate;
        debug!(
            offset = self.state.offset(),
            velocity = self.state.start_velocity(),
            "Drag ended"
        );

        if !self.config.paging && self.state.should_decelerate(rate) {
            let now = self.scheduler.now();
            if self.state.start_deceleration(now, rate) {
                self.scheduler.start();
                return;
            }
        }

        let Some(current) = self.current_item_index() else {
            return;
        };
        let offset = self.state.offset();
        if self.state.is_out_of_bounds() && (offset - current as f64).abs() < FLOAT_ERROR_MARGIN {
            self.scroll_to_index(current as i64, SNAP_DURATION);
        } else if self.state.should_scroll() {
            let direction = self.state.start_velocity().signum() as i64;
            self.scroll_to_index(current as i64 + direction, SCROLL_DURATION);
        } else {
            self.scroll_to_index(current as i64, SCROLL_DURATION);
        }
    }

    /// A tap on `index`, or on empty space when `None`.
    ///
    /// Selecting a non-current item scrolls to it first. Empty-space taps
    /// re-centre the current item. Taps during a drag are ignored.
    ///
    /// # Errors
    ///
    /// [`CarouselError::OutOfRange`] when `index >= item_count`.
    pub fn tap(&mut self, index: Option<usize>) -> Result<(), CarouselError> {
        let count = self.state.item_count();
        if !self.config.tap_enabled || count == 0 {
            return Ok(());
        }

        match index {
            Some(index) if index >= count => Err(CarouselError::OutOfRange { index, count }),
            _ if self.state.is_dragging() => {
                debug!(?index, "Tap ignored while dragging");
                Ok(())
            }
            Some(index) => {
                if !self.host.should_select(index) {
                    debug!(index, "Selection vetoed by delegate");
                    return Ok(());
                }
                if self.current_item_index() != Some(index) {
                    self.scroll_to_index(index as i64, SCROLL_DURATION);
                }
                self.host.did_select(index);
                Ok(())
            }
            None => {
                if let Some(current) = self.current_item_index() {
                    self.scroll_to_index(current as i64, SCROLL_DURATION);
                }
                Ok(())
            }
        }
    }

    /// A swipe. Moves one item unless a drag or an animation is in progress.
    pub fn swipe(&mut self, direction: SwipeDirection) {
        if !self.config.swipe_enabled || !self.config.scroll_enabled {
            return;
        }
        if self.state.item_count() <= 1 {
            return;
        }
        if self.state.is_dragging() {
            debug!(?direction, "Swipe ignored while dragging");
            return;
        }
        if self.state.is_scrolling() || self.state.is_decelerating() {
            debug!(?direction, "Swipe ignored while animating");
            return;
        }
        let Some(current) = self.current_item_index() else {
            return;
        };
        debug!(?direction, current, "Swipe");
        self.scroll_to_index(current as i64 + direction.step(), SCROLL_DURATION);
    }
}

impl<D, S> Carousel<D, S>
where
    D: CarouselHost,
    D::Slot: PartialEq,
    S: FrameScheduler,
{
    /// A tap resolved against a materialized slot.
    ///
    /// # Errors
    ///
    /// Never fails in practice: a matched slot always has a valid index.
    pub fn tap_slot(&mut self, slot: &D::Slot) -> Result<(), CarouselError> {
        let index = self.index_of_slot(slot);
        self.tap(index)
    }
}

#[cfg(test)]
#[path = "gesture_tests.rs"]
mod tests;
