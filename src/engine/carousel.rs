//! The carousel facade.
//!
//! [`Carousel`] owns the scroll state, the slot cache, the host and the frame
//! scheduler. This file holds construction, data changes, the programmatic
//! scroll API and the per-update pass; frame ticks live in `motion.rs` and
//! gesture handling in `gesture.rs`.

use super::constants::{FLOAT_ERROR_MARGIN, SCROLL_DURATION};
use super::host::{CarouselHost, FrameScheduler};
use super::index_math::{clamped_index, min_scroll_distance, min_scroll_distance_f, offset_for_item};
use super::item_cache::ItemCache;
use super::layout;
use super::scroll_state::{Phase, ScrollState};
use crate::config::CarouselConfig;
use crate::model::{CarouselError, ItemTransform};
use tracing::{debug, trace};

/// Scroll-state engine for one carousel control.
pub struct Carousel<D: CarouselHost, S: FrameScheduler> {
    pub(crate) host: D,
    pub(crate) scheduler: S,
    pub(crate) base_config: CarouselConfig,
    pub(crate) config: CarouselConfig,
    pub(crate) visible_count: usize,
    pub(crate) state: ScrollState,
    pub(crate) cache: ItemCache<D::Slot>,
}

impl<D: CarouselHost, S: FrameScheduler> Carousel<D, S> {
    /// Build a carousel and load the host's items.
    pub fn new(host: D, scheduler: S, config: CarouselConfig) -> Self {
        let mut carousel = Self {
            host,
            scheduler,
            config: config.clone(),
            base_config: config,
            visible_count: 0,
            state: ScrollState::new(),
            cache: ItemCache::new(),
        };
        carousel.reload();
        carousel
    }

    // ===== Accessors =====

    /// The host.
    pub fn host(&self) -> &D {
        &self.host
    }

    /// The host, mutably. Call [`reload`](Self::reload) after changing items.
    pub fn host_mut(&mut self) -> &mut D {
        &mut self.host
    }

    /// The frame scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Options in effect after the last layout pass.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Options before delegate overrides.
    pub fn base_config(&self) -> &CarouselConfig {
        &self.base_config
    }

    /// Scroll position and motion state.
    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.state.item_count()
    }

    /// Index of the item nearest the scroll offset.
    pub fn current_item_index(&self) -> Option<usize> {
        self.state.current_item_index()
    }

    /// Continuous scroll offset in item units.
    pub fn scroll_offset(&self) -> f64 {
        self.state.offset()
    }

    /// Current motion phase.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Toggle overlay value.
    pub fn toggle(&self) -> f64 {
        self.state.toggle()
    }

    /// Size of the visible window resolved in the last layout pass.
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Materialized indices in ascending order.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.cache.indices().collect()
    }

    /// Slot materialized for `index`.
    pub fn slot(&self, index: usize) -> Option<&D::Slot> {
        self.cache.get(index)
    }

    /// Slot for the current item.
    pub fn current_slot(&self) -> Option<&D::Slot> {
        self.current_item_index().and_then(|index| self.cache.get(index))
    }

    /// Number of evicted slots waiting for reuse.
    pub fn pooled_slots(&self) -> usize {
        self.cache.pool_len()
    }

    /// Take back every pooled slot.
    pub fn drain_pool(&mut self) -> Vec<D::Slot> {
        self.cache.drain_pool()
    }

    /// Render parameters for every materialized item, by ascending index.
    pub fn transforms(&self) -> Vec<ItemTransform> {
        let count = self.state.item_count();
        let current = self.current_item_index();
        self.cache
            .indices()
            .map(|index| {
                let offset =
                    offset_for_item(index as i64, self.state.offset(), count, self.config.wrap);
                let spacing = self.host.spacing_for_offset(offset);
                ItemTransform {
                    index,
                    offset,
                    translation: offset * self.config.item_width * spacing,
                    alpha: layout::alpha_for_offset(offset, &self.config),
                    scale: layout::scale_for_offset(offset, &self.config),
                    is_current: current == Some(index),
                }
            })
            .collect()
    }

    // ===== Data changes =====

    /// Drop every slot, re-read the item count and jump to the starting index.
    pub fn reload(&mut self) {
        self.scheduler.stop();
        self.cache.clear();
        let count = self.host.item_count();
        self.state.reset(count);
        self.resolve_layout();
        debug!(count, visible = self.visible_count, "Reloaded carousel");

        if count == 0 {
            return;
        }
        let start = self.host.starting_index().min(count - 1);
        self.scroll_to_index(start as i64, 0.0);
        let now = self.scheduler.now();
        self.update(now);
    }

    /// Insert an item at `index`, shifting later items up.
    ///
    /// The current item stays current: when the insertion lands at or before
    /// it, the offset moves up by one. A wrapping offset past the last item
    /// is carried across the seam as well.
    ///
    /// # Errors
    ///
    /// [`CarouselError::OutOfRange`] when `index > item_count`.
    pub fn insert_item(&mut self, index: usize, animated: bool) -> Result<(), CarouselError> {
        let count = self.state.item_count();
        if index > count {
            return Err(CarouselError::OutOfRange { index, count });
        }

        let current = self.current_item_index();
        let laps = self.state.laps();
        self.cache.insert_at(index);
        self.state.item_count = count + 1;
        self.resolve_layout();
        if let Some(current) = current {
            self.state.shift(i64::from(index <= current), laps);
        }
        debug!(index, count = count + 1, "Inserted item");

        self.host.did_insert_item(index, animated);
        let now = self.scheduler.now();
        self.update(now);
        Ok(())
    }

    /// Remove the item at `index`, shifting later items down.
    ///
    /// The removed slot goes to the pool. An empty carousel ignores the call.
    ///
    /// # Errors
    ///
    /// [`CarouselError::OutOfRange`] when `index >= item_count`.
    pub fn remove_item(&mut self, index: usize, animated: bool) -> Result<(), CarouselError> {
        let count = self.state.item_count();
        if count == 0 {
            return Ok(());
        }
        if index >= count {
            return Err(CarouselError::OutOfRange { index, count });
        }

        let current = self.current_item_index();
        let laps = self.state.laps();
        self.cache.remove_at(index);
        self.state.item_count = count - 1;
        self.resolve_layout();
        debug!(index, count = count - 1, "Removed item");

        if count == 1 {
            self.state.reset(0);
            self.scheduler.stop();
            self.host.did_remove_item(index, animated);
            return Ok(());
        }

        match current {
            Some(current) if index < current => self.state.shift(-1, -laps),
            Some(current) if index == current => {
                // The next item slides into the current position
                self.state.previous_item_index = None;
                self.state.shift(0, -laps);
            }
            Some(_) => self.state.shift(0, -laps),
            None => {}
        }
        self.state.cancel_animation();
        if let Some(current) = self.current_item_index() {
            if !self.state.is_dragging() {
                self.state.offset = current as f64;
            }
        }

        self.host.did_remove_item(index, animated);
        let now = self.scheduler.now();
        self.update(now);
        Ok(())
    }

    /// Re-materialize the slot for `index`, offering the old slot for reuse.
    ///
    /// Does nothing when `index` is not materialized.
    ///
    /// # Errors
    ///
    /// [`CarouselError::OutOfRange`] when `index >= item_count`.
    pub fn reload_item(&mut self, index: usize) -> Result<(), CarouselError> {
        let count = self.state.item_count();
        if count == 0 {
            return Ok(());
        }
        if index >= count {
            return Err(CarouselError::OutOfRange { index, count });
        }
        let host = &mut self.host;
        if self
            .cache
            .rematerialize(index, |index, reuse| host.materialize(index, reuse))
        {
            trace!(index, "Reloaded item slot");
        }
        Ok(())
    }

    // ===== Layout =====

    /// Re-resolve options and the visible window.
    ///
    /// When at rest between items, settles animated onto the current item.
    pub fn layout(&mut self) {
        self.resolve_layout();
        self.state.previous_offset = self.state.offset();

        let at_rest = !self.state.is_dragging()
            && !self.state.is_scrolling()
            && !self.state.is_decelerating();
        if at_rest {
            if let Some(current) = self.current_item_index() {
                if (self.state.offset() - current as f64).abs() > FLOAT_ERROR_MARGIN {
                    self.scroll_to_index(current as i64, SCROLL_DURATION);
                }
            }
        }

        let now = self.scheduler.now();
        self.update(now);
    }

    /// Change the viewport width and lay out again.
    pub fn set_viewport_width(&mut self, width: f64) {
        self.base_config.viewport_width = width.max(0.0);
        self.layout();
    }

    /// Replace the base options and lay out again.
    pub fn set_config(&mut self, config: CarouselConfig) {
        self.base_config = config;
        self.layout();
    }

    pub(crate) fn resolve_layout(&mut self) {
        self.config = layout::resolve_config(&self.base_config, &self.host);
        self.visible_count = layout::resolve_visible_count(&self.config, &self.host);
        self.state.wrap = self.config.wrap;
        self.state.bounce = self.config.bounce;
    }

    // ===== Programmatic scrolling =====

    /// Jump to `index` without animation.
    ///
    /// # Errors
    ///
    /// [`CarouselError::OutOfRange`] when `index >= item_count`.
    pub fn set_current_item(&mut self, index: usize) -> Result<(), CarouselError> {
        self.check_index(index)?;
        if self.state.item_count() > 0 {
            self.set_offset(index as f64);
        }
        Ok(())
    }

    /// Scroll to `index`, animated over the default duration or instantly.
    ///
    /// # Errors
    ///
    /// [`CarouselError::OutOfRange`] when `index >= item_count`.
    pub fn scroll_to_item(&mut self, index: usize, animated: bool) -> Result<(), CarouselError> {
        let duration = if animated { SCROLL_DURATION } else { 0.0 };
        self.scroll_to_item_with_duration(index, duration)
    }

    /// Scroll to `index` over `duration` seconds (0 jumps).
    ///
    /// # Errors
    ///
    /// [`CarouselError::OutOfRange`] when `index >= item_count`.
    pub fn scroll_to_item_with_duration(
        &mut self,
        index: usize,
        duration: f64,
    ) -> Result<(), CarouselError> {
        self.check_index(index)?;
        if self.state.item_count() > 0 {
            self.scroll_to_index(index as i64, duration);
        }
        Ok(())
    }

    /// Scroll by `items` whole items, landing on an integer offset.
    pub fn scroll_by_items(&mut self, items: i64, duration: f64) {
        let count = self.state.item_count();
        if count == 0 {
            return;
        }
        if duration > 0.0 {
            let offset = self.state.offset();
            let delta = match items {
                n if n > 0 => offset.floor() + n as f64 - offset,
                n if n < 0 => offset.ceil() + n as f64 - offset,
                _ => offset.round() - offset,
            };
            self.scroll_by_offset(delta, duration);
        } else {
            let base = self
                .state
                .previous_item_index
                .or_else(|| self.current_item_index())
                .unwrap_or(0) as i64;
            if let Some(target) = clamped_index(base + items, count, self.config.wrap) {
                self.set_offset(target as f64);
            }
        }
    }

    /// Scroll to the continuous `offset` along the shortest path.
    pub fn scroll_to_offset(&mut self, offset: f64, duration: f64) {
        let delta = min_scroll_distance_f(
            self.state.offset(),
            offset,
            self.state.item_count(),
            self.config.wrap,
        );
        self.scroll_by_offset(delta, duration);
    }

    /// Scroll by `delta` items. A non-positive duration jumps.
    ///
    /// Ignored while the user is dragging.
    pub fn scroll_by_offset(&mut self, delta: f64, duration: f64) {
        if self.state.item_count() == 0 {
            return;
        }
        if duration > 0.0 {
            if self.state.is_dragging() {
                debug!(delta, "Ignoring animated scroll during drag");
                return;
            }
            let now = self.scheduler.now();
            self.state.start_scroll(now, delta, duration);
            debug!(delta, duration, "Animated scroll started");
            self.host.will_begin_scrolling();
            self.scheduler.start();
        } else {
            let target = self.state.offset() + delta;
            self.set_offset(target);
        }
    }

    pub(crate) fn scroll_to_index(&mut self, index: i64, duration: f64) {
        let count = self.state.item_count();
        let Some(target) = clamped_index(index, count, self.config.wrap) else {
            return;
        };
        self.host.will_begin_scrolling_to(target as usize);
        self.scroll_to_offset(target as f64, duration);
    }

    /// Set the offset directly, cancelling any timed animation.
    pub(crate) fn set_offset(&mut self, offset: f64) {
        self.state.cancel_animation();
        if (self.state.offset() - offset).abs() > 0.0 {
            self.state.offset = offset;
            let now = self.scheduler.now();
            self.update(now);
        }
    }

    fn check_index(&self, index: usize) -> Result<(), CarouselError> {
        let count = self.state.item_count();
        if count > 0 && index >= count {
            return Err(CarouselError::OutOfRange { index, count });
        }
        Ok(())
    }

    // ===== Update pass =====

    /// Run after every offset change: bound the offset, arm the toggle,
    /// refresh the window and notify.
    pub(crate) fn update(&mut self, now: f64) {
        let count = self.state.item_count();
        if count == 0 {
            self.state.offset = 0.0;
            return;
        }

        self.state.bound_offset();
        let Some(current) = self.current_item_index() else {
            return;
        };

        if let Some(previous) = self.state.previous_item_index {
            let diff = min_scroll_distance(current as i64, previous as i64, count, self.config.wrap);
            if diff != 0 {
                self.state.arm_toggle(diff as f64, now);
                self.scheduler.start();
            }
        }

        self.refresh_visible(current);

        if (self.state.offset() - self.state.previous_offset).abs() > FLOAT_ERROR_MARGIN {
            self.host.did_scroll();
        }
        if self.state.previous_item_index != Some(current) {
            debug!(current, "Current item changed");
            self.host.current_item_changed(current);
        }

        self.state.previous_offset = self.state.offset();
        self.state.previous_item_index = Some(current);
    }

    fn refresh_visible(&mut self, current: usize) {
        let count = self.state.item_count();
        let offset = self.state.offset();
        let config = &self.config;
        let visible = layout::visible_indices(current, count, self.visible_count, config.wrap, |index| {
            let item_offset = offset_for_item(index as i64, offset, count, config.wrap);
            layout::alpha_for_offset(item_offset, config) != 0.0
        });

        let host = &mut self.host;
        let (evicted, created) = self
            .cache
            .sync_visible(&visible, |index, reuse| host.materialize(index, reuse));
        if evicted > 0 || created > 0 {
            trace!(evicted, created, visible = visible.len(), "Visible window changed");
        }
    }
}

impl<D, S> Carousel<D, S>
where
    D: CarouselHost,
    D::Slot: PartialEq,
    S: FrameScheduler,
{
    /// Index whose materialized slot equals `slot`.
    pub fn index_of_slot(&self, slot: &D::Slot) -> Option<usize> {
        self.cache
            .iter()
            .find(|(_, candidate)| *candidate == slot)
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
#[path = "carousel_tests.rs"]
mod tests;
