//! Host-side contracts.
//!
//! The engine never renders anything. It talks to its host through three
//! capabilities:
//!
//! - [`DataSource`]: item count, starting index, and slot materialization
//! - [`Delegate`]: option overrides, select guard, spacing, and notifications
//! - [`FrameScheduler`]: the animation clock and its start/stop control
//!
//! Every `Delegate` method has a default body, so hosts only implement what
//! they care about.

use crate::config::{OptionKey, OptionValue};
use std::cell::Cell;
use std::rc::Rc;

/// Supplies items and renderable slots.
pub trait DataSource {
    /// Opaque renderable handle. The engine never inspects it.
    type Slot;

    /// Total number of items.
    fn item_count(&self) -> usize;

    /// Item that is current right after a reload.
    fn starting_index(&self) -> usize {
        0
    }

    /// Produce a slot for `index`.
    ///
    /// `reuse` is a previously evicted slot the host may recycle. Must not
    /// call back into the engine.
    fn materialize(&mut self, index: usize, reuse: Option<Self::Slot>) -> Self::Slot;
}

/// Option overrides and event notifications.
pub trait Delegate {
    /// Override an option for the current layout pass.
    fn option_value(&self, _key: OptionKey, default: OptionValue) -> OptionValue {
        default
    }

    /// Spacing multiplier applied to an item's translation at `offset`.
    fn spacing_for_offset(&self, _offset: f64) -> f64 {
        1.0
    }

    /// Whether a tapped item may be selected.
    fn should_select(&self, _index: usize) -> bool {
        true
    }

    /// An animated scroll started.
    fn will_begin_scrolling(&mut self) {}

    /// An animated scroll finished.
    fn did_end_scrolling(&mut self) {}

    /// The offset moved.
    fn did_scroll(&mut self) {}

    /// The current item changed.
    fn current_item_changed(&mut self, _index: usize) {}

    /// A scroll towards `index` is about to start.
    fn will_begin_scrolling_to(&mut self, _index: usize) {}

    /// A tapped item was selected.
    fn did_select(&mut self, _index: usize) {}

    /// An item was inserted at `index`.
    fn did_insert_item(&mut self, _index: usize, _animated: bool) {}

    /// The item at `index` was removed.
    fn did_remove_item(&mut self, _index: usize, _animated: bool) {}
}

/// Everything the engine needs from its host.
pub trait CarouselHost: DataSource + Delegate {}

impl<T: DataSource + Delegate> CarouselHost for T {}

/// The host's animation clock.
///
/// The engine calls [`start`](Self::start) when something begins to move and
/// [`stop`](Self::stop) from `tick` once nothing is left to animate. While
/// running, the host is expected to call `Carousel::tick` once per frame.
pub trait FrameScheduler {
    /// Current time in seconds. Must be monotonic.
    fn now(&self) -> f64;

    /// Begin delivering ticks. Idempotent.
    fn start(&mut self);

    /// Stop delivering ticks. Idempotent.
    fn stop(&mut self);
}

#[derive(Debug, Default)]
struct ClockState {
    now: Cell<f64>,
    running: Cell<bool>,
    start_requests: Cell<u64>,
}

/// A clock advanced by hand.
///
/// Clones share state, so a driver can keep one handle while the engine owns
/// another. Used by the simulator and tests.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    state: Rc<ClockState>,
}

impl ManualClock {
    /// Clock at time zero, not running.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock at time `t`.
    pub fn starting_at(t: f64) -> Self {
        let clock = Self::new();
        clock.state.now.set(t);
        clock
    }

    /// Move time forward by `dt` seconds.
    pub fn advance(&self, dt: f64) {
        self.state.now.set(self.state.now.get() + dt.max(0.0));
    }

    /// Whether the engine currently wants ticks.
    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    /// Number of stopped→running transitions so far.
    pub fn start_requests(&self) -> u64 {
        self.state.start_requests.get()
    }
}

impl FrameScheduler for ManualClock {
    fn now(&self) -> f64 {
        self.state.now.get()
    }

    fn start(&mut self) {
        if !self.state.running.get() {
            self.state.running.set(true);
            self.state.start_requests.set(self.state.start_requests.get() + 1);
        }
    }

    fn stop(&mut self) {
        self.state.running.set(false);
    }
}
