//! Shared fixtures for unit tests.
//!
//! Builds carousels over a [`SimHost`] and a [`ManualClock`] so tests can
//! script gestures and step time deterministically.

use crate::config::CarouselConfig;
use crate::engine::{Carousel, ManualClock};
use crate::sim::SimHost;

/// One 60 Hz frame.
pub const FRAME: f64 = 1.0 / 60.0;

/// Carousel with `items` items under `config`.
pub fn carousel(items: usize, config: CarouselConfig) -> Carousel<SimHost, ManualClock> {
    Carousel::new(SimHost::new(items), ManualClock::new(), config)
}

/// Non-wrapping, bouncing configuration.
pub fn linear() -> CarouselConfig {
    CarouselConfig {
        wrap: false,
        bounce: true,
        ..CarouselConfig::default()
    }
}

/// Drag by `deltas` (one frame apart) at `velocity`, then release and settle.
pub fn drag_and_settle(c: &mut Carousel<SimHost, ManualClock>, deltas: &[f64], velocity: f64) {
    c.begin_drag();
    for delta in deltas {
        c.scheduler().advance(FRAME);
        c.drag_changed(*delta, velocity);
        c.tick();
    }
    c.end_drag();
    c.run_until_idle(FRAME, 100_000);
}
