//! Carousel scroll-state engine.
//!
//! A headless engine for circular and linear carousel controls: continuous
//! scroll offset, wrap and bounce arithmetic, eased scroll animations,
//! deceleration after a drag, a sliding window of materialized item slots,
//! and the notifications a host UI needs to render all of it.
//!
//! The engine is pure state plus math; rendering, the frame clock and item
//! content belong to the host (see [`engine::host`]). The [`sim`] module and
//! the `carousel-sim` binary drive it headlessly from TOML scripts.

pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod sim;

#[cfg(test)]
mod test_harness;
