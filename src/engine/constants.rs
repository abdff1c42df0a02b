//! Motion tuning constants.
//!
//! Velocities are in items per second once divided by the item width; durations
//! are in seconds.

/// Hard cap on the number of simultaneously materialized items.
pub const MAX_VISIBLE_ITEMS: u32 = 50;

/// Scales the deceleration applied to a released drag.
pub const DECELERATION_MULTIPLIER: f64 = 60.0;

/// Minimum release speed for deceleration or a one-item flick.
pub const SCROLL_SPEED_THRESHOLD: f64 = 2.0;

/// Minimum projected deceleration distance (items) worth animating.
pub const DECELERATE_THRESHOLD: f64 = 0.1;

/// Minimum distance from the current item for a flick to advance.
pub const SCROLL_DISTANCE_THRESHOLD: f64 = 0.1;

/// Duration of an animated `scroll_to_item`.
pub const SCROLL_DURATION: f64 = 0.4;

/// Suggested duration for host-side insert/remove transitions.
pub const INSERT_DURATION: f64 = 0.4;

/// Near-instant settle used when an offset is already on an integer.
pub const SNAP_DURATION: f64 = 0.01;

/// Shortest toggle overlay animation.
pub const MIN_TOGGLE_DURATION: f64 = 0.2;

/// Longest toggle overlay animation.
pub const MAX_TOGGLE_DURATION: f64 = 0.4;

/// Float comparison margin.
pub const FLOAT_ERROR_MARGIN: f64 = 0.000001;

/// Drag velocity to scroll velocity conversion.
pub const SCROLL_SPEED: f64 = 1.0;

/// How far (items) a non-wrapping carousel may rubber-band past either end.
pub const BOUNCE_DISTANCE: f64 = 1.0;

/// Nominal tick rate of the host animation clock.
pub const FRAME_RATE: f64 = 60.0;
