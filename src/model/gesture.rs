//! Raw gesture input reported by the host.

use serde::Deserialize;

/// Direction of a swipe gesture.
///
/// A left swipe moves content left, revealing the *next* item; a right swipe
/// reveals the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    /// Advance to the next item.
    Left,
    /// Go back to the previous item.
    Right,
}

impl SwipeDirection {
    /// Signed item step for this direction.
    pub fn step(self) -> i64 {
        match self {
            SwipeDirection::Left => 1,
            SwipeDirection::Right => -1,
        }
    }
}

/// A single host-reported gesture event.
///
/// Translation deltas and velocities are in host points along the scroll axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureInput {
    /// A pan began.
    DragBegan,
    /// The pan moved by `translation_delta` since the previous report.
    DragChanged {
        /// Translation since the previous `DragChanged`.
        translation_delta: f64,
        /// Instantaneous velocity in points per second.
        velocity: f64,
    },
    /// The pan ended, was cancelled or failed.
    DragEnded,
    /// A tap landed on the item at `index`, or on no item.
    Tap(Option<usize>),
    /// A swipe was recognized.
    Swipe(SwipeDirection),
}
