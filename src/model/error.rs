//! Error types for the carousel engine.
//!
//! This module defines the engine-level error taxonomy using `thiserror`. Errors compose
//! via `?` and `From` conversions into the higher-level [`SimError`](crate::sim::SimError)
//! used by the simulation binary.
//!
//! # Error Hierarchy
//!
//! - [`CarouselError`] - Rejected host calls
//!   - `OutOfRange` - an index-taking operation named an item that does not exist
//!   - `ReentrancyViolation` - a host callback tried to call back into the engine
//!
//! # Empty Carousels
//!
//! An empty carousel (`item_count == 0`) is **not** an error. Every index-taking
//! operation on an empty carousel returns `Ok(())` and leaves the state untouched
//! until a reload reports a positive item count.
//!
//! # Recovery Strategy
//!
//! Both variants are precondition violations detected *before* any state is mutated,
//! so the engine remains consistent and the host may simply drop the offending call.

use thiserror::Error;

/// Errors returned by the engine for malformed host calls.
///
/// # Examples
///
/// ```
/// use carousel::model::error::CarouselError;
///
/// let err = CarouselError::OutOfRange { index: 7, count: 5 };
/// assert!(err.to_string().contains("7"));
/// assert!(err.to_string().contains("5"));
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CarouselError {
    /// An index was at or beyond the current item count.
    ///
    /// Raised by `set_current_item`, `scroll_to_item`, `remove_item`, `reload_item` and
    /// by `insert_item` when the insertion point lies past the end of the collection.
    /// Callers are expected to clamp indices before handing them to the engine.
    #[error("Item index {index} is out of range for {count} items")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// Item count at the time of the call.
        count: usize,
    },

    /// A host callback attempted to re-enter the engine while it was mid-update.
    ///
    /// The engine is not reentrant: `materialize` and the delegate notifications run
    /// while the cache and scroll state are being mutated. Nested access through a
    /// [`SharedCarousel`](crate::engine::shared::SharedCarousel) is rejected with this
    /// variant instead of corrupting the slot map.
    #[error("Carousel engine re-entered from within a host callback")]
    ReentrancyViolation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_index_and_count() {
        let err = CarouselError::OutOfRange { index: 12, count: 3 };
        let msg = err.to_string();
        assert!(msg.contains("12"), "message should contain index: {msg}");
        assert!(msg.contains("3"), "message should contain count: {msg}");
    }

    #[test]
    fn reentrancy_message_mentions_callback() {
        let msg = CarouselError::ReentrancyViolation.to_string();
        assert!(msg.contains("callback"));
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(
            CarouselError::OutOfRange { index: 1, count: 1 },
            CarouselError::OutOfRange { index: 1, count: 1 }
        );
        assert_ne!(
            CarouselError::OutOfRange { index: 1, count: 1 },
            CarouselError::ReentrancyViolation
        );
    }
}
