//! Notifications the engine sends to its host.

use serde::Serialize;

/// A host-visible notification.
///
/// The engine delivers these through the [`Delegate`](crate::engine::host::Delegate)
/// callbacks. The enum form exists so recording hosts (tests, the simulator) can keep
/// an ordered log of what happened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CarouselEvent {
    /// An animated scroll has been started.
    WillBeginScrolling,
    /// An animated scroll reached its end offset.
    DidEndScrolling,
    /// The offset moved by more than the float margin during an update.
    DidScroll,
    /// The rounded current item changed.
    CurrentItemChanged {
        /// New current item.
        index: usize,
    },
    /// A scroll towards a specific item is about to start.
    WillBeginScrollingTo {
        /// Target item.
        index: usize,
    },
    /// An item was tapped and the select guard approved it.
    DidSelect {
        /// Selected item.
        index: usize,
    },
    /// An item was inserted into the collection.
    DidInsertItem {
        /// Insertion point.
        index: usize,
        /// Whether the host should animate the insertion.
        animated: bool,
    },
    /// An item was removed from the collection.
    DidRemoveItem {
        /// Removed index.
        index: usize,
        /// Whether the host should animate the removal.
        animated: bool,
    },
}

impl CarouselEvent {
    /// Short stable name, used in logs and text output.
    pub fn name(&self) -> &'static str {
        match self {
            CarouselEvent::WillBeginScrolling => "will_begin_scrolling",
            CarouselEvent::DidEndScrolling => "did_end_scrolling",
            CarouselEvent::DidScroll => "did_scroll",
            CarouselEvent::CurrentItemChanged { .. } => "current_item_changed",
            CarouselEvent::WillBeginScrollingTo { .. } => "will_begin_scrolling_to",
            CarouselEvent::DidSelect { .. } => "did_select",
            CarouselEvent::DidInsertItem { .. } => "did_insert_item",
            CarouselEvent::DidRemoveItem { .. } => "did_remove_item",
        }
    }
}
