//! A recording host for the simulator and tests.

use crate::engine::host::{DataSource, Delegate};
use crate::model::CarouselEvent;
use serde::Serialize;
use std::collections::BTreeSet;

/// Opaque slot handle handed out by [`SimHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SlotId(pub u64);

/// Host that counts items, numbers slots and records every notification.
#[derive(Debug, Default)]
pub struct SimHost {
    item_count: usize,
    starting_index: usize,
    unselectable: BTreeSet<usize>,
    next_slot: u64,
    slots_created: u64,
    slots_reused: u64,
    events: Vec<CarouselEvent>,
}

impl SimHost {
    /// Host with `item_count` items.
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            ..Self::default()
        }
    }

    /// Start on `index` after each reload.
    pub fn with_starting_index(mut self, index: usize) -> Self {
        self.starting_index = index;
        self
    }

    /// Veto selection of the given indices.
    pub fn with_unselectable(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.unselectable = indices.into_iter().collect();
        self
    }

    /// Change the item count. Takes effect on the next reload.
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
    }

    /// Keep the count in step with an engine-side insertion.
    pub fn note_inserted(&mut self) {
        self.item_count += 1;
    }

    /// Keep the count in step with an engine-side removal.
    pub fn note_removed(&mut self) {
        self.item_count = self.item_count.saturating_sub(1);
    }

    /// Recorded notifications, oldest first.
    pub fn events(&self) -> &[CarouselEvent] {
        &self.events
    }

    /// Take and clear the recorded notifications.
    pub fn take_events(&mut self) -> Vec<CarouselEvent> {
        std::mem::take(&mut self.events)
    }

    /// Names of the recorded notifications.
    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.iter().map(CarouselEvent::name).collect()
    }

    /// Slots built from scratch.
    pub fn slots_created(&self) -> u64 {
        self.slots_created
    }

    /// Slots recycled from the pool.
    pub fn slots_reused(&self) -> u64 {
        self.slots_reused
    }

    fn record(&mut self, event: CarouselEvent) {
        self.events.push(event);
    }
}

impl DataSource for SimHost {
    type Slot = SlotId;

    fn item_count(&self) -> usize {
        self.item_count
    }

    fn starting_index(&self) -> usize {
        self.starting_index
    }

    fn materialize(&mut self, _index: usize, reuse: Option<SlotId>) -> SlotId {
        match reuse {
            Some(slot) => {
                self.slots_reused += 1;
                slot
            }
            None => {
                self.slots_created += 1;
                self.next_slot += 1;
                SlotId(self.next_slot)
            }
        }
    }
}

impl Delegate for SimHost {
    fn should_select(&self, index: usize) -> bool {
        !self.unselectable.contains(&index)
    }

    fn will_begin_scrolling(&mut self) {
        self.record(CarouselEvent::WillBeginScrolling);
    }

    fn did_end_scrolling(&mut self) {
        self.record(CarouselEvent::DidEndScrolling);
    }

    fn did_scroll(&mut self) {
        self.record(CarouselEvent::DidScroll);
    }

    fn current_item_changed(&mut self, index: usize) {
        self.record(CarouselEvent::CurrentItemChanged { index });
    }

    fn will_begin_scrolling_to(&mut self, index: usize) {
        self.record(CarouselEvent::WillBeginScrollingTo { index });
    }

    fn did_select(&mut self, index: usize) {
        self.record(CarouselEvent::DidSelect { index });
    }

    fn did_insert_item(&mut self, index: usize, animated: bool) {
        self.record(CarouselEvent::DidInsertItem { index, animated });
    }

    fn did_remove_item(&mut self, index: usize, animated: bool) {
        self.record(CarouselEvent::DidRemoveItem { index, animated });
    }
}
