//! Index-keyed slot cache with a recycling pool.
//!
//! # Invariants
//! - Each index maps to at most one slot.
//! - After [`ItemCache::sync_visible`], the key set equals the requested set.
//! - Every evicted slot lands in the pool exactly once; nothing is dropped
//!   except by [`ItemCache::clear`] or [`ItemCache::drain_pool`].

use std::collections::{BTreeMap, BTreeSet};

/// Materialized slots plus recyclable ones.
#[derive(Debug)]
pub struct ItemCache<S> {
    slots: BTreeMap<usize, S>,
    pool: Vec<S>,
}

impl<S> Default for ItemCache<S> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
            pool: Vec::new(),
        }
    }
}

impl<S> ItemCache<S> {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of materialized slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is materialized.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of recyclable slots.
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Whether `index` has a slot.
    pub fn contains(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    /// Slot for `index`.
    pub fn get(&self, index: usize) -> Option<&S> {
        self.slots.get(&index)
    }

    /// Materialized indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.keys().copied()
    }

    /// Materialized `(index, slot)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &S)> {
        self.slots.iter().map(|(index, slot)| (*index, slot))
    }

    /// Return the slot for `index`, creating one if needed.
    ///
    /// `create` receives a pooled slot as a reuse hint when one is available.
    pub fn materialize<F>(&mut self, index: usize, create: F) -> &S
    where
        F: FnOnce(usize, Option<S>) -> S,
    {
        let pool = &mut self.pool;
        self.slots
            .entry(index)
            .or_insert_with(|| create(index, pool.pop()))
    }

    /// Replace the slot for `index`, offering the old one as the reuse hint.
    ///
    /// Returns `false` (and does nothing) when `index` has no slot.
    pub fn rematerialize<F>(&mut self, index: usize, create: F) -> bool
    where
        F: FnOnce(usize, Option<S>) -> S,
    {
        match self.slots.remove(&index) {
            Some(old) => {
                let slot = create(index, Some(old));
                self.slots.insert(index, slot);
                true
            }
            None => false,
        }
    }

    /// Move the slot for `index` to the pool.
    pub fn evict(&mut self, index: usize) -> bool {
        match self.slots.remove(&index) {
            Some(slot) => {
                self.pool.push(slot);
                true
            }
            None => false,
        }
    }

    /// Make the key set equal `visible`.
    ///
    /// Evicts first, so slots leaving the window can be recycled for indices
    /// entering it. Returns `(evicted, materialized)` counts.
    pub fn sync_visible<F>(&mut self, visible: &BTreeSet<usize>, mut create: F) -> (usize, usize)
    where
        F: FnMut(usize, Option<S>) -> S,
    {
        let stale: Vec<usize> = self
            .slots
            .keys()
            .copied()
            .filter(|index| !visible.contains(index))
            .collect();
        for index in &stale {
            self.evict(*index);
        }

        let mut created = 0;
        for &index in visible {
            if !self.slots.contains_key(&index) {
                let slot = create(index, self.pool.pop());
                self.slots.insert(index, slot);
                created += 1;
            }
        }

        (stale.len(), created)
    }

    /// Shift keys `>= index` up by one, opening a gap at `index`.
    pub fn insert_at(&mut self, index: usize) {
        let shifted = self.slots.split_off(&index);
        self.slots
            .extend(shifted.into_iter().map(|(key, slot)| (key + 1, slot)));
    }

    /// Evict `index` and shift keys above it down by one.
    pub fn remove_at(&mut self, index: usize) {
        self.evict(index);
        let shifted = self.slots.split_off(&index);
        self.slots
            .extend(shifted.into_iter().map(|(key, slot)| (key - 1, slot)));
    }

    /// Hand all pooled slots back to the caller.
    pub fn drain_pool(&mut self) -> Vec<S> {
        std::mem::take(&mut self.pool)
    }

    /// Drop every slot, pooled or not.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.pool.clear();
    }
}
