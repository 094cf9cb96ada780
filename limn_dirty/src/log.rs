// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change log: accumulated dirty keys with transactional drain.

use alloc::vec::Vec;
use core::hash::Hash;
use core::mem;

use hashbrown::HashSet;

/// Accumulated dirty keys with discovery-order iteration and generation
/// tracking.
///
/// `ChangeLog` records the keys of depicted objects whose observable state
/// changed since the last successful depiction. Keys are remembered in the
/// order they were first marked; re-marking an already-dirty key is absorbed
/// without disturbing its position.
///
/// The generation counter increments on every mutation and can be used to
/// detect stale computations.
///
/// # Type Parameters
///
/// - `K`: The key type, typically a depict identifier. Must be
///   `Copy + Eq + Hash`.
///
/// # Example
///
/// ```
/// use limn_dirty::ChangeLog;
///
/// let mut log = ChangeLog::<u32>::new();
/// log.mark(1);
/// log.mark(2);
/// log.mark(1);
///
/// assert!(log.is_dirty(1));
/// assert_eq!(log.iter().collect::<Vec<_>>(), vec![1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct ChangeLog<K>
where
    K: Copy + Eq + Hash,
{
    /// Keys in the order they were first marked.
    order: Vec<K>,
    /// Membership index over `order`.
    index: HashSet<K>,
    /// Generation counter, incremented on each mutation.
    generation: u64,
}

impl<K> Default for ChangeLog<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ChangeLog<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates a new empty change log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            index: HashSet::new(),
            generation: 0,
        }
    }

    /// Returns the current generation.
    ///
    /// The generation is incremented on every mutation (mark, remove, drain).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Marks a key as dirty.
    ///
    /// Returns `true` if the key was newly marked, `false` if it was already
    /// dirty. An already-dirty key keeps its original discovery position.
    pub fn mark(&mut self, key: K) -> bool {
        self.generation = self.generation.wrapping_add(1);
        let inserted = self.index.insert(key);
        if inserted {
            self.order.push(key);
        }
        inserted
    }

    /// Returns `true` if the key is currently dirty.
    #[must_use]
    pub fn is_dirty(&self, key: K) -> bool {
        self.index.contains(&key)
    }

    /// Returns the number of dirty keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no keys are dirty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns an iterator over the dirty keys in discovery order.
    ///
    /// This does not clear the dirty state. Use
    /// [`begin_drain`](Self::begin_drain) to consume.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.order.iter().copied()
    }

    /// Removes a key entirely, e.g. when the object leaves the live tree.
    ///
    /// Returns `true` if the key was dirty.
    pub fn remove_key(&mut self, key: K) -> bool {
        if self.index.remove(&key) {
            self.generation = self.generation.wrapping_add(1);
            self.order.retain(|k| *k != key);
            true
        } else {
            false
        }
    }

    /// Begins a transactional drain of all currently dirty keys.
    ///
    /// The returned [`Drain`] takes the marked keys out of the log. The
    /// caller iterates [`Drain::keys`], performs its emission, and calls
    /// [`Drain::commit`] on success. Dropping the guard without committing
    /// restores every taken mark ahead of any keys marked while the drain
    /// was open, so dirtiness is never lost to a failed emission.
    pub fn begin_drain(&mut self) -> Drain<'_, K> {
        self.generation = self.generation.wrapping_add(1);
        let taken = mem::take(&mut self.order);
        self.index.clear();
        Drain {
            log: self,
            taken,
            committed: false,
        }
    }
}

/// A transactional drain over a [`ChangeLog`].
///
/// Created by [`ChangeLog::begin_drain`]. The keys taken by the drain are
/// permanently removed only when [`commit`](Self::commit) is called; dropping
/// the guard restores them.
#[derive(Debug)]
pub struct Drain<'a, K>
where
    K: Copy + Eq + Hash,
{
    log: &'a mut ChangeLog<K>,
    taken: Vec<K>,
    committed: bool,
}

impl<K> Drain<'_, K>
where
    K: Copy + Eq + Hash,
{
    /// Returns an iterator over the taken keys in discovery order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.taken.iter().copied()
    }

    /// Returns the number of taken keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.taken.len()
    }

    /// Returns `true` if the drain took no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }

    /// Commits the drain: the taken keys are permanently removed.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl<K> Drop for Drain<'_, K>
where
    K: Copy + Eq + Hash,
{
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        self.log.generation = self.log.generation.wrapping_add(1);
        // Keys marked while the drain was open come after the restored ones:
        // the restored keys were discovered earlier.
        let newer = mem::take(&mut self.log.order);
        for key in self.taken.drain(..) {
            if self.log.index.insert(key) {
                self.log.order.push(key);
            }
        }
        self.log.order.extend(newer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn mark_and_query() {
        let mut log = ChangeLog::<u32>::new();

        assert!(!log.is_dirty(1));
        assert!(log.is_empty());

        assert!(log.mark(1));
        assert!(log.is_dirty(1));
        assert!(!log.is_empty());

        // Marking again is absorbed.
        assert!(!log.mark(1));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn discovery_order_is_stable() {
        let mut log = ChangeLog::<u32>::new();
        log.mark(3);
        log.mark(1);
        log.mark(2);
        log.mark(1);

        assert_eq!(log.iter().collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn committed_drain_clears() {
        let mut log = ChangeLog::<u32>::new();
        log.mark(1);
        log.mark(2);

        let drain = log.begin_drain();
        assert_eq!(drain.keys().collect::<Vec<_>>(), vec![1, 2]);
        drain.commit();

        assert!(log.is_empty());
        assert!(!log.is_dirty(1));
    }

    #[test]
    fn dropped_drain_restores_marks() {
        let mut log = ChangeLog::<u32>::new();
        log.mark(1);
        log.mark(2);

        drop(log.begin_drain());

        assert!(log.is_dirty(1));
        assert!(log.is_dirty(2));
        assert_eq!(log.iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn marks_during_open_drain_survive_commit() {
        let mut log = ChangeLog::<u32>::new();
        log.mark(1);

        let drain = log.begin_drain();
        drain.log.mark(2);
        drain.commit();

        assert!(!log.is_dirty(1));
        assert!(log.is_dirty(2));
    }

    #[test]
    fn restored_marks_precede_newer_ones() {
        let mut log = ChangeLog::<u32>::new();
        log.mark(1);
        log.mark(2);

        let drain = log.begin_drain();
        drain.log.mark(3);
        // Key 2 re-marked during the drain keeps its newer position.
        drain.log.mark(2);
        drop(drain);

        assert_eq!(log.iter().collect::<Vec<_>>(), vec![1, 3, 2]);
    }

    #[test]
    fn remove_key_drops_mark() {
        let mut log = ChangeLog::<u32>::new();
        log.mark(1);
        log.mark(2);

        assert!(log.remove_key(1));
        assert!(!log.remove_key(1));
        assert_eq!(log.iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn generation_increments() {
        let mut log = ChangeLog::<u32>::new();
        let initial = log.generation();

        log.mark(1);
        assert_eq!(log.generation(), initial + 1);

        log.remove_key(1);
        assert_eq!(log.generation(), initial + 2);

        log.mark(2);
        log.begin_drain().commit();
        assert_eq!(log.generation(), initial + 4);
    }
}
