/// A binary min-heap over densely-keyed entries, where each queued key's current position in the
/// backing array is tracked in a side table. The side table makes `update_cost` an O(log n)
/// sift instead of an O(n) scan followed by a rebuild.
///
/// Keys are `usize` values in `0..key_count`, matching the linear indices of an arena (e.g. the
/// cell indices of a [`Grid2D`](crate::grid::Grid2D)). Ties among equal costs are broken
/// arbitrarily: no ordering is guaranteed among entries with the same cost.
pub struct KeyedMinHeap<C> {
    entries: Vec<HeapEntry<C>>,

    /// Maps each key to its current position in `entries`, or `ABSENT` if the key is not queued.
    /// Every structural mutation of `entries` must keep this in sync.
    slots: Vec<usize>,
}

struct HeapEntry<C> {
    key: usize,
    cost: C,
}

const ABSENT: usize = usize::MAX;

impl<C: Ord> KeyedMinHeap<C> {
    pub fn with_key_count(key_count: usize) -> Self {
        Self {
            entries: Vec::with_capacity(key_count),
            slots: vec![ABSENT; key_count],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn key_count(&self) -> usize {
        self.slots.len()
    }

    pub fn contains(&self, key: usize) -> bool {
        self.slots.get(key).map_or(false, |slot: &usize| *slot != ABSENT)
    }

    pub fn cost(&self, key: usize) -> Option<&C> {
        self.slots
            .get(key)
            .filter(|slot: &&usize| **slot != ABSENT)
            .map(|slot: &usize| &self.entries[*slot].cost)
    }

    /// Empties the heap and re-sizes the key space, retaining the backing allocations.
    pub fn clear_for_key_count(&mut self, key_count: usize) {
        self.entries.clear();
        self.slots.clear();
        self.slots.resize(key_count, ABSENT);
    }

    /// Inserts `key` with `cost`, sifting it up to its position.
    ///
    /// # Panics
    ///
    /// If `key` is outside the key space, or is already queued. A duplicate push means the
    /// caller's bookkeeping is broken, and tolerating it would corrupt the slot table.
    pub fn push(&mut self, key: usize, cost: C) {
        assert!(
            key < self.slots.len(),
            "key {key} is outside the key space 0..{}",
            self.slots.len()
        );
        assert!(self.slots[key] == ABSENT, "key {key} is already queued");

        let slot: usize = self.entries.len();

        self.entries.push(HeapEntry { key, cost });
        self.slots[key] = slot;
        self.sift_up(slot);
    }

    /// Removes and returns the key with the smallest cost, or `None` if the heap is empty.
    pub fn pop_min(&mut self) -> Option<(usize, C)> {
        (!self.entries.is_empty()).then(|| {
            let last_slot: usize = self.entries.len() - 1_usize;

            self.entries.swap(0_usize, last_slot);

            let entry: HeapEntry<C> = self.entries.pop().unwrap();

            self.slots[entry.key] = ABSENT;

            if !self.entries.is_empty() {
                self.slots[self.entries[0_usize].key] = 0_usize;
                self.sift_down(0_usize);
            }

            (entry.key, entry.cost)
        })
    }

    /// Changes the cost of a currently-queued key and restores heap order by sifting the
    /// affected position up or down as needed.
    ///
    /// # Panics
    ///
    /// If `key` is not currently queued. Updating an already-popped key indicates a broken
    /// invariant in the caller's bookkeeping and is not silently tolerated.
    pub fn update_cost(&mut self, key: usize, cost: C) {
        assert!(
            key < self.slots.len(),
            "key {key} is outside the key space 0..{}",
            self.slots.len()
        );

        let slot: usize = self.slots[key];

        assert!(slot != ABSENT, "key {key} is not queued");

        self.entries[slot].cost = cost;

        let slot: usize = self.sift_up(slot);

        self.sift_down(slot);
    }

    /// Swaps two entries, keeping the slot table in sync.
    fn swap_entries(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.slots[self.entries[a].key] = a;
        self.slots[self.entries[b].key] = b;
    }

    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0_usize {
            let parent: usize = (slot - 1_usize) / 2_usize;

            if self.entries[slot].cost < self.entries[parent].cost {
                self.swap_entries(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }

        slot
    }

    fn sift_down(&mut self, mut slot: usize) -> usize {
        let len: usize = self.entries.len();

        loop {
            let left: usize = 2_usize * slot + 1_usize;

            if left >= len {
                break;
            }

            let right: usize = left + 1_usize;
            let child: usize =
                if right < len && self.entries[right].cost < self.entries[left].cost {
                    right
                } else {
                    left
                };

            if self.entries[child].cost < self.entries[slot].cost {
                self.swap_entries(slot, child);
                slot = child;
            } else {
                break;
            }
        }

        slot
    }
}

impl<C: Ord> Default for KeyedMinHeap<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            slots: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl<C: Ord> KeyedMinHeap<C> {
        /// Audits both structural invariants: parent cost <= child costs, and slot table
        /// agreement with actual entry positions.
        fn assert_invariants(&self) {
            for (slot, entry) in self.entries.iter().enumerate() {
                if slot > 0_usize {
                    let parent: usize = (slot - 1_usize) / 2_usize;

                    assert!(
                        self.entries[parent].cost <= entry.cost,
                        "heap order violated between slots {parent} and {slot}"
                    );
                }

                assert_eq!(
                    self.slots[entry.key], slot,
                    "slot table out of sync for key {}",
                    entry.key
                );
            }

            assert_eq!(
                self.slots
                    .iter()
                    .filter(|slot: &&usize| **slot != ABSENT)
                    .count(),
                self.entries.len()
            );
        }
    }

    #[test]
    fn test_push_and_pop_min_sorts() {
        let mut heap: KeyedMinHeap<u32> = KeyedMinHeap::with_key_count(16_usize);

        // A fixed scramble of 0..16.
        for key in 0_usize..16_usize {
            heap.push(key, ((key * 7_usize) % 16_usize) as u32);
            heap.assert_invariants();
        }

        let mut popped: Vec<u32> = Vec::with_capacity(16_usize);

        while let Some((key, cost)) = heap.pop_min() {
            assert!(!heap.contains(key));
            heap.assert_invariants();
            popped.push(cost);
        }

        assert_eq!(popped, (0_u32..16_u32).collect::<Vec<u32>>());
        assert!(heap.is_empty());
    }

    #[test]
    fn test_update_cost_decrease_moves_to_head() {
        let mut heap: KeyedMinHeap<u32> = KeyedMinHeap::with_key_count(8_usize);

        for key in 0_usize..8_usize {
            heap.push(key, 10_u32 + key as u32);
        }

        heap.update_cost(7_usize, 1_u32);
        heap.assert_invariants();

        assert_eq!(heap.cost(7_usize), Some(&1_u32));
        assert_eq!(heap.pop_min(), Some((7_usize, 1_u32)));
        heap.assert_invariants();
    }

    #[test]
    fn test_update_cost_increase_sifts_down() {
        let mut heap: KeyedMinHeap<u32> = KeyedMinHeap::with_key_count(8_usize);

        for key in 0_usize..8_usize {
            heap.push(key, key as u32);
        }

        heap.update_cost(0_usize, 100_u32);
        heap.assert_invariants();

        assert_eq!(heap.pop_min(), Some((1_usize, 1_u32)));

        let mut last_key: usize = usize::MAX;

        while let Some((key, _)) = heap.pop_min() {
            heap.assert_invariants();
            last_key = key;
        }

        assert_eq!(last_key, 0_usize);
    }

    #[test]
    fn test_interleaved_operations_keep_slots_in_sync() {
        let mut heap: KeyedMinHeap<u32> = KeyedMinHeap::with_key_count(32_usize);

        for key in 0_usize..32_usize {
            heap.push(key, ((key * 13_usize + 5_usize) % 37_usize) as u32);
            heap.assert_invariants();
        }

        // Re-key half the entries, then drain a few, then re-key again.
        for key in (0_usize..32_usize).step_by(2_usize) {
            heap.update_cost(key, ((key * 29_usize) % 41_usize) as u32);
            heap.assert_invariants();
        }

        for _ in 0_usize..8_usize {
            heap.pop_min().unwrap();
            heap.assert_invariants();
        }

        for key in 0_usize..32_usize {
            if heap.contains(key) {
                heap.update_cost(key, ((key * 31_usize + 3_usize) % 43_usize) as u32);
                heap.assert_invariants();
            }
        }

        let mut prev_cost: u32 = 0_u32;

        while let Some((_, cost)) = heap.pop_min() {
            heap.assert_invariants();
            assert!(cost >= prev_cost);
            prev_cost = cost;
        }
    }

    #[test]
    fn test_clear_for_key_count() {
        let mut heap: KeyedMinHeap<u32> = KeyedMinHeap::with_key_count(4_usize);

        for key in 0_usize..4_usize {
            heap.push(key, key as u32);
        }

        heap.clear_for_key_count(6_usize);

        assert!(heap.is_empty());
        assert_eq!(heap.key_count(), 6_usize);

        for key in 0_usize..6_usize {
            assert!(!heap.contains(key));
            heap.push(key, 0_u32);
        }

        heap.assert_invariants();
    }

    #[test]
    #[should_panic(expected = "is not queued")]
    fn test_update_cost_absent_key_panics() {
        let mut heap: KeyedMinHeap<u32> = KeyedMinHeap::with_key_count(2_usize);

        heap.push(0_usize, 1_u32);
        heap.pop_min();
        heap.update_cost(0_usize, 2_u32);
    }

    #[test]
    #[should_panic(expected = "already queued")]
    fn test_duplicate_push_panics() {
        let mut heap: KeyedMinHeap<u32> = KeyedMinHeap::with_key_count(2_usize);

        heap.push(0_usize, 1_u32);
        heap.push(0_usize, 2_u32);
    }

    #[test]
    #[should_panic(expected = "outside the key space")]
    fn test_push_out_of_key_space_panics() {
        let mut heap: KeyedMinHeap<u32> = KeyedMinHeap::with_key_count(2_usize);

        heap.push(2_usize, 1_u32);
    }
}
