//! LRU (Least Recently Used) structure specialized for range-sum entries
//!
//! HashMap (AHash) index into a slab of intrusive doubly-linked list nodes,
//! giving O(1) lookup, promotion, and eviction. Invalidation walks the full
//! set of live entries; unlinking a node does not perturb the relative
//! recency order of the survivors.

use std::collections::HashMap;
use ahash::RandomState;

/// Inclusive query range `[left, right]` used as the cache key.
///
/// Exact-key caching: `[0,10]` and `[5,15]` are independent entries even
/// though they overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeKey {
    /// Left bound, inclusive
    pub left: usize,
    /// Right bound, inclusive
    pub right: usize,
}

impl RangeKey {
    /// Build a key for the inclusive range `[left, right]`
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// Does this range cover `index`?
    pub fn covers(&self, index: usize) -> bool {
        self.left <= index && index <= self.right
    }
}

/// Node in the recency list
struct Node {
    key: RangeKey,
    sum: i64,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Fixed-capacity LRU map from `RangeKey` to a memoized sum.
///
/// Head of the list is most-recently-used, tail is least-recently-used.
pub struct RangeLru {
    map: HashMap<RangeKey, usize, RandomState>,
    nodes: Vec<Option<Node>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
}

impl RangeLru {
    /// Create an empty cache with the given capacity.
    ///
    /// Capacity is fixed for the lifetime of the cache; there is no resize.
    /// Callers validate `capacity >= 1` before construction.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "capacity must be at least 1");

        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        }
    }

    /// Look up a cached sum, promoting the entry to most-recently-used on a
    /// hit. Absence has no side effect.
    pub fn try_get(&mut self, key: RangeKey) -> Option<i64> {
        if let Some(&idx) = self.map.get(&key) {
            self.move_to_front(idx);
            self.nodes[idx].as_ref().map(|node| node.sum)
        } else {
            None
        }
    }

    /// Insert or overwrite `key -> sum` and promote it to most-recently-used.
    ///
    /// A new key at capacity evicts the least-recently-used entry before the
    /// insert, so the size never exceeds the capacity. Overwriting an
    /// existing key leaves the size unchanged and triggers no eviction.
    ///
    /// Returns `true` if an entry was evicted.
    pub fn put(&mut self, key: RangeKey, sum: i64) -> bool {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = &mut self.nodes[idx] {
                node.sum = sum;
            }
            self.move_to_front(idx);
            return false;
        }

        let evicted = if self.map.len() >= self.capacity {
            self.evict();
            true
        } else {
            false
        };

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key,
            sum,
            prev: None,
            next: self.head,
        });

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }

        self.map.insert(key, idx);
        evicted
    }

    /// Remove every entry whose range covers `index`.
    ///
    /// Visits all live entries; entries not covering `index` survive with
    /// value and relative recency order untouched. Returns the number of
    /// entries removed (zero when nothing covers `index`).
    pub fn remove_covering(&mut self, index: usize) -> usize {
        let covering: Vec<RangeKey> = self
            .map
            .keys()
            .filter(|key| key.covers(index))
            .copied()
            .collect();

        for key in &covering {
            self.remove(*key);
        }

        covering.len()
    }

    /// Remove a single key, returning its cached sum if present
    pub fn remove(&mut self, key: RangeKey) -> Option<i64> {
        if let Some(idx) = self.map.remove(&key) {
            self.unlink(idx);
            self.free_node(idx);
            self.nodes[idx].take().map(|node| node.sum)
        } else {
            None
        }
    }

    /// Get the current number of cached entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Get the fixed capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    /// Keys from most- to least-recently used. Test support.
    #[cfg(test)]
    pub(crate) fn keys_by_recency(&self) -> Vec<RangeKey> {
        let mut keys = Vec::with_capacity(self.map.len());
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            if let Some(node) = &self.nodes[idx] {
                keys.push(node.key);
                cursor = node.next;
            } else {
                break;
            }
        }
        keys
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return; // Already at front
        }

        self.unlink(idx);

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = if let Some(node) = &self.nodes[idx] {
            (node.prev, node.next)
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn evict(&mut self) {
        if let Some(tail_idx) = self.tail {
            // Unlink before taking the node: unlink reads the slot to repair
            // head/tail and the neighbors' links
            self.unlink(tail_idx);
            if let Some(node) = self.nodes[tail_idx].take() {
                self.map.remove(&node.key);
                self.free_node(tail_idx);
            }
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.free_list.push(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(left: usize, right: usize) -> RangeKey {
        RangeKey::new(left, right)
    }

    #[test]
    fn test_get_and_put() {
        let mut lru = RangeLru::new(2);

        lru.put(key(0, 2), 6);
        lru.put(key(1, 3), 9);

        assert_eq!(lru.try_get(key(0, 2)), Some(6));
        assert_eq!(lru.try_get(key(1, 3)), Some(9));
        assert_eq!(lru.len(), 2);
    }

    #[test]
    fn test_miss_has_no_side_effect() {
        let mut lru = RangeLru::new(2);

        lru.put(key(0, 2), 6);
        let order_before = lru.keys_by_recency();

        assert_eq!(lru.try_get(key(5, 9)), None);
        assert_eq!(lru.keys_by_recency(), order_before);
    }

    #[test]
    fn test_eviction_order() {
        let mut lru = RangeLru::new(2);

        lru.put(key(0, 2), 6);
        lru.put(key(1, 3), 9);
        let evicted = lru.put(key(2, 4), 12); // evicts (0,2)

        assert!(evicted);
        assert_eq!(lru.len(), 2);
        assert_eq!(lru.try_get(key(0, 2)), None);
        assert_eq!(lru.try_get(key(1, 3)), Some(9));
        assert_eq!(lru.try_get(key(2, 4)), Some(12));
    }

    #[test]
    fn test_get_promotes() {
        let mut lru = RangeLru::new(2);

        lru.put(key(0, 2), 6);
        lru.put(key(1, 3), 9);
        lru.try_get(key(0, 2)); // (0,2) now most recent
        lru.put(key(2, 4), 12); // evicts (1,3)

        assert_eq!(lru.try_get(key(0, 2)), Some(6));
        assert_eq!(lru.try_get(key(1, 3)), None);
        assert_eq!(lru.try_get(key(2, 4)), Some(12));
    }

    #[test]
    fn test_put_overwrites_and_promotes() {
        let mut lru = RangeLru::new(2);

        lru.put(key(0, 2), 6);
        lru.put(key(1, 3), 9);
        let evicted = lru.put(key(0, 2), 13); // overwrite, no eviction

        assert!(!evicted);
        assert_eq!(lru.len(), 2);
        assert_eq!(lru.keys_by_recency(), vec![key(0, 2), key(1, 3)]);

        lru.put(key(2, 4), 12); // evicts (1,3), not the re-put (0,2)
        assert_eq!(lru.try_get(key(1, 3)), None);
        assert_eq!(lru.try_get(key(0, 2)), Some(13));
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let mut lru = RangeLru::new(3);

        for i in 0..10 {
            lru.put(key(i, i + 1), i as i64);
            assert!(lru.len() <= 3);
        }
    }

    #[test]
    fn test_remove_covering() {
        let mut lru = RangeLru::new(4);

        lru.put(key(0, 10), 1);
        lru.put(key(5, 15), 2);
        lru.put(key(20, 30), 3);

        // Index 7 is inside both overlapping ranges but not the third
        let removed = lru.remove_covering(7);

        assert_eq!(removed, 2);
        assert_eq!(lru.try_get(key(0, 10)), None);
        assert_eq!(lru.try_get(key(5, 15)), None);
        assert_eq!(lru.try_get(key(20, 30)), Some(3));
    }

    #[test]
    fn test_remove_covering_boundaries() {
        let mut lru = RangeLru::new(4);

        lru.put(key(3, 7), 1);

        assert_eq!(lru.remove_covering(2), 0);
        assert_eq!(lru.remove_covering(8), 0);
        assert_eq!(lru.len(), 1);

        assert_eq!(lru.remove_covering(3), 1);
        lru.put(key(3, 7), 1);
        assert_eq!(lru.remove_covering(7), 1);
        assert!(lru.is_empty());
    }

    #[test]
    fn test_remove_covering_preserves_survivor_order() {
        let mut lru = RangeLru::new(4);

        lru.put(key(0, 1), 1);
        lru.put(key(5, 6), 2);
        lru.put(key(2, 3), 3);
        lru.put(key(8, 9), 4);

        lru.remove_covering(5); // drops only (5,6)

        assert_eq!(
            lru.keys_by_recency(),
            vec![key(8, 9), key(2, 3), key(0, 1)]
        );
    }

    #[test]
    fn test_remove_covering_noop() {
        let mut lru = RangeLru::new(4);

        lru.put(key(0, 3), 6);
        assert_eq!(lru.remove_covering(99), 0);
        assert_eq!(lru.try_get(key(0, 3)), Some(6));
    }

    #[test]
    fn test_clear() {
        let mut lru = RangeLru::new(3);

        lru.put(key(0, 1), 1);
        lru.put(key(2, 3), 2);
        lru.clear();

        assert_eq!(lru.len(), 0);
        assert!(lru.is_empty());
        assert_eq!(lru.try_get(key(0, 1)), None);
    }

    #[test]
    fn test_eviction_order_across_repeated_evictions() {
        let mut lru = RangeLru::new(2);

        // No intervening access: insertion order is eviction order, even
        // after evicted slots are reused for new entries
        lru.put(key(0, 0), 1);
        lru.put(key(1, 1), 2);

        lru.put(key(2, 2), 3); // evicts (0,0)
        assert_eq!(lru.keys_by_recency(), vec![key(2, 2), key(1, 1)]);

        lru.put(key(3, 3), 4); // evicts (1,1), not the just-inserted (2,2)
        assert_eq!(lru.keys_by_recency(), vec![key(3, 3), key(2, 2)]);
        assert_eq!(lru.try_get(key(1, 1)), None);
        assert_eq!(lru.try_get(key(2, 2)), Some(3));

        lru.put(key(4, 4), 5); // evicts (3,3): the try_gets promoted (2,2)
        assert_eq!(lru.try_get(key(3, 3)), None);
        assert_eq!(lru.try_get(key(2, 2)), Some(3));
        assert_eq!(lru.try_get(key(4, 4)), Some(5));
    }

    #[test]
    fn test_eviction_identity_long_sequence() {
        let mut lru = RangeLru::new(3);

        for i in 0..3 {
            lru.put(key(i, i), i as i64);
        }

        // Each overflow must evict exactly the oldest surviving key
        for i in 3..12 {
            lru.put(key(i, i), i as i64);
            assert_eq!(lru.len(), 3);
            assert_eq!(
                lru.keys_by_recency(),
                vec![key(i, i), key(i - 1, i - 1), key(i - 2, i - 2)]
            );
        }
    }

    #[test]
    fn test_eviction_order_with_interleaved_promotions() {
        let mut lru = RangeLru::new(3);

        lru.put(key(0, 0), 0);
        lru.put(key(1, 1), 1);
        lru.put(key(2, 2), 2);

        lru.try_get(key(0, 0)); // order: 0, 2, 1
        lru.put(key(3, 3), 3); // evicts (1,1)
        assert_eq!(lru.keys_by_recency(), vec![key(3, 3), key(0, 0), key(2, 2)]);

        lru.put(key(2, 2), 20); // re-put promotes; order: 2, 3, 0
        lru.put(key(4, 4), 4); // evicts (0,0)
        assert_eq!(lru.keys_by_recency(), vec![key(4, 4), key(2, 2), key(3, 3)]);

        lru.put(key(5, 5), 5); // evicts (3,3)
        assert_eq!(lru.keys_by_recency(), vec![key(5, 5), key(4, 4), key(2, 2)]);
        assert_eq!(lru.try_get(key(2, 2)), Some(20));
    }

    #[test]
    fn test_slot_reuse_after_removal() {
        let mut lru = RangeLru::new(2);

        lru.put(key(0, 1), 1);
        lru.remove(key(0, 1));
        lru.put(key(2, 3), 2);
        lru.put(key(4, 5), 3);
        lru.put(key(6, 7), 4); // evicts (2,3)

        assert_eq!(lru.try_get(key(2, 3)), None);
        assert_eq!(lru.try_get(key(4, 5)), Some(3));
        assert_eq!(lru.try_get(key(6, 7)), Some(4));
    }
}
