//! Adjacency storage
//!
//! The authoritative structural data of a graph: for each node, an
//! insertion-ordered map from neighbor to edge slot. A slot holds one record
//! for simple graphs and a key -> record map for multigraphs.
//!
//! The store only knows one side of each edge. Keeping the mirror side
//! (`adj[v][u]` for undirected graphs, the predecessor store for directed
//! ones) consistent is the job of the owning graph.

use super::attr::AttrRecord;
use super::query::EdgeEntry;
use super::types::{EdgeKey, Node};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::fmt;

/// Insertion-ordered map with the fast hasher used on all hot paths
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Insertion-ordered set with the same hasher
pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Tombstones tolerated before a [`NodeTable`] compacts, on top of one per
/// live node
const COMPACT_SLACK: usize = 32;

/// Insertion-ordered node map with O(1) removal.
///
/// Removing a node leaves an empty slot, so the order of the remaining
/// nodes is untouched. Slots are compacted once empty ones outnumber live
/// ones, which keeps removal amortized O(1) and iteration O(live nodes).
/// A node added again after removal goes to the end.
#[derive(Debug, Clone)]
pub struct NodeTable<N, V> {
    index: FxHashMap<N, usize>,
    slots: Vec<Option<(N, V)>>,
}

impl<N: Node, V> NodeTable<N, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NodeTable {
            index: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            slots: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains_key(&self, n: &N) -> bool {
        self.index.contains_key(n)
    }

    pub fn get(&self, n: &N) -> Option<&V> {
        self.get_key_value(n).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, n: &N) -> Option<&mut V> {
        let slot = *self.index.get(n)?;
        self.slots[slot].as_mut().map(|(_, v)| v)
    }

    /// The stored key and value for `n`
    pub fn get_key_value(&self, n: &N) -> Option<(&N, &V)> {
        let slot = *self.index.get(n)?;
        self.slots[slot].as_ref().map(|(k, v)| (k, v))
    }

    /// Slot position of `n`; increases with insertion order
    pub fn rank(&self, n: &N) -> Option<usize> {
        self.index.get(n).copied()
    }

    /// Insert `n` at the end, or replace its value in place if present
    pub fn insert(&mut self, n: N, value: V) -> Option<V> {
        if let Some(existing) = self.get_mut(&n) {
            return Some(std::mem::replace(existing, value));
        }
        self.index.insert(n.clone(), self.slots.len());
        self.slots.push(Some((n, value)));
        None
    }

    pub fn remove(&mut self, n: &N) -> Option<V> {
        let slot = self.index.remove(n)?;
        let removed = self.slots[slot].take().map(|(_, v)| v);
        if self.slots.len() > 2 * self.index.len() + COMPACT_SLACK {
            self.compact();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, &V)> + '_ {
        self.slots.iter().flatten().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &N> + '_ {
        self.slots.iter().flatten().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.slots.iter().flatten().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.slots.iter_mut().flatten().map(|(_, v)| v)
    }

    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        for (position, (k, _)) in self.slots.iter().flatten().enumerate() {
            if let Some(slot) = self.index.get_mut(k) {
                *slot = position;
            }
        }
    }
}

impl<N: Node, V> Default for NodeTable<N, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Records stored for one (node, neighbor) pair
pub trait EdgeSlot: fmt::Debug + 'static {
    const MULTI: bool;

    fn len(&self) -> usize;

    fn entries(&self) -> SlotEntries<'_>;

    /// Record under `key`, or the first record when `key` is `None`
    fn get(&self, key: Option<&EdgeKey>) -> Option<&AttrRecord>;
}

/// Iterator over the `(key, record)` pairs of one slot
pub enum SlotEntries<'a> {
    Single(Option<&'a AttrRecord>),
    Multi(indexmap::map::Iter<'a, EdgeKey, AttrRecord>),
}

impl<'a> Iterator for SlotEntries<'a> {
    type Item = (Option<&'a EdgeKey>, &'a AttrRecord);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            SlotEntries::Single(record) => record.take().map(|r| (None, r)),
            SlotEntries::Multi(iter) => iter.next().map(|(k, r)| (Some(k), r)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            SlotEntries::Single(record) => {
                let n = usize::from(record.is_some());
                (n, Some(n))
            }
            SlotEntries::Multi(iter) => iter.size_hint(),
        }
    }
}

/// Slot of a simple graph: exactly one record
#[derive(Debug, Clone)]
pub struct SingleEdge(pub(crate) AttrRecord);

impl EdgeSlot for SingleEdge {
    const MULTI: bool = false;

    fn len(&self) -> usize {
        1
    }

    fn entries(&self) -> SlotEntries<'_> {
        SlotEntries::Single(Some(&self.0))
    }

    fn get(&self, key: Option<&EdgeKey>) -> Option<&AttrRecord> {
        match key {
            None => Some(&self.0),
            Some(_) => None,
        }
    }
}

/// Slot of a multigraph: parallel edges by key, in insertion order
#[derive(Debug, Clone, Default)]
pub struct MultiEdge(pub(crate) FxIndexMap<EdgeKey, AttrRecord>);

impl MultiEdge {
    /// Smallest unused integer key starting at the current edge count
    pub fn next_key(&self) -> EdgeKey {
        let mut candidate = self.0.len() as u64;
        while self.0.contains_key(&EdgeKey::Index(candidate)) {
            candidate += 1;
        }
        EdgeKey::Index(candidate)
    }

    pub fn contains_key(&self, key: &EdgeKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: EdgeKey, record: AttrRecord) {
        self.0.insert(key, record);
    }

    pub fn remove(&mut self, key: &EdgeKey) -> Option<AttrRecord> {
        self.0.shift_remove(key)
    }

    /// Most recently inserted key
    pub fn last_key(&self) -> Option<&EdgeKey> {
        self.0.last().map(|(k, _)| k)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl EdgeSlot for MultiEdge {
    const MULTI: bool = true;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn entries(&self) -> SlotEntries<'_> {
        SlotEntries::Multi(self.0.iter())
    }

    fn get(&self, key: Option<&EdgeKey>) -> Option<&AttrRecord> {
        match key {
            Some(k) => self.0.get(k),
            None => self.0.first().map(|(_, r)| r),
        }
    }
}

/// Node -> neighbor -> slot map for one side of a graph.
///
/// Removing a node is O(1) on the node table plus, per neighbor, a
/// shift of that neighbor's own map.
#[derive(Debug)]
pub struct AdjacencyStore<N, S> {
    adj: NodeTable<N, FxIndexMap<N, S>>,
}

impl<N: Node, S: EdgeSlot> AdjacencyStore<N, S> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        AdjacencyStore {
            adj: NodeTable::with_capacity(capacity),
        }
    }

    /// Insert `n` with no neighbors; returns false if it was present
    pub fn add_node(&mut self, n: N) -> bool {
        if self.adj.contains_key(&n) {
            return false;
        }
        self.adj.insert(n, FxIndexMap::default());
        true
    }

    pub fn contains(&self, n: &N) -> bool {
        self.adj.contains_key(n)
    }

    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.adj.keys()
    }

    pub fn neighbors(&self, n: &N) -> Option<&FxIndexMap<N, S>> {
        self.adj.get(n)
    }

    pub fn slot(&self, u: &N, v: &N) -> Option<&S> {
        self.adj.get(u).and_then(|nbrs| nbrs.get(v))
    }

    pub fn slot_mut(&mut self, u: &N, v: &N) -> Option<&mut S> {
        self.adj.get_mut(u).and_then(|nbrs| nbrs.get_mut(v))
    }

    pub fn has_slot(&self, u: &N, v: &N) -> bool {
        self.slot(u, v).is_some()
    }

    /// Store `slot` as the entry `u -> v`, inserting `u` if needed.
    /// An existing entry keeps its position.
    pub fn set_slot(&mut self, u: &N, v: N, slot: S) {
        match self.adj.get_mut(u) {
            Some(nbrs) => {
                nbrs.insert(v, slot);
            }
            None => {
                let mut nbrs = FxIndexMap::default();
                nbrs.insert(v, slot);
                self.adj.insert(u.clone(), nbrs);
            }
        }
    }

    /// Remove the entry `u -> v`
    pub fn take_slot(&mut self, u: &N, v: &N) -> Option<S> {
        self.adj.get_mut(u).and_then(|nbrs| nbrs.shift_remove(v))
    }

    /// Remove `n` and return its neighbor map; other nodes' entries
    /// pointing at `n` are left for the caller to unlink.
    pub fn remove_node(&mut self, n: &N) -> Option<FxIndexMap<N, S>> {
        self.adj.remove(n)
    }

    /// Drop every entry but keep the nodes
    pub fn clear_edges(&mut self) {
        for nbrs in self.adj.values_mut() {
            nbrs.clear();
        }
    }

    pub fn clear(&mut self) {
        self.adj.clear();
    }

    /// Entries of `n`, grouped by neighbor
    pub fn edge_entries<'a>(
        &'a self,
        n: &N,
    ) -> Option<impl Iterator<Item = EdgeEntry<'a, N>> + 'a> {
        self.adj.get(n).map(|nbrs| {
            nbrs.iter().flat_map(|(v, slot)| {
                slot.entries().map(move |(key, record)| EdgeEntry {
                    node: v,
                    key,
                    record,
                })
            })
        })
    }

    /// Number of edges stored on `n`'s side, each entry counted once
    pub fn side_count(&self, n: &N) -> Option<usize> {
        self.adj.get(n).map(|nbrs| {
            if S::MULTI {
                nbrs.values().map(EdgeSlot::len).sum()
            } else {
                nbrs.len()
            }
        })
    }

    /// Sum of `weight` over the edges stored on `n`'s side
    pub fn side_weight(&self, n: &N, weight: &str) -> Option<f64> {
        self.adj.get(n).map(|nbrs| {
            nbrs.values()
                .flat_map(|slot| slot.entries())
                .map(|(_, record)| record.weight(weight))
                .sum()
        })
    }

    /// Undirected degree of `n`: self-loops count twice
    pub fn degree(&self, n: &N) -> Option<usize> {
        let count = self.side_count(n)?;
        Some(count + self.slot(n, n).map_or(0, EdgeSlot::len))
    }

    /// Weighted undirected degree of `n`: self-loops count twice
    pub fn weighted_degree(&self, n: &N, weight: &str) -> Option<f64> {
        let sum = self.side_weight(n, weight)?;
        let loops: f64 = self
            .slot(n, n)
            .map(|slot| slot.entries().map(|(_, r)| r.weight(weight)).sum())
            .unwrap_or(0.0);
        Some(sum + loops)
    }

    /// Total number of stored entries over all nodes
    pub fn entry_count(&self) -> usize {
        self.adj
            .values()
            .map(|nbrs| {
                if S::MULTI {
                    nbrs.values().map(EdgeSlot::len).sum()
                } else {
                    nbrs.len()
                }
            })
            .sum()
    }

    /// Number of self-loop edges
    pub fn selfloop_count(&self) -> usize {
        self.adj
            .iter()
            .filter_map(|(n, nbrs)| nbrs.get(n))
            .map(EdgeSlot::len)
            .sum()
    }
}

impl<N: Node> AdjacencyStore<N, MultiEdge> {
    /// Store `record` under `key` in the entry `u -> v`
    pub fn insert_keyed(&mut self, u: &N, v: &N, key: EdgeKey, record: AttrRecord) {
        match self.slot_mut(u, v) {
            Some(slot) => slot.insert(key, record),
            None => {
                let mut slot = MultiEdge::default();
                slot.insert(key, record);
                self.set_slot(u, v.clone(), slot);
            }
        }
    }

    /// Remove `key` from the entry `u -> v`, dropping the entry once empty
    pub fn remove_keyed(&mut self, u: &N, v: &N, key: &EdgeKey) -> Option<AttrRecord> {
        let slot = self.slot_mut(u, v)?;
        let record = slot.remove(key)?;
        if slot.is_empty() {
            self.take_slot(u, v);
        }
        Some(record)
    }
}

impl<N: Node, S: EdgeSlot> Default for AdjacencyStore<N, S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::attr::attrs;

    fn single() -> SingleEdge {
        SingleEdge(AttrRecord::new())
    }

    #[test]
    fn test_node_table_keeps_order_after_removal() {
        let mut table: NodeTable<u32, &str> = NodeTable::new();
        for (n, label) in [(1, "a"), (2, "b"), (3, "c"), (4, "d")] {
            table.insert(n, label);
        }
        assert_eq!(table.remove(&2), Some("b"));
        assert_eq!(table.remove(&2), None);
        assert_eq!(table.keys().copied().collect::<Vec<_>>(), vec![1, 3, 4]);
        assert!(table.rank(&1) < table.rank(&3));
        assert_eq!(table.rank(&2), None);

        // replacing keeps the position, re-adding goes to the end
        assert_eq!(table.insert(1, "z"), Some("a"));
        table.insert(2, "b");
        let entries: Vec<(&u32, &&str)> = table.iter().collect();
        assert_eq!(entries, vec![(&1, &"z"), (&3, &"c"), (&4, &"d"), (&2, &"b")]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_node_table_compacts_in_order() {
        let mut table: NodeTable<u32, u32> = NodeTable::with_capacity(8);
        for n in 0..1_000 {
            table.insert(n, n * 10);
        }
        for n in (0..1_000).filter(|n| n % 4 != 0) {
            table.remove(&n);
        }
        assert_eq!(table.len(), 250);
        assert!(table.slots.len() <= 2 * table.len() + COMPACT_SLACK);
        let kept: Vec<u32> = table.keys().copied().collect();
        assert_eq!(kept, (0..1_000).step_by(4).collect::<Vec<_>>());
        for pair in kept.windows(2) {
            assert!(table.rank(&pair[0]) < table.rank(&pair[1]));
        }
        assert_eq!(table.get(&996), Some(&9_960));
        if let Some(v) = table.get_mut(&4) {
            *v = 1;
        }
        assert_eq!(table.values().take(2).copied().collect::<Vec<_>>(), vec![0, 1]);

        table.clear();
        assert!(table.is_empty());
        assert!(!table.contains_key(&0));
    }

    #[test]
    fn test_add_node_is_idempotent() {
        let mut store: AdjacencyStore<u32, SingleEdge> = AdjacencyStore::new();
        assert!(store.add_node(1));
        assert!(!store.add_node(1));
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn test_set_and_take_slot() {
        let mut store: AdjacencyStore<u32, SingleEdge> = AdjacencyStore::new();
        store.set_slot(&1, 2, single());
        assert!(store.contains(&1));
        assert!(store.has_slot(&1, &2));
        // The store is one-sided
        assert!(!store.contains(&2));

        assert!(store.take_slot(&1, &2).is_some());
        assert!(!store.has_slot(&1, &2));
        assert!(store.take_slot(&1, &2).is_none());
    }

    #[test]
    fn test_neighbor_order_survives_removal() {
        let mut store: AdjacencyStore<u32, SingleEdge> = AdjacencyStore::new();
        for v in [5, 3, 9, 1] {
            store.set_slot(&0, v, single());
        }
        store.take_slot(&0, &3);
        let order: Vec<u32> = store.neighbors(&0).unwrap().keys().copied().collect();
        assert_eq!(order, vec![5, 9, 1]);
    }

    #[test]
    fn test_multi_next_key_skips_used() {
        let mut slot = MultiEdge::default();
        assert_eq!(slot.next_key(), EdgeKey::Index(0));
        slot.insert(EdgeKey::Index(1), AttrRecord::new());
        // len is 1 and key 1 is taken
        assert_eq!(slot.next_key(), EdgeKey::Index(2));
        slot.insert(EdgeKey::Name("x".into()), AttrRecord::new());
        assert_eq!(slot.next_key(), EdgeKey::Index(2));
        assert_eq!(slot.last_key(), Some(&EdgeKey::Name("x".into())));
    }

    #[test]
    fn test_degree_counts_loops_twice() {
        let mut store: AdjacencyStore<u32, MultiEdge> = AdjacencyStore::new();
        let mut slot = MultiEdge::default();
        slot.insert(EdgeKey::Index(0), AttrRecord::from_map(attrs([("w", 2.0)])));
        slot.insert(EdgeKey::Index(1), AttrRecord::new());
        store.set_slot(&1, 2, slot);
        let mut loop_slot = MultiEdge::default();
        loop_slot.insert(EdgeKey::Index(0), AttrRecord::from_map(attrs([("w", 3.0)])));
        store.set_slot(&1, 1, loop_slot);

        assert_eq!(store.side_count(&1), Some(3));
        assert_eq!(store.degree(&1), Some(4));
        assert_eq!(store.weighted_degree(&1, "w"), Some(2.0 + 1.0 + 3.0 + 3.0));
        assert_eq!(store.degree(&7), None);
        assert_eq!(store.selfloop_count(), 1);
    }

    #[test]
    fn test_edge_entries_grouped() {
        let mut store: AdjacencyStore<u32, MultiEdge> = AdjacencyStore::new();
        let mut a = MultiEdge::default();
        a.insert(EdgeKey::Index(0), AttrRecord::new());
        a.insert(EdgeKey::Index(1), AttrRecord::new());
        store.set_slot(&0, 1, a);
        let mut b = MultiEdge::default();
        b.insert(EdgeKey::Index(0), AttrRecord::new());
        store.set_slot(&0, 2, b);

        let seen: Vec<(u32, u64)> = store
            .edge_entries(&0)
            .unwrap()
            .map(|e| (*e.node, e.key.and_then(EdgeKey::as_index).unwrap()))
            .collect();
        assert_eq!(seen, vec![(1, 0), (1, 1), (2, 0)]);
    }
}
