//! Closed hash table: open addressing with linear probing and tombstones.
//!
//! Point operations hash the key's canonical bytes (FNV-1a) to a bucket and
//! walk the probe sequence from there. Removal leaves a tombstone so that
//! probe chains for other keys stay connected. Growth is driven by the load
//! metric `(live + tombstones) / capacity`.
//!
//! Probe termination is asymmetric: `insert`/`get`/`contains` stop at the
//! first empty OR vacated slot, while `remove` scans past vacated slots to
//! the first empty one. A key sitting past a tombstone in its probe chain is
//! therefore unreachable by `get`/`contains` yet still reachable by
//! `remove`. See `lookup_stops_at_tombstone_but_removal_probes_past` in the
//! tests for a pinned example.

use crate::error::{DictError, Result};
use crate::fnv::fnv1a;
use crate::key_bytes::KeyBytes;

const INITIAL_CAPACITY: usize = 16;
const GROWTH_FACTOR: usize = 2;
const MAX_LOAD_FACTOR: f64 = 0.70;

enum Slot<K, V> {
    Empty,
    Occupied { key: K, value: V },
    /// Tombstone: keeps probe chains through this slot connected.
    Deleted,
}

/// Unordered dictionary backed by a contiguous slot buffer.
pub struct ProbeHashMap<K, V> {
    slots: Vec<Slot<K, V>>,
    live: usize,
    deleted: usize,
}

impl<K, V> ProbeHashMap<K, V>
where
    K: KeyBytes + Eq,
{
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Table with room for at least `capacity` slots (never below the
    /// default). Capacity only ever grows from there.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity.max(INITIAL_CAPACITY)),
            live: 0,
            deleted: 0,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Current slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn bucket(&self, key: &K) -> usize {
        (fnv1a(key.key_bytes().as_ref()) % self.slots.len() as u64) as usize
    }

    /// Walks the probe sequence for `key`, stopping at the first slot that
    /// is empty, vacated, or occupied by the key itself. The load ceiling
    /// guarantees a non-occupied slot exists, so the walk terminates.
    fn probe_to_terminal(&self, key: &K) -> usize {
        let mut idx = self.bucket(key);
        loop {
            match &self.slots[idx] {
                Slot::Occupied { key: k, .. } if k != key => idx = (idx + 1) % self.slots.len(),
                _ => return idx,
            }
        }
    }

    /// Binds `key` to `value`, overwriting any previous binding.
    pub fn insert(&mut self, key: K, value: V) {
        if self.over_load_factor() {
            self.grow();
        }
        let idx = self.probe_to_terminal(&key);
        match &mut self.slots[idx] {
            Slot::Occupied { value: v, .. } => *v = value,
            slot => {
                if matches!(slot, Slot::Deleted) {
                    self.deleted -= 1;
                }
                *slot = Slot::Occupied { key, value };
                self.live += 1;
            }
        }
    }

    /// The value bound to `key`, or `KeyNotFound`.
    pub fn get(&self, key: &K) -> Result<&V> {
        match &self.slots[self.probe_to_terminal(key)] {
            Slot::Occupied { key: k, value } if k == key => Ok(value),
            _ => Err(DictError::KeyNotFound),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_ok()
    }

    /// Unbinds `key` and returns its value, or `KeyNotFound` once the scan
    /// reaches an empty slot. Unlike lookups, this scan crosses vacated
    /// slots.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        if self.over_load_factor() {
            self.grow();
        }
        let cap = self.slots.len();
        let mut idx = self.bucket(key);
        loop {
            let matched = match &self.slots[idx] {
                Slot::Empty => return Err(DictError::KeyNotFound),
                Slot::Occupied { key: k, .. } => k == key,
                Slot::Deleted => false,
            };
            if matched {
                self.live -= 1;
                self.deleted += 1;
                match std::mem::replace(&mut self.slots[idx], Slot::Deleted) {
                    Slot::Occupied { value, .. } => return Ok(value),
                    _ => unreachable!("matched slot must be occupied"),
                }
            }
            idx = (idx + 1) % cap;
        }
    }

    fn over_load_factor(&self) -> bool {
        (self.live + self.deleted) as f64 / self.slots.len() as f64 > MAX_LOAD_FACTOR
    }

    /// Doubles the slot buffer and replays live entries through `insert` in
    /// ascending original-slot order, which makes post-growth placement
    /// deterministic. Tombstones are not carried over.
    fn grow(&mut self) {
        let grown = empty_slots(self.slots.len() * GROWTH_FACTOR);
        let old = std::mem::replace(&mut self.slots, grown);
        self.live = 0;
        self.deleted = 0;
        for slot in old {
            if let Slot::Occupied { key, value } = slot {
                self.insert(key, value);
            }
        }
    }

    /// Visits entries in slot order until the visitor returns false.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for slot in &self.slots {
            if let Slot::Occupied { key, value } = slot {
                if !visit(key, value) {
                    return;
                }
            }
        }
    }

    /// Cursor over entries in slot order.
    pub fn cursor(&self) -> HashCursor<'_, K, V> {
        let mut cursor = HashCursor {
            slots: &self.slots,
            pos: 0,
        };
        cursor.skip_vacant();
        cursor
    }
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    std::iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

impl<K, V> Default for ProbeHashMap<K, V>
where
    K: KeyBytes + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Cursor over a `ProbeHashMap`, advanced by linear scan of the slot
/// buffer. `pos` always rests on an occupied slot or one past the end.
pub struct HashCursor<'a, K, V> {
    slots: &'a [Slot<K, V>],
    pos: usize,
}

impl<'a, K, V> HashCursor<'a, K, V> {
    fn skip_vacant(&mut self) {
        while self.pos < self.slots.len()
            && !matches!(self.slots[self.pos], Slot::Occupied { .. })
        {
            self.pos += 1;
        }
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.slots.len()
    }

    pub fn current(&self) -> Result<(&'a K, &'a V)> {
        match self.slots.get(self.pos) {
            Some(Slot::Occupied { key, value }) => Ok((key, value)),
            _ => Err(DictError::IteratorExhausted),
        }
    }

    pub fn advance(&mut self) -> Result<()> {
        if !self.has_next() {
            return Err(DictError::IteratorExhausted);
        }
        self.pos += 1;
        self.skip_vacant();
        Ok(())
    }
}

impl<'a, K, V> Iterator for HashCursor<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.current().ok()?;
        let _ = self.advance();
        Some(item)
    }
}

impl<'a, K, V> crate::dictionary::Cursor<'a, K, V> for HashCursor<'a, K, V> {
    fn has_next(&self) -> bool {
        HashCursor::has_next(self)
    }

    fn current(&self) -> Result<(&'a K, &'a V)> {
        HashCursor::current(self)
    }

    fn advance(&mut self) -> Result<()> {
        HashCursor::advance(self)
    }
}

impl<K, V> crate::dictionary::Dictionary<K, V> for ProbeHashMap<K, V>
where
    K: KeyBytes + Eq,
{
    type Cursor<'c> = HashCursor<'c, K, V>
    where
        Self: 'c,
        K: 'c,
        V: 'c;

    fn insert(&mut self, key: K, value: V) {
        ProbeHashMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Result<&V> {
        ProbeHashMap::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        ProbeHashMap::contains(self, key)
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        ProbeHashMap::remove(self, key)
    }

    fn len(&self) -> usize {
        ProbeHashMap::len(self)
    }

    fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        ProbeHashMap::for_each(self, visit)
    }

    fn cursor(&self) -> Self::Cursor<'_> {
        ProbeHashMap::cursor(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Key whose serialization is constant: every key of this type shares a
    /// single probe chain, so slot placement follows insertion order
    /// deterministically. Equality still distinguishes keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Colliding(u32);

    impl KeyBytes for Colliding {
        type Bytes = [u8; 1];

        fn key_bytes(&self) -> Self::Bytes {
            [0]
        }
    }

    /// Invariant: a fresh table is empty and reports every lookup kind of
    /// miss as `KeyNotFound` (or false for `contains`).
    #[test]
    fn empty_table_reports_misses() {
        let mut m: ProbeHashMap<u32, String> = ProbeHashMap::new();
        assert_eq!(m.len(), 0);
        assert!(m.is_empty());
        assert_eq!(m.capacity(), 16);
        assert!(!m.contains(&7));
        assert_eq!(m.get(&7), Err(DictError::KeyNotFound));
        assert_eq!(m.remove(&7), Err(DictError::KeyNotFound));
    }

    /// Invariant: insert/get round-trips, duplicate inserts overwrite in
    /// place and do not change `len`.
    #[test]
    fn insert_get_roundtrip_and_overwrite() {
        let mut m: ProbeHashMap<String, i32> = ProbeHashMap::new();
        m.insert("one".to_string(), 1);
        m.insert("two".to_string(), 2);
        assert_eq!(m.get(&"one".to_string()), Ok(&1));
        assert_eq!(m.get(&"two".to_string()), Ok(&2));
        assert_eq!(m.len(), 2);

        m.insert("two".to_string(), 22);
        assert_eq!(m.get(&"two".to_string()), Ok(&22));
        assert_eq!(m.len(), 2);
    }

    /// Invariant: the 13th insertion into a fresh table is the first one to
    /// find `(live + tombstones) / capacity` above 0.70, so exactly one
    /// growth to capacity 32 happens immediately before it.
    #[test]
    fn growth_happens_exactly_before_thirteenth_insert() {
        let mut m: ProbeHashMap<u32, u32> = ProbeHashMap::new();
        for k in 0..12 {
            m.insert(k, k * 10);
        }
        assert_eq!(m.capacity(), 16);

        m.insert(12, 120);
        assert_eq!(m.capacity(), 32);
        assert_eq!(m.len(), 13);
        for k in 0..13 {
            assert_eq!(m.get(&k), Ok(&(k * 10)));
        }
    }

    /// Invariant: `remove` applies the same load check as `insert`, so a
    /// removal from a table above the threshold grows it first.
    #[test]
    fn remove_grows_table_above_threshold() {
        let mut m: ProbeHashMap<Colliding, u32> = ProbeHashMap::new();
        for k in 0..12 {
            m.insert(Colliding(k), k);
        }
        assert_eq!(m.capacity(), 16);

        assert_eq!(m.remove(&Colliding(0)), Ok(0));
        assert_eq!(m.capacity(), 32);
        assert_eq!(m.len(), 11);
        for k in 1..12 {
            assert_eq!(m.get(&Colliding(k)), Ok(&k));
        }
    }

    /// Invariant: removing a key and re-inserting it makes it immediately
    /// findable again by `get`, `contains`, and iteration.
    #[test]
    fn remove_then_reinsert_is_findable() {
        let mut m: ProbeHashMap<String, i32> = ProbeHashMap::new();
        m.insert("k".to_string(), 1);
        assert_eq!(m.remove(&"k".to_string()), Ok(1));
        assert!(!m.contains(&"k".to_string()));
        assert_eq!(m.len(), 0);

        m.insert("k".to_string(), 2);
        assert!(m.contains(&"k".to_string()));
        assert_eq!(m.get(&"k".to_string()), Ok(&2));
        assert_eq!(m.len(), 1);

        let seen: Vec<(String, i32)> = m.cursor().map(|(k, v)| (k.clone(), *v)).collect();
        assert_eq!(seen, vec![("k".to_string(), 2)]);
    }

    /// Invariant: colliding keys are told apart by equality alone; a full
    /// shared probe chain still resolves every key.
    #[test]
    fn colliding_keys_resolve_by_equality() {
        let mut m: ProbeHashMap<Colliding, u32> = ProbeHashMap::new();
        for k in 0..5 {
            m.insert(Colliding(k), k + 100);
        }
        assert_eq!(m.len(), 5);
        for k in 0..5 {
            assert_eq!(m.get(&Colliding(k)), Ok(&(k + 100)));
        }
        assert!(!m.contains(&Colliding(9)));
    }

    /// Invariant (probe asymmetry): lookups stop at
    /// the first vacated slot in the probe chain, while removal scans past
    /// it to the first empty slot. A key past a tombstone is invisible to
    /// `get`/`contains` but still removable.
    #[test]
    fn lookup_stops_at_tombstone_but_removal_probes_past() {
        let mut m: ProbeHashMap<Colliding, &str> = ProbeHashMap::new();
        m.insert(Colliding(1), "first");
        m.insert(Colliding(2), "second");
        m.insert(Colliding(3), "third");

        // Vacating the middle of the chain shadows everything behind it.
        assert_eq!(m.remove(&Colliding(2)), Ok("second"));
        assert_eq!(m.get(&Colliding(3)), Err(DictError::KeyNotFound));
        assert!(!m.contains(&Colliding(3)));

        // The removal scan crosses the tombstone and still finds the key.
        assert_eq!(m.remove(&Colliding(3)), Ok("third"));
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(&Colliding(1)), Ok(&"first"));
    }

    /// Invariant: tombstones are reclaimed by later insertions; a chain of
    /// removals followed by fresh keys ends with no tombstones outstanding
    /// and no growth.
    #[test]
    fn tombstones_are_reclaimed_by_reinsertion() {
        let mut m: ProbeHashMap<Colliding, u32> = ProbeHashMap::new();
        for k in 0..7 {
            m.insert(Colliding(k), k);
        }
        for k in 0..7 {
            assert_eq!(m.remove(&Colliding(k)), Ok(k));
        }
        assert_eq!(m.len(), 0);

        for k in 7..14 {
            m.insert(Colliding(k), k);
        }
        assert_eq!(m.len(), 7);
        assert_eq!(m.capacity(), 16);
        for k in 7..14 {
            assert_eq!(m.get(&Colliding(k)), Ok(&k));
        }
        for k in 0..7 {
            assert!(!m.contains(&Colliding(k)));
        }
    }

    /// Invariant: `for_each` visits each live entry exactly once and stops
    /// scanning the moment the visitor returns false.
    #[test]
    fn visitor_sees_all_entries_and_short_circuits() {
        let mut m: ProbeHashMap<u32, u32> = ProbeHashMap::new();
        for k in 0..6 {
            m.insert(k, k);
        }

        let mut seen = BTreeSet::new();
        m.for_each(|k, _| {
            seen.insert(*k);
            true
        });
        assert_eq!(seen, (0..6).collect());

        let mut visits = 0;
        m.for_each(|_, _| {
            visits += 1;
            visits < 3
        });
        assert_eq!(visits, 3);
    }

    /// Invariant: a cursor yields every live entry exactly once, and after
    /// exhaustion `current` and `advance` both fail while `has_next` stays
    /// false.
    #[test]
    fn cursor_walks_entries_once_then_exhausts() {
        let mut m: ProbeHashMap<u32, u32> = ProbeHashMap::new();
        for k in 0..4 {
            m.insert(k, k * 2);
        }

        let mut c = m.cursor();
        let mut seen = BTreeSet::new();
        while c.has_next() {
            let (k, v) = c.current().unwrap();
            assert_eq!(*v, k * 2);
            seen.insert(*k);
            c.advance().unwrap();
        }
        assert_eq!(seen, (0..4).collect());

        assert!(!c.has_next());
        assert_eq!(c.current(), Err(DictError::IteratorExhausted));
        assert_eq!(c.advance(), Err(DictError::IteratorExhausted));
        assert!(!c.has_next());
    }

    /// Invariant: iterating twice over an unmodified table yields identical
    /// sequences, and the cursor sequence matches the visitor sequence.
    #[test]
    fn iteration_is_idempotent_and_consistent() {
        let mut m: ProbeHashMap<u32, u32> = ProbeHashMap::new();
        for k in [9, 4, 27, 16, 1] {
            m.insert(k, k);
        }

        let first: Vec<u32> = m.cursor().map(|(k, _)| *k).collect();
        let second: Vec<u32> = m.cursor().map(|(k, _)| *k).collect();
        assert_eq!(first, second);

        let mut visited = Vec::new();
        m.for_each(|k, _| {
            visited.push(*k);
            true
        });
        assert_eq!(first, visited);
    }

    /// Invariant: a cursor over an empty table is born exhausted.
    #[test]
    fn cursor_over_empty_table_is_exhausted() {
        let m: ProbeHashMap<u32, u32> = ProbeHashMap::new();
        let c = m.cursor();
        assert!(!c.has_next());
        assert_eq!(c.current(), Err(DictError::IteratorExhausted));
    }
}
