//! Capability surface shared by both backends.
//!
//! `Dictionary` is the unordered contract; `OrderedDictionary` extends it
//! with range operations and requires keys to be totally ordered by the
//! backend's comparator. The two backends honor the same contract but not
//! the same cost model: the hash backend is expected O(1) per point
//! operation, the tree backend O(height) with no balancing guarantee.

use crate::error::Result;

/// Stateful external iterator over a container's entries.
///
/// A cursor borrows the container it came from for `'a`, so the container
/// cannot be structurally mutated while the cursor is alive.
pub trait Cursor<'a, K: 'a, V: 'a> {
    /// True while an entry is available at the cursor position.
    fn has_next(&self) -> bool;

    /// The entry at the cursor position, or `IteratorExhausted` when
    /// `has_next` is false.
    fn current(&self) -> Result<(&'a K, &'a V)>;

    /// Moves past the current entry, or fails with `IteratorExhausted` when
    /// `has_next` is false.
    fn advance(&mut self) -> Result<()>;
}

/// Mutable mapping from unique keys to values. The last `insert` for a key
/// wins.
pub trait Dictionary<K, V> {
    type Cursor<'c>: Cursor<'c, K, V>
    where
        Self: 'c,
        K: 'c,
        V: 'c;

    /// Binds `key` to `value`, overwriting any previous binding.
    fn insert(&mut self, key: K, value: V);

    /// The value bound to `key`, or `KeyNotFound`.
    fn get(&self, key: &K) -> Result<&V>;

    fn contains(&self, key: &K) -> bool;

    /// Unbinds `key`, returning the old value, or `KeyNotFound`.
    fn remove(&mut self, key: &K) -> Result<V>;

    /// Number of live entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visits every entry until the visitor returns false.
    fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&K, &V) -> bool;

    fn cursor(&self) -> Self::Cursor<'_>;
}

/// Dictionary over totally ordered keys, adding range scans. Bounds are
/// inclusive; an absent bound leaves that side open.
pub trait OrderedDictionary<K, V>: Dictionary<K, V> {
    /// Visits entries with keys in `[from, to]` in ascending order until the
    /// visitor returns false.
    fn range_for_each<F>(&self, from: Option<&K>, to: Option<&K>, visit: F)
    where
        F: FnMut(&K, &V) -> bool;

    /// Cursor over entries with keys in `[from, to]`, ascending.
    fn range_cursor(&self, from: Option<K>, to: Option<K>) -> Self::Cursor<'_>;
}
