//! Binary search tree over an injected three-way comparator.
//!
//! Nodes live in a slotmap arena and link to children by slot key, so
//! deletion can reparent subtrees without any aliasing of node storage. The
//! tree does not rebalance; point operations are O(height).

use crate::error::{DictError, Result};
use slotmap::{DefaultKey, SlotMap};
use std::cmp::Ordering;

struct Node<K, V> {
    key: K,
    value: V,
    left: Option<DefaultKey>,
    right: Option<DefaultKey>,
}

/// Ordered dictionary. Every key in a node's left subtree compares below the
/// node's key and every key in its right subtree above it, under `C`.
pub struct TreeMap<K, V, C = fn(&K, &K) -> Ordering> {
    nodes: SlotMap<DefaultKey, Node<K, V>>,
    root: Option<DefaultKey>,
    cmp: C,
}

fn natural_order<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Tree ordered by the key type's `Ord`.
    pub fn new() -> Self {
        Self::with_comparator(natural_order::<K> as fn(&K, &K) -> Ordering)
    }
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// Tree ordered by `cmp`, which must implement a strict total order:
    /// `Less` when the first key sorts below the second, `Equal` only for
    /// interchangeable keys, `Greater` otherwise.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
            cmp,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Binds `key` to `value`, overwriting any previous binding for a
    /// comparator-equal key.
    pub fn insert(&mut self, key: K, value: V) {
        self.root = Some(self.insert_at(self.root, key, value));
    }

    fn insert_at(&mut self, node: Option<DefaultKey>, key: K, value: V) -> DefaultKey {
        let Some(id) = node else {
            return self.nodes.insert(Node {
                key,
                value,
                left: None,
                right: None,
            });
        };
        match (self.cmp)(&key, &self.nodes[id].key) {
            Ordering::Equal => self.nodes[id].value = value,
            Ordering::Less => {
                let child = self.insert_at(self.nodes[id].left, key, value);
                self.nodes[id].left = Some(child);
            }
            Ordering::Greater => {
                let child = self.insert_at(self.nodes[id].right, key, value);
                self.nodes[id].right = Some(child);
            }
        }
        id
    }

    /// The value bound to `key`, or `KeyNotFound`.
    pub fn get(&self, key: &K) -> Result<&V> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            match (self.cmp)(key, &node.key) {
                Ordering::Equal => return Ok(&node.value),
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        Err(DictError::KeyNotFound)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_ok()
    }

    /// Unbinds `key` and returns its value, or `KeyNotFound`.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        let (root, value) = self.remove_at(self.root, key)?;
        self.root = root;
        Ok(value)
    }

    fn remove_at(&mut self, node: Option<DefaultKey>, key: &K) -> Result<(Option<DefaultKey>, V)> {
        let id = node.ok_or(DictError::KeyNotFound)?;
        match (self.cmp)(key, &self.nodes[id].key) {
            Ordering::Less => {
                let (child, value) = self.remove_at(self.nodes[id].left, key)?;
                self.nodes[id].left = child;
                Ok((Some(id), value))
            }
            Ordering::Greater => {
                let (child, value) = self.remove_at(self.nodes[id].right, key)?;
                self.nodes[id].right = child;
                Ok((Some(id), value))
            }
            Ordering::Equal => Ok(self.unlink(id)),
        }
    }

    /// Detaches `id`, returning the subtree that takes its place and the
    /// removed value.
    fn unlink(&mut self, id: DefaultKey) -> (Option<DefaultKey>, V) {
        let (left, right) = (self.nodes[id].left, self.nodes[id].right);
        match (left, right) {
            (None, None) => (None, self.take(id).value),
            (Some(child), None) | (None, Some(child)) => (Some(child), self.take(id).value),
            (Some(_), Some(right)) => {
                // Two children: splice the in-order successor (leftmost of
                // the right subtree, which has no left child of its own)
                // into this node's place. The reported value is the removed
                // node's own, not the successor's.
                let (new_right, successor) = self.detach_min(right);
                let node = &mut self.nodes[id];
                node.right = new_right;
                node.key = successor.key;
                let old = std::mem::replace(&mut node.value, successor.value);
                (Some(id), old)
            }
        }
    }

    /// Removes the leftmost node of the subtree rooted at `id`, returning
    /// the remaining subtree and the detached node.
    fn detach_min(&mut self, id: DefaultKey) -> (Option<DefaultKey>, Node<K, V>) {
        match self.nodes[id].left {
            Some(left) => {
                let (child, min) = self.detach_min(left);
                self.nodes[id].left = child;
                (Some(id), min)
            }
            None => {
                let right = self.nodes[id].right;
                (right, self.take(id))
            }
        }
    }

    fn take(&mut self, id: DefaultKey) -> Node<K, V> {
        self.nodes.remove(id).expect("linked node must be live in the arena")
    }

    /// Visits entries in key order until the visitor returns false; a false
    /// result stops the whole traversal, not just the current subtree.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.in_order(self.root, &mut visit);
    }

    fn in_order<F>(&self, node: Option<DefaultKey>, visit: &mut F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        let Some(id) = node else { return true };
        let n = &self.nodes[id];
        if !self.in_order(n.left, visit) {
            return false;
        }
        if !visit(&n.key, &n.value) {
            return false;
        }
        self.in_order(n.right, visit)
    }

    /// Visits entries with keys in `[from, to]` in ascending order until the
    /// visitor returns false. Either bound may be absent.
    pub fn range_for_each<F>(&self, from: Option<&K>, to: Option<&K>, mut visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.in_order_range(self.root, from, to, &mut visit);
    }

    fn in_order_range<F>(
        &self,
        node: Option<DefaultKey>,
        from: Option<&K>,
        to: Option<&K>,
        visit: &mut F,
    ) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        let Some(id) = node else { return true };
        let n = &self.nodes[id];
        // Below the lower bound: the node and its whole left subtree are out
        // of range, so only the right subtree can contribute.
        if let Some(lo) = from {
            if (self.cmp)(&n.key, lo).is_lt() {
                return self.in_order_range(n.right, from, to, visit);
            }
        }
        if !self.in_order_range(n.left, from, to, visit) {
            return false;
        }
        // Above the upper bound: stop this branch, but let already-visited
        // siblings of enclosing calls continue.
        if let Some(hi) = to {
            if (self.cmp)(&n.key, hi).is_gt() {
                return true;
            }
        }
        if !visit(&n.key, &n.value) {
            return false;
        }
        self.in_order_range(n.right, from, to, visit)
    }

    /// Cursor over all entries in key order.
    pub fn cursor(&self) -> TreeCursor<'_, K, V, C> {
        self.range_cursor(None, None)
    }

    /// Cursor over entries with keys in `[from, to]`, ascending. Bounds are
    /// captured at construction.
    pub fn range_cursor(&self, from: Option<K>, to: Option<K>) -> TreeCursor<'_, K, V, C> {
        let mut cursor = TreeCursor {
            map: self,
            stack: Vec::new(),
            from,
            to,
        };
        cursor.descend_left(self.root);
        cursor
    }
}

/// Cursor over a `TreeMap`: a LIFO of nodes whose left spine has been fully
/// descended but which have not been emitted yet, plus the optional bounds.
pub struct TreeCursor<'a, K, V, C = fn(&K, &K) -> Ordering> {
    map: &'a TreeMap<K, V, C>,
    stack: Vec<DefaultKey>,
    from: Option<K>,
    to: Option<K>,
}

impl<'a, K, V, C> TreeCursor<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// Walks the left spine from `node`, stacking each pending ancestor.
    /// Nodes below the lower bound divert right instead of stacking.
    fn descend_left(&mut self, mut node: Option<DefaultKey>) {
        while let Some(id) = node {
            let n = &self.map.nodes[id];
            match &self.from {
                Some(lo) if (self.map.cmp)(&n.key, lo).is_lt() => node = n.right,
                _ => {
                    self.stack.push(id);
                    node = n.left;
                }
            }
        }
    }

    fn within_upper(&self, id: DefaultKey) -> bool {
        match &self.to {
            Some(hi) => !(self.map.cmp)(&self.map.nodes[id].key, hi).is_gt(),
            None => true,
        }
    }

    /// False once the stack is empty or the next key sits above the upper
    /// bound; termination is by comparison, not exhaustion.
    pub fn has_next(&self) -> bool {
        self.stack.last().is_some_and(|&top| self.within_upper(top))
    }

    pub fn current(&self) -> Result<(&'a K, &'a V)> {
        match self.stack.last() {
            Some(&top) if self.within_upper(top) => {
                let map = self.map;
                let node = &map.nodes[top];
                Ok((&node.key, &node.value))
            }
            _ => Err(DictError::IteratorExhausted),
        }
    }

    pub fn advance(&mut self) -> Result<()> {
        if !self.has_next() {
            return Err(DictError::IteratorExhausted);
        }
        let id = self.stack.pop().expect("has_next implies a stacked node");
        self.descend_left(self.map.nodes[id].right);
        Ok(())
    }
}

impl<'a, K, V, C> Iterator for TreeCursor<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.current().ok()?;
        let _ = self.advance();
        Some(item)
    }
}

impl<'a, K, V, C> crate::dictionary::Cursor<'a, K, V> for TreeCursor<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn has_next(&self) -> bool {
        TreeCursor::has_next(self)
    }

    fn current(&self) -> Result<(&'a K, &'a V)> {
        TreeCursor::current(self)
    }

    fn advance(&mut self) -> Result<()> {
        TreeCursor::advance(self)
    }
}

impl<K, V, C> crate::dictionary::Dictionary<K, V> for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Cursor<'c> = TreeCursor<'c, K, V, C>
    where
        Self: 'c,
        K: 'c,
        V: 'c;

    fn insert(&mut self, key: K, value: V) {
        TreeMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Result<&V> {
        TreeMap::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        TreeMap::contains(self, key)
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        TreeMap::remove(self, key)
    }

    fn len(&self) -> usize {
        TreeMap::len(self)
    }

    fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        TreeMap::for_each(self, visit)
    }

    fn cursor(&self) -> Self::Cursor<'_> {
        TreeMap::cursor(self)
    }
}

impl<K, V, C> crate::dictionary::OrderedDictionary<K, V> for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn range_for_each<F>(&self, from: Option<&K>, to: Option<&K>, visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        TreeMap::range_for_each(self, from, to, visit)
    }

    fn range_cursor(&self, from: Option<K>, to: Option<K>) -> Self::Cursor<'_> {
        TreeMap::range_cursor(self, from, to)
    }
}
