//! probetree: single-threaded keyed containers with two interchangeable
//! backends behind one dictionary surface.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one capability surface (`Dictionary`, plus `OrderedDictionary`
//!   for range queries) served by two backends that differ only in cost
//!   model and ordering guarantees, so callers can swap one for the other.
//! - Layers:
//!   - `KeyBytes` + `fnv`: canonical key serialization and the 64-bit
//!     FNV-1a digest that picks a bucket.
//!   - `ProbeHashMap<K, V>`: open-addressing slot buffer with linear
//!     probing, tombstones and load-factor-driven growth. Expected O(1)
//!     point operations, unordered iteration in slot order.
//!   - `TreeMap<K, V, C>`: binary search tree over an injected three-way
//!     comparator, stored in a slotmap arena with index links. O(height)
//!     point operations (no rebalancing), in-order iteration and pruned
//!     range scans.
//!   - Cursors: external iteration objects sharing one contract
//!     (`has_next`/`current`/`advance`). The hash cursor is a position in
//!     the slot buffer; the tree cursor keeps a LIFO of pending ancestors
//!     plus optional range bounds captured at construction.
//!
//! Constraints
//! - Single-threaded: no locking or atomics; callers needing concurrent
//!   access serialize externally.
//! - A live cursor borrows its container, so structural mutation while a
//!   cursor is active is rejected at compile time.
//! - Misuse surfaces as `DictError` (`KeyNotFound`, `IteratorExhausted`) at
//!   the failing call, never as a process abort; callers decide whether to
//!   recover.
//!
//! Notes and non-goals
//! - The tree does not self-balance; worst-case height is linear in the
//!   entry count.
//! - Hash capacity only grows (2x per rehash, 0.70 load threshold,
//!   16-slot initial buffer), never shrinks.
//! - Key serialization collisions are legal: probing resolves them through
//!   the key type's own equality, at the cost of extra probe steps.
//! - Hash lookups stop at the first vacated slot while removal scans past
//!   vacated slots to the first empty one; `probe_hash_map` documents the
//!   resulting asymmetry.

mod dictionary;
mod error;
mod fnv;
mod key_bytes;
mod probe_hash_map;
mod probe_hash_map_proptest;
mod tree_map;
mod tree_map_proptest;

// Public surface
pub use dictionary::{Cursor, Dictionary, OrderedDictionary};
pub use error::{DictError, Result};
pub use fnv::fnv1a;
pub use key_bytes::KeyBytes;
pub use probe_hash_map::{HashCursor, ProbeHashMap};
pub use tree_map::{TreeCursor, TreeMap};
