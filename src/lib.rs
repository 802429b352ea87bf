//! open-containers: single-threaded in-memory containers meant as building
//! blocks for other programs.
//!
//! Internal Design:
//!
//! Summary
//! - Centerpiece: `HashTable<V, H>`, a string-keyed open-addressing map with
//!   linear probing, tombstone deletion, load-factor-triggered doubling and
//!   a pluggable `KeyHasher` (djb2 by default).
//! - Collaborators:
//!   - `List<T>`: singly linked chain with O(1) head/tail, nodes stored in a
//!     generational arena.
//!   - `Stack<T>` / `Queue<T>`: LIFO/FIFO adapters over `List`.
//!   - `Bst<T, C>`: unbalanced binary search tree over a comparator.
//!
//! HashTable invariants
//! - Capacity is never below `MIN_CAPACITY`.
//! - A stored key is reachable from its home slot `hash % capacity` before
//!   any `Empty` slot; tombstones never end a probe.
//! - `len()` equals the number of occupied slots; tombstones are excluded.
//! - Growth is evaluated before every insert as if the key were new: when
//!   `(len + 1) / capacity > MAX_LOAD_FACTOR` the table doubles.
//! - Resizing moves live entries into a fresh array and drops all
//!   tombstones. Nothing else compacts tombstones; a miss may reuse the
//!   first tombstone on its probe path as its insertion slot.
//!
//! Ownership
//! - The table owns a private `String` copy of every key and releases it on
//!   removal or drop.
//! - Values are whatever `V` the caller picks. Store `&T` or `Rc<T>` to keep
//!   ownership outside the table; `destroy_with` hands each surviving value
//!   to a caller hook exactly once.
//! - Hash functions are borrowed behaviour (`KeyHasher`), never inspected.
//!
//! Failure model
//! - Allocation failures while growing or copying a key surface as
//!   `TableError` and leave the table untouched.
//! - Not-found is a normal outcome (`None`/`false`), never an error.
//! - A probe that finds neither the key nor a free slot is an invariant
//!   breach and panics; the load factor keeps it unreachable.
//!
//! Notes and non-goals
//! - Single-threaded only: no internal synchronization.
//! - No tree balancing; a sorted insert sequence degrades `Bst` to a list.
//! - Keys are strings only; no persistence.

pub mod bst;
mod error;
pub mod hash_fn;
pub mod hash_table;
mod hash_table_proptest;
pub mod list;
pub mod queue;
pub mod stack;

// Public surface
pub use bst::{Bst, Traversal};
pub use error::{ListError, TableError};
pub use hash_fn::{BuildKeyHasher, Djb2, FastKeyHasher, KeyHasher};
pub use hash_table::{HashTable, MAX_LOAD_FACTOR, MIN_CAPACITY};
pub use list::List;
pub use queue::Queue;
pub use stack::Stack;
