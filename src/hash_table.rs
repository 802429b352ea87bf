//! HashTable: string-keyed open addressing with linear probing and tombstones.

use crate::error::TableError;
use crate::hash_fn::{Djb2, KeyHasher};
use core::fmt;
use log::{debug, trace};

/// Smallest slot count a table is ever created or resized with.
pub const MIN_CAPACITY: usize = 3;
/// Growth triggers when `(len + 1) / capacity` would exceed this ratio.
pub const MAX_LOAD_FACTOR: f64 = 0.7;

#[derive(Debug)]
enum Slot<V> {
    Empty,
    Occupied { key: String, value: V },
    Deleted,
}

/// Outcome of walking the probe sequence for one key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Probe {
    /// The key lives at this index.
    Found(usize),
    /// The key is absent; this is where it would be placed (the first
    /// tombstone on the path, else the terminating empty slot).
    Vacant(usize),
    /// Every slot was visited without a match or a reusable slot.
    Exhausted,
}

pub struct HashTable<V, H = Djb2> {
    slots: Vec<Slot<V>>,
    len: usize,
    tombstones: usize,
    hasher: H,
}

impl<V> HashTable<V> {
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Djb2)
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn alloc_slots<V>(capacity: usize) -> Result<Vec<Slot<V>>, TableError> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|source| TableError::AllocationFailed {
            requested: capacity,
            source,
        })?;
    slots.resize_with(capacity, || Slot::Empty);
    Ok(slots)
}

fn copy_key(key: &str) -> Result<String, TableError> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(key.len())
        .map_err(|source| TableError::KeyAllocationFailed {
            len: key.len(),
            source,
        })?;
    owned.push_str(key);
    Ok(owned)
}

/// Walks `(h + i) mod capacity` for `i in 0..capacity`. Tombstones never end
/// the walk but the first one seen is remembered as the insertion point.
fn probe<V>(slots: &[Slot<V>], hash: u64, key: &str) -> Probe {
    let capacity = slots.len();
    let start = (hash % capacity as u64) as usize;
    let mut first_tombstone = None;
    for i in 0..capacity {
        let pos = (start + i) % capacity;
        match &slots[pos] {
            Slot::Empty => return Probe::Vacant(first_tombstone.unwrap_or(pos)),
            Slot::Occupied { key: k, .. } if k == key => return Probe::Found(pos),
            Slot::Occupied { .. } => {}
            Slot::Deleted => {
                first_tombstone.get_or_insert(pos);
            }
        }
    }
    first_tombstone.map_or(Probe::Exhausted, Probe::Vacant)
}

impl<V, H: KeyHasher> HashTable<V, H> {
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_capacity_and_hasher(MIN_CAPACITY, hasher)
    }

    /// Creates an empty table with at least `capacity` slots (never fewer
    /// than `MIN_CAPACITY`).
    ///
    /// Panics if the slot array cannot be allocated; see
    /// `try_with_capacity_and_hasher` for the fallible form.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: H) -> Self {
        match Self::try_with_capacity_and_hasher(capacity, hasher) {
            Ok(table) => table,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_with_capacity_and_hasher(capacity: usize, hasher: H) -> Result<Self, TableError> {
        let capacity = capacity.max(MIN_CAPACITY);
        Ok(Self {
            slots: alloc_slots(capacity)?,
            len: 0,
            tombstones: 0,
            hasher,
        })
    }

    fn find(&self, key: &str) -> Probe {
        probe(&self.slots, self.hasher.hash_key(key), key)
    }

    /// Live entries. Tombstones are not counted.
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
    /// Slots left `Deleted` since the last resize.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Inserts `value` under a copy of `key`.
    ///
    /// Growth is checked first as if the key were new: when
    /// `(len + 1) / capacity > MAX_LOAD_FACTOR` the table doubles before the
    /// probe, even if the key turns out to be present. Returns the previous
    /// value when the key already existed.
    ///
    /// On error the table is left exactly as it was.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>, TableError> {
        let owned = copy_key(key)?;

        if (self.len + 1) as f64 / self.capacity() as f64 > MAX_LOAD_FACTOR {
            let capacity = self.capacity();
            let doubled = capacity
                .checked_mul(2)
                .ok_or(TableError::CapacityOverflow { capacity })?;
            self.resize(doubled)?;
        }

        match self.find(key) {
            Probe::Found(pos) => match &mut self.slots[pos] {
                Slot::Occupied { value: v, .. } => Ok(Some(core::mem::replace(v, value))),
                _ => unreachable!("probe reported a non-occupied slot as found"),
            },
            Probe::Vacant(pos) => {
                if matches!(self.slots[pos], Slot::Deleted) {
                    self.tombstones -= 1;
                }
                self.slots[pos] = Slot::Occupied { key: owned, value };
                self.len += 1;
                Ok(None)
            }
            Probe::Exhausted => panic!(
                "hash table has no free slot: {} live entries in {} slots",
                self.len,
                self.capacity()
            ),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        match self.find(key) {
            Probe::Found(pos) => match &self.slots[pos] {
                Slot::Occupied { value, .. } => Some(value),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.find(key) {
            Probe::Found(pos) => match &mut self.slots[pos] {
                Slot::Occupied { value, .. } => Some(value),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        matches!(self.find(key), Probe::Found(_))
    }

    /// Removes `key`, leaving a tombstone in its slot so probe chains that
    /// pass through it stay intact. The owned key copy is dropped and the
    /// value handed back.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let Probe::Found(pos) = self.find(key) else {
            return None;
        };
        match core::mem::replace(&mut self.slots[pos], Slot::Deleted) {
            Slot::Occupied { value, .. } => {
                self.len -= 1;
                self.tombstones += 1;
                trace!("hash table: tombstone at slot {pos}, {} live", self.len);
                Some(value)
            }
            _ => unreachable!("probe reported a non-occupied slot as found"),
        }
    }

    /// Rebuilds into `new_capacity` slots. Live entries are moved (keys are
    /// not copied) and tombstones are discarded. If the new array cannot be
    /// allocated the table is untouched.
    fn resize(&mut self, new_capacity: usize) -> Result<(), TableError> {
        let mut fresh = alloc_slots(new_capacity)?;
        let old = core::mem::take(&mut self.slots);
        let old_capacity = old.len();
        let dropped = self.tombstones;

        for slot in old {
            if let Slot::Occupied { key, value } = slot {
                let pos = match probe(&fresh, self.hasher.hash_key(&key), &key) {
                    Probe::Vacant(pos) => pos,
                    p => unreachable!("rehash of a unique key into a larger table gave {p:?}"),
                };
                fresh[pos] = Slot::Occupied { key, value };
            }
        }

        self.slots = fresh;
        self.tombstones = 0;
        debug!(
            "hash table resized {old_capacity} -> {new_capacity} slots: {} live entries moved, {dropped} tombstones dropped",
            self.len
        );
        Ok(())
    }

    /// Calls `visitor` with each live key in slot order until it returns
    /// `false`. Returns how many times `visitor` ran, including the call that
    /// stopped the walk.
    pub fn iterate_keys<F>(&self, mut visitor: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let mut calls = 0;
        for key in self.keys() {
            calls += 1;
            if !visitor(key) {
                break;
            }
        }
        calls
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Consumes the table, handing each live value to `destructor` once, in
    /// slot order. Owned keys are released with the table.
    pub fn destroy_with<F>(self, mut destructor: F)
    where
        F: FnMut(V),
    {
        trace!("hash table: destroying {} live entries", self.len);
        for slot in self.slots {
            if let Slot::Occupied { value, .. } = slot {
                destructor(value);
            }
        }
    }

    /// Consumes the table into its live `(key, value)` pairs, in slot order.
    pub fn into_entries(self) -> Vec<(String, V)> {
        self.slots
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Occupied { key, value } => Some((key, value)),
                _ => None,
            })
            .collect()
    }
}

/// Iterator over live `(key, value)` pairs in slot order.
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied { key, value } => Some((key.as_str(), value)),
            _ => None,
        })
    }
}

impl<'a, V, H: KeyHasher> IntoIterator for &'a HashTable<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug, H: KeyHasher> fmt::Debug for HashTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
impl<V, H: KeyHasher> HashTable<V, H> {
    /// Counts occupied slots by scanning, for checking `len` bookkeeping.
    pub(crate) fn occupied_slots(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Occupied { .. }))
            .count()
    }

    pub(crate) fn deleted_slots(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Deleted))
            .count()
    }
}
