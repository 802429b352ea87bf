//! Pluggable key hashing for `HashTable`.

use core::hash::BuildHasher;

/// Maps a string key to an unsigned hash. Implementations must be pure and
/// deterministic: the table relies on a key hashing to the same value for as
/// long as it is stored.
pub trait KeyHasher {
    fn hash_key(&self, key: &str) -> u64;
}

/// The default hash: djb2 (`h = h * 33 + byte`, seeded with 5381) over the
/// key's bytes, with wrapping arithmetic.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Djb2;

impl KeyHasher for Djb2 {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        key.bytes().fold(5381u64, |h, b| {
            (h << 5).wrapping_add(h).wrapping_add(u64::from(b))
        })
    }
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> u64,
{
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Adapts any `BuildHasher` (std's `RandomState`, hashbrown's
/// `DefaultHashBuilder`, ...) into a `KeyHasher`.
///
/// Use a fixed-seed builder if hashes must be reproducible across tables;
/// a single table is always consistent with itself.
#[derive(Clone, Debug, Default)]
pub struct BuildKeyHasher<S>(pub S);

impl<S: BuildHasher> KeyHasher for BuildKeyHasher<S> {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        self.0.hash_one(key)
    }
}

/// `BuildKeyHasher` over hashbrown's default builder.
pub type FastKeyHasher = BuildKeyHasher<hashbrown::hash_map::DefaultHashBuilder>;
