// HashTable integration suite (consolidated).
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Round-trip: every live key maps to its most recently inserted value.
// - Overwrite: re-inserting a key returns the old value, len unchanged.
// - Tombstones: removing a key never hides keys that probed past it.
// - Growth: the table doubles before (len + 1) / capacity exceeds 0.7.
// - Ownership: values are the caller's; the table only owns key copies.
use open_containers::{
    BuildKeyHasher, Djb2, FastKeyHasher, HashTable, KeyHasher, TableError, MAX_LOAD_FACTOR,
    MIN_CAPACITY,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Value that counts its own drops so tests can see when the table releases
// (or does not release) caller values.
struct Tracked {
    id: u32,
    drops: Rc<Cell<u32>>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

// Test: the minimum-capacity growth scenario.
// Assumes: capacity starts at MIN_CAPACITY (3).
// Verifies: 2/3 does not grow; the third insert doubles to 6 first.
#[test]
fn growth_scenario_from_minimum_capacity() {
    init_logging();
    let mut t = HashTable::with_capacity(MIN_CAPACITY);
    t.insert("a", 1).unwrap();
    t.insert("b", 2).unwrap();
    assert_eq!(t.capacity(), 3);
    t.insert("c", 3).unwrap();
    assert_eq!(t.capacity(), 6);
    assert_eq!(t.len(), 3);
    assert_eq!(t.get("a"), Some(&1));
    assert_eq!(t.get("b"), Some(&2));
    assert_eq!(t.get("c"), Some(&3));
}

// Test: remove then reinsert.
// Assumes: removal leaves a tombstone in the key's slot.
// Verifies: the key is gone, len is 0, and reinsertion succeeds.
#[test]
fn remove_then_reinsert() {
    let mut t = HashTable::new();
    t.insert("x", 10).unwrap();
    assert_eq!(t.remove("x"), Some(10));
    assert!(!t.contains_key("x"));
    assert_eq!(t.len(), 0);
    assert_eq!(t.remove("x"), None);
    t.insert("x", 20).unwrap();
    assert_eq!(t.get("x"), Some(&20));
}

// Test: tombstone transparency with an injected hash.
// Assumes: every key hashes to the same home slot, so B probes through A.
// Verifies: removing A does not break the lookup of B.
#[test]
fn tombstone_does_not_break_probe_chain() {
    let same = |_: &str| 7u64;
    let mut t = HashTable::with_capacity_and_hasher(8, same);
    t.insert("A", "first").unwrap();
    t.insert("B", "second").unwrap();
    assert_eq!(t.remove("A"), Some("first"));
    assert_eq!(t.get("B"), Some(&"second"));
    assert!(t.contains_key("B"));
    assert!(!t.contains_key("A"));
}

// Test: resize keeps everything reachable.
// Assumes: many inserts cross the load factor several times.
// Verifies: every key inserted before each resize keeps its value.
#[test]
fn keys_survive_repeated_resizes() {
    init_logging();
    let mut t = HashTable::new();
    let mut capacities = vec![t.capacity()];
    for i in 0..2_000u32 {
        t.insert(&format!("key-{i}"), i).unwrap();
        if t.capacity() != *capacities.last().unwrap() {
            capacities.push(t.capacity());
            for j in 0..=i {
                assert_eq!(t.get(&format!("key-{j}")), Some(&j));
            }
        }
        assert!(t.load_factor() <= MAX_LOAD_FACTOR);
    }
    assert!(capacities.windows(2).all(|w| w[1] == w[0] * 2));
    assert_eq!(t.len(), 2_000);
}

// Test: overwrite semantics with caller-owned values.
// Assumes: values are Rc handles the caller also holds.
// Verifies: the previous value comes back to the caller, len unchanged.
#[test]
fn overwrite_returns_previous_value_to_caller() {
    let first = Rc::new("first".to_string());
    let second = Rc::new("second".to_string());
    let mut t = HashTable::new();
    t.insert("k", first.clone()).unwrap();
    let prev = t.insert("k", second.clone()).unwrap().expect("previous value");
    assert!(Rc::ptr_eq(&prev, &first));
    assert_eq!(t.len(), 1);
    assert!(Rc::ptr_eq(t.get("k").unwrap(), &second));
}

// Test: borrowed values.
// Assumes: V = &T leaves ownership entirely with the caller.
// Verifies: the table works over references and drop leaves them intact.
#[test]
fn borrowed_values_stay_with_caller() {
    let data = vec![10, 20, 30];
    {
        let mut t: HashTable<&i32> = HashTable::new();
        t.insert("a", &data[0]).unwrap();
        t.insert("c", &data[2]).unwrap();
        assert_eq!(t.get("c"), Some(&&30));
    }
    assert_eq!(data, vec![10, 20, 30]);
}

// Test: destroy with a destructor hook.
// Assumes: values count their drops.
// Verifies: the hook runs exactly once per live entry; removed values are
// returned to the caller rather than seen by the hook.
#[test]
fn destroy_with_runs_once_per_live_entry() {
    let drops = Rc::new(Cell::new(0));
    let mut t = HashTable::new();
    for id in 0..10 {
        let v = Tracked {
            id,
            drops: drops.clone(),
        };
        t.insert(&format!("t{id}"), v).unwrap();
    }
    let removed = t.remove("t3").expect("present");
    assert_eq!(removed.id, 3);

    let seen = RefCell::new(Vec::new());
    t.destroy_with(|v| seen.borrow_mut().push(v.id));
    let mut seen = seen.into_inner();
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2, 4, 5, 6, 7, 8, 9]);
    assert_eq!(drops.get(), 9, "hook consumed every live value once");
    drop(removed);
    assert_eq!(drops.get(), 10);
}

// Test: plain drop.
// Assumes: V owns its data.
// Verifies: each live value is dropped once when the table goes away.
#[test]
fn drop_releases_live_values_once() {
    let drops = Rc::new(Cell::new(0));
    let mut t = HashTable::new();
    for id in 0..5 {
        let v = Tracked {
            id,
            drops: drops.clone(),
        };
        t.insert(&id.to_string(), v).unwrap();
    }
    drop(t.insert("0", Tracked { id: 99, drops: drops.clone() }).unwrap());
    assert_eq!(drops.get(), 1, "overwritten value returned and dropped by caller");
    drop(t);
    assert_eq!(drops.get(), 6);
}

// Test: iterate_keys completeness and early stop.
// Assumes: visitor context is captured by the closure.
// Verifies: count equals len without a stop; one call when stopping at once.
#[test]
fn iterate_keys_completeness_and_early_stop() {
    let mut t = HashTable::new();
    for k in ["one", "two", "three", "four"] {
        t.insert(k, k.len()).unwrap();
    }
    t.remove("two");

    let mut total_len = 0;
    let calls = t.iterate_keys(|k| {
        total_len += k.len();
        true
    });
    assert_eq!(calls, 3);
    assert_eq!(total_len, "one".len() + "three".len() + "four".len());

    let mut first = None;
    let calls = t.iterate_keys(|k| {
        first = Some(k.to_string());
        false
    });
    assert_eq!(calls, 1);
    assert!(first.is_some());
}

// Test: iter/keys/values agree with each other and with get.
#[test]
fn iterators_agree_with_lookup() {
    let mut t = HashTable::with_capacity(32);
    for i in 0..20 {
        t.insert(&format!("k{i}"), i * 2).unwrap();
    }
    assert_eq!(t.iter().count(), t.len());
    for (k, v) in &t {
        assert_eq!(t.get(k), Some(v));
    }
    let sum: i32 = t.values().sum();
    assert_eq!(sum, (0..20).map(|i| i * 2).sum());
    assert_eq!(t.keys().count(), 20);
}

// Test: pluggable hashers.
// Verifies: the table behaves identically under djb2, a BuildHasher adapter
// and a deliberately terrible hash.
#[test]
fn behaves_the_same_under_any_hasher() {
    fn exercise<H: KeyHasher>(mut t: HashTable<usize, H>) {
        for i in 0..100 {
            t.insert(&format!("{i:03}"), i).unwrap();
        }
        for i in (0..100).step_by(3) {
            assert_eq!(t.remove(&format!("{i:03}")), Some(i));
        }
        for i in 0..100 {
            let expected = if i % 3 == 0 { None } else { Some(&i) };
            assert_eq!(t.get(&format!("{i:03}")), expected);
        }
        assert_eq!(t.len(), 66);
    }
    exercise(HashTable::with_hasher(Djb2));
    exercise(HashTable::with_hasher(FastKeyHasher::default()));
    exercise(HashTable::with_hasher(BuildKeyHasher(
        std::collections::hash_map::RandomState::new(),
    )));
    exercise(HashTable::with_hasher(|k: &str| k.len() as u64));
}

// Test: fallible construction.
// Verifies: normal capacities succeed and are floored at the minimum; an
// impossible capacity reports an allocation error instead of aborting.
#[test]
fn try_with_capacity_reports_allocation_failure() {
    let t = HashTable::<u8, _>::try_with_capacity_and_hasher(1, Djb2).expect("small table");
    assert_eq!(t.capacity(), MIN_CAPACITY);
    match HashTable::<u64, _>::try_with_capacity_and_hasher(usize::MAX, Djb2) {
        Err(TableError::AllocationFailed { requested, .. }) => assert_eq!(requested, usize::MAX),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("allocating usize::MAX slots must fail"),
    }
}
