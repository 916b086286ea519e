//! Integration tests for the map and set wrappers across storage strategies.

use core::panic::Location;
use std::panic::{catch_unwind, AssertUnwindSafe};

use fxc_containers::prelude::*;
use fxc_containers::{codes, ErrorCategory};

/// A map policy that reports the violation through a distinctive panic.
struct RecordingChecking;

impl MapChecking for RecordingChecking {
    fn out_of_range<Q: ?Sized>(_key: &Q, size: usize, location: &'static Location<'static>) -> ! {
        panic!("recorded out_of_range size={size} line={}", location.line())
    }

    fn length_error(target_capacity: usize, _location: &'static Location<'static>) -> ! {
        panic!("recorded length_error target={target_capacity}")
    }
}

impl SetChecking for RecordingChecking {
    fn length_error(target_capacity: usize, _location: &'static Location<'static>) -> ! {
        panic!("recorded set length_error target={target_capacity}")
    }
}

type RecordingMap = FixedMap<u32, u32, 2, DedicatedColor, Pool, RecordingChecking>;
type RecordingSet = FixedSet<u32, 2, EmbeddedColor, Contiguous, RecordingChecking>;

fn panic_message(result: std::thread::Result<()>) -> String {
    match result {
        Ok(()) => String::from("<no panic>"),
        Err(payload) => payload
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_owned()))
            .unwrap_or_default(),
    }
}

#[test]
fn test_custom_map_policy_receives_violations() {
    let message = panic_message(catch_unwind(|| {
        let map = RecordingMap::new();
        let _ = map.at(&7);
    }));
    assert!(message.starts_with("recorded out_of_range size=0"), "{message}");

    let message = panic_message(catch_unwind(|| {
        let mut map = RecordingMap::new();
        map.insert(1, 1);
        map.insert(2, 2);
        map.insert(2, 20);
        map.insert(3, 3);
    }));
    assert_eq!(message, "recorded length_error target=3");
}

#[test]
fn test_custom_set_policy_receives_violations() {
    let message = panic_message(catch_unwind(|| {
        let mut set = RecordingSet::new();
        set.extend([5, 6, 5, 7]);
    }));
    assert_eq!(message, "recorded set length_error target=3");
}

#[test]
fn test_try_insert_error_carries_capacity_code() {
    let mut map: CompactFixedMap<u8, u8, 1> = FixedMap::new();
    assert_eq!(map.try_insert(1, 1), Ok(None));
    let err = map.try_insert(2, 2).unwrap_err();
    assert_eq!(err.category, ErrorCategory::Capacity);
    assert_eq!(err.code, codes::CAPACITY_EXCEEDED);
    assert_eq!(map.len(), 1);
}

#[test]
fn test_static_map_is_const_constructible() {
    static EMPTY: FixedMap<u16, u16, 8> = FixedMap::new();
    static EMPTY_SET: CompactContiguousFixedSet<u16, 8> = FixedSet::new();
    assert!(EMPTY.is_empty());
    assert!(EMPTY_SET.is_empty());
    assert_eq!(EMPTY.capacity(), 8);
}

#[test]
fn test_iter_mut_across_relocations() {
    let mut map: ContiguousFixedMap<u32, u32, 16> = (0..16).map(|k| (k, k)).collect();
    for k in (0..16).step_by(3) {
        map.remove(&k);
    }
    for (k, v) in map.iter_mut() {
        *v = k * 10;
    }
    assert!(map.iter().all(|(k, v)| *v == k * 10));
    map.tree().verify_invariants().unwrap();
}

#[test]
fn test_map_and_set_agree_on_ordering() {
    let words = ["delta", "alpha", "echo", "charlie", "bravo", "alpha"];
    let map: FixedMap<&str, usize, 8> = words.iter().map(|w| (*w, w.len())).collect();
    let set: CompactFixedSet<&str, 8> = words.iter().copied().collect();

    assert!(map.keys().eq(set.iter()));
    assert_eq!(set.first(), Some(&"alpha"));
    assert_eq!(map.last_key_value(), Some((&"echo", &4)));
}

#[test]
fn test_drop_of_owned_values_through_every_strategy() {
    use std::rc::Rc;

    let token = Rc::new(());
    {
        let mut a: FixedMap<u8, Rc<()>, 8> = FixedMap::new();
        let mut b: ContiguousFixedMap<u8, Rc<()>, 8> = FixedMap::new();
        let mut c: CompactFixedMap<u8, Rc<()>, 8> = FixedMap::new();
        let mut d: CompactContiguousFixedMap<u8, Rc<()>, 8> = FixedMap::new();
        for k in 0..8 {
            a.insert(k, Rc::clone(&token));
            b.insert(k, Rc::clone(&token));
            c.insert(k, Rc::clone(&token));
            d.insert(k, Rc::clone(&token));
        }
        assert_eq!(Rc::strong_count(&token), 33);
        a.remove(&3);
        b.remove(&3);
        c.retain(|k, _| k % 2 == 0);
        d.clear();
        assert_eq!(Rc::strong_count(&token), 1 + 7 + 7 + 4);
    }
    assert_eq!(Rc::strong_count(&token), 1);
}

#[test]
fn test_panicking_policy_leaves_map_usable() {
    // The default length-error policy panics before the storage is touched;
    // catching it is only possible because tests build with unwinding.
    let mut map: FixedMap<u8, u8, 1> = FixedMap::new();
    map.insert(1, 1);
    let result = catch_unwind(AssertUnwindSafe(|| {
        map.insert(2, 2);
    }));
    assert!(result.is_err());
    assert_eq!(map.get(&1), Some(&1));
    map.tree().verify_invariants().unwrap();
}

#[test]
fn test_fallible_fill_and_drain() -> fxc_containers::Result<()> {
    let mut set: ContiguousFixedSet<u16, 32> = FixedSet::new();
    for k in (0..32).rev() {
        set.try_insert(k * 3)?;
    }
    assert!(set.is_full());
    assert!(!set.try_insert(3)?);

    let mut vec: FixedVec<u16, 32> = FixedVec::new();
    while let Some(k) = set.pop_last() {
        vec.try_push(k)?;
    }
    assert_eq!(vec.first(), Some(&93));
    assert_eq!(vec.last(), Some(&0));
    set.tree().verify_invariants()?;
    Ok(())
}
