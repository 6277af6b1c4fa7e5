//! Hand picked inputs that steer the sort through each of its internal paths, checked for the same
//! results across all buffer configurations.

use std::cmp::Ordering;

use grailsort::Strategy;
use rand::prelude::*;

type Tagged = (i32, usize);

fn by_key(a: &Tagged, b: &Tagged) -> Ordering {
    a.0.cmp(&b.0)
}

fn tagged(keys: &[i32]) -> Vec<Tagged> {
    keys.iter().copied().zip(0..).collect()
}

/// Sorts `keys` with every variant and checks them against the standard library stable sort.
fn check_all_variants(keys: &[i32]) -> Vec<Tagged> {
    let mut expected = tagged(keys);
    expected.sort_by(by_key);

    let mut in_place = tagged(keys);
    grailsort::sort_by(&mut in_place, by_key);
    assert_eq!(in_place, expected, "in place, len {}", keys.len());

    let mut static_buffer = tagged(keys);
    grailsort::sort_by_with_static_buffer(&mut static_buffer, by_key);
    assert_eq!(static_buffer, expected, "static buffer, len {}", keys.len());

    let mut dynamic_buffer = tagged(keys);
    grailsort::sort_by_with_dynamic_buffer(&mut dynamic_buffer, by_key);
    assert_eq!(dynamic_buffer, expected, "dynamic buffer, len {}", keys.len());

    expected
}

#[test]
fn duplicates_keep_input_order() {
    let sorted = check_all_variants(&[5, 3, 3, 1, 4, 1, 2, 5]);

    assert_eq!(
        sorted,
        [(1, 3), (1, 5), (2, 6), (3, 1), (3, 2), (4, 4), (5, 0), (5, 7)]
    );
}

#[test]
fn two_values_use_rotation_fallback() {
    let mut rng = StdRng::seed_from_u64(0x6772_6169);
    let keys: Vec<i32> = (0..4096).map(|_| rng.gen_range(0..2)).collect();

    let sorted = check_all_variants(&keys);

    let zeros = keys.iter().filter(|&&k| k == 0).count();
    assert!(sorted[..zeros].iter().all(|e| e.0 == 0));
    assert!(sorted[zeros..].iter().all(|e| e.0 == 1));
}

#[test]
fn too_few_keys_for_full_buffer() {
    let mut rng = StdRng::seed_from_u64(0x6b65_7973);

    for distinct in 4..16 {
        for len in [16, 100, 1000, 5000] {
            let keys: Vec<i32> = (0..len).map(|_| rng.gen_range(0..distinct)).collect();
            check_all_variants(&keys);
        }
    }
}

#[test]
fn reversed_input() {
    let keys: Vec<i32> = (0..10_000).rev().collect();
    let sorted = check_all_variants(&keys);

    assert!(sorted.iter().map(|e| e.0).eq(0..10_000));
}

#[test]
fn lengths_around_insertion_threshold() {
    let mut rng = StdRng::seed_from_u64(16);

    for len in [0, 1, 2, 15, 16, 17, 31, 32, 33] {
        let keys: Vec<i32> = (0..len).map(|_| rng.gen_range(-8..8)).collect();
        check_all_variants(&keys);
    }
}

#[test]
fn lengths_around_static_buffer() {
    let mut rng = StdRng::seed_from_u64(512);

    // Block lengths up to and beyond the static buffer.
    for len in [
        grailsort::STATIC_BUFFER_LEN,
        grailsort::STATIC_BUFFER_LEN * grailsort::STATIC_BUFFER_LEN + 1,
    ] {
        let keys: Vec<i32> = (0..len).map(|_| rng.gen()).collect();
        check_all_variants(&keys);
    }
}

#[test]
fn sorting_twice_changes_nothing() {
    let mut rng = StdRng::seed_from_u64(2);
    let keys: Vec<i32> = (0..3000).map(|_| rng.gen_range(0..100)).collect();

    let mut v = tagged(&keys);
    grailsort::sort_by(&mut v, by_key);
    let once = v.clone();
    grailsort::sort_by(&mut v, by_key);

    assert_eq!(v, once);
}

#[test]
fn sort_by_key_is_stable() {
    let mut v: Vec<i32> = (-50..50).collect();
    v.shuffle(&mut StdRng::seed_from_u64(3));

    let mut expected = v.clone();
    expected.sort_by_key(|x| x.abs());

    grailsort::sort_by_key(&mut v, |x| x.abs());
    assert_eq!(v, expected);
}

#[test]
fn range_leaves_outside_untouched() {
    let mut rng = StdRng::seed_from_u64(4);
    let original: Vec<i32> = (0..700).map(|_| rng.gen_range(0..50)).collect();

    for strategy in [
        Strategy::InPlace,
        Strategy::StaticBuffer,
        Strategy::DynamicBuffer,
    ] {
        let mut v = tagged(&original);
        grailsort::sort_range_by(&mut v, 100..600, strategy, by_key);

        assert_eq!(v[..100], tagged(&original)[..100]);
        assert_eq!(v[600..], tagged(&original)[600..]);

        let mut expected = tagged(&original)[100..600].to_vec();
        expected.sort_by(by_key);
        assert_eq!(v[100..600], expected[..], "{strategy:?}");
    }
}

#[test]
fn empty_range_is_noop() {
    let mut v = [3, 2, 1];
    grailsort::sort_range_by(&mut v, 2..2, Strategy::default(), |a, b| a.cmp(b));
    assert_eq!(v, [3, 2, 1]);
}

#[test]
#[should_panic]
fn range_past_end_panics() {
    let mut v = [3, 2, 1];
    grailsort::sort_range_by(&mut v, 1..4, Strategy::InPlace, |a, b| a.cmp(b));
}

#[test]
#[should_panic]
#[allow(clippy::reversed_empty_ranges)]
fn inverted_range_panics() {
    let mut v = [3, 2, 1];
    grailsort::sort_range_by(&mut v, 2..1, Strategy::InPlace, |a, b| a.cmp(b));
}

#[test]
fn zero_sized_elements() {
    let mut v = vec![(); 1000];
    grailsort::sort(&mut v);
    grailsort::sort_with_static_buffer(&mut v);
    grailsort::sort_with_dynamic_buffer(&mut v);
    assert_eq!(v.len(), 1000);
}
