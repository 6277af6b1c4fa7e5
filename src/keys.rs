use std::cmp::Ordering::{self, Equal};

use crate::primitives::{binary_search_left, rotate};

/// Gathers up to `ideal_keys` distinct elements into a sorted run at the front of `v`.
///
/// The key run is kept contiguous while scanning by rotating it forward past the non-keys, so
/// the elements left behind keep their relative order. Each key is the first occurrence of its
/// value. Returns the number of keys found.
pub fn collect_keys<T, F>(v: &mut [T], ideal_keys: usize, compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len == 0 {
        return 0;
    }

    let mut keys_found = 1;
    let mut first_key = 0;
    let mut current = 1;

    while current < len && keys_found < ideal_keys {
        let keys = &v[first_key..first_key + keys_found];
        let insert_pos = binary_search_left(keys, &v[current], compare);

        if insert_pos == keys_found || compare(&v[current], &v[first_key + insert_pos]) != Equal {
            // Drag the keys up to the candidate, then slot the candidate into place.
            rotate(v, first_key, keys_found, current - (first_key + keys_found));
            first_key = current - keys_found;
            rotate(v, first_key + insert_pos, keys_found - insert_pos, 1);
            keys_found += 1;
        }
        current += 1;
    }

    rotate(v, 0, first_key, keys_found);
    keys_found
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::prelude::*;

    fn by_value(a: &(u8, usize), b: &(u8, usize)) -> Ordering {
        a.0.cmp(&b.0)
    }

    #[test]
    fn keys_are_first_occurrences() {
        let values = [3u8, 1, 3, 2, 1, 4, 2, 0, 4];
        let mut v: Vec<(u8, usize)> = values.iter().copied().zip(0..).collect();

        let found = collect_keys(&mut v, 100, &mut by_value);

        assert_eq!(found, 5);
        assert_eq!(&v[..5], &[(0, 7), (1, 1), (2, 3), (3, 0), (4, 5)]);
        assert_eq!(&v[5..], &[(3, 2), (1, 4), (2, 6), (4, 8)]);
    }

    #[test]
    fn stops_at_ideal_keys() {
        let mut v: Vec<(u8, usize)> = (0..20u8).rev().zip(0..).collect();

        let found = collect_keys(&mut v, 6, &mut by_value);

        assert_eq!(found, 6);
        let keys: Vec<u8> = v[..6].iter().map(|x| x.0).collect();
        assert_eq!(keys, [14, 15, 16, 17, 18, 19]);
        let rest: Vec<usize> = v[6..].iter().map(|x| x.1).collect();
        assert_eq!(rest, (6..20).collect::<Vec<_>>());
    }

    #[test]
    fn random_few_distinct() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for len in [1, 2, 17, 100, 1000] {
            let original: Vec<(u8, usize)> = (0..len).map(|i| (rng.gen_range(0..8), i)).collect();
            let mut v = original.clone();

            let found = collect_keys(&mut v, 64, &mut by_value);

            let mut distinct: Vec<u8> = original.iter().map(|x| x.0).collect();
            distinct.sort_unstable();
            distinct.dedup();
            assert_eq!(found, distinct.len());
            assert!(v[..found].windows(2).all(|w| w[0].0 < w[1].0));
            assert!(v[found..].windows(2).all(|w| w[0].1 < w[1].1));

            let mut sorted = v.clone();
            sorted.sort_by_key(|x| x.1);
            assert_eq!(sorted, original);
        }
    }
}
