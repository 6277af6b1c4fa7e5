/*
 * MIT License
 *
 * Copyright (c) 2013 Andrey Astrelin
 * Copyright (c) 2020 The Holy Grail Sort Project
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Parameter selection and the block merge rounds.

use std::cmp::Ordering;

use crate::arrange::block_select_sort;
use crate::blocks::build_blocks;
use crate::buffer::{sqrt_pow2, Scratch, Swap};
use crate::keys::collect_keys;
use crate::merge::{count_final_left_blocks, lazy_merge, lazy_stable_sort, merge_blocks};
use crate::merge::{BlockMerge, Buffered, Lazy};
use crate::primitives::insertion_sort;

/// Below this length everything is insertion sorted.
const SMALL_SORT_THRESHOLD: usize = 16;

/// With fewer distinct keys than this, blocks cannot be tagged reliably.
const MIN_KEYS: usize = 4;

/// How a round of block merges moves its elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MergeMode {
    /// Internal buffer parked in the scratch, elements written.
    External,
    /// Internal buffer scrolled along by swaps.
    Scrolling,
    /// No buffer, rotations only.
    Lazy,
}

/// Smallest power of two number of blocks, up to `key_len`, that keeps the rotation cost of the
/// unbuffered merges in check.
fn calc_min_keys(key_len: usize, mut half_subarray_keys: u64) -> usize {
    let mut min_keys = 1;
    while min_keys < key_len && half_subarray_keys != 0 {
        min_keys *= 2;
        half_subarray_keys /= 8;
    }
    min_keys
}

/// Sorts `v` in full. `scratch` is only touched if enough keys turn up for an ideal buffer.
pub fn common_sort<S, T, F>(v: &mut [T], scratch: &mut S, compare: &mut F)
where
    S: Scratch<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len < SMALL_SORT_THRESHOLD {
        insertion_sort(v, compare);
        return;
    }

    let mut block_len = sqrt_pow2(len);
    let mut key_len = (len - 1) / block_len + 1;
    let ideal_keys = key_len + block_len;

    let keys_found = collect_keys(v, ideal_keys, compare);
    let ideal_buffer = keys_found >= ideal_keys;

    if !ideal_buffer {
        if keys_found < MIN_KEYS {
            lazy_stable_sort(v, compare);
            return;
        }

        // Every key doubles as buffer, no separate block buffer.
        key_len = block_len;
        block_len = 0;
        while key_len > keys_found {
            key_len /= 2;
        }
    }

    let buffer_end = block_len + key_len;
    let body_len = len - buffer_end;
    let mut subarray_len = if ideal_buffer { block_len } else { key_len };
    let external_len = if ideal_buffer { scratch.capacity() } else { 0 };

    build_blocks(
        v,
        buffer_end,
        body_len,
        subarray_len,
        external_len,
        scratch,
        compare,
    );

    while body_len > 2 * subarray_len {
        subarray_len *= 2;

        let mut current_block_len = block_len;
        let mut scrolling = ideal_buffer;

        if !ideal_buffer {
            let half_key_len = key_len / 2;
            if half_key_len * half_key_len >= 2 * subarray_len {
                current_block_len = half_key_len;
                scrolling = true;
            } else {
                let half_subarray_keys = (subarray_len as u64 * keys_found as u64) / 2;
                let min_keys = calc_min_keys(key_len, half_subarray_keys);
                current_block_len = (2 * subarray_len) / min_keys;
            }
        }

        let mode = if !scrolling {
            MergeMode::Lazy
        } else if current_block_len <= external_len {
            MergeMode::External
        } else {
            MergeMode::Scrolling
        };

        combine_blocks(
            v,
            0,
            buffer_end,
            body_len,
            subarray_len,
            current_block_len,
            mode,
            scratch,
            compare,
        );
    }

    insertion_sort(&mut v[..buffer_end], compare);
    lazy_merge(v, 0, buffer_end, body_len, compare);
}

/// Merges each pair of adjacent `subarray_len` runs in `[start, start + len)`, tagging blocks with
/// the keys at `first_key`.
#[allow(clippy::too_many_arguments)]
fn combine_blocks<S, T, F>(
    v: &mut [T],
    first_key: usize,
    start: usize,
    len: usize,
    subarray_len: usize,
    block_len: usize,
    mode: MergeMode,
    scratch: &mut S,
    compare: &mut F,
) where
    S: Scratch<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let full_merge = 2 * subarray_len;
    let merge_count = len / full_merge;
    let mut last_subarray = len - full_merge * merge_count;
    let mut len = len;

    // A lone trailing run is already sorted.
    if last_subarray <= subarray_len {
        len -= last_subarray;
        last_subarray = 0;
    }

    let rounds = Rounds {
        first_key,
        start,
        len,
        subarray_len,
        block_len,
        merge_count,
        last_subarray,
    };

    match mode {
        MergeMode::External => {
            scratch.save(&v[start - block_len..start]);
            rounds.combine::<Buffered<S::Transfer>, _, _>(v, compare);
            scratch.restore(&mut v[start - block_len..start]);
        }
        MergeMode::Scrolling => rounds.combine::<Buffered<Swap>, _, _>(v, compare),
        MergeMode::Lazy => rounds.combine::<Lazy, _, _>(v, compare),
    }
}

/// Geometry of one doubling round.
struct Rounds {
    first_key: usize,
    start: usize,
    len: usize,
    subarray_len: usize,
    block_len: usize,
    merge_count: usize,
    last_subarray: usize,
}

impl Rounds {
    fn combine<G, T, F>(&self, v: &mut [T], compare: &mut F)
    where
        G: BlockMerge<T>,
        F: FnMut(&T, &T) -> Ordering,
    {
        let first_key = self.first_key;
        let block_len = self.block_len;
        let full_merge = 2 * self.subarray_len;
        let left_blocks_in_run = self.subarray_len / block_len;

        for merge_index in 0..self.merge_count {
            let offset = self.start + merge_index * full_merge;
            let block_count = full_merge / block_len;

            insertion_sort(&mut v[first_key..first_key + block_count], compare);
            let median_key = block_select_sort(
                v,
                first_key,
                offset,
                left_blocks_in_run,
                block_count,
                block_len,
                compare,
            );

            merge_blocks::<G, _, _>(
                v,
                first_key,
                first_key + median_key,
                offset,
                block_count,
                block_len,
                0,
                0,
                compare,
            );
        }

        if self.last_subarray != 0 {
            let offset = self.start + self.merge_count * full_merge;
            let right_blocks = self.last_subarray / block_len;

            insertion_sort(&mut v[first_key..first_key + right_blocks + 1], compare);
            let median_key = block_select_sort(
                v,
                first_key,
                offset,
                left_blocks_in_run,
                right_blocks,
                block_len,
                compare,
            );

            let last_fragment = self.last_subarray - right_blocks * block_len;
            let left_blocks = if last_fragment != 0 {
                count_final_left_blocks(v, offset, right_blocks, block_len, compare)
            } else {
                0
            };

            let block_count = right_blocks - left_blocks;
            if block_count == 0 {
                G::merge(
                    v,
                    offset,
                    left_blocks * block_len,
                    last_fragment,
                    block_len,
                    compare,
                );
            } else {
                merge_blocks::<G, _, _>(
                    v,
                    first_key,
                    first_key + median_key,
                    offset,
                    block_count,
                    block_len,
                    left_blocks,
                    last_fragment,
                    compare,
                );
            }
        }

        G::reset(v, self.start, self.len, block_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::buffer::{ExternalBuffer, NoBuffer};
    use rand::prelude::*;

    fn by_value(a: &(u16, usize), b: &(u16, usize)) -> Ordering {
        a.0.cmp(&b.0)
    }

    fn assert_stable_sorted(v: &[(u16, usize)]) {
        for w in v.windows(2) {
            assert!(w[0] < w[1], "{:?} before {:?}", w[0], w[1]);
        }
    }

    fn run_all(values: &[u16]) {
        let original: Vec<(u16, usize)> = values.iter().copied().zip(0..).collect();

        let mut in_place = original.clone();
        common_sort(&mut in_place, &mut NoBuffer, &mut by_value);
        assert_stable_sorted(&in_place);

        for capacity in [4, 512, sqrt_pow2(values.len())] {
            let mut buffered = original.clone();
            let mut scratch = ExternalBuffer::with_capacity(capacity);
            common_sort(&mut buffered, &mut scratch, &mut by_value);
            assert_eq!(buffered, in_place);
        }
    }

    #[test]
    fn min_keys_grows_with_subarray() {
        assert_eq!(calc_min_keys(16, 0), 1);
        assert_eq!(calc_min_keys(16, 1), 2);
        assert_eq!(calc_min_keys(16, 8), 4);
        assert_eq!(calc_min_keys(16, 64), 8);
        assert_eq!(calc_min_keys(16, u64::MAX), 16);
    }

    #[test]
    fn distinct_values_take_ideal_path() {
        let mut rng = StdRng::seed_from_u64(21);

        for len in [16, 17, 31, 64, 65, 100, 255, 1000, 4097] {
            let mut values: Vec<u16> = (0..len as u16).collect();
            values.shuffle(&mut rng);
            run_all(&values);
        }
    }

    #[test]
    fn few_distinct_values_take_degraded_path() {
        let mut rng = StdRng::seed_from_u64(22);

        for distinct in [2u16, 3, 4, 5, 7, 15, 40] {
            for len in [16, 100, 999, 3000] {
                let values: Vec<u16> = (0..len).map(|_| rng.gen_range(0..distinct)).collect();
                run_all(&values);
            }
        }
    }

    #[test]
    fn already_sorted_and_reversed() {
        for len in [16usize, 300, 2048] {
            let ascending: Vec<u16> = (0..len as u16).collect();
            run_all(&ascending);

            let descending: Vec<u16> = ascending.iter().rev().copied().collect();
            run_all(&descending);
        }
    }
}
