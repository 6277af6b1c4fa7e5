//! Bottom-up construction of sorted runs.
//!
//! All routines here expect a buffer region to the left of `start`. Merging forwards moves the
//! data left into that region and pushes the buffer behind it, merging backwards undoes the shift.

use std::cmp::Ordering::{self, Greater};

use crate::buffer::{Scratch, Swap, Transfer};
use crate::primitives::rotate;

/// Sorts each pair of `[start, start + len)` while moving it two slots to the left.
pub fn pairwise<M, T, F>(v: &mut [T], start: usize, len: usize, compare: &mut F)
where
    M: Transfer<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut index = 1;
    while index < len {
        let left = start + index - 1;
        let right = start + index;

        if compare(&v[left], &v[right]) == Greater {
            M::transfer(v, left - 2, right);
            M::transfer(v, right - 2, left);
        } else {
            M::transfer(v, left - 2, left);
            M::transfer(v, right - 2, right);
        }
        index += 2;
    }

    let left = start + index - 1;
    if left < start + len {
        M::transfer(v, left - 2, left);
    }
}

/// Merges the adjacent runs at `start` into the region `buffer_offset` slots further left.
///
/// `right_len` must not exceed `buffer_offset`.
pub fn merge_forwards<M, T, F>(
    v: &mut [T],
    start: usize,
    left_len: usize,
    right_len: usize,
    buffer_offset: usize,
    compare: &mut F,
) where
    M: Transfer<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    debug_assert!(right_len <= buffer_offset);

    let mut buffer = start - buffer_offset;
    let mut left = start;
    let middle = start + left_len;
    let mut right = middle;
    let end = middle + right_len;

    while right < end {
        if left == middle || compare(&v[left], &v[right]) == Greater {
            M::transfer(v, buffer, right);
            right += 1;
        } else {
            M::transfer(v, buffer, left);
            left += 1;
        }
        buffer += 1;
    }

    if buffer != left {
        M::transfer_block(v, buffer, left, middle - left);
    }
}

/// Mirror of [`merge_forwards`]: merges the adjacent runs at `start` into the region
/// `buffer_offset` slots to the right, walking from the back. Swap only.
fn merge_backwards<T, F>(
    v: &mut [T],
    start: usize,
    left_len: usize,
    right_len: usize,
    buffer_offset: usize,
    compare: &mut F,
) where
    F: FnMut(&T, &T) -> Ordering,
{
    // One past the next element to move.
    let mut left = start + left_len;
    let middle = left;
    let mut right = middle + right_len;
    let mut buffer = right + buffer_offset;

    while left > start {
        if right == middle || compare(&v[left - 1], &v[right - 1]) == Greater {
            v.swap(buffer - 1, left - 1);
            left -= 1;
        } else {
            v.swap(buffer - 1, right - 1);
            right -= 1;
        }
        buffer -= 1;
    }

    if right != buffer {
        while right > middle {
            v.swap(buffer - 1, right - 1);
            buffer -= 1;
            right -= 1;
        }
    }
}

/// Doubles sorted runs of `current_len` until they reach `buffer_len`, then moves the result
/// back to where the data started, `buffer_len` slots to the right of the final `start`.
fn build_in_place<T, F>(
    v: &mut [T],
    mut start: usize,
    len: usize,
    current_len: usize,
    buffer_len: usize,
    compare: &mut F,
) where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut merge_len = current_len;
    while merge_len < buffer_len {
        let full_merge = 2 * merge_len;
        let mut merge_index = start;

        while merge_index + full_merge <= start + len {
            merge_forwards::<Swap, _, _>(v, merge_index, merge_len, merge_len, merge_len, compare);
            merge_index += full_merge;
        }

        let left_over = len - (merge_index - start);
        if left_over > merge_len {
            merge_forwards::<Swap, _, _>(
                v,
                merge_index,
                merge_len,
                left_over - merge_len,
                merge_len,
                compare,
            );
        } else {
            rotate(v, merge_index - merge_len, merge_len, left_over);
        }

        start -= merge_len;
        merge_len *= 2;
    }

    let full_merge = 2 * buffer_len;
    let final_block = len % full_merge;
    let final_offset = start + len - final_block;

    if final_block <= buffer_len {
        rotate(v, final_offset, final_block, buffer_len);
    } else {
        merge_backwards(
            v,
            final_offset,
            buffer_len,
            final_block - buffer_len,
            buffer_len,
            compare,
        );
    }

    let mut merge_index = final_offset;
    while merge_index >= start + full_merge {
        merge_index -= full_merge;
        merge_backwards(v, merge_index, buffer_len, buffer_len, buffer_len, compare);
    }
}

/// Runs the first `ext_len.ilog2()` levels through the scratch, which holds the `ext_len`
/// buffer elements meanwhile, then finishes with [`build_in_place`].
fn build_out_of_place<S, T, F>(
    v: &mut [T],
    start: usize,
    len: usize,
    buffer_len: usize,
    ext_len: usize,
    scratch: &mut S,
    compare: &mut F,
) where
    S: Scratch<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    scratch.save(&v[start - ext_len..start]);

    pairwise::<S::Transfer, _, _>(v, start, len, compare);
    let mut start = start - 2;

    let mut merge_len = 2;
    while merge_len < ext_len {
        let full_merge = 2 * merge_len;
        let mut merge_index = start;

        while merge_index + full_merge <= start + len {
            merge_forwards::<S::Transfer, _, _>(
                v,
                merge_index,
                merge_len,
                merge_len,
                merge_len,
                compare,
            );
            merge_index += full_merge;
        }

        let left_over = len - (merge_index - start);
        if left_over > merge_len {
            merge_forwards::<S::Transfer, _, _>(
                v,
                merge_index,
                merge_len,
                left_over - merge_len,
                merge_len,
                compare,
            );
        } else {
            <S::Transfer as Transfer<T>>::transfer_block(
                v,
                merge_index - merge_len,
                merge_index,
                left_over,
            );
        }

        start -= merge_len;
        merge_len *= 2;
    }

    scratch.restore(&mut v[start + len..start + len + ext_len]);
    build_in_place(v, start, len, merge_len, buffer_len, compare);
}

/// Sorts every `buffer_len` sized run of `[start, start + len)`, using the `buffer_len` elements
/// before `start` as scratch space. Those elements end up permuted in the same place.
///
/// With `external_len >= 2` the early levels go through `scratch`.
pub fn build_blocks<S, T, F>(
    v: &mut [T],
    start: usize,
    len: usize,
    buffer_len: usize,
    external_len: usize,
    scratch: &mut S,
    compare: &mut F,
) where
    S: Scratch<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    debug_assert!(buffer_len >= 2 && buffer_len.is_power_of_two());
    debug_assert!(start >= buffer_len);

    if external_len >= 2 {
        let ext_len = if buffer_len < external_len {
            buffer_len
        } else {
            1 << external_len.ilog2()
        };
        build_out_of_place(v, start, len, buffer_len, ext_len, scratch, compare);
    } else {
        pairwise::<Swap, _, _>(v, start, len, compare);
        build_in_place(v, start - 2, len, 2, buffer_len, compare);
    }
}
