//! Merging of tagged block sequences, plus the rotation based merges used when no buffer exists.

use std::cmp::Ordering::{self, Greater, Less};
use std::marker::PhantomData;

use crate::blocks::merge_forwards;
use crate::buffer::Transfer;
use crate::primitives::{binary_search_left, binary_search_right, rotate};

/// Which of the two runs being merged a block came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Left,
    Right,
}

impl Origin {
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Origin::Left => Origin::Right,
            Origin::Right => Origin::Left,
        }
    }

    /// Whether an element of a run with this origin goes first, given how it compares to the
    /// head of the other run. Equal elements stay on the left run's side.
    #[inline]
    fn goes_first(self, order: Ordering) -> bool {
        match self {
            Origin::Left => order != Greater,
            Origin::Right => order == Less,
        }
    }
}

/// The active block of a merge pass: the not yet placed tail of the previous merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentBlock {
    pub len: usize,
    pub origin: Origin,
}

/// Origin of the block tagged with the key at `key`.
#[inline]
fn origin_of<T, F>(v: &[T], key: usize, median_key: usize, compare: &mut F) -> Origin
where
    F: FnMut(&T, &T) -> Ordering,
{
    if compare(&v[key], &v[median_key]) == Less {
        Origin::Left
    } else {
        Origin::Right
    }
}

/// How the element level work of a block merge pass is carried out.
pub trait BlockMerge<T> {
    /// Moves the `len` element active block at `current` one block length to the left, handing
    /// the buffer slots over to the right.
    fn slide(v: &mut [T], current: usize, len: usize, block_len: usize);

    /// Merges the active block at `start` with the `right_len` elements after it, returning what
    /// remains active.
    fn smart_merge<F>(
        v: &mut [T],
        start: usize,
        current: CurrentBlock,
        right_len: usize,
        block_len: usize,
        compare: &mut F,
    ) -> CurrentBlock
    where
        F: FnMut(&T, &T) -> Ordering;

    /// Plain stable merge of two adjacent runs, used for the trailing fragment.
    fn merge<F>(
        v: &mut [T],
        start: usize,
        left_len: usize,
        right_len: usize,
        block_len: usize,
        compare: &mut F,
    ) where
        F: FnMut(&T, &T) -> Ordering;

    /// Moves `[start, start + len)` back over the `block_len` buffer slots it was merged into.
    fn reset(v: &mut [T], start: usize, len: usize, block_len: usize);
}

/// Merges through a `block_len` buffer that scrolls along in front of the data.
pub struct Buffered<M>(PhantomData<M>);

/// Merges by binary search and rotation, without any buffer.
pub enum Lazy {}

impl<T, M: Transfer<T>> BlockMerge<T> for Buffered<M> {
    #[inline]
    fn slide(v: &mut [T], current: usize, len: usize, block_len: usize) {
        M::transfer_block(v, current - block_len, current, len);
    }

    fn smart_merge<F>(
        v: &mut [T],
        start: usize,
        current: CurrentBlock,
        right_len: usize,
        block_len: usize,
        compare: &mut F,
    ) -> CurrentBlock
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut buffer = start - block_len;
        let mut left = start;
        let middle = start + current.len;
        let mut right = middle;
        let end = middle + right_len;

        while left < middle && right < end {
            if current.origin.goes_first(compare(&v[left], &v[right])) {
                M::transfer(v, buffer, left);
                left += 1;
            } else {
                M::transfer(v, buffer, right);
                right += 1;
            }
            buffer += 1;
        }

        if left < middle {
            rewind::<M, T>(v, left, middle, end);
            CurrentBlock {
                len: middle - left,
                origin: current.origin,
            }
        } else {
            CurrentBlock {
                len: end - right,
                origin: current.origin.flip(),
            }
        }
    }

    #[inline]
    fn merge<F>(
        v: &mut [T],
        start: usize,
        left_len: usize,
        right_len: usize,
        block_len: usize,
        compare: &mut F,
    ) where
        F: FnMut(&T, &T) -> Ordering,
    {
        merge_forwards::<M, _, _>(v, start, left_len, right_len, block_len, compare);
    }

    fn reset(v: &mut [T], start: usize, len: usize, block_len: usize) {
        for index in (start..start + len).rev() {
            M::transfer(v, index, index - block_len);
        }
    }
}

impl<T> BlockMerge<T> for Lazy {
    #[inline]
    fn slide(_v: &mut [T], _current: usize, _len: usize, _block_len: usize) {}

    fn smart_merge<F>(
        v: &mut [T],
        mut start: usize,
        current: CurrentBlock,
        mut right_len: usize,
        _block_len: usize,
        compare: &mut F,
    ) -> CurrentBlock
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let origin = current.origin;
        let mut left_len = current.len;
        let mut middle = start + left_len;

        debug_assert!(left_len != 0 && right_len != 0);

        if !origin.goes_first(compare(&v[middle - 1], &v[middle])) {
            while left_len != 0 {
                let right_run = &v[middle..middle + right_len];
                let insert_pos = match origin {
                    Origin::Left => binary_search_left(right_run, &v[start], compare),
                    Origin::Right => binary_search_right(right_run, &v[start], compare),
                };

                if insert_pos != 0 {
                    rotate(v, start, left_len, insert_pos);
                    start += insert_pos;
                    right_len -= insert_pos;
                }
                middle = start + left_len;

                if right_len == 0 {
                    return CurrentBlock {
                        len: left_len,
                        origin,
                    };
                }

                loop {
                    start += 1;
                    left_len -= 1;
                    if left_len == 0 || !origin.goes_first(compare(&v[start], &v[middle])) {
                        break;
                    }
                }
            }
        }

        CurrentBlock {
            len: right_len,
            origin: origin.flip(),
        }
    }

    #[inline]
    fn merge<F>(
        v: &mut [T],
        start: usize,
        left_len: usize,
        right_len: usize,
        _block_len: usize,
        compare: &mut F,
    ) where
        F: FnMut(&T, &T) -> Ordering,
    {
        lazy_merge(v, start, left_len, right_len, compare);
    }

    #[inline]
    fn reset(_v: &mut [T], _start: usize, _len: usize, _block_len: usize) {}
}

/// Moves the leftovers `[start, left_overs)` so they end right before `buffer`.
fn rewind<M, T>(v: &mut [T], start: usize, mut left_overs: usize, mut buffer: usize)
where
    M: Transfer<T>,
{
    while left_overs > start {
        left_overs -= 1;
        buffer -= 1;
        M::transfer(v, buffer, left_overs);
    }
}

/// Merges `block_count` tagged blocks starting at `start` into one run.
///
/// With a buffered strategy the result ends up `block_len` slots to the left. The blocks may be
/// followed by `final_left_blocks` untagged left blocks and a `final_len` fragment of the right
/// run, which are merged in last.
#[allow(clippy::too_many_arguments)]
pub fn merge_blocks<G, T, F>(
    v: &mut [T],
    first_key: usize,
    median_key: usize,
    start: usize,
    block_count: usize,
    block_len: usize,
    final_left_blocks: usize,
    final_len: usize,
    compare: &mut F,
) -> CurrentBlock
where
    G: BlockMerge<T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut next_block = start + block_len;
    let mut current = CurrentBlock {
        len: block_len,
        origin: origin_of(v, first_key, median_key, compare),
    };

    for key_index in 1..block_count {
        let current_block = next_block - current.len;
        let next_origin = origin_of(v, first_key + key_index, median_key, compare);

        if next_origin == current.origin {
            G::slide(v, current_block, current.len, block_len);
            current.len = block_len;
        } else {
            debug_assert!(current.len != 0);
            current = G::smart_merge(v, current_block, current, block_len, block_len, compare);
        }

        next_block += block_len;
    }

    let mut current_block = next_block - current.len;

    if final_len != 0 {
        match current.origin {
            Origin::Right => {
                G::slide(v, current_block, current.len, block_len);
                current_block = next_block;
                current = CurrentBlock {
                    len: block_len * final_left_blocks,
                    origin: Origin::Left,
                };
            }
            Origin::Left => current.len += block_len * final_left_blocks,
        }
        G::merge(v, current_block, current.len, final_len, block_len, compare);
    } else {
        G::slide(v, current_block, current.len, block_len);
    }

    current
}

/// Counts how many of the `block_count` blocks at `offset` have a head greater than the head of
/// the fragment that follows them, scanning back from the end.
pub fn count_final_left_blocks<T, F>(
    v: &[T],
    offset: usize,
    block_count: usize,
    block_len: usize,
    compare: &mut F,
) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let first_right_block = offset + block_count * block_len;
    let mut left_blocks = 0;

    while left_blocks < block_count
        && compare(
            &v[first_right_block],
            &v[first_right_block - (left_blocks + 1) * block_len],
        ) == Less
    {
        left_blocks += 1;
    }

    left_blocks
}

/// Merges `[start, start + left_len)` with the `right_len` elements after it using binary search
/// and rotation only. Works from whichever side is shorter.
pub fn lazy_merge<T, F>(
    v: &mut [T],
    mut start: usize,
    mut left_len: usize,
    mut right_len: usize,
    compare: &mut F,
) where
    F: FnMut(&T, &T) -> Ordering,
{
    if left_len < right_len {
        while left_len != 0 {
            let middle = start + left_len;
            let insert_pos = binary_search_left(&v[middle..middle + right_len], &v[start], compare);

            if insert_pos != 0 {
                rotate(v, start, left_len, insert_pos);
                start += insert_pos;
                right_len -= insert_pos;
            }

            if right_len == 0 {
                break;
            }

            let middle = start + left_len;
            loop {
                start += 1;
                left_len -= 1;
                if left_len == 0 || compare(&v[start], &v[middle]) == Greater {
                    break;
                }
            }
        }
    } else {
        while right_len != 0 {
            let last = start + left_len + right_len - 1;
            let insert_pos = binary_search_right(&v[start..start + left_len], &v[last], compare);

            if insert_pos != left_len {
                rotate(v, start + insert_pos, left_len - insert_pos, right_len);
                left_len = insert_pos;
            }

            if left_len == 0 {
                break;
            }

            let middle = start + left_len;
            loop {
                right_len -= 1;
                if right_len == 0
                    || compare(&v[middle - 1], &v[middle + right_len - 1]) == Greater
                {
                    break;
                }
            }
        }
    }
}

/// Bottom-up merge sort built on [`lazy_merge`]. O(1) memory and stable, but runs in
/// O(n log² n) in general, so it is only used when there are too few distinct values to tag
/// blocks with.
pub fn lazy_stable_sort<T, F>(v: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();

    for index in (1..len).step_by(2) {
        if compare(&v[index - 1], &v[index]) == Greater {
            v.swap(index - 1, index);
        }
    }

    let mut merge_len = 2;
    while merge_len < len {
        let full_merge = 2 * merge_len;
        let mut merge_index = 0;

        while merge_index + full_merge <= len {
            lazy_merge(v, merge_index, merge_len, merge_len, compare);
            merge_index += full_merge;
        }

        let left_over = len - merge_index;
        if left_over > merge_len {
            lazy_merge(v, merge_index, merge_len, left_over - merge_len, compare);
        }

        merge_len *= 2;
    }
}
