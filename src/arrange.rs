use std::cmp::Ordering::{self, Equal, Less};

use crate::primitives::block_swap;

/// Selection sorts `block_count` blocks of `block_len` starting at `start` by their first element.
///
/// The tags at `first_key..first_key + block_count` are swapped in lockstep with their blocks and
/// break ties between equal heads, so the block order stays consistent with the tag order.
/// Returns the new position, relative to `first_key`, of the tag that started at `median_key`.
pub fn block_select_sort<T, F>(
    v: &mut [T],
    first_key: usize,
    start: usize,
    mut median_key: usize,
    block_count: usize,
    block_len: usize,
    compare: &mut F,
) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    for first_block in 0..block_count {
        let mut select_block = first_block;

        for current_block in first_block + 1..block_count {
            let order = compare(
                &v[start + current_block * block_len],
                &v[start + select_block * block_len],
            );

            if order == Less
                || (order == Equal
                    && compare(&v[first_key + current_block], &v[first_key + select_block]) == Less)
            {
                select_block = current_block;
            }
        }

        if select_block != first_block {
            block_swap(
                v,
                start + first_block * block_len,
                start + select_block * block_len,
                block_len,
            );
            v.swap(first_key + first_block, first_key + select_block);

            if median_key == first_block {
                median_key = select_block;
            } else if median_key == select_block {
                median_key = first_block;
            }
        }
    }

    median_key
}
