use std::cmp::Ordering::{self, Greater, Less};

/// Swaps the disjoint ranges `[a, a + len)` and `[b, b + len)` element by element.
#[inline]
pub fn block_swap<T>(v: &mut [T], a: usize, b: usize, len: usize) {
    for i in 0..len {
        v.swap(a + i, b + i);
    }
}

/// Exchanges `[start, start + left_len)` with the `right_len` elements that follow it, using only
/// block swaps of the shorter side.
pub fn rotate<T>(v: &mut [T], mut start: usize, mut left_len: usize, mut right_len: usize) {
    while left_len > 0 && right_len > 0 {
        if left_len <= right_len {
            block_swap(v, start, start + left_len, left_len);
            start += left_len;
            right_len -= left_len;
        } else {
            block_swap(v, start + left_len - right_len, start + left_len, right_len);
            left_len -= right_len;
        }
    }
}

/// First position in the sorted `v` whose element is not less than `target`.
pub fn binary_search_left<T, F>(v: &[T], target: &T, compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut left = 0;
    let mut right = v.len();
    while left < right {
        let middle = left + (right - left) / 2;
        if compare(&v[middle], target) == Less {
            left = middle + 1;
        } else {
            right = middle;
        }
    }
    left
}

/// First position in the sorted `v` whose element is greater than `target`.
pub fn binary_search_right<T, F>(v: &[T], target: &T, compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut left = 0;
    let mut right = v.len();
    while left < right {
        let middle = left + (right - left) / 2;
        if compare(&v[middle], target) == Greater {
            right = middle;
        } else {
            left = middle + 1;
        }
    }
    right
}

/// Stable swap based insertion sort.
pub fn insertion_sort<T, F>(v: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for item in 1..v.len() {
        let mut right = item;
        while right > 0 && compare(&v[right - 1], &v[right]) == Greater {
            v.swap(right - 1, right);
            right -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_exchanges_sides() {
        for total in 0..12 {
            for left_len in 0..=total {
                let mut v: Vec<usize> = (0..total).collect();
                rotate(&mut v, 0, left_len, total - left_len);

                let mut expected: Vec<usize> = (left_len..total).collect();
                expected.extend(0..left_len);
                assert_eq!(v, expected, "left_len: {left_len} total: {total}");
            }
        }
    }

    #[test]
    fn rotate_subrange() {
        let mut v = [9, 1, 2, 3, 4, 5, 9];
        rotate(&mut v, 1, 2, 3);
        assert_eq!(v, [9, 3, 4, 5, 1, 2, 9]);
    }

    #[test]
    fn binary_search_bounds() {
        let v = [1, 2, 2, 2, 5, 7];
        let mut compare = |a: &i32, b: &i32| a.cmp(b);

        assert_eq!(binary_search_left(&v, &2, &mut compare), 1);
        assert_eq!(binary_search_right(&v, &2, &mut compare), 4);
        assert_eq!(binary_search_left(&v, &0, &mut compare), 0);
        assert_eq!(binary_search_right(&v, &9, &mut compare), 6);
        assert_eq!(binary_search_left(&v, &6, &mut compare), 5);
        assert_eq!(binary_search_right(&[], &6, &mut compare), 0);
    }

    #[test]
    fn insertion_sort_is_stable() {
        let mut v = [(3, 0), (1, 1), (3, 2), (0, 3), (1, 4)];
        insertion_sort(&mut v, &mut |a: &(i32, i32), b: &(i32, i32)| a.0.cmp(&b.0));
        assert_eq!(v, [(0, 3), (1, 1), (1, 4), (3, 0), (3, 2)]);
    }
}
