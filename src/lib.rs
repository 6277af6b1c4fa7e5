//! Grailsort, a stable block merge sort that needs at most *O*(√*n*) extra memory.
//!
//! The algorithm collects a run of distinct elements from the input, uses part of them as tags
//! that remember which of two merged runs a block came from, and the rest as an internal merge
//! buffer. When the input has too few distinct values it falls back to rotation based merging.
//!
//! Three buffer configurations are offered. [`sort`] allocates nothing. The `static_buffer`
//! variants allocate [`STATIC_BUFFER_LEN`] elements, the `dynamic_buffer` variants allocate
//! √*n* rounded up to a power of two. All of them produce the same order.

use std::cmp::Ordering;
use std::mem;
use std::ops::Range;

mod arrange;
mod blocks;
mod buffer;
mod grail;
mod keys;
mod merge;
mod primitives;

use buffer::{sqrt_pow2, ExternalBuffer, NoBuffer};

/// Length of the buffer used by [`sort_with_static_buffer`] and [`sort_by_with_static_buffer`].
pub const STATIC_BUFFER_LEN: usize = 512;

/// Buffer provisioning for [`sort_range_by`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// *O*(1) extra memory.
    #[default]
    InPlace,
    /// Fixed [`STATIC_BUFFER_LEN`] element buffer.
    StaticBuffer,
    /// Buffer of √*n* elements rounded up to a power of two.
    DynamicBuffer,
}

/// Sorts the slice, preserving the order of equal elements.
///
/// This sort is stable, in-place (i.e., does not allocate), and *O*(*n* \* log(*n*))
/// worst-case.
///
/// # Examples
///
/// ```
/// let mut v = [-5, 4, 1, -3, 2];
///
/// grailsort::sort(&mut v);
/// assert!(v == [-5, -3, 1, 2, 4]);
/// ```
#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    sort_by(v, |a, b| a.cmp(b));
}

/// Sorts the slice with a comparator function, preserving the order of equal elements.
///
/// This sort is stable, in-place (i.e., does not allocate), and *O*(*n* \* log(*n*))
/// worst-case.
///
/// The comparator function must define a total ordering for the elements in the slice. If the
/// ordering is not total, the order of the elements is unspecified, but every element is still
/// present exactly once afterwards. That also holds if `compare` panics.
///
/// # Examples
///
/// ```
/// let mut v = [5, 4, 1, 3, 2];
/// grailsort::sort_by(&mut v, |a, b| a.cmp(b));
/// assert!(v == [1, 2, 3, 4, 5]);
///
/// // reverse sorting
/// grailsort::sort_by(&mut v, |a, b| b.cmp(a));
/// assert!(v == [5, 4, 3, 2, 1]);
/// ```
#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if mem::size_of::<T>() == 0 {
        return;
    }

    grail::common_sort(v, &mut NoBuffer, &mut compare);
}

/// Sorts the slice with a key extraction function, preserving the order of equal elements.
///
/// The key function is called *O*(*n* \* log(*n*)) times.
///
/// # Examples
///
/// ```
/// let mut v = [-5i32, 4, 1, -3, 2];
///
/// grailsort::sort_by_key(&mut v, |k| k.abs());
/// assert!(v == [1, 2, -3, 4, -5]);
/// ```
#[inline]
pub fn sort_by_key<T, K, F>(v: &mut [T], mut f: F)
where
    F: FnMut(&T) -> K,
    K: Ord,
{
    sort_by(v, |a, b| f(a).cmp(&f(b)));
}

/// Like [`sort`], but speeds up merging with a heap allocated buffer of [`STATIC_BUFFER_LEN`]
/// elements.
///
/// Elements are cloned into and out of the buffer. Should `T::clone` or `Ord::cmp` panic, the
/// slice may be left with some elements duplicated and others missing.
#[inline]
pub fn sort_with_static_buffer<T>(v: &mut [T])
where
    T: Ord + Clone,
{
    sort_by_with_static_buffer(v, |a, b| a.cmp(b));
}

/// Like [`sort_by`], with a buffer of [`STATIC_BUFFER_LEN`] elements. See
/// [`sort_with_static_buffer`].
///
/// # Examples
///
/// ```
/// let mut v: Vec<u32> = (0..5000).rev().collect();
/// grailsort::sort_by_with_static_buffer(&mut v, |a, b| a.cmp(b));
/// assert!(v.windows(2).all(|w| w[0] <= w[1]));
/// ```
pub fn sort_by_with_static_buffer<T, F>(v: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if mem::size_of::<T>() == 0 {
        return;
    }

    let mut scratch = ExternalBuffer::with_capacity(STATIC_BUFFER_LEN);
    grail::common_sort(v, &mut scratch, &mut compare);
}

/// Like [`sort`], but speeds up merging with a heap allocated buffer whose length is the
/// smallest power of two not below √`v.len()`.
///
/// Elements are cloned into and out of the buffer. Should `T::clone` or `Ord::cmp` panic, the
/// slice may be left with some elements duplicated and others missing.
#[inline]
pub fn sort_with_dynamic_buffer<T>(v: &mut [T])
where
    T: Ord + Clone,
{
    sort_by_with_dynamic_buffer(v, |a, b| a.cmp(b));
}

/// Like [`sort_by`], with a buffer sized to the input. See [`sort_with_dynamic_buffer`].
///
/// # Examples
///
/// ```
/// let mut v = vec!["delta", "alpha", "charlie", "bravo"];
/// grailsort::sort_by_with_dynamic_buffer(&mut v, |a, b| a.len().cmp(&b.len()));
/// assert_eq!(v, ["delta", "alpha", "bravo", "charlie"]);
/// ```
pub fn sort_by_with_dynamic_buffer<T, F>(v: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if mem::size_of::<T>() == 0 {
        return;
    }

    let mut scratch = ExternalBuffer::with_capacity(sqrt_pow2(v.len()));
    grail::common_sort(v, &mut scratch, &mut compare);
}

/// Sorts `v[range]` with the given buffer strategy. Elements outside of `range` are not touched.
///
/// # Panics
///
/// Panics if `range.start > range.end` or if `range.end > v.len()`.
///
/// # Examples
///
/// ```
/// use grailsort::Strategy;
///
/// let mut v = [9, 3, 2, 1, 0];
/// grailsort::sort_range_by(&mut v, 1..4, Strategy::DynamicBuffer, |a, b| a.cmp(b));
/// assert_eq!(v, [9, 1, 2, 3, 0]);
/// ```
pub fn sort_range_by<T, F>(v: &mut [T], range: Range<usize>, strategy: Strategy, compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    assert!(
        range.start <= range.end,
        "sort range starts at {} but ends at {}",
        range.start,
        range.end
    );
    assert!(
        range.end <= v.len(),
        "sort range end {} out of range for slice of length {}",
        range.end,
        v.len()
    );

    let v = &mut v[range];
    match strategy {
        Strategy::InPlace => sort_by(v, compare),
        Strategy::StaticBuffer => sort_by_with_static_buffer(v, compare),
        Strategy::DynamicBuffer => sort_by_with_dynamic_buffer(v, compare),
    }
}
