//! Element movement capabilities.
//!
//! Every phase that moves data through the internal key buffer exists in two flavours: one that
//! swaps (the buffer contents travel along with the data and are never lost) and one that writes
//! clones (the buffer contents are parked in an external `Vec` first and may be overwritten). The
//! merge routines are written once against [`Transfer`] and the driver picks the flavour through
//! the [`Scratch`] it was handed.

use std::marker::PhantomData;

/// Moves the element at `src` to `dst`.
pub trait Transfer<T> {
    fn transfer(v: &mut [T], dst: usize, src: usize);

    /// Moves `len` elements starting at `src` to `dst`, front to back. Ranges may overlap if
    /// `dst <= src`. With [`Swap`] the displaced elements land in the vacated source slots, but in
    /// a permuted order when the ranges overlap.
    #[inline]
    fn transfer_block(v: &mut [T], dst: usize, src: usize, len: usize) {
        for i in 0..len {
            Self::transfer(v, dst + i, src + i);
        }
    }
}

/// Exchange positions. The element previously at `dst` ends up at `src`.
pub enum Swap {}

impl<T> Transfer<T> for Swap {
    #[inline]
    fn transfer(v: &mut [T], dst: usize, src: usize) {
        v.swap(dst, src);
    }
}

/// Overwrite `dst` with a clone of `src`, leaving `src` untouched.
pub struct Write<T>(PhantomData<T>);

impl<T: Clone> Transfer<T> for Write<T> {
    #[inline]
    fn transfer(v: &mut [T], dst: usize, src: usize) {
        let item = v[src].clone();
        v[dst] = item;
    }
}

/// Auxiliary storage the driver may use to make early build levels and block merges write based.
pub trait Scratch<T> {
    type Transfer: Transfer<T>;

    /// Number of elements that can be saved at once. Zero disables all out-of-place phases.
    fn capacity(&self) -> usize;

    /// Parks a copy of `v` so it can be overwritten.
    fn save(&mut self, v: &[T]);

    /// Writes the parked copy back into `v`, which must be as long as the saved range.
    fn restore(&mut self, v: &mut [T]);
}

/// The in-place configuration: nothing to save, everything is swapped.
pub struct NoBuffer;

impl<T> Scratch<T> for NoBuffer {
    type Transfer = Swap;

    fn capacity(&self) -> usize {
        0
    }

    fn save(&mut self, v: &[T]) {
        debug_assert!(v.is_empty());
    }

    fn restore(&mut self, v: &mut [T]) {
        debug_assert!(v.is_empty());
    }
}

/// Heap allocated scratch holding at most `capacity` parked elements.
pub struct ExternalBuffer<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> ExternalBuffer<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }
}

impl<T: Clone> Scratch<T> for ExternalBuffer<T> {
    type Transfer = Write<T>;

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn save(&mut self, v: &[T]) {
        debug_assert!(v.len() <= self.capacity);
        self.items.clear();
        self.items.extend_from_slice(v);
    }

    fn restore(&mut self, v: &mut [T]) {
        debug_assert_eq!(v.len(), self.items.len());
        for (dst, item) in v.iter_mut().zip(self.items.drain(..)) {
            *dst = item;
        }
    }
}

/// Smallest power of two whose square is at least `len`. Used both as the ideal block length and
/// as the size of the dynamically provisioned buffer.
pub fn sqrt_pow2(len: usize) -> usize {
    let mut result = 1usize;
    while result.saturating_mul(result) < len {
        result *= 2;
    }
    result
}
