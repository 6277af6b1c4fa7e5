//! Shared test battery and input patterns for the grailsort variants.
//!
//! A sort under test is wrapped in a type implementing [`Sort`] and handed to
//! [`instantiate_sort_tests!`] or [`instantiate_buffered_sort_tests!`], which expand to one
//! `#[test]` per battery entry.

use std::cmp::Ordering;

pub trait Sort {
    fn name() -> String;

    fn sort<T>(v: &mut [T])
    where
        T: Ord + Clone;

    fn sort_by<T, F>(v: &mut [T], compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering;
}

pub mod patterns;
pub mod types;
