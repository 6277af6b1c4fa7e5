//! Runs the battery against the standard library stable sort, so a failing battery entry can be
//! told apart from a failing sort.

use std::cmp::Ordering;

use sort_test_tools::instantiate_sort_tests;
use sort_test_tools::Sort;

struct SortImpl {}

impl Sort for SortImpl {
    fn name() -> String {
        "rust_std_stable".into()
    }

    fn sort<T>(v: &mut [T])
    where
        T: Ord + Clone,
    {
        v.sort();
    }

    fn sort_by<T, F>(v: &mut [T], compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        v.sort_by(compare);
    }
}

instantiate_sort_tests!(SortImpl);
