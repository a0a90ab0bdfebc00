//! The sequential leaf engine: a depth-limited three-phase quicksort that
//! insertion sorts tiny slices and escapes to heapsort when the limit runs
//! out. Tasks at or below the parallel cutoff land here.

use crate::{heapsort, partition, pivot, smallsort};

/// Sorts `v` recursively.
///
/// If the slice had a predecessor in the original array, it is specified as
/// `ancestor_pivot`.
///
/// `limit` is the number of allowed imbalanced partitions before switching to
/// `heapsort`. If zero, this function will immediately switch to heapsort.
pub(crate) fn quicksort<'a, T, F>(
    mut v: &'a mut [T],
    is_less: &F,
    mut ancestor_pivot: Option<&'a T>,
    mut limit: u32,
) where
    F: Fn(&T, &T) -> bool,
{
    loop {
        if v.len() <= smallsort::MAX_LEN_ALWAYS_INSERTION_SORT {
            smallsort::insertion_sort_shift_left(v, 1, is_less);
            return;
        }

        // If too many bad pivot choices were made, simply fall back to
        // heapsort in order to guarantee `O(n * log(n))` worst-case.
        if limit == 0 {
            heapsort::heapsort(v, is_less);
            return;
        }

        limit -= 1;

        let pivot_pos = pivot::choose_pivot(v, is_less);

        // If the chosen pivot is equal to the predecessor, then it's the
        // smallest element in the slice. Partition the slice into elements
        // equal to and elements greater than the pivot. This case is usually
        // hit when the slice contains many duplicate elements.
        if let Some(p) = ancestor_pivot {
            if !is_less(p, &v[pivot_pos]) {
                let num_eq = partition::partition_equal(v, pivot_pos, is_less);

                // Continue sorting elements greater than the pivot.
                v = &mut v[num_eq..];
                ancestor_pivot = None;
                continue;
            }
        }

        // Partition the slice.
        let mid = partition::partition(v, pivot_pos, is_less);

        // Split the slice into `left`, `pivot`, and `right`.
        let (left, right) = v.split_at_mut(mid);
        let (pivot, right) = right.split_at_mut(1);
        let pivot = &pivot[0];

        // Recurse into the left side. We have a fixed recursion limit,
        // testing shows no real benefit for recursing into the shorter side.
        quicksort(left, is_less, ancestor_pivot, limit);

        // Continue with the right side.
        v = right;
        ancestor_pivot = Some(pivot);
    }
}
