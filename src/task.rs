//! The parallel task layer.
//!
//! Each task owns one contiguous sub-range, expressed as an exclusive
//! `&mut [T]` carved out with `split_at_mut`, so disjointness between
//! concurrent tasks is compiler-checked rather than a convention. A task
//! either disposes of its range terminally (sequential sort below the
//! cutoff, heapsort once the depth limit is spent) or three-way partitions
//! it and joins on the two outer zones. `rayon::join` gives exactly the
//! scheduling the engine wants: the second closure is made stealable and
//! runs inline on the current worker when every other worker is busy, so
//! exhausting the pool degrades to sequential recursion instead of blocking.

use crate::progress::ProgressSink;
use crate::{heapsort, partition, pivot, quicksort};

/// Shared, immutable per-call configuration, threaded by reference through
/// the whole task tree instead of copied per task.
pub(crate) struct Ctx<'a, F> {
    pub is_less: &'a F,
    pub min_sequential: usize,
    pub progress: Option<&'a dyn ProgressSink>,
}

impl<F> Ctx<'_, F> {
    #[inline]
    fn report(&self, count: usize) {
        if count > 0 {
            if let Some(sink) = self.progress {
                sink.step(count);
            }
        }
    }
}

/// Sorts `v` as one task of the tree.
///
/// `limit` is the number of allowed imbalanced partitions before switching to
/// heapsort, shared with the sequential layer so the `O(n * log(n))`
/// worst-case bound covers the whole tree.
///
/// Progress accounting invariant: every call reports exactly `v.len()` units
/// across itself and its descendants. Terminal tasks report their full
/// length, partitioning tasks report the equal zone (which needs no further
/// work) and leave the outer zones to the children.
pub(crate) fn sort_task<T, F>(v: &mut [T], ctx: &Ctx<'_, F>, limit: u32)
where
    T: Send,
    F: Fn(&T, &T) -> bool + Sync,
{
    let len = v.len();

    if len <= ctx.min_sequential {
        quicksort::quicksort(v, ctx.is_less, None, limit);
        ctx.report(len);
        return;
    }

    // If too many bad pivot choices were made, simply fall back to heapsort
    // in order to guarantee `O(n * log(n))` worst-case.
    if limit == 0 {
        heapsort::heapsort(v, ctx.is_less);
        ctx.report(len);
        return;
    }

    let pivot_pos = pivot::choose_pivot(v, ctx.is_less);
    let (num_lt, num_eq) = partition::partition_three_way(v, pivot_pos, ctx.is_less);

    // The equal zone is in final position, no task will touch it again.
    ctx.report(num_eq);

    let (less, rest) = v.split_at_mut(num_lt);
    let (_equal, greater) = rest.split_at_mut(num_eq);

    // The parent is not done until both children are: join returns only
    // after both closures have completed, stolen or not.
    rayon::join(
        || sort_task(less, ctx, limit - 1),
        || sort_task(greater, ctx, limit - 1),
    );
}
