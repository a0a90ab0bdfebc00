//! parasort - a comparator-parameterized parallel in-place unstable sort.
//!
//! The slice is sorted by recursive three-way partitioning. Sub-ranges above a
//! configurable cutoff are handed to rayon's work-stealing pool as independent
//! tasks, sub-ranges at or below it are sorted sequentially with an introsort
//! hybrid. Three-way partitioning keeps partition work linear in the number of
//! distinct keys, so inputs dominated by a single key stay within a small
//! constant factor of a sequential sort instead of degrading.
//!
//! An optional [`ProgressSink`] receives the total once up front and then
//! per-task increments that sum to exactly the slice length by the time the
//! top-level call returns.

use core::cmp::Ordering;
use core::mem;

mod heapsort;
mod partition;
mod pivot;
mod progress;
mod quicksort;
mod smallsort;
mod task;

pub use progress::ProgressSink;

use task::Ctx;

/// Configuration for a sort call.
///
/// `min_sequential` is the sub-range length at or below which no further
/// parallel tasks are spawned and the range is sorted sequentially instead.
/// It is the main tuning knob: element size, comparator cost and core count
/// all shift the profitable value, so callers that care should calibrate it
/// for their workload. Values below the insertion sort cutoff (20) are
/// clamped to it, a range that small is insertion sorted either way.
#[derive(Copy, Clone, Debug)]
pub struct SortOptions {
    pub min_sequential: usize,
}

impl Default for SortOptions {
    fn default() -> Self {
        // A few thousand elements keeps per-task work well above the spawn
        // and join cost for cheap comparators, without starving wide machines
        // of tasks on mid-sized inputs.
        Self {
            min_sequential: 8192,
        }
    }
}

/// Sorts the slice in parallel, but might not preserve the order of equal elements.
///
/// This sort is unstable (i.e., may reorder equal elements), in-place
/// (i.e., does not allocate), and *O*(*n* \* log(*n*)) worst-case.
///
/// Uses [`SortOptions::default`] and no progress reporting. See [`sort_with`]
/// for the tunable variant.
///
/// # Examples
///
/// ```
/// let mut v = [-5, 4, 1, -3, 2];
///
/// parasort::sort(&mut v);
/// assert!(v == [-5, -3, 1, 2, 4]);
/// ```
#[inline(always)]
pub fn sort<T>(v: &mut [T])
where
    T: Ord + Send,
{
    parallel_sort(v, &|a, b| a.lt(b), SortOptions::default(), None);
}

/// Sorts the slice in parallel with a comparator function, but might not
/// preserve the order of equal elements.
///
/// The comparator function must define a total ordering for the elements in
/// the slice. If the ordering is not total, the order of the elements is
/// unspecified, but the slice is still a permutation of its input and the
/// call returns without aborting. An order is a total order if it is (for all
/// `a`, `b` and `c`):
///
/// * total and antisymmetric: exactly one of `a < b`, `a == b` or `a > b` is true, and
/// * transitive, `a < b` and `b < c` implies `a < c`. The same must hold for both `==` and `>`.
///
/// Unlike the sequential slice sorts the comparator is shared across worker
/// threads, which is why it is bound by `Fn + Sync` rather than `FnMut`.
///
/// # Examples
///
/// ```
/// let mut v = [5, 4, 1, 3, 2];
/// parasort::sort_by(&mut v, |a, b| a.cmp(b));
/// assert!(v == [1, 2, 3, 4, 5]);
///
/// // reverse sorting
/// parasort::sort_by(&mut v, |a, b| b.cmp(a));
/// assert!(v == [5, 4, 3, 2, 1]);
/// ```
#[inline(always)]
pub fn sort_by<T, F>(v: &mut [T], compare: F)
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    parallel_sort(
        v,
        &|a, b| compare(a, b) == Ordering::Less,
        SortOptions::default(),
        None,
    );
}

/// [`sort`] with explicit options and an optional progress sink.
///
/// If `progress` is supplied it receives `init(v.len())` once before any
/// element is moved, and then `step` increments whose sum equals `v.len()`
/// exactly once the call returns. The engine never finalizes the sink, that
/// is the caller's job after this returns.
#[inline(always)]
pub fn sort_with<T>(v: &mut [T], options: SortOptions, progress: Option<&dyn ProgressSink>)
where
    T: Ord + Send,
{
    parallel_sort(v, &|a, b| a.lt(b), options, progress);
}

/// [`sort_by`] with explicit options and an optional progress sink.
#[inline(always)]
pub fn sort_by_with<T, F>(
    v: &mut [T],
    compare: F,
    options: SortOptions,
    progress: Option<&dyn ProgressSink>,
) where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    parallel_sort(
        v,
        &|a, b| compare(a, b) == Ordering::Less,
        options,
        progress,
    );
}

// --- IMPL ---

fn parallel_sort<T, F>(
    v: &mut [T],
    is_less: &F,
    options: SortOptions,
    progress: Option<&dyn ProgressSink>,
) where
    T: Send,
    F: Fn(&T, &T) -> bool + Sync,
{
    let len = v.len();

    if let Some(sink) = progress {
        sink.init(len);
    }

    // Sorting has no meaningful behavior on zero-sized types, and a slice of
    // less than two elements is already sorted. The progress contract still
    // holds, the whole range counts as placed.
    if mem::size_of::<T>() == 0 || len < 2 {
        if len > 0 {
            if let Some(sink) = progress {
                sink.step(len);
            }
        }
        return;
    }

    // Limit the number of imbalanced partitions to `2 * floor(log2(len))`.
    // The binary OR by one is used to eliminate the zero-check in the logarithm.
    let limit = 2 * (len | 1).ilog2();

    let ctx = Ctx {
        is_less,
        min_sequential: options
            .min_sequential
            .max(smallsort::MAX_LEN_ALWAYS_INSERTION_SORT),
        progress,
    };

    task::sort_task(v, &ctx, limit);
}
