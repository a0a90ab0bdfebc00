use core::ptr;

/// Moves every element for which `belongs_left` is true in front of every
/// element for which it is false. Returns the number of elements on the left.
///
/// Hoare-style cursor loop. A panic in the predicate leaves `v` a permutation
/// of its input, the loop only ever swaps elements in place.
fn partition_by<T>(v: &mut [T], belongs_left: &mut impl FnMut(&T) -> bool) -> usize {
    let mut l = 0;
    let mut r = v.len();

    loop {
        // SAFETY: The unsafety below involves indexing an array. For the first
        // one: We already do the bounds checking here with `l < r`. For the
        // second one: We initially have `l == 0` and `r == v.len()` and we
        // checked that `l < r` at every indexing operation.
        unsafe {
            // Find the first element that belongs on the right.
            while l < r && belongs_left(v.get_unchecked(l)) {
                l += 1;
            }

            // Find the last element that belongs on the left.
            while l < r && !belongs_left(v.get_unchecked(r - 1)) {
                r -= 1;
            }

            // Are we done?
            if l >= r {
                break;
            }

            // Swap the found pair of out-of-place elements.
            r -= 1;
            let ptr = v.as_mut_ptr();
            ptr::swap(ptr.add(l), ptr.add(r));
            l += 1;
        }
    }

    l
}

/// Partitions `v` into elements smaller than `v[pivot]`, followed by the
/// pivot, followed by elements greater than or equal to it.
///
/// Returns the number of elements smaller than the pivot, which is also the
/// pivot's final index.
pub(crate) fn partition<T, F>(v: &mut [T], pivot: usize, is_less: &F) -> usize
where
    F: Fn(&T, &T) -> bool,
{
    // Place the pivot at the beginning of the slice, then partition the rest
    // against it. Keeping the pivot inside `v` instead of copying it out
    // means a panicking comparison can never lose or duplicate it.
    v.swap(0, pivot);
    let (pivot, rest) = v.split_at_mut(1);
    let pivot = &pivot[0];

    let num_lt = partition_by(rest, &mut |x| is_less(x, pivot));

    // Place the pivot between the two partitions.
    v.swap(0, num_lt);

    num_lt
}

/// Partitions `v` into elements equal to `v[pivot]` followed by elements
/// greater than it, assuming `v` contains no element smaller than `v[pivot]`.
///
/// Returns the number of elements equal to the pivot, pivot included.
pub(crate) fn partition_equal<T, F>(v: &mut [T], pivot: usize, is_less: &F) -> usize
where
    F: Fn(&T, &T) -> bool,
{
    v.swap(0, pivot);
    let (pivot, rest) = v.split_at_mut(1);
    let pivot = &pivot[0];

    // With no smaller elements present, "not greater than the pivot" is
    // exactly "equal to the pivot".
    let num_eq = partition_by(rest, &mut |x| !is_less(pivot, x));

    // Add 1 to account for the pivot itself, still sitting at index 0.
    num_eq + 1
}

/// Three-way partitions `v` around `v[pivot]` into a less-than zone, an equal
/// zone and a greater-than zone.
///
/// Returns `(num_lt, num_eq)`: `v[..num_lt]` is less than the pivot,
/// `v[num_lt..num_lt + num_eq]` is equal to it (`num_eq >= 1`, the pivot is
/// in there), and the rest is greater. The equal zone is in final sorted
/// position when this returns.
pub(crate) fn partition_three_way<T, F>(v: &mut [T], pivot: usize, is_less: &F) -> (usize, usize)
where
    F: Fn(&T, &T) -> bool,
{
    let num_lt = partition(v, pivot, is_less);

    // Everything from the pivot on is >= pivot, so a second pass over that
    // tail can split off the equal run. Two plain passes beat a single
    // three-cursor pass here, each loop stays branch-lean.
    let num_eq = partition_equal(&mut v[num_lt..], 0, is_less);

    (num_lt, num_eq)
}
