// Recursively select a pseudomedian if above this threshold.
const PSEUDO_MEDIAN_REC_THRESHOLD: usize = 64;

/// Selects a pivot index from `v`. Uses a compact pseudomedian of 9 over
/// evenly strided samples for larger slices, a plain median of 3 below the
/// threshold. Robust sampling bounds partition imbalance on adversarial
/// inputs without mutating `v`.
///
/// Callers must only invoke this on slices longer than the insertion sort
/// cutoff, which guarantees all sample indices below are in bounds.
pub(crate) fn choose_pivot<T, F: Fn(&T, &T) -> bool>(v: &[T], is_less: &F) -> usize {
    let len = v.len();
    debug_assert!(len > 8);

    let a = 0; // start
    let b = len / 2; // mid
    let c = len - 1; // end

    if len < PSEUDO_MEDIAN_REC_THRESHOLD {
        median3(v, a, b, c, is_less)
    } else {
        let n8 = len / 8;

        let m1 = median3(v, a, a + n8, a + 2 * n8, is_less);
        let m2 = median3(v, b - n8, b, b + n8, is_less);
        let m3 = median3(v, c - 2 * n8, c - n8, c, is_less);

        median3(v, m1, m2, m3, is_less)
    }
}

/// Calculates the index of the median of `v[a]`, `v[b]` and `v[c]`.
#[inline(always)]
fn median3<T, F: Fn(&T, &T) -> bool>(v: &[T], a: usize, b: usize, c: usize, is_less: &F) -> usize {
    // Compiler tends to make this branchless when sensible, and avoids the
    // third comparison when not.
    let x = is_less(&v[b], &v[a]);
    let y = is_less(&v[c], &v[a]);
    let z = is_less(&v[c], &v[b]);

    [a, b, c][(x == y) as usize + (y != z) as usize]
}
