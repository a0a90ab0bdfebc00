use std::cmp::Ordering;
use std::env;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering::Relaxed};
use std::time::{Duration, Instant};

use rand::prelude::*;

use parasort::{ProgressSink, SortOptions};

pub struct SortImpl;

impl sort_test_tools::Sort for SortImpl {
    fn name() -> String {
        "parasort".into()
    }

    #[inline]
    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Send,
    {
        parasort::sort(arr);
    }

    #[inline]
    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        parasort::sort_by(arr, compare);
    }
}

sort_test_tools::instantiate_sort_tests!(SortImpl);

// --- Engine specific tests ---

fn options(min_sequential: usize) -> SortOptions {
    SortOptions { min_sequential }
}

fn sort_vs_reference(v: &mut [i32], min_sequential: usize) {
    let mut reference = v.to_vec();
    reference.sort_unstable();

    parasort::sort_with(v, options(min_sequential), None);

    assert_eq!(v, &*reference);
}

fn seeded_random_ints(len: usize, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

/// A million random ints with an aggressively small cutoff, forcing a deep
/// parallel task tree.
#[test]
#[cfg_attr(miri, ignore)]
fn parallel_random_1m() {
    let mut v = seeded_random_ints(1 << 20, 42);
    sort_vs_reference(&mut v, 2);
}

/// 64 elements with cutoff 8 forces several splits and several sequential
/// leaves in one call.
#[test]
fn parallel_splits_and_leaves() {
    let mut v = seeded_random_ints(64, 42);
    sort_vs_reference(&mut v, 8);
}

/// Input where >99% of elements share one key. Exercises the equal zone
/// handling, a two-way partition degrades catastrophically here.
#[test]
#[cfg_attr(miri, ignore)]
fn parallel_equal_elements() {
    let mut v = vec![42; 1_234_567];
    v.push(1);
    v.push(64);

    sort_vs_reference(&mut v, 42);
}

/// Timing-bound variant of `parallel_equal_elements`: no more than 3x a
/// sequential `sort_unstable` on the same input. Wall-clock assertions are
/// opt-in, loaded CI machines make them flaky.
#[test]
#[ignore]
fn parallel_equal_elements_bounded() {
    let mut v1 = vec![42; 1_234_567];
    v1.push(1);
    v1.push(64);
    let mut v2 = v1.clone();

    let t1 = Instant::now();
    v1.sort_unstable();
    let std_time = t1.elapsed();

    let t2 = Instant::now();
    parasort::sort_with(&mut v2, options(42), None);
    let par_time = t2.elapsed();

    assert_eq!(v1, v2);
    assert!(
        par_time <= std_time * 3,
        "too slow: std {std_time:?} ours {par_time:?}"
    );
}

/// Randomized soak across sizes from ~100 to ~2.6M elements. Runs a fixed
/// number of rounds by default, `SOAK_ROUNDS=0` loops indefinitely.
#[test]
#[ignore]
fn parallel_soak() {
    let rounds = env::var("SOAK_ROUNDS")
        .ok()
        .map(|val| usize::from_str(&val).unwrap())
        .unwrap_or(64);

    // Baseline so the time bound has a floor for tiny inputs.
    let mut baseline_input: Vec<i32> = (0..4_000_000).collect();
    let t = Instant::now();
    parasort::sort_with(&mut baseline_input, options(42), None);
    let baseline = t.elapsed();

    let mut rng = StdRng::seed_from_u64(42);
    let mut round = 0usize;
    loop {
        let size = (1usize << (rng.gen::<u32>() % 18)) + (rng.gen::<u32>() % 100) as usize;

        let mut v1: Vec<i32> = (0..size).map(|_| rng.gen()).collect();
        let mut v2 = v1.clone();

        let t1 = Instant::now();
        v1.sort_unstable();
        let std_time = t1.elapsed();

        let t2 = Instant::now();
        parasort::sort_with(&mut v2, options(42), None);
        let par_time = t2.elapsed();

        assert_eq!(v1, v2, "size: {size}");

        let budget = Duration::max(baseline, std_time * 3);
        assert!(
            par_time <= budget,
            "too slow: size {size} std {std_time:?} ours {par_time:?}"
        );

        round += 1;
        if rounds != 0 && round >= rounds {
            break;
        }
    }
}

/// The sorted values must not depend on the cutoff, only performance may.
#[test]
fn threshold_invariance() {
    let input = seeded_random_ints(10_000, 7);

    let mut expected = input.clone();
    expected.sort_unstable();

    for min_sequential in [0, 1, 2, 8, 20, 21, 64, 1_000, 10_000, usize::MAX] {
        let mut v = input.clone();
        parasort::sort_with(&mut v, options(min_sequential), None);
        assert_eq!(v, expected, "min_sequential: {min_sequential}");
    }
}

#[test]
fn default_options() {
    let mut v = seeded_random_ints(100_000, 3);
    let mut expected = v.clone();
    expected.sort_unstable();

    parasort::sort(&mut v);
    assert_eq!(v, expected);

    let mut v2 = seeded_random_ints(100_000, 4);
    let mut expected2 = v2.clone();
    expected2.sort_unstable();

    parasort::sort_by(&mut v2, |a, b| a.cmp(b));
    assert_eq!(v2, expected2);

    // Reverse comparator through the same entry point.
    let mut v3 = seeded_random_ints(1_000, 5);
    let mut expected3 = v3.clone();
    expected3.sort_unstable_by(|a, b| b.cmp(a));

    parasort::sort_by(&mut v3, |a, b| b.cmp(a));
    assert_eq!(v3, expected3);
}

/// Counting sink: tallies step sums and checks the init protocol.
#[derive(Default)]
struct CountingSink {
    init_calls: AtomicUsize,
    init_total: AtomicUsize,
    stepped: AtomicUsize,
    step_calls: AtomicUsize,
}

impl ProgressSink for CountingSink {
    fn init(&self, total: usize) {
        self.init_calls.fetch_add(1, Relaxed);
        self.init_total.store(total, Relaxed);
    }

    fn step(&self, count: usize) {
        // A zero-unit step would be useless noise for a renderer.
        assert!(count > 0);
        self.stepped.fetch_add(count, Relaxed);
        self.step_calls.fetch_add(1, Relaxed);
    }
}

fn check_progress_accounting(len: usize, min_sequential: usize) {
    let mut v = seeded_random_ints(len, len as u64);
    let mut expected = v.clone();
    expected.sort_unstable();

    let sink = CountingSink::default();
    parasort::sort_with(&mut v, options(min_sequential), Some(&sink));

    assert_eq!(v, expected);
    assert_eq!(sink.init_calls.load(Relaxed), 1);
    assert_eq!(sink.init_total.load(Relaxed), len);
    assert_eq!(sink.stepped.load(Relaxed), len, "len: {len}");
}

/// The sink receives exactly one init with the range length and step counts
/// that sum to it, never more, never less, whatever the task tree shape.
#[test]
fn progress_exact_total() {
    for (len, min_sequential) in [
        (0, 8),
        (1, 8),
        (2, 8),
        (20, 8),
        (64, 8),
        (1_000, 8),
        (1_000, 1_000_000),
        (100_000, 2),
        (100_000, 1_000),
    ] {
        check_progress_accounting(len, min_sequential);
    }
}

/// Equal-dominant input reports its equal zones exactly once each.
#[test]
fn progress_equal_elements() {
    let mut v = vec![42i32; 100_000];
    v.push(1);
    v.push(64);
    let len = v.len();

    let sink = CountingSink::default();
    parasort::sort_with(&mut v, options(42), Some(&sink));

    assert!(v.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(sink.stepped.load(Relaxed), len);
}

/// A multi-step report happens only for ranges the engine actually splits, a
/// fully sequential call reports the whole range in one step.
#[test]
fn progress_sequential_single_step() {
    let mut v = seeded_random_ints(5_000, 11);

    let sink = CountingSink::default();
    parasort::sort_with(&mut v, options(usize::MAX), Some(&sink));

    assert_eq!(sink.step_calls.load(Relaxed), 1);
    assert_eq!(sink.stepped.load(Relaxed), 5_000);
}

/// Zero-sized element types still uphold the progress contract.
#[test]
fn progress_zst() {
    let mut v = vec![(); 1234];

    let sink = CountingSink::default();
    parasort::sort_with(&mut v, options(8), Some(&sink));

    assert_eq!(sink.init_calls.load(Relaxed), 1);
    assert_eq!(sink.stepped.load(Relaxed), 1234);
}

/// Panic in the comparator while tasks run in parallel: the panic must
/// propagate out of the top-level call and the element set must be intact.
#[test]
#[cfg_attr(miri, ignore)]
fn parallel_panic_retains_set() {
    let len = 200_000usize;
    let mut v = seeded_random_ints(len, 13);
    let sum_before: i64 = v.iter().map(|x| *x as i64).sum();

    let comp_counter = AtomicU64::new(0);
    let res = panic::catch_unwind(AssertUnwindSafe(|| {
        parasort::sort_by_with(
            &mut v,
            |a: &i32, b: &i32| {
                // Unique ticket per comparison, so exactly one task panics.
                if comp_counter.fetch_add(1, Relaxed) == 50_000 {
                    panic!("explicit panic");
                }
                a.cmp(b)
            },
            options(100),
            None,
        );
    }));

    assert!(res.is_err());

    let sum_after: i64 = v.iter().map(|x| *x as i64).sum();
    assert_eq!(sum_before, sum_after);
}

/// Ord violations under a parallel task tree must not lose elements either.
#[test]
#[cfg_attr(miri, ignore)]
fn parallel_violate_ord_retains_set() {
    let len = 100_000usize;
    let mut v = seeded_random_ints(len, 17);
    let sum_before: i64 = v.iter().map(|x| *x as i64).sum();

    let flip = AtomicU64::new(0);
    let _ = panic::catch_unwind(AssertUnwindSafe(|| {
        parasort::sort_by_with(
            &mut v,
            |a: &i32, b: &i32| {
                if flip.fetch_add(1, Relaxed) % 3 == 0 {
                    b.cmp(a)
                } else {
                    a.cmp(b)
                }
            },
            options(100),
            None,
        );
    }));

    let sum_after: i64 = v.iter().map(|x| *x as i64).sum();
    assert_eq!(sum_before, sum_after);
}

/// Sorting an already sorted range leaves it unchanged.
#[test]
fn idempotent() {
    let mut v = seeded_random_ints(50_000, 19);
    parasort::sort_with(&mut v, options(100), None);
    let first = v.clone();

    parasort::sort_with(&mut v, options(100), None);
    assert_eq!(v, first);
}

/// Custom strict weak orderings beyond plain `Ord`, through `sort_by`.
#[test]
fn custom_orderings() {
    let input = seeded_random_ints(30_000, 23);

    // Sort by absolute value. Ties (x and -x) make this a strict weak
    // ordering with non-trivial equivalence classes.
    let mut v = input.clone();
    parasort::sort_by_with(
        &mut v,
        |a, b| {
            let (a, b) = (i64::from(*a).abs(), i64::from(*b).abs());
            a.cmp(&b)
        },
        options(100),
        None,
    );
    assert!(v
        .windows(2)
        .all(|w| i64::from(w[0]).abs() <= i64::from(w[1]).abs()));

    let mut sorted_abs: Vec<i64> = input.iter().map(|x| i64::from(*x).abs()).collect();
    sorted_abs.sort_unstable();
    let got_abs: Vec<i64> = v.iter().map(|x| i64::from(*x).abs()).collect();
    assert_eq!(got_abs, sorted_abs);
}
