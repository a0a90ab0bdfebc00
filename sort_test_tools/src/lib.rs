//! Shared test tooling for sort implementations: deterministic input
//! patterns, non-trivial element types and a generic correctness suite.

/// Abstraction over a sort implementation under test.
///
/// The bounds mirror what a parallel sort requires of its inputs: elements
/// cross worker threads (`T: Send`) and the comparator is shared between
/// them (`Fn + Sync` rather than `FnMut`).
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Send;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Send,
        F: Fn(&T, &T) -> std::cmp::Ordering + Sync;
}

pub mod elem_types;
pub mod patterns;
