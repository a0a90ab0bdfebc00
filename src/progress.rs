/// External observer of sorting progress.
///
/// The engine calls [`init`](ProgressSink::init) exactly once before any
/// element is moved, with the total number of units the whole call will
/// report. During sorting it calls [`step`](ProgressSink::step) from
/// whichever worker thread happens to finish a piece of work, many times and
/// in no particular order. The sum of all `step` counts equals the total
/// passed to `init` exactly once the top-level sort call returns.
///
/// The engine never finalizes a sink. Whatever "done" means for a concrete
/// sink is up to the caller once the sort returns.
///
/// Implementations are shared across worker threads, so any internal
/// accumulation has to be atomically consistent. An `AtomicUsize` counter
/// bumped with `fetch_add` is the typical shape.
pub trait ProgressSink: Sync {
    /// Announces the total number of units that will be reported.
    fn init(&self, total: usize);

    /// Reports `count` more units as placed in final or provably-partitioned
    /// position.
    fn step(&self, count: usize);
}
