use std::hint::black_box;
use std::num::NonZero;
use std::sync::{Arc, Barrier, Mutex};
use std::time::{Duration, Instant};

use crate::ThreadPool;

impl ThreadPool {
    /// Executes a benchmark in parallel on every thread in the pool, returning the mean
    /// duration taken by the started threads along with each thread's final state.
    ///
    /// `prepare_fn` is called once on every thread before timing starts; whatever it
    /// returns is that thread's private state, passed by shared reference to `iter_fn`
    /// on each of the `iterations` calls. Preparation is not part of the timed block.
    /// Threads rendezvous on a barrier after preparing, so the timed loops start together.
    ///
    /// The iteration count is typically decided by the Criterion benchmark infrastructure;
    /// feed [`RunSummary::mean_duration()`] to `Bencher::iter_custom`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::atomic::{AtomicU64, Ordering};
    /// use std::sync::Arc;
    ///
    /// use bench_rig::ThreadPool;
    /// use new_zealand::nz;
    ///
    /// let mut pool = ThreadPool::new(nz!(2));
    /// let counter = Arc::new(AtomicU64::new(0));
    ///
    /// let summary = pool.timed_run(
    ///     100,
    ///     {
    ///         let counter = Arc::clone(&counter);
    ///         move || Arc::clone(&counter)
    ///     },
    ///     |counter| {
    ///         counter.fetch_add(1, Ordering::Relaxed);
    ///     },
    /// );
    ///
    /// assert_eq!(counter.load(Ordering::Relaxed), 200);
    /// println!("mean duration: {:?}", summary.mean_duration());
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if a worker thread disappears mid-run, which can only follow from a panic
    /// inside one of the callbacks.
    #[expect(
        clippy::needless_pass_by_ref_mut,
        reason = "exclusive reference keeps a second concurrent run from interleaving commands and deadlocking the barriers"
    )]
    pub fn timed_run<P, S, F>(&mut self, iterations: u64, prepare_fn: P, iter_fn: F) -> RunSummary<S>
    where
        P: Fn() -> S + Clone + Send + 'static,
        F: Fn(&S) + Clone + Send + 'static,
        S: Send + 'static,
    {
        let thread_count = self.thread_count();

        // All threads will wait on this before starting, so they start together.
        let start = Arc::new(Barrier::new(thread_count.get()));

        let (result_txs, result_rxs): (Vec<_>, Vec<_>) = (0..thread_count.get())
            .map(|_| oneshot::channel())
            .unzip();

        let result_txs = Arc::new(Mutex::new(result_txs));

        self.enqueue_task({
            let start = Arc::clone(&start);
            let result_txs = Arc::clone(&result_txs);

            move || {
                let result_tx = result_txs
                    .lock()
                    .expect("popping a preallocated element cannot panic, so the lock is never poisoned")
                    .pop()
                    .expect("one result channel was created for every thread in the pool");

                let state = prepare_fn();

                start.wait();

                let timed_start = Instant::now();

                for _ in 0..iterations {
                    // The state reference stays opaque so field updates performed by
                    // `iter_fn` hit memory instead of being hoisted into registers.
                    iter_fn(black_box(&state));
                }

                let elapsed = timed_start.elapsed();

                result_tx
                    .send((elapsed, state))
                    .expect("the run holds the receiver until every thread has reported");
            }
        });

        let mut total_elapsed_nanos: u128 = 0;
        let mut thread_states = Vec::with_capacity(thread_count.get());

        for rx in result_rxs {
            let (elapsed, state) = rx
                .recv()
                .expect("worker thread dropped its result channel, which only happens on panic");
            total_elapsed_nanos = total_elapsed_nanos.saturating_add(elapsed.as_nanos());
            thread_states.push(state);
        }

        RunSummary {
            mean_duration: mean_duration_across_threads(thread_count, total_elapsed_nanos),
            thread_states: thread_states.into_boxed_slice(),
        }
    }
}

#[cfg_attr(test, mutants::skip)] // Difficult to simulate time and therefore set expectations.
fn mean_duration_across_threads(
    thread_count: NonZero<usize>,
    total_elapsed_nanos: u128,
) -> Duration {
    let mean_nanos = total_elapsed_nanos
        .checked_div(thread_count.get() as u128)
        .expect("thread count is NonZero, so division by zero is impossible");

    Duration::from_nanos(
        mean_nanos
            .try_into()
            .expect("overflowing u64 nanoseconds is unrealistic when using a real clock"),
    )
}

/// The result of a timed run: aggregate timing plus each thread's final state.
///
/// The timing is the mean across the participating threads, which is the shape
/// Criterion's `iter_custom` expects. The states are returned in no particular
/// order; there is one per thread.
#[derive(Debug)]
#[must_use = "the benchmarking framework will typically need this information for its results"]
pub struct RunSummary<S> {
    mean_duration: Duration,
    thread_states: Box<[S]>,
}

impl<S> RunSummary<S> {
    /// Returns the mean duration of the timed loop across all threads in the run.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Real timing logic in tests is not desirable.
    pub fn mean_duration(&self) -> Duration {
        self.mean_duration
    }

    /// Returns the per-thread states produced by the prepare callback,
    /// as they were when the timed loop finished.
    #[must_use]
    pub fn thread_states(&self) -> &[S] {
        &self.thread_states
    }

    /// Consumes the summary, returning the per-thread states.
    #[must_use]
    pub fn into_thread_states(self) -> Vec<S> {
        self.thread_states.into_vec()
    }
}
