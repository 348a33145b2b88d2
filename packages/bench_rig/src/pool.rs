use std::num::NonZero;
use std::sync::{Arc, Mutex, mpsc};
use std::thread::{self, JoinHandle};

use new_zealand::nz;

/// Simple minimal thread pool that lets benchmark batches run on pre-warmed threads
/// instead of creating new threads for every batch of iterations. Thread reuse keeps
/// thread creation cost out of the measured numbers.
///
/// # Examples
///
/// ```
/// use bench_rig::ThreadPool;
/// use new_zealand::nz;
///
/// let pool = ThreadPool::new(nz!(2));
/// assert_eq!(pool.thread_count().get(), 2);
/// ```
///
/// # Lifecycle
///
/// Dropping the pool shuts down all worker threads and waits for them to finish.
#[derive(Debug)]
pub struct ThreadPool {
    command_txs: Vec<mpsc::Sender<Command>>,
    join_handles: Vec<JoinHandle<()>>,
    thread_count: NonZero<usize>,
}

impl ThreadPool {
    /// Creates a pool with one worker thread per available processor.
    #[must_use]
    pub fn all() -> Self {
        Self::new(thread::available_parallelism().unwrap_or(nz!(1)))
    }

    /// Creates a pool with the requested number of worker threads.
    ///
    /// # Panics
    ///
    /// Panics if the operating system refuses to spawn a worker thread.
    #[must_use]
    pub fn new(thread_count: NonZero<usize>) -> Self {
        let (txs, rxs): (Vec<_>, Vec<_>) = (0..thread_count.get()).map(|_| mpsc::channel()).unzip();

        let rxs = Arc::new(Mutex::new(rxs));

        let join_handles = (0..thread_count.get())
            .map(|index| {
                thread::Builder::new()
                    .name(format!("bench-worker-{index}"))
                    .spawn({
                        let rxs = Arc::clone(&rxs);
                        move || {
                            let rx = rxs
                                .lock()
                                .expect("popping a preallocated element cannot panic, so the lock is never poisoned")
                                .pop()
                                .expect("one receiver was created for every spawned worker");
                            worker_entrypoint(&rx);
                        }
                    })
                    .expect("spawning a worker thread failed, leaving nothing to benchmark on")
            })
            .collect();

        Self {
            command_txs: txs,
            join_handles,
            thread_count,
        }
    }

    /// Returns the number of worker threads in the pool.
    #[must_use]
    pub fn thread_count(&self) -> NonZero<usize> {
        self.thread_count
    }

    /// Enqueues a task to be executed on every thread in the pool.
    ///
    /// Does not wait for the task to complete - collecting any results
    /// is up to the caller to organize via sidechannels.
    pub(crate) fn enqueue_task(&self, f: impl FnOnce() + Clone + Send + 'static) {
        for tx in &self.command_txs {
            tx.send(Command::Execute(Box::new(f.clone())))
                .expect("worker threads stay alive for as long as the pool exists");
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        for tx in self.command_txs.drain(..) {
            // A worker that already exited has also already drained its queue,
            // so a failed send means there is nothing left to shut down.
            drop(tx.send(Command::Shutdown));
        }

        for handle in self.join_handles.drain(..) {
            handle
                .join()
                .expect("worker thread panicked; surfacing the panic at pool teardown");
        }
    }
}

enum Command {
    Execute(Box<dyn FnOnce() + Send>),
    Shutdown,
}

fn worker_entrypoint(rx: &mpsc::Receiver<Command>) {
    while let Ok(Command::Execute(f)) = rx.recv() {
        f();
    }
}
