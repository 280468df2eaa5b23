use crate::error::{Result, SolistraError};
use rayon::ThreadPool;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Shared thread pool for CPU-bound tasks owned by a standalone application.
///
/// The lifecycle core carries this as an opaque runtime: it is handed to the
/// application at construction and never interpreted by the context manager.
#[derive(Clone)]
pub struct WorkerPool {
    pool: Arc<ThreadPool>,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

impl WorkerPool {
    pub fn new(num_threads: usize) -> Self {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .expect("Failed to build worker thread pool");
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Execute a CPU-bound task in the thread pool and return its result
    /// asynchronously. A panicking task surfaces as an error instead of
    /// tearing down the caller.
    pub async fn run<F, R>(&self, task: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.pool.spawn(move || {
            let result = std::panic::catch_unwind(AssertUnwindSafe(task));
            let _ = tx.send(result);
        });

        match rx.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) | Err(_) => Err(SolistraError::Internal(
                "Worker task panicked".to_string(),
            )),
        }
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}
