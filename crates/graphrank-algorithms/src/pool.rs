//! Fixed worker pool for partitioned, per-iteration work
//!
//! The pool is an owned resource: build it once, pass it by reference to every
//! computation that needs it, and drop (or [`TaskPool::shutdown`]) it when done.

use crate::error::{AlgoError, AlgoResult};
use rayon::prelude::*;
use std::any::Any;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// Worker pool configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolConfig {
    /// Number of worker threads (and partitions per batch)
    pub workers: usize,
    /// Prefix for worker thread names
    pub thread_name: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            thread_name: "graphrank-worker".to_string(),
        }
    }
}

pub struct TaskPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl TaskPool {
    /// Create a pool with `workers` threads and default naming
    pub fn new(workers: usize) -> AlgoResult<Self> {
        Self::from_config(&PoolConfig {
            workers,
            ..PoolConfig::default()
        })
    }

    pub fn from_config(config: &PoolConfig) -> AlgoResult<Self> {
        if config.workers == 0 {
            return Err(AlgoError::InvalidConfig(
                "task pool needs at least one worker".to_string(),
            ));
        }

        let prefix = config.thread_name.clone();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(move |i| format!("{}-{}", prefix, i))
            .build()
            .map_err(|e| AlgoError::InvalidConfig(format!("cannot start task pool: {}", e)))?;

        debug!("Started task pool with {} workers", config.workers);
        Ok(TaskPool {
            pool,
            workers: config.workers,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Contiguous, non-overlapping index ranges covering `0..len`, at most one per worker
    pub fn partitions(&self, len: usize) -> Vec<Range<usize>> {
        if len == 0 {
            return Vec::new();
        }
        let size = self.partition_size(len);
        (0..len)
            .step_by(size)
            .map(|start| start..(start + size).min(len))
            .collect()
    }

    fn partition_size(&self, len: usize) -> usize {
        ((len + self.workers - 1) / self.workers).max(1)
    }

    /// Run `kernel` once per partition of `output`, in parallel, and wait for all of them.
    ///
    /// Each call receives the global index range it owns and the matching
    /// mutable slice; no two calls see overlapping memory. The first partition
    /// to return an error or panic fails the batch with
    /// [`AlgoError::WorkerFailure`].
    pub fn run_partitioned<T, F>(&self, output: &mut [T], kernel: F) -> AlgoResult<()>
    where
        T: Send,
        F: Fn(Range<usize>, &mut [T]) -> Result<(), String> + Sync,
    {
        if output.is_empty() {
            return Ok(());
        }
        let size = self.partition_size(output.len());

        self.pool.install(|| {
            output
                .par_chunks_mut(size)
                .enumerate()
                .try_for_each(|(partition, slice)| {
                    let start = partition * size;
                    let range = start..start + slice.len();
                    match panic::catch_unwind(AssertUnwindSafe(|| kernel(range, slice))) {
                        Ok(Ok(())) => Ok(()),
                        Ok(Err(reason)) => Err(AlgoError::WorkerFailure { partition, reason }),
                        Err(payload) => Err(AlgoError::WorkerFailure {
                            partition,
                            reason: panic_message(payload.as_ref()),
                        }),
                    }
                })
        })
    }

    /// Stop the worker threads. Equivalent to dropping the pool.
    pub fn shutdown(self) {
        debug!("Shutting down task pool with {} workers", self.workers);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}
