//! Parallel driver: reduces a pass's partitions across a worker pool,
//! merges per-worker output in partition-index order, and observes
//! cooperative cancellation.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::error::{DskError, Result};
use crate::histogram::Histogram;
use crate::kmer::KmerInt;
use crate::reduce::reduce_partition;

/// Coarse-grained progress reporting, invoked once per completed partition
/// rather than per-k-mer, to avoid contention.
pub trait ProgressListener: Send + Sync {
    fn on_partition_done(&self, pass: usize, done: usize, total: usize);
}

/// The default: no reporting.
pub struct NoopProgress;
impl ProgressListener for NoopProgress {
    fn on_partition_done(&self, _pass: usize, _done: usize, _total: usize) {}
}

/// Prints one coarse progress line per completed partition.
pub struct PrintProgress;
impl ProgressListener for PrintProgress {
    fn on_partition_done(&self, pass: usize, done: usize, total: usize) {
        println!("pass {}: {}/{} partitions reduced", pass, done, total);
    }
}

/// Reduces every partition of one pass in parallel, merging per-worker
/// output in ascending partition-index order. Per-worker buffering is used
/// unconditionally so callers can depend on partition-order determinism.
#[allow(clippy::too_many_arguments)]
pub fn reduce_pass<T: KmerInt>(
    paths: &[PathBuf],
    pass: usize,
    threshold: u32,
    memory_per_worker: usize,
    workers: usize,
    histogram: Option<&Histogram>,
    cancel: &AtomicBool,
    progress: &dyn ProgressListener,
) -> Result<Vec<(T, u32)>> {
    if cancel.load(Ordering::SeqCst) {
        return Err(DskError::Cancelled);
    }

    let total = paths.len();
    let done = AtomicUsize::new(0);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
        .map_err(|e| DskError::Internal(e.to_string()))?;

    let results: Vec<Result<Vec<(T, u32)>>> = pool.install(|| {
        (0..total)
            .into_par_iter()
            .map(|q| {
                if cancel.load(Ordering::SeqCst) {
                    return Err(DskError::Cancelled);
                }
                let outcome = reduce_partition::<T>(&paths[q], threshold, memory_per_worker, histogram);
                match &outcome {
                    Ok(_) => {
                        let d = done.fetch_add(1, Ordering::SeqCst) + 1;
                        progress.on_partition_done(pass, d, total);
                    }
                    Err(_) => {
                        cancel.store(true, Ordering::SeqCst);
                    }
                }
                outcome
            })
            .collect()
    });

    // Surface the first genuine error; a bare `Cancelled` result on some
    // partitions is an effect of another partition's failure, not the cause.
    let mut real_error: Option<DskError> = None;
    let mut saw_cancelled = false;
    let mut merged = Vec::with_capacity(total);

    for r in results {
        match r {
            Ok(v) => merged.push(v),
            Err(DskError::Cancelled) => saw_cancelled = true,
            Err(e) => {
                if real_error.is_none() {
                    real_error = Some(e);
                }
            }
        }
    }

    if let Some(e) = real_error {
        return Err(e);
    }
    if saw_cancelled {
        return Err(DskError::Cancelled);
    }

    Ok(merged.into_iter().flatten().collect())
}
