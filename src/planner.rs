//! Resource planner: turns sequence-volume estimates and memory/disk
//! budgets into a concrete ⟨passes, partitions⟩ plan, failing closed rather
//! than silently exceeding the memory budget.

use crate::config::{PassPlan, PlanConfig};
use crate::error::{DskError, Result};
use crate::kmer::KmerWidth;
use crate::utils::get_file_limit;

/// Reserved descriptors for stdio, the sequence source, and the process's
/// own bookkeeping, subtracted from the raw `RLIMIT_NOFILE` before it is
/// treated as "simultaneous partition files available".
const RESERVED_FDS: usize = 8;

/// Hard ceiling on passes: beyond this the budgets given are simply
/// infeasible and we should fail fast rather than spin.
const MAX_PASSES: usize = 1 << 20;

fn validate(cfg: &PlanConfig, width: KmerWidth) -> Result<()> {
    if cfg.k == 0 || cfg.k > width.max_k() {
        return Err(DskError::InvalidConfig(format!(
            "k={} is out of range for the selected k-mer width (max {})",
            cfg.k,
            width.max_k()
        )));
    }
    if cfg.threshold < 1 {
        return Err(DskError::InvalidConfig(
            "threshold must be >= 1".to_string(),
        ));
    }
    if cfg.max_memory == 0 {
        return Err(DskError::InvalidConfig(
            "max_memory must be > 0".to_string(),
        ));
    }
    Ok(())
}

/// Size in bytes of one k-mer value for the given width.
fn kmer_byte_width(width: KmerWidth) -> usize {
    match width {
        KmerWidth::W64 => 8,
        KmerWidth::W128 => 16,
        KmerWidth::W192 => 24,
        KmerWidth::W256 => 32,
    }
}

fn div_ceil(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        (a + b - 1) / b
    }
}

/// Derives a `PassPlan` for `cfg`, given a `KmerWidth` already selected for
/// `cfg.k` (width selection is the engine façade's job, not the planner's).
pub fn plan(cfg: &PlanConfig, width: KmerWidth) -> Result<PassPlan> {
    validate(cfg, width)?;

    let workers = if cfg.workers == 0 {
        num_cpus::get()
    } else {
        cfg.workers
    };

    let kmer_bytes = kmer_byte_width(width) as u64;
    let volume = cfg.total_bases.saturating_mul(kmer_bytes);

    let fd_limit = get_file_limit();
    // 4096 is an extra ceiling applied only when the platform's open-file
    // limit is unusually generous.
    let max_partitions = fd_limit.saturating_sub(RESERVED_FDS).max(1).min(4096);

    let memory_per_worker = (cfg.max_memory / workers.max(1)).max(1) as u64;

    let mut passes: usize = if cfg.max_disk > 0 {
        div_ceil(volume, cfg.max_disk as u64).max(1) as usize
    } else {
        1
    };

    loop {
        let per_pass_volume = div_ceil(volume, passes as u64).max(1);
        let partitions = div_ceil(per_pass_volume, memory_per_worker).max(1) as usize;

        if partitions <= max_partitions {
            return Ok(PassPlan {
                passes,
                partitions,
                threshold: cfg.threshold,
                k: cfg.k,
                memory_budget: cfg.max_memory,
                disk_budget: cfg.max_disk,
                kmer_width: width,
                fd_limit,
            });
        }

        if passes >= MAX_PASSES {
            return Err(DskError::ResourceExhausted {
                attempted_passes: passes as u32,
                attempted_partitions: partitions as u32,
                fd_limit,
            });
        }
        passes += 1;
    }
}
