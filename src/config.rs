use crate::kmer::KmerWidth;

/// The inputs the resource planner consumes, grouped for ergonomic
/// construction instead of a six-argument function.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// k-mer length.
    pub k: usize,
    /// Minimum count for a k-mer to be reported solid.
    pub threshold: u32,
    /// Estimated total bases across the sequence source.
    pub total_bases: u64,
    /// Largest single sequence, in bytes (unused by the planner directly but
    /// carried through for parity with the source's estimate contract).
    pub max_sequence_bytes: u64,
    /// Memory budget in bytes.
    pub max_memory: usize,
    /// Disk budget in bytes; 0 means unbounded.
    pub max_disk: usize,
    /// Worker count; 0 means "use all available hardware parallelism".
    pub workers: usize,
}

/// Full engine configuration: the plan inputs plus the ambient run-time
/// knobs (temp file placement, optional histogram output).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub plan: PlanConfig,
    pub temp_dir: std::path::PathBuf,
    pub temp_prefix: String,
    pub histogram_path: Option<std::path::PathBuf>,
}

impl EngineConfig {
    pub fn resolved_workers(&self) -> usize {
        if self.plan.workers == 0 {
            num_cpus::get()
        } else {
            self.plan.workers
        }
    }
}

/// A resolved ⟨P, Q, T, k⟩ plan plus the width and file-descriptor
/// bookkeeping needed downstream.
#[derive(Debug, Clone, Copy)]
pub struct PassPlan {
    pub passes: usize,
    pub partitions: usize,
    pub threshold: u32,
    pub k: usize,
    pub memory_budget: usize,
    pub disk_budget: usize,
    pub kmer_width: KmerWidth,
    pub fd_limit: usize,
}
