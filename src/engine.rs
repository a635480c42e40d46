//! Engine façade: orchestrates passes, wires the k-mer model, planner,
//! partition writer, and parallel driver together, manages temporary file
//! lifecycle, and produces the final solid k-mer output.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::{EngineConfig, PassPlan};
use crate::driver::{self, ProgressListener};
use crate::error::{DskError, Result};
use crate::histogram::Histogram;
use crate::kmer::{KmerInt, KmerWidth, KmerWindow, U192, U256};
use crate::partition::PartitionWriter;
use crate::planner;
use crate::source::SequenceSource;
use crate::utils::{find_stale_partition_files, remove_files};

/// `Created -> Configured -> Writing(p) -> Reducing(p) -> ... -> Finalized`,
/// with `Failed` reachable (and terminal) from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Created,
    Configured,
    Writing(usize),
    Reducing(usize),
    Finalized,
    Failed,
}

/// RAII cleanup of this run's temporary partition files: removes any file
/// sharing the run's prefix, both at construction (garbage left behind by a
/// previous abnormal run) and on every exit path that isn't a clean
/// finalize.
struct TempFileSet {
    base_path: std::path::PathBuf,
    prefix: String,
}

impl TempFileSet {
    fn new(base_path: std::path::PathBuf, prefix: String) -> Self {
        let stale = find_stale_partition_files(&base_path, &prefix);
        remove_files(&stale);
        Self { base_path, prefix }
    }

    fn cleanup(&self) {
        let files = find_stale_partition_files(&self.base_path, &self.prefix);
        remove_files(&files);
    }
}

impl Drop for TempFileSet {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// The generic engine, monomorphic over one concrete `KmerInt` width.
pub struct Engine<T: KmerInt> {
    config: EngineConfig,
    width: KmerWidth,
    state: EngineState,
    plan: Option<PassPlan>,
    temp_files: TempFileSet,
    cancel: Arc<AtomicBool>,
    _marker: PhantomData<T>,
}

impl<T: KmerInt> Engine<T> {
    fn new(config: EngineConfig, width: KmerWidth) -> Self {
        let temp_files = TempFileSet::new(config.temp_dir.clone(), config.temp_prefix.clone());
        Self {
            config,
            width,
            state: EngineState::Created,
            plan: None,
            temp_files,
            cancel: Arc::new(AtomicBool::new(false)),
            _marker: PhantomData,
        }
    }

    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Runs the planner against `source`'s estimate, moving `Created ->
    /// Configured`.
    pub fn configure<S: SequenceSource>(&mut self, source: &S) -> Result<PassPlan> {
        if self.state != EngineState::Created {
            return Err(DskError::Internal(
                "configure called outside the Created state".to_string(),
            ));
        }

        let estimate = source.estimate();
        let mut plan_cfg = self.config.plan.clone();
        plan_cfg.total_bases = estimate.total_bytes;
        plan_cfg.max_sequence_bytes = estimate.max_sequence_bytes;

        let plan = planner::plan(&plan_cfg, self.width)?;
        self.plan = Some(plan);
        self.state = EngineState::Configured;
        Ok(plan)
    }

    /// Runs `Configured -> Finalized`. Not re-entrant: calling this from any
    /// other state is an internal error, not a silent retry.
    pub fn execute<S: SequenceSource>(
        &mut self,
        source: &mut S,
        progress: &dyn ProgressListener,
        histogram: Option<&Histogram>,
    ) -> Result<Vec<(T, u32)>> {
        if self.state != EngineState::Configured {
            self.state = EngineState::Failed;
            return Err(DskError::Internal(
                "execute is not re-entrant; engine must be in the Configured state".to_string(),
            ));
        }

        let plan = self.plan.expect("Configured state implies a plan was set");
        let workers = self.config.resolved_workers();
        let memory_per_worker = (plan.memory_budget / workers.max(1)).max(1);

        let mut output: Vec<(T, u32)> = Vec::new();

        for pass in 0..plan.passes {
            self.state = EngineState::Writing(pass);

            if self.cancel.load(Ordering::SeqCst) {
                return self.fail(DskError::Cancelled);
            }

            let mut writer = match PartitionWriter::<T>::create(
                &self.config.temp_dir,
                &self.config.temp_prefix,
                pass,
                plan.passes,
                plan.partitions,
            ) {
                Ok(w) => w,
                Err(e) => return self.fail(e),
            };

            let mut window = KmerWindow::<T>::new(plan.k);
            for seq_result in source.sequences() {
                let seq = match seq_result {
                    Ok(s) => s,
                    Err(e) => return self.fail(DskError::from(e)),
                };
                // A new sequence record starts a fresh window: k-mers never
                // span a record boundary.
                window.invalidate();
                for &c in &seq {
                    if let Some(kmer) = window.push(c) {
                        if let Err(e) = writer.route(kmer) {
                            return self.fail(e);
                        }
                    }
                }

                if self.cancel.load(Ordering::SeqCst) {
                    return self.fail(DskError::Cancelled);
                }
            }

            let paths = match writer.finish() {
                Ok(p) => p,
                Err(e) => return self.fail(e),
            };

            self.state = EngineState::Reducing(pass);
            match driver::reduce_pass::<T>(
                &paths,
                pass,
                plan.threshold,
                memory_per_worker,
                workers,
                histogram,
                &self.cancel,
                progress,
            ) {
                Ok(mut v) => output.append(&mut v),
                Err(e) => return self.fail(e),
            }
        }

        self.state = EngineState::Finalized;
        Ok(output)
    }

    fn fail<R>(&mut self, err: DskError) -> Result<R> {
        self.state = EngineState::Failed;
        self.temp_files.cleanup();
        Err(err)
    }
}

/// One solid k-mer, tagged by the width it was produced with: a
/// tagged-variant façade over the solid output so callers don't need to
/// monomorphize on `KmerInt` themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolidKmer {
    W64(u64, u32),
    W128(u128, u32),
    W192(U192, u32),
    W256(U256, u32),
}

/// The non-generic public entry point: picks the narrowest `KmerInt` width
/// that fits `2k` bits and dispatches to the matching `Engine<T>` variant.
pub enum DskEngine {
    W64(Engine<u64>),
    W128(Engine<u128>),
    W192(Engine<U192>),
    W256(Engine<U256>),
}

impl DskEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let width = KmerWidth::for_k(config.plan.k).ok_or_else(|| {
            DskError::InvalidConfig(format!(
                "k={} exceeds the largest supported k-mer width (256 bits)",
                config.plan.k
            ))
        })?;
        Ok(match width {
            KmerWidth::W64 => DskEngine::W64(Engine::new(config, width)),
            KmerWidth::W128 => DskEngine::W128(Engine::new(config, width)),
            KmerWidth::W192 => DskEngine::W192(Engine::new(config, width)),
            KmerWidth::W256 => DskEngine::W256(Engine::new(config, width)),
        })
    }

    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        match self {
            DskEngine::W64(e) => e.cancel_handle(),
            DskEngine::W128(e) => e.cancel_handle(),
            DskEngine::W192(e) => e.cancel_handle(),
            DskEngine::W256(e) => e.cancel_handle(),
        }
    }

    pub fn configure<S: SequenceSource>(&mut self, source: &S) -> Result<PassPlan> {
        match self {
            DskEngine::W64(e) => e.configure(source),
            DskEngine::W128(e) => e.configure(source),
            DskEngine::W192(e) => e.configure(source),
            DskEngine::W256(e) => e.configure(source),
        }
    }

    pub fn execute<S: SequenceSource>(
        &mut self,
        source: &mut S,
        progress: &dyn ProgressListener,
        histogram: Option<&Histogram>,
    ) -> Result<Vec<SolidKmer>> {
        match self {
            DskEngine::W64(e) => e
                .execute(source, progress, histogram)
                .map(|v| v.into_iter().map(|(k, c)| SolidKmer::W64(k, c)).collect()),
            DskEngine::W128(e) => e
                .execute(source, progress, histogram)
                .map(|v| v.into_iter().map(|(k, c)| SolidKmer::W128(k, c)).collect()),
            DskEngine::W192(e) => e
                .execute(source, progress, histogram)
                .map(|v| v.into_iter().map(|(k, c)| SolidKmer::W192(k, c)).collect()),
            DskEngine::W256(e) => e
                .execute(source, progress, histogram)
                .map(|v| v.into_iter().map(|(k, c)| SolidKmer::W256(k, c)).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanConfig;
    use crate::driver::NoopProgress;
    use crate::source::VecBank;

    fn config_for(k: usize, threshold: u32, temp_dir: std::path::PathBuf, tag: &str) -> EngineConfig {
        EngineConfig {
            plan: PlanConfig {
                k,
                threshold,
                total_bases: 0,
                max_sequence_bytes: 0,
                max_memory: 64 * 1024 * 1024,
                max_disk: 0,
                workers: 1,
            },
            temp_dir,
            temp_prefix: format!("dsk_engine_test_{}.", tag),
            histogram_path: None,
        }
    }

    #[test]
    fn single_sequence_single_solid_kmer() {
        let dir = std::env::temp_dir().join("dsk_engine_engine_test_a");
        let cfg = config_for(27, 1, dir, "a");
        let mut engine = DskEngine::new(cfg).unwrap();
        let mut bank = VecBank::new(["GATCCTCCCCAGGCCCCTACACCCAAT"]);
        engine.configure(&bank).unwrap();
        let out = engine
            .execute(&mut bank, &NoopProgress, None)
            .unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn threshold_above_count_yields_nothing() {
        let dir = std::env::temp_dir().join("dsk_engine_engine_test_b");
        let cfg = config_for(27, 2, dir, "b");
        let mut engine = DskEngine::new(cfg).unwrap();
        let mut bank = VecBank::new(["GATCCTCCCCAGGCCCCTACACCCAAT"]);
        engine.configure(&bank).unwrap();
        let out = engine
            .execute(&mut bank, &NoopProgress, None)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn execute_is_not_reentrant() {
        let dir = std::env::temp_dir().join("dsk_engine_engine_test_c");
        let cfg = config_for(27, 1, dir, "c");
        let mut engine = DskEngine::new(cfg).unwrap();
        let mut bank = VecBank::new(["GATCCTCCCCAGGCCCCTACACCCAAT"]);
        engine.configure(&bank).unwrap();
        engine.execute(&mut bank, &NoopProgress, None).unwrap();
        let second = engine.execute(&mut bank, &NoopProgress, None);
        assert!(matches!(second, Err(DskError::Internal(_))));
    }

    #[test]
    fn cancelling_before_execute_returns_cancelled() {
        let dir = std::env::temp_dir().join("dsk_engine_engine_test_d");
        let cfg = config_for(27, 1, dir, "d");
        let mut engine = DskEngine::new(cfg).unwrap();
        let mut bank = VecBank::new(["GATCCTCCCCAGGCCCCTACACCCAAT"]);
        engine.configure(&bank).unwrap();
        engine.cancel_handle().store(true, Ordering::SeqCst);
        let out = engine.execute(&mut bank, &NoopProgress, None);
        assert!(matches!(out, Err(DskError::Cancelled)));
    }
}
