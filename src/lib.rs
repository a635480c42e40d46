//! `dsk_engine`: an external-memory sorting-count engine for solid k-mer
//! extraction. Partitions a k-mer stream across disk, bounds peak memory to
//! a configured budget, and produces a deduplicated, count-annotated output
//! of k-mers meeting a user-supplied threshold.
//!
//! The engine itself (this crate) does not parse FASTA/FASTQ, build
//! assembly graphs, or guarantee resume-from-crash; see `source` for the
//! minimal sequence-source capability it consumes.

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod histogram;
pub mod kmer;
pub mod partition;
pub mod planner;
pub mod reduce;
pub mod source;
pub mod utils;

pub use config::{EngineConfig, PassPlan, PlanConfig};
pub use engine::{DskEngine, EngineState, SolidKmer};
pub use error::{DskError, Result};
pub use source::{Estimate, FastxFileSource, SequenceSource, VecBank};
