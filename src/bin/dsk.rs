use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Instant;

use clap::Parser;

use dsk_engine::config::{EngineConfig, PlanConfig};
use dsk_engine::driver::PrintProgress;
use dsk_engine::engine::{DskEngine, SolidKmer};
use dsk_engine::histogram::Histogram;
use dsk_engine::source::FastxFileSource;
use dsk_engine::utils::{format_bytes, parse_size};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

/// Counts solid k-mers in one or more FASTA/FASTQ inputs using bounded
/// external memory.
#[derive(Parser, Debug, Clone)]
#[clap(
    author,
    version,
    about = "Count solid k-mers across large DNA sequence collections"
)]
struct Args {
    /// Input FASTA/FASTQ files.
    #[arg(required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// k-mer length.
    #[arg(short = 'k', long, required = true)]
    kmer_size: usize,

    /// Minimum occurrence count for a k-mer to be reported solid.
    #[arg(short = 't', long = "threshold", default_value_t = 1)]
    threshold: u32,

    /// Memory budget, e.g. "1000M", "2G".
    #[arg(short = 'm', long = "max-memory", value_parser = parse_size, default_value = "1000M")]
    max_memory: usize,

    /// Disk budget, e.g. "4G"; "0B" means unbounded.
    #[arg(short = 'd', long = "max-disk", value_parser = parse_size, default_value = "0B")]
    max_disk: usize,

    /// Worker thread count; 0 means hardware parallelism.
    #[arg(short = 'w', long, default_value_t = 0)]
    workers: usize,

    /// Directory for temporary partition files.
    #[arg(long = "temp-dir", default_value = ".")]
    temp_dir: PathBuf,

    /// Prefix for temporary partition file names.
    #[arg(long = "temp-prefix", default_value = "tmp.")]
    temp_prefix: String,

    /// Optional path to write a count-multiplicity histogram to.
    #[arg(long = "histogram")]
    histogram_path: Option<PathBuf>,

    /// Output path for ⟨k-mer, count⟩ records, one per line; "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: String,
}

fn write_output(output: &str, solids: &[SolidKmer]) -> std::io::Result<()> {
    use std::io::Write;

    let mut handle: Box<dyn Write> = if output == "-" {
        Box::new(std::io::BufWriter::new(std::io::stdout()))
    } else {
        Box::new(std::io::BufWriter::new(std::fs::File::create(output)?))
    };

    for solid in solids {
        match solid {
            SolidKmer::W64(k, c) => writeln!(handle, "{}\t{}", k, c)?,
            SolidKmer::W128(k, c) => writeln!(handle, "{}\t{}", k, c)?,
            SolidKmer::W192(k, c) => writeln!(handle, "{:?}\t{}", k, c)?,
            SolidKmer::W256(k, c) => writeln!(handle, "{:?}\t{}", k, c)?,
        }
    }
    handle.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let plan_cfg = PlanConfig {
        k: args.kmer_size,
        threshold: args.threshold,
        total_bases: 0,
        max_sequence_bytes: 0,
        max_memory: args.max_memory,
        max_disk: args.max_disk,
        workers: args.workers,
    };

    let config = EngineConfig {
        plan: plan_cfg,
        temp_dir: args.temp_dir,
        temp_prefix: args.temp_prefix,
        histogram_path: args.histogram_path.clone(),
    };

    let histogram = args.histogram_path.as_ref().map(|_| Histogram::new());

    let mut source = FastxFileSource::new(args.input);
    let mut engine = DskEngine::new(config)?;

    let start = Instant::now();
    let plan = engine.configure(&source)?;
    println!(
        "plan: {} pass(es) x {} partition(s), threshold {}, memory budget {}",
        plan.passes,
        plan.partitions,
        plan.threshold,
        format_bytes(plan.memory_budget as f64)
    );

    let cancel = engine.cancel_handle();
    ctrlc_guard(cancel.clone());

    let solids = engine.execute(&mut source, &PrintProgress, histogram.as_ref())?;

    if let (Some(hist), Some(path)) = (&histogram, &args.histogram_path) {
        hist.write_to(path)?;
    }

    write_output(&args.output, &solids)?;

    println!(
        "{} solid k-mer(s) written; took {:?}",
        solids.len(),
        start.elapsed()
    );
    Ok(())
}

/// Best-effort Ctrl-C cooperative cancellation: sets the engine's shared
/// flag rather than aborting the process, so in-flight partitions finish
/// their current unit of work and temp files are still cleaned up.
fn ctrlc_guard(cancel: std::sync::Arc<std::sync::atomic::AtomicBool>) {
    let _ = ctrlc::set_handler(move || {
        cancel.store(true, Ordering::SeqCst);
    });
}
