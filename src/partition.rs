//! Partition writer: routes each canonical k-mer produced during a pass to
//! exactly one of Q buffered partition files on disk.

use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use bytemuck::bytes_of;

use crate::error::Result;
use crate::kmer::KmerInt;
use crate::utils::{create_partition_files, create_partition_writers};

/// Hashes a k-mer's raw bytes with a single fast avalanche hash, covering
/// every word of a wide `K` uniformly; no folding step is needed since
/// `seahash::hash` consumes the whole byte slice, not just the low word.
#[inline]
pub fn hash_kmer<T: KmerInt>(kmer: &T) -> u64 {
    seahash::hash(bytes_of(kmer))
}

/// Splits a hash into its (bucket, pass) coordinates:
/// `bucket = h mod Q`, `pass_of_K = (h / Q) mod P`.
#[inline]
pub fn bucket_and_pass(h: u64, partitions: usize, passes: usize) -> (usize, usize) {
    let q = (h % partitions as u64) as usize;
    let p = ((h / partitions as u64) % passes as u64) as usize;
    (q, p)
}

/// Owns the Q open partition files for one pass and routes k-mers into
/// them, buffering writes through `create_partition_files`/
/// `create_partition_writers`.
pub struct PartitionWriter<T: KmerInt> {
    partitions: usize,
    passes: usize,
    current_pass: usize,
    writers: Vec<std::io::BufWriter<std::fs::File>>,
    paths: Vec<PathBuf>,
    _marker: PhantomData<T>,
}

impl<T: KmerInt> PartitionWriter<T> {
    pub fn create(
        base_path: &Path,
        prefix: &str,
        pass: usize,
        passes: usize,
        partitions: usize,
    ) -> Result<Self> {
        let paths = create_partition_files(base_path, prefix, pass, partitions)?;
        let writers = create_partition_writers(&paths)?;
        Ok(Self {
            partitions,
            passes,
            current_pass: pass,
            writers,
            paths,
            _marker: PhantomData,
        })
    }

    /// Routes `kmer` to its bucket's buffer if it belongs to the pass this
    /// writer was opened for; a no-op otherwise (the caller scans the full
    /// source once per pass and lets each writer pick its own share).
    pub fn route(&mut self, kmer: T) -> Result<()> {
        let h = hash_kmer(&kmer);
        let (bucket, pass_of_kmer) = bucket_and_pass(h, self.partitions, self.passes);
        if pass_of_kmer != self.current_pass {
            return Ok(());
        }
        self.writers[bucket].write_all(bytes_of(&kmer))?;
        Ok(())
    }

    /// Flushes and closes every partition file, returning their paths for
    /// the reducer to pick up.
    pub fn finish(mut self) -> Result<Vec<PathBuf>> {
        for w in &mut self.writers {
            w.flush()?;
        }
        Ok(self.paths)
    }
}
